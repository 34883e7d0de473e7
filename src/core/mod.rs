//! Core types and foundational components
//!
//! This module contains the reference and check records, error handling,
//! and constants used throughout the application.

pub mod constants;
pub mod error;
pub mod types;

// Re-export commonly used items for convenience
pub use error::{CheckFailure, LinkCheckError, Result};
pub use types::{Check, CheckKind, Reference, ReferenceError};

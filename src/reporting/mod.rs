//! Reporting
//!
//! This module folds failing checks into the final report and holds the
//! structured logging helpers.

pub mod logging;
pub mod report;

// Re-export commonly used items
pub use report::{FileWarnings, LineWarning, Report};

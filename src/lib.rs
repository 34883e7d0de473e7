//! docs-link-checker
//!
//! Finds hyperlinks and GitHub repository references in documentation,
//! checks each one over the network and reports the broken or stale ones.
//!
//! The crate is organized as:
//! - `core`: shared types, errors and constants
//! - `config`: TOML configuration and CLI overlay
//! - `discovery`: file discovery and reference extraction
//! - `validation`: classification, network checks, timeouts and collection
//! - `reporting`: the failure report and logging
//! - `ui`: CLI parsing, output, progress and completions

pub mod config;
pub mod core;
pub mod discovery;
pub mod reporting;
pub mod ui;
pub mod validation;

pub use config::{CliConfig, Config};
pub use crate::core::{Check, CheckFailure, CheckKind, LinkCheckError, Reference, Result};
pub use reporting::Report;
pub use validation::{Checker, Deadline, RunSummary, ValidateReference, Validator};

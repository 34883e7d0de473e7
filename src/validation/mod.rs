//! Reference validation
//!
//! Classifies each reference, checks it over the network under a timeout
//! and a shared concurrency limit, and collects the failing checks.

pub mod classifier;
pub mod collector;
pub mod github;
pub mod link;
pub mod race;
pub mod validator;

// Re-export commonly used items
pub use classifier::{Target, classify};
pub use collector::{Checker, FileOutcome, RunSummary};
pub use race::Deadline;
pub use validator::{ValidateReference, Validator};

//! User interface and interaction
//!
//! This module contains all components related to user interaction,
//! including CLI parsing, report output, progress reporting,
//! and shell completion generation.

pub mod cli;
pub mod completion;
pub mod output;
pub mod progress;

// Re-export commonly used items
pub use cli::{Cli, Commands, cli_to_config};
pub use completion::{print_completions, write_completions};
pub use output::{determine_exit_code, display_file_problems, emit_report};
pub use progress::ProgressReporter;

//! Reference discovery and file processing
//!
//! This module finds URL references in text and the candidate files
//! to scan.

pub mod extractor;
pub mod path_utils;

// Re-export commonly used items
pub use extractor::{extract_file, extract_line, extract_text};
pub use path_utils::{expand_named_files, find_candidate_files};

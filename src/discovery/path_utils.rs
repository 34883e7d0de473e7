use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::core::error::{LinkCheckError, Result};

/// Walk `root` and collect every file whose extension is in `file_types`.
///
/// Hidden entries are skipped and ignore files are honoured. Entries that
/// cannot be read are logged and skipped so one bad directory does not end
/// the walk. Output is sorted for a stable dispatch order.
pub fn find_candidate_files(root: &Path, file_types: &HashSet<String>) -> Result<Vec<PathBuf>> {
    if !root.exists() {
        return Err(LinkCheckError::FileNotFound(root.display().to_string()));
    }
    if root.is_file() {
        return Ok(if has_wanted_extension(root, file_types) {
            vec![root.to_path_buf()]
        } else {
            Vec::new()
        });
    }

    let mut result_paths = Vec::new();
    for entry in ignore::WalkBuilder::new(root).build() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                log::warn!("Skipping unreadable entry under {}: {err}", root.display());
                continue;
            }
        };

        let entry_path = entry.path();
        if entry_path.is_file() && has_wanted_extension(entry_path, file_types) {
            result_paths.push(entry_path.to_path_buf());
        }
    }

    result_paths.sort();
    Ok(result_paths)
}

/// Resolve explicitly named files. Directories are rejected.
pub fn expand_named_files(input_paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut result_paths = Vec::with_capacity(input_paths.len());

    for path in input_paths {
        if path.is_dir() {
            return Err(LinkCheckError::PathExpansion(format!(
                "'{}' is a directory. Use the dir command to check directories.",
                path.display()
            )));
        }
        if !path.exists() {
            return Err(LinkCheckError::FileNotFound(path.display().to_string()));
        }
        result_paths.push(path.clone());
    }

    Ok(result_paths)
}

fn has_wanted_extension(path: &Path, file_types: &HashSet<String>) -> bool {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => file_types.contains(ext),
        // Include files without extensions if "" is in the set
        None => file_types.contains(""),
    }
}

//! The failure report: file → line → warning.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::core::error::Result;
use crate::core::types::Check;

/// One failing reference, as shown in the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineWarning {
    pub url: String,
    pub message: String,
}

/// Warnings for a single file, keyed by line number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileWarnings {
    #[serde(rename = "line warnings")]
    lines: BTreeMap<u64, LineWarning>,
}

impl FileWarnings {
    pub fn get(&self, line: u64) -> Option<&LineWarning> {
        self.lines.get(&line)
    }

    pub fn iter(&self) -> impl Iterator<Item = (u64, &LineWarning)> {
        self.lines.iter().map(|(line, warning)| (*line, warning))
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Failing checks folded by file and line.
///
/// Passing checks are never recorded. A line holds one warning: folding a
/// second failure for the same file and line replaces the first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Report {
    files: BTreeMap<String, FileWarnings>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one check in. Returns whether it was recorded.
    pub fn fold(&mut self, check: Check) -> bool {
        if check.is_ok() {
            return false;
        }

        let warning = LineWarning {
            url: check.url().to_string(),
            message: check.message().to_string(),
        };
        self.files
            .entry(check.file().to_string())
            .or_default()
            .lines
            .insert(check.line(), warning);
        true
    }

    pub fn file(&self, file: &str) -> Option<&FileWarnings> {
        self.files.get(file)
    }

    pub fn get(&self, file: &str, line: u64) -> Option<&LineWarning> {
        self.file(file).and_then(|warnings| warnings.get(line))
    }

    pub fn files(&self) -> impl Iterator<Item = (&str, &FileWarnings)> {
        self.files
            .iter()
            .map(|(file, warnings)| (file.as_str(), warnings))
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn warning_count(&self) -> usize {
        self.files.values().map(FileWarnings::len).sum()
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.to_json_pretty()?)?;
        Ok(())
    }
}

impl Extend<Check> for Report {
    fn extend<I: IntoIterator<Item = Check>>(&mut self, checks: I) {
        for check in checks {
            self.fold(check);
        }
    }
}

impl FromIterator<Check> for Report {
    fn from_iter<I: IntoIterator<Item = Check>>(checks: I) -> Self {
        let mut report = Report::new();
        report.extend(checks);
        report
    }
}

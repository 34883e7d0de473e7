use std::io::Write;
use std::path::Path;

use crate::core::error::Result;
use crate::reporting::report::Report;
use crate::validation::collector::RunSummary;

/// Write the report as pretty JSON to `out_file`, or to `stdout` when no
/// file is given.
pub fn emit_report<W: Write>(report: &Report, out_file: Option<&Path>, stdout: &mut W) -> Result<()> {
    match out_file {
        Some(path) => {
            writeln!(stdout, "writing output to {}", path.display())?;
            report.write_to(path)
        }
        None => {
            writeln!(stdout, "{}", report.to_json_pretty()?)?;
            Ok(())
        }
    }
}

/// List files that could not be read or were skipped.
pub fn display_file_problems<W: Write>(summary: &RunSummary, stderr: &mut W) -> Result<()> {
    for (file, error) in &summary.unreadable {
        writeln!(stderr, "Warning: could not read {file}: {error}")?;
    }
    if !summary.skipped.is_empty() {
        writeln!(
            stderr,
            "Warning: run deadline passed before {} file(s) were checked",
            summary.skipped.len()
        )?;
    }
    Ok(())
}

/// 0 when nothing failed and every file was checked, 1 otherwise
pub fn determine_exit_code(summary: &RunSummary) -> i32 {
    if summary.is_clean() { 0 } else { 1 }
}

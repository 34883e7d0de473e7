use clap::CommandFactory;
use clap_complete::{Shell, generate};
use std::io::Write;

use crate::ui::cli::Cli;

/// Name completions are registered under
pub const BIN_NAME: &str = "docs-link-checker";

pub fn print_completions(shell: Shell) {
    write_completions(shell, &mut std::io::stdout());
}

/// Write the completion script for `shell` into `out`
pub fn write_completions<W: Write>(shell: Shell, out: &mut W) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, BIN_NAME, out);
}

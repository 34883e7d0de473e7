// Command-line interface definitions for docs-link-checker

use crate::config::CliConfig;
use crate::core::constants::timeouts;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    // Core Options
    /// Seconds each check may take (default: 5)
    #[arg(
        short = 't',
        long,
        global = true,
        value_name = "SECONDS",
        value_parser = clap::value_parser!(u64).range(1..),
        help_heading = "Core Options"
    )]
    pub timeout: Option<u64>,

    /// Maximum checks in flight (default: 1000)
    #[arg(
        long,
        global = true,
        value_name = "COUNT",
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..),
        help_heading = "Core Options"
    )]
    pub concurrency: Option<usize>,

    /// Stop the whole run after this many seconds
    #[arg(
        long,
        global = true,
        value_name = "SECONDS",
        value_parser = clap::value_parser!(u64).range(1..),
        help_heading = "Core Options"
    )]
    pub deadline: Option<u64>,

    // Filtering & Content
    /// File extensions to scan in directories (e.g., rst,txt,md)
    #[arg(
        long,
        global = true,
        value_name = "EXTENSIONS",
        help_heading = "Filtering & Content"
    )]
    pub include: Option<String>,

    /// URL patterns to exclude (regex)
    #[arg(
        long,
        global = true,
        value_name = "REGEX",
        help_heading = "Filtering & Content"
    )]
    pub exclude_pattern: Vec<String>,

    // Output & Verbosity
    /// Write the JSON report to FILE instead of stdout
    #[arg(
        short = 'o',
        long = "out",
        global = true,
        value_name = "FILE",
        help_heading = "Output & Verbosity"
    )]
    pub output: Option<String>,

    /// Suppress progress and log output
    #[arg(short = 'q', long, global = true, help_heading = "Output & Verbosity")]
    pub quiet: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long, global = true, help_heading = "Output & Verbosity")]
    pub verbose: bool,

    /// Disable progress bars
    #[arg(long, global = true, help_heading = "Output & Verbosity")]
    pub no_progress: bool,

    // Network
    /// Custom User-Agent header
    #[arg(long, global = true, value_name = "AGENT", help_heading = "Network")]
    pub user_agent: Option<String>,

    /// GitHub API base URL
    #[arg(long, global = true, value_name = "URL", help_heading = "Network")]
    pub github_api_url: Option<String>,

    // Configuration
    /// Use specific config file
    #[arg(long, global = true, value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<String>,

    /// Ignore config files
    #[arg(long, global = true, help_heading = "Configuration")]
    pub no_config: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check every matching file under a directory
    Dir {
        /// Directory to walk
        #[arg(default_value = ".")]
        path: String,
    },
    /// Check the named files, whatever their extension
    #[command(arg_required_else_help = true)]
    File {
        /// Files to check
        #[arg(required = true)]
        paths: Vec<String>,
    },
    /// Check text given as an argument, or read from standard input
    Stdin {
        /// Text to check instead of standard input
        text: Option<String>,
    },
    /// Generate shell completions
    #[command(arg_required_else_help = true)]
    Completion {
        /// The shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Convert parsed arguments into the configuration overlay
pub fn cli_to_config(cli: &Cli) -> CliConfig {
    let mut cli_config = CliConfig::default();

    // Core options
    if let Some(timeout) = cli.timeout {
        if timeout > timeouts::MAX_TIMEOUT_SECONDS {
            eprintln!(
                "Warning: Timeout of {timeout} seconds is quite large. Consider using a smaller value for better user experience."
            );
        }
        cli_config.timeout = Some(timeout);
    }

    if let Some(concurrency) = cli.concurrency {
        if concurrency > 100 {
            eprintln!(
                "Warning: Concurrency of {concurrency} is quite high and may overwhelm servers. Consider using a smaller value."
            );
        }
        cli_config.concurrency = Some(concurrency);
    }

    cli_config.deadline = cli.deadline;

    // Filtering & inclusion
    if let Some(ref include_str) = cli.include {
        let file_types: Vec<String> = include_str
            .split(',')
            .map(|s| s.trim().trim_start_matches('.').to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if !file_types.is_empty() {
            cli_config.file_types = Some(file_types);
        }
    }

    if !cli.exclude_pattern.is_empty() {
        cli_config.exclude_patterns = Some(cli.exclude_pattern.clone());
    }

    // Output & verbosity
    cli_config.output = cli.output.clone();
    cli_config.quiet = cli.quiet;
    cli_config.verbose = cli.verbose;
    cli_config.no_progress = cli.no_progress;

    // Network
    cli_config.user_agent = cli.user_agent.clone();
    cli_config.github_api_url = cli.github_api_url.clone();

    // Configuration
    cli_config.config_file = cli.config.clone();
    cli_config.no_config = cli.no_config;

    cli_config
}

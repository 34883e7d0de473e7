use crate::config::{Config, IgnoredConfig};
use crate::core::types::Check;
use log::{debug, error, info, warn};
use std::path::Path;

/// Initialize the logger with appropriate level based on verbosity
pub fn init_logger(verbose: bool, quiet: bool) {
    let level = if quiet {
        log::LevelFilter::Off
    } else if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };

    // A second init (tests, embedding) keeps the first logger
    let _ = env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .try_init();

    debug!("Logger initialized with level: {level:?}");
}

/// Log configuration information
pub fn log_config_info(config: &Config) {
    let deadline = config
        .deadline
        .map(|secs| format!("{secs}s"))
        .unwrap_or_else(|| "none".to_string());

    info!(
        "Configuration: concurrency={}, timeout={}s, deadline={deadline}",
        config.concurrency_limit(),
        config.timeout_seconds()
    );
    info!(
        "GitHub: api={}, authenticated={}",
        config.github_api_url(),
        config.resolve_github_token().is_some()
    );
}

/// Warn about a config file that was found but skipped
pub fn log_ignored_config(ignored: &IgnoredConfig) {
    warn!(
        "Ignoring config file {}: {}",
        ignored.path.display(),
        ignored.error
    );
}

/// Log file processing information
pub fn log_file_info<P: AsRef<Path>>(file_count: usize, files: &[P]) {
    info!("Checking {file_count} file(s)");
    for (i, file) in files.iter().enumerate() {
        debug!("  {}. {}", i + 1, file.as_ref().display());
    }
}

pub fn log_file_references(file: &str, reference_count: usize) {
    debug!("{file}: {reference_count} reference(s)");
}

/// Log individual check outcomes for debugging
pub fn log_check_result(check: &Check) {
    if check.is_ok() {
        debug!("✓ {} (L{})", check.url(), check.line());
    } else {
        debug!("✗ {} (L{}) -> {}", check.url(), check.line(), check.message());
    }
}

pub fn log_unreadable_file(file: &str, reason: &str) {
    warn!("Could not read {file}: {reason}");
}

pub fn log_skipped_files(count: usize) {
    if count > 0 {
        warn!("Run deadline passed; {count} file(s) were not checked");
    }
}

/// Log run completion
pub fn log_run_complete(files_checked: usize, failures: usize, duration_ms: u128) {
    if failures == 0 {
        info!("✅ Checked {files_checked} file(s), no broken links ({duration_ms}ms)");
    } else {
        warn!("❌ Checked {files_checked} file(s), {failures} failing reference(s) ({duration_ms}ms)");
    }
}

/// Log error information
pub fn log_error(message: &str, source: Option<&dyn std::error::Error>) {
    match source {
        Some(err) => error!("{message}: {err}"),
        None => error!("{message}"),
    }
}

//! Configuration management
//!
//! This module handles loading configuration from TOML files, the
//! environment and CLI arguments.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::constants::{defaults, env, github, timeouts};
use crate::core::error::{LinkCheckError, Result};

/// A config file that was found but could not be used.
#[derive(Debug)]
pub struct IgnoredConfig {
    pub path: PathBuf,
    pub error: LinkCheckError,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Seconds each check may take before it is reported as a timeout
    pub timeout: Option<u64>,

    /// Maximum number of checks in flight across all files
    pub concurrency: Option<usize>,

    /// Seconds the whole run may take; no limit when unset
    pub deadline: Option<u64>,

    /// File extensions scanned when walking a directory
    pub file_types: Option<Vec<String>>,

    /// URL patterns to exclude (regex)
    pub exclude_patterns: Option<Vec<String>>,

    /// Custom User-Agent header
    pub user_agent: Option<String>,

    /// Token for the GitHub REST API
    pub github_token: Option<String>,

    /// Root of the GitHub REST API
    pub github_api_url: Option<String>,

    /// Write the JSON report to this path instead of stdout
    pub output: Option<String>,

    /// Enable verbose logging
    pub verbose: Option<bool>,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            LinkCheckError::Config(format!(
                "Could not read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| {
            LinkCheckError::Config(format!(
                "Invalid TOML in config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Try to find and load a config file in standard locations
    pub fn load_from_standard_locations() -> (Self, Vec<IgnoredConfig>) {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let home = std::env::var_os("HOME").map(PathBuf::from);
        Self::load_from_dirs(&cwd, home.as_deref())
    }

    /// Look for the config file in `start`, up to three of its parents,
    /// then `home`. Falls back to defaults when nothing loads.
    ///
    /// Files that exist but fail to load are skipped and returned, so the
    /// caller can report them once logging is set up.
    pub fn load_from_dirs(start: &Path, home: Option<&Path>) -> (Self, Vec<IgnoredConfig>) {
        let candidates = start
            .ancestors()
            .take(defaults::CONFIG_SEARCH_DEPTH + 1)
            .chain(home)
            .map(|dir| dir.join(defaults::CONFIG_FILE_NAME));

        let mut ignored = Vec::new();
        for path in candidates {
            if !path.is_file() {
                continue;
            }
            match Self::load_from_file(&path) {
                Ok(config) => {
                    log::debug!("Using config file: {}", path.display());
                    return (config, ignored);
                }
                Err(error) => ignored.push(IgnoredConfig { path, error }),
            }
        }

        (Self::default(), ignored)
    }

    /// Merge this config with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli_config: &CliConfig) {
        if let Some(timeout) = cli_config.timeout {
            self.timeout = Some(timeout);
        }
        if let Some(concurrency) = cli_config.concurrency {
            self.concurrency = Some(concurrency);
        }
        if let Some(deadline) = cli_config.deadline {
            self.deadline = Some(deadline);
        }

        if let Some(ref file_types) = cli_config.file_types {
            self.file_types = Some(file_types.clone());
        }
        if let Some(ref exclude_patterns) = cli_config.exclude_patterns {
            self.exclude_patterns = Some(exclude_patterns.clone());
        }

        if let Some(ref user_agent) = cli_config.user_agent {
            self.user_agent = Some(user_agent.clone());
        }
        if let Some(ref api_url) = cli_config.github_api_url {
            self.github_api_url = Some(api_url.clone());
        }

        if let Some(ref output) = cli_config.output {
            self.output = Some(output.clone());
        }
        if cli_config.verbose {
            self.verbose = Some(true);
        }
    }

    /// Compile exclude patterns into regex objects
    pub fn compile_exclude_patterns(&self) -> Result<Vec<Regex>> {
        let mut compiled = Vec::new();
        if let Some(ref patterns) = self.exclude_patterns {
            for pattern in patterns {
                compiled.push(Regex::new(pattern)?);
            }
        }
        Ok(compiled)
    }

    /// Extensions to scan, without leading dots
    pub fn file_types_as_set(&self) -> HashSet<String> {
        match self.file_types {
            Some(ref types) => types
                .iter()
                .map(|t| t.trim().trim_start_matches('.').to_string())
                .collect(),
            None => defaults::FILE_TYPES.iter().map(|t| t.to_string()).collect(),
        }
    }

    pub fn timeout_seconds(&self) -> u64 {
        self.timeout.unwrap_or(timeouts::DEFAULT_TIMEOUT_SECONDS)
    }

    /// Get the per-check timeout as Duration
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds())
    }

    /// Concurrency limit, high enough by default that a documentation page
    /// never queues its checks
    pub fn concurrency_limit(&self) -> usize {
        self.concurrency.unwrap_or(defaults::DEFAULT_CONCURRENCY)
    }

    /// Get the whole-run deadline as Duration, if one is configured
    pub fn deadline_duration(&self) -> Option<Duration> {
        self.deadline.map(Duration::from_secs)
    }

    pub fn github_api_url(&self) -> &str {
        self.github_api_url
            .as_deref()
            .unwrap_or(github::DEFAULT_API_URL)
    }

    pub fn user_agent(&self) -> &str {
        self.user_agent.as_deref().unwrap_or(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
    }

    /// GitHub token from the config file, then `GIT_REPO_TOKEN`, then `GITHUB_TOKEN`
    pub fn resolve_github_token(&self) -> Option<String> {
        self.github_token
            .clone()
            .or_else(|| std::env::var(env::GIT_REPO_TOKEN).ok())
            .or_else(|| std::env::var(env::GITHUB_TOKEN).ok())
            .filter(|token| !token.trim().is_empty())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if let Some(timeout) = self.timeout {
            if timeout < timeouts::MIN_TIMEOUT_SECONDS {
                return Err(LinkCheckError::Config(
                    "Timeout cannot be 0. Expected a positive integer representing seconds."
                        .to_string(),
                ));
            }
            if timeout > timeouts::MAX_TIMEOUT_SECONDS {
                return Err(LinkCheckError::Config(format!(
                    "Timeout of {timeout} seconds is too large. Expected at most {} seconds.",
                    timeouts::MAX_TIMEOUT_SECONDS
                )));
            }
        }

        if let Some(concurrency) = self.concurrency {
            if concurrency == 0 {
                return Err(LinkCheckError::Config(
                    "Concurrency cannot be 0. Expected a positive integer.".to_string(),
                ));
            }
            if concurrency > defaults::MAX_CONCURRENCY {
                return Err(LinkCheckError::Config(format!(
                    "Concurrency of {concurrency} is extremely high. Expected at most {}.",
                    defaults::MAX_CONCURRENCY
                )));
            }
        }

        if self.deadline == Some(0) {
            return Err(LinkCheckError::Config(
                "Deadline cannot be 0. Expected a positive integer representing seconds."
                    .to_string(),
            ));
        }

        if let Some(ref api_url) = self.github_api_url
            && reqwest::Url::parse(api_url).is_err()
        {
            return Err(LinkCheckError::Config(format!(
                "GitHub API URL '{api_url}' is not a valid URL."
            )));
        }

        self.compile_exclude_patterns()?;

        Ok(())
    }
}

/// Configuration options that can come from CLI
#[derive(Debug, Default)]
pub struct CliConfig {
    pub timeout: Option<u64>,                  // --timeout
    pub concurrency: Option<usize>,            // --concurrency
    pub deadline: Option<u64>,                 // --deadline
    pub file_types: Option<Vec<String>>,       // --include
    pub exclude_patterns: Option<Vec<String>>, // --exclude-pattern
    pub user_agent: Option<String>,            // --user-agent
    pub github_api_url: Option<String>,        // --github-api-url
    pub output: Option<String>,                // --out

    pub quiet: bool,       // --quiet
    pub verbose: bool,     // --verbose
    pub no_progress: bool, // --no-progress

    pub config_file: Option<String>, // --config
    pub no_config: bool,             // --no-config
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use serial_test::serial;
    use std::io::Write;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.timeout_seconds(), 5);
        assert_eq!(config.timeout_duration(), Duration::from_secs(5));
        assert_eq!(config.deadline_duration(), None);
        assert_eq!(config.github_api_url(), "https://api.github.com");
        assert_eq!(config.concurrency_limit(), 1000);
    }

    #[test]
    fn test_config_default__file_types_are_rst_and_txt() {
        let set = Config::default().file_types_as_set();
        assert_eq!(set.len(), 2);
        assert!(set.contains("rst"));
        assert!(set.contains("txt"));
    }

    #[test]
    fn test_config_load_from_file() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(
            b"timeout = 10\nconcurrency = 4\nfile_types = [\"md\"]\nuser_agent = \"test-agent\"",
        )?;

        let config = Config::load_from_file(file.path())?;
        assert_eq!(config.timeout, Some(10));
        assert_eq!(config.concurrency_limit(), 4);
        assert_eq!(config.user_agent(), "test-agent");
        assert!(config.file_types_as_set().contains("md"));

        Ok(())
    }

    #[test]
    fn test_config_load_from_file__invalid_toml() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(b"timeout = [")?;

        let result = Config::load_from_file(file.path());
        assert!(matches!(result, Err(LinkCheckError::Config(_))));
        Ok(())
    }

    #[test]
    fn test_config_load_from_file__unknown_key() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(b"threads = 4")?;

        assert!(Config::load_from_file(file.path()).is_err());
        Ok(())
    }

    #[test]
    fn test_config_load_from_dirs__finds_parent_config() -> Result<()> {
        let root = tempfile::tempdir()?;
        let nested = root.path().join("docs/source");
        fs::create_dir_all(&nested)?;
        fs::write(root.path().join(defaults::CONFIG_FILE_NAME), "timeout = 9")?;

        let (config, ignored) = Config::load_from_dirs(&nested, None);
        assert_eq!(config.timeout, Some(9));
        assert!(ignored.is_empty());
        Ok(())
    }

    #[test]
    fn test_config_load_from_dirs__falls_back_to_home() -> Result<()> {
        let workdir = tempfile::tempdir()?;
        let home = tempfile::tempdir()?;
        fs::write(home.path().join(defaults::CONFIG_FILE_NAME), "concurrency = 3")?;

        let (config, _) = Config::load_from_dirs(workdir.path(), Some(home.path()));
        assert_eq!(config.concurrency, Some(3));
        Ok(())
    }

    #[test]
    fn test_config_load_from_dirs__defaults_when_missing() -> Result<()> {
        let workdir = tempfile::tempdir()?;
        let (config, ignored) = Config::load_from_dirs(workdir.path(), None);
        assert_eq!(config, Config::default());
        assert!(ignored.is_empty());
        Ok(())
    }

    #[test]
    fn test_config_load_from_dirs__broken_file_is_returned_and_skipped() -> Result<()> {
        let root = tempfile::tempdir()?;
        let nested = root.path().join("docs");
        fs::create_dir_all(&nested)?;
        let broken = nested.join(defaults::CONFIG_FILE_NAME);
        fs::write(&broken, "timeout = \"soon\"")?;
        fs::write(root.path().join(defaults::CONFIG_FILE_NAME), "timeout = 7")?;

        let (config, ignored) = Config::load_from_dirs(&nested, None);

        assert_eq!(config.timeout, Some(7));
        assert_eq!(ignored.len(), 1);
        assert_eq!(ignored[0].path, broken);
        assert!(ignored[0].error.to_string().contains("Invalid TOML"));
        Ok(())
    }

    #[test]
    fn test_config_merge_with_cli() {
        let mut config = Config {
            timeout: Some(20),
            concurrency: Some(2),
            ..Default::default()
        };
        let cli_config = CliConfig {
            timeout: Some(7),
            deadline: Some(30),
            verbose: true,
            output: Some("out.json".to_string()),
            ..Default::default()
        };

        config.merge_with_cli(&cli_config);

        assert_eq!(config.timeout, Some(7));
        assert_eq!(config.concurrency, Some(2));
        assert_eq!(config.deadline, Some(30));
        assert_eq!(config.verbose, Some(true));
        assert_eq!(config.output.as_deref(), Some("out.json"));
    }

    #[test]
    fn test_compile_exclude_patterns() -> Result<()> {
        let config = Config {
            exclude_patterns: Some(vec![r"^https://localhost".to_string()]),
            ..Default::default()
        };

        let patterns = config.compile_exclude_patterns()?;
        assert_eq!(patterns.len(), 1);
        assert!(patterns[0].is_match("https://localhost:8080/x"));
        assert!(!patterns[0].is_match("https://example.com"));
        Ok(())
    }

    #[test]
    fn test_validate__rejects_out_of_range_values() {
        let zero_timeout = Config {
            timeout: Some(0),
            ..Default::default()
        };
        assert!(zero_timeout.validate().is_err());

        let huge_timeout = Config {
            timeout: Some(timeouts::MAX_TIMEOUT_SECONDS + 1),
            ..Default::default()
        };
        assert!(huge_timeout.validate().is_err());

        let zero_concurrency = Config {
            concurrency: Some(0),
            ..Default::default()
        };
        assert!(zero_concurrency.validate().is_err());

        let zero_deadline = Config {
            deadline: Some(0),
            ..Default::default()
        };
        assert!(zero_deadline.validate().is_err());

        let bad_api = Config {
            github_api_url: Some("not a url".to_string()),
            ..Default::default()
        };
        assert!(bad_api.validate().is_err());

        let bad_pattern = Config {
            exclude_patterns: Some(vec!["[invalid".to_string()]),
            ..Default::default()
        };
        assert!(bad_pattern.validate().is_err());
    }

    #[test]
    fn test_validate__accepts_defaults() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_resolve_github_token__prefers_config_then_env() {
        // SAFETY: serialised with every other test touching these variables
        unsafe {
            std::env::set_var(env::GIT_REPO_TOKEN, "from-env");
            std::env::remove_var(env::GITHUB_TOKEN);
        }

        let from_config = Config {
            github_token: Some("from-config".to_string()),
            ..Default::default()
        };
        assert_eq!(
            from_config.resolve_github_token().as_deref(),
            Some("from-config")
        );
        assert_eq!(
            Config::default().resolve_github_token().as_deref(),
            Some("from-env")
        );

        unsafe {
            std::env::remove_var(env::GIT_REPO_TOKEN);
            std::env::set_var(env::GITHUB_TOKEN, "fallback");
        }
        assert_eq!(
            Config::default().resolve_github_token().as_deref(),
            Some("fallback")
        );

        unsafe {
            std::env::remove_var(env::GITHUB_TOKEN);
        }
        assert_eq!(Config::default().resolve_github_token(), None);
    }
}

/// Application-wide constants to avoid magic values throughout the codebase.
///
/// Every literal that shows up in a check message, a default, or a URL
/// prefix lives here.
/// GitHub URL prefixes routed to the repository validator
pub mod github {
    /// TLS prefix of a repository URL
    pub const HTTPS_PREFIX: &str = "https://github.com/";
    /// Plain-text prefix of a repository URL
    pub const HTTP_PREFIX: &str = "http://github.com/";
    /// Both prefixes, checked in this order
    pub const PREFIXES: [&str; 2] = [HTTPS_PREFIX, HTTP_PREFIX];
    /// Default REST API root
    pub const DEFAULT_API_URL: &str = "https://api.github.com";
    /// Accept header recommended by the REST API
    pub const ACCEPT: &str = "application/vnd.github+json";
    /// Months without a push before a repository counts as stale
    pub const STALE_AFTER_MONTHS: u32 = 12;
}

/// HTTP status code constants
pub mod http_status {
    /// HTTP 200 OK - the only status that counts as a passing check
    pub const OK: u16 = 200;
    /// HTTP 301 Moved Permanently - permanent redirect
    pub const MOVED_PERMANENTLY: u16 = 301;
    /// HTTP 404 Not Found - resource not found
    pub const NOT_FOUND: u16 = 404;
    /// HTTP 500 Internal Server Error - server error
    pub const INTERNAL_SERVER_ERROR: u16 = 500;
}

/// Timeout and duration constants
pub mod timeouts {
    /// Per-check deadline in seconds
    pub const DEFAULT_TIMEOUT_SECONDS: u64 = 5;
    /// Maximum per-check deadline in seconds (1 hour)
    pub const MAX_TIMEOUT_SECONDS: u64 = 3600;
    /// Minimum per-check deadline in seconds
    pub const MIN_TIMEOUT_SECONDS: u64 = 1;
}

/// Default configuration values
pub mod defaults {
    /// File extensions scanned by the `dir` command
    pub const FILE_TYPES: [&str; 2] = ["rst", "txt"];
    /// File identifier used for text passed on the command line or stdin
    pub const STDIN_FILE: &str = "stdin";
    /// Name of the configuration file looked up on disk
    pub const CONFIG_FILE_NAME: &str = ".docs-link-checker.toml";
    /// Parent directories searched for a configuration file
    pub const CONFIG_SEARCH_DEPTH: usize = 3;
    /// Checks in flight when no concurrency is configured
    pub const DEFAULT_CONCURRENCY: usize = 1000;
    /// Upper bound for the concurrency setting
    pub const MAX_CONCURRENCY: usize = 1000;
}

/// Environment variables read for credentials
pub mod env {
    /// Checked first
    pub const GIT_REPO_TOKEN: &str = "GIT_REPO_TOKEN";
    /// Conventional fallback
    pub const GITHUB_TOKEN: &str = "GITHUB_TOKEN";
}

/// Check message constants
pub mod messages {
    pub const UNRESOLVED: &str = "unable to resolve";
    pub const STALE: &str = "stale (last commit more than a year ago)";
    pub const CANCELLED: &str = "cancelled (run deadline exceeded)";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_github_prefixes() {
        assert_eq!(github::PREFIXES.len(), 2);
        assert!(github::PREFIXES.iter().all(|p| p.ends_with("github.com/")));
    }

    #[test]
    fn test_timeout_constants() {
        assert_eq!(timeouts::DEFAULT_TIMEOUT_SECONDS, 5);
        assert!(timeouts::MIN_TIMEOUT_SECONDS <= timeouts::DEFAULT_TIMEOUT_SECONDS);
        assert!(timeouts::DEFAULT_TIMEOUT_SECONDS <= timeouts::MAX_TIMEOUT_SECONDS);
    }

    #[test]
    fn test_message_constants() {
        assert_eq!(messages::UNRESOLVED, "unable to resolve");
        assert_eq!(messages::STALE, "stale (last commit more than a year ago)");
    }
}

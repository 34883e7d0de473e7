use std::fmt;

use crate::core::constants::messages;
use crate::core::types::CheckKind;

/// Error types for operations that can abort a command
#[derive(Debug)]
pub enum LinkCheckError {
    /// IO error (file operations, etc.)
    Io(std::io::Error),

    /// Configuration error
    Config(String),

    /// HTTP client construction error
    Http(reqwest::Error),

    /// Path expansion error
    PathExpansion(String),

    /// Regex compilation error
    Regex(regex::Error),

    /// TOML parsing error
    TomlParsing(toml::de::Error),

    /// Report serialization error
    Serialization(serde_json::Error),

    /// File not found error
    FileNotFound(String),

    /// Invalid argument error
    InvalidArgument(String),

    /// File walking/ignore error
    FileWalking(ignore::Error),
}

impl fmt::Display for LinkCheckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkCheckError::Io(err) => write!(f, "IO error: {err}"),
            LinkCheckError::Config(msg) => write!(f, "Configuration error: {msg}"),
            LinkCheckError::Http(err) => write!(f, "HTTP error: {err}"),
            LinkCheckError::PathExpansion(msg) => write!(f, "Path expansion error: {msg}"),
            LinkCheckError::Regex(err) => write!(f, "Regex error: {err}"),
            LinkCheckError::TomlParsing(err) => write!(f, "TOML parsing error: {err}"),
            LinkCheckError::Serialization(err) => write!(f, "Serialization error: {err}"),
            LinkCheckError::FileNotFound(path) => write!(f, "File not found: {path}"),
            LinkCheckError::InvalidArgument(msg) => write!(f, "Invalid argument: {msg}"),
            LinkCheckError::FileWalking(err) => write!(f, "File walking error: {err}"),
        }
    }
}

impl std::error::Error for LinkCheckError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LinkCheckError::Io(err) => Some(err),
            LinkCheckError::Http(err) => Some(err),
            LinkCheckError::Regex(err) => Some(err),
            LinkCheckError::TomlParsing(err) => Some(err),
            LinkCheckError::Serialization(err) => Some(err),
            LinkCheckError::FileWalking(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for LinkCheckError {
    fn from(err: std::io::Error) -> Self {
        LinkCheckError::Io(err)
    }
}

impl From<reqwest::Error> for LinkCheckError {
    fn from(err: reqwest::Error) -> Self {
        LinkCheckError::Http(err)
    }
}

impl From<regex::Error> for LinkCheckError {
    fn from(err: regex::Error) -> Self {
        LinkCheckError::Regex(err)
    }
}

impl From<toml::de::Error> for LinkCheckError {
    fn from(err: toml::de::Error) -> Self {
        LinkCheckError::TomlParsing(err)
    }
}

impl From<serde_json::Error> for LinkCheckError {
    fn from(err: serde_json::Error) -> Self {
        LinkCheckError::Serialization(err)
    }
}

impl From<ignore::Error> for LinkCheckError {
    fn from(err: ignore::Error) -> Self {
        LinkCheckError::FileWalking(err)
    }
}

/// Type alias for Results using LinkCheckError
pub type Result<T> = std::result::Result<T, LinkCheckError>;

/// Why a single reference failed its check.
///
/// None of these abort anything: each one ends up as the `message` of one
/// failing [`Check`](crate::core::types::Check).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckFailure {
    /// Request could not be built or the transport failed
    Unresolved,
    /// The repository metadata call failed (network, auth, bad payload)
    Api(String),
    /// Any response status other than 200
    Status(u16),
    /// Repository reachable but not pushed to within a year
    Stale,
    /// The check lost its race against the per-check deadline
    Timeout { kind: CheckKind, seconds: u64 },
    /// A GitHub URL that does not name exactly `<org>/<repo>`
    MalformedReference(String),
    /// The run-wide deadline fired before the check finished
    Cancelled,
}

impl fmt::Display for CheckFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckFailure::Unresolved => f.write_str(messages::UNRESOLVED),
            CheckFailure::Api(details) => write!(f, "err: {details:?}"),
            CheckFailure::Status(code) => write!(f, "got status code {code}"),
            CheckFailure::Stale => f.write_str(messages::STALE),
            CheckFailure::Timeout {
                kind: CheckKind::Link,
                seconds,
            } => write!(f, "timeout after {seconds} seconds"),
            CheckFailure::Timeout {
                kind: CheckKind::Repository,
                seconds,
            } => write!(f, "timeout ({seconds} seconds)"),
            CheckFailure::MalformedReference(url) => write!(
                f,
                "malformed GitHub reference {url:?} (expected https://github.com/<org>/<repo>)"
            ),
            CheckFailure::Cancelled => f.write_str(messages::CANCELLED),
        }
    }
}

impl std::error::Error for CheckFailure {}

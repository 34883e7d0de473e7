use serde::Serialize;
use std::fmt;

use crate::core::error::CheckFailure;

/// A URL found in a document, with the file and line it came from.
///
/// References are immutable once built; the classifier and validators
/// only ever read them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Reference {
    file: String,
    line: u64,
    url: String,
}

/// Errors that can occur when building a `Reference`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceError {
    /// URL is missing or empty
    MissingUrl,
    /// File identifier is missing or empty
    MissingFile,
    /// Line number is invalid (zero)
    InvalidLineNumber,
}

impl fmt::Display for ReferenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingUrl => write!(f, "URL is required and cannot be empty"),
            Self::MissingFile => write!(f, "File identifier is required and cannot be empty"),
            Self::InvalidLineNumber => write!(f, "Line number must be greater than 0"),
        }
    }
}

impl std::error::Error for ReferenceError {}

impl Reference {
    /// Create a new Reference with validation.
    ///
    /// # Examples
    /// ```
    /// use docs_link_checker::Reference;
    ///
    /// let reference = Reference::new("drivers.txt", 3, "https://example.com/page").unwrap();
    /// assert_eq!(reference.line(), 3);
    /// assert_eq!(reference.url(), "https://example.com/page");
    /// ```
    pub fn new(
        file: impl Into<String>,
        line: u64,
        url: impl Into<String>,
    ) -> Result<Self, ReferenceError> {
        let file = file.into();
        let url = url.into();

        if url.trim().is_empty() {
            return Err(ReferenceError::MissingUrl);
        }
        if line == 0 {
            return Err(ReferenceError::InvalidLineNumber);
        }
        if file.trim().is_empty() {
            return Err(ReferenceError::MissingFile);
        }

        Ok(Self {
            file: file.trim().to_string(),
            line,
            url: url.trim().to_string(),
        })
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    /// 1-based line number.
    pub fn line(&self) -> u64 {
        self.line
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} - L{}", self.url, self.file, self.line)
    }
}

/// Which validator a reference is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckKind {
    /// `https://github.com/<org>/<repo>` checked through the repository API
    Repository,
    /// Any other URL, checked with a plain GET
    Link,
}

/// Outcome of checking one reference.
///
/// `ok` is true exactly when `message` is empty; the only way to build a
/// `Check` is from a final outcome, so the pair never disagrees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Check {
    file: String,
    line: u64,
    url: String,
    message: String,
    ok: bool,
}

impl Check {
    /// Settle the outcome for `reference`.
    pub fn new(reference: Reference, outcome: Result<(), CheckFailure>) -> Self {
        let Reference { file, line, url } = reference;
        match outcome {
            Ok(()) => Self {
                file,
                line,
                url,
                message: String::new(),
                ok: true,
            },
            Err(failure) => Self {
                file,
                line,
                url,
                message: failure.to_string(),
                ok: false,
            },
        }
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn line(&self) -> u64 {
        self.line
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_ok(&self) -> bool {
        self.ok
    }

    pub fn is_not_ok(&self) -> bool {
        !self.ok
    }
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ok {
            write!(f, "ok - {} - {} - L{}", self.url, self.file, self.line)
        } else {
            write!(
                f,
                "{} - {} - {} - L{}",
                self.url, self.message, self.file, self.line
            )
        }
    }
}

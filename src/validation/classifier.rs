use crate::core::constants::github;
use crate::core::error::CheckFailure;
use crate::core::types::CheckKind;

/// Where a reference gets checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target<'a> {
    /// A GitHub repository, checked through repository metadata
    Repository { org: &'a str, repo: &'a str },
    /// Anything else, checked with a plain GET
    Link(&'a str),
}

impl Target<'_> {
    pub fn kind(&self) -> CheckKind {
        match self {
            Target::Repository { .. } => CheckKind::Repository,
            Target::Link(_) => CheckKind::Link,
        }
    }
}

/// Route `url` to a validator.
///
/// URLs under `https://github.com/` or `http://github.com/` must name
/// exactly `<org>/<repo>`; anything else under those prefixes is a
/// [`CheckFailure::MalformedReference`]. Every other URL is a plain link.
pub fn classify(url: &str) -> Result<Target<'_>, CheckFailure> {
    let Some(rest) = github::PREFIXES
        .iter()
        .find_map(|prefix| url.strip_prefix(prefix))
    else {
        return Ok(Target::Link(url));
    };

    let mut segments = rest.split('/');
    match (segments.next(), segments.next(), segments.next()) {
        (Some(org), Some(repo), None) if !org.is_empty() && !repo.is_empty() => {
            Ok(Target::Repository { org, repo })
        }
        _ => Err(CheckFailure::MalformedReference(url.to_string())),
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;

    #[test]
    fn test_classify__https_repository() {
        assert_eq!(
            classify("https://github.com/foo/bar"),
            Ok(Target::Repository {
                org: "foo",
                repo: "bar"
            })
        );
    }

    #[test]
    fn test_classify__http_repository() {
        assert_eq!(
            classify("http://github.com/rust-lang/rust"),
            Ok(Target::Repository {
                org: "rust-lang",
                repo: "rust"
            })
        );
    }

    #[test]
    fn test_classify__one_segment_is_malformed() {
        assert_eq!(
            classify("https://github.com/just-an-org"),
            Err(CheckFailure::MalformedReference(
                "https://github.com/just-an-org".to_string()
            ))
        );
    }

    #[test]
    fn test_classify__deep_paths_are_malformed() {
        for url in [
            "https://github.com/foo/bar/",
            "https://github.com/foo/bar/issues/1",
            "http://github.com/foo/bar/blob/main/README.md",
        ] {
            assert!(
                matches!(classify(url), Err(CheckFailure::MalformedReference(_))),
                "{url} should be malformed"
            );
        }
    }

    #[test]
    fn test_classify__empty_segments_are_malformed() {
        for url in [
            "https://github.com/",
            "https://github.com/foo/",
            "https://github.com//bar",
        ] {
            assert!(
                matches!(classify(url), Err(CheckFailure::MalformedReference(_))),
                "{url} should be malformed"
            );
        }
    }

    #[test]
    fn test_classify__other_urls_are_links() {
        for url in [
            "https://example.com/page",
            "https://docs.github.com/en/rest",
            "https://gist.github.com/foo/bar",
            "https://github.community/t/1",
            "ftp://github.com/foo/bar",
        ] {
            assert_eq!(classify(url), Ok(Target::Link(url)));
        }
    }

    #[test]
    fn test_target_kind() {
        assert_eq!(Target::Link("x").kind(), CheckKind::Link);
        assert_eq!(
            Target::Repository {
                org: "a",
                repo: "b"
            }
            .kind(),
            CheckKind::Repository
        );
    }
}

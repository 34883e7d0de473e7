use grep::regex::RegexMatcher;
use grep::searcher::Searcher;
use grep::searcher::sinks::Lossy;
use linkify::{LinkFinder, LinkKind};
use once_cell::sync::Lazy;

use crate::core::types::Reference;

use std::{io, path::Path};

/// Cheap line prefilter: anything that looks like `scheme://`.
const SCHEME_PATTERN: &str = r"(?i)[a-z][a-z0-9+.\-]*://";

static SCHEME_MATCHER: Lazy<RegexMatcher> = Lazy::new(|| {
    RegexMatcher::new(SCHEME_PATTERN).expect("Failed to compile URL scheme pattern")
});

// Scheme-less hosts like www.example.com are never links
static LINK_FINDER: Lazy<LinkFinder> = Lazy::new(|| {
    let mut finder = LinkFinder::new();
    finder.kinds(&[LinkKind::Url]);
    finder.url_must_have_scheme(true);
    finder
});

/// Extract the references on one line, left to right.
///
/// The iterator is lazy; nothing is allocated until it is consumed.
pub fn extract_line<'a>(
    file: &'a str,
    line: u64,
    text: &'a str,
) -> impl Iterator<Item = Reference> + 'a {
    LINK_FINDER
        .links(text)
        .map(|link| link.as_str())
        .filter(|candidate| is_strict_url(candidate))
        .filter_map(move |url| Reference::new(file, line, url).ok())
}

/// Extract every reference in `text`, numbering lines from 1.
pub fn extract_text(file: &str, text: &str) -> Vec<Reference> {
    text.lines()
        .zip(1u64..)
        .flat_map(|(content, line)| extract_line(file, line, content))
        .collect()
}

/// Extract every reference in the file at `path`.
///
/// Lines are prefiltered with a regex search so only lines carrying a
/// `scheme://` are handed to the link finder. Invalid UTF-8 is replaced
/// rather than rejected.
pub fn extract_file(path: &Path) -> io::Result<Vec<Reference>> {
    let file_name = path.display().to_string();
    let mut references = Vec::new();

    Searcher::new().search_path(
        &*SCHEME_MATCHER,
        path,
        Lossy(|line_number, line| {
            references.extend(extract_line(&file_name, line_number, line));
            Ok(true)
        }),
    )?;

    Ok(references)
}

/// Strict URL grammar: explicit scheme, `://`, and a non-empty host.
pub fn is_strict_url(candidate: &str) -> bool {
    let Some((scheme, _)) = candidate.split_once("://") else {
        return false;
    };
    let mut chars = scheme.chars();
    let scheme_ok = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    if !scheme_ok {
        return false;
    }

    reqwest::Url::parse(candidate)
        .ok()
        .and_then(|url| url.host_str().map(|host| !host.is_empty()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use std::io::Write;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    fn urls(references: &[Reference]) -> Vec<&str> {
        references.iter().map(|r| r.url()).collect()
    }

    #[test]
    fn test_extract_line__two_urls_in_order() {
        let line = "See https://github.com/foo/bar and https://example.com/page";
        let references: Vec<_> = extract_line("drivers.txt", 3, line).collect();

        assert_eq!(
            urls(&references),
            vec!["https://github.com/foo/bar", "https://example.com/page"]
        );
        assert!(references.iter().all(|r| r.line() == 3));
        assert!(references.iter().all(|r| r.file() == "drivers.txt"));
    }

    #[test]
    fn test_extract_line__markdown_and_rst_links() {
        let line = "[docs](http://foo.bar) and `rst <https://foo2.bar/x>`_";
        let references: Vec<_> = extract_line("index.rst", 1, line).collect();

        assert_eq!(urls(&references), vec!["http://foo.bar", "https://foo2.bar/x"]);
    }

    #[test]
    fn test_extract_line__ignores_scheme_less_hosts() {
        let line = "visit www.example.com or example.com/page";
        assert_eq!(extract_line("a.txt", 1, line).count(), 0);
    }

    #[test]
    fn test_extract_line__other_schemes() {
        let line = "mirror at ftp://ftp.example.org/pub/file.tar.gz";
        let references: Vec<_> = extract_line("a.txt", 1, line).collect();

        assert_eq!(urls(&references), vec!["ftp://ftp.example.org/pub/file.tar.gz"]);
    }

    #[test]
    fn test_extract_line__no_urls() {
        assert_eq!(extract_line("a.txt", 1, "just some prose").count(), 0);
        assert_eq!(extract_line("a.txt", 1, "").count(), 0);
    }

    #[test]
    fn test_extract_text__numbers_lines_from_one() {
        let text = "first line\nhttps://one.example.com\n\nhttps://two.example.com x https://three.example.com";
        let references = extract_text("stdin", text);

        let lines: Vec<u64> = references.iter().map(|r| r.line()).collect();
        assert_eq!(lines, vec![2, 4, 4]);
    }

    #[test]
    fn test_is_strict_url() {
        assert!(is_strict_url("https://example.com"));
        assert!(is_strict_url("http://localhost:8080/path?q=1"));
        assert!(is_strict_url("ftp://example.org/x"));
        assert!(!is_strict_url("www.example.com"));
        assert!(!is_strict_url("example.com/page"));
        assert!(!is_strict_url("://example.com"));
        assert!(!is_strict_url("1http://example.com"));
        assert!(!is_strict_url("mailto:someone@example.com"));
    }

    #[test]
    fn test_extract_file() -> TestResult {
        let mut file = tempfile::NamedTempFile::new()?;
        let file_name = file.path().display().to_string();
        file.write_all(
            "Title\n\
             =====\n\
             See https://github.com/foo/bar and https://example.com/page\n\
             no links here\n\
             `link <http://specific-link.four>`_"
                .as_bytes(),
        )?;

        let references = extract_file(file.path())?;

        assert_eq!(references.len(), 3);
        assert_eq!(references[0].line(), 3);
        assert_eq!(references[1].line(), 3);
        assert_eq!(references[2].line(), 5);
        assert_eq!(references[2].url(), "http://specific-link.four");
        assert!(references.iter().all(|r| r.file() == file_name));
        Ok(())
    }

    #[test]
    fn test_extract_file__empty_file() -> TestResult {
        let file = tempfile::NamedTempFile::new()?;
        assert!(extract_file(file.path())?.is_empty());
        Ok(())
    }

    #[test]
    fn test_extract_file__when_non_existing_file() {
        assert!(extract_file(Path::new("non_existing_file.txt")).is_err());
    }
}

//! Property-based tests for docs-link-checker using proptest
//!
//! These tests generate random inputs for the reference extractor and the
//! check classifier, the two pure stages in front of the network.

use docs_link_checker::CheckKind;
use docs_link_checker::discovery::extract_text;
use docs_link_checker::validation::{Target, classify};
use proptest::prelude::*;

/// Generate URLs the extractor must find
fn url_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        // Domains
        prop::collection::vec("[a-z]{3,10}", 1..4)
            .prop_map(|parts| format!("https://{}.com", parts.join("."))),
        // Ports
        (r"[a-z]{3,8}", 1024..65535u16)
            .prop_map(|(domain, port)| format!("http://{domain}.org:{port}")),
        // Paths
        (r"[a-z]{3,8}", prop::collection::vec(r"[a-z0-9]{1,8}", 1..5)).prop_map(
            |(domain, path_parts)| format!("https://{domain}.net/{}", path_parts.join("/"))
        ),
        // Other schemes
        r"[a-z]{3,8}".prop_map(|domain| format!("ftp://{domain}.com/file")),
    ]
}

/// Filler text that never contains a URL
fn filler_strategy() -> impl Strategy<Value = String> {
    r"[a-zA-Z ,]{0,20}"
}

fn github_segment() -> impl Strategy<Value = String> {
    r"[A-Za-z0-9][A-Za-z0-9_.\-]{0,20}"
}

proptest! {
    #[test]
    fn extract_finds_every_url_on_its_line(
        lines in prop::collection::vec(
            prop::collection::vec(url_strategy(), 0..4),
            1..8,
        ),
        filler in filler_strategy(),
    ) {
        let text = lines
            .iter()
            .map(|urls| {
                let mut line = filler.clone();
                for url in urls {
                    line.push(' ');
                    line.push_str(url);
                    line.push(' ');
                }
                line
            })
            .collect::<Vec<_>>()
            .join("\n");

        let references = extract_text("doc.rst", &text);

        let expected: Vec<(u64, &str)> = lines
            .iter()
            .zip(1u64..)
            .flat_map(|(urls, line)| urls.iter().map(move |url| (line, url.as_str())))
            .collect();
        let actual: Vec<(u64, &str)> = references
            .iter()
            .map(|reference| (reference.line(), reference.url()))
            .collect();

        prop_assert_eq!(actual, expected);
        prop_assert!(references.iter().all(|r| r.file() == "doc.rst"));
    }

    #[test]
    fn extract_ignores_scheme_less_hosts(domain in r"[a-z]{3,10}", filler in filler_strategy()) {
        let text = format!("{filler} www.{domain}.com {domain}.org/path {filler}");
        prop_assert!(extract_text("doc.rst", &text).is_empty());
    }

    #[test]
    fn classify_never_panics(input in r"\PC{0,80}") {
        let _ = classify(&input);
    }

    #[test]
    fn classify_routes_two_segment_github_urls_to_repository(
        scheme in prop_oneof![Just("https"), Just("http")],
        org in github_segment(),
        repo in github_segment(),
    ) {
        let url = format!("{scheme}://github.com/{org}/{repo}");
        let target = classify(&url);

        prop_assert!(target.is_ok());
        let target = target.unwrap();
        prop_assert_eq!(target.kind(), CheckKind::Repository);
        prop_assert_eq!(target, Target::Repository { org: &org, repo: &repo });
    }

    #[test]
    fn classify_rejects_github_urls_without_exactly_two_segments(
        segments in prop::collection::vec(github_segment(), 0..6)
            .prop_filter("two segments is a repository", |s| s.len() != 2),
    ) {
        let url = format!("https://github.com/{}", segments.join("/"));
        prop_assert!(classify(&url).is_err());
    }

    #[test]
    fn classify_routes_everything_else_to_link(url in url_strategy()) {
        let target = classify(&url);
        prop_assert!(matches!(target, Ok(Target::Link(u)) if u == url));
    }
}

//! Manifest-link validation
//!
//! A candidate harvested by the extractor is only usable when it is an
//! absolute URL, actually references an `.m3u8` playlist, carries no
//! template-interpolation garbage, and has a sane length.

use url::Url;

/// Maximum accepted link length. Tokenized CDN URLs are long but never
/// this long; anything beyond it is a scan artifact.
const MAX_LINK_LEN: usize = 500;

/// Decide whether a candidate string is a usable manifest URL
///
/// All of the following must hold:
/// - parses as an absolute URL with a non-empty host;
/// - contains `.m3u8` (case-insensitive);
/// - contains neither `undefined` nor `null` — source pages built from
///   broken JS templates interpolate those literally into URLs;
/// - at most 500 characters long.
///
/// Pure and total: any parse failure is simply `false`.
pub fn is_valid_manifest_link(candidate: &str) -> bool {
    if candidate.len() > MAX_LINK_LEN {
        return false;
    }
    if !candidate.to_lowercase().contains(".m3u8") {
        return false;
    }
    if candidate.contains("undefined") || candidate.contains("null") {
        return false;
    }
    match Url::parse(candidate) {
        Ok(url) => url.has_host(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_accepts_plain_manifest_url() {
        assert!(is_valid_manifest_link("https://cdn.example.com/video/master.m3u8"));
    }

    #[test]
    fn test_accepts_query_and_uppercase_extension() {
        assert!(is_valid_manifest_link("https://cdn.example.com/v/INDEX.M3U8?token=abc"));
    }

    #[test]
    fn test_rejects_missing_extension() {
        assert!(!is_valid_manifest_link("https://cdn.example.com/video/master.mpd"));
    }

    #[test]
    fn test_rejects_relative_url() {
        assert!(!is_valid_manifest_link("/video/master.m3u8"));
    }

    #[test]
    fn test_rejects_unparseable() {
        assert!(!is_valid_manifest_link("ht tp://bad url.m3u8"));
    }

    #[test]
    fn test_rejects_interpolation_artifacts() {
        assert!(!is_valid_manifest_link("https://x.com/a.m3u8?x=undefined"));
        assert!(!is_valid_manifest_link("https://x.com/null/a.m3u8"));
    }

    #[test]
    fn test_rejects_overlong_url() {
        let url = format!("https://x.com/{}.m3u8", "a".repeat(500));
        assert!(!is_valid_manifest_link(&url));
    }

    #[test]
    fn test_accepts_url_at_length_limit() {
        // 500 characters exactly is still valid
        let padding = 500 - "https://x.com/.m3u8".len();
        let url = format!("https://x.com/{}.m3u8", "a".repeat(padding));
        assert_eq!(url.len(), 500);
        assert!(is_valid_manifest_link(&url));
    }

    proptest! {
        #[test]
        fn prop_never_accepts_without_m3u8(s in "[a-zA-Z0-9:/._-]{0,200}") {
            prop_assume!(!s.to_lowercase().contains(".m3u8"));
            prop_assert!(!is_valid_manifest_link(&s));
        }

        #[test]
        fn prop_total_on_arbitrary_input(s in ".*") {
            // Must never panic, whatever the input
            let _ = is_valid_manifest_link(&s);
        }

        #[test]
        fn prop_never_accepts_overlong(s in "[a-z]{501,600}") {
            let url = format!("https://x.com/{}.m3u8", s);
            prop_assert!(!is_valid_manifest_link(&url));
        }
    }
}

//! Candidate manifest-link discovery
//!
//! Sites embed `.m3u8` manifest URLs inconsistently: a lazy network
//! request fired by the player, an inline player config, a `src`
//! attribute, or a server-rendered JSON blob. No single scan is
//! sufficient, so the extractor runs every scan the available signals
//! allow and unions the results. Deduplication and the downstream
//! validator clean up the false positives this redundancy produces.

use regex::Regex;
use scraper::{Html, Selector};
use url::Url;

use crate::types::PageSignals;

/// Deduplicated, insertion-ordered candidate collection
///
/// Keyed by exact string equality: syntactically distinct URLs for the
/// same resource stay distinct on purpose (tokenized CDN URLs differ
/// only in their query strings).
#[derive(Debug, Default)]
struct CandidateSet {
    seen: std::collections::HashSet<String>,
    ordered: Vec<String>,
}

impl CandidateSet {
    fn insert(&mut self, candidate: String) {
        if self.seen.insert(candidate.clone()) {
            self.ordered.push(candidate);
        }
    }

    fn into_vec(self) -> Vec<String> {
        self.ordered
    }
}

/// Run all applicable scans over the captured page signals
///
/// Returns the deduplicated candidate list in discovery order. The
/// candidates are raw — callers filter them through
/// [`is_valid_manifest_link`](crate::validate::is_valid_manifest_link).
pub fn extract(signals: &PageSignals) -> Vec<String> {
    let mut candidates = CandidateSet::default();

    scan_observed_requests(&signals.observed_requests, &mut candidates);
    scan_dom_values(&signals.dom_sources, &signals.base_url, &mut candidates);

    if let Some(html) = &signals.html {
        scan_markup_attributes(html, &signals.base_url, &mut candidates);
        scan_inline_scripts(html, &mut candidates);
        scan_full_markup(html, &mut candidates);
        scan_quoted_json(html, &mut candidates);
    }

    candidates.into_vec()
}

// ---------------------------------------------------------------------------
// Scan 1 — network observation
// ---------------------------------------------------------------------------

/// Keep observed request URLs that look like terminal manifests
///
/// A page load produces plenty of `.m3u8` traffic that is not the
/// manifest itself (fragment-level playlists, key requests). Only URLs
/// whose last path segment starts with `master` or `index` and ends in
/// `.m3u8` survive this scan.
fn scan_observed_requests(requests: &[String], out: &mut CandidateSet) {
    for url in requests {
        if url.to_lowercase().contains(".m3u8") && is_terminal_manifest(url) {
            out.insert(url.clone());
        }
    }
}

/// Test the last path segment against the terminal-manifest shape
fn is_terminal_manifest(url: &str) -> bool {
    // Query string and fragment are not part of the segment
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let Some(segment) = path.rsplit('/').next() else {
        return false;
    };
    let Ok(re) = Regex::new(r"(?i)^(master|index).*\.m3u8$") else {
        return false;
    };
    re.is_match(segment)
}

// ---------------------------------------------------------------------------
// Scan 2 — DOM attributes (live values and markup)
// ---------------------------------------------------------------------------

/// Keep pre-collected live-DOM attribute values referencing a manifest
fn scan_dom_values(values: &[String], base: &Url, out: &mut CandidateSet) {
    for value in values {
        if value.to_lowercase().contains(".m3u8")
            && let Some(resolved) = resolve_against(base, value)
        {
            out.insert(resolved);
        }
    }
}

/// Scan `video`/`source` element attributes in the markup
fn scan_markup_attributes(html: &str, base: &Url, out: &mut CandidateSet) {
    let document = Html::parse_document(html);

    for (selector, attr) in [
        ("video[src]", "src"),
        ("source[src]", "src"),
        ("source[data-src]", "data-src"),
    ] {
        let Ok(sel) = Selector::parse(selector) else {
            continue;
        };
        for element in document.select(&sel) {
            if let Some(value) = element.value().attr(attr)
                && value.to_lowercase().contains(".m3u8")
                && let Some(resolved) = resolve_against(base, value)
            {
                out.insert(resolved);
            }
        }
    }
}

/// Resolve a possibly-relative attribute value against the page base
///
/// Resolution failures drop the value silently — a broken relative link
/// is excluded from the candidate set, not an error.
fn resolve_against(base: &Url, value: &str) -> Option<String> {
    match Url::parse(value) {
        Ok(absolute) => Some(absolute.to_string()),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            base.join(value).ok().map(|u| u.to_string())
        }
        Err(_) => None,
    }
}

// ---------------------------------------------------------------------------
// Scans 3–5 — text scans over the markup
// ---------------------------------------------------------------------------

/// Regex-extract manifest URLs from inline `<script>` bodies
fn scan_inline_scripts(html: &str, out: &mut CandidateSet) {
    let document = Html::parse_document(html);
    let Ok(sel) = Selector::parse("script") else {
        return;
    };
    let Ok(re) = Regex::new(r#"https?://[^\s"']+\.m3u8[^\s"']*"#) else {
        return;
    };

    for element in document.select(&sel) {
        let body: String = element.text().collect();
        for m in re.find_iter(&body) {
            out.insert(m.as_str().to_string());
        }
    }
}

/// Catch-all regex pass over the entire markup
///
/// Same pattern as the script scan with `<>` also excluded, so links
/// embedded in plain markup do not swallow neighboring tags.
fn scan_full_markup(html: &str, out: &mut CandidateSet) {
    let Ok(re) = Regex::new(r#"https?://[^\s"'<>]+\.m3u8[^\s"'<>]*"#) else {
        return;
    };
    for m in re.find_iter(html) {
        out.insert(m.as_str().to_string());
    }
}

/// Extract quoted `"...m3u8..."` substrings from JSON-ish page text
///
/// Server-rendered player configs carry JSON-escaped URLs (`\/`), which
/// the plain regex scans cannot match. Escapes are stripped before the
/// absolute-URL check.
fn scan_quoted_json(html: &str, out: &mut CandidateSet) {
    let Ok(re) = Regex::new(r#""([^"]*m3u8[^"]*)""#) else {
        return;
    };
    for caps in re.captures_iter(html) {
        let cleaned = caps[1]
            .replace("\\/", "/")
            .replace("\\\"", "")
            .trim_matches('"')
            .to_string();
        if Url::parse(&cleaned).map(|u| u.has_host()).unwrap_or(false) {
            out.insert(cleaned);
        }
    }
}

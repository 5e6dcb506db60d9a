//
//  optimizely-client
//  api/common/meta.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Response-Header Metadata for Optimizely API Responses
//!
//! Every Optimizely response carries rate-limit counters and, for list
//! endpoints, RFC5988 `link` pagination relations. This module turns those
//! raw headers into the structured [`ResponseMeta`] record attached to each
//! response envelope.
//!
//! # Headers Consumed
//!
//! | Header | Field |
//! |--------|-------|
//! | `x-ratelimit-limit` | `rate_limit` |
//! | `x-ratelimit-remaining` | `rate_limit_remaining` |
//! | `x-ratelimit-reset` | `rate_limit_reset` |
//! | `link` | `prev_page` / `next_page` / `last_page` |
//!
//! The `link` header is scanned for `<URL>; rel=REL` entries by repeated
//! matching rather than comma-splitting, since a URL can itself contain
//! commas. For each entry the `page` query parameter is pulled out of the
//! URL; entries with an unrecognized `rel` or no `page` parameter contribute
//! nothing.
//!
//! # Example
//!
//! ```rust
//! use optimizely_client::api::common::parse_response_headers;
//! use reqwest::header::HeaderMap;
//!
//! let mut headers = HeaderMap::new();
//! headers.insert("x-ratelimit-remaining", "42".parse().unwrap());
//! headers.insert(
//!     "link",
//!     "<https://api.optimizely.com/v2/projects?page=2>; rel=next"
//!         .parse()
//!         .unwrap(),
//! );
//!
//! let meta = parse_response_headers(&headers);
//! assert_eq!(meta.rate_limit_remaining.as_deref(), Some("42"));
//! assert_eq!(meta.next_page.as_deref(), Some("2"));
//! assert!(meta.prev_page.is_none());
//! ```
//!
//! # Notes
//!
//! - Parsing never fails; malformed or missing headers leave the
//!   corresponding field `None`.
//! - Rate-limit values are passed through as strings, exactly as received.

use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::header::HeaderMap;

static LINK_ENTRY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<([^>]+)>;\s*rel="?([A-Za-z]+)"?"#).unwrap());

static PAGE_PARAM_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[?&]page=(\d+)").unwrap());

/// Structured metadata extracted from one response's headers.
///
/// Each field is present only when the corresponding header existed on the
/// response; absent headers stay `None` rather than defaulting to zero.
///
/// # Example
///
/// ```rust
/// use optimizely_client::api::common::ResponseMeta;
///
/// let meta = ResponseMeta::default();
/// assert!(meta.rate_limit.is_none());
/// assert!(meta.next_page.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseMeta {
    /// Value of `x-ratelimit-limit`: the request quota for the current window.
    pub rate_limit: Option<String>,

    /// Value of `x-ratelimit-remaining`: requests left in the current window.
    pub rate_limit_remaining: Option<String>,

    /// Value of `x-ratelimit-reset`: when the current window resets.
    pub rate_limit_reset: Option<String>,

    /// Page number of the `rel=prev` pagination link, if any.
    pub prev_page: Option<String>,

    /// Page number of the `rel=next` pagination link, if any.
    pub next_page: Option<String>,

    /// Page number of the `rel=last` pagination link, if any.
    pub last_page: Option<String>,
}

impl ResponseMeta {
    /// Checks if a `rel=next` pagination link was present.
    pub fn has_next(&self) -> bool {
        self.next_page.is_some()
    }
}

/// Parses rate-limit and pagination metadata out of raw response headers.
///
/// Pure and infallible: headers that are missing, non-UTF-8, or malformed
/// simply leave the corresponding [`ResponseMeta`] field `None`.
pub fn parse_response_headers(headers: &HeaderMap) -> ResponseMeta {
    let mut meta = ResponseMeta {
        rate_limit: header_value(headers, "x-ratelimit-limit"),
        rate_limit_remaining: header_value(headers, "x-ratelimit-remaining"),
        rate_limit_reset: header_value(headers, "x-ratelimit-reset"),
        ..Default::default()
    };

    if let Some(link) = header_value(headers, "link") {
        for entry in LINK_ENTRY_PATTERN.captures_iter(&link) {
            let url = &entry[1];
            let Some(page) = PAGE_PARAM_PATTERN.captures(url) else {
                continue;
            };
            let page = page[1].to_string();

            match &entry[2] {
                "prev" => meta.prev_page = Some(page),
                "next" => meta.next_page = Some(page),
                "last" => meta.last_page = Some(page),
                _ => {}
            }
        }
    }

    meta
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(entries: &[(&'static str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in entries {
            map.insert(*name, value.parse().unwrap());
        }
        map
    }

    #[test]
    fn test_parses_rate_limit_headers() {
        let meta = parse_response_headers(&headers(&[
            ("x-ratelimit-limit", "120"),
            ("x-ratelimit-remaining", "42"),
            ("x-ratelimit-reset", "1730000000"),
        ]));

        assert_eq!(meta.rate_limit.as_deref(), Some("120"));
        assert_eq!(meta.rate_limit_remaining.as_deref(), Some("42"));
        assert_eq!(meta.rate_limit_reset.as_deref(), Some("1730000000"));
    }

    #[test]
    fn test_absent_headers_leave_fields_absent() {
        let meta = parse_response_headers(&HeaderMap::new());
        assert_eq!(meta, ResponseMeta::default());
    }

    #[test]
    fn test_parses_next_and_last_pages_from_link() {
        let meta = parse_response_headers(&headers(&[(
            "link",
            "<https://x/?page=2>; rel=next, <https://x/?page=9>; rel=last",
        )]));

        assert_eq!(meta.next_page.as_deref(), Some("2"));
        assert_eq!(meta.last_page.as_deref(), Some("9"));
        assert!(meta.prev_page.is_none());
        assert!(meta.has_next());
    }

    #[test]
    fn test_parses_prev_page_and_ampersand_separator() {
        let meta = parse_response_headers(&headers(&[(
            "link",
            "<https://x/projects?per_page=25&page=3>; rel=prev",
        )]));

        assert_eq!(meta.prev_page.as_deref(), Some("3"));
    }

    #[test]
    fn test_quoted_rel_values_are_accepted() {
        let meta = parse_response_headers(&headers(&[(
            "link",
            r#"<https://x/?page=4>; rel="next""#,
        )]));

        assert_eq!(meta.next_page.as_deref(), Some("4"));
    }

    #[test]
    fn test_unrecognized_rel_is_ignored() {
        let meta = parse_response_headers(&headers(&[(
            "link",
            "<https://x/?page=1>; rel=first, <https://x/?page=2>; rel=next",
        )]));

        assert_eq!(meta.next_page.as_deref(), Some("2"));
        assert!(meta.prev_page.is_none());
        assert!(meta.last_page.is_none());
    }

    #[test]
    fn test_link_without_page_parameter_contributes_nothing() {
        let meta = parse_response_headers(&headers(&[(
            "link",
            "<https://x/projects>; rel=next",
        )]));

        assert!(meta.next_page.is_none());
    }

    #[test]
    fn test_malformed_link_is_ignored() {
        let meta = parse_response_headers(&headers(&[("link", "not a link header")]));
        assert_eq!(meta, ResponseMeta::default());
    }
}

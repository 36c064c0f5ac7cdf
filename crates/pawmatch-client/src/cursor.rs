//! Cursor extraction from the search endpoint's `next`/`prev` links.
//!
//! The service returns adjacent pages as relative URLs carrying the cursor in
//! a `from` query parameter:
//!
//! ```text
//! /dogs/search?size=25&from=25&sort=breed:asc
//! ```
//!
//! A value with no query string is taken to already be a bare cursor token.

use percent_encoding::percent_decode_str;

use pawmatch_core::Cursor;

/// Extracts the `from` cursor from a `next`/`prev` link.
///
/// Returns `None` if:
/// - the link is empty,
/// - the link has a query string with no non-empty `from` parameter.
#[must_use]
pub fn cursor_from_link(link: &str) -> Option<Cursor> {
    let link = link.trim();
    if link.is_empty() {
        return None;
    }

    if !link.contains('?') {
        return Some(Cursor::new(link));
    }

    extract_query_param(link, "from").map(Cursor::new)
}

/// Extracts and percent-decodes the value of a named query parameter from a
/// URL string.
fn extract_query_param(url: &str, param: &str) -> Option<String> {
    let query_start = url.find('?')? + 1;
    let query = &url[query_start..];

    let needle = format!("{param}=");
    for pair in query.split('&') {
        if let Some(value) = pair.strip_prefix(needle.as_str()) {
            // Trim any fragment anchor that might trail the value.
            let value = value.split('#').next().unwrap_or(value);
            if value.is_empty() {
                return None;
            }
            let decoded = percent_decode_str(value).decode_utf8_lossy();
            return Some(decoded.into_owned());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_none_for_empty_link() {
        assert!(cursor_from_link("").is_none());
        assert!(cursor_from_link("   ").is_none());
    }

    #[test]
    fn extracts_from_when_last_param() {
        let cursor = cursor_from_link("/dogs/search?size=25&from=25");
        assert_eq!(cursor, Some(Cursor::new("25")));
    }

    #[test]
    fn extracts_from_when_followed_by_other_params() {
        let cursor = cursor_from_link("/dogs/search?size=25&from=50&sort=breed:asc");
        assert_eq!(cursor, Some(Cursor::new("50")));
    }

    #[test]
    fn extracts_from_when_first_param() {
        let cursor = cursor_from_link("/dogs/search?from=0&size=25");
        assert_eq!(cursor, Some(Cursor::new("0")));
    }

    #[test]
    fn does_not_match_param_suffix() {
        // `datefrom` must not be mistaken for `from`.
        let cursor = cursor_from_link("/dogs/search?datefrom=9&from=75");
        assert_eq!(cursor, Some(Cursor::new("75")));
    }

    #[test]
    fn returns_none_without_from_param() {
        assert!(cursor_from_link("/dogs/search?size=25&sort=breed:asc").is_none());
    }

    #[test]
    fn returns_none_for_empty_from_value() {
        assert!(cursor_from_link("/dogs/search?from=&size=25").is_none());
    }

    #[test]
    fn decodes_percent_encoded_cursor() {
        let cursor = cursor_from_link("/dogs/search?from=abc%3D%3D");
        assert_eq!(cursor, Some(Cursor::new("abc==")));
    }

    #[test]
    fn bare_token_is_used_directly() {
        assert_eq!(cursor_from_link("eyJvZmZzZXQiOjI1fQ"), Some(Cursor::new("eyJvZmZzZXQiOjI1fQ")));
    }

    #[test]
    fn ignores_fragment() {
        let cursor = cursor_from_link("/dogs/search?from=25#top");
        assert_eq!(cursor, Some(Cursor::new("25")));
    }
}

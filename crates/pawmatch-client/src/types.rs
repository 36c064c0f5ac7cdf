//! Wire types for the catalog service responses that need normalizing.
//!
//! `GET /dogs/search` returns the next/previous pages as relative URLs
//! (`/dogs/search?size=25&from=25`); [`RawSearchResponse::into_page`] reduces
//! them to opaque cursors so nothing past the client sees URL structure.

use serde::Deserialize;

use pawmatch_core::{DogId, SearchPage};

use crate::cursor::cursor_from_link;

/// Body of `GET /dogs/search`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSearchResponse {
    pub result_ids: Vec<DogId>,
    pub total: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub prev: Option<String>,
}

impl RawSearchResponse {
    #[must_use]
    pub fn into_page(self) -> SearchPage {
        SearchPage {
            result_ids: self.result_ids,
            total: self.total,
            next: self.next.as_deref().and_then(cursor_from_link),
            prev: self.prev.as_deref().and_then(cursor_from_link),
        }
    }
}

/// Body of `POST /dogs/match`.
#[derive(Debug, Deserialize)]
pub struct MatchResponse {
    #[serde(rename = "match")]
    pub matched: DogId,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pawmatch_core::Cursor;

    #[test]
    fn search_response_normalizes_links_to_cursors() {
        let raw: RawSearchResponse = serde_json::from_value(serde_json::json!({
            "resultIds": ["a", "b"],
            "total": 47,
            "next": "/dogs/search?size=25&from=25&sort=breed%3Aasc",
            "prev": null
        }))
        .expect("search body should parse");

        let page = raw.into_page();
        assert_eq!(page.result_ids, vec![DogId::new("a"), DogId::new("b")]);
        assert_eq!(page.total, 47);
        assert_eq!(page.next, Some(Cursor::new("25")));
        assert_eq!(page.prev, None);
    }

    #[test]
    fn search_response_tolerates_missing_links() {
        let raw: RawSearchResponse =
            serde_json::from_value(serde_json::json!({"resultIds": [], "total": 0}))
                .expect("search body should parse");
        let page = raw.into_page();
        assert!(page.next.is_none());
        assert!(page.prev.is_none());
    }

    #[test]
    fn match_response_reads_match_field() {
        let raw: MatchResponse =
            serde_json::from_value(serde_json::json!({"match": "dog-7"})).unwrap();
        assert_eq!(raw.matched, DogId::new("dog-7"));
    }
}

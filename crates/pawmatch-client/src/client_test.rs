use pawmatch_core::{Cursor, SortOrder};

use super::*;

fn test_client(base_url: &str) -> DogsClient {
    DogsClient::new(base_url, 30, "pawmatch-test/0.1", Session::new())
        .expect("client construction should not fail")
}

fn query(breeds: &[&str], sort: SortOrder) -> SearchQuery {
    SearchQuery {
        breeds: breeds.iter().map(|b| (*b).to_owned()).collect(),
        zip_codes: Vec::new(),
        age_min: None,
        age_max: None,
        size: 25,
        from: None,
        sort,
    }
}

#[test]
fn endpoint_joins_onto_base() {
    let client = test_client("https://frontend-take-home-service.fetch.com");
    assert_eq!(
        client.endpoint("dogs/breeds").unwrap().as_str(),
        "https://frontend-take-home-service.fetch.com/dogs/breeds"
    );
}

#[test]
fn endpoint_keeps_base_path_prefix() {
    let client = test_client("http://localhost:8080/api/");
    assert_eq!(
        client.endpoint("dogs/match").unwrap().as_str(),
        "http://localhost:8080/api/dogs/match"
    );
}

#[test]
fn new_rejects_invalid_base_url() {
    let result = DogsClient::new("not a url", 30, "ua", Session::new());
    assert!(
        matches!(result, Err(ApiError::InvalidBaseUrl { .. })),
        "expected InvalidBaseUrl"
    );
}

#[test]
fn search_url_repeats_breeds_and_encodes_sort() {
    let client = test_client("https://example.com");
    let url = client
        .search_url(&query(&["Beagle", "Poodle"], SortOrder::Desc))
        .unwrap();
    assert_eq!(
        url.as_str(),
        "https://example.com/dogs/search?breeds=Beagle&breeds=Poodle&size=25&sort=breed%3Adesc"
    );
}

#[test]
fn search_url_includes_all_set_filters() {
    let client = test_client("https://example.com");
    let mut q = query(&[], SortOrder::Asc);
    q.zip_codes = vec!["90210".to_owned()];
    q.age_min = Some(2);
    q.age_max = Some(9);
    q.from = Some(Cursor::new("25"));
    let url = client.search_url(&q).unwrap();
    assert_eq!(
        url.as_str(),
        "https://example.com/dogs/search?zipCodes=90210&ageMin=2&ageMax=9&size=25&from=25&sort=breed%3Aasc"
    );
}

#[test]
fn search_url_encodes_breed_names_with_spaces() {
    let client = test_client("https://example.com");
    let url = client
        .search_url(&query(&["German Shepherd"], SortOrder::Asc))
        .unwrap();
    assert!(
        url.as_str().contains("breeds=German+Shepherd"),
        "breed should be form-encoded: {url}"
    );
}

use super::*;

fn cursor_page(page: u32, total: u64, next: Option<&str>, prev: Option<&str>) -> PageCursor {
    PageCursor {
        position: PagePosition {
            page,
            from: (page > 1).then(|| Cursor::new(format!("{}", (page - 1) * 25))),
        },
        next: next.map(Cursor::new),
        prev: prev.map(Cursor::new),
        total,
    }
}

#[test]
fn sort_order_toggles_and_renders_wire_param() {
    assert_eq!(SortOrder::default(), SortOrder::Asc);
    assert_eq!(SortOrder::Asc.toggled(), SortOrder::Desc);
    assert_eq!(SortOrder::Desc.toggled(), SortOrder::Asc);
    assert_eq!(SortOrder::Asc.sort_param(), "breed:asc");
    assert_eq!(SortOrder::Desc.sort_param(), "breed:desc");
}

#[test]
fn age_range_accepts_every_valid_pair() {
    for min in 0..=MAX_DOG_AGE {
        for max in min..=MAX_DOG_AGE {
            let range = AgeRange::new(min, max).expect("valid bounds");
            assert_eq!((range.min(), range.max()), (min, max));
        }
    }
}

#[test]
fn age_range_rejects_inverted_bounds() {
    let err = AgeRange::new(8, 3).unwrap_err();
    assert_eq!(
        err,
        ModelError::InvalidAgeRange {
            min: 8,
            max: 3,
            limit: MAX_DOG_AGE
        }
    );
}

#[test]
fn age_range_rejects_upper_bound_above_limit() {
    assert!(AgeRange::new(0, 21).is_err());
}

#[test]
fn age_range_defaults_to_full_span() {
    let range = AgeRange::default();
    assert_eq!((range.min(), range.max()), (0, MAX_DOG_AGE));
}

#[test]
fn zip_status_classifies_input() {
    assert_eq!(ZipFilter::new("").status(), ZipStatus::Empty);
    assert_eq!(ZipFilter::new("1").status(), ZipStatus::Partial);
    assert_eq!(ZipFilter::new("1234").status(), ZipStatus::Partial);
    assert_eq!(ZipFilter::new("12345").status(), ZipStatus::Complete);
    assert_eq!(ZipFilter::new("12a45").status(), ZipStatus::Invalid);
    assert_eq!(ZipFilter::new("12a").status(), ZipStatus::Invalid);
    assert_eq!(ZipFilter::new("123456").status(), ZipStatus::Invalid);
}

#[test]
fn zip_partial_input_never_fetches() {
    for input in ["1", "12", "123", "1234"] {
        assert!(!ZipFilter::new(input).should_fetch(), "{input} should not fetch");
    }
}

#[test]
fn zip_empty_or_complete_input_fetches() {
    assert!(ZipFilter::new("").should_fetch());
    assert!(ZipFilter::new("90210").should_fetch());
}

#[test]
fn zip_non_digit_input_is_flagged_and_not_sent() {
    let zip = ZipFilter::new("9021x");
    assert!(zip.is_flagged_invalid());
    assert!(!zip.should_fetch());
    assert!(zip.zip_codes().is_empty());
}

#[test]
fn zip_codes_only_contains_complete_zip() {
    assert_eq!(ZipFilter::new("90210").zip_codes(), vec!["90210".to_owned()]);
    assert!(ZipFilter::new("902").zip_codes().is_empty());
}

#[test]
fn breed_selection_dedups_and_keeps_insertion_order() {
    let breeds: BreedSelection = ["Poodle", "Beagle", "Poodle", " ", "Akita"]
        .into_iter()
        .collect();
    assert_eq!(
        breeds.as_slice(),
        &["Poodle".to_owned(), "Beagle".to_owned(), "Akita".to_owned()]
    );
    assert!(breeds.contains("Beagle"));
    assert_eq!(breeds.len(), 3);
}

#[test]
fn filter_reset_keeps_sort_order() {
    let mut filters = FilterState {
        breeds: ["Beagle"].into_iter().collect(),
        age: AgeRange::new(2, 5).unwrap(),
        zip: ZipFilter::new("12345"),
        sort: SortOrder::Desc,
    };
    filters.reset();
    assert!(filters.breeds.is_empty());
    assert_eq!(filters.age, AgeRange::default());
    assert_eq!(filters.zip.input(), "");
    assert_eq!(filters.sort, SortOrder::Desc);
}

#[test]
fn total_pages_rounds_up() {
    assert_eq!(cursor_page(1, 47, None, None).total_pages(25), 2);
    assert_eq!(cursor_page(1, 50, None, None).total_pages(25), 2);
    assert_eq!(cursor_page(1, 51, None, None).total_pages(25), 3);
    assert_eq!(cursor_page(1, 0, None, None).total_pages(25), 0);
}

#[test]
fn next_position_uses_next_token() {
    let cursor = cursor_page(1, 47, Some("25"), None);
    let next = cursor.next_position(25).expect("page 2 exists");
    assert_eq!(next.page, 2);
    assert_eq!(next.from, Some(Cursor::new("25")));
}

#[test]
fn next_position_is_none_on_last_page() {
    let cursor = cursor_page(2, 47, Some("50"), Some("0"));
    assert!(cursor.next_position(25).is_none());
}

#[test]
fn next_position_is_none_without_token() {
    let cursor = cursor_page(1, 47, None, None);
    assert!(cursor.next_position(25).is_none());
}

#[test]
fn prev_position_to_first_page_drops_cursor() {
    let cursor = cursor_page(2, 47, None, Some("0"));
    assert_eq!(cursor.prev_position(), Some(PagePosition::first()));
}

#[test]
fn prev_position_uses_prev_token_beyond_first_page() {
    let cursor = cursor_page(3, 100, Some("75"), Some("25"));
    let prev = cursor.prev_position().expect("page 2 exists");
    assert_eq!(prev.page, 2);
    assert_eq!(prev.from, Some(Cursor::new("25")));
}

#[test]
fn prev_position_is_none_on_first_page() {
    assert!(PageCursor::default().prev_position().is_none());
}

#[test]
fn favorite_double_toggle_restores_set() {
    let mut favorites = FavoriteSet::default();
    favorites.toggle(DogId::new("a"));
    let before = favorites.clone();

    assert!(favorites.toggle(DogId::new("b")));
    assert!(!favorites.toggle(DogId::new("b")));
    assert_eq!(favorites, before);

    assert!(!favorites.toggle(DogId::new("a")));
    assert!(favorites.toggle(DogId::new("a")));
    assert_eq!(favorites, before);
}

#[test]
fn favorite_ids_are_sorted() {
    let mut favorites = FavoriteSet::default();
    favorites.toggle(DogId::new("c"));
    favorites.toggle(DogId::new("a"));
    assert_eq!(favorites.ids(), vec![DogId::new("a"), DogId::new("c")]);
}

#[test]
fn search_query_snapshots_filters() {
    let filters = FilterState {
        breeds: ["Beagle", "Poodle"].into_iter().collect(),
        age: AgeRange::new(1, 9).unwrap(),
        zip: ZipFilter::new("1234"),
        sort: SortOrder::Desc,
    };
    let query = SearchQuery::from_filters(&filters, 25, Some(Cursor::new("25")));
    assert_eq!(query.breeds, vec!["Beagle".to_owned(), "Poodle".to_owned()]);
    assert!(query.zip_codes.is_empty());
    assert_eq!(query.age_min, Some(1));
    assert_eq!(query.age_max, Some(9));
    assert_eq!(query.size, 25);
    assert_eq!(query.sort, SortOrder::Desc);
}

#[test]
fn dog_record_deserializes_wire_shape() {
    let dog: DogRecord = serde_json::from_value(serde_json::json!({
        "id": "NXGFTIcBOvEgQ5OCx8A1",
        "img": "https://frontend-take-home.fetch.com/dog-images/n02085620-Chihuahua/n02085620_10074.jpg",
        "name": "Jena",
        "age": 10,
        "zip_code": "48333",
        "breed": "Chihuahua"
    }))
    .expect("dog record should deserialize");
    assert_eq!(dog.id.as_str(), "NXGFTIcBOvEgQ5OCx8A1");
    assert_eq!(dog.age, 10);
    assert_eq!(dog.zip_code, "48333");
}

#[test]
fn page_size_bounds_are_enforced() {
    assert_eq!(validate_page_size(25), Ok(25));
    assert!(validate_page_size(0).is_err());
    assert!(validate_page_size(MAX_PAGE_SIZE + 1).is_err());
}

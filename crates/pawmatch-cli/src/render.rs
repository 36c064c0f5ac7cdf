//! Plain-text views of the login, catalog and match screens.
//!
//! Everything here is a pure function of its inputs; the interactive loop
//! decides when to print.

use pawmatch_catalog::{CatalogState, Notice, NoticeLevel};
use pawmatch_core::{
    BreedSelection, DogRecord, FavoriteSet, FieldError, MatchResult, SortOrder, ZipStatus,
};

pub(crate) const HEADER: &str = "Find Your Perfect Dog";

const CARD_WIDTH: usize = 30;
const CARD_GAP: &str = "  ";

pub(crate) fn sort_label(sort: SortOrder) -> &'static str {
    match sort {
        SortOrder::Asc => "Sort by Breed (A \u{2192} Z)",
        SortOrder::Desc => "Sort by Breed (Z \u{2192} A)",
    }
}

/// One dog card, as lines. Favorites carry a filled heart.
pub(crate) fn card(dog: &DogRecord, favorite: bool) -> Vec<String> {
    let heart = if favorite { '\u{2665}' } else { '\u{2661}' };
    vec![
        format!("{heart} {}", dog.name),
        format!("Breed: {}", dog.breed),
        format!("Age: {} years", dog.age),
        format!("Location: {}", dog.zip_code),
        format!("id: {}", dog.id),
    ]
}

/// Pads or truncates `line` to exactly `width` characters.
fn fit(line: &str, width: usize) -> String {
    if line.chars().count() > width {
        let mut cut: String = line.chars().take(width.saturating_sub(3)).collect();
        cut.push_str("...");
        cut
    } else {
        format!("{line:<width$}")
    }
}

/// Lays cards out `columns` to a row.
pub(crate) fn grid(dogs: &[DogRecord], favorites: &FavoriteSet, columns: usize) -> String {
    if dogs.is_empty() {
        return "No dogs match these filters.".to_owned();
    }

    let mut rows = Vec::new();
    for chunk in dogs.chunks(columns.max(1)) {
        let cards: Vec<Vec<String>> = chunk
            .iter()
            .map(|dog| card(dog, favorites.contains(&dog.id)))
            .collect();
        let height = cards.iter().map(Vec::len).max().unwrap_or(0);
        let lines: Vec<String> = (0..height)
            .map(|i| {
                let cells: Vec<String> = cards
                    .iter()
                    .map(|c| fit(c.get(i).map_or("", String::as_str), CARD_WIDTH))
                    .collect();
                cells.join(CARD_GAP).trim_end().to_owned()
            })
            .collect();
        rows.push(lines.join("\n"));
    }
    rows.join("\n\n")
}

pub(crate) fn controls(state: &CatalogState) -> String {
    let filters = state.filters();
    let breeds = if filters.breeds.is_empty() {
        "all".to_owned()
    } else {
        filters.breeds.as_slice().join(", ")
    };
    let zip = match filters.zip.status() {
        ZipStatus::Empty => "any".to_owned(),
        ZipStatus::Invalid => format!("{} (invalid zip code)", filters.zip.input()),
        ZipStatus::Partial | ZipStatus::Complete => filters.zip.input().to_owned(),
    };

    let mut lines = vec![
        sort_label(filters.sort).to_owned(),
        format!("Breeds: {breeds}"),
    ];
    let available = state.breeds_available().len();
    if available > 0 {
        lines.push(format!("Available breeds: {available} (`list` shows them)"));
    }
    lines.extend([
        format!("Age: {} years", filters.age),
        format!("Zip: {zip}"),
        format!("Generate Match ({})", state.favorites().len()),
    ]);
    lines.join("\n")
}

/// Every breed the service offers, `columns` to a row, selected ones checked.
pub(crate) fn breed_list(
    available: &[String],
    selected: &BreedSelection,
    columns: usize,
) -> String {
    if available.is_empty() {
        return "No breeds loaded.".to_owned();
    }
    available
        .chunks(columns.max(1))
        .map(|row| {
            let cells: Vec<String> = row
                .iter()
                .map(|breed| {
                    let mark = if selected.contains(breed) { 'x' } else { ' ' };
                    fit(&format!("[{mark}] {breed}"), CARD_WIDTH)
                })
                .collect();
            cells.join(CARD_GAP).trim_end().to_owned()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Pagination bar, or `None` when everything fits on one page.
pub(crate) fn pagination(page: u32, total_pages: u64, searching: bool) -> Option<String> {
    if total_pages <= 1 {
        return None;
    }
    let prev_enabled = page > 1 && !searching;
    let next_enabled = u64::from(page) < total_pages && !searching;
    let button = |label: &str, enabled: bool| {
        if enabled {
            format!("[{label}]")
        } else {
            format!("({label})")
        }
    };
    Some(format!(
        "{}  Page {page} of {total_pages}  {}",
        button("Previous", prev_enabled),
        button("Next", next_enabled)
    ))
}

/// The full catalog screen.
pub(crate) fn catalog(state: &CatalogState, columns: usize) -> String {
    let mut sections = vec![HEADER.to_owned(), controls(state)];
    if state.is_initial_loading() {
        sections.push("Loading dogs...".to_owned());
    } else {
        if state.is_searching() {
            sections.push("Searching...".to_owned());
        }
        sections.push(grid(state.dogs(), state.favorites(), columns));
        if let Some(bar) = pagination(state.cursor().page(), state.total_pages(), state.is_searching())
        {
            sections.push(bar);
        }
    }
    sections.join("\n\n")
}

pub(crate) fn match_view(result: &MatchResult) -> String {
    let dog = &result.dog;
    [
        "Your Perfect Match!".to_owned(),
        String::new(),
        format!("Meet {}!", dog.name),
        format!("Breed: {}", dog.breed),
        format!("Age: {} years", dog.age),
        format!("Location: {}", dog.zip_code),
        format!("Photo: {}", dog.img),
    ]
    .join("\n")
}

pub(crate) fn login_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("\n")
}

pub(crate) fn notice(notice: &Notice) -> String {
    match notice.level {
        NoticeLevel::Info => format!("note: {notice}"),
        NoticeLevel::Error => format!("error: {notice}"),
    }
}

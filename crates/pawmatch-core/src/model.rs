//! Catalog data model shared by the gateway, the catalog controller and the
//! terminal renderers.
//!
//! The displayed page and the favorite set are deliberately separate
//! collections keyed by the same [`DogId`]: a favorite survives paging and
//! filter changes, while the page is replaced wholesale on every search.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Upper bound (inclusive) accepted by the age filter, in years.
pub const MAX_DOG_AGE: u32 = 20;

/// Length of a complete US zip code.
pub const ZIP_LEN: usize = 5;

/// Largest page size the catalog service accepts.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Identifier of a dog in the remote catalog.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DogId(String);

impl DogId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DogId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for DogId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A dog as returned by `POST /dogs`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DogRecord {
    pub id: DogId,
    /// Image URI.
    pub img: String,
    pub name: String,
    /// Age in whole years.
    pub age: u32,
    pub zip_code: String,
    pub breed: String,
}

/// Sort direction for the breed-name ordering of search results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }

    /// Wire form of the `sort` query parameter, e.g. `breed:asc`.
    #[must_use]
    pub fn sort_param(self) -> String {
        format!("breed:{self}")
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Asc => write!(f, "asc"),
            SortOrder::Desc => write!(f, "desc"),
        }
    }
}

/// Inclusive age bounds, always within `0..=MAX_DOG_AGE` with `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeRange {
    min: u32,
    max: u32,
}

impl AgeRange {
    /// Builds a validated age range.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidAgeRange`] unless
    /// `min <= max <= MAX_DOG_AGE`.
    pub fn new(min: u32, max: u32) -> Result<Self, ModelError> {
        if min > max || max > MAX_DOG_AGE {
            return Err(ModelError::InvalidAgeRange {
                min,
                max,
                limit: MAX_DOG_AGE,
            });
        }
        Ok(Self { min, max })
    }

    #[must_use]
    pub fn min(self) -> u32 {
        self.min
    }

    #[must_use]
    pub fn max(self) -> u32 {
        self.max
    }
}

impl Default for AgeRange {
    fn default() -> Self {
        Self {
            min: 0,
            max: MAX_DOG_AGE,
        }
    }
}

impl fmt::Display for AgeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

/// Classification of the raw zip-code input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZipStatus {
    /// No zip filter.
    Empty,
    /// 1 to 4 digits typed so far.
    Partial,
    /// Exactly five digits.
    Complete,
    /// Contains a non-digit or is longer than five characters.
    Invalid,
}

/// Zip-code filter exactly as typed by the user.
///
/// Invalid input is kept so the user can keep editing it; it is flagged for
/// display and never sent to the service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZipFilter {
    input: String,
}

impl ZipFilter {
    #[must_use]
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }

    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    #[must_use]
    pub fn status(&self) -> ZipStatus {
        if self.input.is_empty() {
            return ZipStatus::Empty;
        }
        let len = self.input.chars().count();
        if len > ZIP_LEN || !self.input.chars().all(|c| c.is_ascii_digit()) {
            ZipStatus::Invalid
        } else if len == ZIP_LEN {
            ZipStatus::Complete
        } else {
            ZipStatus::Partial
        }
    }

    /// Whether this input should trigger a new search.
    #[must_use]
    pub fn should_fetch(&self) -> bool {
        matches!(self.status(), ZipStatus::Empty | ZipStatus::Complete)
    }

    #[must_use]
    pub fn is_flagged_invalid(&self) -> bool {
        self.status() == ZipStatus::Invalid
    }

    /// The `zipCodes` values to send with a search.
    #[must_use]
    pub fn zip_codes(&self) -> Vec<String> {
        if self.status() == ZipStatus::Complete {
            vec![self.input.clone()]
        } else {
            Vec::new()
        }
    }
}

/// Selected breed names, de-duplicated, in the order they were chosen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BreedSelection(Vec<String>);

impl BreedSelection {
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn contains(&self, breed: &str) -> bool {
        self.0.iter().any(|b| b == breed)
    }
}

impl<S: Into<String>> FromIterator<S> for BreedSelection {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut breeds: Vec<String> = Vec::new();
        for breed in iter {
            let breed = breed.into();
            let trimmed = breed.trim();
            if trimmed.is_empty() || breeds.iter().any(|b| b == trimmed) {
                continue;
            }
            breeds.push(trimmed.to_owned());
        }
        Self(breeds)
    }
}

/// Every user-controlled search filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub breeds: BreedSelection,
    pub age: AgeRange,
    pub zip: ZipFilter,
    pub sort: SortOrder,
}

impl FilterState {
    /// Restores breeds, age and zip to their defaults. The sort order is kept.
    pub fn reset(&mut self) {
        self.breeds = BreedSelection::default();
        self.age = AgeRange::default();
        self.zip = ZipFilter::default();
    }
}

/// Opaque pagination token handed out by the search endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor(String);

impl Cursor {
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The page a search is asked for: its 1-based number and the cursor that
/// reaches it (`None` for the first page).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagePosition {
    pub page: u32,
    pub from: Option<Cursor>,
}

impl PagePosition {
    #[must_use]
    pub fn first() -> Self {
        Self {
            page: 1,
            from: None,
        }
    }
}

impl Default for PagePosition {
    fn default() -> Self {
        Self::first()
    }
}

/// Pagination state committed by the last successful search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageCursor {
    pub position: PagePosition,
    pub next: Option<Cursor>,
    pub prev: Option<Cursor>,
    pub total: u64,
}

impl PageCursor {
    #[must_use]
    pub fn page(&self) -> u32 {
        self.position.page
    }

    /// `ceil(total / page_size)`; zero when there are no results.
    #[must_use]
    pub fn total_pages(&self, page_size: u32) -> u64 {
        if page_size == 0 {
            return 0;
        }
        self.total.div_ceil(u64::from(page_size))
    }

    /// Position of the following page, if the last response offered one.
    #[must_use]
    pub fn next_position(&self, page_size: u32) -> Option<PagePosition> {
        let next = self.next.clone()?;
        if u64::from(self.page()) >= self.total_pages(page_size) {
            return None;
        }
        Some(PagePosition {
            page: self.page() + 1,
            from: Some(next),
        })
    }

    /// Position of the preceding page. Page 1 is always reached with no
    /// cursor, so going forward and back again repeats the original request.
    #[must_use]
    pub fn prev_position(&self) -> Option<PagePosition> {
        if self.page() <= 1 {
            return None;
        }
        let page = self.page() - 1;
        if page == 1 {
            return Some(PagePosition::first());
        }
        Some(PagePosition {
            page,
            from: Some(self.prev.clone()?),
        })
    }
}

impl Default for PageCursor {
    fn default() -> Self {
        Self {
            position: PagePosition::first(),
            next: None,
            prev: None,
            total: 0,
        }
    }
}

/// Dogs the user has favorited, independent of the displayed page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FavoriteSet(BTreeSet<DogId>);

impl FavoriteSet {
    /// Adds `id` if absent, removes it if present. Returns whether `id` is a
    /// favorite afterwards.
    pub fn toggle(&mut self, id: DogId) -> bool {
        if self.0.remove(&id) {
            false
        } else {
            self.0.insert(id);
            true
        }
    }

    #[must_use]
    pub fn contains(&self, id: &DogId) -> bool {
        self.0.contains(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    #[must_use]
    pub fn ids(&self) -> Vec<DogId> {
        self.0.iter().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DogId> {
        self.0.iter()
    }
}

/// The dog picked by the matching service, resolved to its full record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    pub dog: DogRecord,
}

/// Full input of one `GET /dogs/search` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub breeds: Vec<String>,
    pub zip_codes: Vec<String>,
    pub age_min: Option<u32>,
    pub age_max: Option<u32>,
    pub size: u32,
    pub from: Option<Cursor>,
    pub sort: SortOrder,
}

impl SearchQuery {
    /// Snapshot of the active filters for the requested page.
    #[must_use]
    pub fn from_filters(filters: &FilterState, size: u32, from: Option<Cursor>) -> Self {
        Self {
            breeds: filters.breeds.as_slice().to_vec(),
            zip_codes: filters.zip.zip_codes(),
            age_min: Some(filters.age.min()),
            age_max: Some(filters.age.max()),
            size,
            from,
            sort: filters.sort,
        }
    }
}

/// Normalized response of one search call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPage {
    pub result_ids: Vec<DogId>,
    pub total: u64,
    pub next: Option<Cursor>,
    pub prev: Option<Cursor>,
}

/// Validates a configured page size.
///
/// # Errors
///
/// Returns [`ModelError::InvalidPageSize`] for 0 or anything above
/// [`MAX_PAGE_SIZE`].
pub fn validate_page_size(size: u32) -> Result<u32, ModelError> {
    if size == 0 || size > MAX_PAGE_SIZE {
        return Err(ModelError::InvalidPageSize {
            size,
            limit: MAX_PAGE_SIZE,
        });
    }
    Ok(size)
}

#[cfg(test)]
#[path = "model_test.rs"]
mod tests;

//! The catalog state machine.
//!
//! [`CatalogState`] is synchronous and performs no I/O. User actions go
//! through [`CatalogState::apply`], which reports whether a new search is
//! needed. A search is bracketed by [`CatalogState::begin_fetch`] and
//! [`CatalogState::finish_fetch`]; every ticket carries a sequence number and
//! only the most recently issued one may change what is displayed.

use std::collections::HashMap;

use pawmatch_client::ApiError;
use pawmatch_core::{
    AgeRange, BreedSelection, DogId, DogRecord, FavoriteSet, FilterState, PageCursor,
    PagePosition, SearchPage, SearchQuery, ZipFilter,
};

/// A user interaction with the catalog view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogAction {
    SetBreeds(BreedSelection),
    ToggleSort,
    SetAgeRange(AgeRange),
    SetZip(String),
    ToggleFavorite(DogId),
    NextPage,
    PrevPage,
    ResetFilters,
    ResetFavorites,
}

/// What the caller must do after applying an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    Refetch,
}

/// An issued search: its sequence number, the page it targets and the query
/// snapshot sent to the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub seq: u64,
    pub position: PagePosition,
    pub query: SearchQuery,
}

/// A search result whose identifiers have been resolved to records, in
/// search order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedPage {
    pub search: SearchPage,
    pub dogs: Vec<DogRecord>,
}

impl ResolvedPage {
    /// Orders `dogs` by the search's id list. Ids the service did not
    /// resolve are dropped so no bare identifier is ever displayed.
    #[must_use]
    pub fn resolve(search: SearchPage, dogs: Vec<DogRecord>) -> Self {
        let mut by_id: HashMap<DogId, DogRecord> =
            dogs.into_iter().map(|dog| (dog.id.clone(), dog)).collect();

        let mut ordered = Vec::with_capacity(search.result_ids.len());
        for id in &search.result_ids {
            match by_id.remove(id) {
                Some(dog) => ordered.push(dog),
                None => tracing::warn!(%id, "search id was not resolved to a record; skipping"),
            }
        }

        Self {
            search,
            dogs: ordered,
        }
    }
}

/// Result of handing a finished search back to the state machine.
#[derive(Debug)]
pub enum FetchOutcome {
    /// The page replaced the displayed state.
    Applied,
    /// A newer search was issued after this one; the result was discarded.
    Stale,
    /// The search failed; displayed state is unchanged.
    Failed(ApiError),
    /// The session expired; displayed state is unchanged.
    Unauthorized,
}

#[derive(Debug, Clone)]
pub struct CatalogState {
    page_size: u32,
    filters: FilterState,
    requested: PagePosition,
    cursor: PageCursor,
    dogs: Vec<DogRecord>,
    favorites: FavoriteSet,
    breeds: Vec<String>,
    latest_seq: u64,
    initial_loading: bool,
    searching: bool,
}

impl CatalogState {
    #[must_use]
    pub fn new(page_size: u32) -> Self {
        Self {
            page_size,
            filters: FilterState::default(),
            requested: PagePosition::first(),
            cursor: PageCursor::default(),
            dogs: Vec::new(),
            favorites: FavoriteSet::default(),
            breeds: Vec::new(),
            latest_seq: 0,
            initial_loading: true,
            searching: false,
        }
    }

    /// Applies one user action and reports whether a search must follow.
    pub fn apply(&mut self, action: CatalogAction) -> Effect {
        match action {
            CatalogAction::SetBreeds(breeds) => {
                self.filters.breeds = breeds;
                self.restart()
            }
            CatalogAction::ToggleSort => {
                self.filters.sort = self.filters.sort.toggled();
                self.restart()
            }
            CatalogAction::SetAgeRange(age) => {
                self.filters.age = age;
                self.restart()
            }
            CatalogAction::SetZip(input) => {
                self.filters.zip = ZipFilter::new(input);
                if self.filters.zip.should_fetch() {
                    self.restart()
                } else {
                    Effect::None
                }
            }
            CatalogAction::ToggleFavorite(id) => {
                self.favorites.toggle(id);
                Effect::None
            }
            CatalogAction::NextPage => match self.cursor.next_position(self.page_size) {
                Some(position) => {
                    self.requested = position;
                    Effect::Refetch
                }
                None => Effect::None,
            },
            CatalogAction::PrevPage => match self.cursor.prev_position() {
                Some(position) => {
                    self.requested = position;
                    Effect::Refetch
                }
                None => Effect::None,
            },
            CatalogAction::ResetFilters => {
                self.filters.reset();
                self.restart()
            }
            CatalogAction::ResetFavorites => {
                self.favorites.clear();
                Effect::None
            }
        }
    }

    /// Issues a new search ticket for the current filters and requested
    /// page. Any ticket issued earlier becomes stale.
    pub fn begin_fetch(&mut self) -> SearchTicket {
        self.latest_seq += 1;
        self.searching = true;
        let query =
            SearchQuery::from_filters(&self.filters, self.page_size, self.requested.from.clone());
        tracing::debug!(seq = self.latest_seq, page = self.requested.page, "search issued");
        SearchTicket {
            seq: self.latest_seq,
            position: self.requested.clone(),
            query,
        }
    }

    /// Commits a finished search if it is the latest one issued.
    ///
    /// The dog list, total, cursors and page number are replaced together;
    /// on failure none of them change.
    pub fn finish_fetch(
        &mut self,
        ticket: SearchTicket,
        result: Result<ResolvedPage, ApiError>,
    ) -> FetchOutcome {
        if ticket.seq != self.latest_seq {
            tracing::debug!(
                seq = ticket.seq,
                latest = self.latest_seq,
                "discarding stale search result"
            );
            return FetchOutcome::Stale;
        }

        self.searching = false;
        self.initial_loading = false;

        match result {
            Ok(page) => {
                self.cursor = PageCursor {
                    position: ticket.position,
                    next: page.search.next,
                    prev: page.search.prev,
                    total: page.search.total,
                };
                self.dogs = page.dogs;
                FetchOutcome::Applied
            }
            Err(err) if err.is_unauthorized() => FetchOutcome::Unauthorized,
            Err(err) => FetchOutcome::Failed(err),
        }
    }

    pub fn set_breeds_available(&mut self, breeds: Vec<String>) {
        self.breeds = breeds;
    }

    fn restart(&mut self) -> Effect {
        self.requested = PagePosition::first();
        Effect::Refetch
    }

    #[must_use]
    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    #[must_use]
    pub fn requested(&self) -> &PagePosition {
        &self.requested
    }

    #[must_use]
    pub fn cursor(&self) -> &PageCursor {
        &self.cursor
    }

    #[must_use]
    pub fn dogs(&self) -> &[DogRecord] {
        &self.dogs
    }

    #[must_use]
    pub fn favorites(&self) -> &FavoriteSet {
        &self.favorites
    }

    #[must_use]
    pub fn breeds_available(&self) -> &[String] {
        &self.breeds
    }

    #[must_use]
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    #[must_use]
    pub fn total_pages(&self) -> u64 {
        self.cursor.total_pages(self.page_size)
    }

    #[must_use]
    pub fn is_initial_loading(&self) -> bool {
        self.initial_loading
    }

    #[must_use]
    pub fn is_searching(&self) -> bool {
        self.searching
    }
}

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;

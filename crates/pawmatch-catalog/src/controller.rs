//! Drives [`CatalogState`] against a [`CatalogApi`].
//!
//! The controller turns state-machine effects into gateway calls, converts
//! failures into transient [`Notice`]s and leaves unauthorized responses to
//! the shared [`Session`], which the gateway has already expired.

use std::collections::VecDeque;

use pawmatch_client::{ApiError, CatalogApi};
use pawmatch_core::{DogId, MatchResult, SearchQuery, Session, View};

use crate::notice::Notice;
use crate::state::{CatalogAction, CatalogState, Effect, FetchOutcome, ResolvedPage, SearchTicket};

/// Where the front end goes after a match request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    Matched(MatchResult),
    /// No favorites, or the match could not be produced.
    BackToCatalog,
    /// The session expired during the request.
    Login,
}

/// Runs the two-step fetch: one search, then one batch lookup of the
/// returned ids. An empty id list skips the lookup.
///
/// # Errors
///
/// Returns the first [`ApiError`] from either call.
pub async fn fetch_page<A: CatalogApi>(
    api: &A,
    query: &SearchQuery,
) -> Result<ResolvedPage, ApiError> {
    let search = api.search(query).await?;
    let dogs = if search.result_ids.is_empty() {
        Vec::new()
    } else {
        api.fetch_dogs(&search.result_ids).await?
    };
    Ok(ResolvedPage::resolve(search, dogs))
}

pub struct CatalogController<A> {
    api: A,
    session: Session,
    state: CatalogState,
    notices: VecDeque<Notice>,
}

impl<A: CatalogApi> CatalogController<A> {
    #[must_use]
    pub fn new(api: A, session: Session, page_size: u32) -> Self {
        Self {
            api,
            session,
            state: CatalogState::new(page_size),
            notices: VecDeque::new(),
        }
    }

    #[must_use]
    pub fn state(&self) -> &CatalogState {
        &self.state
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Takes every pending notification, oldest first.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        self.notices.drain(..).collect()
    }

    /// Loads the breed list shown by the breed selector.
    pub async fn load_breeds(&mut self) {
        match self.api.breeds().await {
            Ok(breeds) => {
                tracing::debug!(count = breeds.len(), "breeds loaded");
                self.state.set_breeds_available(breeds);
            }
            Err(err) if err.is_unauthorized() => {}
            Err(err) => {
                tracing::error!(error = %err, "error fetching breeds");
                self.notices.push_back(Notice::error("Error fetching breeds", &err));
            }
        }
    }

    /// Applies a user action and runs the search it calls for, if any.
    ///
    /// Returns `None` when the action needed no network call.
    pub async fn dispatch(&mut self, action: CatalogAction) -> Option<FetchOutcome> {
        match self.state.apply(action) {
            Effect::None => None,
            Effect::Refetch => Some(self.refresh().await),
        }
    }

    /// Searches for the current filters and requested page.
    pub async fn refresh(&mut self) -> FetchOutcome {
        let ticket = self.begin_fetch();
        let result = fetch_page(&self.api, &ticket.query).await;
        self.complete_fetch(ticket, result)
    }

    /// Issues a search ticket without running it, for callers that run
    /// several searches concurrently with [`fetch_page`].
    pub fn begin_fetch(&mut self) -> SearchTicket {
        self.state.begin_fetch()
    }

    /// Hands a finished search back to the state machine.
    pub fn complete_fetch(
        &mut self,
        ticket: SearchTicket,
        result: Result<ResolvedPage, ApiError>,
    ) -> FetchOutcome {
        let outcome = self.state.finish_fetch(ticket, result);
        if let FetchOutcome::Failed(err) = &outcome {
            tracing::error!(error = %err, "error fetching dogs");
            self.notices.push_back(Notice::error("Error fetching dogs", err));
        }
        outcome
    }

    /// Asks the service to match against the current favorites.
    ///
    /// With no favorites, no request is made.
    pub async fn request_match(&mut self) -> MatchOutcome {
        if self.state.favorites().is_empty() {
            tracing::debug!("match requested without favorites; staying on catalog");
            return MatchOutcome::BackToCatalog;
        }

        let ids = self.state.favorites().ids();
        match self.resolve_match(&ids).await {
            Ok(Some(result)) => MatchOutcome::Matched(result),
            Ok(None) => {
                tracing::warn!("matched dog was not returned by the record lookup");
                self.notices
                    .push_back(Notice::info("Matched dog could not be loaded"));
                MatchOutcome::BackToCatalog
            }
            Err(err) if err.is_unauthorized() => MatchOutcome::Login,
            Err(err) => {
                tracing::error!(error = %err, "failed to generate match");
                self.notices
                    .push_back(Notice::error("Failed to generate match", &err));
                MatchOutcome::BackToCatalog
            }
        }
    }

    async fn resolve_match(&self, ids: &[DogId]) -> Result<Option<MatchResult>, ApiError> {
        let matched = self.api.generate_match(ids).await?;
        let dogs = self.api.fetch_dogs(std::slice::from_ref(&matched)).await?;
        Ok(dogs
            .into_iter()
            .find(|dog| dog.id == matched)
            .map(|dog| MatchResult { dog }))
    }

    /// Ends the session. On success the catalog state is discarded and the
    /// login view is returned; on failure the user stays on the catalog.
    pub async fn logout(&mut self) -> View {
        match self.api.logout().await {
            Ok(()) => {
                tracing::info!("logged out");
                self.session.set_authenticated(false);
                self.state = CatalogState::new(self.state.page_size());
                View::Login
            }
            Err(err) if err.is_unauthorized() => {
                self.session.expire();
                View::Login
            }
            Err(err) => {
                tracing::error!(error = %err, "logout failed");
                self.notices.push_back(Notice::error("Logout failed", &err));
                View::Catalog
            }
        }
    }
}

#[cfg(test)]
#[path = "controller_test.rs"]
mod tests;

//! The seam between the catalog controller and the HTTP gateway.

use std::future::Future;

use pawmatch_core::{DogId, DogRecord, SearchPage, SearchQuery};

use crate::client::DogsClient;
use crate::error::ApiError;

/// Remote catalog operations the catalog controller depends on.
///
/// [`DogsClient`] is the production implementation; tests substitute
/// in-memory fakes.
pub trait CatalogApi {
    fn breeds(&self) -> impl Future<Output = Result<Vec<String>, ApiError>> + Send;

    fn search(
        &self,
        query: &SearchQuery,
    ) -> impl Future<Output = Result<SearchPage, ApiError>> + Send;

    fn fetch_dogs(
        &self,
        ids: &[DogId],
    ) -> impl Future<Output = Result<Vec<DogRecord>, ApiError>> + Send;

    fn generate_match(
        &self,
        ids: &[DogId],
    ) -> impl Future<Output = Result<DogId, ApiError>> + Send;

    fn logout(&self) -> impl Future<Output = Result<(), ApiError>> + Send;
}

impl CatalogApi for DogsClient {
    fn breeds(&self) -> impl Future<Output = Result<Vec<String>, ApiError>> + Send {
        DogsClient::breeds(self)
    }

    fn search(
        &self,
        query: &SearchQuery,
    ) -> impl Future<Output = Result<SearchPage, ApiError>> + Send {
        DogsClient::search(self, query)
    }

    fn fetch_dogs(
        &self,
        ids: &[DogId],
    ) -> impl Future<Output = Result<Vec<DogRecord>, ApiError>> + Send {
        DogsClient::fetch_dogs(self, ids)
    }

    fn generate_match(
        &self,
        ids: &[DogId],
    ) -> impl Future<Output = Result<DogId, ApiError>> + Send {
        DogsClient::generate_match(self, ids)
    }

    fn logout(&self) -> impl Future<Output = Result<(), ApiError>> + Send {
        DogsClient::logout(self)
    }
}

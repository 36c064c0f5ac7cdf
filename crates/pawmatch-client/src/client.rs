//! HTTP client for the dog catalog service.
//!
//! Wraps `reqwest` with a cookie store so the session cookie set by
//! `POST /auth/login` rides along on every later call. Every response goes
//! through one status check: 401 expires the shared [`Session`] before the
//! error is returned, so the front end is sent back to login no matter which
//! view issued the call.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;

use pawmatch_core::{AppConfig, Credentials, DogId, DogRecord, SearchPage, SearchQuery, Session};

use crate::error::ApiError;
use crate::types::{MatchResponse, RawSearchResponse};

/// Client for the dog catalog REST API.
///
/// Use [`DogsClient::from_config`] in the binary or [`DogsClient::new`] to
/// point at a mock server in tests.
pub struct DogsClient {
    client: Client,
    base_url: Url,
    session: Session,
}

impl DogsClient {
    /// Creates a client for `base_url` sharing `session` with the caller.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ApiError::InvalidBaseUrl`] if `base_url`
    /// is not a valid URL.
    pub fn new(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
        session: Session,
    ) -> Result<Self, ApiError> {
        let client = Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Normalise to exactly one trailing slash so `Url::join` appends
        // endpoint paths instead of replacing the last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| ApiError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl {
                base_url: normalised,
                reason: "URL cannot be used as a base".to_owned(),
            });
        }

        Ok(Self {
            client,
            base_url,
            session,
        })
    }

    /// Creates a client from the application configuration.
    ///
    /// # Errors
    ///
    /// Same as [`DogsClient::new`].
    pub fn from_config(config: &AppConfig, session: Session) -> Result<Self, ApiError> {
        Self::new(
            &config.api_base_url,
            config.request_timeout_secs,
            &config.user_agent,
            session,
        )
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Logs in with validated credentials.
    ///
    /// Returns `Ok(false)` when the service rejects the credentials with a
    /// 4xx status. The session flag is left to the caller.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Http`] on network failure.
    /// - [`ApiError::UnexpectedStatus`] on a 5xx status.
    pub async fn login(&self, credentials: &Credentials) -> Result<bool, ApiError> {
        const ENDPOINT: &str = "POST /auth/login";
        let url = self.endpoint("auth/login")?;
        let response = self.client.post(url).json(credentials).send().await?;
        let status = response.status();
        if status.is_success() {
            tracing::info!(name = %credentials.name, "login accepted");
            return Ok(true);
        }
        if status.is_client_error() {
            tracing::warn!(status = status.as_u16(), "login rejected");
            return Ok(false);
        }
        Err(ApiError::UnexpectedStatus {
            status: status.as_u16(),
            endpoint: ENDPOINT,
        })
    }

    /// Ends the server-side session.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Unauthorized`] if the session had already expired.
    /// - [`ApiError::UnexpectedStatus`] on any other non-2xx status.
    /// - [`ApiError::Http`] on network failure.
    pub async fn logout(&self) -> Result<(), ApiError> {
        let url = self.endpoint("auth/logout")?;
        self.send("POST /auth/logout", self.client.post(url))
            .await?;
        Ok(())
    }

    /// Lists every breed name, in the order the service returns them.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Unauthorized`] on 401.
    /// - [`ApiError::UnexpectedStatus`] on any other non-2xx status.
    /// - [`ApiError::Http`] on network failure.
    /// - [`ApiError::Deserialize`] if the body is not a string array.
    pub async fn breeds(&self) -> Result<Vec<String>, ApiError> {
        const ENDPOINT: &str = "GET /dogs/breeds";
        let url = self.endpoint("dogs/breeds")?;
        let response = self.send(ENDPOINT, self.client.get(url)).await?;
        read_json(response, ENDPOINT).await
    }

    /// Runs one search and returns the id page with normalized cursors.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Unauthorized`] on 401.
    /// - [`ApiError::UnexpectedStatus`] on any other non-2xx status.
    /// - [`ApiError::Http`] on network failure.
    /// - [`ApiError::Deserialize`] if the body does not match the search shape.
    pub async fn search(&self, query: &SearchQuery) -> Result<SearchPage, ApiError> {
        const ENDPOINT: &str = "GET /dogs/search";
        let url = self.search_url(query)?;
        tracing::debug!(%url, "searching dogs");
        let response = self.send(ENDPOINT, self.client.get(url)).await?;
        let raw: RawSearchResponse = read_json(response, ENDPOINT).await?;
        Ok(raw.into_page())
    }

    /// Resolves identifiers to full records. The service does not promise to
    /// preserve input order.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Unauthorized`] on 401.
    /// - [`ApiError::UnexpectedStatus`] on any other non-2xx status.
    /// - [`ApiError::Http`] on network failure.
    /// - [`ApiError::Deserialize`] if the body is not a list of dogs.
    pub async fn fetch_dogs(&self, ids: &[DogId]) -> Result<Vec<DogRecord>, ApiError> {
        const ENDPOINT: &str = "POST /dogs";
        let url = self.endpoint("dogs")?;
        tracing::debug!(count = ids.len(), "fetching dog records");
        let response = self.send(ENDPOINT, self.client.post(url).json(ids)).await?;
        read_json(response, ENDPOINT).await
    }

    /// Asks the service to pick one dog out of `ids`.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Unauthorized`] on 401.
    /// - [`ApiError::UnexpectedStatus`] on any other non-2xx status.
    /// - [`ApiError::Http`] on network failure.
    /// - [`ApiError::Deserialize`] if the body has no `match` field.
    pub async fn generate_match(&self, ids: &[DogId]) -> Result<DogId, ApiError> {
        const ENDPOINT: &str = "POST /dogs/match";
        let url = self.endpoint("dogs/match")?;
        let response = self.send(ENDPOINT, self.client.post(url).json(ids)).await?;
        let body: MatchResponse = read_json(response, ENDPOINT).await?;
        tracing::info!(matched = %body.matched, candidates = ids.len(), "match generated");
        Ok(body.matched)
    }

    /// Joins an endpoint path onto the base URL.
    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|e| ApiError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })
    }

    /// Builds the search URL. Repeated filters are emitted once per value and
    /// unset optional parameters are omitted.
    fn search_url(&self, query: &SearchQuery) -> Result<Url, ApiError> {
        let mut url = self.endpoint("dogs/search")?;
        {
            let mut pairs = url.query_pairs_mut();
            for breed in &query.breeds {
                pairs.append_pair("breeds", breed);
            }
            for zip in &query.zip_codes {
                pairs.append_pair("zipCodes", zip);
            }
            if let Some(min) = query.age_min {
                pairs.append_pair("ageMin", &min.to_string());
            }
            if let Some(max) = query.age_max {
                pairs.append_pair("ageMax", &max.to_string());
            }
            pairs.append_pair("size", &query.size.to_string());
            if let Some(from) = &query.from {
                pairs.append_pair("from", from.as_str());
            }
            pairs.append_pair("sort", &query.sort.sort_param());
        }
        Ok(url)
    }

    /// Sends a request and maps non-2xx statuses to typed errors.
    ///
    /// A 401 expires the shared session before returning
    /// [`ApiError::Unauthorized`].
    async fn send(
        &self,
        endpoint: &'static str,
        request: RequestBuilder,
    ) -> Result<Response, ApiError> {
        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            self.session.expire();
            return Err(ApiError::Unauthorized { endpoint });
        }

        if !status.is_success() {
            return Err(ApiError::UnexpectedStatus {
                status: status.as_u16(),
                endpoint,
            });
        }

        Ok(response)
    }
}

/// Reads the body as text and deserializes it, keeping the endpoint as
/// context on failure.
async fn read_json<T: DeserializeOwned>(
    response: Response,
    endpoint: &'static str,
) -> Result<T, ApiError> {
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| ApiError::Deserialize {
        context: endpoint.to_owned(),
        source: e,
    })
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;

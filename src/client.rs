//! Backend REST API Client
//!
//! HTTP client for the Novarchism backend: token-based login, the
//! authenticated admin entry endpoints, and the public read endpoints.
//!
//! Every call is a single request/response cycle. Failures map onto a small
//! user-facing taxonomy and are never retried; a 401 reports an expired
//! session but deliberately leaves the stored token alone.

use reqwest::{Client, Request, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

use crate::config::ApiConfig;
use crate::form::{EntryForm, Mode};
use crate::model::{Entry, EntryCategory, EntryPayload};

/// Errors surfaced to the user by API operations.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Session expired. Please sign in again.")]
    SessionExpired,

    #[error("Unable to fetch entries")]
    Fetch,

    #[error("{detail}")]
    Save { detail: String },

    #[error("You must be signed in.")]
    NotSignedIn,

    #[error("Entry not found")]
    NotFound,

    #[error("Backend unavailable")]
    Unavailable,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// Client for the backend REST API.
pub struct AdminClient {
    http: Client,
    base_url: String,
    api_prefix: String,
}

impl AdminClient {
    /// Create a client from API configuration.
    pub fn new(config: &ApiConfig) -> Self {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_prefix: config.api_prefix.clone(),
        }
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, self.api_prefix, path)
    }

    /// Check that the backend is up via its unversioned health endpoint.
    pub async fn health(&self) -> Result<(), ApiError> {
        let url = format!("{}/health", self.base_url);
        let response = self.http.get(&url).send().await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(ApiError::Unavailable)
        }
    }

    fn login_request(&self, email: &str, password: &str) -> reqwest::Result<Request> {
        self.http
            .post(self.api_url("/auth/token"))
            .form(&[("username", email), ("password", password)])
            .build()
    }

    /// Exchange credentials for a bearer token.
    ///
    /// Any non-success status reads as bad credentials; the session is left
    /// untouched for the caller to update on success.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, ApiError> {
        let request = self.login_request(email, password)?;
        let response = self.http.execute(request).await?;

        if !response.status().is_success() {
            return Err(ApiError::InvalidCredentials);
        }

        #[derive(Deserialize)]
        struct TokenResponse {
            access_token: String,
        }

        let body: TokenResponse = response.json().await?;
        Ok(body.access_token)
    }

    fn entries_request(&self, token: &str) -> reqwest::Result<Request> {
        self.http
            .get(self.api_url("/admin/entries/"))
            .bearer_auth(token)
            .build()
    }

    /// Fetch the full admin entry list.
    pub async fn list_entries(&self, token: &str) -> Result<Vec<Entry>, ApiError> {
        let request = self.entries_request(token)?;
        let response = self.http.execute(request).await?;

        if !response.status().is_success() {
            return Err(list_failure(response.status()));
        }

        let entries: Vec<Entry> = response.json().await.map_err(|e| {
            tracing::warn!("entry list response did not parse: {e}");
            ApiError::Fetch
        })?;
        Ok(entries)
    }

    /// Create a new entry (POST to the collection endpoint).
    pub async fn create_entry(
        &self,
        token: &str,
        payload: &EntryPayload,
    ) -> Result<Entry, ApiError> {
        let response = self
            .http
            .post(self.api_url("/admin/entries/"))
            .bearer_auth(token)
            .json(payload)
            .send()
            .await?;

        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(save_failure(&body));
        }

        Ok(response.json().await?)
    }

    /// Update an existing entry (PUT to the item endpoint).
    pub async fn update_entry(
        &self,
        token: &str,
        id: Uuid,
        payload: &EntryPayload,
    ) -> Result<Entry, ApiError> {
        let response = self
            .http
            .put(self.api_url(&format!("/admin/entries/{id}")))
            .bearer_auth(token)
            .json(payload)
            .send()
            .await?;

        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(save_failure(&body));
        }

        Ok(response.json().await?)
    }

    /// Submit the editor form: create when new, update when editing.
    ///
    /// Fails locally, before any request is built, when no token is present.
    pub async fn submit(
        &self,
        token: Option<&str>,
        form: &EntryForm,
    ) -> Result<Entry, ApiError> {
        let token = token.ok_or(ApiError::NotSignedIn)?;
        let payload = form.payload();

        match form.mode {
            Mode::New => self.create_entry(token, &payload).await,
            Mode::Editing(id) => self.update_entry(token, id, &payload).await,
        }
    }

    /// Delete an entry.
    pub async fn delete_entry(&self, token: &str, id: Uuid) -> Result<(), ApiError> {
        let response = self
            .http
            .delete(self.api_url(&format!("/admin/entries/{id}")))
            .bearer_auth(token)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else if status == StatusCode::UNAUTHORIZED {
            Err(ApiError::SessionExpired)
        } else if status == StatusCode::NOT_FOUND {
            Err(ApiError::NotFound)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(save_failure(&body))
        }
    }

    /// Fetch published entries from the public endpoint, optionally filtered
    /// by category.
    pub async fn published_entries(
        &self,
        category: Option<EntryCategory>,
    ) -> Result<Vec<Entry>, ApiError> {
        let mut request = self.http.get(self.api_url("/entries/"));
        if let Some(category) = category {
            request = request.query(&[("category", category.as_str())]);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(ApiError::Fetch);
        }

        Ok(response.json().await.map_err(|_| ApiError::Fetch)?)
    }

    /// Fetch a single published entry by slug.
    pub async fn entry_by_slug(&self, slug: &str) -> Result<Entry, ApiError> {
        let path = format!("/entries/{}", urlencoding::encode(slug));
        let response = self.http.get(self.api_url(&path)).send().await?;

        let status = response.status();
        if status.is_success() {
            Ok(response.json().await?)
        } else if status == StatusCode::NOT_FOUND {
            Err(ApiError::NotFound)
        } else {
            Err(ApiError::Fetch)
        }
    }
}

/// Map a failed list fetch onto the error taxonomy. 401 means the token is
/// stale; the caller reports it without clearing the session.
fn list_failure(status: StatusCode) -> ApiError {
    if status == StatusCode::UNAUTHORIZED {
        ApiError::SessionExpired
    } else {
        ApiError::Fetch
    }
}

/// Build a save error from a failed response body, preferring the backend's
/// `detail` message when one is present.
fn save_failure(body: &str) -> ApiError {
    #[derive(Deserialize)]
    struct ErrorBody {
        detail: Option<String>,
    }

    let detail = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.detail)
        .unwrap_or_else(|| "Failed to save entry".to_string());

    ApiError::Save { detail }
}

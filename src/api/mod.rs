//! HTTP client wrapper for the Task Manager REST API.
//!
//! One method per endpoint, all carrying the session cookie via reqwest's
//! cookie store — the backend authenticates with an HTTP-only session
//! cookie set by login/signup, so no token handling happens here.
//!
//! Error mapping is uniform across every call: 401 becomes
//! [`ApiError::Unauthorized`] (the caller forces a logout), any other
//! non-success status becomes [`ApiError::Server`] with the backend's JSON
//! `message` when present.

pub mod models;

use anyhow::{Context, Result};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::errors::ApiError;
use models::{ApiMessage, LoginRequest, SessionUser, SignupRequest, Task, TaskDraft};

/// Client for `/api/v1/user/*` and `/api/v1/tasks*`.
///
/// Cheap to clone behind an `Arc`; the inner `reqwest::Client` pools
/// connections and owns the cookie jar for the life of the process.
#[derive(Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client against `base_url` (e.g. `http://localhost:3000`).
    pub fn new(base_url: &str) -> Result<Self> {
        reqwest::Url::parse(base_url)
            .with_context(|| format!("Invalid API base URL: {base_url}"))?;
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ── Auth endpoints ───────────────────────────────────────────────

    pub async fn login(&self, credentials: &LoginRequest) -> Result<SessionUser, ApiError> {
        let url = format!("{}/api/v1/user/login", self.base_url);
        tracing::debug!(%url, "POST login");
        let resp = self.http.post(&url).json(credentials).send().await?;
        Self::decode(resp).await
    }

    pub async fn signup(&self, details: &SignupRequest) -> Result<SessionUser, ApiError> {
        let url = format!("{}/api/v1/user/signup", self.base_url);
        tracing::debug!(%url, "POST signup");
        let resp = self.http.post(&url).json(details).send().await?;
        Self::decode(resp).await
    }

    pub async fn logout(&self) -> Result<(), ApiError> {
        let url = format!("{}/api/v1/user/logout", self.base_url);
        tracing::debug!(%url, "POST logout");
        let resp = self.http.post(&url).send().await?;
        Self::decode::<ApiMessage>(resp).await.map(|_| ())
    }

    // ── Task endpoints ───────────────────────────────────────────────

    pub async fn list_tasks(&self) -> Result<Vec<Task>, ApiError> {
        let url = format!("{}/api/v1/tasks", self.base_url);
        tracing::debug!(%url, "GET tasks");
        let resp = self.http.get(&url).send().await?;
        Self::decode(resp).await
    }

    pub async fn create_task(&self, draft: &TaskDraft) -> Result<Task, ApiError> {
        let url = format!("{}/api/v1/tasks", self.base_url);
        tracing::debug!(%url, "POST task");
        let resp = self.http.post(&url).json(draft).send().await?;
        Self::decode(resp).await
    }

    /// Send the full edited record; the server's copy is authoritative and
    /// replaces the cached one.
    pub async fn update_task(&self, task: &Task) -> Result<Task, ApiError> {
        let url = format!("{}/api/v1/tasks/{}", self.base_url, task.id);
        tracing::debug!(%url, "PUT task");
        let resp = self.http.put(&url).json(task).send().await?;
        Self::decode(resp).await
    }

    pub async fn delete_task(&self, id: &str) -> Result<(), ApiError> {
        let url = format!("{}/api/v1/tasks/{}", self.base_url, id);
        tracing::debug!(%url, "DELETE task");
        let resp = self.http.delete(&url).send().await?;
        Self::decode::<ApiMessage>(resp).await.map(|_| ())
    }

    /// Shared status handling for every endpoint.
    async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized);
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "API request failed");
            return Err(ApiError::from_status(status.as_u16(), &body));
        }
        Ok(resp.json::<T>().await?)
    }
}

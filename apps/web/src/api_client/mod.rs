//! Backend client: the single point of entry for every call to the content API.
//!
//! Sections and forms never build URLs or talk HTTP themselves; they go
//! through `ApiClient` so errors are classified the same way everywhere.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client};
use serde::{de::DeserializeOwned, Deserialize};
use thiserror::Error;
use tracing::debug;

use crate::models::{Feedback, Location, Milestone, Position, Settings, TeamMember};

pub const MILESTONES_PATH: &str = "/api/v1/milestones";
pub const TEAM_MEMBERS_PATH: &str = "/api/v1/team-members";
pub const POSITIONS_PATH: &str = "/api/v1/positions";
pub const LOCATIONS_PATH: &str = "/api/v1/locations";
pub const FEEDBACK_PATH: &str = "/api/v1/feedback";
pub const CONTACTS_PATH: &str = "/api/v1/contacts";
pub const ACQUISITIONS_PATH: &str = "/api/v1/acquisitions";

const INVALID_FORMAT: &str = "Invalid data format received from API";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Request failed with status {status}")]
    Status { status: u16, body: String },

    #[error("Malformed JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("{0}")]
    InvalidPayload(String),
}

/// `{ "success": bool, "data": T }` wrapper used by a few endpoints.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn into_data(self) -> Result<T, FetchError> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            _ => Err(FetchError::InvalidPayload(INVALID_FORMAT.to_string())),
        }
    }
}

#[derive(Debug, Deserialize)]
struct PositionsPayload {
    positions: Option<Vec<Position>>,
}

/// Anything that can deliver a JSON body to a backend collection.
/// Forms depend on this rather than on `ApiClient` directly.
#[async_trait]
pub trait JsonPoster: Send + Sync {
    async fn post_json(&self, path: &str, body: Vec<u8>) -> Result<(), FetchError>;
}

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, FetchError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GETs `path` and decodes the body. Non-2xx responses are errors even
    /// when the body is valid JSON.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let url = self.url(path);
        debug!("GET {url}");

        let response = self
            .client
            .get(&url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }

    pub async fn positions(&self) -> Result<Vec<Position>, FetchError> {
        let envelope: Envelope<PositionsPayload> = self.get_json(POSITIONS_PATH).await?;
        envelope
            .into_data()?
            .positions
            .ok_or_else(|| FetchError::InvalidPayload(INVALID_FORMAT.to_string()))
    }

    pub async fn locations(&self) -> Result<Vec<Location>, FetchError> {
        self.get_json(LOCATIONS_PATH).await
    }

    pub async fn feedback(&self) -> Result<Vec<Feedback>, FetchError> {
        self.get_json(FEEDBACK_PATH).await
    }

    pub async fn milestones(&self) -> Result<Vec<Milestone>, FetchError> {
        self.get_json(MILESTONES_PATH).await
    }

    pub async fn team_members(&self) -> Result<Vec<TeamMember>, FetchError> {
        self.get_json(TEAM_MEMBERS_PATH).await
    }

    pub async fn settings(&self, path: &str) -> Result<Settings, FetchError> {
        let envelope: Envelope<Settings> = self.get_json(path).await?;
        envelope.into_data()
    }
}

#[async_trait]
impl JsonPoster for ApiClient {
    async fn post_json(&self, path: &str, body: Vec<u8>) -> Result<(), FetchError> {
        let url = self.url(path);
        debug!("POST {url} ({} bytes)", body.len());

        let response = self
            .client
            .post(&url)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ACCEPT, "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}

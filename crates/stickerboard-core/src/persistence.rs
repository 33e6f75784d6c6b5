//! Types at the save/load boundary.

use crate::serialize::DesignPayload;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;
use uuid::Uuid;

/// Identifier assigned to a stored creation.
pub type CreationId = Uuid;

/// What a save submits: metadata, a rendered preview and the design itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveRequest {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Rendered preview of the canvas, usually a `data:` URL.
    pub data_url: String,
    pub design_data: DesignPayload,
    #[serde(default)]
    pub is_public: bool,
}

/// A save request missing a field every store requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidRequest {
    #[error("Invalid request: title is required")]
    MissingTitle,
    #[error("Invalid request: data_url is required")]
    MissingDataUrl,
}

impl SaveRequest {
    /// Check the fields a store requires, reporting the first one missing.
    pub fn validate(&self) -> Result<(), InvalidRequest> {
        if self.title.trim().is_empty() {
            return Err(InvalidRequest::MissingTitle);
        }
        if self.data_url.trim().is_empty() {
            return Err(InvalidRequest::MissingDataUrl);
        }
        Ok(())
    }
}

/// A creation as held by a store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredCreation {
    pub id: CreationId,
    pub author: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub data_url: String,
    /// Kept as raw JSON; it only becomes a document through `deserialize`.
    pub design_data: serde_json::Value,
    pub is_public: bool,
    pub like_count: u64,
    pub view_count: u64,
    /// Seconds since the Unix epoch.
    pub created_at: u64,
    pub updated_at: u64,
}

impl StoredCreation {
    /// Build a fresh record from a request, assigning id, counters and
    /// timestamps.
    pub fn from_request(
        author: impl Into<String>,
        request: SaveRequest,
    ) -> Result<Self, serde_json::Error> {
        let design_data = serde_json::to_value(&request.design_data)?;
        let now = unix_now();
        Ok(Self {
            id: Uuid::new_v4(),
            author: author.into(),
            title: request.title,
            description: request.description,
            data_url: request.data_url,
            design_data,
            is_public: request.is_public,
            like_count: 0,
            view_count: 0,
            created_at: now,
            updated_at: now,
        })
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

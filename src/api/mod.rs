//! Branding backend API.
//!
//! This module defines the `BrandingApi` trait the wizard talks to, the wire
//! types of its three endpoints, and an HTTP implementation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::types::BrandingRequest;

pub(crate) mod http;

pub use http::HttpBrandingApi;

/// Errors returned by a branding backend.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("failed to encode request: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

/// Response of the prepare step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrepareResponse {
    pub commit_hash: String,
}

/// Body of the complete step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletePayload {
    /// Hex-encoded signature of the commit hash.
    pub signature: String,
    pub commit_hash: String,
}

/// Response of the complete step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteResponse {
    pub pull_request_url: String,
}

/// Response of the single-step submit used when editing an existing listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    #[serde(default)]
    pub message: String,
    pub pull_request_url: String,
    #[serde(default)]
    pub commit_hash: String,
    #[serde(default)]
    pub signature: String,
}

/// The backend operations the branding wizard depends on.
///
/// Implementations must not retry on their own; a failed call is reported to
/// the wizard, which leaves its state unchanged.
#[async_trait]
pub trait BrandingApi: Send + Sync {
    /// Upload metadata and logos; returns the commit to be signed.
    async fn prepare(&self, request: &BrandingRequest) -> Result<PrepareResponse, ApiError>;

    /// Finalize a prepared commit with the owner's signature.
    async fn complete(
        &self,
        token_id: &str,
        payload: &CompletePayload,
    ) -> Result<CompleteResponse, ApiError>;

    /// Upload metadata and logos and open the pull request in one call.
    async fn submit(&self, request: &BrandingRequest) -> Result<SubmitResponse, ApiError>;
}

//! Portal port: the two JSON endpoints the assistant submits to.
//!
//! Field names are the wire format; the portal speaks snake_case, so no
//! serde renames here.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ── Wire shapes ──────────────────────────────────────────────────────────────

/// Body of `POST /auth/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Always "patient" for assistant-driven sign-in.
    pub role: String,
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    /// Credentials submitted in the patient role.
    #[must_use]
    pub fn patient(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            role: "patient".to_string(),
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Response of `POST /auth/login`.
///
/// The portal answers with this shape on both success and failure (failed
/// credentials come back as HTTP 4xx with `success: false`), so every field
/// except `success` is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub success: bool,
    /// Path to open after a successful sign-in.
    #[serde(default)]
    pub redirect: Option<String>,
    /// Human-readable failure reason.
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of `POST /patient/book-detox`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub centre_id: String,
    /// Plan identifier from the fixed catalog, e.g. "weight_loss_short".
    pub plan_type: String,
    /// Start date as `YYYY-MM-DD`.
    pub start_date: String,
}

/// Response of `POST /patient/book-detox`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

// ── Error ────────────────────────────────────────────────────────────────────

/// Failures of the portal transport, not of the portal's answer.
///
/// A reachable portal that refuses credentials is a `success: false`
/// response, not an error; flows retry the next password candidate on it.
/// These variants mean the request itself never produced a usable answer.
#[derive(Debug, Error)]
pub enum PortalError {
    /// The request could not be sent or no response arrived.
    #[error("Portal unreachable: {0}")]
    Network(String),

    /// The response body was not the expected JSON shape.
    #[error("Invalid portal response: {0}")]
    InvalidResponse(String),

    /// The configured portal base URL does not parse.
    #[error("Invalid portal base URL: {0}")]
    InvalidBaseUrl(String),
}

// ── Port ─────────────────────────────────────────────────────────────────────

/// Client for the portal's authentication and booking endpoints.
#[async_trait]
pub trait PortalClient: Send + Sync {
    /// Submits one credential pair. A `success: false` answer is `Ok`.
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, PortalError>;

    /// Submits a detox booking. A refused booking is `Ok` with
    /// `success: false`.
    async fn book_detox(&self, request: &BookingRequest) -> Result<BookingResponse, PortalError>;
}

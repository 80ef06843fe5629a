//! HTTP backend abstraction for the portal endpoints.
//!
//! The portal reports refused operations in the response body, sometimes
//! under a 4xx status, so the backend parses the body as JSON regardless of
//! HTTP status. The trait exists for dependency injection; tests swap in a
//! fake that serves canned JSON.

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;
use vaani_core::PortalError;

use crate::config::PortalConfig;

// ── Backend trait ────────────────────────────────────────────────────────────

/// Trait for HTTP backends that POST JSON and parse the JSON answer.
///
/// This is an implementation detail - external code should use the
/// `PortalClient` trait.
#[async_trait]
pub trait HttpBackend: Send + Sync {
    /// POST `body` as JSON and deserialize the response body, whatever the
    /// response status was.
    async fn post_json<B: Serialize + Sync, T: DeserializeOwned + Send>(
        &self,
        url: &Url,
        body: &B,
    ) -> Result<T, PortalError>;
}

// ── Reqwest backend ──────────────────────────────────────────────────────────

/// Production HTTP backend using reqwest.
///
/// No retry logic: credential and booking submissions must not be replayed
/// behind the caller's back, and the flows already re-prompt on failure.
pub struct ReqwestBackend {
    client: reqwest::Client,
}

impl ReqwestBackend {
    /// Create a new reqwest backend with the given configuration.
    pub fn new(config: &PortalConfig) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .build()
            .expect("failed to create HTTP client");

        Self { client }
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn post_json<B: Serialize + Sync, T: DeserializeOwned + Send>(
        &self,
        url: &Url,
        body: &B,
    ) -> Result<T, PortalError> {
        let response = self
            .client
            .post(url.as_str())
            .json(body)
            .send()
            .await
            .map_err(|e| PortalError::Network(e.to_string()))?;

        // A refused login or booking arrives as a JSON body under a 4xx
        // status, so the status is not checked here.
        response
            .json()
            .await
            .map_err(|e| PortalError::InvalidResponse(e.to_string()))
    }
}

// ── Fake backend for testing ─────────────────────────────────────────────────

//! Portal client over an injectable HTTP backend.

use async_trait::async_trait;
use url::Url;
use vaani_core::{
    BookingRequest, BookingResponse, LoginRequest, LoginResponse, PortalClient, PortalError, paths,
};

use crate::config::PortalConfig;
use crate::http::{HttpBackend, ReqwestBackend};

/// The production portal client, backed by reqwest.
pub type DefaultPortalClient = PortalHttpClient<ReqwestBackend>;

/// Client for the care portal's JSON endpoints, generic over the transport.
pub struct PortalHttpClient<B: HttpBackend> {
    backend: B,
    base: Url,
}

impl DefaultPortalClient {
    /// Create a client for the portal at `config.base_url`.
    pub fn new(config: &PortalConfig) -> Result<Self, PortalError> {
        let base = parse_base(&config.base_url)?;
        Ok(Self {
            backend: ReqwestBackend::new(config),
            base,
        })
    }
}

impl<B: HttpBackend> PortalHttpClient<B> {
    /// Create a client with a custom HTTP backend (for testing).
    #[cfg(test)]
    pub(crate) const fn with_backend(backend: B, base: Url) -> Self {
        Self { backend, base }
    }

    fn endpoint(&self, path: &str) -> Result<Url, PortalError> {
        self.base
            .join(path)
            .map_err(|e| PortalError::InvalidBaseUrl(e.to_string()))
    }
}

fn parse_base(base_url: &str) -> Result<Url, PortalError> {
    Url::parse(base_url).map_err(|e| PortalError::InvalidBaseUrl(e.to_string()))
}

#[async_trait]
impl<B: HttpBackend> PortalClient for PortalHttpClient<B> {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, PortalError> {
        let url = self.endpoint(paths::LOGIN)?;
        self.backend.post_json(&url, request).await
    }

    async fn book_detox(&self, request: &BookingRequest) -> Result<BookingResponse, PortalError> {
        let url = self.endpoint(paths::BOOK_DETOX)?;
        self.backend.post_json(&url, request).await
    }
}

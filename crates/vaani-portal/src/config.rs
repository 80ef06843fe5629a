//! Public configuration for the portal client.

use std::time::Duration;

/// Configuration for the care-portal client.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use vaani_portal::PortalConfig;
///
/// let config = PortalConfig::new()
///     .with_base_url("https://portal.niramaya.example")
///     .with_timeout(Duration::from_secs(10));
/// ```
#[derive(Debug, Clone)]
pub struct PortalConfig {
    /// Origin the portal is served from, without a trailing path.
    pub(crate) base_url: String,
    /// User agent string for HTTP requests
    pub(crate) user_agent: String,
    /// Request timeout
    pub(crate) timeout: Duration,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            // The development portal listens on 5001.
            base_url: "http://localhost:5001".to_string(),
            user_agent: concat!("vaani-portal/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl PortalConfig {
    /// Create a new configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the portal origin. Paths like `/auth/login` are joined onto it.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the user agent string for HTTP requests.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the request timeout.
    ///
    /// Defaults to 30 seconds.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

//! Request signing for the Fusion Tables API.
//!
//! A client either signs its own requests with an API key, or sends them
//! unsigned to a proxy that signs them on its behalf.

use crate::models::QueryParams;

/// Default API root used when no proxy is configured.
pub const DEFAULT_API_ROOT: &str = "https://www.googleapis.com/";

/// How requests reach the API.
///
/// # Examples
///
/// ```rust
/// use fusiontables_link::AuthMode;
///
/// // Sign requests directly with an API key
/// let auth = AuthMode::api_key("AIza...");
/// assert!(auth.key().is_some());
///
/// // Let a trusted proxy sign requests
/// let auth = AuthMode::proxy("https://proxy.example.com/");
/// assert!(auth.is_proxy());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthMode {
    /// Requests carry `key=<api key>`
    ApiKey(String),

    /// Requests are sent to a proxy base URL which signs them
    Proxy(String),
}

impl AuthMode {
    pub fn api_key(key: impl Into<String>) -> Self {
        Self::ApiKey(key.into())
    }

    pub fn proxy(base_url: impl Into<String>) -> Self {
        Self::Proxy(base_url.into())
    }

    /// The API key, if requests are signed by the client
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::ApiKey(key) => Some(key),
            Self::Proxy(_) => None,
        }
    }

    /// The proxy base URL, if one is configured
    pub fn proxy_base(&self) -> Option<&str> {
        match self {
            Self::Proxy(base) => Some(base),
            Self::ApiKey(_) => None,
        }
    }

    pub fn is_proxy(&self) -> bool {
        matches!(self, Self::Proxy(_))
    }

    /// Base URI requests are resolved against when none is set explicitly
    pub fn default_base_uri(&self) -> &str {
        self.proxy_base().unwrap_or(DEFAULT_API_ROOT)
    }

    /// Sign a parameter set: adds `key=<api key>` when one is configured
    pub fn apply_to_params(&self, params: &mut QueryParams) {
        if let Some(key) = self.key() {
            params.set("key", key);
        }
    }
}

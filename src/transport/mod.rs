//! Transport strategies for reaching the API.
//!
//! Three interchangeable mechanisms perform the same GET round trip:
//!
//! - [`Transport::DirectJson`]: plain JSON request, used whenever a proxy is
//!   configured since the proxy accepts unrestricted requests
//! - [`Transport::Server`]: server-side HTTP request, used when the host has
//!   a native HTTP client
//! - [`Transport::CallbackScript`]: callback-script loading (JSONP), which
//!   needs no server cooperation at the cost of a fixed timeout and a
//!   process-wide callback registry
//!
//! The strategy is picked per request by [`Transport::select`].

mod callback;
mod direct;
mod registry;
mod server;

pub use callback::{parse_callback_script, CALLBACK_PREFIX};
pub use registry::{CallbackGuard, CallbackRegistry};

use serde_json::Value as JsonValue;
use std::fmt;

use crate::auth::AuthMode;
use crate::error::Result;
use crate::timeouts::FusionTablesTimeouts;

/// What the host environment can do, probed once when a client is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostCapabilities {
    /// A native (server-side) HTTP client is available
    pub server_http: bool,
}

impl HostCapabilities {
    /// Probe the current target.
    ///
    /// Every native target has a server-side HTTP client; wasm does not.
    pub fn detect() -> Self {
        Self {
            server_http: cfg!(not(target_arch = "wasm32")),
        }
    }

    /// A browser-like host without a server-side HTTP client
    pub fn browser() -> Self {
        Self { server_http: false }
    }

    /// A host with a server-side HTTP client
    pub fn server() -> Self {
        Self { server_http: true }
    }
}

impl Default for HostCapabilities {
    fn default() -> Self {
        Self::detect()
    }
}

/// One mechanism for performing the request round trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    DirectJson,
    Server,
    CallbackScript,
}

impl Transport {
    /// Pick a strategy, in fixed priority order: proxy, server, callback.
    pub fn select(auth: &AuthMode, capabilities: &HostCapabilities) -> Self {
        if auth.is_proxy() {
            Self::DirectJson
        } else if capabilities.server_http {
            Self::Server
        } else {
            Self::CallbackScript
        }
    }

    /// Perform the GET and return the decoded JSON body.
    ///
    /// Resolves exactly once, with either the payload or an error.
    pub async fn fetch(
        &self,
        http_client: &reqwest::Client,
        url: reqwest::Url,
        timeouts: &FusionTablesTimeouts,
    ) -> Result<JsonValue> {
        match self {
            Self::DirectJson => direct::fetch(http_client, url).await,
            Self::Server => server::fetch(http_client, url).await,
            Self::CallbackScript => {
                callback::fetch(
                    CallbackRegistry::global(),
                    http_client,
                    url,
                    timeouts.callback_timeout,
                )
                .await
            }
        }
    }
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::DirectJson => "direct-json",
            Self::Server => "server",
            Self::CallbackScript => "callback-script",
        };
        f.write_str(name)
    }
}

//! Request dispatch: endpoint URLs, request signing, cache flags, and
//! transport invocation.

use log::{debug, warn};
use serde_json::Value as JsonValue;
use std::time::Instant;

use crate::{
    auth::AuthMode,
    error::{FusionTablesError, Result},
    models::QueryParams,
    timeouts::FusionTablesTimeouts,
    transport::{HostCapabilities, Transport},
};

/// Path of the v1 API below the base URI
pub const API_PATH: &str = "fusiontables/v1/";

/// Sends endpoint requests through the transport the host supports.
#[derive(Debug, Clone)]
pub struct RequestDispatcher {
    base_uri: String,
    http_client: reqwest::Client,
    auth: AuthMode,
    capabilities: HostCapabilities,
    cache_default: bool,
    timeouts: FusionTablesTimeouts,
}

impl RequestDispatcher {
    pub(crate) fn new(
        base_uri: String,
        http_client: reqwest::Client,
        auth: AuthMode,
        capabilities: HostCapabilities,
        cache_default: bool,
        timeouts: FusionTablesTimeouts,
    ) -> Self {
        Self {
            base_uri,
            http_client,
            auth,
            capabilities,
            cache_default,
            timeouts,
        }
    }

    /// Fully qualified URL of an endpoint, with `params` as the query string
    ///
    /// ```rust
    /// # fn main() -> fusiontables_link::Result<()> {
    /// use fusiontables_link::{FusionTablesClient, models::QueryParams};
    ///
    /// let client = FusionTablesClient::builder()
    ///     .table_id("T")
    ///     .api_key("k")
    ///     .build()?;
    /// let url = client.dispatcher().endpoint_url("tables/T/columns", &QueryParams::new())?;
    /// assert_eq!(url.as_str(), "https://www.googleapis.com/fusiontables/v1/tables/T/columns");
    /// # Ok(())
    /// # }
    /// ```
    pub fn endpoint_url(&self, endpoint: &str, params: &QueryParams) -> Result<reqwest::Url> {
        let raw = format!("{}{}{}", self.base_uri, API_PATH, endpoint);
        let mut url = reqwest::Url::parse(&raw).map_err(|e| {
            FusionTablesError::ConfigurationError(format!("Invalid endpoint URL '{}': {}", raw, e))
        })?;
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params.iter());
            // Form encoding turns spaces into `+`; literal pluses are already `%2B`.
            let query = url.query().map(|q| q.replace('+', "%20"));
            url.set_query(query.as_deref());
        }
        Ok(url)
    }

    /// Transport used for the next request
    pub fn transport(&self) -> Transport {
        Transport::select(&self.auth, &self.capabilities)
    }

    /// Apply signing and cache policy to a parameter set.
    ///
    /// The per-call `cache` flag overrides the client default. With a proxy,
    /// a cached request carries `cache=true` and no key, since the proxy
    /// signs what it caches. Without one the flag has no effect and is
    /// dropped with a warning.
    pub fn prepare_params(&self, mut params: QueryParams, cache: Option<bool>) -> QueryParams {
        self.auth.apply_to_params(&mut params);

        if cache.unwrap_or(self.cache_default) {
            if self.auth.is_proxy() {
                params.remove("key");
                params.set("cache", "true");
            } else {
                warn!(
                    "[FT_QUERY] The cache parameter has no effect on direct Fusion Tables API requests."
                );
            }
        }
        params
    }

    /// Request an endpoint and run the response through `parser`.
    ///
    /// A parser failure is the request's error.
    pub async fn api_request<T, P>(
        &self,
        endpoint: &str,
        params: QueryParams,
        parser: P,
        cache: Option<bool>,
    ) -> Result<T>
    where
        P: FnOnce(JsonValue) -> Result<T>,
    {
        let params = self.prepare_params(params, cache);
        let url = self.endpoint_url(endpoint, &params)?;
        let transport = self.transport();

        debug!(
            "[FT_QUERY] Dispatching {} via {} transport",
            endpoint, transport
        );
        let start = Instant::now();

        let raw = match transport.fetch(&self.http_client, url, &self.timeouts).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(
                    "[FT_QUERY] Request to {} failed: {} duration_ms={}",
                    endpoint,
                    e,
                    start.elapsed().as_millis()
                );
                return Err(e);
            }
        };

        let parsed = parser(raw);
        match &parsed {
            Ok(_) => debug!(
                "[FT_QUERY] Success: endpoint={} total_ms={}",
                endpoint,
                start.elapsed().as_millis()
            ),
            Err(e) => warn!("[FT_QUERY] Response from {} rejected: {}", endpoint, e),
        }
        parsed
    }
}

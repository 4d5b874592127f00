//! Direct JSON request, suited to a trusted proxy.

use log::{debug, warn};
use serde_json::Value as JsonValue;
use std::time::Instant;

use crate::error::{FusionTablesError, Result};

pub(super) async fn fetch(http_client: &reqwest::Client, url: reqwest::Url) -> Result<JsonValue> {
    let start = Instant::now();
    debug!("[FT_HTTP] direct GET {}", url);

    let response = http_client
        .get(url)
        .header(reqwest::header::ACCEPT, "application/json")
        .send()
        .await?;

    let status = response.status();
    debug!(
        "[FT_HTTP] direct response status={} duration_ms={}",
        status,
        start.elapsed().as_millis()
    );

    // Anything below 400 carries a usable body, redirects included.
    if status.as_u16() >= 200 && status.as_u16() < 400 {
        Ok(response.json::<JsonValue>().await?)
    } else {
        let status_text = status
            .canonical_reason()
            .map(str::to_string)
            .unwrap_or_else(|| status.to_string());
        warn!("[FT_HTTP] direct request failed: {}", status_text);
        Err(FusionTablesError::TransportNetwork(status_text))
    }
}

//! Server-side HTTP request.

use log::{debug, warn};
use serde_json::Value as JsonValue;
use std::time::Instant;

use crate::error::{FusionTablesError, Result};

const USER_AGENT: &str = concat!("fusiontables-link/", env!("CARGO_PKG_VERSION"));

pub(super) async fn fetch(http_client: &reqwest::Client, url: reqwest::Url) -> Result<JsonValue> {
    let start = Instant::now();
    debug!("[FT_HTTP] server GET {}", url);

    let response = http_client
        .get(url)
        .header(reqwest::header::USER_AGENT, USER_AGENT)
        .send()
        .await?;

    let status = response.status();
    let body = response.text().await?;
    debug!(
        "[FT_HTTP] server response status={} bytes={} duration_ms={}",
        status,
        body.len(),
        start.elapsed().as_millis()
    );

    if !status.is_success() {
        let message = status
            .canonical_reason()
            .map(str::to_string)
            .unwrap_or_else(|| body.clone());
        warn!(
            "[FT_HTTP] server error: status={} message=\"{}\"",
            status, message
        );
        return Err(FusionTablesError::ServerError {
            status_code: status.as_u16(),
            message,
        });
    }

    Ok(serde_json::from_str(&body)?)
}

//! Callback-script (JSONP) transport.
//!
//! The request URL gets a `callback=<name>` parameter and the server answers
//! with a script invoking that name with the payload, e.g.
//! `ft_1a2b({"kind": ...});`. The script is loaded on its own task and
//! evaluated by firing the matching entry in the [`CallbackRegistry`]; the
//! request itself only waits for the callback, bounded by a timeout.

use log::{debug, warn};
use serde_json::Value as JsonValue;
use std::time::Duration;
use tokio::task::JoinHandle;

use super::registry::CallbackRegistry;
use crate::error::{FusionTablesError, Result};
use crate::timeouts::FusionTablesTimeouts;

/// Prefix of generated callback names
pub const CALLBACK_PREFIX: &str = "ft_";

pub(super) async fn fetch(
    registry: &'static CallbackRegistry,
    http_client: &reqwest::Client,
    mut url: reqwest::Url,
    timeout: Duration,
) -> Result<JsonValue> {
    let (guard, rx) = registry.register();
    url.query_pairs_mut().append_pair("callback", guard.name());
    debug!("[FT_CALLBACK] loading script {} as {}", url, guard.name());

    let loader = AbortOnDrop(tokio::spawn(load_script(
        registry,
        http_client.clone(),
        url.clone(),
    )));

    let outcome = if FusionTablesTimeouts::is_no_timeout(timeout) {
        Ok(rx.await)
    } else {
        tokio::time::timeout(timeout, rx).await
    };
    drop(loader);
    drop(guard);

    match outcome {
        Ok(Ok(payload)) => Ok(payload),
        Ok(Err(_)) => Err(FusionTablesError::InternalError(format!(
            "callback for {} was dropped before firing",
            url
        ))),
        Err(_) => {
            warn!(
                "[FT_CALLBACK] request to {} timed out after {}ms",
                url,
                timeout.as_millis()
            );
            Err(FusionTablesError::TransportTimeout(format!(
                "callback request to {} timed out after {}ms",
                url,
                timeout.as_millis()
            )))
        }
    }
}

/// Aborts the script loader once the request is over, including when the
/// request future is dropped mid-flight.
struct AbortOnDrop(JoinHandle<()>);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// Load and evaluate the callback script.
///
/// Like a failed script tag, a load error or an unexpected body never fires
/// the callback; the request then ends through its timeout.
async fn load_script(
    registry: &'static CallbackRegistry,
    http_client: reqwest::Client,
    url: reqwest::Url,
) {
    let body = match http_client.get(url.clone()).send().await {
        Ok(response) => match response.text().await {
            Ok(body) => body,
            Err(e) => {
                debug!("[FT_CALLBACK] failed to read script {}: {}", url, e);
                return;
            }
        },
        Err(e) => {
            debug!("[FT_CALLBACK] failed to load script {}: {}", url, e);
            return;
        }
    };

    match parse_callback_script(&body) {
        Some((name, payload)) => {
            if !registry.invoke(&name, payload) {
                debug!("[FT_CALLBACK] no pending callback named {}", name);
            }
        }
        None => debug!("[FT_CALLBACK] script from {} is not a callback invocation", url),
    }
}

/// Split a `name(payload);` script into the callback name and JSON payload.
///
/// Leading `//` comment lines (the API prefixes `// API callback`) and a
/// trailing semicolon are allowed.
///
/// ```rust
/// use fusiontables_link::transport::parse_callback_script;
/// use serde_json::json;
///
/// let (name, payload) = parse_callback_script("// API callback\nft_42({\"a\": 1});").unwrap();
/// assert_eq!(name, "ft_42");
/// assert_eq!(payload, json!({"a": 1}));
/// ```
pub fn parse_callback_script(script: &str) -> Option<(String, JsonValue)> {
    let code: String = script
        .lines()
        .filter(|line| !line.trim_start().starts_with("//"))
        .collect::<Vec<_>>()
        .join("\n");
    let code = code.trim();
    let code = code.strip_suffix(';').unwrap_or(code).trim_end();

    let open = code.find('(')?;
    let name = code[..open].trim();
    let is_identifier = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$' || c == '.');
    if !is_identifier {
        return None;
    }

    let args = code[open + 1..].strip_suffix(')')?;
    let payload = serde_json::from_str(args.trim()).ok()?;
    Some((name.to_string(), payload))
}

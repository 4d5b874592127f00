use serde::{Deserialize, Serialize};

use crate::auth::AuthMode;
use crate::error::{FusionTablesError, Result};

/// Loose construction options, as accepted from JSON.
///
/// Field names follow the options record the JavaScript client takes, so a
/// configuration written for it deserializes unchanged:
///
/// ```rust
/// use fusiontables_link::TableOptions;
///
/// let options: TableOptions = serde_json::from_str(
///     r#"{"tableId": "1e7y6mtqv8", "key": "AIza", "columns": ["Product"]}"#,
/// ).unwrap();
/// let config = options.into_config().unwrap();
/// assert_eq!(config.table_id(), "1e7y6mtqv8");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_id: Option<String>,

    /// API key used to sign requests
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    /// Base URL of a proxy that signs requests
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy: Option<String>,

    #[serde(default)]
    pub columns: Vec<String>,

    /// Explicit base URI; defaults to the proxy or the public API root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,

    #[serde(default)]
    pub cache: bool,
}

impl TableOptions {
    /// Validate the options into an immutable [`ClientConfig`]
    pub fn into_config(self) -> Result<ClientConfig> {
        let table_id = self
            .table_id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| {
                FusionTablesError::ConfigurationError(
                    "A Fusion Tables Table ID is required.".into(),
                )
            })?;

        let key = self.key.filter(|k| !k.is_empty());
        let proxy = self.proxy.filter(|p| !p.is_empty());
        let auth = match (key, proxy) {
            (Some(key), None) => AuthMode::ApiKey(key),
            (None, Some(proxy)) => AuthMode::Proxy(proxy),
            (None, None) => {
                return Err(FusionTablesError::ConfigurationError(
                    "Either an API key or a URL to a proxy that will sign your requests is required."
                        .into(),
                ))
            }
            (Some(_), Some(_)) => {
                return Err(FusionTablesError::ConfigurationError(
                    "Configure either an API key or a proxy, not both.".into(),
                ))
            }
        };

        let base_uri = normalize_base_uri(
            self.uri
                .filter(|u| !u.is_empty())
                .as_deref()
                .unwrap_or_else(|| auth.default_base_uri()),
        );
        reqwest::Url::parse(&base_uri).map_err(|e| {
            FusionTablesError::ConfigurationError(format!("Invalid base URI '{}': {}", base_uri, e))
        })?;

        Ok(ClientConfig {
            table_id,
            auth,
            columns: self.columns,
            base_uri,
            cache: self.cache,
        })
    }
}

/// Validated, immutable client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    table_id: String,
    auth: AuthMode,
    columns: Vec<String>,
    base_uri: String,
    cache: bool,
}

impl ClientConfig {
    pub fn table_id(&self) -> &str {
        &self.table_id
    }

    pub fn auth(&self) -> &AuthMode {
        &self.auth
    }

    /// Default select list; empty means every column
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Base URI, always ending with `/`
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Whether requests ask the proxy cache by default
    pub fn cache(&self) -> bool {
        self.cache
    }
}

fn normalize_base_uri(uri: &str) -> String {
    if uri.ends_with('/') {
        uri.to_string()
    } else {
        format!("{}/", uri)
    }
}

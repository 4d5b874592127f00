use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// A parsed table row: column name to scalar, in wire column order.
///
/// The `rowid` column, when selected, always holds an integer.
pub type Row = serde_json::Map<String, JsonValue>;

/// Payload shapes the API answers with, identified by their `kind` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    /// Row-oriented result of the `query` endpoint
    SqlResponse,
    /// Result of the `tables/<id>/columns` endpoint
    ColumnList,
}

impl ResponseKind {
    /// Fully qualified marker, e.g. `fusiontables#sqlresponse`
    pub fn marker(&self) -> &'static str {
        match self {
            Self::SqlResponse => "fusiontables#sqlresponse",
            Self::ColumnList => "fusiontables#columnList",
        }
    }

    /// Marker without the `fusiontables#` namespace
    pub fn short_name(&self) -> &'static str {
        match self {
            Self::SqlResponse => "sqlresponse",
            Self::ColumnList => "columnList",
        }
    }

    /// Whether a `kind` value names this payload shape
    pub fn matches(&self, kind: &str) -> bool {
        kind == self.marker() || kind == self.short_name()
    }
}

/// Raw row-oriented response of the query endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SqlResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Column names, positionally matching each row's values
    #[serde(default)]
    pub columns: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<Vec<Vec<JsonValue>>>,
}

/// Raw response of the columns endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnList {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    pub items: Vec<ColumnInfo>,
}

/// Column metadata entry of a column list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnInfo {
    pub name: String,

    #[serde(rename = "columnId", default, skip_serializing_if = "Option::is_none")]
    pub column_id: Option<u64>,

    /// Declared type (STRING, NUMBER, DATETIME, LOCATION)
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub column_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

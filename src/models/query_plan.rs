use serde::{Deserialize, Serialize};

use super::query_params::QueryParams;

/// SQL statement plus the fixed protocol flags sent to the query endpoint.
///
/// `typed` asks the API for typed values and `hdrs` suppresses the header
/// row; neither is configurable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryPlan {
    pub sql: String,
    pub typed: bool,
    pub hdrs: bool,
}

impl QueryPlan {
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            typed: true,
            hdrs: false,
        }
    }

    /// Query-string parameters for the `query` endpoint, in wire order
    pub fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.set("sql", self.sql.as_str());
        params.set("typed", self.typed.to_string());
        params.set("hdrs", self.hdrs.to_string());
        params
    }
}

//! Data models for fusiontables-link.
//!
//! Defines the query inputs, the request parameter set, client
//! configuration, and the raw and parsed shapes of API responses.

pub mod client_config;
pub mod query_params;
pub mod query_plan;
pub mod request_options;
pub mod table_response;
pub mod where_clause;


pub use client_config::{ClientConfig, TableOptions};
pub use query_params::QueryParams;
pub use query_plan::QueryPlan;
pub use request_options::RequestOptions;
pub use table_response::{ColumnInfo, ColumnList, ResponseKind, Row, SqlResponse};
pub use where_clause::{WhereClause, WhereValue};

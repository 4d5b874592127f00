//! # fusiontables-link: Fusion Tables Client Library
//!
//! A read-only client for a single Fusion Tables table. It composes
//! SELECT / WHERE / LIMIT statements, sends them through whichever transport
//! the host supports, and parses the tabular JSON responses into rows.
//!
//! ## Features
//!
//! - **Query Building**: SELECT / WHERE / LIMIT composition with `ROWID`
//!   always selected
//! - **Transports**: direct JSON (proxy), server-side HTTP, or callback
//!   script loading, picked by capability
//! - **Parsing**: rows with integer `rowid`, column lists, response-kind
//!   validation
//! - **Proxy Cache**: per-request or default cache flag for proxied requests
//! - **Data Binding**: read-only adapter for model/collection layers
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fusiontables_link::{FusionTablesClient, RequestOptions, WhereClause};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = FusionTablesClient::builder()
//!         .table_id("1e7y6mtqv8")
//!         .api_key("YOUR_API_KEY")
//!         .columns(["Product", "Inventory"])
//!         .build()?;
//!
//!     let columns = client.fetch_columns(&RequestOptions::default()).await?;
//!     println!("Columns: {:?}", columns);
//!
//!     let low_stock = WhereClause::new("Inventory", 100).with_operator("<");
//!     let rows = client
//!         .fetch_rows(Some(&low_stock), &RequestOptions::new().with_limit(20))
//!         .await?;
//!     println!("Rows: {:?}", rows);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Proxy
//!
//! ```rust,no_run
//! use fusiontables_link::FusionTablesClient;
//!
//! # fn example() -> fusiontables_link::Result<()> {
//! // Requests go to the proxy, which signs (and optionally caches) them
//! let client = FusionTablesClient::builder()
//!     .table_id("1e7y6mtqv8")
//!     .proxy("https://proxy.example.com/")
//!     .cache(true)
//!     .build()?;
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod binding;
pub mod client;
pub mod dispatch;
pub mod error;
pub mod models;
pub mod parsers;
pub mod query;
pub mod timeouts;
pub mod transport;

// Re-export main types for convenience
pub use auth::AuthMode;
pub use binding::{ReadOnlyBinding, SyncMethod, SyncOutcome, SyncTarget};
pub use client::{FusionTablesClient, FusionTablesClientBuilder};
pub use error::{FusionTablesError, Result};
pub use models::{
    ClientConfig, QueryParams, QueryPlan, RequestOptions, Row, TableOptions, WhereClause,
    WhereValue,
};
pub use timeouts::FusionTablesTimeouts;
pub use transport::{HostCapabilities, Transport};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

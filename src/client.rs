//! Main Fusion Tables client with builder pattern.
//!
//! Binds one table and exposes the read operations: a single row, a row
//! set, the column list, and raw SQL.

use serde_json::Value as JsonValue;

use crate::{
    auth::AuthMode,
    dispatch::RequestDispatcher,
    error::{FusionTablesError, Result},
    models::{ClientConfig, QueryParams, QueryPlan, RequestOptions, Row, TableOptions, WhereClause},
    parsers::{column_parser, row_parser, rows_parser},
    query,
    timeouts::FusionTablesTimeouts,
    transport::{HostCapabilities, Transport},
};

/// Read-only client for one Fusion Tables table.
///
/// Use [`FusionTablesClientBuilder`] to construct instances.
///
/// # Examples
///
/// ```rust,no_run
/// use fusiontables_link::{FusionTablesClient, RequestOptions, WhereClause};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = FusionTablesClient::builder()
///     .table_id("1e7y6mtqv8")
///     .api_key("YOUR_API_KEY")
///     .columns(["Product", "Inventory"])
///     .build()?;
///
/// let row = client
///     .fetch_row(Some(&WhereClause::new("ROWID", 201)), &RequestOptions::default())
///     .await?;
/// println!("Row: {:?}", row);
///
/// let rows = client
///     .fetch_rows(None, &RequestOptions::new().with_limit(10))
///     .await?;
/// println!("Rows: {:?}", rows);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct FusionTablesClient {
    config: ClientConfig,
    dispatcher: RequestDispatcher,
    timeouts: FusionTablesTimeouts,
}

impl FusionTablesClient {
    /// Create a new builder for configuring the client
    pub fn builder() -> FusionTablesClientBuilder {
        FusionTablesClientBuilder::new()
    }

    /// Build a client straight from loose options
    pub fn from_options(options: TableOptions) -> Result<Self> {
        Self::builder().options(options).build()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the configured timeouts
    pub fn timeouts(&self) -> &FusionTablesTimeouts {
        &self.timeouts
    }

    pub fn dispatcher(&self) -> &RequestDispatcher {
        &self.dispatcher
    }

    /// Transport requests currently go through
    pub fn transport(&self) -> Transport {
        self.dispatcher.transport()
    }

    /// SELECT statement for this table; `None` uses the default columns
    pub fn sql_select(&self, columns: Option<&[String]>) -> String {
        query::sql_select(
            self.config.table_id(),
            columns.unwrap_or(self.config.columns()),
        )
    }

    /// Query plan for this table and its default columns
    pub fn sql_query(
        &self,
        where_clause: Option<&WhereClause>,
        limit: Option<u64>,
        columns: Option<&[String]>,
    ) -> Result<QueryPlan> {
        query::sql_query(
            self.config.table_id(),
            self.config.columns(),
            where_clause,
            limit,
            columns,
        )
    }

    /// Fetch the single row matching `where_clause`.
    ///
    /// Fails with [`FusionTablesError::MissingWhereClause`] before any
    /// request when no clause is given.
    pub async fn fetch_row(
        &self,
        where_clause: Option<&WhereClause>,
        options: &RequestOptions,
    ) -> Result<Option<Row>> {
        self.fetch_row_with(where_clause, options, row_parser).await
    }

    /// [`fetch_row`](Self::fetch_row) with a custom response parser
    pub async fn fetch_row_with<T, P>(
        &self,
        where_clause: Option<&WhereClause>,
        options: &RequestOptions,
        parser: P,
    ) -> Result<T>
    where
        P: FnOnce(JsonValue) -> Result<T>,
    {
        let where_clause = where_clause.ok_or(FusionTablesError::MissingWhereClause)?;
        let plan = self.sql_query(Some(where_clause), Some(1), options.columns.as_deref())?;
        self.run_plan(plan, options, parser).await
    }

    /// Fetch the rows matching `where_clause`, or the whole table.
    pub async fn fetch_rows(
        &self,
        where_clause: Option<&WhereClause>,
        options: &RequestOptions,
    ) -> Result<Option<Vec<Row>>> {
        self.fetch_rows_with(where_clause, options, rows_parser).await
    }

    /// [`fetch_rows`](Self::fetch_rows) with a custom response parser
    pub async fn fetch_rows_with<T, P>(
        &self,
        where_clause: Option<&WhereClause>,
        options: &RequestOptions,
        parser: P,
    ) -> Result<T>
    where
        P: FnOnce(JsonValue) -> Result<T>,
    {
        let plan = self.sql_query(where_clause, options.limit, options.columns.as_deref())?;
        self.run_plan(plan, options, parser).await
    }

    /// Fetch the names of all columns in the table
    pub async fn fetch_columns(&self, options: &RequestOptions) -> Result<Vec<String>> {
        self.fetch_columns_with(options, column_parser).await
    }

    /// [`fetch_columns`](Self::fetch_columns) with a custom response parser
    pub async fn fetch_columns_with<T, P>(&self, options: &RequestOptions, parser: P) -> Result<T>
    where
        P: FnOnce(JsonValue) -> Result<T>,
    {
        let endpoint = format!("tables/{}/columns", self.config.table_id());
        self.dispatcher
            .api_request(&endpoint, QueryParams::new(), parser, options.cache)
            .await
    }

    /// Send caller-written SQL verbatim.
    ///
    /// Nothing is validated or escaped; the statement is the caller's
    /// responsibility.
    pub async fn raw_query(
        &self,
        sql: &str,
        options: &RequestOptions,
    ) -> Result<Option<Vec<Row>>> {
        self.raw_query_with(sql, options, rows_parser).await
    }

    /// [`raw_query`](Self::raw_query) with a custom response parser
    pub async fn raw_query_with<T, P>(
        &self,
        sql: &str,
        options: &RequestOptions,
        parser: P,
    ) -> Result<T>
    where
        P: FnOnce(JsonValue) -> Result<T>,
    {
        self.run_plan(QueryPlan::new(sql), options, parser).await
    }

    async fn run_plan<T, P>(&self, plan: QueryPlan, options: &RequestOptions, parser: P) -> Result<T>
    where
        P: FnOnce(JsonValue) -> Result<T>,
    {
        log::debug!("[FT_CLIENT] sql=\"{}\"", plan.sql);
        self.dispatcher
            .api_request("query", plan.to_params(), parser, options.cache)
            .await
    }
}

/// Builder for configuring [`FusionTablesClient`] instances.
pub struct FusionTablesClientBuilder {
    options: TableOptions,
    timeouts: FusionTablesTimeouts,
    capabilities: HostCapabilities,
}

impl FusionTablesClientBuilder {
    fn new() -> Self {
        Self {
            options: TableOptions::default(),
            timeouts: FusionTablesTimeouts::default(),
            capabilities: HostCapabilities::detect(),
        }
    }

    /// Start from loose options, e.g. deserialized from JSON
    pub fn options(mut self, options: TableOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the table every request reads from
    pub fn table_id(mut self, table_id: impl Into<String>) -> Self {
        self.options.table_id = Some(table_id.into());
        self
    }

    /// Sign requests with an API key
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.options.key = Some(key.into());
        self
    }

    /// Send requests to a proxy that signs them
    pub fn proxy(mut self, base_url: impl Into<String>) -> Self {
        self.options.proxy = Some(base_url.into());
        self
    }

    /// Set the signing mode directly
    pub fn auth(mut self, auth: AuthMode) -> Self {
        match auth {
            AuthMode::ApiKey(key) => {
                self.options.key = Some(key);
                self.options.proxy = None;
            }
            AuthMode::Proxy(base) => {
                self.options.proxy = Some(base);
                self.options.key = None;
            }
        }
        self
    }

    /// Default select list; empty selects every column
    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Override the base URI requests are resolved against
    pub fn base_uri(mut self, uri: impl Into<String>) -> Self {
        self.options.uri = Some(uri.into());
        self
    }

    /// Ask the proxy cache by default
    pub fn cache(mut self, cache: bool) -> Self {
        self.options.cache = cache;
        self
    }

    pub fn timeouts(mut self, timeouts: FusionTablesTimeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    /// Override the probed host capabilities
    pub fn capabilities(mut self, capabilities: HostCapabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Build the client
    pub fn build(self) -> Result<FusionTablesClient> {
        let config = self.options.into_config()?;

        let mut client_builder = reqwest::Client::builder()
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(std::time::Duration::from_secs(90));
        if !FusionTablesTimeouts::is_no_timeout(self.timeouts.connection_timeout) {
            client_builder = client_builder.connect_timeout(self.timeouts.connection_timeout);
        }
        if !FusionTablesTimeouts::is_no_timeout(self.timeouts.receive_timeout) {
            client_builder = client_builder.timeout(self.timeouts.receive_timeout);
        }
        let http_client = client_builder
            .build()
            .map_err(|e| FusionTablesError::ConfigurationError(e.to_string()))?;

        let dispatcher = RequestDispatcher::new(
            config.base_uri().to_string(),
            http_client,
            config.auth().clone(),
            self.capabilities,
            config.cache(),
            self.timeouts.clone(),
        );
        log::debug!(
            "[FT_CLIENT] table={} base_uri={} transport={}",
            config.table_id(),
            config.base_uri(),
            dispatcher.transport()
        );

        Ok(FusionTablesClient {
            config,
            dispatcher,
            timeouts: self.timeouts,
        })
    }
}

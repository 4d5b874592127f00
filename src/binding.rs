//! Read-only data binding for model/collection layers.
//!
//! Lets a model layer use a [`FusionTablesClient`] as its persistence
//! backend. Reads of an identified record become a single-row lookup on the
//! id attribute, reads of anything else become a row-set fetch. Every other
//! operation fails immediately.

use crate::{
    client::FusionTablesClient,
    error::{FusionTablesError, Result},
    models::{RequestOptions, Row, WhereClause, WhereValue},
};

/// Persistence operation requested by the model layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncMethod {
    Create,
    Read,
    Update,
    Patch,
    Delete,
}

impl SyncMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Read => "read",
            Self::Update => "update",
            Self::Patch => "patch",
            Self::Delete => "delete",
        }
    }
}

/// What is being synced
#[derive(Debug, Clone, PartialEq)]
pub enum SyncTarget {
    /// A single model; read by `id_attribute = id` once it has an id
    Model {
        id_attribute: String,
        id: Option<WhereValue>,
        options: RequestOptions,
    },
    /// A collection, optionally filtered
    Collection {
        where_clause: Option<WhereClause>,
        options: RequestOptions,
    },
}

/// Result handed back to the model layer
#[derive(Debug, Clone, PartialEq)]
pub enum SyncOutcome {
    Model(Option<Row>),
    Collection(Option<Vec<Row>>),
}

/// Read-only adapter over a table client
///
/// ```rust,no_run
/// use fusiontables_link::{FusionTablesClient, RequestOptions};
/// use fusiontables_link::binding::{ReadOnlyBinding, SyncMethod, SyncTarget};
///
/// # async fn example() -> fusiontables_link::Result<()> {
/// let client = FusionTablesClient::builder()
///     .table_id("T")
///     .api_key("k")
///     .columns(["Product", "Inventory"])
///     .build()?;
/// let binding = ReadOnlyBinding::new(&client);
///
/// let outcome = binding
///     .sync(
///         SyncMethod::Read,
///         &SyncTarget::Model {
///             id_attribute: "ROWID".into(),
///             id: Some(201.into()),
///             options: RequestOptions::default(),
///         },
///     )
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ReadOnlyBinding<'a> {
    client: &'a FusionTablesClient,
}

impl<'a> ReadOnlyBinding<'a> {
    pub fn new(client: &'a FusionTablesClient) -> Self {
        Self { client }
    }

    /// Route one persistence operation to the client.
    pub async fn sync(&self, method: SyncMethod, target: &SyncTarget) -> Result<SyncOutcome> {
        if method != SyncMethod::Read {
            return Err(FusionTablesError::ReadOnly(format!(
                "The table binding is read-only; '{}' is not supported.",
                method.as_str()
            )));
        }
        self.ensure_columns()?;

        match target {
            SyncTarget::Model {
                id_attribute,
                id: Some(id),
                options,
            } => {
                let where_clause = WhereClause::new(id_attribute.as_str(), id.clone());
                let row = self.client.fetch_row(Some(&where_clause), options).await?;
                Ok(SyncOutcome::Model(row))
            }
            SyncTarget::Model {
                id: None, options, ..
            } => {
                let rows = self.client.fetch_rows(None, options).await?;
                Ok(SyncOutcome::Collection(rows))
            }
            SyncTarget::Collection {
                where_clause,
                options,
            } => {
                let rows = self
                    .client
                    .fetch_rows(where_clause.as_ref(), options)
                    .await?;
                Ok(SyncOutcome::Collection(rows))
            }
        }
    }

    fn ensure_columns(&self) -> Result<()> {
        let columns = self.client.config().columns();
        let bare_wildcard = columns.len() == 1 && columns[0] == "*";
        if columns.is_empty() || bare_wildcard {
            return Err(FusionTablesError::ConfigurationError(
                "The table binding needs an explicit list of default columns.".into(),
            ));
        }
        Ok(())
    }
}

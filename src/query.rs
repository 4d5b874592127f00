//! SQL statement assembly for the query endpoint.
//!
//! Only SELECT / WHERE / LIMIT composition is supported. Values are
//! interpolated verbatim: nothing here quotes or escapes caller input, so
//! where-clause values must come from trusted sources.

use crate::error::{FusionTablesError, Result};
use crate::models::{QueryPlan, WhereClause};

/// Identity column appended to every non-wildcard select list
pub const ROWID_COLUMN: &str = "ROWID";

const WILDCARD: &str = "*";

/// Resolve the select list for a query.
///
/// Returns a new list: `["*"]` is kept as is, anything else gets `ROWID`
/// appended unless it is already present. Applying it twice is a no-op.
pub fn select_columns(columns: &[String]) -> Vec<String> {
    let mut cols = columns.to_vec();
    let is_wildcard = cols.len() == 1 && cols[0] == WILDCARD;
    if !is_wildcard && !cols.iter().any(|c| c == ROWID_COLUMN) {
        cols.push(ROWID_COLUMN.to_string());
    }
    cols
}

/// `SELECT <columns>, ROWID FROM <table>`
pub fn sql_select(table_id: &str, columns: &[String]) -> String {
    format!(
        "SELECT {} FROM {}",
        select_columns(columns).join(", "),
        table_id
    )
}

/// `WHERE <column> <operator> <value>`
///
/// Fails when the column or the value is missing. Presence is what counts:
/// `0`, `false` and the empty string are all valid values.
pub fn sql_where(clause: &WhereClause) -> Result<String> {
    match (&clause.column, &clause.value) {
        (Some(column), Some(value)) => {
            Ok(format!("WHERE {} {} {}", column, clause.operator(), value))
        }
        _ => Err(FusionTablesError::InvalidQuery(
            "The column and value properties are required in the where object.".into(),
        )),
    }
}

/// `LIMIT <n>`; fails unless `limit` is a finite number
pub fn sql_limit(limit: f64) -> Result<String> {
    if !limit.is_finite() {
        return Err(FusionTablesError::InvalidQuery(format!(
            "The limit must be a finite number, got {}",
            limit
        )));
    }
    if limit.fract() == 0.0 && limit.abs() < 1e15 {
        Ok(format!("LIMIT {}", limit as i64))
    } else {
        Ok(format!("LIMIT {}", limit))
    }
}

/// `LIMIT <n>` for an integer row cap, rendered exactly
pub fn sql_limit_rows(limit: u64) -> String {
    format!("LIMIT {}", limit)
}

/// Compose a full statement and wrap it into a [`QueryPlan`].
///
/// `columns` falls back to `default_columns` when `None`.
///
/// ```rust
/// use fusiontables_link::{query::sql_query, WhereClause};
///
/// let where_clause = WhereClause::new("column3", 5).with_operator(">");
/// let plan = sql_query("T", &[], Some(&where_clause), None, None).unwrap();
/// assert_eq!(plan.sql, "SELECT ROWID FROM T WHERE column3 > 5");
/// assert!(plan.typed);
/// assert!(!plan.hdrs);
/// ```
pub fn sql_query(
    table_id: &str,
    default_columns: &[String],
    where_clause: Option<&WhereClause>,
    limit: Option<u64>,
    columns: Option<&[String]>,
) -> Result<QueryPlan> {
    let mut parts = vec![sql_select(table_id, columns.unwrap_or(default_columns))];
    if let Some(clause) = where_clause {
        parts.push(sql_where(clause)?);
    }
    if let Some(limit) = limit {
        parts.push(sql_limit_rows(limit));
    }
    Ok(QueryPlan::new(parts.join(" ")))
}

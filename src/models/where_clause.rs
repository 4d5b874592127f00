use serde::{Deserialize, Serialize};
use std::fmt;

/// Scalar compared against a column in a WHERE clause.
///
/// Rendered verbatim into the SQL text: strings are not quoted or escaped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WhereValue {
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for WhereValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{}", b),
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for WhereValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for WhereValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for WhereValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for WhereValue {
    fn from(value: i32) -> Self {
        Self::Number(value.into())
    }
}

impl From<i64> for WhereValue {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<u64> for WhereValue {
    fn from(value: u64) -> Self {
        Self::Number(value.into())
    }
}

impl From<f64> for WhereValue {
    fn from(value: f64) -> Self {
        serde_json::Number::from_f64(value)
            .map(Self::Number)
            .unwrap_or_else(|| Self::Text(value.to_string()))
    }
}

/// A single `WHERE <column> <operator> <value>` condition.
///
/// Column and value are optional so that clauses deserialized from loose
/// input can be validated by the query builder, which rejects a clause
/// missing either of them.
///
/// # Example
///
/// ```rust
/// use fusiontables_link::WhereClause;
///
/// let clause = WhereClause::new("Inventory", 100).with_operator(">");
/// assert_eq!(clause.operator(), ">");
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WhereClause {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<WhereValue>,

    /// SQL comparison operator; `=` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
}

impl WhereClause {
    /// Create an equality condition
    pub fn new(column: impl Into<String>, value: impl Into<WhereValue>) -> Self {
        Self {
            column: Some(column.into()),
            value: Some(value.into()),
            operator: None,
        }
    }

    pub fn with_operator(mut self, operator: impl Into<String>) -> Self {
        self.operator = Some(operator.into());
        self
    }

    /// Effective operator, defaulting to `=` when unset or empty
    pub fn operator(&self) -> &str {
        match self.operator.as_deref() {
            Some(op) if !op.is_empty() => op,
            _ => "=",
        }
    }
}

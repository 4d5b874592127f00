//! Parsers turning raw API payloads into rows and column names.
//!
//! Each parser first checks the payload's `kind` marker when one is present,
//! then deserializes the expected shape. A missing `kind` is accepted.

use serde_json::Value as JsonValue;

use crate::error::{FusionTablesError, Result};
use crate::models::{ColumnList, ResponseKind, Row, SqlResponse};

/// Column whose values are converted to integer identifiers
pub const ROWID_KEY: &str = "rowid";

/// Parse a query response into rows. `None` when there are no rows.
///
/// ```rust
/// use fusiontables_link::parsers::rows_parser;
/// use serde_json::json;
///
/// let rows = rows_parser(json!({
///     "kind": "fusiontables#sqlresponse",
///     "columns": ["rowid", "Product"],
///     "rows": [["201", "Black Shoes"]]
/// })).unwrap().unwrap();
/// assert_eq!(rows[0]["rowid"], json!(201));
/// ```
pub fn rows_parser(raw: JsonValue) -> Result<Option<Vec<Row>>> {
    let response = sql_response(raw)?;
    let Some(rows) = response.rows.filter(|rows| !rows.is_empty()) else {
        return Ok(None);
    };

    let mut parsed = Vec::with_capacity(rows.len());
    for row in rows {
        parsed.push(zip_row(&response.columns, row)?);
    }
    Ok(Some(parsed))
}

/// Parse a query response into its first row. `None` when there are no rows.
pub fn row_parser(raw: JsonValue) -> Result<Option<Row>> {
    let response = sql_response(raw)?;
    match response.rows.and_then(|rows| rows.into_iter().next()) {
        Some(first) => zip_row(&response.columns, first).map(Some),
        None => Ok(None),
    }
}

/// Parse a column-list response into the column names, in table order.
pub fn column_parser(raw: JsonValue) -> Result<Vec<String>> {
    check_kind(&raw, ResponseKind::ColumnList)?;
    let list: ColumnList = serde_json::from_value(raw)?;
    Ok(list.items.into_iter().map(|item| item.name).collect())
}

/// Fail when `kind` is present and does not name `expected`
pub fn check_kind(raw: &JsonValue, expected: ResponseKind) -> Result<()> {
    let Some(kind) = raw.get("kind") else {
        return Ok(());
    };
    let matches = kind.as_str().map(|k| expected.matches(k)).unwrap_or(false);
    if matches {
        Ok(())
    } else {
        Err(FusionTablesError::UnexpectedResponseKind {
            expected: expected.marker().to_string(),
            actual: kind.as_str().map(str::to_string).unwrap_or_else(|| kind.to_string()),
        })
    }
}

fn sql_response(raw: JsonValue) -> Result<SqlResponse> {
    check_kind(&raw, ResponseKind::SqlResponse)?;
    Ok(serde_json::from_value(raw)?)
}

fn zip_row(columns: &[String], values: Vec<JsonValue>) -> Result<Row> {
    let mut row = Row::with_capacity(columns.len());
    for (column, value) in columns.iter().zip(values) {
        let value = if column == ROWID_KEY {
            JsonValue::from(parse_row_id(&value)?)
        } else {
            value
        };
        row.insert(column.clone(), value);
    }
    Ok(row)
}

/// Base-10 integer from a wire `rowid`.
///
/// Strings are read like a lenient integer parse: leading whitespace, an
/// optional sign, then digits up to the first non-digit. Numbers are
/// truncated.
pub fn parse_row_id(value: &JsonValue) -> Result<i64> {
    match value {
        JsonValue::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
            .ok_or_else(|| FusionTablesError::ParseError(format!("Invalid rowid: {}", n))),
        JsonValue::String(s) => parse_leading_int(s)
            .ok_or_else(|| FusionTablesError::ParseError(format!("Invalid rowid: '{}'", s))),
        other => Err(FusionTablesError::ParseError(format!(
            "Invalid rowid: {}",
            other
        ))),
    }
}

fn parse_leading_int(s: &str) -> Option<i64> {
    let trimmed = s.trim_start();
    let sign_len = match trimmed.as_bytes().first() {
        Some(b'-') | Some(b'+') => 1,
        _ => 0,
    };
    let end = trimmed[sign_len..]
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(trimmed.len() - sign_len);
    if end == 0 {
        return None;
    }
    trimmed[..sign_len + end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sql_fixture() -> JsonValue {
        json!({
            "kind": "sqlresponse",
            "columns": ["rowid", "Product", "Inventory"],
            "rows": [
                ["1", "Amber Bead", "1251500558"],
                ["201", "Black Shoes", "356"],
                ["401", "White Shoes", "100"]
            ]
        })
    }

    fn column_fixture() -> JsonValue {
        json!({
            "kind": "fusiontables#columnList",
            "items": [
                {"kind": "fusiontables#column", "columnId": 0, "name": "Mammal Type", "type": "STRING"},
                {"kind": "fusiontables#column", "columnId": 1, "name": "Group Size", "type": "NUMBER"},
                {"kind": "fusiontables#column", "columnId": 2, "name": "Year 1st Tracked", "type": "DATETIME"}
            ]
        })
    }

    #[test]
    fn test_rows_parser_fixture() {
        let rows = rows_parser(sql_fixture()).unwrap().unwrap();
        let as_values: Vec<JsonValue> = rows.into_iter().map(JsonValue::Object).collect();
        assert_eq!(
            as_values,
            vec![
                json!({"rowid": 1, "Product": "Amber Bead", "Inventory": "1251500558"}),
                json!({"rowid": 201, "Product": "Black Shoes", "Inventory": "356"}),
                json!({"rowid": 401, "Product": "White Shoes", "Inventory": "100"}),
            ]
        );
    }

    #[test]
    fn test_rows_parser_preserves_column_order() {
        let rows = rows_parser(sql_fixture()).unwrap().unwrap();
        let keys: Vec<&String> = rows[0].keys().collect();
        assert_eq!(keys, vec!["rowid", "Product", "Inventory"]);
    }

    #[test]
    fn test_row_parser_first_row() {
        let row = row_parser(sql_fixture()).unwrap().unwrap();
        assert_eq!(
            JsonValue::Object(row),
            json!({"rowid": 1, "Product": "Amber Bead", "Inventory": "1251500558"})
        );
    }

    #[test]
    fn test_empty_or_missing_rows_is_none() {
        let empty = json!({"kind": "fusiontables#sqlresponse", "columns": ["rowid"], "rows": []});
        assert!(rows_parser(empty.clone()).unwrap().is_none());
        assert!(row_parser(empty).unwrap().is_none());

        let missing = json!({"kind": "fusiontables#sqlresponse", "columns": ["rowid"]});
        assert!(rows_parser(missing.clone()).unwrap().is_none());
        assert!(row_parser(missing).unwrap().is_none());
    }

    #[test]
    fn test_missing_kind_accepted() {
        let raw = json!({"columns": ["Product"], "rows": [["Amber Bead"]]});
        let rows = rows_parser(raw).unwrap().unwrap();
        assert_eq!(rows[0]["Product"], json!("Amber Bead"));

        let raw = json!({"items": [{"name": "Product"}]});
        assert_eq!(column_parser(raw).unwrap(), vec!["Product".to_string()]);
    }

    #[test]
    fn test_mismatched_kind_rejected() {
        let err = rows_parser(column_fixture()).unwrap_err();
        assert!(matches!(err, FusionTablesError::UnexpectedResponseKind { .. }));

        let err = row_parser(column_fixture()).unwrap_err();
        assert!(matches!(err, FusionTablesError::UnexpectedResponseKind { .. }));

        let err = column_parser(sql_fixture()).unwrap_err();
        match err {
            FusionTablesError::UnexpectedResponseKind { expected, actual } => {
                assert_eq!(expected, "fusiontables#columnList");
                assert_eq!(actual, "sqlresponse");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_column_parser_fixture() {
        assert_eq!(
            column_parser(column_fixture()).unwrap(),
            vec!["Mammal Type", "Group Size", "Year 1st Tracked"]
        );
        let short = json!({"kind": "columnList", "items": [{"name": "Mammal Type"}]});
        assert_eq!(column_parser(short).unwrap(), vec!["Mammal Type"]);
    }

    #[test]
    fn test_column_parser_requires_items() {
        let err = column_parser(json!({"kind": "fusiontables#columnList"})).unwrap_err();
        assert!(matches!(err, FusionTablesError::SerializationError(_)));
    }

    #[test]
    fn test_uppercase_rowid_not_converted() {
        let raw = json!({"columns": ["ROWID"], "rows": [["7"]]});
        let rows = rows_parser(raw).unwrap().unwrap();
        assert_eq!(rows[0]["ROWID"], json!("7"));
    }

    #[test]
    fn test_parse_row_id() {
        assert_eq!(parse_row_id(&json!("401")).unwrap(), 401);
        assert_eq!(parse_row_id(&json!("  12abc")).unwrap(), 12);
        assert_eq!(parse_row_id(&json!("-3")).unwrap(), -3);
        assert_eq!(parse_row_id(&json!(55)).unwrap(), 55);
        assert_eq!(parse_row_id(&json!(5.9)).unwrap(), 5);
        assert!(parse_row_id(&json!("abc")).is_err());
        assert!(parse_row_id(&json!(null)).is_err());
    }

    #[test]
    fn test_parse_row_id_extremes() {
        assert_eq!(parse_row_id(&json!("-9223372036854775808")).unwrap(), i64::MIN);
        assert_eq!(parse_row_id(&json!("9223372036854775807")).unwrap(), i64::MAX);
        assert_eq!(parse_row_id(&json!("+7 rows")).unwrap(), 7);
        assert!(parse_row_id(&json!("9223372036854775808")).is_err());
        assert!(parse_row_id(&json!("-")).is_err());
    }
}

//! Schema-free observation tables.
//!
//! Column sets differ per catalog and per query, so rows are ordered
//! mappings of column name to a small [`Value`] variant rather than fixed
//! records. All rows of a table share one column list.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// A single cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Integer(i64),
    Float(f64),
    Text(String),
}

impl Value {
    /// Normalized identifier form of this cell.
    ///
    /// Index building and lookup matching both go through here, so an
    /// identifier is in the index if and only if some row yields it.
    pub fn as_identifier(&self) -> Option<String> {
        let text = match self {
            Value::Null => return None,
            Value::Text(s) => s.trim().to_string(),
            other => other.to_string(),
        };
        if text.is_empty() { None } else { Some(text) }
    }

    /// Parse free text, preferring integer, then float, then text.
    /// Blank input is `Null`. Fortran `D` exponents are accepted.
    pub fn parse_loose(raw: &str) -> Value {
        let s = raw.trim();
        if s.is_empty() {
            return Value::Null;
        }
        if let Ok(i) = s.parse::<i64>() {
            return Value::Integer(i);
        }
        if looks_numeric(s) {
            if let Ok(f) = s.replace(['D', 'd'], "e").parse::<f64>() {
                return Value::Float(f);
            }
        }
        Value::Text(s.to_string())
    }
}

/// Guards float parsing against words like "inf" or "NaN" in text columns.
fn looks_numeric(s: &str) -> bool {
    s.chars().next().is_some_and(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.'))
        && s.chars().all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E' | 'd' | 'D'))
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_none(),
            Value::Integer(i) => serializer.serialize_i64(*i),
            // JSON has no NaN/inf
            Value::Float(x) if !x.is_finite() => serializer.serialize_none(),
            Value::Float(x) => serializer.serialize_f64(*x),
            Value::Text(s) => serializer.serialize_str(s),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

/// One row, positionally aligned with its table's columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    columns: Arc<[String]>,
    values: Vec<Value>,
}

impl Row {
    pub fn get(&self, column: &str) -> Option<&Value> {
        let idx = self.columns.iter().position(|c| c == column)?;
        self.values.get(idx)
    }

    pub fn value_at(&self, idx: usize) -> Option<&Value> {
        self.values.get(idx)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.columns.iter().map(String::as_str).zip(self.values.iter())
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (column, value) in self.iter() {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}

/// Ordered rows of named columns, as returned by an upstream query.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationTable {
    columns: Arc<[String]>,
    rows: Vec<Row>,
}

impl ObservationTable {
    pub fn empty() -> Self {
        Self { columns: Arc::from(Vec::new()), rows: Vec::new() }
    }

    /// Build a table from raw value rows. Short rows are padded with `Null`,
    /// long rows truncated to the column count.
    pub fn new(columns: Vec<String>, raw_rows: Vec<Vec<Value>>) -> Self {
        let columns: Arc<[String]> = Arc::from(columns);
        let width = columns.len();
        let rows = raw_rows
            .into_iter()
            .map(|mut values| {
                values.resize(width, Value::Null);
                Row { columns: columns.clone(), values }
            })
            .collect();
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }
}

/// Serializes as a JSON array of row objects.
impl Serialize for ObservationTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.rows)
    }
}

impl Default for ObservationTable {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_identifier_trims_and_skips_blank() {
        assert_eq!(Value::from("  J0030+0451 \t").as_identifier(), Some("J0030+0451".to_string()));
        assert_eq!(Value::from("   ").as_identifier(), None);
        assert_eq!(Value::Null.as_identifier(), None);
        assert_eq!(Value::Integer(1050).as_identifier(), Some("1050".to_string()));
    }

    #[test]
    fn test_parse_loose_types() {
        assert_eq!(Value::parse_loose("42"), Value::Integer(42));
        assert_eq!(Value::parse_loose("-1.5e-3"), Value::Float(-1.5e-3));
        assert_eq!(Value::parse_loose("3.2D-15"), Value::Float(3.2e-15));
        assert_eq!(Value::parse_loose("00:02:58.17"), Value::Text("00:02:58.17".to_string()));
        assert_eq!(Value::parse_loose("J0002+6216"), Value::Text("J0002+6216".to_string()));
        assert_eq!(Value::parse_loose("NaN"), Value::Text("NaN".to_string()));
        assert_eq!(Value::parse_loose(""), Value::Null);
    }

    #[test]
    fn test_non_finite_float_serializes_as_null() {
        let json = serde_json::to_string(&vec![Value::Float(f64::NAN), Value::Float(1.5)]).unwrap();
        assert_eq!(json, "[null,1.5]");
    }

    #[test]
    fn test_row_serializes_in_column_order() {
        let table = ObservationTable::new(
            cols(&["obsid", "name", "exposure"]),
            vec![vec![Value::from("1050"), Value::from("PSR J0030+0451"), Value::Float(1200.0)]],
        );
        let json = serde_json::to_string(&table.rows()[0]).unwrap();
        assert_eq!(json, r#"{"obsid":"1050","name":"PSR J0030+0451","exposure":1200.0}"#);
    }

    #[test]
    fn test_short_rows_are_padded() {
        let table = ObservationTable::new(cols(&["a", "b"]), vec![vec![Value::Integer(1)]]);
        assert_eq!(table.rows()[0].get("b"), Some(&Value::Null));
        assert_eq!(table.column_index("b"), Some(1));
        assert!(table.rows()[0].get("c").is_none());
    }

    #[test]
    fn test_empty_table() {
        let table = ObservationTable::empty();
        assert!(table.is_empty());
        assert_eq!(table.len(), 0);
        assert!(table.columns().is_empty());
    }
}

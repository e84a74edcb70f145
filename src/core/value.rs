//! Loosely-typed cell values as they arrive from an uploaded table.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One observation: column name to raw cell value.
///
/// A column missing from the map is treated exactly like [`CellValue::Null`].
pub type Row = HashMap<String, CellValue>;

/// A single cell of an ingested table.
///
/// Deserializes untagged, so JSON records such as
/// `{"price": 12.5, "rooms": "3", "area": null}` map directly onto a [`Row`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Already-numeric value.
    Number(f64),
    /// Text that may or may not hold a number.
    Text(String),
    /// Empty cell.
    #[default]
    Null,
}

impl CellValue {
    /// Coerce the cell to a finite `f64`.
    ///
    /// Numbers pass through when finite. Text is trimmed and parsed as a
    /// plain decimal (`.` separator, optional exponent); the whole string
    /// must parse and the result must be finite. Empty text, `"NaN"`,
    /// `"inf"` and anything else unparseable yield `None`, as does `Null`.
    pub fn as_finite(&self) -> Option<f64> {
        match self {
            CellValue::Number(v) => v.is_finite().then_some(*v),
            CellValue::Text(s) => parse_decimal(s),
            CellValue::Null => None,
        }
    }

    /// Returns true for `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

/// Strict decimal parse used for text cells.
fn parse_decimal(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    // `f64::from_str` also accepts "inf", "infinity" and "nan"; the finiteness
    // check below rejects all of them.
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Number(v)
    }
}

impl From<i64> for CellValue {
    fn from(v: i64) -> Self {
        CellValue::Number(v as f64)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(CellValue::Null, Into::into)
    }
}

/// Look up `column` in `row` and coerce it; absent columns yield `None`.
pub fn coerce_cell(row: &Row, column: &str) -> Option<f64> {
    row.get(column).and_then(CellValue::as_finite)
}

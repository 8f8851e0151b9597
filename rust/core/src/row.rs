// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Spreadsheet row records.
//!
//! A [`Row`] maps column names (taken from the header row of the sheet) to
//! cell values. Rows are immutable once loaded; a [`RowSet`] shares them
//! behind an `Arc` so panels and server handlers can hand the same set around
//! without copying it.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// A single cell value as read from a worksheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Bool(bool),
    Text(String),
}

impl CellValue {
    /// Creates a text cell.
    pub fn text(value: impl Into<String>) -> Self {
        CellValue::Text(value.into())
    }

    /// Renders the cell as display text.
    ///
    /// Integral numbers are printed without a fractional part, so a GUID or
    /// id column typed as a number in the sheet still compares as `"42"`.
    pub fn as_text(&self) -> String {
        match self {
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => format_number(*n),
            CellValue::Bool(b) => b.to_string(),
        }
    }

    /// Numeric view of the cell. Text is parsed after trimming.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(s) => s.trim().parse().ok(),
            CellValue::Bool(_) => None,
        }
    }

    /// True for an empty text cell.
    pub fn is_blank(&self) -> bool {
        matches!(self, CellValue::Text(s) if s.is_empty())
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// How the loader fills cells that are empty in the sheet.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingCellPolicy {
    /// Leave the column out of the row entirely.
    #[default]
    Omit,
    /// Insert this value for every empty cell under a known header.
    Default(CellValue),
}

impl MissingCellPolicy {
    /// Fill empty cells with an empty string.
    pub fn empty_string() -> Self {
        MissingCellPolicy::Default(CellValue::Text(String::new()))
    }

    /// Value to store for an empty cell, if any.
    pub fn fill(&self) -> Option<CellValue> {
        match self {
            MissingCellPolicy::Omit => None,
            MissingCellPolicy::Default(value) => Some(value.clone()),
        }
    }
}

/// One spreadsheet row: column name to cell value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    cells: FxHashMap<String, CellValue>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a cell, replacing any previous value for the column.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<CellValue>) {
        self.cells.insert(column.into(), value.into());
    }

    /// Builder-style [`Row::insert`].
    pub fn with(mut self, column: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.insert(column, value);
        self
    }

    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.cells.get(column)
    }

    /// Display text of a cell, `None` when the column is absent.
    pub fn text(&self, column: &str) -> Option<String> {
        self.cells.get(column).map(CellValue::as_text)
    }

    /// Display text of a cell, empty when the column is absent.
    pub fn text_or_empty(&self, column: &str) -> String {
        self.text(column).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.keys().map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<CellValue>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (k, v) in iter {
            row.insert(k, v);
        }
        row
    }
}

/// An ordered, immutable, shared collection of rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowSet {
    rows: Arc<Vec<Row>>,
}

impl RowSet {
    pub fn new(rows: Vec<Row>) -> Self {
        Self {
            rows: Arc::new(rows),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }

    pub fn as_slice(&self) -> &[Row] {
        &self.rows
    }

    /// First row whose `column` text equals `value` exactly.
    pub fn find_exact(&self, column: &str, value: &str) -> Option<&Row> {
        self.rows
            .iter()
            .find(|row| row.get(column).is_some_and(|cell| cell.as_text() == value))
    }
}

impl From<Vec<Row>> for RowSet {
    fn from(rows: Vec<Row>) -> Self {
        RowSet::new(rows)
    }
}

impl<'a> IntoIterator for &'a RowSet {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_numbers_render_without_fraction() {
        assert_eq!(CellValue::Number(42.0).as_text(), "42");
        assert_eq!(CellValue::Number(2.5).as_text(), "2.5");
        assert_eq!(CellValue::Bool(true).as_text(), "true");
    }

    #[test]
    fn text_cells_parse_as_numbers() {
        assert_eq!(CellValue::text(" 4 ").as_number(), Some(4.0));
        assert_eq!(CellValue::text("high").as_number(), None);
    }

    #[test]
    fn missing_column_reads_as_none() {
        let row = Row::new().with("GUID", "2O2Fr$t4X7Zf8NOew3FLOH");
        assert_eq!(row.text("GUID").as_deref(), Some("2O2Fr$t4X7Zf8NOew3FLOH"));
        assert_eq!(row.text("Maintenance Tasks"), None);
        assert_eq!(row.text_or_empty("Maintenance Tasks"), "");
    }

    #[test]
    fn find_exact_is_case_sensitive() {
        let rows = RowSet::new(vec![
            Row::new().with("GUID", "abc"),
            Row::new().with("GUID", "ABC"),
        ]);
        let found = rows.find_exact("GUID", "ABC").unwrap();
        assert_eq!(found.text("GUID").as_deref(), Some("ABC"));
        assert!(rows.find_exact("GUID", "ab").is_none());
    }

    #[test]
    fn policy_fill_values() {
        assert_eq!(MissingCellPolicy::Omit.fill(), None);
        assert_eq!(
            MissingCellPolicy::empty_string().fill(),
            Some(CellValue::text(""))
        );
    }

    #[test]
    fn row_serializes_as_plain_object() {
        let row = Row::new().with("Severity", 4.0);
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"{"Severity":4.0}"#);
    }
}

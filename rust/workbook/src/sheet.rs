// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! First-worksheet to row conversion.
//!
//! The first row of the sheet is the header. Each following row becomes a
//! [`Row`] keyed by header name. Fully blank rows are skipped. Blank headers
//! are named `__EMPTY`, `__EMPTY_1`, ... and repeated headers get a `_1`,
//! `_2`, ... suffix so no column is lost.

use crate::error::{Error, Result};
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use rcm_lite_core::{CellValue, MissingCellPolicy, Row, RowSet};
use rustc_hash::FxHashMap;
use std::io::Cursor;
use std::path::Path;

/// Loads the first worksheet of a workbook into rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetLoader {
    policy: MissingCellPolicy,
}

impl SheetLoader {
    pub fn new(policy: MissingCellPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &MissingCellPolicy {
        &self.policy
    }

    /// Parse workbook bytes (xlsx, xlsb, xls or ods).
    pub fn from_bytes(&self, bytes: &[u8]) -> Result<RowSet> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or(Error::NoSheets)?;
        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| Error::Sheet {
                sheet: sheet_name.clone(),
                message: e.to_string(),
            })?;

        let mut rows = range.rows();
        let Some(header_row) = rows.next() else {
            tracing::debug!(sheet = %sheet_name, "Sheet is empty");
            return Ok(RowSet::default());
        };
        let headers = header_names(header_row);

        let records: Vec<Row> = rows
            .filter_map(|cells| self.record(&headers, cells))
            .collect();

        tracing::debug!(
            sheet = %sheet_name,
            columns = headers.len(),
            rows = records.len(),
            "Loaded sheet"
        );
        Ok(RowSet::new(records))
    }

    /// Read and parse a workbook file.
    pub fn from_path(&self, path: impl AsRef<Path>) -> Result<RowSet> {
        let bytes = std::fs::read(path.as_ref())?;
        self.from_bytes(&bytes)
    }

    fn record(&self, headers: &[String], cells: &[Data]) -> Option<Row> {
        if cells.iter().all(|c| matches!(c, Data::Empty)) {
            return None;
        }
        let mut row = Row::new();
        for (header, cell) in headers.iter().zip(cells) {
            match cell_value(cell) {
                Some(value) => row.insert(header.as_str(), value),
                None => {
                    if let Some(fill) = self.policy.fill() {
                        row.insert(header.as_str(), fill);
                    }
                }
            }
        }
        Some(row)
    }
}

/// Header names with blanks and duplicates disambiguated.
fn header_names(cells: &[Data]) -> Vec<String> {
    let mut seen: FxHashMap<String, usize> = FxHashMap::default();
    cells
        .iter()
        .map(|cell| {
            let base = match cell_value(cell) {
                Some(value) if !value.is_blank() => value.as_text(),
                _ => "__EMPTY".to_string(),
            };
            let count = seen.entry(base.clone()).or_insert(0);
            let name = if *count == 0 {
                base
            } else {
                format!("{}_{}", base, count)
            };
            *count += 1;
            name
        })
        .collect()
}

/// Convert a calamine cell. `None` for empty cells.
fn cell_value(cell: &Data) -> Option<CellValue> {
    match cell {
        Data::Empty => None,
        Data::String(s) => Some(CellValue::Text(s.clone())),
        Data::Float(n) => Some(CellValue::Number(*n)),
        Data::Int(n) => Some(CellValue::Number(*n as f64)),
        Data::Bool(b) => Some(CellValue::Bool(*b)),
        Data::DateTime(dt) => Some(CellValue::Number(dt.as_f64())),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(CellValue::Text(s.clone())),
        Data::Error(e) => Some(CellValue::Text(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_and_repeated_headers_are_named() {
        let cells = vec![
            Data::String("Failure Id".into()),
            Data::Empty,
            Data::String("Failure Id".into()),
            Data::String(String::new()),
            Data::Float(2024.0),
        ];
        assert_eq!(
            header_names(&cells),
            ["Failure Id", "__EMPTY", "Failure Id_1", "__EMPTY_1", "2024"]
        );
    }

    #[test]
    fn cell_conversion() {
        assert_eq!(cell_value(&Data::Empty), None);
        assert_eq!(cell_value(&Data::Int(3)), Some(CellValue::Number(3.0)));
        assert_eq!(
            cell_value(&Data::String("Pump".into())),
            Some(CellValue::text("Pump"))
        );
        assert_eq!(cell_value(&Data::Bool(false)), Some(CellValue::Bool(false)));
    }

    #[test]
    fn blank_rows_are_skipped() {
        let loader = SheetLoader::new(MissingCellPolicy::empty_string());
        let headers = vec!["GUID".to_string(), "Maintenance Tasks".to_string()];
        assert!(loader.record(&headers, &[Data::Empty, Data::Empty]).is_none());

        let row = loader
            .record(&headers, &[Data::String("a".into()), Data::Empty])
            .unwrap();
        assert_eq!(row.text("Maintenance Tasks").as_deref(), Some(""));
    }

    #[test]
    fn garbage_bytes_fail_to_open() {
        let loader = SheetLoader::default();
        assert!(matches!(
            loader.from_bytes(b"not a workbook"),
            Err(Error::Open(_))
        ));
    }
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Case-insensitive substring search over one spreadsheet column.

use crate::row::{Row, RowSet};
use serde::{Deserialize, Serialize};

/// Where a search token came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", content = "token", rename_all = "snake_case")]
pub enum SearchQuery {
    /// Typed into the search field.
    Manual(String),
    /// The identifier of the element picked in the viewer.
    Picked(String),
}

impl SearchQuery {
    pub fn token(&self) -> &str {
        match self {
            SearchQuery::Manual(t) | SearchQuery::Picked(t) => t,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.token().is_empty()
    }
}

/// True when `column` of `row` contains `needle` (already lowercased).
fn row_matches(row: &Row, column: &str, needle: &str) -> bool {
    row.get(column)
        .is_some_and(|cell| cell.as_text().to_lowercase().contains(needle))
}

/// Indices of the rows whose `column` contains `token`, ignoring case.
///
/// An empty token matches nothing.
pub fn matching_indices(rows: &RowSet, column: &str, token: &str) -> Vec<usize> {
    if token.is_empty() {
        return Vec::new();
    }
    let needle = token.to_lowercase();
    rows.iter()
        .enumerate()
        .filter(|(_, row)| row_matches(row, column, &needle))
        .map(|(i, _)| i)
        .collect()
}

/// Rows whose `column` contains `token`, ignoring case, in sheet order.
///
/// An empty token matches nothing.
pub fn filter_rows<'a>(rows: &'a RowSet, column: &str, token: &str) -> Vec<&'a Row> {
    matching_indices(rows, column, token)
        .into_iter()
        .filter_map(|i| rows.get(i))
        .collect()
}

/// [`filter_rows`] for a [`SearchQuery`].
pub fn filter_query<'a>(rows: &'a RowSet, column: &str, query: &SearchQuery) -> Vec<&'a Row> {
    filter_rows(rows, column, query.token())
}

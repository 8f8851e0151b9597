// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for workbook loading.

use thiserror::Error;

/// Result type alias for workbook operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading a sheet.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to open workbook: {0}")]
    Open(#[from] calamine::Error),

    #[error("Workbook contains no sheets")]
    NoSheets,

    #[error("Failed to read sheet '{sheet}': {message}")]
    Sheet { sheet: String, message: String },

    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Cannot load {0} without an HTTP client")]
    UnsupportedSource(String),

    #[error("HTTP {status} fetching {url}")]
    Status { status: u16, url: String },
}

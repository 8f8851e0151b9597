// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for maintenance classification and coloring.

use thiserror::Error;

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the core crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A rating field name that is not severity, occurrence or detectability.
    #[error("unknown rating field: {0}")]
    UnknownRatingField(String),

    /// A color string that is not `#rgb` or `#rrggbb`.
    #[error("invalid hex color: {0}")]
    InvalidHexColor(String),

    /// A label style name that is not `standard` or `legacy`.
    #[error("unknown label style: {0}")]
    UnknownLabelStyle(String),
}

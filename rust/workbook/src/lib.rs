// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Spreadsheet loading for RCM-Lite.
//!
//! Reads the first worksheet of a workbook with [calamine](https://docs.rs/calamine)
//! and turns it into [`rcm_lite_core::RowSet`]s. How empty cells are filled
//! is declared per caller through [`rcm_lite_core::MissingCellPolicy`]:
//!
//! ```rust,ignore
//! use rcm_lite_core::MissingCellPolicy;
//! use rcm_lite_workbook::SheetLoader;
//!
//! let fmeca = SheetLoader::new(MissingCellPolicy::empty_string()).from_path("FMECA.xlsx")?;
//! let strategy = SheetLoader::new(MissingCellPolicy::Omit).from_path("maintenance_strategy.xlsx")?;
//! ```
//!
//! ## Feature Flags
//!
//! - `http`: fetch workbooks with `reqwest` ([`SheetLoader::fetch`])

pub mod error;
pub mod sheet;
pub mod source;

pub use error::{Error, Result};
pub use sheet::SheetLoader;
pub use source::SheetSource;

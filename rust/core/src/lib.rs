// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # RCM-Lite Core
//!
//! Maintenance decision logic for BIM viewers: reliability-centered
//! maintenance (RCM) strategy selection, strategy coloring of model
//! components, and FMECA failure-mode search.
//!
//! ## Overview
//!
//! - **Rows**: spreadsheet rows keyed by header name ([`Row`], [`RowSet`])
//! - **Classifier**: severity / occurrence / detectability to a [`Strategy`]
//! - **Coloring**: [`StrategyPalette`] and the [`Viewer`] colorize seam
//! - **Search**: case-insensitive GUID filtering ([`filter_rows`])
//! - **Selection**: picked-element subscriptions ([`Selection`])
//! - **Panels**: [`MaintenancePanel`] and [`FmecaPanel`] state
//!
//! ## Quick Start
//!
//! ```rust
//! use rcm_lite_core::{classify, RatingInput, Strategy};
//!
//! assert_eq!(classify(4.0, 4.0, 1.0), Some(Strategy::ConditionBased));
//! assert_eq!(classify(f64::NAN, 1.0, 1.0), None);
//!
//! let partial = RatingInput { severity: Some(5.0), ..Default::default() };
//! assert!(!partial.classify().is_complete());
//! ```
//!
//! Loading rows from a workbook lives in `rcm-lite-workbook`.

pub mod color;
pub mod error;
pub mod filter;
pub mod panel;
pub mod row;
pub mod selection;
pub mod strategy;
pub mod tasks;

pub use color::{colorize_element, LegendEntry, Rgb, StrategyPalette, Viewer};
pub use error::{Error, Result};
pub use filter::{filter_query, filter_rows, matching_indices, SearchQuery};
pub use panel::{
    FailureModeRecord, FmecaLayout, FmecaPanel, FmecaView, LoadState, MaintenanceLayout,
    MaintenancePanel, MaintenanceView, StrategyRecommendation,
};
pub use row::{CellValue, MissingCellPolicy, Row, RowSet};
pub use selection::{Selection, SelectionObserver, SubscriptionId};
pub use strategy::{classify, Classification, LabelStyle, RatingField, RatingInput, Strategy};
pub use tasks::{split_tasks, TASK_DELIMITER};

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Panel state for the maintenance coloring and FMECA windows.
//!
//! Panels hold the loaded rows and everything derived from them. Rendering
//! is left to the host (the browser bindings or the HTTP server), which reads
//! the serializable views returned by `view()`.

mod fmeca;
mod maintenance;

pub use fmeca::{FailureModeRecord, FmecaLayout, FmecaPanel, FmecaView, StrategyRecommendation};
pub use maintenance::{MaintenanceLayout, MaintenancePanel, MaintenanceView};

use serde::{Deserialize, Serialize};

/// Where a panel is in loading its spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Ready { rows: usize },
    Failed { message: String },
}

impl LoadState {
    pub fn is_ready(&self) -> bool {
        matches!(self, LoadState::Ready { .. })
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed { message } => Some(message),
            _ => None,
        }
    }
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Maintenance coloring panel.

use super::LoadState;
use crate::color::{colorize_element, LegendEntry, StrategyPalette, Viewer};
use crate::row::{MissingCellPolicy, RowSet};
use crate::selection::SelectionObserver;
use crate::tasks::{split_tasks, TASK_DELIMITER};
use serde::{Deserialize, Serialize};

/// Columns and source of the maintenance strategy sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaintenanceLayout {
    /// Path of the workbook relative to the app origin.
    pub sheet_path: String,
    pub guid_column: String,
    pub strategy_column: String,
    pub tasks_column: String,
    pub task_delimiter: char,
    pub missing_cells: MissingCellPolicy,
}

impl Default for MaintenanceLayout {
    fn default() -> Self {
        Self {
            sheet_path: "/maintenance_strategy.xlsx".into(),
            guid_column: "GUID".into(),
            strategy_column: "Maintenance Strategy".into(),
            tasks_column: "Maintenance Tasks".into(),
            task_delimiter: TASK_DELIMITER,
            missing_cells: MissingCellPolicy::Omit,
        }
    }
}

/// Everything the host needs to render the maintenance panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceView {
    pub load_state: LoadState,
    pub show_legend: bool,
    pub legend: Vec<LegendEntry>,
    pub picked: Option<String>,
    pub tasks: Vec<String>,
    pub show_tasks: bool,
}

/// Colors components by strategy and lists the picked component's tasks.
#[derive(Debug, Clone, Default)]
pub struct MaintenancePanel {
    layout: MaintenanceLayout,
    palette: StrategyPalette,
    rows: RowSet,
    load_state: LoadState,
    show_legend: bool,
    picked: Option<String>,
    tasks: Vec<String>,
}

impl MaintenancePanel {
    pub fn new(layout: MaintenanceLayout, palette: StrategyPalette) -> Self {
        Self {
            layout,
            palette,
            ..Self::default()
        }
    }

    pub fn layout(&self) -> &MaintenanceLayout {
        &self.layout
    }

    pub fn palette(&self) -> &StrategyPalette {
        &self.palette
    }

    pub fn rows(&self) -> &RowSet {
        &self.rows
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn begin_load(&mut self) {
        self.load_state = LoadState::Loading;
    }

    /// Record a failed load. Rows from an earlier load are kept.
    pub fn fail_load(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::error!(error = %message, "Failed to load maintenance strategy sheet");
        self.load_state = LoadState::Failed { message };
    }

    /// Install freshly loaded rows and color every listed component.
    ///
    /// Returns the number of components sent to the viewer.
    pub fn apply_rows(&mut self, rows: RowSet, viewer: Option<&mut (dyn Viewer + '_)>) -> usize {
        self.rows = rows;
        self.load_state = LoadState::Ready {
            rows: self.rows.len(),
        };
        let colored = self.colorize_all(viewer);
        self.show_legend = true;
        self.refresh_tasks();
        tracing::debug!(rows = self.rows.len(), colored, "Applied maintenance strategy coloring");
        colored
    }

    /// Send one colorize instruction per row that has a GUID.
    pub fn colorize_all(&self, mut viewer: Option<&mut (dyn Viewer + '_)>) -> usize {
        let mut colored = 0;
        for row in &self.rows {
            let Some(guid) = row.text(&self.layout.guid_column) else {
                continue;
            };
            let label = row.text_or_empty(&self.layout.strategy_column);
            // Reborrow so the viewer survives the loop.
            colorize_element(viewer.as_deref_mut(), &guid, &label, &self.palette);
            colored += 1;
        }
        colored
    }

    pub fn show_legend(&self) -> bool {
        self.show_legend
    }

    pub fn legend(&self) -> &[LegendEntry] {
        self.palette.legend()
    }

    pub fn picked(&self) -> Option<&str> {
        self.picked.as_deref()
    }

    /// Tasks for the picked component, in sheet order.
    pub fn tasks(&self) -> &[String] {
        &self.tasks
    }

    /// Whether the task table should be visible.
    pub fn has_task_view(&self) -> bool {
        self.picked.is_some() && !self.tasks.is_empty()
    }

    /// Tasks listed for `guid`. Empty when no row has that GUID.
    pub fn tasks_for(&self, guid: &str) -> Vec<String> {
        self.rows
            .find_exact(&self.layout.guid_column, guid)
            .and_then(|row| row.text(&self.layout.tasks_column))
            .map(|cell| split_tasks(&cell, self.layout.task_delimiter))
            .unwrap_or_default()
    }

    fn refresh_tasks(&mut self) {
        self.tasks = match &self.picked {
            Some(guid) => self.tasks_for(guid),
            None => Vec::new(),
        };
    }

    pub fn view(&self) -> MaintenanceView {
        MaintenanceView {
            load_state: self.load_state.clone(),
            show_legend: self.show_legend,
            legend: self.legend().to_vec(),
            picked: self.picked.clone(),
            tasks: self.tasks.clone(),
            show_tasks: self.has_task_view(),
        }
    }
}

impl SelectionObserver for MaintenancePanel {
    fn on_selection(&mut self, picked: Option<&str>) {
        self.picked = picked.map(str::to_string);
        self.refresh_tasks();
    }
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Maintenance strategy coloring endpoints.

use crate::error::ApiError;
use crate::services::SheetKind;
use crate::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use rcm_lite_core::{LegendEntry, MaintenancePanel, Rgb, StrategyPalette, Viewer};
use serde::Serialize;

/// One colorize instruction for the viewer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorInstruction {
    pub ids: Vec<String>,
    pub rgb: Rgb,
}

#[derive(Debug, Serialize)]
pub struct ColorsResponse {
    pub instructions: Vec<ColorInstruction>,
    pub legend: Vec<LegendEntry>,
}

#[derive(Debug, Serialize)]
pub struct TasksResponse {
    pub guid: String,
    pub tasks: Vec<String>,
}

/// Collects instructions instead of painting a scene.
#[derive(Default)]
struct InstructionRecorder(Vec<ColorInstruction>);

impl Viewer for InstructionRecorder {
    fn colorize_objects(&mut self, ids: &[&str], rgb: Rgb) {
        self.0.push(ColorInstruction {
            ids: ids.iter().map(|id| id.to_string()).collect(),
            rgb,
        });
    }
}

async fn panel(state: &AppState) -> Result<MaintenancePanel, ApiError> {
    let rows = state.sheets.rows(SheetKind::Maintenance).await?;
    let mut panel = MaintenancePanel::new(state.config.maintenance_layout(), StrategyPalette::default());
    panel.apply_rows(rows, None);
    Ok(panel)
}

/// GET /api/v1/maintenance/colors - Colors for every component in the sheet.
pub async fn colors(State(state): State<AppState>) -> Result<Json<ColorsResponse>, ApiError> {
    let panel = panel(&state).await?;
    let mut recorder = InstructionRecorder::default();
    let colored = panel.colorize_all(Some(&mut recorder));
    tracing::debug!(colored, "Built colorize instructions");

    Ok(Json(ColorsResponse {
        instructions: recorder.0,
        legend: panel.legend().to_vec(),
    }))
}

/// GET /api/v1/maintenance/tasks/:guid - Tasks listed for one component.
///
/// An unknown GUID gives an empty list.
pub async fn tasks(
    State(state): State<AppState>,
    Path(guid): Path<String>,
) -> Result<Json<TasksResponse>, ApiError> {
    let panel = panel(&state).await?;
    let tasks = panel.tasks_for(&guid);
    Ok(Json(TasksResponse { guid, tasks }))
}

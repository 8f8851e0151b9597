// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Health check endpoint.

use crate::services::SheetStatus;
use crate::AppState;
use axum::{extract::State, Json};
use serde::Serialize;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub service: &'static str,
    pub sheets: Vec<SheetStatus>,
}

/// API information response.
#[derive(Debug, Serialize)]
pub struct ApiInfoResponse {
    pub service: &'static str,
    pub version: &'static str,
    pub description: &'static str,
    pub endpoints: Vec<EndpointInfo>,
}

/// Endpoint information.
#[derive(Debug, Serialize)]
pub struct EndpointInfo {
    pub method: &'static str,
    pub path: &'static str,
    pub description: &'static str,
}

/// GET /api/v1/health - Health check endpoint.
///
/// Reports `degraded` while any sheet is not loaded.
pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    let sheets = state.sheets.status().await;
    let status = if sheets.iter().all(|s| s.state.is_ready()) {
        "healthy"
    } else {
        "degraded"
    };
    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        service: "rcm-lite-server",
        sheets,
    })
}

/// GET / - API information endpoint.
pub async fn info() -> Json<ApiInfoResponse> {
    Json(ApiInfoResponse {
        service: "rcm-lite-server",
        version: env!("CARGO_PKG_VERSION"),
        description: "Maintenance strategy coloring and FMECA search",
        endpoints: vec![
            EndpointInfo {
                method: "GET",
                path: "/api/v1/health",
                description: "Health check with sheet status",
            },
            EndpointInfo {
                method: "GET",
                path: "/api/v1/maintenance/colors",
                description: "Colorize instructions for every listed component",
            },
            EndpointInfo {
                method: "GET",
                path: "/api/v1/maintenance/tasks/:guid",
                description: "Maintenance tasks of one component",
            },
            EndpointInfo {
                method: "GET",
                path: "/api/v1/fmeca/search?q=",
                description: "Failure modes whose GUID contains the query",
            },
            EndpointInfo {
                method: "POST",
                path: "/api/v1/fmeca/strategy",
                description: "Classify severity, occurrence and detectability",
            },
            EndpointInfo {
                method: "POST",
                path: "/api/v1/sheets/reload",
                description: "Reload both spreadsheets",
            },
        ],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::SheetKind;
    use rcm_lite_core::RowSet;

    #[tokio::test]
    async fn degraded_until_both_sheets_load() {
        let state = AppState::for_tests();
        assert_eq!(check(State(state.clone())).await.status, "degraded");

        state.sheets.install(SheetKind::Maintenance, RowSet::default()).await;
        state.sheets.install(SheetKind::Fmeca, RowSet::default()).await;
        let Json(health) = check(State(state)).await;
        assert_eq!(health.status, "healthy");
        assert_eq!(health.sheets.len(), 2);
    }

    #[tokio::test]
    async fn info_lists_endpoints() {
        let Json(info) = info().await;
        assert!(info.endpoints.iter().any(|e| e.path == "/api/v1/fmeca/strategy"));
    }
}

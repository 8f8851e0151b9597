// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! FMECA search and strategy endpoints.

use crate::error::ApiError;
use crate::services::SheetKind;
use crate::AppState;
use axum::{
    extract::{Query, State},
    Json,
};
use rcm_lite_core::{Classification, FailureModeRecord, FmecaPanel, RatingInput};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub search: String,
    pub component_id: Option<String>,
    pub count: usize,
    pub results: Vec<FailureModeRecord>,
    pub no_results: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct StrategyRequest {
    #[serde(default)]
    pub failure_id: Option<String>,
    pub severity: Option<f64>,
    pub occurrence: Option<f64>,
    #[serde(alias = "detection")]
    pub detectability: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct StrategyResponse {
    pub failure_id: Option<String>,
    #[serde(flatten)]
    pub classification: Classification,
    pub label: &'static str,
    pub risk_priority_number: Option<f64>,
}

/// GET /api/v1/fmeca/search?q= - Failure modes whose GUID contains `q`.
///
/// An empty query matches nothing.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, ApiError> {
    let rows = state.sheets.rows(SheetKind::Fmeca).await?;
    let mut panel = FmecaPanel::new(state.config.fmeca_layout(), state.config.label_style);
    panel.apply_rows(rows);
    panel.set_search_text(params.q);

    Ok(Json(SearchResponse {
        search: panel.search_token().to_string(),
        component_id: panel.component_id(),
        count: panel.result_count(),
        results: panel.results(),
        no_results: panel.no_results(),
    }))
}

/// POST /api/v1/fmeca/strategy - Classify one set of ratings.
///
/// Missing ratings give an `incomplete` outcome; values off the 1-5 scale
/// are rejected.
pub async fn strategy(
    State(state): State<AppState>,
    Json(request): Json<StrategyRequest>,
) -> Result<Json<StrategyResponse>, ApiError> {
    let ratings = RatingInput {
        severity: request.severity,
        occurrence: request.occurrence,
        detectability: request.detectability,
    };
    let out_of_range = ratings.out_of_range();
    if !out_of_range.is_empty() {
        let fields: Vec<_> = out_of_range.iter().map(|f| f.name()).collect();
        return Err(ApiError::BadRequest(format!(
            "ratings must be between 1 and 5: {}",
            fields.join(", ")
        )));
    }

    let classification = ratings.classify();
    Ok(Json(StrategyResponse {
        failure_id: request.failure_id,
        label: classification.label(state.config.label_style),
        risk_priority_number: ratings.risk_priority_number(),
        classification,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rcm_lite_core::{RatingField, Row, RowSet, Strategy};

    fn failure_mode(guid: &str, component: &str, failure_id: &str) -> Row {
        Row::new()
            .with("Compressed Guid", guid)
            .with("Component Id", component)
            .with("Failure Id", failure_id)
            .with("Failure Mode", "Bearing wear")
            .with("Failure Cause", "")
            .with("Failure Effect", "")
            .with("Severity", 4.0)
            .with("Occurrence", "")
            .with("Detection", "")
    }

    async fn loaded_state() -> AppState {
        let state = AppState::for_tests();
        let rows = RowSet::new(vec![
            failure_mode("3vB2YO$MX4xv5uCqZZG05x", "P-101", "F1"),
            failure_mode("3vB2YO$MX4xv5uCqZZG05x", "P-101", "F2"),
            failure_mode("1Kx8Qw$7nR2bT0pLmA9cDe", "V-204", "F3"),
        ]);
        state.sheets.install(SheetKind::Fmeca, rows).await;
        state
    }

    fn query(q: &str) -> Query<SearchParams> {
        Query(SearchParams { q: q.to_string() })
    }

    #[tokio::test]
    async fn search_is_case_insensitive_substring() {
        let Json(response) = search(State(loaded_state().await), query("mx4XV5"))
            .await
            .unwrap();
        assert_eq!(response.count, 2);
        assert_eq!(response.component_id.as_deref(), Some("P-101"));
        assert_eq!(response.results[1].failure_id, "F2");
        assert!(!response.no_results);
    }

    #[tokio::test]
    async fn empty_query_matches_nothing() {
        let Json(response) = search(State(loaded_state().await), query("")).await.unwrap();
        assert_eq!(response.count, 0);
        assert!(!response.no_results);
    }

    #[tokio::test]
    async fn unmatched_query_reports_no_results() {
        let Json(response) = search(State(loaded_state().await), query("zzz")).await.unwrap();
        assert!(response.no_results);
        assert_eq!(response.component_id, None);
    }

    async fn classify(request: Json<StrategyRequest>) -> Result<Json<StrategyResponse>, ApiError> {
        strategy(State(AppState::for_tests()), request).await
    }

    fn request(s: Option<f64>, o: Option<f64>, d: Option<f64>) -> Json<StrategyRequest> {
        Json(StrategyRequest {
            failure_id: Some("F1".into()),
            severity: s,
            occurrence: o,
            detectability: d,
        })
    }

    #[tokio::test]
    async fn classifies_complete_ratings() {
        let Json(response) = classify(request(Some(4.0), Some(4.0), Some(1.0)))
            .await
            .unwrap();
        assert_eq!(response.classification.strategy(), Some(Strategy::ConditionBased));
        assert_eq!(response.label, "Condition-based maintenance");
        assert_eq!(response.risk_priority_number, Some(16.0));
    }

    #[tokio::test]
    async fn missing_ratings_are_incomplete() {
        let Json(response) = classify(request(Some(5.0), None, None)).await.unwrap();
        assert_eq!(
            response.classification,
            Classification::Incomplete {
                missing: vec![RatingField::Occurrence, RatingField::Detectability]
            }
        );
        assert_eq!(response.label, "");
        assert_eq!(response.risk_priority_number, None);
    }

    #[tokio::test]
    async fn rejects_out_of_scale_ratings() {
        let result = classify(request(Some(9.0), Some(3.0), Some(3.0))).await;
        assert!(matches!(result, Err(ApiError::BadRequest(_))));
    }

    #[test]
    fn accepts_detection_alias() {
        let request: StrategyRequest =
            serde_json::from_str(r#"{"severity": 3, "occurrence": 3, "detection": 2}"#).unwrap();
        assert_eq!(request.detectability, Some(2.0));
    }
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! FMECA search and strategy panel.

use super::LoadState;
use crate::error::Result;
use crate::filter::{matching_indices, SearchQuery};
use crate::row::{MissingCellPolicy, Row, RowSet};
use crate::selection::SelectionObserver;
use crate::strategy::{Classification, LabelStyle, RatingField, RatingInput};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Columns and source of the FMECA sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FmecaLayout {
    /// Path of the workbook relative to the app origin.
    pub sheet_path: String,
    pub guid_column: String,
    pub component_id_column: String,
    pub failure_id_column: String,
    pub failure_mode_column: String,
    pub cause_column: String,
    pub effect_column: String,
    pub severity_column: String,
    pub occurrence_column: String,
    pub detection_column: String,
    pub missing_cells: MissingCellPolicy,
}

impl Default for FmecaLayout {
    fn default() -> Self {
        Self {
            sheet_path: "/FMECA.xlsx".into(),
            guid_column: "Compressed Guid".into(),
            component_id_column: "Component Id".into(),
            failure_id_column: "Failure Id".into(),
            failure_mode_column: "Failure Mode".into(),
            cause_column: "Failure Cause".into(),
            effect_column: "Failure Effect".into(),
            severity_column: "Severity".into(),
            occurrence_column: "Occurrence".into(),
            detection_column: "Detection".into(),
            missing_cells: MissingCellPolicy::empty_string(),
        }
    }
}

/// One failure mode row, read through an [`FmecaLayout`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureModeRecord {
    pub compressed_guid: String,
    pub component_id: String,
    pub failure_id: String,
    pub description: String,
    pub cause: String,
    pub effect: String,
    pub severity: String,
    pub occurrence: String,
    pub detection: String,
}

impl FailureModeRecord {
    pub fn from_row(row: &Row, layout: &FmecaLayout) -> Self {
        let text = |column: &str| row.text_or_empty(column);
        Self {
            compressed_guid: text(&layout.guid_column),
            component_id: text(&layout.component_id_column),
            failure_id: text(&layout.failure_id_column),
            description: text(&layout.failure_mode_column),
            cause: text(&layout.cause_column),
            effect: text(&layout.effect_column),
            severity: text(&layout.severity_column),
            occurrence: text(&layout.occurrence_column),
            detection: text(&layout.detection_column),
        }
    }
}

/// Strategy shown for a failure mode, derived from its current ratings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyRecommendation {
    pub failure_id: String,
    pub ratings: RatingInput,
    pub classification: Classification,
    pub label: String,
}

/// Everything the host needs to render the FMECA panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FmecaView {
    pub load_state: LoadState,
    pub search: String,
    pub component_id: Option<String>,
    pub results: Vec<FailureModeRecord>,
    pub no_results: bool,
    pub strategies: Vec<StrategyRecommendation>,
}

/// Searches failure modes by GUID and recommends maintenance strategies.
///
/// Recommendations are computed from the ratings each time they are read, so
/// editing a rating after asking for a strategy updates what is shown.
#[derive(Debug, Clone, Default)]
pub struct FmecaPanel {
    layout: FmecaLayout,
    label_style: LabelStyle,
    rows: RowSet,
    load_state: LoadState,
    query: Option<SearchQuery>,
    results: Vec<usize>,
    ratings: FxHashMap<String, RatingInput>,
    requested: Vec<String>,
}

impl FmecaPanel {
    pub fn new(layout: FmecaLayout, label_style: LabelStyle) -> Self {
        Self {
            layout,
            label_style,
            ..Self::default()
        }
    }

    pub fn layout(&self) -> &FmecaLayout {
        &self.layout
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn rows(&self) -> &RowSet {
        &self.rows
    }

    pub fn begin_load(&mut self) {
        self.load_state = LoadState::Loading;
    }

    /// Record a failed load. Rows from an earlier load are kept.
    pub fn fail_load(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::error!(error = %message, "Failed to load FMECA sheet");
        self.load_state = LoadState::Failed { message };
    }

    pub fn apply_rows(&mut self, rows: RowSet) {
        self.rows = rows;
        self.load_state = LoadState::Ready {
            rows: self.rows.len(),
        };
        self.refilter();
        tracing::debug!(rows = self.rows.len(), "Loaded FMECA rows");
    }

    /// Current search token, empty when nothing is searched.
    pub fn search_token(&self) -> &str {
        self.query.as_ref().map_or("", SearchQuery::token)
    }

    /// Text typed into the search field.
    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.query = Some(SearchQuery::Manual(text.into()));
        self.refilter();
    }

    fn refilter(&mut self) {
        self.results = match &self.query {
            Some(query) => matching_indices(&self.rows, &self.layout.guid_column, query.token()),
            None => Vec::new(),
        };
    }

    /// Matching failure modes in sheet order.
    pub fn results(&self) -> Vec<FailureModeRecord> {
        self.results
            .iter()
            .filter_map(|&i| self.rows.get(i))
            .map(|row| FailureModeRecord::from_row(row, &self.layout))
            .collect()
    }

    pub fn result_count(&self) -> usize {
        self.results.len()
    }

    /// Component id of the first match.
    pub fn component_id(&self) -> Option<String> {
        let row = self.rows.get(*self.results.first()?)?;
        Some(row.text_or_empty(&self.layout.component_id_column))
    }

    /// A search is active but found nothing.
    pub fn no_results(&self) -> bool {
        !self.search_token().is_empty() && self.results.is_empty()
    }

    pub fn ratings(&self, failure_id: &str) -> RatingInput {
        self.ratings.get(failure_id).copied().unwrap_or_default()
    }

    pub fn set_rating(&mut self, failure_id: &str, field: RatingField, value: f64) {
        self.ratings
            .entry(failure_id.to_string())
            .or_default()
            .set(field, value);
    }

    /// [`FmecaPanel::set_rating`] with the field given by name.
    pub fn set_rating_named(&mut self, failure_id: &str, field: &str, value: f64) -> Result<()> {
        let field = field.parse()?;
        self.set_rating(failure_id, field, value);
        Ok(())
    }

    /// Ask for the strategy of a failure mode and keep showing it from now on.
    pub fn request_strategy(&mut self, failure_id: &str) -> Classification {
        if !self.requested.iter().any(|id| id == failure_id) {
            self.requested.push(failure_id.to_string());
        }
        self.ratings(failure_id).classify()
    }

    /// Requested recommendations, in the order they were first requested.
    pub fn strategies(&self) -> Vec<StrategyRecommendation> {
        self.requested
            .iter()
            .map(|failure_id| {
                let ratings = self.ratings(failure_id);
                let classification = ratings.classify();
                StrategyRecommendation {
                    failure_id: failure_id.clone(),
                    ratings,
                    label: classification.label(self.label_style).to_string(),
                    classification,
                }
            })
            .collect()
    }

    pub fn view(&self) -> FmecaView {
        FmecaView {
            load_state: self.load_state.clone(),
            search: self.search_token().to_string(),
            component_id: self.component_id(),
            results: self.results(),
            no_results: self.no_results(),
            strategies: self.strategies(),
        }
    }
}

impl SelectionObserver for FmecaPanel {
    fn on_selection(&mut self, picked: Option<&str>) {
        self.query = picked.map(|p| SearchQuery::Picked(p.to_string()));
        self.refilter();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::Strategy;

    fn failure(guid: &str, component: &str, id: &str, mode: &str) -> Row {
        Row::new()
            .with("Compressed Guid", guid)
            .with("Component Id", component)
            .with("Failure Id", id)
            .with("Failure Mode", mode)
            .with("Failure Cause", "")
            .with("Failure Effect", "")
    }

    fn loaded() -> FmecaPanel {
        let mut panel = FmecaPanel::default();
        panel.apply_rows(RowSet::new(vec![
            failure("3cUkl32yn9qRSPvBJVyWw5", "P-101", "F-01", "Seal leakage"),
            failure("3cUkl32yn9qRSPvBJVyWw5", "P-101", "F-02", "Bearing wear"),
            failure("1hOSvn6df7F8_7GcBWlR72", "V-204", "F-03", "Valve stuck"),
        ]));
        panel
    }

    #[test]
    fn nothing_searched_means_no_results() {
        let panel = loaded();
        assert_eq!(panel.result_count(), 0);
        assert!(!panel.no_results());
        assert_eq!(panel.component_id(), None);
    }

    #[test]
    fn manual_search_is_case_insensitive_substring() {
        let mut panel = loaded();
        panel.set_search_text("cukl32");
        let ids: Vec<_> = panel.results().into_iter().map(|r| r.failure_id).collect();
        assert_eq!(ids, ["F-01", "F-02"]);
        assert_eq!(panel.component_id().as_deref(), Some("P-101"));
    }

    #[test]
    fn clearing_the_search_text_clears_results() {
        let mut panel = loaded();
        panel.set_search_text("3cUk");
        panel.set_search_text("");
        assert_eq!(panel.result_count(), 0);
        assert!(!panel.no_results());
    }

    #[test]
    fn unmatched_search_reports_no_results() {
        let mut panel = loaded();
        panel.set_search_text("zzz");
        assert!(panel.no_results());
    }

    #[test]
    fn selection_drives_the_search() {
        let mut panel = loaded();
        panel.set_search_text("V-");
        panel.on_selection(Some("1hOSvn6df7F8_7GcBWlR72"));
        assert_eq!(panel.search_token(), "1hOSvn6df7F8_7GcBWlR72");
        assert_eq!(panel.results()[0].description, "Valve stuck");

        panel.on_selection(None);
        assert_eq!(panel.search_token(), "");
        assert_eq!(panel.result_count(), 0);
    }

    #[test]
    fn strategy_follows_rating_edits() {
        let mut panel = loaded();
        panel.set_rating("F-01", RatingField::Severity, 4.0);
        panel.set_rating("F-01", RatingField::Occurrence, 4.0);
        panel.set_rating("F-01", RatingField::Detectability, 1.0);
        assert_eq!(
            panel.request_strategy("F-01").strategy(),
            Some(Strategy::ConditionBased)
        );

        panel.set_rating("F-01", RatingField::Detectability, 5.0);
        let shown = panel.strategies();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].label, "Preventive maintenance");
    }

    #[test]
    fn unrequested_failures_are_not_listed() {
        let mut panel = loaded();
        panel.set_rating("F-02", RatingField::Severity, 1.0);
        assert!(panel.strategies().is_empty());
    }

    #[test]
    fn incomplete_ratings_show_blank_label() {
        let mut panel = loaded();
        panel.set_rating("F-03", RatingField::Severity, 3.0);
        let result = panel.request_strategy("F-03");
        assert!(!result.is_complete());
        assert_eq!(panel.strategies()[0].label, "");
    }

    #[test]
    fn requests_keep_first_request_order() {
        let mut panel = loaded();
        panel.set_rating("F-02", RatingField::Severity, 1.0);
        panel.set_rating("F-01", RatingField::Severity, 1.0);
        panel.request_strategy("F-02");
        panel.request_strategy("F-01");
        panel.request_strategy("F-02");
        let order: Vec<_> = panel.strategies().into_iter().map(|s| s.failure_id).collect();
        assert_eq!(order, ["F-02", "F-01"]);
    }

    #[test]
    fn legacy_labels_keep_the_old_corrective_text() {
        let mut panel = FmecaPanel::new(FmecaLayout::default(), LabelStyle::Legacy);
        panel.set_rating("F-01", RatingField::Severity, 3.0);
        panel.set_rating("F-01", RatingField::Occurrence, 1.0);
        panel.request_strategy("F-01");
        assert_eq!(panel.strategies()[0].label, "Corrective maintenanc");
    }

    #[test]
    fn named_rating_fields() {
        let mut panel = loaded();
        panel.set_rating_named("F-01", "detection", 2.0).unwrap();
        assert_eq!(panel.ratings("F-01").detectability, Some(2.0));
        assert!(panel.set_rating_named("F-01", "cost", 2.0).is_err());
    }
}

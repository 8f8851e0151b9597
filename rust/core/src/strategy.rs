// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Reliability-centered maintenance (RCM) strategy selection.
//!
//! A failure mode is rated on three 1-5 scales (severity, occurrence and
//! detectability) and mapped onto one of four maintenance strategies:
//!
//! | severity | occurrence | detectability | strategy        |
//! |----------|------------|---------------|-----------------|
//! | <= 2     | any        | any           | run-to-failure  |
//! | > 2      | <= 2       | any           | corrective      |
//! | > 2      | > 2        | <= 2          | condition-based |
//! | > 2      | > 2        | > 2           | preventive      |

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lowest rating on each scale.
pub const RATING_MIN: f64 = 1.0;
/// Highest rating on each scale.
pub const RATING_MAX: f64 = 5.0;
/// Ratings at or below this value count as "low".
pub const LOW_THRESHOLD: f64 = 2.0;

/// Maintenance strategy recommended for a failure mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    RunToFailure,
    Corrective,
    ConditionBased,
    Preventive,
}

impl Strategy {
    /// All strategies in legend order.
    pub const ALL: [Strategy; 4] = [
        Strategy::RunToFailure,
        Strategy::Corrective,
        Strategy::ConditionBased,
        Strategy::Preventive,
    ];

    /// Human-readable recommendation.
    pub fn label(self) -> &'static str {
        match self {
            Strategy::RunToFailure => "Run-to-failure maintenance",
            Strategy::Corrective => "Corrective maintenance",
            Strategy::ConditionBased => "Condition-based maintenance",
            Strategy::Preventive => "Preventive maintenance",
        }
    }

    /// Recommendation text as the FMECA window has always displayed it.
    ///
    /// Differs from [`Strategy::label`] only for `Corrective`, which is
    /// missing its final letter. Some report templates match on it.
    pub fn legacy_label(self) -> &'static str {
        match self {
            Strategy::Corrective => "Corrective maintenanc",
            other => other.label(),
        }
    }

    pub fn label_for(self, style: LabelStyle) -> &'static str {
        match style {
            LabelStyle::Standard => self.label(),
            LabelStyle::Legacy => self.legacy_label(),
        }
    }

    /// Key used in the "Maintenance Strategy" column of the strategy sheet.
    pub fn sheet_key(self) -> &'static str {
        match self {
            Strategy::RunToFailure => "Run-to-failure",
            Strategy::Corrective => "Corrective",
            Strategy::ConditionBased => "Condition-Based",
            Strategy::Preventive => "Preventive",
        }
    }

    /// Inverse of [`Strategy::sheet_key`]. Exact match only.
    pub fn from_sheet_key(key: &str) -> Option<Strategy> {
        Strategy::ALL.into_iter().find(|s| s.sheet_key() == key)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which label text to show for a strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelStyle {
    #[default]
    Standard,
    Legacy,
}

impl FromStr for LabelStyle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(LabelStyle::Standard),
            "legacy" => Ok(LabelStyle::Legacy),
            _ => Err(Error::UnknownLabelStyle(s.to_string())),
        }
    }
}

/// Classify a complete rating triple.
///
/// Returns `None` when no row of the decision table matches, which only
/// happens for NaN input.
pub fn classify(severity: f64, occurrence: f64, detectability: f64) -> Option<Strategy> {
    const LOW: f64 = LOW_THRESHOLD;
    match (severity, occurrence, detectability) {
        (s, _, _) if s <= LOW => Some(Strategy::RunToFailure),
        (s, o, _) if s > LOW && o <= LOW => Some(Strategy::Corrective),
        (s, o, d) if s > LOW && o > LOW && d <= LOW => Some(Strategy::ConditionBased),
        (s, o, d) if s > LOW && o > LOW && d > LOW => Some(Strategy::Preventive),
        _ => None,
    }
}

/// One of the three rating scales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingField {
    Severity,
    Occurrence,
    Detectability,
}

impl RatingField {
    pub const ALL: [RatingField; 3] = [
        RatingField::Severity,
        RatingField::Occurrence,
        RatingField::Detectability,
    ];

    pub fn name(self) -> &'static str {
        match self {
            RatingField::Severity => "severity",
            RatingField::Occurrence => "occurrence",
            RatingField::Detectability => "detectability",
        }
    }
}

impl fmt::Display for RatingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RatingField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "severity" => Ok(RatingField::Severity),
            "occurrence" => Ok(RatingField::Occurrence),
            // The FMECA sheet calls the column "Detection".
            "detectability" | "detection" => Ok(RatingField::Detectability),
            _ => Err(Error::UnknownRatingField(s.to_string())),
        }
    }
}

/// User-entered ratings for one failure mode.
///
/// Fields stay `None` until the user types a value. `NaN` is stored as `None`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RatingInput {
    pub severity: Option<f64>,
    pub occurrence: Option<f64>,
    pub detectability: Option<f64>,
}

impl RatingInput {
    pub fn new(severity: f64, occurrence: f64, detectability: f64) -> Self {
        let mut input = Self::default();
        input.set(RatingField::Severity, severity);
        input.set(RatingField::Occurrence, occurrence);
        input.set(RatingField::Detectability, detectability);
        input
    }

    pub fn get(&self, field: RatingField) -> Option<f64> {
        match field {
            RatingField::Severity => self.severity,
            RatingField::Occurrence => self.occurrence,
            RatingField::Detectability => self.detectability,
        }
    }

    /// Overwrite one rating.
    pub fn set(&mut self, field: RatingField, value: f64) {
        let value = (!value.is_nan()).then_some(value);
        match field {
            RatingField::Severity => self.severity = value,
            RatingField::Occurrence => self.occurrence = value,
            RatingField::Detectability => self.detectability = value,
        }
    }

    /// Fields with no value yet.
    pub fn missing(&self) -> Vec<RatingField> {
        RatingField::ALL
            .into_iter()
            .filter(|f| self.get(*f).is_none())
            .collect()
    }

    /// Fields whose value lies outside the 1-5 scale.
    pub fn out_of_range(&self) -> Vec<RatingField> {
        RatingField::ALL
            .into_iter()
            .filter(|f| {
                self.get(*f)
                    .is_some_and(|v| !(RATING_MIN..=RATING_MAX).contains(&v))
            })
            .collect()
    }

    /// Risk priority number (severity x occurrence x detectability).
    pub fn risk_priority_number(&self) -> Option<f64> {
        Some(self.severity? * self.occurrence? * self.detectability?)
    }

    /// Classify whatever has been entered so far.
    ///
    /// Only the ratings on the decision path are required: a low severity is
    /// enough for run-to-failure, and a low occurrence settles corrective.
    pub fn classify(&self) -> Classification {
        let incomplete = || Classification::Incomplete {
            missing: self.missing(),
        };

        let Some(severity) = self.severity else {
            return incomplete();
        };
        if severity <= LOW_THRESHOLD {
            return Strategy::RunToFailure.into();
        }
        let Some(occurrence) = self.occurrence else {
            return incomplete();
        };
        if occurrence <= LOW_THRESHOLD {
            return Strategy::Corrective.into();
        }
        match self
            .detectability
            .and_then(|detectability| classify(severity, occurrence, detectability))
        {
            Some(strategy) => strategy.into(),
            None => incomplete(),
        }
    }
}

/// Outcome of classifying a [`RatingInput`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Classification {
    Strategy { strategy: Strategy },
    Incomplete { missing: Vec<RatingField> },
}

impl From<Strategy> for Classification {
    fn from(strategy: Strategy) -> Self {
        Classification::Strategy { strategy }
    }
}

impl Classification {
    pub fn strategy(&self) -> Option<Strategy> {
        match self {
            Classification::Strategy { strategy } => Some(*strategy),
            Classification::Incomplete { .. } => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.strategy().is_some()
    }

    /// Label to render. Incomplete ratings render as an empty string.
    pub fn label(&self, style: LabelStyle) -> &'static str {
        self.strategy().map_or("", |s| s.label_for(style))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn low_severity_is_always_run_to_failure() {
        for s in [0.0, 1.0, 2.0] {
            for o in 1..=5 {
                for d in 1..=5 {
                    assert_eq!(classify(s, o as f64, d as f64), Some(Strategy::RunToFailure));
                }
            }
        }
    }

    #[test]
    fn decision_table_examples() {
        assert_eq!(classify(3.0, 1.0, 5.0), Some(Strategy::Corrective));
        assert_eq!(classify(4.0, 4.0, 1.0), Some(Strategy::ConditionBased));
        assert_eq!(classify(5.0, 5.0, 5.0), Some(Strategy::Preventive));
    }

    #[test]
    fn boundaries_are_inclusive() {
        assert_eq!(classify(2.0, 5.0, 5.0), Some(Strategy::RunToFailure));
        assert_eq!(classify(3.0, 2.0, 5.0), Some(Strategy::Corrective));
        assert_eq!(classify(3.0, 3.0, 2.0), Some(Strategy::ConditionBased));
        assert_eq!(classify(3.0, 3.0, 3.0), Some(Strategy::Preventive));
    }

    #[test]
    fn nan_input_matches_no_row() {
        assert_eq!(classify(f64::NAN, 1.0, 1.0), None);
        assert_eq!(classify(3.0, f64::NAN, 1.0), None);
        assert_eq!(classify(3.0, 3.0, f64::NAN), None);
        assert_eq!(classify(f64::NAN, f64::NAN, f64::NAN), None);
        // A low severity settles the row before the other ratings are read.
        assert_eq!(classify(1.0, f64::NAN, f64::NAN), Some(Strategy::RunToFailure));
    }

    #[test]
    fn labels() {
        assert_eq!(Strategy::Corrective.label(), "Corrective maintenance");
        assert_eq!(Strategy::Corrective.legacy_label(), "Corrective maintenanc");
        assert_eq!(
            Strategy::Preventive.label_for(LabelStyle::Legacy),
            "Preventive maintenance"
        );
    }

    #[test]
    fn sheet_keys_round_trip() {
        for s in Strategy::ALL {
            assert_eq!(Strategy::from_sheet_key(s.sheet_key()), Some(s));
        }
        assert_eq!(Strategy::from_sheet_key("corrective"), None);
    }

    #[test]
    fn missing_severity_is_incomplete() {
        let input = RatingInput::default();
        let result = input.classify();
        assert_eq!(
            result,
            Classification::Incomplete {
                missing: RatingField::ALL.to_vec()
            }
        );
        assert_eq!(result.label(LabelStyle::Standard), "");
    }

    #[test]
    fn partial_input_on_short_path_classifies() {
        let mut input = RatingInput::default();
        input.set(RatingField::Severity, 1.0);
        assert_eq!(input.classify().strategy(), Some(Strategy::RunToFailure));

        input.set(RatingField::Severity, 4.0);
        assert!(!input.classify().is_complete());

        input.set(RatingField::Occurrence, 2.0);
        assert_eq!(input.classify().strategy(), Some(Strategy::Corrective));

        input.set(RatingField::Occurrence, 3.0);
        assert_eq!(
            input.classify(),
            Classification::Incomplete {
                missing: vec![RatingField::Detectability]
            }
        );
    }

    #[test]
    fn nan_counts_as_missing() {
        let input = RatingInput::new(f64::NAN, 3.0, 3.0);
        assert_eq!(input.severity, None);
        assert!(!input.classify().is_complete());
    }

    #[test]
    fn rating_field_parsing() {
        assert_eq!("Severity".parse::<RatingField>(), Ok(RatingField::Severity));
        assert_eq!("detection".parse::<RatingField>(), Ok(RatingField::Detectability));
        assert!(matches!(
            "cost".parse::<RatingField>(),
            Err(Error::UnknownRatingField(_))
        ));
    }

    #[test]
    fn rpn_and_range_checks() {
        let input = RatingInput::new(4.0, 3.0, 6.0);
        assert_eq!(input.risk_priority_number(), Some(72.0));
        assert_eq!(input.out_of_range(), vec![RatingField::Detectability]);
        assert_eq!(RatingInput::default().risk_priority_number(), None);
    }

    #[test]
    fn classification_serializes_with_status_tag() {
        let json = serde_json::to_string(&Classification::from(Strategy::Preventive)).unwrap();
        assert_eq!(json, r#"{"status":"strategy","strategy":"preventive"}"#);
    }
}

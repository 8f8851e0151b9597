// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Strategy colors and the viewer colorize seam.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Normalized RGB color, each channel in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rgb(pub [f32; 3]);

impl Rgb {
    pub const WHITE: Rgb = Rgb([1.0, 1.0, 1.0]);

    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Rgb([r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0])
    }

    /// Parse `#rrggbb` or the CSS shorthand `#rgb`. The `#` is optional.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.trim().trim_start_matches('#');
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::InvalidHexColor(hex.to_string()));
        }
        let expanded: String = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 => digits.to_string(),
            _ => return Err(Error::InvalidHexColor(hex.to_string())),
        };
        let value = u32::from_str_radix(&expanded, 16)
            .map_err(|_| Error::InvalidHexColor(hex.to_string()))?;
        Ok(Rgb::from_u8(
            ((value >> 16) & 0xff) as u8,
            ((value >> 8) & 0xff) as u8,
            (value & 0xff) as u8,
        ))
    }

    pub fn to_array(self) -> [f32; 3] {
        self.0
    }
}

/// Receives colorize instructions. Implemented by whatever owns the 3D scene.
pub trait Viewer {
    fn colorize_objects(&mut self, ids: &[&str], rgb: Rgb);
}

impl<F> Viewer for F
where
    F: FnMut(&[&str], Rgb),
{
    fn colorize_objects(&mut self, ids: &[&str], rgb: Rgb) {
        self(ids, rgb)
    }
}

/// A palette entry: sheet strategy key, CSS color and its normalized value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub label: String,
    pub color: String,
    pub rgb: Rgb,
}

/// Maps strategy keys from the maintenance sheet to display colors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyPalette {
    entries: Vec<LegendEntry>,
    fallback: LegendEntry,
}

impl Default for StrategyPalette {
    fn default() -> Self {
        let entry = |label: &str, color: &str, rgb: Rgb| LegendEntry {
            label: label.to_string(),
            color: color.to_string(),
            rgb,
        };
        Self {
            entries: vec![
                entry("Run-to-failure", "#333", Rgb::from_u8(0x33, 0x33, 0x33)),
                entry("Corrective", "#ffa500", Rgb::from_u8(0xff, 0xa5, 0x00)),
                entry("Condition-Based", "#00008b", Rgb::from_u8(0x00, 0x00, 0x8b)),
                entry("Preventive", "#fc0909", Rgb::from_u8(0xfc, 0x09, 0x09)),
            ],
            fallback: entry("", "#ffffff", Rgb::WHITE),
        }
    }
}

impl StrategyPalette {
    /// Build a palette from `(label, hex)` pairs, in legend order.
    pub fn new<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Result<Self> {
        let entries = entries
            .into_iter()
            .map(|(label, color)| {
                Ok(LegendEntry {
                    label: label.to_string(),
                    color: color.to_string(),
                    rgb: Rgb::from_hex(color)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            entries,
            ..Self::default()
        })
    }

    /// Entries in legend order. The fallback is not part of the legend.
    pub fn legend(&self) -> &[LegendEntry] {
        &self.entries
    }

    fn entry(&self, label: &str) -> &LegendEntry {
        self.entries
            .iter()
            .find(|e| e.label == label)
            .unwrap_or(&self.fallback)
    }

    /// CSS color for a label; white when the label is unknown.
    pub fn color_for(&self, label: &str) -> &str {
        &self.entry(label).color
    }

    /// Normalized color for a label; white when the label is unknown.
    pub fn rgb_for(&self, label: &str) -> Rgb {
        self.entry(label).rgb
    }
}

/// Color one element by its strategy label.
///
/// Does nothing when there is no viewer yet.
pub fn colorize_element(
    viewer: Option<&mut (dyn Viewer + '_)>,
    guid: &str,
    label: &str,
    palette: &StrategyPalette,
) {
    let Some(viewer) = viewer else {
        return;
    };
    viewer.colorize_objects(&[guid], palette.rgb_for(label));
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn parses_long_and_short_hex() {
        let orange = Rgb::from_hex("#ffa500").unwrap();
        assert_relative_eq!(orange.0[0], 1.0);
        assert_relative_eq!(orange.0[1], 165.0 / 255.0);
        assert_relative_eq!(orange.0[2], 0.0);

        let grey = Rgb::from_hex("#333").unwrap();
        assert_eq!(grey, Rgb::from_hex("333333").unwrap());
        assert_relative_eq!(grey.0[1], 0.2);
    }

    #[test]
    fn rejects_bad_hex() {
        assert!(Rgb::from_hex("#12345").is_err());
        assert!(Rgb::from_hex("#gg0000").is_err());
        assert!(Rgb::from_hex("").is_err());
    }

    #[test]
    fn unknown_label_is_white() {
        let palette = StrategyPalette::default();
        assert_eq!(palette.rgb_for("Scheduled overhaul"), Rgb([1.0, 1.0, 1.0]));
        assert_eq!(palette.color_for("Scheduled overhaul"), "#ffffff");
    }

    #[test]
    fn default_palette_matches_its_hex_strings() {
        let palette = StrategyPalette::default();
        for entry in palette.legend() {
            assert_eq!(Rgb::from_hex(&entry.color).unwrap(), entry.rgb);
        }
        let labels: Vec<_> = palette.legend().iter().map(|e| e.label.as_str()).collect();
        assert_eq!(
            labels,
            ["Run-to-failure", "Corrective", "Condition-Based", "Preventive"]
        );
    }

    #[test]
    fn colorize_forwards_to_viewer() {
        let palette = StrategyPalette::default();
        let mut calls: Vec<(String, Rgb)> = Vec::new();
        let mut viewer = |ids: &[&str], rgb: Rgb| {
            calls.extend(ids.iter().map(|id| (id.to_string(), rgb)));
        };
        colorize_element(Some(&mut viewer as &mut dyn Viewer), "3vB2YO$MX4xv5uCqZZG05x", "Preventive", &palette);
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "3vB2YO$MX4xv5uCqZZG05x");
        assert_eq!(calls[0].1, palette.rgb_for("Preventive"));
    }

    #[test]
    fn one_viewer_colors_many_elements() {
        let palette = StrategyPalette::default();
        let mut count = 0;
        let mut counter = |_: &[&str], _: Rgb| count += 1;
        let mut viewer: Option<&mut dyn Viewer> = Some(&mut counter);
        for guid in ["a", "b", "c"] {
            colorize_element(viewer.as_deref_mut(), guid, "Corrective", &palette);
        }
        drop(viewer);
        assert_eq!(count, 3);
    }

    #[test]
    fn colorize_without_viewer_is_noop() {
        colorize_element(None, "guid", "Preventive", &StrategyPalette::default());
    }

    #[test]
    fn custom_palette_validates_colors() {
        assert!(StrategyPalette::new([("Preventive", "#zzz")]).is_err());
        let palette = StrategyPalette::new([("Preventive", "#00ff00")]).unwrap();
        assert_eq!(palette.legend().len(), 1);
        assert_eq!(palette.rgb_for("Corrective"), Rgb::WHITE);
    }
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Server configuration loaded from environment variables.

use rcm_lite_core::{FmecaLayout, LabelStyle, MaintenanceLayout};

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port to listen on.
    pub port: u16,
    /// Origin (URL) or directory the sheet paths are resolved against.
    pub sheet_base_url: String,
    /// Path of the maintenance strategy workbook.
    pub maintenance_sheet_path: String,
    /// Path of the FMECA workbook.
    pub fmeca_sheet_path: String,
    /// Request timeout in seconds, also used for sheet downloads.
    pub request_timeout_secs: u64,
    /// Strategy label text style.
    pub label_style: LabelStyle,
    /// Allowed CORS origins (comma-separated, or "*" for all in development).
    pub cors_origins: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let maintenance = MaintenanceLayout::default();
        let fmeca = FmecaLayout::default();
        Self {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".into())
                .parse()
                .unwrap_or(8080),
            sheet_base_url: std::env::var("SHEET_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:3000".into()),
            maintenance_sheet_path: std::env::var("MAINTENANCE_SHEET_PATH")
                .unwrap_or(maintenance.sheet_path),
            fmeca_sheet_path: std::env::var("FMECA_SHEET_PATH").unwrap_or(fmeca.sheet_path),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".into())
                .parse()
                .unwrap_or(30),
            label_style: std::env::var("LABEL_STYLE")
                .ok()
                .and_then(|s| match s.parse() {
                    Ok(style) => Some(style),
                    Err(e) => {
                        tracing::warn!(error = %e, "Ignoring LABEL_STYLE");
                        None
                    }
                })
                .unwrap_or_default(),
            cors_origins: std::env::var("CORS_ORIGINS")
                .unwrap_or_else(|_| {
                    // Default: allow common development origins
                    "http://localhost:3000,http://localhost:5173,http://127.0.0.1:3000,http://127.0.0.1:5173".into()
                })
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }

    /// Maintenance sheet layout with the configured path.
    pub fn maintenance_layout(&self) -> MaintenanceLayout {
        MaintenanceLayout {
            sheet_path: self.maintenance_sheet_path.clone(),
            ..MaintenanceLayout::default()
        }
    }

    /// FMECA sheet layout with the configured path.
    pub fn fmeca_layout(&self) -> FmecaLayout {
        FmecaLayout {
            sheet_path: self.fmeca_sheet_path.clone(),
            ..FmecaLayout::default()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Loaded spreadsheet rows, swapped whole on reload.

use crate::config::Config;
use crate::error::ApiError;
use rcm_lite_core::{LoadState, MissingCellPolicy, RowSet};
use rcm_lite_workbook::{SheetLoader, SheetSource};
use serde::Serialize;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};

/// The two sheets the server serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetKind {
    Maintenance,
    Fmeca,
}

impl SheetKind {
    pub fn name(self) -> &'static str {
        match self {
            SheetKind::Maintenance => "maintenance_strategy",
            SheetKind::Fmeca => "fmeca",
        }
    }
}

/// Rows of one sheet plus the outcome of the last load attempt.
#[derive(Debug, Clone, Default)]
struct SheetSlot {
    rows: RowSet,
    state: LoadState,
    loaded_once: bool,
}

/// Status of one sheet, as reported by the health and reload endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct SheetStatus {
    pub sheet: &'static str,
    pub source: String,
    #[serde(flatten)]
    pub state: LoadState,
}

struct SheetEntry {
    kind: SheetKind,
    source: SheetSource,
    loader: SheetLoader,
    slot: RwLock<SheetSlot>,
    /// Held for a whole reload so overlapping reloads finish in call order.
    reloading: Mutex<()>,
}

/// Holds both sheets.
pub struct SheetStore {
    client: reqwest::Client,
    maintenance: SheetEntry,
    fmeca: SheetEntry,
}

impl SheetStore {
    /// Create an empty store. Call [`SheetStore::reload_all`] to load.
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| ApiError::Internal(format!("HTTP client: {e}")))?;
        let maintenance = config.maintenance_layout();
        let fmeca = config.fmeca_layout();

        Ok(Self {
            client,
            maintenance: SheetEntry::new(
                SheetKind::Maintenance,
                SheetSource::join(&config.sheet_base_url, &maintenance.sheet_path),
                maintenance.missing_cells,
            ),
            fmeca: SheetEntry::new(
                SheetKind::Fmeca,
                SheetSource::join(&config.sheet_base_url, &fmeca.sheet_path),
                fmeca.missing_cells,
            ),
        })
    }

    fn entry(&self, kind: SheetKind) -> &SheetEntry {
        match kind {
            SheetKind::Maintenance => &self.maintenance,
            SheetKind::Fmeca => &self.fmeca,
        }
    }

    /// Load one sheet and swap it in. A failed load keeps the previous rows.
    pub async fn reload(&self, kind: SheetKind) -> SheetStatus {
        let entry = self.entry(kind);
        let _reloading = entry.reloading.lock().await;
        entry.slot.write().await.state = LoadState::Loading;

        let loaded = match &entry.source {
            SheetSource::Url(url) => entry.loader.fetch(&self.client, url).await.map_err(ApiError::from),
            SheetSource::File(_) => {
                let loader = entry.loader.clone();
                let source = entry.source.clone();
                match tokio::task::spawn_blocking(move || loader.load_file(&source)).await {
                    Ok(result) => result.map_err(ApiError::from),
                    Err(e) => Err(ApiError::from(e)),
                }
            }
        };

        let mut slot = entry.slot.write().await;
        match loaded {
            Ok(rows) => {
                tracing::info!(sheet = kind.name(), source = %entry.source, rows = rows.len(), "Loaded sheet");
                slot.state = LoadState::Ready { rows: rows.len() };
                slot.rows = rows;
                slot.loaded_once = true;
            }
            Err(e) => {
                tracing::error!(sheet = kind.name(), source = %entry.source, error = %e, "Failed to load sheet");
                slot.state = LoadState::Failed {
                    message: e.to_string(),
                };
            }
        }
        entry.status(&slot)
    }

    /// Reload both sheets concurrently.
    pub async fn reload_all(&self) -> Vec<SheetStatus> {
        let (maintenance, fmeca) = tokio::join!(
            self.reload(SheetKind::Maintenance),
            self.reload(SheetKind::Fmeca)
        );
        vec![maintenance, fmeca]
    }

    /// Rows of a sheet, or `SheetUnavailable` if it has never loaded.
    pub async fn rows(&self, kind: SheetKind) -> Result<RowSet, ApiError> {
        let slot = self.entry(kind).slot.read().await;
        if slot.loaded_once {
            return Ok(slot.rows.clone());
        }
        let message = match &slot.state {
            LoadState::Failed { message } => message.clone(),
            LoadState::Loading => "still loading".to_string(),
            _ => "not loaded".to_string(),
        };
        Err(ApiError::SheetUnavailable {
            sheet: kind.name(),
            message,
        })
    }

    pub async fn status(&self) -> Vec<SheetStatus> {
        let mut statuses = Vec::with_capacity(2);
        for entry in [&self.maintenance, &self.fmeca] {
            let slot = entry.slot.read().await;
            statuses.push(entry.status(&slot));
        }
        statuses
    }

    /// Install rows directly, bypassing the loader.
    #[cfg(test)]
    pub async fn install(&self, kind: SheetKind, rows: RowSet) {
        let mut slot = self.entry(kind).slot.write().await;
        slot.state = LoadState::Ready { rows: rows.len() };
        slot.rows = rows;
        slot.loaded_once = true;
    }
}

impl SheetEntry {
    fn new(kind: SheetKind, source: SheetSource, policy: MissingCellPolicy) -> Self {
        Self {
            kind,
            source,
            loader: SheetLoader::new(policy),
            slot: RwLock::new(SheetSlot::default()),
            reloading: Mutex::new(()),
        }
    }

    fn status(&self, slot: &SheetSlot) -> SheetStatus {
        SheetStatus {
            sheet: self.kind.name(),
            source: self.source.to_string(),
            state: slot.state.clone(),
        }
    }
}

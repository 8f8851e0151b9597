// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Where a sheet is loaded from.

use crate::error::Result;
use crate::sheet::SheetLoader;
use rcm_lite_core::RowSet;
use std::fmt;
use std::path::PathBuf;

/// A workbook location: an HTTP(S) URL or a local file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetSource {
    Url(String),
    File(PathBuf),
}

impl SheetSource {
    /// `http://` and `https://` locations are URLs, everything else a file.
    pub fn parse(location: &str) -> Self {
        let location = location.trim();
        if location.starts_with("http://") || location.starts_with("https://") {
            SheetSource::Url(location.to_string())
        } else {
            SheetSource::File(PathBuf::from(location))
        }
    }

    /// Resolve a sheet path (such as `/FMECA.xlsx`) against a base location.
    pub fn join(base: &str, sheet_path: &str) -> Self {
        let base = base.trim().trim_end_matches('/');
        let path = sheet_path.trim().trim_start_matches('/');
        if base.is_empty() {
            return SheetSource::parse(sheet_path);
        }
        SheetSource::parse(&format!("{}/{}", base, path))
    }
}

impl fmt::Display for SheetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SheetSource::Url(url) => f.write_str(url),
            SheetSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[cfg(feature = "http")]
impl SheetLoader {
    /// GET a workbook and parse its first sheet.
    pub async fn fetch(&self, client: &reqwest::Client, url: &str) -> Result<RowSet> {
        tracing::debug!(url = %url, "Fetching workbook");
        let response = client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(crate::Error::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        let bytes = response.bytes().await?;
        self.from_bytes(&bytes)
    }
}

impl SheetLoader {
    /// Load a file source without an HTTP client. URLs are rejected.
    pub fn load_file(&self, source: &SheetSource) -> Result<RowSet> {
        match source {
            SheetSource::File(path) => self.from_path(path),
            SheetSource::Url(url) => Err(crate::Error::UnsupportedSource(url.clone())),
        }
    }
}

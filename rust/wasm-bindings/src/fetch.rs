// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Workbook download through `window.fetch`.

use rcm_lite_core::{MissingCellPolicy, RowSet};
use rcm_lite_workbook::SheetLoader;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

/// Absolute URL of a sheet path on the page's origin.
pub(crate) fn origin_url(sheet_path: &str) -> Result<String, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let origin = window.location().origin()?;
    Ok(format!(
        "{}/{}",
        origin.trim_end_matches('/'),
        sheet_path.trim_start_matches('/')
    ))
}

async fn fetch_bytes(url: &str) -> Result<Vec<u8>, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let response: Response = JsFuture::from(window.fetch_with_str(url)).await?.dyn_into()?;
    if !response.ok() {
        return Err(JsValue::from_str(&format!(
            "HTTP {} fetching {}",
            response.status(),
            url
        )));
    }
    let buffer = JsFuture::from(response.array_buffer()?).await?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}

/// Fetch a sheet from the page's origin and parse its first worksheet.
pub(crate) async fn load_sheet(
    sheet_path: &str,
    policy: &MissingCellPolicy,
) -> Result<RowSet, String> {
    let url = origin_url(sheet_path).map_err(|e| crate::utils::js_error_message(&e))?;
    let bytes = fetch_bytes(&url)
        .await
        .map_err(|e| crate::utils::js_error_message(&e))?;
    SheetLoader::new(policy.clone())
        .from_bytes(&bytes)
        .map_err(|e| e.to_string())
}

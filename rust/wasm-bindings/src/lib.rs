// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! RCM-Lite WebAssembly Bindings
//!
//! Maintenance coloring and FMECA panels for browser BIM viewers, built with
//! wasm-bindgen. Rendering stays in JavaScript; these classes own the sheet
//! rows and everything derived from them.

use wasm_bindgen::prelude::*;

#[cfg(feature = "console_error_panic_hook")]
pub use console_error_panic_hook::set_once as set_panic_hook;

mod fetch;
mod panels;
mod utils;
mod viewer;

pub use panels::{FmecaWindow, MaintenanceColoring, PickedElement};
pub use utils::set_panic_hook as init_panic_hook;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Get the version of RCM-Lite
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Recommended maintenance strategy for a complete rating triple.
///
/// Returns an empty string when no strategy applies, e.g. for `NaN` input.
#[wasm_bindgen(js_name = classifyStrategy)]
pub fn classify_strategy(severity: f64, occurrence: f64, detectability: f64) -> String {
    rcm_lite_core::classify(severity, occurrence, detectability)
        .map_or("", |strategy| strategy.label())
        .to_string()
}

/// Split a delimited task cell into task names.
#[wasm_bindgen(js_name = splitTasks)]
pub fn split_tasks(cell: &str) -> Vec<String> {
    rcm_lite_core::split_tasks(cell, rcm_lite_core::TASK_DELIMITER)
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Adapter from a JS viewer object to the core colorize seam.

use js_sys::{Array, Function, Reflect};
use rcm_lite_core::{Rgb, Viewer};
use wasm_bindgen::{JsCast, JsValue};

/// A JS viewer exposing `scene.setObjectsColorized(ids, [r, g, b])`.
pub(crate) struct JsViewer {
    handle: JsValue,
}

impl JsViewer {
    /// `None` for `null` / `undefined` handles.
    pub(crate) fn from_handle(handle: JsValue) -> Option<Self> {
        if handle.is_null() || handle.is_undefined() {
            None
        } else {
            Some(Self { handle })
        }
    }

    fn colorize(&self, ids: &[&str], rgb: Rgb) -> Result<(), JsValue> {
        let scene = Reflect::get(&self.handle, &JsValue::from_str("scene"))?;
        let method: Function = Reflect::get(&scene, &JsValue::from_str("setObjectsColorized"))?
            .dyn_into()?;

        let id_array = ids.iter().map(|id| JsValue::from_str(id)).collect::<Array>();
        let color = rgb
            .to_array()
            .iter()
            .map(|c| JsValue::from_f64(f64::from(*c)))
            .collect::<Array>();
        method.call2(&scene, &id_array, &color)?;
        Ok(())
    }
}

impl Viewer for JsViewer {
    fn colorize_objects(&mut self, ids: &[&str], rgb: Rgb) {
        if let Err(e) = self.colorize(ids, rgb) {
            crate::utils::warn(&format!(
                "[rcm-lite] setObjectsColorized failed: {}",
                crate::utils::js_error_message(&e)
            ));
        }
    }
}

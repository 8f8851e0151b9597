// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! FMECA search and strategy panel for JavaScript.

use super::{notify, options_or_default, to_js, Binding, PickedElement};
use js_sys::{Function, Promise};
use rcm_lite_core::{FmecaLayout, FmecaPanel, LabelStyle, SelectionObserver};
use serde::Deserialize;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct FmecaOptions {
    layout: FmecaLayout,
    label_style: LabelStyle,
}

pub(crate) struct FmecaState {
    panel: FmecaPanel,
    listener: Option<Function>,
}

impl FmecaState {
    fn notify(&self) {
        notify(&self.listener, &self.panel.view());
    }
}

impl SelectionObserver for FmecaState {
    fn on_selection(&mut self, picked: Option<&str>) {
        self.panel.on_selection(picked);
        self.notify();
    }
}

/// Failure modes, effects and criticality analysis window.
///
/// Example:
/// ```javascript
/// const fmeca = new FmecaWindow({ labelStyle: 'standard' });
/// fmeca.onChange((view) => render(view));
/// await fmeca.load();
/// fmeca.setSearchText('3cUkl32');
/// fmeca.setRating('F-01', 'severity', 4);
/// fmeca.requestStrategy('F-01');
/// ```
#[wasm_bindgen]
pub struct FmecaWindow {
    binding: Binding,
    state: Rc<RefCell<FmecaState>>,
}

#[wasm_bindgen]
impl FmecaWindow {
    /// Create a panel. Options: `{ layout?, labelStyle?: 'standard' | 'legacy' }`.
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> Result<FmecaWindow, JsValue> {
        let options: FmecaOptions = options_or_default(options)?;
        let state = FmecaState {
            panel: FmecaPanel::new(options.layout, options.label_style),
            listener: None,
        };
        Ok(FmecaWindow {
            binding: Binding::default(),
            state: Rc::new(RefCell::new(state)),
        })
    }

    #[wasm_bindgen(js_name = onChange)]
    pub fn on_change(&self, callback: Option<Function>) {
        self.state.borrow_mut().listener = callback;
    }

    /// Fetch the FMECA sheet. Resolves with the panel view either way.
    #[wasm_bindgen]
    pub fn load(&self) -> Promise {
        let state = Rc::clone(&self.state);
        Promise::new(&mut |resolve, _reject| {
            let state = Rc::clone(&state);
            spawn_local(async move {
                let (sheet_path, policy) = {
                    let mut s = state.borrow_mut();
                    s.panel.begin_load();
                    s.notify();
                    let layout = s.panel.layout();
                    (layout.sheet_path.clone(), layout.missing_cells.clone())
                };

                let loaded = crate::fetch::load_sheet(&sheet_path, &policy).await;

                let view = {
                    let mut s = state.borrow_mut();
                    match loaded {
                        Ok(rows) => s.panel.apply_rows(rows),
                        Err(message) => {
                            crate::utils::error(&format!(
                                "[rcm-lite] Error reading {}: {}",
                                sheet_path, message
                            ));
                            s.panel.fail_load(message);
                        }
                    }
                    s.notify();
                    to_js(&s.panel.view())
                };
                let _ = resolve.call1(&JsValue::NULL, &view);
            });
        })
    }

    /// Text typed into the GUID search field.
    #[wasm_bindgen(js_name = setSearchText)]
    pub fn set_search_text(&self, text: String) {
        let mut s = self.state.borrow_mut();
        s.panel.set_search_text(text);
        s.notify();
    }

    #[wasm_bindgen(js_name = setPicked)]
    pub fn set_picked(&self, picked: Option<String>) {
        let picked = picked.filter(|p| !p.is_empty());
        self.state.borrow_mut().on_selection(picked.as_deref());
    }

    #[wasm_bindgen(js_name = bindSelection)]
    pub fn bind_selection(&self, picked: &PickedElement) {
        self.binding.replace(picked, Rc::clone(&self.state));
    }

    /// Store one rating. `field` is `severity`, `occurrence` or `detectability`.
    #[wasm_bindgen(js_name = setRating)]
    pub fn set_rating(&self, failure_id: &str, field: &str, value: f64) -> Result<(), JsValue> {
        let mut s = self.state.borrow_mut();
        s.panel
            .set_rating_named(failure_id, field, value)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        s.notify();
        Ok(())
    }

    /// Show the strategy for a failure mode and return its classification.
    #[wasm_bindgen(js_name = requestStrategy)]
    pub fn request_strategy(&self, failure_id: &str) -> JsValue {
        let mut s = self.state.borrow_mut();
        let classification = s.panel.request_strategy(failure_id);
        s.notify();
        to_js(&classification)
    }

    #[wasm_bindgen]
    pub fn view(&self) -> JsValue {
        to_js(&self.state.borrow().panel.view())
    }
}

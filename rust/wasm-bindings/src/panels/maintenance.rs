// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Maintenance coloring panel for JavaScript.

use super::{notify, options_or_default, to_js, Binding, PickedElement};
use crate::viewer::JsViewer;
use js_sys::{Function, Promise};
use rcm_lite_core::{
    MaintenanceLayout, MaintenancePanel, Rgb, RowSet, SelectionObserver, StrategyPalette, Viewer,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

pub(crate) struct MaintenanceState {
    panel: MaintenancePanel,
    viewer: Option<JsViewer>,
    listener: Option<Function>,
}

impl MaintenanceState {
    fn notify(&self) {
        notify(&self.listener, &self.panel.view());
    }
}

impl SelectionObserver for MaintenanceState {
    fn on_selection(&mut self, picked: Option<&str>) {
        self.panel.on_selection(picked);
        self.notify();
    }
}

/// Install a load result and color the listed components.
///
/// Colors are recorded while the state is borrowed and sent to the viewer
/// afterwards, so a viewer that picks an element from inside
/// `setObjectsColorized` can reach the panel again.
fn apply_loaded(
    state: &Rc<RefCell<MaintenanceState>>,
    sheet_path: &str,
    loaded: Result<RowSet, String>,
) -> JsValue {
    let mut pending: Vec<(String, Rgb)> = Vec::new();
    let viewer = {
        let mut s = state.borrow_mut();
        match loaded {
            Ok(rows) => {
                let mut record = |ids: &[&str], rgb: Rgb| {
                    pending.extend(ids.iter().map(|id| (id.to_string(), rgb)));
                };
                s.panel.apply_rows(rows, Some(&mut record as &mut dyn Viewer));
            }
            Err(message) => {
                crate::utils::error(&format!(
                    "[rcm-lite] Error loading or parsing {}: {}",
                    sheet_path, message
                ));
                s.panel.fail_load(message);
            }
        }
        s.viewer.take()
    };

    if let Some(mut viewer) = viewer {
        for (guid, rgb) in &pending {
            viewer.colorize_objects(&[guid.as_str()], *rgb);
        }
        let mut s = state.borrow_mut();
        // `setViewer` may have attached another viewer meanwhile.
        if s.viewer.is_none() {
            s.viewer = Some(viewer);
        }
    }

    let s = state.borrow();
    s.notify();
    to_js(&s.panel.view())
}

/// Colors model components by maintenance strategy.
///
/// Example:
/// ```javascript
/// const coloring = new MaintenanceColoring();
/// coloring.setViewer(viewer);
/// coloring.onChange((view) => render(view));
/// await coloring.load();
/// coloring.setPicked(pickedGuid);
/// ```
#[wasm_bindgen]
pub struct MaintenanceColoring {
    binding: Binding,
    state: Rc<RefCell<MaintenanceState>>,
}

#[wasm_bindgen]
impl MaintenanceColoring {
    /// Create a panel. `layout` overrides sheet path and column names.
    #[wasm_bindgen(constructor)]
    pub fn new(layout: JsValue) -> Result<MaintenanceColoring, JsValue> {
        let layout: MaintenanceLayout = options_or_default(layout)?;
        let state = MaintenanceState {
            panel: MaintenancePanel::new(layout, StrategyPalette::default()),
            viewer: None,
            listener: None,
        };
        Ok(MaintenanceColoring {
            binding: Binding::default(),
            state: Rc::new(RefCell::new(state)),
        })
    }

    /// Attach the 3D viewer. `null` detaches it; coloring then does nothing.
    #[wasm_bindgen(js_name = setViewer)]
    pub fn set_viewer(&self, viewer: JsValue) {
        self.state.borrow_mut().viewer = JsViewer::from_handle(viewer);
    }

    /// Register the callback that receives each new view.
    #[wasm_bindgen(js_name = onChange)]
    pub fn on_change(&self, callback: Option<Function>) {
        self.state.borrow_mut().listener = callback;
    }

    /// Fetch the strategy sheet and color every listed component.
    ///
    /// Resolves with the panel view. Load failures resolve too, with the
    /// view's `load_state` set to `failed`.
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

                let view = apply_loaded(&state, &sheet_path, loaded);
                let _ = resolve.call1(&JsValue::NULL, &view);
            });
        })
    }

    /// Set the picked element directly.
    #[wasm_bindgen(js_name = setPicked)]
    pub fn set_picked(&self, picked: Option<String>) {
        let picked = picked.filter(|p| !p.is_empty());
        self.state.borrow_mut().on_selection(picked.as_deref());
    }

    /// Follow a shared [`PickedElement`].
    #[wasm_bindgen(js_name = bindSelection)]
    pub fn bind_selection(&self, picked: &PickedElement) {
        self.binding.replace(picked, Rc::clone(&self.state));
    }

    /// Current view: load state, legend and tasks of the picked component.
    #[wasm_bindgen]
    pub fn view(&self) -> JsValue {
        to_js(&self.state.borrow().panel.view())
    }

    /// Tasks for any GUID, independent of the current pick.
    #[wasm_bindgen(js_name = tasksFor)]
    pub fn tasks_for(&self, guid: &str) -> JsValue {
        to_js(&self.state.borrow().panel.tasks_for(guid))
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use js_sys::{Object, Reflect};
    use rcm_lite_core::Row;
    use std::cell::Cell;
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen_test::*;

    const PUMP: &str = "0mK5$gQbP8sO2n5yZ3kT1a";

    #[wasm_bindgen_test]
    fn viewer_can_pick_while_coloring() {
        let coloring = MaintenanceColoring::new(JsValue::UNDEFINED).unwrap();
        let calls = Rc::new(Cell::new(0));

        let state = Rc::clone(&coloring.state);
        let counter = Rc::clone(&calls);
        let on_colorize = Closure::<dyn FnMut(JsValue, JsValue)>::new(move |_ids, _rgb| {
            state.borrow_mut().on_selection(Some(PUMP));
            counter.set(counter.get() + 1);
        });
        let scene = Object::new();
        Reflect::set(&scene, &"setObjectsColorized".into(), on_colorize.as_ref()).unwrap();
        let viewer = Object::new();
        Reflect::set(&viewer, &"scene".into(), &scene).unwrap();
        coloring.set_viewer(viewer.into());

        let rows = RowSet::new(vec![Row::new()
            .with("GUID", PUMP)
            .with("Maintenance Strategy", "Preventive")
            .with("Maintenance Tasks", "Inspect - Replace")]);
        apply_loaded(&coloring.state, "/maintenance_strategy.xlsx", Ok(rows));

        assert_eq!(calls.get(), 1);
        let s = coloring.state.borrow();
        assert_eq!(s.panel.tasks(), ["Inspect", "Replace"]);
        assert!(s.viewer.is_some());
    }
}

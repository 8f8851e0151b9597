// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! JavaScript classes for the maintenance and FMECA panels.

mod fmeca;
mod maintenance;
mod picked;

pub use fmeca::FmecaWindow;
pub use maintenance::MaintenanceColoring;
pub use picked::PickedElement;

use js_sys::Function;
use rcm_lite_core::{Selection, SelectionObserver, SubscriptionId};
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::spawn_local;

/// Deserialize an optional options object; `undefined` gives the default.
pub(crate) fn options_or_default<T>(value: JsValue) -> Result<T, JsValue>
where
    T: serde::de::DeserializeOwned + Default,
{
    if value.is_undefined() || value.is_null() {
        return Ok(T::default());
    }
    serde_wasm_bindgen::from_value(value).map_err(JsValue::from)
}

pub(crate) fn to_js<T: Serialize>(value: &T) -> JsValue {
    serde_wasm_bindgen::to_value(value).unwrap_or(JsValue::NULL)
}

/// Hand the latest view to a change listener.
///
/// The call is queued as a microtask so the listener never runs while panel
/// state is borrowed and may freely call back into the panel.
pub(crate) fn notify<T: Serialize>(listener: &Option<Function>, view: &T) {
    if let Some(callback) = listener {
        let callback = callback.clone();
        let view = to_js(view);
        spawn_local(async move {
            let _ = callback.call1(&JsValue::NULL, &view);
        });
    }
}

/// A panel's subscription to a [`PickedElement`]. Binding again drops the
/// previous subscription.
#[derive(Default)]
pub(crate) struct Binding(RefCell<Option<(Rc<RefCell<Selection>>, SubscriptionId)>>);

impl Binding {
    pub(crate) fn replace<T>(&self, picked: &PickedElement, observer: Rc<RefCell<T>>)
    where
        T: SelectionObserver + 'static,
    {
        if let Some((selection, id)) = self.0.borrow_mut().take() {
            selection.borrow_mut().unsubscribe(id);
        }
        let id = picked.selection.borrow_mut().bind(observer);
        *self.0.borrow_mut() = Some((Rc::clone(&picked.selection), id));
    }
}

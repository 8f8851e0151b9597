// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use rcm_lite_core::Selection;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

/// The element picked in the 3D viewer, shared by any number of panels.
///
/// Example:
/// ```javascript
/// const picked = new PickedElement();
/// coloring.bindSelection(picked);
/// fmeca.bindSelection(picked);
/// viewer.on('picked', (id) => picked.set(id));
/// ```
#[wasm_bindgen]
#[derive(Default)]
pub struct PickedElement {
    pub(crate) selection: Rc<RefCell<Selection>>,
}

#[wasm_bindgen]
impl PickedElement {
    #[wasm_bindgen(constructor)]
    pub fn new() -> PickedElement {
        PickedElement::default()
    }

    /// Update the picked id. Panels are notified only when it changes.
    #[wasm_bindgen]
    pub fn set(&self, id: Option<String>) -> bool {
        self.selection.borrow_mut().set(id)
    }

    #[wasm_bindgen(getter)]
    pub fn current(&self) -> Option<String> {
        self.selection.borrow().current().map(str::to_string)
    }
}

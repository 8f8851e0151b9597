// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Browser tests, run with `wasm-pack test --headless --firefox`.

#![cfg(target_arch = "wasm32")]

use rcm_lite_wasm::{classify_strategy, split_tasks, FmecaWindow, PickedElement};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn classifies_rating_triples() {
    assert_eq!(classify_strategy(5.0, 5.0, 5.0), "Preventive maintenance");
    assert_eq!(classify_strategy(3.0, 1.0, 5.0), "Corrective maintenance");
}

#[wasm_bindgen_test]
fn splits_task_cells() {
    assert_eq!(
        split_tasks("Inspect - Lubricate -  Replace"),
        ["Inspect", "Lubricate", "Replace"]
    );
}

#[wasm_bindgen_test]
fn fmeca_window_tracks_picked_element() {
    let fmeca = FmecaWindow::new(JsValue::UNDEFINED).unwrap();
    let picked = PickedElement::new();
    fmeca.bind_selection(&picked);

    assert!(picked.set(Some("3cUkl32yn9qRSPvBJVyWw5".to_string())));
    assert_eq!(picked.current().as_deref(), Some("3cUkl32yn9qRSPvBJVyWw5"));
    assert!(fmeca.set_rating("F-01", "severity", 1.0).is_ok());
    assert!(fmeca.set_rating("F-01", "cost", 1.0).is_err());
}

#[wasm_bindgen_test]
fn rebinding_drops_previous_selection() {
    let fmeca = FmecaWindow::new(JsValue::UNDEFINED).unwrap();
    let first = PickedElement::new();
    let second = PickedElement::new();
    fmeca.bind_selection(&first);
    fmeca.bind_selection(&second);

    first.set(Some("3cUkl32yn9qRSPvBJVyWw5".to_string()));
    let search = js_sys::Reflect::get(&fmeca.view(), &JsValue::from_str("search")).unwrap();
    assert_eq!(search.as_string().as_deref(), Some(""));

    second.set(Some("1Kx8Qw".to_string()));
    let search = js_sys::Reflect::get(&fmeca.view(), &JsValue::from_str("search")).unwrap();
    assert_eq!(search.as_string().as_deref(), Some("1Kx8Qw"));
}

#[wasm_bindgen_test]
fn nan_ratings_give_no_strategy() {
    assert_eq!(classify_strategy(f64::NAN, 1.0, 1.0), "");
    assert_eq!(classify_strategy(3.0, 3.0, f64::NAN), "");
}

//! Page scripts for the username gate and the light/dark theme switch.
//!
//! `login` and `theme` hold the decisions and run anywhere; `ui` binds them
//! to the DOM and `window.localStorage` when built for `wasm32`.

pub mod login;
pub mod persistence;
pub mod theme;

#[cfg(target_arch = "wasm32")]
mod ui;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    ui::start()
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(js_name = saveUsername)]
pub fn save_username() -> Result<(), JsValue> {
    ui::save_username()
}

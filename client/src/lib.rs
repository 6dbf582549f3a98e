//! Browser host for the `viewer` engine.
//!
//! SYSTEM CONTEXT
//! ==============
//! Mounts a full-viewport image stage, translates DOM pointer/touch/wheel/
//! keyboard/resize events into `viewer::input::InputEvent`s, and writes the
//! engine's committed transform back to the image element.

pub mod app;
pub mod components;
pub mod config;
pub mod state;
pub mod util;

/// WASM entry point: install logging and mount the app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Debug) {
        web_sys::console::warn_1(&format!("logger already installed: {err}").into());
    }
    leptos::mount::mount_to_body(app::App);
}

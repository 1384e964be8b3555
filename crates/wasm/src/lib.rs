#![deny(unsafe_code)]
//! WASM bindings for fuelsense.
//!
//! The page script constructs one [`ParticleBackground`] and one
//! [`FormFeedback`] per session, then forwards events: `frame()` from its
//! `requestAnimationFrame` callback, `resize()` from the window resize
//! listener, and `on_input()` from each form input. Either object failing to
//! construct (no canvas, no form) leaves the other unaffected.

mod canvas;
mod form;

pub use canvas::ParticleBackground;
pub use form::FormFeedback;

use fuelsense_core::FxError;
use wasm_bindgen::JsValue;
use web_sys::Document;

/// The page's document, or `HostUnavailable` outside a browser window.
fn document() -> Result<Document, FxError> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| FxError::HostUnavailable("no window document".into()))
}

/// Wraps a JS-side failure.
fn host_error(context: &str, err: JsValue) -> FxError {
    FxError::HostUnavailable(format!("{context}: {err:?}"))
}

/// Reports an error to the console and hands it to the page script.
fn to_js(err: FxError) -> JsValue {
    web_sys::console::warn_1(&format!("fuelsense: {err}").into());
    JsValue::from_str(&err.to_string())
}

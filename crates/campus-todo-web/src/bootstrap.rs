//! Bindings to the Bootstrap 5 bundle the
//! server templates load as the global
//! `bootstrap`.
//!
//! Constructors are `catch` so a page
//! without the bundle yields an `Err`
//! instead of a trap.

use serde::Serialize;
use wasm_bindgen::prelude::*;
use web_sys::Element;

#[wasm_bindgen(js_namespace = bootstrap)]
extern "C" {
  pub type Toast;

  #[wasm_bindgen(constructor, catch)]
  pub fn new(
    element: &Element,
    options: &JsValue
  ) -> Result<Toast, JsValue>;

  #[wasm_bindgen(method)]
  pub fn show(this: &Toast);
}

#[wasm_bindgen(js_namespace = bootstrap)]
extern "C" {
  pub type Modal;

  #[wasm_bindgen(constructor, catch)]
  pub fn new(
    element: &Element
  ) -> Result<Modal, JsValue>;

  #[wasm_bindgen(
    static_method_of = Modal,
    js_name = getInstance,
    catch
  )]
  pub fn get_instance(
    element: &Element
  ) -> Result<Option<Modal>, JsValue>;

  #[wasm_bindgen(method)]
  pub fn show(this: &Modal);

  #[wasm_bindgen(method)]
  pub fn hide(this: &Modal);
}

#[wasm_bindgen(js_namespace = bootstrap)]
extern "C" {
  pub type Alert;

  #[wasm_bindgen(constructor, catch)]
  pub fn new(
    element: &Element
  ) -> Result<Alert, JsValue>;

  #[wasm_bindgen(method)]
  pub fn close(this: &Alert);
}

#[wasm_bindgen(js_namespace = bootstrap)]
extern "C" {
  pub type Tooltip;

  #[wasm_bindgen(constructor, catch)]
  pub fn new(
    element: &Element
  ) -> Result<Tooltip, JsValue>;
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ToastOptions {
  pub autohide: bool,
  pub delay:    u32
}

impl ToastOptions {
  pub fn to_js(
    self
  ) -> Result<JsValue, String> {
    serde_wasm_bindgen::to_value(&self)
      .map_err(|e| {
        format!(
          "failed to encode toast \
           options: {e}"
        )
      })
  }
}

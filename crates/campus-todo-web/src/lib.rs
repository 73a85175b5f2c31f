//! Browser entry point for the Campus
//! To-Do pages.
//!
//! The server renders every page; this
//! module only wires behaviour onto it.

mod api;
mod bootstrap;
mod config;
mod dom;
mod export;
mod forms;
mod globals;
mod lifecycle;
mod navigation;
mod shortcuts;
mod storage;
mod toast;

use campus_todo_core::APP_NAME;
use gloo::events::EventListener;
use wasm_bindgen::prelude::*;
use web_sys::Document;

pub use api::HttpCompletionClient;
pub use dom::DomTaskRow;
pub use toast::{
  ToastNotifier,
  show_toast
};

const BANNER_STYLE: &str =
  "color: #0d6efd; font-size: 16px; \
   font-weight: bold;";
const HINT_STYLE: &str = "color: #6c757d;";

#[wasm_bindgen(start)]
pub fn start() {
  console_error_panic_hook::set_once();
  wasm_tracing::set_as_global_default();

  gloo::console::log!(
    format!("%c{APP_NAME}"),
    BANNER_STYLE
  );
  gloo::console::log!(
    "%cCampus task management, loaded.",
    HINT_STYLE
  );

  let Some(window) = web_sys::window() else {
    tracing::error!("no window; nothing to wire");
    return;
  };
  let Some(document) = window.document() else {
    tracing::error!("no document; nothing to wire");
    return;
  };

  globals::install(&window);
  lifecycle::init_lifecycle_listeners(
    &window, &document
  );

  if document.ready_state() == "loading" {
    let ready = document.clone();
    EventListener::once(
      &document,
      "DOMContentLoaded",
      move |_| init_page(&ready)
    )
    .forget();
  } else {
    init_page(&document);
  }
}

fn init_page(document: &Document) {
  let config = config::config();

  forms::init_tooltips(document);
  forms::init_character_counters(
    document,
    &config.limits
  );
  forms::init_deadline_picker(document);
  forms::init_auto_close_alerts(
    document,
    config.alert_close_ms
  );
  forms::init_search_debounce(
    document,
    config.search_debounce_ms
  );
  shortcuts::init_keyboard_shortcuts(document);
  storage::init_theme();

  tracing::info!(
    api_base = %config.api_base,
    "page wired"
  );
}

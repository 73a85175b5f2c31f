use campus_todo_core::shortcuts::{
  NEW_TASK_LINK_SELECTOR,
  OPEN_MODAL_SELECTOR,
  SEARCH_INPUT_SELECTOR,
  Shortcut
};
use gloo::events::{
  EventListener,
  EventListenerOptions
};
use wasm_bindgen::JsCast;
use web_sys::{
  Document,
  HtmlAnchorElement,
  HtmlElement,
  KeyboardEvent
};

use crate::bootstrap;
use crate::dom::query_all;

pub fn init_keyboard_shortcuts(
  document: &Document
) {
  let target = document.clone();
  EventListener::new_with_options(
    document,
    "keydown",
    EventListenerOptions::enable_prevent_default(),
    move |event| {
      let Some(event) =
        event.dyn_ref::<KeyboardEvent>()
      else {
        return;
      };
      let Some(shortcut) = Shortcut::from_key(
        &event.key(),
        event.ctrl_key(),
        event.meta_key()
      ) else {
        return;
      };

      if shortcut.prevents_default_eagerly() {
        event.prevent_default();
      }
      run(&target, shortcut, event);
    }
  )
  .forget();
}

fn run(
  document: &Document,
  shortcut: Shortcut,
  event: &KeyboardEvent
) {
  tracing::debug!(?shortcut, "keyboard shortcut");
  match shortcut {
    | Shortcut::NewTask => open_new_task(document),
    | Shortcut::FocusSearch => {
      let Some(search) = document
        .query_selector(SEARCH_INPUT_SELECTOR)
        .ok()
        .flatten()
        .and_then(|element| {
          element.dyn_into::<HtmlElement>().ok()
        })
      else {
        return;
      };
      event.prevent_default();
      if let Err(error) = search.focus() {
        tracing::warn!(error = ?error, "failed to focus search");
      }
    }
    | Shortcut::CloseModals => close_open_modals(document)
  }
}

fn open_new_task(document: &Document) {
  let Some(href) = document
    .query_selector(NEW_TASK_LINK_SELECTOR)
    .ok()
    .flatten()
    .and_then(|element| {
      element
        .dyn_into::<HtmlAnchorElement>()
        .ok()
    })
    .map(|link| link.href())
  else {
    return;
  };

  let navigated = web_sys::window()
    .map(|window| window.location().set_href(&href));
  if let Some(Err(error)) = navigated {
    tracing::error!(%href, error = ?error, "failed to open new task form");
  }
}

fn close_open_modals(document: &Document) {
  for element in
    query_all(document, OPEN_MODAL_SELECTOR)
  {
    match bootstrap::Modal::get_instance(&element)
    {
      | Ok(Some(modal)) => modal.hide(),
      | Ok(None) => {}
      | Err(error) => {
        tracing::warn!(error = ?error, "failed to look up modal");
      }
    }
  }
}

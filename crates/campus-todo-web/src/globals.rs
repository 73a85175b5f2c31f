//! Functions the server templates call by
//! name from `onclick`/`onsubmit`
//! attributes, installed on `window`.

use campus_todo_core::export::ExportFormat;
use campus_todo_core::notify::number_text;
use campus_todo_core::{
  Severity,
  TaskToggle
};
use wasm_bindgen::closure::WasmClosure;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{
  Element,
  Window
};

use crate::api::HttpCompletionClient;
use crate::config::config;
use crate::dom::{
  self,
  DomTaskRow,
  task_ref_from_js
};
use crate::toast::{
  ToastNotifier,
  show_toast
};
use crate::{
  export,
  forms,
  navigation,
  storage
};

pub fn install(window: &Window) {
  set(
    window,
    "toggleTaskComplete",
    Closure::<dyn Fn(JsValue, JsValue)>::new(
      toggle_task_complete
    )
  );
  set(
    window,
    "showToast",
    Closure::<dyn Fn(JsValue, JsValue)>::new(
      |message: JsValue, kind: JsValue| {
        let message = message_text(&message);
        let severity = kind
          .as_string()
          .map(|raw| Severity::parse(&raw))
          .unwrap_or_default();
        show_toast(&message, severity);
      }
    )
  );
  set(
    window,
    "exportTasks",
    Closure::<dyn Fn(JsValue)>::new(
      |format: JsValue| {
        let format = format
          .as_string()
          .map(|raw| ExportFormat::parse(&raw))
          .unwrap_or_default();
        spawn_local(export::export_tasks(
          config(),
          format
        ));
      }
    )
  );
  set(
    window,
    "toggleDarkMode",
    Closure::<dyn Fn()>::new(
      storage::toggle_dark_mode
    )
  );
  set(
    window,
    "sortTasks",
    Closure::<dyn Fn(JsValue)>::new(
      |sort_by: JsValue| {
        let sort_by =
          sort_by.as_string().unwrap_or_default();
        if let Err(error) =
          navigation::sort_tasks(&sort_by)
        {
          tracing::error!(error = ?error, "failed to re-sort tasks");
        }
      }
    )
  );
  set(
    window,
    "confirmDelete",
    Closure::<dyn Fn(JsValue, JsValue)>::new(
      confirm_delete
    )
  );
  set(
    window,
    "confirmDeleteCategory",
    Closure::<dyn Fn(JsValue, JsValue)>::new(
      confirm_delete_category
    )
  );
  set(
    window,
    "validateTaskForm",
    Closure::<dyn Fn(JsValue) -> bool>::new(
      |form: JsValue| match form
        .dyn_into::<Element>()
      {
        | Ok(form) => {
          forms::validate_task_form(
            &form,
            &config().limits
          )
        }
        | Err(_) => {
          tracing::warn!(
            "validateTaskForm called \
             without a form"
          );
          true
        }
      }
    )
  );
}

/// Coerces whatever a template passed as
/// the toast message into text.
fn message_text(value: &JsValue) -> String {
  if let Some(text) = value.as_string() {
    return text;
  }
  if let Some(number) = value.as_f64() {
    return number_text(number);
  }
  if let Some(flag) = value.as_bool() {
    return flag.to_string();
  }
  js_sys::JSON::stringify(value)
    .ok()
    .and_then(|json| json.as_string())
    .unwrap_or_default()
}

fn set<F>(
  window: &Window,
  name: &str,
  closure: Closure<F>
) where
  F: ?Sized + WasmClosure
{
  match js_sys::Reflect::set(
    window,
    &JsValue::from_str(name),
    closure.as_ref()
  ) {
    | Ok(_) => closure.forget(),
    | Err(error) => {
      tracing::error!(name, error = ?error, "failed to install global");
    }
  }
}

fn toggle_task_complete(
  task_id: JsValue,
  button: JsValue
) {
  let task = match task_ref_from_js(&task_id)
  {
    | Ok(task) => task,
    | Err(error) => {
      tracing::error!(%error, "refusing completion toggle");
      return;
    }
  };
  let control = match button
    .dyn_into::<Element>()
  {
    | Ok(control) => control,
    | Err(_) => {
      tracing::error!(task = %task, "toggle control is not an element");
      return;
    }
  };

  let mut row = DomTaskRow::from_control(control);
  spawn_local(async move {
    let toggle = TaskToggle::new(
      HttpCompletionClient::new(config()),
      ToastNotifier
    );
    let outcome =
      toggle.toggle(&task, &mut row).await;
    tracing::debug!(?outcome, "toggle settled");
  });
}

fn confirm_delete(
  task_id: JsValue,
  title: JsValue
) {
  let Some(document) = dom::document() else {
    return;
  };
  let result = task_ref_from_js(&task_id)
    .map_err(|e| JsValue::from_str(&e.to_string()))
    .and_then(|task| {
      navigation::confirm_delete(
        &document,
        config(),
        &task,
        &title.as_string().unwrap_or_default()
      )
    });
  if let Err(error) = result {
    tracing::error!(error = ?error, "delete confirmation failed");
  }
}

fn confirm_delete_category(
  category_id: JsValue,
  name: JsValue
) {
  let Some(document) = dom::document() else {
    return;
  };
  let result = task_ref_from_js(&category_id)
    .map_err(|e| JsValue::from_str(&e.to_string()))
    .and_then(|category| {
      navigation::confirm_delete_category(
        &document,
        config(),
        &category,
        &name.as_string().unwrap_or_default()
      )
    });
  if let Err(error) = result {
    tracing::error!(error = ?error, "category delete failed");
  }
}

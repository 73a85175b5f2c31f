use campus_todo_core::{
  ClientConfig,
  TaskRef
};
use wasm_bindgen::{
  JsCast,
  JsValue
};
use web_sys::{
  Document,
  HtmlFormElement,
  Url
};

use crate::bootstrap;

const DELETE_TITLE_ID: &str =
  "deleteTaskTitle";
const DELETE_FORM_ID: &str = "deleteForm";
const DELETE_MODAL_ID: &str =
  "deleteModal";

/// Reloads the list with `?sort=` set,
/// keeping every other query parameter.
pub fn sort_tasks(
  sort_by: &str
) -> Result<(), JsValue> {
  let window = web_sys::window()
    .ok_or_else(|| JsValue::from_str("no window"))?;
  let location = window.location();
  let url = Url::new(&location.href()?)?;
  url.search_params().set("sort", sort_by);
  tracing::debug!(sort_by, "re-sorting task list");
  location.set_href(&url.href())
}

pub fn confirm_delete(
  document: &Document,
  config: &ClientConfig,
  task: &TaskRef,
  title: &str
) -> Result<(), JsValue> {
  if let Some(label) =
    document.get_element_by_id(DELETE_TITLE_ID)
  {
    label.set_text_content(Some(title));
  }

  let form = document
    .get_element_by_id(DELETE_FORM_ID)
    .and_then(|element| {
      element.dyn_into::<HtmlFormElement>().ok()
    })
    .ok_or_else(|| {
      JsValue::from_str("delete form missing")
    })?;
  form.set_action(
    &config.task_delete_path(task)
  );

  let modal = document
    .get_element_by_id(DELETE_MODAL_ID)
    .ok_or_else(|| {
      JsValue::from_str("delete modal missing")
    })?;
  bootstrap::Modal::new(&modal)?.show();
  Ok(())
}

/// Asks first, then posts a throwaway
/// form so the server redirect lands as a
/// normal navigation.
pub fn confirm_delete_category(
  document: &Document,
  config: &ClientConfig,
  category: &TaskRef,
  name: &str
) -> Result<(), JsValue> {
  let question = format!(
    "Delete category \"{name}\"?\n\
     Its tasks will become uncategorized."
  );
  let confirmed = web_sys::window()
    .and_then(|window| {
      window
        .confirm_with_message(&question)
        .ok()
    })
    .unwrap_or(false);
  if !confirmed {
    return Ok(());
  }

  let form = document
    .create_element("form")?
    .dyn_into::<HtmlFormElement>()?;
  form.set_method("POST");
  form.set_action(
    &config.category_delete_path(category)
  );
  document
    .body()
    .ok_or_else(|| {
      JsValue::from_str("document has no body")
    })?
    .append_child(&form)?;
  tracing::info!(category = %category, "deleting category");
  form.submit()
}

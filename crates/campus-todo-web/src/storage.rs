use campus_todo_core::storage::{
  DARK_MODE_CLASS,
  DARK_MODE_KEY,
  PrefixedStore,
  StorageBackend,
  StorageError
};
use wasm_bindgen::JsValue;

use crate::config::config;
use crate::dom;

/// `window.localStorage`, if the browser
/// grants it. Private modes may not.
pub struct LocalStorageBackend {
  storage: Option<web_sys::Storage>
}

impl LocalStorageBackend {
  pub fn new() -> Self {
    let storage = web_sys::window()
      .and_then(|window| {
        window.local_storage().ok().flatten()
      });
    if storage.is_none() {
      tracing::warn!(
        "localStorage unavailable; \
         preferences will not persist"
      );
    }
    Self { storage }
  }

  fn storage(
    &self
  ) -> Result<&web_sys::Storage, StorageError>
  {
    self
      .storage
      .as_ref()
      .ok_or(StorageError::Unavailable)
  }
}

fn backend_error(
  operation: &'static str,
  key: &str,
  error: JsValue
) -> StorageError {
  StorageError::Backend {
    operation,
    key: key.to_string(),
    reason: format!("{error:?}")
  }
}

impl StorageBackend for LocalStorageBackend {
  fn get_item(
    &self,
    key: &str
  ) -> Result<Option<String>, StorageError>
  {
    self
      .storage()?
      .get_item(key)
      .map_err(|e| backend_error("get", key, e))
  }

  fn set_item(
    &self,
    key: &str,
    value: &str
  ) -> Result<(), StorageError> {
    self
      .storage()?
      .set_item(key, value)
      .map_err(|e| backend_error("set", key, e))
  }

  fn remove_item(
    &self,
    key: &str
  ) -> Result<(), StorageError> {
    self
      .storage()?
      .remove_item(key)
      .map_err(|e| {
        backend_error("remove", key, e)
      })
  }
}

pub fn store() -> PrefixedStore<LocalStorageBackend>
{
  PrefixedStore::new(
    LocalStorageBackend::new(),
    config().storage_prefix.clone()
  )
}

/// Re-applies a stored dark-mode choice.
pub fn init_theme() {
  if store().get(DARK_MODE_KEY, false) {
    apply_dark_mode(true);
  }
}

pub fn toggle_dark_mode() {
  let Some(body) =
    dom::document().and_then(|d| d.body())
  else {
    return;
  };
  let enabled = !body
    .class_list()
    .contains(DARK_MODE_CLASS);
  apply_dark_mode(enabled);
  store().set(DARK_MODE_KEY, &enabled);
  tracing::info!(enabled, "dark mode toggled");
}

fn apply_dark_mode(enabled: bool) {
  if let Some(body) =
    dom::document().and_then(|d| d.body())
  {
    dom::set_class(
      &body,
      DARK_MODE_CLASS,
      enabled
    );
  }
}

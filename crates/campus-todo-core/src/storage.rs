use std::cell::RefCell;
use std::collections::BTreeMap;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub const DARK_MODE_KEY: &str =
  "darkMode";
pub const DARK_MODE_CLASS: &str =
  "dark-mode";

#[derive(
  Debug, Clone, PartialEq, Eq, Error,
)]
pub enum StorageError {
  #[error("local storage is unavailable")]
  Unavailable,
  #[error(
    "storage {operation} failed for \
     {key}: {reason}"
  )]
  Backend {
    operation: &'static str,
    key:       String,
    reason:    String
  }
}

/// Raw string key/value store, e.g.
/// `window.localStorage`.
pub trait StorageBackend {
  fn get_item(
    &self,
    key: &str
  ) -> Result<Option<String>, StorageError>;

  fn set_item(
    &self,
    key: &str,
    value: &str
  ) -> Result<(), StorageError>;

  fn remove_item(
    &self,
    key: &str
  ) -> Result<(), StorageError>;
}

/// In-memory backend.
#[derive(Debug, Default)]
pub struct MemoryBackend {
  items: RefCell<BTreeMap<String, String>>
}

impl MemoryBackend {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn raw(
    &self,
    key: &str
  ) -> Option<String> {
    self.items.borrow().get(key).cloned()
  }
}

impl StorageBackend for MemoryBackend {
  fn get_item(
    &self,
    key: &str
  ) -> Result<Option<String>, StorageError>
  {
    Ok(self.raw(key))
  }

  fn set_item(
    &self,
    key: &str,
    value: &str
  ) -> Result<(), StorageError> {
    self.items.borrow_mut().insert(
      key.to_string(),
      value.to_string()
    );
    Ok(())
  }

  fn remove_item(
    &self,
    key: &str
  ) -> Result<(), StorageError> {
    self.items.borrow_mut().remove(key);
    Ok(())
  }
}

/// JSON values under a common key prefix.
///
/// Errors are logged and swallowed: a
/// failed write is dropped and a failed
/// read yields the caller's default.
#[derive(Debug)]
pub struct PrefixedStore<B> {
  backend: B,
  prefix:  String
}

impl<B: StorageBackend> PrefixedStore<B> {
  pub fn new(
    backend: B,
    prefix: impl Into<String>
  ) -> Self {
    Self {
      backend,
      prefix: prefix.into()
    }
  }

  pub fn backend(&self) -> &B {
    &self.backend
  }

  pub fn key(&self, key: &str) -> String {
    format!("{}{key}", self.prefix)
  }

  pub fn set<T>(
    &self,
    key: &str,
    value: &T
  ) where
    T: Serialize + ?Sized
  {
    let full = self.key(key);
    let json = match serde_json::to_string(
      value
    ) {
      | Ok(json) => json,
      | Err(error) => {
        tracing::error!(key = %full, %error, "failed encoding stored value");
        return;
      }
    };
    if let Err(error) =
      self.backend.set_item(&full, &json)
    {
      tracing::error!(%error, "storage set failed");
    }
  }

  pub fn get<T>(
    &self,
    key: &str,
    default: T
  ) -> T
  where
    T: DeserializeOwned
  {
    let full = self.key(key);
    let raw = match self
      .backend
      .get_item(&full)
    {
      | Ok(Some(raw))
        if !raw.is_empty() =>
      {
        raw
      }
      | Ok(_) => return default,
      | Err(error) => {
        tracing::error!(%error, "storage get failed");
        return default;
      }
    };

    match serde_json::from_str::<T>(&raw) {
      | Ok(value) => value,
      | Err(error) => {
        tracing::error!(key = %full, %error, "failed parsing stored value");
        default
      }
    }
  }

  pub fn remove(&self, key: &str) {
    if let Err(error) = self
      .backend
      .remove_item(&self.key(key))
    {
      tracing::error!(%error, "storage remove failed");
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  struct BrokenBackend;

  impl StorageBackend for BrokenBackend {
    fn get_item(
      &self,
      _key: &str
    ) -> Result<Option<String>, StorageError>
    {
      Err(StorageError::Unavailable)
    }

    fn set_item(
      &self,
      key: &str,
      _value: &str
    ) -> Result<(), StorageError> {
      Err(StorageError::Backend {
        operation: "set",
        key:       key.to_string(),
        reason:    "QuotaExceededError"
          .to_string()
      })
    }

    fn remove_item(
      &self,
      _key: &str
    ) -> Result<(), StorageError> {
      Err(StorageError::Unavailable)
    }
  }

  #[test]
  fn values_are_prefixed_json() {
    let store = PrefixedStore::new(
      MemoryBackend::new(),
      "campus_todo_"
    );
    store.set(DARK_MODE_KEY, &true);
    store.set("filters", &vec!["today", "study"]);

    assert_eq!(
      store
        .backend()
        .raw("campus_todo_darkMode")
        .as_deref(),
      Some("true")
    );
    assert!(store.get(DARK_MODE_KEY, false));
    assert_eq!(
      store.get::<Vec<String>>(
        "filters",
        vec![]
      ),
      vec!["today", "study"]
    );
  }

  #[test]
  fn missing_empty_or_corrupt_values_use_default()
  {
    let backend = MemoryBackend::new();
    backend
      .set_item("campus_todo_empty", "")
      .expect("seed empty");
    backend
      .set_item(
        "campus_todo_corrupt",
        "{not json"
      )
      .expect("seed corrupt");
    let store = PrefixedStore::new(
      backend,
      "campus_todo_"
    );

    assert_eq!(store.get("absent", 7_u32), 7);
    assert_eq!(store.get("empty", 7_u32), 7);
    assert_eq!(store.get("corrupt", 7_u32), 7);
  }

  #[test]
  fn remove_only_touches_prefixed_key() {
    let backend = MemoryBackend::new();
    backend
      .set_item("darkMode", "true")
      .expect("seed foreign key");
    let store = PrefixedStore::new(
      backend,
      "campus_todo_"
    );
    store.set(DARK_MODE_KEY, &true);
    store.remove(DARK_MODE_KEY);

    assert!(!store.get(DARK_MODE_KEY, false));
    assert_eq!(
      store.backend().raw("darkMode").as_deref(),
      Some("true")
    );
  }

  #[test]
  fn backend_failures_never_escape() {
    let store = PrefixedStore::new(
      BrokenBackend,
      "campus_todo_"
    );
    store.set("theme", "night");
    store.remove("theme");
    assert_eq!(
      store.get("theme", "day".to_string()),
      "day"
    );
  }
}

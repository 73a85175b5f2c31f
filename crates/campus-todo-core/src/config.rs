use anyhow::Context;
use serde::{
  Deserialize,
  Serialize
};
use tracing::{
  debug,
  warn
};

fn default_toast_delay_ms() -> u32 {
  3_000
}

fn default_alert_close_ms() -> u32 {
  5_000
}

fn default_storage_prefix() -> String {
  "campus_todo_".to_string()
}

fn default_search_debounce_ms() -> u32
{
  300
}

fn default_title_max() -> usize {
  50
}

fn default_title_warn() -> usize {
  45
}

fn default_description_max() -> usize {
  500
}

fn default_description_warn() -> usize
{
  450
}

#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
)]
pub struct ClientConfig {
  /// Prefix for every endpoint path, for
  /// deployments mounted below `/`.
  #[serde(default)]
  pub api_base:           String,
  #[serde(
    default = "default_toast_delay_ms"
  )]
  pub toast_delay_ms:     u32,
  #[serde(
    default = "default_alert_close_ms"
  )]
  pub alert_close_ms:     u32,
  #[serde(
    default = "default_storage_prefix"
  )]
  pub storage_prefix:     String,
  #[serde(
    default = "default_search_debounce_ms"
  )]
  pub search_debounce_ms: u32,
  #[serde(default)]
  pub limits:             FieldLimits
}

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
)]
pub struct FieldLimits {
  #[serde(default = "default_title_max")]
  pub title_max:        usize,
  #[serde(default = "default_title_warn")]
  pub title_warn:       usize,
  #[serde(
    default = "default_description_max"
  )]
  pub description_max:  usize,
  #[serde(
    default = "default_description_warn"
  )]
  pub description_warn: usize
}

impl Default for FieldLimits {
  fn default() -> Self {
    Self {
      title_max:        default_title_max(
      ),
      title_warn:       default_title_warn(
      ),
      description_max:
        default_description_max(),
      description_warn:
        default_description_warn()
    }
  }
}

impl Default for ClientConfig {
  fn default() -> Self {
    Self {
      api_base:           String::new(),
      toast_delay_ms:
        default_toast_delay_ms(),
      alert_close_ms:
        default_alert_close_ms(),
      storage_prefix:
        default_storage_prefix(),
      search_debounce_ms:
        default_search_debounce_ms(),
      limits:             FieldLimits::default(
      )
    }
  }
}

impl ClientConfig {
  #[tracing::instrument(skip(text))]
  pub fn from_toml_str(
    text: &str
  ) -> anyhow::Result<Self> {
    let mut config =
      toml::from_str::<ClientConfig>(text)
        .context(
          "failed to parse client config"
        )?;
    config.sanitize();
    debug!(
      api_base = %config.api_base,
      toast_delay_ms = config.toast_delay_ms,
      "loaded client config"
    );
    Ok(config)
  }

  /// Parses `text`, logging and falling
  /// back to defaults when it is invalid.
  pub fn from_toml_or_default(
    text: &str
  ) -> Self {
    match Self::from_toml_str(text) {
      | Ok(config) => config,
      | Err(error) => {
        tracing::error!(error = %format!("{error:#}"), "invalid client config; using defaults");
        Self::default()
      }
    }
  }

  /// Layers a page-provided override on
  /// top of `self`. Keys absent from the
  /// override keep their current value.
  pub fn merged_with(
    &self,
    override_text: &str
  ) -> anyhow::Result<Self> {
    let toml::Value::Table(mut base) =
      toml::Value::try_from(self)
        .context(
          "failed to encode base client \
           config"
        )?
    else {
      anyhow::bail!(
        "client config did not encode \
         as a table"
      );
    };
    let overlay = override_text
      .parse::<toml::Table>()
      .context(
        "failed to parse client config \
         override"
      )?;
    merge_tables(&mut base, overlay);

    let mut merged: ClientConfig =
      toml::Value::Table(base)
        .try_into()
        .context(
          "client config override has \
           invalid values"
        )?;
    merged.sanitize();
    Ok(merged)
  }

  pub fn sanitize(&mut self) {
    let trimmed = self
      .api_base
      .trim()
      .trim_end_matches('/')
      .to_string();
    self.api_base = trimmed;

    if self.toast_delay_ms == 0 {
      warn!(
        "toast_delay_ms was zero; using \
         default"
      );
      self.toast_delay_ms =
        default_toast_delay_ms();
    }
    if self.alert_close_ms == 0 {
      self.alert_close_ms =
        default_alert_close_ms();
    }
    if self.storage_prefix.trim().is_empty()
    {
      self.storage_prefix =
        default_storage_prefix();
    }

    let limits = &mut self.limits;
    if limits.title_max == 0 {
      limits.title_max =
        default_title_max();
    }
    if limits.title_warn
      > limits.title_max
    {
      limits.title_warn =
        limits.title_max;
    }
    if limits.description_max == 0 {
      limits.description_max =
        default_description_max();
    }
    if limits.description_warn
      > limits.description_max
    {
      limits.description_warn =
        limits.description_max;
    }
  }

  /// Path of the completion endpoint for
  /// an already validated task reference.
  pub fn completion_path(
    &self,
    task: &crate::TaskRef
  ) -> String {
    format!(
      "{}/tasks/{}/complete",
      self.api_base,
      task.as_str()
    )
  }

  pub fn task_list_path(&self) -> String {
    format!("{}/api/tasks", self.api_base)
  }

  pub fn task_delete_path(
    &self,
    task: &crate::TaskRef
  ) -> String {
    format!(
      "{}/tasks/{}/delete",
      self.api_base,
      task.as_str()
    )
  }

  pub fn category_delete_path(
    &self,
    category: &crate::TaskRef
  ) -> String {
    format!(
      "{}/categories/{}/delete",
      self.api_base,
      category.as_str()
    )
  }
}

fn merge_tables(
  base: &mut toml::Table,
  overlay: toml::Table
) {
  for (key, value) in overlay {
    match value {
      | toml::Value::Table(nested) => {
        if let Some(toml::Value::Table(
          existing
        )) = base.get_mut(&key)
        {
          merge_tables(existing, nested);
        } else {
          base.insert(
            key,
            toml::Value::Table(nested)
          );
        }
      }
      | value => {
        base.insert(key, value);
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::TaskRef;

  #[test]
  fn empty_document_yields_defaults() {
    let config =
      ClientConfig::from_toml_str("")
        .expect("parse empty config");
    assert_eq!(
      config,
      ClientConfig::default()
    );
    assert_eq!(config.toast_delay_ms, 3_000);
    assert_eq!(
      config.storage_prefix,
      "campus_todo_"
    );
  }

  #[test]
  fn sanitize_repairs_zero_and_inverted_limits()
  {
    let config = ClientConfig::from_toml_str(
      r#"
        api_base = " /todo/ "
        toast_delay_ms = 0
        storage_prefix = "  "

        [limits]
        title_max = 20
        title_warn = 40
        description_max = 0
      "#
    )
    .expect("parse config");

    assert_eq!(config.api_base, "/todo");
    assert_eq!(config.toast_delay_ms, 3_000);
    assert_eq!(
      config.storage_prefix,
      "campus_todo_"
    );
    assert_eq!(config.limits.title_max, 20);
    assert_eq!(config.limits.title_warn, 20);
    assert_eq!(
      config.limits.description_max,
      500
    );
  }

  #[test]
  fn invalid_document_falls_back_to_defaults()
  {
    assert!(
      ClientConfig::from_toml_str(
        "toast_delay_ms = \"soon\""
      )
      .is_err()
    );
    assert_eq!(
      ClientConfig::from_toml_or_default(
        "toast_delay_ms = \"soon\""
      ),
      ClientConfig::default()
    );
  }

  #[test]
  fn override_keeps_unset_keys() {
    let base = ClientConfig::from_toml_str(
      r#"
        alert_close_ms = 8000
        [limits]
        title_warn = 40
      "#
    )
    .expect("parse base");

    let merged = base
      .merged_with(
        r#"
          api_base = "/campus"
          [limits]
          description_warn = 400
        "#
      )
      .expect("merge override");

    assert_eq!(merged.api_base, "/campus");
    assert_eq!(merged.alert_close_ms, 8_000);
    assert_eq!(merged.limits.title_warn, 40);
    assert_eq!(
      merged.limits.description_warn,
      400
    );
    assert_eq!(
      merged.limits.description_max,
      500
    );
  }

  #[test]
  fn endpoint_paths_respect_api_base() {
    let task =
      TaskRef::parse("42").expect("task");
    let mut config =
      ClientConfig::default();
    assert_eq!(
      config.completion_path(&task),
      "/tasks/42/complete"
    );
    assert_eq!(
      config.task_list_path(),
      "/api/tasks"
    );

    config.api_base = "/todo".to_string();
    assert_eq!(
      config.completion_path(&task),
      "/todo/tasks/42/complete"
    );
    assert_eq!(
      config.task_delete_path(&task),
      "/todo/tasks/42/delete"
    );
    assert_eq!(
      config.category_delete_path(&task),
      "/todo/categories/42/delete"
    );
  }
}

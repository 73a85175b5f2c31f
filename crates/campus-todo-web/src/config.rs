use std::sync::OnceLock;

use campus_todo_core::ClientConfig;

const DEFAULT_CONFIG_TOML: &str =
  include_str!("../assets/client.toml");
const CONFIG_SCRIPT_ID: &str =
  "campus-todo-config";

pub fn config() -> &'static ClientConfig {
  static CONFIG: OnceLock<ClientConfig> =
    OnceLock::new();
  CONFIG.get_or_init(load_config)
}

fn load_config() -> ClientConfig {
  let base =
    ClientConfig::from_toml_or_default(
      DEFAULT_CONFIG_TOML
    );

  let Some(text) = page_override() else {
    return base;
  };

  match base.merged_with(&text) {
    | Ok(config) => {
      tracing::info!(
        api_base = %config.api_base,
        "applied page config override"
      );
      config
    }
    | Err(error) => {
      tracing::error!(error = %format!("{error:#}"), "ignoring invalid page config override");
      base
    }
  }
}

fn page_override() -> Option<String> {
  web_sys::window()
    .and_then(|window| window.document())
    .and_then(|document| {
      document
        .get_element_by_id(CONFIG_SCRIPT_ID)
    })
    .and_then(|script| {
      script.text_content()
    })
    .filter(|text| !text.trim().is_empty())
}

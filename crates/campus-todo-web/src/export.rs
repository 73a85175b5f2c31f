use campus_todo_core::export::{
  ExportFile,
  ExportFormat,
  MSG_EXPORT_FAILED,
  OBJECT_URL_TTL_MS,
  build_export
};
use campus_todo_core::{
  ClientConfig,
  Severity
};
use chrono::Utc;
use gloo::timers::callback::Timeout;
use js_sys::Array;
use wasm_bindgen::{
  JsCast,
  JsValue
};
use web_sys::{
  Blob,
  BlobPropertyBag,
  HtmlAnchorElement,
  Url
};

use crate::api::fetch_task_list;
use crate::dom;
use crate::toast::show_toast;

/// Fetches every task and hands the
/// encoded file to the browser. Any
/// failure ends in a single toast.
#[tracing::instrument(skip(config))]
pub async fn export_tasks(
  config: &ClientConfig,
  format: ExportFormat
) {
  if let Err(error) =
    try_export(config, format).await
  {
    tracing::error!(%error, "task export failed");
    show_toast(
      MSG_EXPORT_FAILED,
      Severity::Danger
    );
  }
}

async fn try_export(
  config: &ClientConfig,
  format: ExportFormat
) -> Result<(), String> {
  let envelope = fetch_task_list(config)
    .await
    .map_err(|e| e.to_string())?;
  tracing::debug!(
    count = envelope.count,
    received = envelope.data.len(),
    "fetched tasks for export"
  );

  let file = build_export(
    format,
    &envelope.data,
    Utc::now().date_naive()
  )
  .map_err(|e| e.to_string())?;

  download(&file)
    .map_err(|e| format!("download failed: {e:?}"))
}

fn download(
  file: &ExportFile
) -> Result<(), JsValue> {
  let document = dom::document()
    .ok_or_else(|| JsValue::from_str("no document"))?;
  let body = document
    .body()
    .ok_or_else(|| {
      JsValue::from_str("document has no body")
    })?;

  let parts = Array::of1(&JsValue::from_str(
    &file.content
  ));
  let options = BlobPropertyBag::new();
  options.set_type(&file.blob_type());
  let blob =
    Blob::new_with_str_sequence_and_options(
      &parts, &options
    )?;
  let url =
    Url::create_object_url_with_blob(&blob)?;

  let link = document
    .create_element("a")?
    .dyn_into::<HtmlAnchorElement>()?;
  link.set_href(&url);
  link.set_download(&file.name);
  link.style().set_property("display", "none")?;
  body.append_child(&link)?;
  link.click();
  link.remove();

  Timeout::new(OBJECT_URL_TTL_MS, move || {
    if let Err(error) =
      Url::revoke_object_url(&url)
    {
      tracing::warn!(error = ?error, "failed to revoke export url");
    }
  })
  .forget();
  tracing::info!(name = %file.name, "export downloaded");
  Ok(())
}

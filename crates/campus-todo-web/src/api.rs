use campus_todo_core::{
  ClientConfig,
  CompletionClient,
  TaskRef,
  TransportError
};
use campus_todo_shared::{
  TaskListEnvelope,
  ToggleResult
};
use gloo::net::http::{
  Request,
  Response
};
use serde::de::DeserializeOwned;

const AJAX_HEADER: (&str, &str) =
  ("X-Requested-With", "XMLHttpRequest");

/// `POST /tasks/{id}/complete` over
/// `fetch`.
///
/// The HTTP status is not checked: any
/// JSON body is handed to the toggle.
pub struct HttpCompletionClient<'a> {
  config: &'a ClientConfig
}

impl<'a> HttpCompletionClient<'a> {
  pub fn new(
    config: &'a ClientConfig
  ) -> Self {
    Self { config }
  }
}

impl CompletionClient
  for HttpCompletionClient<'_>
{
  async fn toggle_completion(
    &self,
    task: &TaskRef
  ) -> Result<ToggleResult, TransportError>
  {
    let url =
      self.config.completion_path(task);
    tracing::debug!(%url, "posting completion toggle");

    let response = Request::post(&url)
      .header(AJAX_HEADER.0, AJAX_HEADER.1)
      .header(
        "Content-Type",
        "application/json"
      )
      .send()
      .await
      .map_err(|e| {
        TransportError::Network(
          e.to_string()
        )
      })?;

    decode_json(response).await
  }
}

pub async fn fetch_task_list(
  config: &ClientConfig
) -> Result<TaskListEnvelope, TransportError>
{
  let url = config.task_list_path();
  let response = Request::get(&url)
    .header(AJAX_HEADER.0, AJAX_HEADER.1)
    .send()
    .await
    .map_err(|e| {
      TransportError::Network(e.to_string())
    })?;

  decode_json(response).await
}

async fn decode_json<T>(
  response: Response
) -> Result<T, TransportError>
where
  T: DeserializeOwned
{
  let status = response.status();
  if !response.ok() {
    tracing::warn!(
      status,
      url = %response.url(),
      "non-success status; decoding body \
       anyway"
    );
  }

  let body =
    response.text().await.map_err(|e| {
      TransportError::Network(e.to_string())
    })?;

  serde_json::from_str::<T>(&body).map_err(
    |e| TransportError::Decode(e.to_string())
  )
}

use campus_todo_core::Severity;
use gloo::events::EventListener;
use web_sys::{
  Document,
  VisibilityState,
  Window
};

use crate::toast::show_toast;

const MSG_ONLINE: &str =
  "Network connected";
const MSG_OFFLINE: &str =
  "Network disconnected; some features \
   may be unavailable";

pub fn init_lifecycle_listeners(
  window: &Window,
  document: &Document
) {
  let watched = document.clone();
  EventListener::new(
    document,
    "visibilitychange",
    move |_| {
      if watched.visibility_state()
        == VisibilityState::Visible
      {
        tracing::debug!(
          "page visible again; data may \
           be stale"
        );
      }
    }
  )
  .forget();

  EventListener::new(window, "online", |_| {
    tracing::info!("network online");
    show_toast(MSG_ONLINE, Severity::Success);
  })
  .forget();

  EventListener::new(window, "offline", |_| {
    tracing::warn!("network offline");
    show_toast(
      MSG_OFFLINE,
      Severity::Warning
    );
  })
  .forget();
}

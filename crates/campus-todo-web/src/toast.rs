//! Bootstrap toasts in a page-lifetime
//! container.
//!
//! The container and the live-toast
//! registry sit in a `thread_local`, so
//! only the UI thread ever touches them.

use std::cell::RefCell;

use campus_todo_core::notify::{
  CONTAINER_CLASS,
  CONTAINER_ID,
  CONTAINER_Z_INDEX,
  HEADER_TIMESTAMP,
  HEADER_TITLE
};
use campus_todo_core::{
  Notifier,
  Severity,
  Toast,
  ToastCenter,
  ToastId
};
use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use wasm_bindgen::{
  JsCast,
  JsValue
};
use web_sys::{
  Document,
  Element,
  HtmlElement
};

use crate::bootstrap::{
  self,
  ToastOptions
};
use crate::config::config;
use crate::dom;

const HIDDEN_EVENT: &str =
  "hidden.bs.toast";

thread_local! {
  static HOST: RefCell<Option<ToastHost>> =
    const { RefCell::new(None) };
}

struct ToastHost {
  container: Element,
  center:    ToastCenter
}

/// Shows toasts through the page's
/// shared container.
#[derive(Debug, Clone, Copy, Default)]
pub struct ToastNotifier;

impl Notifier for ToastNotifier {
  fn notify(
    &self,
    message: &str,
    severity: Severity
  ) {
    show_toast(message, severity);
  }
}

pub fn show_toast(
  message: &str,
  severity: Severity
) {
  let Some(document) = dom::document()
  else {
    tracing::warn!(
      toast = message,
      "no document; dropping toast"
    );
    return;
  };

  let mounted = HOST.with(
    |cell| -> Result<(ToastId, Element), JsValue> {
    let mut slot = cell.borrow_mut();
    if slot.is_none() {
      *slot =
        Some(ToastHost::attach(&document)?);
    }
    let Some(host) = slot.as_mut() else {
      return Err(JsValue::from_str(
        "toast host missing"
      ));
    };

    let toast = host.center.push(
      message,
      severity,
      js_sys::Date::now() as u64
    );
    let element =
      match render_toast(&document, &toast)
      {
        | Ok(element) => element,
        | Err(error) => {
          host.center.dismiss(toast.id);
          return Err(error);
        }
      };
    if let Err(error) =
      host.container.append_child(&element)
    {
      host.center.dismiss(toast.id);
      return Err(error);
    }
    Ok((toast.id, element))
  });

  let (id, element) = match mounted {
    | Ok(mounted) => mounted,
    | Err(error) => {
      tracing::error!(error = ?error, toast = message, "failed to mount toast");
      return;
    }
  };

  {
    let target = element.clone();
    EventListener::once(
      &element,
      HIDDEN_EVENT,
      move |_| forget_toast(id, &target)
    )
    .forget();
  }

  let delay = config().toast_delay_ms;
  let shown = ToastOptions {
    autohide: true,
    delay
  }
  .to_js()
  .and_then(|options| {
    bootstrap::Toast::new(
      &element, &options
    )
    .map_err(|e| format!("{e:?}"))
  });

  match shown {
    | Ok(toast) => toast.show(),
    | Err(error) => {
      tracing::warn!(
        %error,
        "bootstrap toast unavailable; \
         using plain timeout"
      );
      dom::set_class(&element, "show", true);
      Timeout::new(delay, move || {
        forget_toast(id, &element)
      })
      .forget();
    }
  }
}

fn forget_toast(
  id: ToastId,
  element: &Element
) {
  element.remove();
  HOST.with(|cell| {
    if let Some(host) =
      cell.borrow_mut().as_mut()
    {
      host.center.dismiss(id);
      tracing::trace!(
        id = %id,
        live = host.center.len(),
        "toast removed"
      );
    }
  });
}

impl ToastHost {
  /// Adopts a server-rendered container
  /// or creates one at the end of
  /// `<body>`.
  fn attach(
    document: &Document
  ) -> Result<Self, JsValue> {
    if let Some(container) =
      document.get_element_by_id(CONTAINER_ID)
    {
      return Ok(Self {
        container,
        center: ToastCenter::new()
      });
    }

    let container =
      document.create_element("div")?;
    container.set_id(CONTAINER_ID);
    container.set_class_name(CONTAINER_CLASS);
    if let Some(html) =
      container.dyn_ref::<HtmlElement>()
    {
      html
        .style()
        .set_property("z-index", CONTAINER_Z_INDEX)?;
    }

    let body = document.body().ok_or_else(
      || JsValue::from_str("document has no body")
    )?;
    body.append_child(&container)?;
    tracing::debug!("created toast container");

    Ok(Self {
      container,
      center: ToastCenter::new()
    })
  }
}

fn render_toast(
  document: &Document,
  toast: &Toast
) -> Result<Element, JsValue> {
  let root = element(document, "div", "toast")?;
  root.set_id(&toast.id.dom_id());
  root.set_attribute("role", "alert")?;
  root.set_attribute("aria-live", "assertive")?;
  root.set_attribute("aria-atomic", "true")?;

  let header =
    element(document, "div", "toast-header")?;
  let icon = element(
    document,
    "i",
    &toast.icon_classes()
  )?;
  let title =
    element(document, "strong", "me-auto")?;
  title.set_text_content(Some(HEADER_TITLE));
  let stamp = document.create_element("small")?;
  stamp.set_text_content(Some(HEADER_TIMESTAMP));
  let close =
    element(document, "button", "btn-close")?;
  close.set_attribute("type", "button")?;
  close.set_attribute("data-bs-dismiss", "toast")?;
  close.set_attribute("aria-label", "Close")?;
  header.append_child(&icon)?;
  header.append_child(&title)?;
  header.append_child(&stamp)?;
  header.append_child(&close)?;

  let body =
    element(document, "div", "toast-body")?;
  body.set_text_content(Some(&toast.message));

  root.append_child(&header)?;
  root.append_child(&body)?;
  Ok(root)
}

fn element(
  document: &Document,
  tag: &str,
  class: &str
) -> Result<Element, JsValue> {
  let element = document.create_element(tag)?;
  element.set_class_name(class);
  Ok(element)
}

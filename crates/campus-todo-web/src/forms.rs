use std::cell::RefCell;
use std::rc::Rc;

use campus_todo_core::config::FieldLimits;
use campus_todo_core::counter::{
  CharCounter,
  CounterLevel,
  DANGER_CLASS,
  WARNING_CLASS
};
use campus_todo_core::deadline::{
  MSG_PAST_DEADLINE,
  is_in_past,
  picker_min
};
use campus_todo_core::form::{
  FEEDBACK_CLASS,
  INVALID_CLASS,
  search_query,
  validate_title
};
use campus_todo_core::shortcuts::SEARCH_INPUT_SELECTOR;
use campus_todo_core::Severity;
use chrono::Local;
use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::{
  Document,
  Element,
  HtmlInputElement
};

use crate::bootstrap;
use crate::dom::{
  self,
  field_value,
  query_all,
  set_class
};
use crate::toast::show_toast;

const TOOLTIP_SELECTOR: &str =
  r#"[data-bs-toggle="tooltip"]"#;
const ALERT_SELECTOR: &str =
  ".alert:not(.alert-permanent)";

pub fn init_tooltips(document: &Document) {
  let mut attached = 0_usize;
  for element in
    query_all(document, TOOLTIP_SELECTOR)
  {
    match bootstrap::Tooltip::new(&element) {
      | Ok(_) => attached += 1,
      | Err(error) => {
        tracing::warn!(error = ?error, "failed to attach tooltip");
      }
    }
  }
  tracing::debug!(attached, "tooltips ready");
}

pub fn init_character_counters(
  document: &Document,
  limits: &FieldLimits
) {
  let fields = [
    (
      "title",
      "titleCount",
      CharCounter::title(limits)
    ),
    (
      "description",
      "descCount",
      CharCounter::description(limits)
    )
  ];

  for (input_id, counter_id, counter) in
    fields
  {
    let (Some(input), Some(display)) = (
      document.get_element_by_id(input_id),
      document.get_element_by_id(counter_id)
    ) else {
      continue;
    };

    render_count(
      &display,
      counter,
      &field_value(&input),
      false
    );

    let source = input.clone();
    EventListener::new(
      &input,
      "input",
      move |_| {
        render_count(
          &display,
          counter,
          &field_value(&source),
          true
        )
      }
    )
    .forget();
  }
}

/// The initial render only writes the
/// count; levels appear once the user
/// types.
fn render_count(
  display: &Element,
  counter: CharCounter,
  text: &str,
  styled: bool
) {
  let reading = counter.measure(text);
  display.set_text_content(Some(
    &reading.count.to_string()
  ));
  if !styled {
    return;
  }
  set_class(
    display,
    WARNING_CLASS,
    reading.level == CounterLevel::Warning
  );
  set_class(
    display,
    DANGER_CLASS,
    reading.level == CounterLevel::Danger
  );
}

pub fn init_deadline_picker(
  document: &Document
) {
  let Some(input) = document
    .get_element_by_id("deadline")
    .and_then(|element| {
      element
        .dyn_into::<HtmlInputElement>()
        .ok()
    })
  else {
    return;
  };

  if input.value().is_empty() {
    let min =
      picker_min(Local::now().naive_local());
    input.set_min(&min);
    tracing::debug!(%min, "deadline minimum set");
  }

  let source = input.clone();
  EventListener::new(
    &input,
    "change",
    move |_| {
      if is_in_past(
        &source.value(),
        Local::now().naive_local()
      ) {
        show_toast(
          MSG_PAST_DEADLINE,
          Severity::Warning
        );
      }
    }
  )
  .forget();
}

pub fn init_auto_close_alerts(
  document: &Document,
  delay_ms: u32
) {
  for alert in
    query_all(document, ALERT_SELECTOR)
  {
    Timeout::new(delay_ms, move || {
      match bootstrap::Alert::new(&alert) {
        | Ok(handle) => handle.close(),
        | Err(error) => {
          tracing::warn!(error = ?error, "bootstrap alert unavailable; removing");
          alert.remove();
        }
      }
    })
    .forget();
  }
}

pub fn init_search_debounce(
  document: &Document,
  delay_ms: u32
) {
  let Some(input) = document
    .query_selector(SEARCH_INPUT_SELECTOR)
    .ok()
    .flatten()
  else {
    return;
  };

  let pending: Rc<RefCell<Option<Timeout>>> =
    Rc::new(RefCell::new(None));
  let source = input.clone();
  EventListener::new(
    &input,
    "input",
    move |_| {
      // Dropping the previous timeout
      // cancels it.
      pending.borrow_mut().take();

      let value = field_value(&source);
      let Some(query) = search_query(&value)
      else {
        return;
      };
      let query = query.to_string();
      *pending.borrow_mut() =
        Some(Timeout::new(delay_ms, move || {
          tracing::info!(%query, "searching for");
        }));
    }
  )
  .forget();
}

/// Client-side check run from the task
/// form's submit handler. Returns whether
/// the form may be submitted.
pub fn validate_task_form(
  form: &Element,
  limits: &FieldLimits
) -> bool {
  let Some(title) = form
    .query_selector("#title")
    .ok()
    .flatten()
  else {
    tracing::warn!(
      "task form has no title field"
    );
    return true;
  };

  match validate_title(
    &field_value(&title),
    limits
  ) {
    | Ok(()) => {
      clear_field_error(&title);
      true
    }
    | Err(error) => {
      show_field_error(
        &title,
        &error.to_string()
      );
      false
    }
  }
}

fn show_field_error(
  field: &Element,
  message: &str
) {
  set_class(field, INVALID_CLASS, true);

  let Some(parent) = field.parent_element()
  else {
    return;
  };
  let feedback = parent
    .query_selector(&format!(
      ".{FEEDBACK_CLASS}"
    ))
    .ok()
    .flatten()
    .or_else(|| {
      let document = dom::document()?;
      let created = document
        .create_element("div")
        .ok()?;
      created.set_class_name(FEEDBACK_CLASS);
      parent.append_child(&created).ok()?;
      Some(created)
    });

  match feedback {
    | Some(feedback) => {
      feedback.set_text_content(Some(message))
    }
    | None => {
      tracing::error!(
        "failed to create field feedback"
      )
    }
  }
}

fn clear_field_error(field: &Element) {
  set_class(field, INVALID_CLASS, false);

  if let Some(feedback) = field
    .parent_element()
    .and_then(|parent| {
      parent
        .query_selector(&format!(
          ".{FEEDBACK_CLASS}"
        ))
        .ok()
        .flatten()
    })
  {
    feedback.remove();
  }
}

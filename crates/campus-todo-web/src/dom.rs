use campus_todo_core::toggle::{
  ROW_COMPLETED_CLASS,
  TITLE_DONE_CLASSES
};
use campus_todo_core::{
  ControlState,
  TaskRef,
  TaskRowView,
  ToggleError
};
use wasm_bindgen::{
  JsCast,
  JsValue
};
use web_sys::{
  Document,
  Element,
  HtmlButtonElement,
  HtmlInputElement,
  HtmlTextAreaElement
};

const ROW_SELECTOR: &str = ".task-item";
const TITLE_SELECTOR: &str = ".task-title";

pub fn document() -> Option<Document> {
  web_sys::window()
    .and_then(|window| window.document())
}

pub fn query_all(
  root: &Document,
  selector: &str
) -> Vec<Element> {
  let list = match root
    .query_selector_all(selector)
  {
    | Ok(list) => list,
    | Err(error) => {
      tracing::error!(selector, error = ?error, "invalid selector");
      return Vec::new();
    }
  };

  (0..list.length())
    .filter_map(|index| list.item(index))
    .filter_map(|node| {
      node.dyn_into::<Element>().ok()
    })
    .collect()
}

pub fn set_class(
  element: &Element,
  class: &str,
  on: bool
) {
  if let Err(error) = element
    .class_list()
    .toggle_with_force(class, on)
  {
    tracing::error!(class, error = ?error, "failed updating class list");
  }
}

/// Current text of an `<input>` or
/// `<textarea>`.
pub fn field_value(
  element: &Element
) -> String {
  if let Some(input) =
    element.dyn_ref::<HtmlInputElement>()
  {
    return input.value();
  }
  if let Some(area) =
    element.dyn_ref::<HtmlTextAreaElement>()
  {
    return area.value();
  }
  element
    .get_attribute("value")
    .unwrap_or_default()
}

/// Accepts the task id either as a number
/// or as a string, as templates pass both.
pub fn task_ref_from_js(
  value: &JsValue
) -> Result<TaskRef, ToggleError> {
  if let Some(number) = value.as_f64() {
    if number >= 0.0
      && number.fract() == 0.0
      && number <= u64::MAX as f64
    {
      return Ok(TaskRef::from(
        number as u64
      ));
    }
    return Err(
      ToggleError::InvalidTaskRef(
        number.to_string()
      )
    );
  }

  match value.as_string() {
    | Some(raw) => TaskRef::parse(&raw),
    | None => {
      Err(ToggleError::InvalidTaskRef(
        format!("{value:?}")
      ))
    }
  }
}

/// A rendered task row, resolved once
/// from its toggle control.
pub struct DomTaskRow {
  control: Element,
  row:     Option<Element>,
  title:   Option<Element>
}

impl DomTaskRow {
  pub fn new(
    control: Element,
    row: Option<Element>,
    title: Option<Element>
  ) -> Self {
    Self {
      control,
      row,
      title
    }
  }

  pub fn from_control(
    control: Element
  ) -> Self {
    let row = control
      .closest(ROW_SELECTOR)
      .ok()
      .flatten();
    let title = row.as_ref().and_then(|row| {
      row
        .query_selector(TITLE_SELECTOR)
        .ok()
        .flatten()
    });
    if row.is_none() || title.is_none() {
      tracing::warn!(
        has_row = row.is_some(),
        has_title = title.is_some(),
        "toggle control is not inside a \
         complete task row"
      );
    }
    Self::new(control, row, title)
  }
}

impl TaskRowView for DomTaskRow {
  fn control_markup(&self) -> String {
    self.control.inner_html()
  }

  fn set_control_markup(
    &mut self,
    markup: &str
  ) {
    self.control.set_inner_html(markup);
  }

  fn set_control_disabled(
    &mut self,
    disabled: bool
  ) {
    if let Some(button) = self
      .control
      .dyn_ref::<HtmlButtonElement>()
    {
      button.set_disabled(disabled);
      return;
    }

    let result = if disabled {
      self
        .control
        .set_attribute("disabled", "")
    } else {
      self
        .control
        .remove_attribute("disabled")
    };
    if let Err(error) = result {
      tracing::error!(error = ?error, "failed toggling disabled attribute");
    }
  }

  fn set_control_state(
    &mut self,
    state: ControlState
  ) {
    set_class(
      &self.control,
      state.replaced_class(),
      false
    );
    set_class(
      &self.control,
      state.button_class(),
      true
    );
    self
      .control
      .set_inner_html(state.icon_markup());
  }

  fn set_row_completed(
    &mut self,
    completed: bool
  ) {
    if let Some(row) = &self.row {
      set_class(
        row,
        ROW_COMPLETED_CLASS,
        completed
      );
    }
  }

  fn set_title_struck(
    &mut self,
    struck: bool
  ) {
    if let Some(title) = &self.title {
      for class in TITLE_DONE_CLASSES {
        set_class(title, class, struck);
      }
    }
  }
}

//! Completion toggle for one task row.
//!
//! The row, the HTTP client and the
//! notifier are all passed in, so the
//! sequence below runs the same against
//! the browser DOM and against test
//! doubles:
//!
//! 1. capture the control markup, show a
//!    spinner and disable the control;
//! 2. ask the server to flip the task;
//! 3. mirror the reply onto the row, or
//!    roll the markup back on failure;
//! 4. re-enable the control.

use std::fmt;
use std::future::Future;

use campus_todo_shared::ToggleResult;
use thiserror::Error;
use tracing::{
  debug,
  error,
  info,
  warn
};

use crate::notify::{
  Notifier,
  Severity
};

pub const LOADING_MARKUP: &str =
  r#"<span class="loading"></span>"#;
pub const ROW_COMPLETED_CLASS: &str =
  "completed";
pub const TITLE_DONE_CLASSES: [&str; 2] = [
  "text-decoration-line-through",
  "text-muted"
];

pub const MSG_TASK_COMPLETED: &str =
  "task completed";
pub const MSG_TASK_RESTORED: &str =
  "task restored";
pub const MSG_OPERATION_FAILED: &str =
  "operation failed, please retry";
pub const MSG_NETWORK_ERROR: &str =
  "network error, please retry";

#[derive(
  Debug, Clone, PartialEq, Eq, Error,
)]
pub enum TransportError {
  #[error("request failed: {0}")]
  Network(String),
  #[error(
    "response body was not valid JSON: \
     {0}"
  )]
  Decode(String)
}

#[derive(
  Debug, Clone, PartialEq, Eq, Error,
)]
pub enum ToggleError {
  #[error("invalid task reference {0:?}")]
  InvalidTaskRef(String)
}

/// Server-side task identifier.
///
/// Restricted to ASCII alphanumerics,
/// `-` and `_` so it can be placed in a
/// path segment as is.
#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Hash,
  PartialOrd,
  Ord,
)]
pub struct TaskRef(String);

impl TaskRef {
  pub fn parse(
    raw: &str
  ) -> Result<Self, ToggleError> {
    let trimmed = raw.trim();
    let valid = !trimmed.is_empty()
      && trimmed.chars().all(|ch| {
        ch.is_ascii_alphanumeric()
          || ch == '-'
          || ch == '_'
      });
    if !valid {
      return Err(
        ToggleError::InvalidTaskRef(
          raw.to_string()
        )
      );
    }
    Ok(Self(trimmed.to_string()))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl From<u64> for TaskRef {
  fn from(id: u64) -> Self {
    Self(id.to_string())
  }
}

impl fmt::Display for TaskRef {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    f.write_str(&self.0)
  }
}

/// Visual state of the toggle button.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum ControlState {
  Pending,
  Done
}

impl ControlState {
  pub fn from_completed(
    is_completed: bool
  ) -> Self {
    if is_completed {
      Self::Done
    } else {
      Self::Pending
    }
  }

  pub fn button_class(
    self
  ) -> &'static str {
    match self {
      | Self::Pending => {
        "btn-outline-secondary"
      }
      | Self::Done => "btn-success"
    }
  }

  /// Class of the opposite state, removed
  /// when this one is applied.
  pub fn replaced_class(
    self
  ) -> &'static str {
    match self {
      | Self::Pending => "btn-success",
      | Self::Done => {
        "btn-outline-secondary"
      }
    }
  }

  pub fn icon_markup(
    self
  ) -> &'static str {
    match self {
      | Self::Pending => {
        r#"<i class="bi bi-circle"></i>"#
      }
      | Self::Done => {
        r#"<i class="bi bi-check-lg"></i>"#
      }
    }
  }
}

/// One rendered task row: the toggle
/// control, the row container and the
/// row's title element.
pub trait TaskRowView {
  fn control_markup(&self) -> String;

  fn set_control_markup(
    &mut self,
    markup: &str
  );

  fn set_control_disabled(
    &mut self,
    disabled: bool
  );

  /// Swaps the button classes and icon.
  fn set_control_state(
    &mut self,
    state: ControlState
  );

  fn set_row_completed(
    &mut self,
    completed: bool
  );

  /// Strikethrough and muted styling on
  /// the title.
  fn set_title_struck(
    &mut self,
    struck: bool
  );
}

pub trait CompletionClient {
  fn toggle_completion(
    &self,
    task: &TaskRef
  ) -> impl Future<
    Output = Result<
      ToggleResult,
      TransportError
    >
  >;
}

impl<C: CompletionClient + ?Sized>
  CompletionClient for &C
{
  fn toggle_completion(
    &self,
    task: &TaskRef
  ) -> impl Future<
    Output = Result<
      ToggleResult,
      TransportError
    >
  > {
    (**self).toggle_completion(task)
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
  Completed,
  Restored,
  Rejected,
  TransportFailed(TransportError)
}

pub struct TaskToggle<C, N> {
  client:   C,
  notifier: N
}

impl<C, N> TaskToggle<C, N>
where
  C: CompletionClient,
  N: Notifier
{
  pub fn new(
    client: C,
    notifier: N
  ) -> Self {
    Self {
      client,
      notifier
    }
  }

  /// Flips the completion state of `task`
  /// and reconciles `row` with the reply.
  ///
  /// Never fails: every failure is rolled
  /// back on the row and reported through
  /// the notifier. The control is enabled
  /// again on every path.
  #[tracing::instrument(
    skip(self, task, row),
    fields(task = %task)
  )]
  pub async fn toggle<R>(
    &self,
    task: &TaskRef,
    row: &mut R
  ) -> ToggleOutcome
  where
    R: TaskRowView
  {
    let original = row.control_markup();
    row.set_control_markup(LOADING_MARKUP);
    row.set_control_disabled(true);
    debug!("completion toggle in flight");

    let outcome = match self
      .client
      .toggle_completion(task)
      .await
    {
      | Err(err) => {
        error!(error = %err, "completion toggle request failed");
        row.set_control_markup(&original);
        self.notifier.notify(
          MSG_NETWORK_ERROR,
          Severity::Danger
        );
        ToggleOutcome::TransportFailed(err)
      }
      | Ok(ToggleResult {
        success: false,
        ..
      }) => {
        warn!(
          "server rejected completion \
           toggle"
        );
        row.set_control_markup(&original);
        self.notifier.notify(
          MSG_OPERATION_FAILED,
          Severity::Danger
        );
        ToggleOutcome::Rejected
      }
      | Ok(ToggleResult {
        success: true,
        is_completed
      }) => {
        row.set_control_state(
          ControlState::from_completed(
            is_completed
          )
        );
        row.set_row_completed(is_completed);
        row.set_title_struck(is_completed);
        info!(
          is_completed,
          "task completion toggled"
        );
        if is_completed {
          self.notifier.notify(
            MSG_TASK_COMPLETED,
            Severity::Success
          );
          ToggleOutcome::Completed
        } else {
          self.notifier.notify(
            MSG_TASK_RESTORED,
            Severity::Success
          );
          ToggleOutcome::Restored
        }
      }
    };

    row.set_control_disabled(false);
    outcome
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn task_ref_accepts_ids_and_slugs() {
    assert_eq!(
      TaskRef::parse(" 42 ")
        .expect("numeric id")
        .as_str(),
      "42"
    );
    assert_eq!(
      TaskRef::parse("task_7-b")
        .expect("slug id")
        .to_string(),
      "task_7-b"
    );
    assert_eq!(
      TaskRef::from(9_u64).as_str(),
      "9"
    );
  }

  #[test]
  fn task_ref_rejects_path_breaking_input()
  {
    for raw in
      ["", "  ", "4/2", "../admin", "a b", "1?x=2"]
    {
      assert_eq!(
        TaskRef::parse(raw),
        Err(ToggleError::InvalidTaskRef(
          raw.to_string()
        )),
        "{raw:?} should be rejected"
      );
    }
  }

  #[test]
  fn control_states_are_mutually_exclusive()
  {
    for state in [
      ControlState::Pending,
      ControlState::Done
    ] {
      assert_ne!(
        state.button_class(),
        state.replaced_class()
      );
    }
    assert_eq!(
      ControlState::from_completed(true)
        .button_class(),
      ControlState::from_completed(false)
        .replaced_class()
    );
    assert!(
      ControlState::Done
        .icon_markup()
        .contains("bi-check-lg")
    );
    assert!(
      ControlState::Pending
        .icon_markup()
        .contains("bi-circle")
    );
  }
}

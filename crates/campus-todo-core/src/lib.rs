pub mod config;
pub mod counter;
pub mod deadline;
pub mod export;
pub mod form;
pub mod notify;
pub mod shortcuts;
pub mod storage;
pub mod toggle;

pub use campus_todo_shared::{
  TaskListEnvelope,
  TaskRecord,
  ToggleResult
};
pub use config::ClientConfig;
pub use notify::{
  Notifier,
  Severity,
  Toast,
  ToastCenter,
  ToastId
};
pub use toggle::{
  CompletionClient,
  ControlState,
  TaskRef,
  TaskRowView,
  TaskToggle,
  ToggleError,
  ToggleOutcome,
  TransportError
};

/// Title shown in the console banner.
pub const APP_NAME: &str =
  "Campus To-Do";

pub const NEW_TASK_LINK_SELECTOR: &str =
  r#"a[href*="create"]"#;
pub const SEARCH_INPUT_SELECTOR: &str =
  r#"input[name="search"]"#;
pub const OPEN_MODAL_SELECTOR: &str =
  ".modal.show";

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum Shortcut {
  /// Ctrl/Cmd + N
  NewTask,
  /// Ctrl/Cmd + F
  FocusSearch,
  /// Escape
  CloseModals
}

impl Shortcut {
  /// Maps a `keydown` to a shortcut.
  /// `key` is `KeyboardEvent.key`, so a
  /// shifted `N` does not match.
  pub fn from_key(
    key: &str,
    ctrl: bool,
    meta: bool
  ) -> Option<Self> {
    let command = ctrl || meta;
    match key {
      | "n" if command => {
        Some(Self::NewTask)
      }
      | "f" if command => {
        Some(Self::FocusSearch)
      }
      | "Escape" => Some(Self::CloseModals),
      | _ => None
    }
  }

  /// Whether the browser default is
  /// suppressed before the target element
  /// is looked up.
  pub fn prevents_default_eagerly(
    self
  ) -> bool {
    matches!(self, Self::NewTask)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn maps_command_shortcuts() {
    assert_eq!(
      Shortcut::from_key("n", true, false),
      Some(Shortcut::NewTask)
    );
    assert_eq!(
      Shortcut::from_key("n", false, true),
      Some(Shortcut::NewTask)
    );
    assert_eq!(
      Shortcut::from_key("f", true, false),
      Some(Shortcut::FocusSearch)
    );
  }

  #[test]
  fn plain_letters_are_ignored() {
    assert_eq!(
      Shortcut::from_key("n", false, false),
      None
    );
    assert_eq!(
      Shortcut::from_key("N", true, false),
      None
    );
    assert_eq!(
      Shortcut::from_key("x", true, true),
      None
    );
  }

  #[test]
  fn escape_needs_no_modifier() {
    for (ctrl, meta) in [
      (false, false),
      (true, false),
      (false, true)
    ] {
      assert_eq!(
        Shortcut::from_key(
          "Escape", ctrl, meta
        ),
        Some(Shortcut::CloseModals)
      );
    }
    assert!(
      !Shortcut::CloseModals
        .prevents_default_eagerly()
    );
    assert!(
      Shortcut::NewTask
        .prevents_default_eagerly()
    );
  }
}

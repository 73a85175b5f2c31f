use thiserror::Error;

use crate::config::FieldLimits;

pub const INVALID_CLASS: &str =
  "is-invalid";
pub const FEEDBACK_CLASS: &str =
  "invalid-feedback";

/// Shortest trimmed query that is worth
/// a search suggestion.
pub const SEARCH_MIN_CHARS: usize = 2;

#[derive(
  Debug, Clone, PartialEq, Eq, Error,
)]
pub enum FieldError {
  #[error("Task title is required")]
  Required,
  #[error(
    "Task title cannot exceed {max} \
     characters"
  )]
  TooLong { max: usize }
}

/// Checks the task title the way the
/// server does: blank after trimming is
/// missing, and the raw length is capped.
pub fn validate_title(
  raw: &str,
  limits: &FieldLimits
) -> Result<(), FieldError> {
  if raw.trim().is_empty() {
    return Err(FieldError::Required);
  }
  if raw.chars().count()
    > limits.title_max
  {
    return Err(FieldError::TooLong {
      max: limits.title_max
    });
  }
  Ok(())
}

pub fn search_query(
  raw: &str
) -> Option<&str> {
  let trimmed = raw.trim();
  (trimmed.chars().count()
    >= SEARCH_MIN_CHARS)
    .then_some(trimmed)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn blank_titles_are_required() {
    let limits = FieldLimits::default();
    assert_eq!(
      validate_title("", &limits),
      Err(FieldError::Required)
    );
    assert_eq!(
      validate_title("   \t", &limits),
      Err(FieldError::Required)
    );
  }

  #[test]
  fn long_titles_are_rejected() {
    let limits = FieldLimits::default();
    assert_eq!(
      validate_title(
        &"a".repeat(50),
        &limits
      ),
      Ok(())
    );
    let err = validate_title(
      &"a".repeat(51),
      &limits
    )
    .expect_err("51 chars is too long");
    assert_eq!(
      err,
      FieldError::TooLong { max: 50 }
    );
    assert_eq!(
      err.to_string(),
      "Task title cannot exceed 50 \
       characters"
    );
  }

  #[test]
  fn search_query_needs_two_characters() {
    assert_eq!(search_query(" a "), None);
    assert_eq!(search_query(""), None);
    assert_eq!(
      search_query("  lab "),
      Some("lab")
    );
  }
}

use serde::{
  Deserialize,
  Serialize
};

/// Body returned by `POST /tasks/{id}/complete` for AJAX callers.
///
/// Both fields default to `false` when absent, so a body such as `{}`
/// reads as a failed request rather than a decode error.
#[derive(
  Debug,
  Clone,
  Copy,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
  Default,
)]
pub struct ToggleResult {
  #[serde(default)]
  pub success:      bool,
  #[serde(default)]
  pub is_completed: bool
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
)]
pub struct TaskRecord {
  pub id:             u64,
  #[serde(default)]
  pub title:          String,
  pub description:    Option<String>,
  pub deadline:       Option<String>,
  pub priority:       Option<String>,
  pub priority_label: Option<String>,
  #[serde(default)]
  pub is_completed:   bool,
  #[serde(default)]
  pub is_overdue:     bool,
  #[serde(default)]
  pub is_today:       bool,
  pub category_id:    Option<u64>,
  pub category_name:  Option<String>,
  pub created_at:     Option<String>,
  pub updated_at:     Option<String>
}

/// Envelope of `GET /api/tasks`.
#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Default,
)]
pub struct TaskListEnvelope {
  #[serde(default)]
  pub data:  Vec<TaskRecord>,
  #[serde(default)]
  pub count: usize
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn toggle_result_missing_fields_are_false()
  {
    let parsed: ToggleResult =
      serde_json::from_str("{}")
        .expect("parse empty body");
    assert_eq!(
      parsed,
      ToggleResult {
        success:      false,
        is_completed: false
      }
    );

    let parsed: ToggleResult =
      serde_json::from_str(
        r#"{"success":true}"#
      )
      .expect("parse partial body");
    assert!(parsed.success);
    assert!(!parsed.is_completed);
  }

  #[test]
  fn toggle_result_rejects_non_boolean_flags()
  {
    let parsed = serde_json::from_str::<
      ToggleResult
    >(
      r#"{"success":"yes","is_completed":true}"#
    );
    assert!(parsed.is_err());
  }

  #[test]
  fn task_list_envelope_parses_server_payload()
  {
    let body = r#"{
      "data": [
        {
          "id": 7,
          "title": "Lab report",
          "description": null,
          "deadline": "2025-01-10T18:00:00",
          "priority": "urgent_important",
          "priority_label": "Urgent & important",
          "is_completed": false,
          "is_overdue": true,
          "is_today": false,
          "category_id": 2,
          "category_name": "Study",
          "created_at": "2025-01-01T08:00:00",
          "updated_at": "2025-01-02T09:30:00"
        }
      ],
      "count": 1
    }"#;

    let envelope: TaskListEnvelope =
      serde_json::from_str(body)
        .expect("parse envelope");
    assert_eq!(envelope.count, 1);
    let task = &envelope.data[0];
    assert_eq!(task.id, 7);
    assert_eq!(task.title, "Lab report");
    assert_eq!(task.description, None);
    assert_eq!(
      task.category_name.as_deref(),
      Some("Study")
    );
    assert!(task.is_overdue);
  }

  #[test]
  fn task_record_tolerates_sparse_rows() {
    let task: TaskRecord =
      serde_json::from_str(r#"{"id":3}"#)
        .expect("parse sparse row");
    assert_eq!(task.id, 3);
    assert!(task.title.is_empty());
    assert!(!task.is_completed);
    assert_eq!(task.deadline, None);
  }
}

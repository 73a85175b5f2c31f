use campus_todo_shared::TaskRecord;
use chrono::NaiveDate;
use thiserror::Error;

pub const MSG_EXPORT_FAILED: &str =
  "Export failed";

/// How long a download's object URL
/// stays alive after the link is clicked.
/// Browsers may fetch the blob lazily, so
/// revoking right away can cancel the
/// download.
pub const OBJECT_URL_TTL_MS: u32 = 40_000;

const CSV_HEADERS: [&str; 8] = [
  "ID",
  "Title",
  "Description",
  "Deadline",
  "Priority",
  "Category",
  "Completed",
  "Created"
];

#[derive(Debug, Error)]
pub enum ExportError {
  #[error("failed to encode tasks as JSON")]
  Json(#[from] serde_json::Error)
}

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
)]
pub enum ExportFormat {
  #[default]
  Json,
  Csv
}

impl ExportFormat {
  /// Anything other than `csv` exports
  /// JSON.
  pub fn parse(raw: &str) -> Self {
    match raw
      .trim()
      .to_ascii_lowercase()
      .as_str()
    {
      | "csv" => Self::Csv,
      | "json" | "" => Self::Json,
      | other => {
        tracing::warn!(
          format = other,
          "unknown export format; using \
           json"
        );
        Self::Json
      }
    }
  }

  pub fn extension(
    self
  ) -> &'static str {
    match self {
      | Self::Json => "json",
      | Self::Csv => "csv"
    }
  }

  pub fn mime(self) -> &'static str {
    match self {
      | Self::Json => "application/json",
      | Self::Csv => "text/csv"
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
  pub name:    String,
  pub mime:    &'static str,
  pub content: String
}

impl ExportFile {
  /// `type` option for the download
  /// `Blob`.
  pub fn blob_type(&self) -> String {
    format!("{};charset=utf-8;", self.mime)
  }
}

#[must_use]
pub fn file_name(
  format: ExportFormat,
  today: NaiveDate
) -> String {
  format!(
    "tasks_{}.{}",
    today.format("%Y-%m-%d"),
    format.extension()
  )
}

pub fn build_export(
  format: ExportFormat,
  tasks: &[TaskRecord],
  today: NaiveDate
) -> Result<ExportFile, ExportError> {
  let content = match format {
    | ExportFormat::Json => {
      serde_json::to_string_pretty(tasks)?
    }
    | ExportFormat::Csv => to_csv(tasks)
  };
  tracing::info!(
    format = format.extension(),
    tasks = tasks.len(),
    bytes = content.len(),
    "built task export"
  );

  Ok(ExportFile {
    name: file_name(format, today),
    mime: format.mime(),
    content
  })
}

/// Title and description are always
/// quoted; the remaining columns are
/// written as is.
pub fn to_csv(
  tasks: &[TaskRecord]
) -> String {
  let mut rows =
    Vec::with_capacity(tasks.len() + 1);
  rows.push(CSV_HEADERS.join(","));

  for task in tasks {
    let row = [
      task.id.to_string(),
      quote(&task.title),
      quote(
        task
          .description
          .as_deref()
          .unwrap_or_default()
      ),
      task
        .deadline
        .clone()
        .unwrap_or_default(),
      task
        .priority_label
        .clone()
        .unwrap_or_default(),
      task
        .category_name
        .clone()
        .unwrap_or_default(),
      if task.is_completed {
        "Yes".to_string()
      } else {
        "No".to_string()
      },
      task
        .created_at
        .clone()
        .unwrap_or_default()
    ];
    rows.push(row.join(","));
  }

  rows.join("\n")
}

fn quote(value: &str) -> String {
  format!(
    "\"{}\"",
    value.replace('"', "\"\"")
  )
}

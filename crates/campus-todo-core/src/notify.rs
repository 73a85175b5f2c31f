use std::collections::BTreeMap;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

pub const AUTO_DISMISS_MS: u32 = 3_000;
pub const CONTAINER_ID: &str =
  "toastContainer";
pub const CONTAINER_CLASS: &str =
  "toast-container position-fixed \
   bottom-0 end-0 p-3";
pub const CONTAINER_Z_INDEX: &str = "1100";
pub const HEADER_TITLE: &str = "Notice";
pub const HEADER_TIMESTAMP: &str =
  "just now";

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Default,
)]
pub enum Severity {
  Success,
  Danger,
  Warning,
  #[default]
  Info
}

impl Severity {
  /// Unknown names map to `Info`.
  pub fn parse(raw: &str) -> Self {
    match raw
      .trim()
      .to_ascii_lowercase()
      .as_str()
    {
      | "success" => Self::Success,
      | "danger" => Self::Danger,
      | "warning" => Self::Warning,
      | _ => Self::Info
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      | Self::Success => "success",
      | Self::Danger => "danger",
      | Self::Warning => "warning",
      | Self::Info => "info"
    }
  }

  pub fn icon_class(
    self
  ) -> &'static str {
    match self {
      | Self::Success => {
        "bi-check-circle-fill text-success"
      }
      | Self::Danger => {
        "bi-exclamation-triangle-fill \
         text-danger"
      }
      | Self::Warning => {
        "bi-exclamation-circle-fill \
         text-warning"
      }
      | Self::Info => {
        "bi-info-circle-fill text-info"
      }
    }
  }
}

impl FromStr for Severity {
  type Err = Infallible;

  fn from_str(
    s: &str
  ) -> Result<Self, Self::Err> {
    Ok(Self::parse(s))
  }
}

impl fmt::Display for Severity {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Millisecond timestamp of the toast's
/// creation.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  PartialOrd,
  Ord,
)]
pub struct ToastId(pub u64);

impl ToastId {
  pub fn dom_id(self) -> String {
    format!("toast_{}", self.0)
  }
}

impl fmt::Display for ToastId {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    write!(f, "toast_{}", self.0)
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
  pub id:       ToastId,
  pub message:  String,
  pub severity: Severity
}

impl Toast {
  /// Full class list of the header icon.
  pub fn icon_classes(&self) -> String {
    format!(
      "bi {} me-2",
      self.severity.icon_class()
    )
  }
}

/// Text of a numeric toast message, as
/// the page's script would print it.
pub fn number_text(value: f64) -> String {
  if value.is_nan() {
    "NaN".to_string()
  } else if value.is_infinite() {
    if value > 0.0 {
      "Infinity".to_string()
    } else {
      "-Infinity".to_string()
    }
  } else if value == 0.0 {
    "0".to_string()
  } else {
    value.to_string()
  }
}

/// Registry of toasts currently shown.
///
/// A toast enters on `push` and leaves on
/// `dismiss`, which the host calls from
/// the toast's hidden event.
#[derive(Debug, Default)]
pub struct ToastCenter {
  live:    BTreeMap<ToastId, Toast>,
  last_id: Option<u64>
}

impl ToastCenter {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn push(
    &mut self,
    message: &str,
    severity: Severity,
    now_ms: u64
  ) -> Toast {
    let raw = match self.last_id {
      | Some(last) if now_ms <= last => {
        last.saturating_add(1)
      }
      | _ => now_ms
    };
    self.last_id = Some(raw);

    let toast = Toast {
      id:       ToastId(raw),
      message:  message.to_string(),
      severity
    };
    self
      .live
      .insert(toast.id, toast.clone());
    tracing::trace!(
      id = %toast.id,
      severity = %severity,
      live = self.live.len(),
      "toast pushed"
    );
    toast
  }

  pub fn dismiss(
    &mut self,
    id: ToastId
  ) -> Option<Toast> {
    let removed = self.live.remove(&id);
    if removed.is_none() {
      tracing::debug!(
        id = %id,
        "dismissed unknown toast"
      );
    }
    removed
  }

  pub fn contains(
    &self,
    id: ToastId
  ) -> bool {
    self.live.contains_key(&id)
  }

  pub fn len(&self) -> usize {
    self.live.len()
  }

  pub fn is_empty(&self) -> bool {
    self.live.is_empty()
  }

  pub fn iter(
    &self
  ) -> impl Iterator<Item = &Toast> {
    self.live.values()
  }
}

pub trait Notifier {
  fn notify(
    &self,
    message: &str,
    severity: Severity
  );
}

impl<N: Notifier + ?Sized> Notifier
  for &N
{
  fn notify(
    &self,
    message: &str,
    severity: Severity
  ) {
    (**self).notify(message, severity);
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn unknown_severity_maps_to_info() {
    for raw in
      ["", "error", "primary", "SUCCESSFUL"]
    {
      assert_eq!(
        Severity::parse(raw),
        Severity::Info
      );
    }
    assert_eq!(
      Severity::parse(" Danger "),
      Severity::Danger
    );
    assert_eq!(
      "warning".parse::<Severity>(),
      Ok(Severity::Warning)
    );
    assert_eq!(
      Severity::parse("nope").icon_class(),
      "bi-info-circle-fill text-info"
    );
  }

  #[test]
  fn numeric_messages_print_like_script()
  {
    assert_eq!(number_text(404.0), "404");
    assert_eq!(number_text(2.5), "2.5");
    assert_eq!(number_text(-0.0), "0");
    assert_eq!(number_text(f64::NAN), "NaN");
    assert_eq!(
      number_text(f64::NEG_INFINITY),
      "-Infinity"
    );
  }

  #[test]
  fn every_severity_has_a_distinct_icon()
  {
    let icons = [
      Severity::Success,
      Severity::Danger,
      Severity::Warning,
      Severity::Info
    ]
    .map(Severity::icon_class);
    for (i, a) in icons.iter().enumerate()
    {
      for b in &icons[i + 1..] {
        assert_ne!(a, b);
      }
    }
  }

  #[test]
  fn toast_lives_until_dismissed() {
    let mut center = ToastCenter::new();
    let toast = center.push(
      "task completed",
      Severity::Success,
      1_700_000_000_000
    );

    assert_eq!(center.len(), 1);
    assert_eq!(
      toast.id.dom_id(),
      "toast_1700000000000"
    );
    assert_eq!(
      toast.icon_classes(),
      "bi bi-check-circle-fill \
       text-success me-2"
    );
    assert!(center.contains(toast.id));

    assert_eq!(
      center.dismiss(toast.id),
      Some(toast.clone())
    );
    assert!(center.is_empty());
    assert_eq!(center.dismiss(toast.id), None);
  }

  #[test]
  fn same_millisecond_toasts_get_distinct_ids()
  {
    let mut center = ToastCenter::new();
    let a =
      center.push("a", Severity::Info, 500);
    let b = center.push(
      "b",
      Severity::Warning,
      500
    );
    let c =
      center.push("c", Severity::Info, 499);

    assert_eq!(a.id, ToastId(500));
    assert_eq!(b.id, ToastId(501));
    assert_eq!(c.id, ToastId(502));
    assert_eq!(center.len(), 3);
    assert_eq!(
      center
        .iter()
        .map(|toast| toast.message.as_str())
        .collect::<Vec<_>>(),
      vec!["a", "b", "c"]
    );
  }
}

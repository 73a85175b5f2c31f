use chrono::NaiveDateTime;

/// Value format of a
/// `datetime-local` input.
pub const PICKER_FORMAT: &str =
  "%Y-%m-%dT%H:%M";

pub const MSG_PAST_DEADLINE: &str =
  "Note: the selected date is in the past";

#[must_use]
pub fn picker_min(
  now: NaiveDateTime
) -> String {
  now.format(PICKER_FORMAT).to_string()
}

/// Parses a picker value, with or without
/// seconds.
pub fn parse_picker_value(
  raw: &str
) -> Option<NaiveDateTime> {
  let trimmed = raw.trim();
  if trimmed.is_empty() {
    return None;
  }

  NaiveDateTime::parse_from_str(
    trimmed,
    PICKER_FORMAT
  )
  .or_else(|_| {
    NaiveDateTime::parse_from_str(
      trimmed,
      "%Y-%m-%dT%H:%M:%S"
    )
  })
  .or_else(|_| {
    NaiveDateTime::parse_from_str(
      trimmed,
      "%Y-%m-%dT%H:%M:%S%.f"
    )
  })
  .ok()
}

/// Whether a picked deadline lies before
/// `now`. Unparseable values are never
/// treated as past.
pub fn is_in_past(
  raw: &str,
  now: NaiveDateTime
) -> bool {
  match parse_picker_value(raw) {
    | Some(selected) => selected < now,
    | None => {
      tracing::debug!(
        raw,
        "ignoring unparseable deadline"
      );
      false
    }
  }
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;

  use super::*;

  fn at(
    y: i32,
    m: u32,
    d: u32,
    h: u32,
    min: u32,
    s: u32
  ) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
      .and_then(|date| {
        date.and_hms_opt(h, min, s)
      })
      .expect("valid datetime")
  }

  #[test]
  fn picker_min_is_zero_padded() {
    assert_eq!(
      picker_min(at(2025, 1, 5, 7, 3, 59)),
      "2025-01-05T07:03"
    );
  }

  #[test]
  fn parses_picker_values() {
    assert_eq!(
      parse_picker_value("2025-01-10T18:00"),
      Some(at(2025, 1, 10, 18, 0, 0))
    );
    assert_eq!(
      parse_picker_value(
        "2025-01-10T18:00:30"
      ),
      Some(at(2025, 1, 10, 18, 0, 30))
    );
    assert_eq!(
      parse_picker_value("tomorrow"),
      None
    );
    assert_eq!(parse_picker_value(""), None);
  }

  #[test]
  fn past_detection_compares_full_time() {
    let now = at(2025, 1, 10, 18, 0, 30);
    assert!(is_in_past(
      "2025-01-10T18:00",
      now
    ));
    assert!(!is_in_past(
      "2025-01-10T18:01",
      now
    ));
    assert!(!is_in_past("garbage", now));
  }
}

use crate::config::FieldLimits;

pub const WARNING_CLASS: &str =
  "text-warning";
pub const DANGER_CLASS: &str =
  "text-danger";

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum CounterLevel {
  Normal,
  Warning,
  Danger
}

impl CounterLevel {
  pub fn class(
    self
  ) -> Option<&'static str> {
    match self {
      | Self::Normal => None,
      | Self::Warning => {
        Some(WARNING_CLASS)
      }
      | Self::Danger => Some(DANGER_CLASS)
    }
  }
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub struct CounterReading {
  pub count: usize,
  pub level: CounterLevel
}

/// Live length counter under a text
/// field.
///
/// Counts `char`s, which is what the
/// server validates against.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub struct CharCounter {
  warn_above: usize,
  danger_at:  usize
}

impl CharCounter {
  pub fn new(
    warn_above: usize,
    danger_at: usize
  ) -> Self {
    Self {
      warn_above,
      danger_at
    }
  }

  pub fn title(
    limits: &FieldLimits
  ) -> Self {
    Self::new(
      limits.title_warn,
      limits.title_max
    )
  }

  pub fn description(
    limits: &FieldLimits
  ) -> Self {
    Self::new(
      limits.description_warn,
      limits.description_max
    )
  }

  pub fn measure(
    &self,
    text: &str
  ) -> CounterReading {
    let count = text.chars().count();
    let level = if count >= self.danger_at
    {
      CounterLevel::Danger
    } else if count > self.warn_above {
      CounterLevel::Warning
    } else {
      CounterLevel::Normal
    };
    CounterReading {
      count,
      level
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn title_counter_thresholds() {
    let counter = CharCounter::title(
      &FieldLimits::default()
    );

    let at = |n: usize| {
      counter.measure(&"a".repeat(n)).level
    };
    assert_eq!(at(0), CounterLevel::Normal);
    assert_eq!(at(45), CounterLevel::Normal);
    assert_eq!(at(46), CounterLevel::Warning);
    assert_eq!(at(49), CounterLevel::Warning);
    assert_eq!(at(50), CounterLevel::Danger);
    assert_eq!(at(80), CounterLevel::Danger);
  }

  #[test]
  fn description_counter_thresholds() {
    let counter =
      CharCounter::description(
        &FieldLimits::default()
      );
    let reading =
      counter.measure(&"x".repeat(451));
    assert_eq!(reading.count, 451);
    assert_eq!(
      reading.level.class(),
      Some(WARNING_CLASS)
    );
    assert_eq!(
      counter
        .measure(&"x".repeat(500))
        .level
        .class(),
      Some(DANGER_CLASS)
    );
    assert_eq!(
      counter.measure("short").level.class(),
      None
    );
  }

  #[test]
  fn counts_characters_not_bytes() {
    let counter = CharCounter::new(2, 4);
    let reading = counter.measure("课程作业");
    assert_eq!(reading.count, 4);
    assert_eq!(
      reading.level,
      CounterLevel::Danger
    );
  }
}

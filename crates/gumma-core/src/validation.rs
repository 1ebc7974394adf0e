//! Input validation for group creation.
//!
//! Validation runs as a fixed pipeline of checks over the raw input. Every
//! check that fails contributes a [`FieldError`]; the pipeline does not stop
//! at the first failure, so callers see everything wrong with their input at
//! once. Nothing reaches the store unless the list comes back empty.

use std::fmt;

use chrono::{DateTime, Datelike as _, Utc};
use serde::{Deserialize, Serialize};

use crate::group::NewGroup;

/// Field names as the client spells them.
pub const ACTIVE_START: &str = "activeStart";
pub const ACTIVE_END: &str = "activeEnd";

// ─── Errors ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
  pub field:   String,
  pub message: String,
}

impl fmt::Display for FieldError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}: {}", self.field, self.message)
  }
}

/// A non-empty list of field errors once returned from a validator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
  pub fn push(&mut self, field: &str, message: impl Into<String>) {
    self.0.push(FieldError {
      field:   field.to_owned(),
      message: message.into(),
    });
  }

  /// Keep the `Ok` value, or record the error against `field`.
  fn capture<T>(&mut self, field: &str, result: Result<T, String>) -> Option<T> {
    match result {
      Ok(v) => Some(v),
      Err(message) => {
        self.push(field, message);
        None
      }
    }
  }

  pub fn fields(&self) -> &[FieldError] { &self.0 }

  pub fn is_empty(&self) -> bool { self.0.is_empty() }

  fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, Self> {
    if self.is_empty() { Ok(value()) } else { Err(self) }
  }
}

impl fmt::Display for ValidationErrors {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (i, e) in self.0.iter().enumerate() {
      if i > 0 {
        f.write_str("; ")?;
      }
      write!(f, "{e}")?;
    }
    Ok(())
  }
}

impl std::error::Error for ValidationErrors {}

// ─── Input ───────────────────────────────────────────────────────────────────

/// Raw, unvalidated group input as received from a client.
#[derive(Debug, Clone, Default)]
pub struct GroupDraft {
  /// Defaults to the evaluation instant when absent.
  pub active_start: Option<String>,
  pub active_end:   String,
  pub name:         Option<String>,
}

/// Years representable as a four-digit RFC 3339 year once in UTC.
const UTC_YEARS: std::ops::RangeInclusive<i32> = 0..=9999;

/// Parse an ISO 8601 / RFC 3339 date-time with an explicit offset.
///
/// The instant must land in years 0000 to 9999 after conversion to UTC, so
/// `9999-12-31T23:00:00-05:00` is rejected.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
  let dt = DateTime::parse_from_rfc3339(raw)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| {
      format!("{raw:?} is not an ISO 8601 date-time (e.g. 2023-08-14T16:50:00.000Z): {e}")
    })?;
  if !UTC_YEARS.contains(&dt.year()) {
    return Err(format!("{raw:?} falls outside years 0000-9999 in UTC"));
  }
  Ok(dt)
}

// ─── Pipeline ────────────────────────────────────────────────────────────────

/// Validate a [`GroupDraft`] against the evaluation instant `now`.
///
/// 1. `activeStart`, when given, parses as a date-time.
/// 2. `activeEnd` parses as a date-time.
/// 3. When both parsed, `activeEnd` is strictly after `activeStart`.
pub fn validate_new_group(
  draft: &GroupDraft,
  now: DateTime<Utc>,
) -> Result<NewGroup, ValidationErrors> {
  let mut errors = ValidationErrors::default();

  let start = match draft.active_start.as_deref() {
    None => Some(now),
    Some(raw) => errors.capture(ACTIVE_START, parse_timestamp(raw)),
  };
  let end = errors.capture(ACTIVE_END, parse_timestamp(&draft.active_end));

  if let (Some(start), Some(end)) = (start, end)
    && end <= start
  {
    errors.push(ACTIVE_END, "must be after activeStart");
  }

  errors.into_result(|| NewGroup {
    name:         draft.name.clone(),
    // Both are `Some` whenever no error was recorded.
    active_start: start.unwrap_or(now),
    active_end:   end.unwrap_or(now),
  })
}

#[cfg(test)]
mod tests {
  use chrono::{Duration, TimeZone};

  use super::*;

  fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2023, 8, 14, 12, 0, 0).unwrap()
  }

  fn draft(start: Option<&str>, end: &str) -> GroupDraft {
    GroupDraft {
      active_start: start.map(str::to_owned),
      active_end:   end.to_owned(),
      name:         Some("test".into()),
    }
  }

  #[test]
  fn accepts_ordered_timestamps() {
    let g = validate_new_group(
      &draft(Some("2023-08-14T10:00:00.000Z"), "2024-08-14T10:00:00Z"),
      now(),
    )
    .unwrap();
    assert_eq!(g.active_start, Utc.with_ymd_and_hms(2023, 8, 14, 10, 0, 0).unwrap());
    assert_eq!(g.active_end, Utc.with_ymd_and_hms(2024, 8, 14, 10, 0, 0).unwrap());
    assert_eq!(g.name.as_deref(), Some("test"));
  }

  #[test]
  fn offsets_are_normalised_to_utc() {
    let g = validate_new_group(
      &draft(Some("2023-08-14T12:00:00+02:00"), "2023-08-14T11:00:00Z"),
      now(),
    )
    .unwrap();
    assert_eq!(g.active_start, Utc.with_ymd_and_hms(2023, 8, 14, 10, 0, 0).unwrap());
  }

  #[test]
  fn missing_start_defaults_to_now() {
    let end = (now() + Duration::days(30)).to_rfc3339();
    let g = validate_new_group(&draft(None, &end), now()).unwrap();
    assert_eq!(g.active_start, now());
  }

  #[test]
  fn rejects_end_before_start() {
    let errs = validate_new_group(
      &draft(Some("2023-08-14T12:00:00Z"), "2022-08-14T12:00:00Z"),
      now(),
    )
    .unwrap_err();
    assert_eq!(errs.fields().len(), 1);
    assert_eq!(errs.fields()[0].field, ACTIVE_END);
  }

  #[test]
  fn rejects_end_equal_to_start() {
    let errs = validate_new_group(
      &draft(Some("2023-08-14T12:00:00Z"), "2023-08-14T12:00:00Z"),
      now(),
    )
    .unwrap_err();
    assert_eq!(errs.fields()[0].message, "must be after activeStart");
  }

  #[test]
  fn rejects_space_separated_time_without_offset() {
    let errs = validate_new_group(&draft(None, "2023-08-14 16:50"), now()).unwrap_err();
    assert_eq!(errs.fields().len(), 1);
    assert_eq!(errs.fields()[0].field, ACTIVE_END);
  }

  #[test]
  fn rejects_offsets_that_leave_the_four_digit_years() {
    let errs = validate_new_group(
      &draft(Some("0000-01-01T00:30:00+01:00"), "9999-12-31T23:00:00-05:00"),
      now(),
    )
    .unwrap_err();
    let fields: Vec<_> = errs.fields().iter().map(|e| e.field.as_str()).collect();
    assert_eq!(fields, [ACTIVE_START, ACTIVE_END]);

    let edge = validate_new_group(
      &draft(Some("0000-01-01T00:00:00Z"), "9999-12-31T23:59:59.999Z"),
      now(),
    );
    assert!(edge.is_ok());
  }

  #[test]
  fn collects_every_failing_field() {
    let errs = validate_new_group(&draft(Some("yesterday"), "tomorrow"), now()).unwrap_err();
    let fields: Vec<_> = errs.fields().iter().map(|e| e.field.as_str()).collect();
    assert_eq!(fields, [ACTIVE_START, ACTIVE_END]);
    assert!(errs.to_string().contains("; "));
  }
}

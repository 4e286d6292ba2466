//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Due dates are stored as `YYYY-MM-DD` text and statuses as their
//! lowercase names. Stored due dates are only ever parsed by the schedule
//! filter.

use chrono::NaiveDate;
use gradepal_core::{
  record::{AssignmentStatus, Class},
  schedule::DUE_DATE_FORMAT,
};

use crate::Result;

// ─── Due date ────────────────────────────────────────────────────────────────

pub fn encode_due_date(d: NaiveDate) -> String {
  d.format(DUE_DATE_FORMAT).to_string()
}

// ─── Status ──────────────────────────────────────────────────────────────────

pub fn encode_status(s: AssignmentStatus) -> &'static str {
  match s {
    AssignmentStatus::Pending => "pending",
    AssignmentStatus::Completed => "completed",
  }
}

pub fn decode_status(s: &str) -> Result<AssignmentStatus> {
  Ok(AssignmentStatus::from_db(s)?)
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Column list matching [`class_from_row`].
pub const CLASS_COLUMNS: &str =
  "class_id, class_name, year, term, goal, current_avg";

pub fn class_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Class> {
  Ok(Class {
    class_id:    row.get(0)?,
    name:        row.get(1)?,
    year:        row.get(2)?,
    term:        row.get(3)?,
    goal:        row.get(4)?,
    current_avg: row.get(5)?,
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn status_names_match_check_constraint() {
    for status in [AssignmentStatus::Pending, AssignmentStatus::Completed] {
      assert_eq!(encode_status(status), status.as_ref());
      assert_eq!(decode_status(encode_status(status)).unwrap(), status);
    }
    assert!(decode_status("archived").is_err());
  }

  #[test]
  fn due_dates_are_zero_padded() {
    let d = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
    assert_eq!(encode_due_date(d), "2024-03-05");
  }
}

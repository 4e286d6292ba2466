//! Selecting pending assignments that fall due within a look-ahead window.
//!
//! The window has no lower bound: a pending assignment whose due date has
//! already passed is still listed.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
  Error, Gradebook, Result,
  record::{AssignmentId, PendingAssignment},
  store::RecordStore,
};

/// Look-ahead used when the caller does not configure one.
pub const DEFAULT_WINDOW_DAYS: u32 = 7;

/// Storage and entry format for due dates.
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` due date. Surrounding whitespace is rejected.
pub fn parse_due_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, DUE_DATE_FORMAT).map_err(|source| {
    Error::MalformedDate { value: s.to_owned(), source }
  })
}

/// Whether `due` is on or before `today + window_days`.
pub fn is_due_within(due: NaiveDate, today: NaiveDate, window_days: u32) -> bool {
  match today.checked_add_days(Days::new(window_days.into())) {
    Some(horizon) => due <= horizon,
    // The horizon is past the last representable date.
    None => true,
  }
}

/// A pending assignment inside the window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpcomingAssignment {
  pub assignment_id: AssignmentId,
  pub title:         String,
  pub due_date:      NaiveDate,
}

impl UpcomingAssignment {
  pub fn is_overdue(&self, today: NaiveDate) -> bool { self.due_date < today }
}

/// A pending assignment whose stored due date could not be parsed.
#[derive(Debug)]
pub struct MalformedDueDate {
  pub assignment_id: AssignmentId,
  pub title:         String,
  pub error:         Error,
}

/// The result of [`Gradebook::upcoming_assignments`].
///
/// An unparseable due date is reported in `malformed` rather than aborting
/// the whole listing.
#[derive(Debug, Default)]
pub struct Upcoming {
  /// In store order.
  pub due:       Vec<UpcomingAssignment>,
  pub malformed: Vec<MalformedDueDate>,
}

/// Split pending assignments into those due within the window and those
/// with malformed due dates; anything due later is dropped.
pub fn filter_upcoming(
  pending: Vec<PendingAssignment>,
  today: NaiveDate,
  window_days: u32,
) -> Upcoming {
  let mut upcoming = Upcoming::default();

  for assignment in pending {
    match parse_due_date(&assignment.due_date) {
      Ok(due_date) => {
        if is_due_within(due_date, today, window_days) {
          upcoming.due.push(UpcomingAssignment {
            assignment_id: assignment.assignment_id,
            title: assignment.title,
            due_date,
          });
        }
      }
      Err(error) => {
        warn!(
          assignment_id = assignment.assignment_id,
          due_date = %assignment.due_date,
          "skipping assignment with malformed due date"
        );
        upcoming.malformed.push(MalformedDueDate {
          assignment_id: assignment.assignment_id,
          title: assignment.title,
          error,
        });
      }
    }
  }

  upcoming
}

impl<S: RecordStore> Gradebook<S> {
  /// Pending assignments due on or before `today + window_days`, overdue
  /// ones included.
  pub async fn upcoming_assignments(
    &self,
    today: NaiveDate,
    window_days: u32,
  ) -> Result<Upcoming, S::Error> {
    let pending = self.store.list_pending_assignments().await?;
    Ok(filter_upcoming(pending, today, window_days))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn date(s: &str) -> NaiveDate { parse_due_date(s).unwrap() }

  fn pending(id: AssignmentId, due: &str) -> PendingAssignment {
    PendingAssignment {
      assignment_id: id,
      title:         format!("assignment {id}"),
      due_date:      due.into(),
    }
  }

  #[test]
  fn window_is_inclusive_of_its_last_day() {
    let today = date("2024-03-01");
    assert!(is_due_within(date("2024-03-08"), today, 7));
    assert!(!is_due_within(date("2024-03-09"), today, 7));
  }

  #[test]
  fn past_due_dates_are_within_window() {
    let today = date("2024-03-01");
    assert!(is_due_within(date("2023-12-25"), today, 7));
  }

  #[test]
  fn zero_day_window_keeps_today() {
    let today = date("2024-03-01");
    assert!(is_due_within(today, today, 0));
    assert!(!is_due_within(date("2024-03-02"), today, 0));
  }

  #[test]
  fn parse_rejects_other_formats() {
    let cases =
      ["03/01/2024", "2024-13-01", "tomorrow", "", " 2024-03-01", "2024-03-01 "];
    for bad in cases {
      let err = parse_due_date(bad).unwrap_err();
      assert!(matches!(err, Error::MalformedDate { .. }), "{bad:?}");
    }
  }

  #[test]
  fn malformed_dates_are_isolated() {
    let today = date("2024-03-01");
    let upcoming = filter_upcoming(
      vec![
        pending(1, "2024-03-04"),
        pending(2, "next week"),
        pending(3, "2024-03-20"),
        pending(4, "2024-02-28"),
        pending(5, " 2024-03-02"),
      ],
      today,
      DEFAULT_WINDOW_DAYS,
    );

    let ids: Vec<_> = upcoming.due.iter().map(|a| a.assignment_id).collect();
    assert_eq!(ids, [1, 4]);
    let malformed: Vec<_> =
      upcoming.malformed.iter().map(|m| m.assignment_id).collect();
    assert_eq!(malformed, [2, 5]);
    assert!(upcoming.due[1].is_overdue(today));
    assert!(!upcoming.due[0].is_overdue(today));
  }
}

//! Records owned by the store: classes, weighted grades, and assignments.
//!
//! The core only ever holds transient copies of these. Identifiers are the
//! store's integer row ids, which is what a user types at the prompt.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::{Error, Result};

pub type ClassId = i64;
pub type GradeId = i64;
pub type AssignmentId = i64;

/// Goal percentage given to a class when none is supplied.
pub const DEFAULT_GOAL: f64 = 85.0;

// ─── Classes ─────────────────────────────────────────────────────────────────

/// A class taken in one term of one academic year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Class {
  pub class_id:    ClassId,
  pub name:        String,
  pub year:        i32,
  /// Sub-period of the year, e.g. 1, 2 or 3 for trimesters.
  pub term:        u8,
  /// Target average, in percent.
  pub goal:        f64,
  /// Cached weighted average. Only meaningful once a grade exists; written
  /// back every time the average is recomputed.
  pub current_avg: f64,
}

impl Class {
  pub fn year_term(&self) -> YearTerm {
    YearTerm { year: self.year, term: self.term }
  }
}

/// Input to [`crate::store::RecordStore::add_class`].
#[derive(Debug, Clone)]
pub struct NewClass {
  pub name: String,
  pub year: i32,
  pub term: u8,
  pub goal: f64,
}

impl NewClass {
  pub fn new(name: impl Into<String>, year: i32, term: u8) -> Self {
    Self { name: name.into(), year, term, goal: DEFAULT_GOAL }
  }
}

/// A (year, term) pair; the grouping key for term GPA.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct YearTerm {
  pub year: i32,
  pub term: u8,
}

// ─── Grades ──────────────────────────────────────────────────────────────────

/// A graded piece of work. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grade {
  pub grade_id:   GradeId,
  pub class_id:   ClassId,
  /// Free-text label, e.g. "Midterm".
  pub assignment: String,
  /// Nominally 0–100; not enforced.
  pub grade:      f64,
  /// Weight points. Need not sum to 100 across a class and may be zero.
  pub weight:     f64,
}

/// Input to [`crate::store::RecordStore::add_grade`].
#[derive(Debug, Clone)]
pub struct NewGrade {
  pub class_id:   ClassId,
  pub assignment: String,
  pub grade:      f64,
  pub weight:     f64,
}

/// The (grade, weight) projection the aggregation engine consumes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedGrade {
  pub grade:  f64,
  pub weight: f64,
}

impl From<(f64, f64)> for WeightedGrade {
  fn from((grade, weight): (f64, f64)) -> Self { Self { grade, weight } }
}

// ─── Assignments ─────────────────────────────────────────────────────────────

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
  Serialize,
  Deserialize,
  AsRefStr,
  Display,
  EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AssignmentStatus {
  #[default]
  Pending,
  Completed,
}

impl AssignmentStatus {
  /// Decode the text stored in the `status` column.
  pub fn from_db(s: &str) -> Result<Self> {
    s.parse().map_err(|_| Error::UnknownStatus(s.to_owned()))
  }
}

/// A piece of upcoming work with a calendar due date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
  pub assignment_id: AssignmentId,
  pub class_id:      ClassId,
  pub title:         String,
  pub due_date:      NaiveDate,
  pub status:        AssignmentStatus,
}

/// An assignment's identity and status as returned by a status change.
///
/// Carries no due date, so an assignment whose stored date is malformed can
/// still be completed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentState {
  pub assignment_id: AssignmentId,
  pub class_id:      ClassId,
  pub title:         String,
  pub status:        AssignmentStatus,
}

/// Input to [`crate::store::RecordStore::add_assignment`]. Assignments are
/// always created pending.
#[derive(Debug, Clone)]
pub struct NewAssignment {
  pub class_id: ClassId,
  pub title:    String,
  pub due_date: NaiveDate,
}

/// A pending assignment as read back for scheduling. The due date is kept
/// as the stored text; parsing it is the schedule filter's job.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingAssignment {
  pub assignment_id: AssignmentId,
  pub title:         String,
  pub due_date:      String,
}

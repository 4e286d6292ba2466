//! The `RecordStore` trait: everything the core needs from persistence.
//!
//! Implemented by storage backends (e.g. `gradepal-store-sqlite`). The
//! aggregation engine and schedule filter depend only on this abstraction;
//! the store manages its own connection lifecycle.

use std::future::Future;

use crate::record::{
  Assignment, AssignmentId, AssignmentState, Class, ClassId, Grade, NewAssignment, NewClass,
  NewGrade, PendingAssignment, WeightedGrade, YearTerm,
};

/// Abstraction over a GradePal record store backend.
///
/// Every write completes before its future resolves. Grades are immutable
/// once recorded; the only mutations are the cached class average and the
/// assignment status.
pub trait RecordStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Writes ────────────────────────────────────────────────────────────

  /// Persist a new class with a cached average of 0.
  fn add_class(
    &self,
    input: NewClass,
  ) -> impl Future<Output = Result<Class, Self::Error>> + Send + '_;

  /// Record a grade. Fails if the owning class does not exist.
  fn add_grade(
    &self,
    input: NewGrade,
  ) -> impl Future<Output = Result<Grade, Self::Error>> + Send + '_;

  /// Record a pending assignment. Fails if the owning class does not exist.
  fn add_assignment(
    &self,
    input: NewAssignment,
  ) -> impl Future<Output = Result<Assignment, Self::Error>> + Send + '_;

  /// Mark an assignment completed. Completing it twice is not an error; an
  /// unknown id is, and leaves every row untouched. The due date is never
  /// decoded here.
  fn complete_assignment(
    &self,
    id: AssignmentId,
  ) -> impl Future<Output = Result<AssignmentState, Self::Error>> + Send + '_;

  /// Overwrite the cached average of a class. Unknown ids are ignored.
  fn write_class_average(
    &self,
    class_id: ClassId,
    average: f64,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Reads ─────────────────────────────────────────────────────────────

  /// Retrieve a class by id. Returns `None` if not found.
  fn get_class(
    &self,
    class_id: ClassId,
  ) -> impl Future<Output = Result<Option<Class>, Self::Error>> + Send + '_;

  /// All classes, ordered by year, term, then id.
  fn list_classes(
    &self,
  ) -> impl Future<Output = Result<Vec<Class>, Self::Error>> + Send + '_;

  /// The (grade, weight) pairs recorded for one class.
  fn list_grades(
    &self,
    class_id: ClassId,
  ) -> impl Future<Output = Result<Vec<WeightedGrade>, Self::Error>> + Send + '_;

  /// Ids of the classes taken in the given year and term.
  fn list_class_ids(
    &self,
    year_term: YearTerm,
  ) -> impl Future<Output = Result<Vec<ClassId>, Self::Error>> + Send + '_;

  /// The distinct (year, term) pairs that have at least one class.
  fn list_year_terms(
    &self,
  ) -> impl Future<Output = Result<Vec<YearTerm>, Self::Error>> + Send + '_;

  /// Pending assignments in insertion order, due dates as stored.
  fn list_pending_assignments(
    &self,
  ) -> impl Future<Output = Result<Vec<PendingAssignment>, Self::Error>> + Send + '_;
}

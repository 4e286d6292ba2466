//! Error types for `gradepal-core`.

use thiserror::Error;

use crate::record::{AssignmentId, ClassId};

#[derive(Debug, Error)]
pub enum Error {
  #[error("malformed due date {value:?} (expected YYYY-MM-DD)")]
  MalformedDate {
    value:  String,
    #[source]
    source: chrono::ParseError,
  },

  #[error("unknown assignment status: {0:?}")]
  UnknownStatus(String),

  #[error("class not found: {0}")]
  ClassNotFound(ClassId),

  #[error("assignment not found: {0}")]
  AssignmentNotFound(AssignmentId),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

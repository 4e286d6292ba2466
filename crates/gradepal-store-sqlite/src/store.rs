//! [`SqliteStore`] — the SQLite implementation of [`RecordStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;
use tracing::debug;

use gradepal_core::{
  record::{
    Assignment, AssignmentId, AssignmentState, AssignmentStatus, Class,
    ClassId, Grade, NewAssignment, NewClass, NewGrade, PendingAssignment,
    WeightedGrade, YearTerm,
  },
  store::RecordStore,
};

use crate::{
  Error, Result,
  encode::{
    CLASS_COLUMNS, class_from_row, decode_status, encode_due_date,
    encode_status,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A GradePal record store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  #[cfg(test)]
  pub(crate) fn connection(&self) -> &tokio_rusqlite::Connection { &self.conn }

  async fn class_exists(&self, class_id: ClassId) -> Result<bool> {
    let exists = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT 1 FROM classes WHERE class_id = ?1",
              rusqlite::params![class_id],
              |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false),
        )
      })
      .await?;
    Ok(exists)
  }
}

// ─── RecordStore impl ────────────────────────────────────────────────────────

impl RecordStore for SqliteStore {
  type Error = Error;

  // ── Writes ────────────────────────────────────────────────────────────────

  async fn add_class(&self, input: NewClass) -> Result<Class> {
    let name = input.name.clone();
    let (year, term, goal) = (input.year, input.term, input.goal);

    let class_id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO classes (class_name, year, term, goal) VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![name, year, term, goal],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    debug!(class_id, year, term, "added class");
    Ok(Class {
      class_id,
      name: input.name,
      year,
      term,
      goal,
      current_avg: 0.0,
    })
  }

  async fn add_grade(&self, input: NewGrade) -> Result<Grade> {
    if !self.class_exists(input.class_id).await? {
      return Err(gradepal_core::Error::ClassNotFound(input.class_id).into());
    }

    let NewGrade { class_id, assignment, grade, weight } = input;
    let label = assignment.clone();

    let grade_id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO grades (class_id, assignment_name, grade, weight)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![class_id, label, grade, weight],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    debug!(grade_id, class_id, grade, weight, "added grade");
    Ok(Grade { grade_id, class_id, assignment, grade, weight })
  }

  async fn add_assignment(&self, input: NewAssignment) -> Result<Assignment> {
    if !self.class_exists(input.class_id).await? {
      return Err(gradepal_core::Error::ClassNotFound(input.class_id).into());
    }

    let NewAssignment { class_id, title, due_date } = input;
    let title_str  = title.clone();
    let due_str    = encode_due_date(due_date);
    let status_str = encode_status(AssignmentStatus::Pending);

    let assignment_id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO assignments (class_id, title, due_date, status)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![class_id, title_str, due_str, status_str],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    debug!(assignment_id, class_id, %due_date, "added assignment");
    Ok(Assignment {
      assignment_id,
      class_id,
      title,
      due_date,
      status: AssignmentStatus::Pending,
    })
  }

  async fn complete_assignment(&self, id: AssignmentId) -> Result<AssignmentState> {
    let status_str = encode_status(AssignmentStatus::Completed);

    // Update and read back in one call; the due date is never decoded, so a
    // row with a malformed date completes like any other.
    let row: Option<(i64, String, String)> = self
      .conn
      .call(move |conn| {
        let changed = conn.execute(
          "UPDATE assignments SET status = ?1 WHERE assignment_id = ?2",
          rusqlite::params![status_str, id],
        )?;
        if changed == 0 {
          return Ok(None);
        }
        Ok(Some(conn.query_row(
          "SELECT class_id, title, status FROM assignments WHERE assignment_id = ?1",
          rusqlite::params![id],
          |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )?))
      })
      .await?;

    let Some((class_id, title, status)) = row else {
      return Err(gradepal_core::Error::AssignmentNotFound(id).into());
    };

    debug!(assignment_id = id, "completed assignment");
    Ok(AssignmentState {
      assignment_id: id,
      class_id,
      title,
      status: decode_status(&status)?,
    })
  }

  async fn write_class_average(&self, class_id: ClassId, average: f64) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE classes SET current_avg = ?1 WHERE class_id = ?2",
          rusqlite::params![average, class_id],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  async fn get_class(&self, class_id: ClassId) -> Result<Option<Class>> {
    let class = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {CLASS_COLUMNS} FROM classes WHERE class_id = ?1"),
              rusqlite::params![class_id],
              class_from_row,
            )
            .optional()?,
        )
      })
      .await?;
    Ok(class)
  }

  async fn list_classes(&self) -> Result<Vec<Class>> {
    let classes = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {CLASS_COLUMNS} FROM classes ORDER BY year, term, class_id"
        ))?;
        let rows = stmt
          .query_map([], class_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(classes)
  }

  async fn list_grades(&self, class_id: ClassId) -> Result<Vec<WeightedGrade>> {
    let grades = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT grade, weight FROM grades WHERE class_id = ?1 ORDER BY grade_id",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![class_id], |row| {
            Ok(WeightedGrade { grade: row.get(0)?, weight: row.get(1)? })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(grades)
  }

  async fn list_class_ids(&self, year_term: YearTerm) -> Result<Vec<ClassId>> {
    let YearTerm { year, term } = year_term;

    let ids = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT class_id FROM classes WHERE year = ?1 AND term = ?2 ORDER BY class_id",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![year, term], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<ClassId>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(ids)
  }

  async fn list_year_terms(&self) -> Result<Vec<YearTerm>> {
    let pairs = self
      .conn
      .call(|conn| {
        let mut stmt = conn
          .prepare("SELECT DISTINCT year, term FROM classes ORDER BY year, term")?;
        let rows = stmt
          .query_map([], |row| Ok(YearTerm { year: row.get(0)?, term: row.get(1)? }))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(pairs)
  }

  async fn list_pending_assignments(&self) -> Result<Vec<PendingAssignment>> {
    let status_str = encode_status(AssignmentStatus::Pending);

    let pending = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT assignment_id, title, due_date FROM assignments
           WHERE status = ?1
           ORDER BY assignment_id",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![status_str], |row| {
            Ok(PendingAssignment {
              assignment_id: row.get(0)?,
              title:         row.get(1)?,
              due_date:      row.get(2)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(pending)
  }
}

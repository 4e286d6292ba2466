//! SQL schema for the GradePal SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS classes (
    class_id    INTEGER PRIMARY KEY AUTOINCREMENT,
    class_name  TEXT    NOT NULL,
    year        INTEGER NOT NULL,
    term        INTEGER NOT NULL,
    goal        REAL    NOT NULL DEFAULT 85.0,
    current_avg REAL    NOT NULL DEFAULT 0.0   -- derived; rewritten on every recompute
);

-- Grades are never updated once written.
CREATE TABLE IF NOT EXISTS grades (
    grade_id        INTEGER PRIMARY KEY AUTOINCREMENT,
    class_id        INTEGER NOT NULL REFERENCES classes(class_id),
    assignment_name TEXT    NOT NULL,
    grade           REAL    NOT NULL,
    weight          REAL    NOT NULL
);

CREATE TABLE IF NOT EXISTS assignments (
    assignment_id INTEGER PRIMARY KEY AUTOINCREMENT,
    class_id      INTEGER NOT NULL REFERENCES classes(class_id),
    title         TEXT    NOT NULL,
    due_date      TEXT    NOT NULL,   -- YYYY-MM-DD
    status        TEXT    NOT NULL DEFAULT 'pending'
                  CHECK (status IN ('pending', 'completed'))
);

CREATE INDEX IF NOT EXISTS classes_year_term_idx  ON classes(year, term);
CREATE INDEX IF NOT EXISTS grades_class_idx       ON grades(class_id);
CREATE INDEX IF NOT EXISTS assignments_status_idx ON assignments(status);

PRAGMA user_version = 1;
";

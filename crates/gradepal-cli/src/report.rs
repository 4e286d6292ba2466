//! Text and JSON rendering of classes, GPA summaries and upcoming work.

use std::io::Write;

use anyhow::Result;
use chrono::NaiveDate;
use gradepal_core::{
  ClassStanding, GpaSummary, Upcoming, UpcomingAssignment, record::Class,
};
use serde::Serialize;

pub fn write_standing(out: &mut impl Write, standing: &ClassStanding) -> Result<()> {
  let ClassStanding { class, average, goal_met } = standing;
  writeln!(
    out,
    "\nCurrent average for class {} ({}): {average:.2}%",
    class.class_id, class.name
  )?;
  let verdict = if *goal_met { "met" } else { "not yet met" };
  writeln!(out, "Goal: {:.2}% ({verdict})", class.goal)?;
  Ok(())
}

pub fn write_classes(out: &mut impl Write, classes: &[Class]) -> Result<()> {
  if classes.is_empty() {
    writeln!(out, "\nNo classes yet.")?;
    return Ok(());
  }

  writeln!(
    out,
    "\n{:>4}  {:<24} {:>6} {:>4} {:>8} {:>8}",
    "ID", "Class", "Year", "Term", "Average", "Goal"
  )?;
  for c in classes {
    writeln!(
      out,
      "{:>4}  {:<24} {:>6} {:>4} {:>7.2}% {:>7.2}%",
      c.class_id, c.name, c.year, c.term, c.current_avg, c.goal
    )?;
  }
  Ok(())
}

pub fn write_gpa_summary(out: &mut impl Write, summary: &GpaSummary) -> Result<()> {
  for term in &summary.terms {
    writeln!(out, "Year {}, Term {} GPA: {:.2}", term.year, term.term, term.gpa)?;
  }
  writeln!(out, "Overall GPA for the Program: {:.2}", summary.program)?;
  Ok(())
}

pub fn write_upcoming(
  out: &mut impl Write,
  upcoming: &Upcoming,
  today: NaiveDate,
) -> Result<()> {
  writeln!(out, "Upcoming assignments:")?;
  if upcoming.due.is_empty() {
    writeln!(out, "\n(none)")?;
  }
  for a in &upcoming.due {
    let overdue = if a.is_overdue(today) { " [overdue]" } else { "" };
    writeln!(
      out,
      "\n#{} {} (Due: {}){overdue}",
      a.assignment_id, a.title, a.due_date
    )?;
  }
  for m in &upcoming.malformed {
    writeln!(out, "\n#{} {}: {}", m.assignment_id, m.title, m.error)?;
  }
  Ok(())
}

// ─── JSON ────────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct UpcomingJson<'a> {
  due:       &'a [UpcomingAssignment],
  malformed: Vec<MalformedJson<'a>>,
}

#[derive(Serialize)]
struct MalformedJson<'a> {
  assignment_id: i64,
  title:         &'a str,
  error:         String,
}

pub fn write_upcoming_json(out: &mut impl Write, upcoming: &Upcoming) -> Result<()> {
  let json = UpcomingJson {
    due:       &upcoming.due,
    malformed: upcoming
      .malformed
      .iter()
      .map(|m| MalformedJson {
        assignment_id: m.assignment_id,
        title:         &m.title,
        error:         m.error.to_string(),
      })
      .collect(),
  };
  serde_json::to_writer_pretty(&mut *out, &json)?;
  writeln!(out)?;
  Ok(())
}

pub fn write_gpa_summary_json(out: &mut impl Write, summary: &GpaSummary) -> Result<()> {
  serde_json::to_writer_pretty(&mut *out, summary)?;
  writeln!(out)?;
  Ok(())
}

#[cfg(test)]
mod tests {
  use gradepal_core::{
    Error, MalformedDueDate, TermGpa, schedule::parse_due_date,
  };

  use super::*;

  fn date(s: &str) -> NaiveDate { s.parse().unwrap() }

  #[test]
  fn gpa_summary_text() {
    let summary = GpaSummary {
      terms:   vec![
        TermGpa { year: 2024, term: 1, gpa: 80.0 },
        TermGpa { year: 2024, term: 2, gpa: 90.0 },
      ],
      program: 85.0,
    };
    let mut out = Vec::new();
    write_gpa_summary(&mut out, &summary).unwrap();
    assert_eq!(
      String::from_utf8(out).unwrap(),
      "Year 2024, Term 1 GPA: 80.00\n\
       Year 2024, Term 2 GPA: 90.00\n\
       Overall GPA for the Program: 85.00\n"
    );
  }

  #[test]
  fn upcoming_marks_overdue() {
    let upcoming = Upcoming {
      due:       vec![
        UpcomingAssignment {
          assignment_id: 1,
          title:         "Lab report".into(),
          due_date:      date("2024-03-04"),
        },
        UpcomingAssignment {
          assignment_id: 2,
          title:         "Reading".into(),
          due_date:      date("2024-02-27"),
        },
      ],
      malformed: Vec::new(),
    };
    let mut out = Vec::new();
    write_upcoming(&mut out, &upcoming, date("2024-03-01")).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("#1 Lab report (Due: 2024-03-04)\n"));
    assert!(text.contains("#2 Reading (Due: 2024-02-27) [overdue]"));
  }

  #[test]
  fn gpa_summary_json_shape() {
    let summary = GpaSummary {
      terms:   vec![TermGpa { year: 2023, term: 3, gpa: 71.5 }],
      program: 71.5,
    };
    let mut out = Vec::new();
    write_gpa_summary_json(&mut out, &summary).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(value["program"], 71.5);
    assert_eq!(value["terms"][0]["term"], 3);
  }

  #[test]
  fn upcoming_json_shape() {
    let upcoming = Upcoming {
      due:       vec![UpcomingAssignment {
        assignment_id: 4,
        title:         "Problem set".into(),
        due_date:      date("2024-03-05"),
      }],
      malformed: vec![MalformedDueDate {
        assignment_id: 7,
        title:         "Mural".into(),
        error:         parse_due_date("soon").unwrap_err(),
      }],
    };
    assert!(matches!(upcoming.malformed[0].error, Error::MalformedDate { .. }));

    let mut out = Vec::new();
    write_upcoming_json(&mut out, &upcoming).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();

    let due = &value["due"][0];
    assert_eq!(due["assignment_id"], 4);
    assert_eq!(due["title"], "Problem set");
    assert_eq!(due["due_date"], "2024-03-05");

    let malformed = value["malformed"].as_array().unwrap();
    assert_eq!(malformed.len(), 1);
    assert_eq!(malformed[0]["assignment_id"], 7);
    assert_eq!(malformed[0]["title"], "Mural");
    assert_eq!(
      malformed[0]["error"],
      "malformed due date \"soon\" (expected YYYY-MM-DD)"
    );
  }
}

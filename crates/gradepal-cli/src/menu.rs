//! The interactive menu loop.
//!
//! Each action runs to completion before the menu is shown again. A failed
//! action prints its error and returns to the menu; running out of input
//! ends the session.

use std::io::{BufRead, Write};

use anyhow::{Result, bail};
use chrono::{Local, NaiveDate};
use gradepal_core::{
  Gradebook,
  record::{ClassId, NewAssignment, NewClass, NewGrade},
  schedule::parse_due_date,
  store::RecordStore,
};
use tracing::debug;

use crate::{
  settings::Settings,
  console::{Console, EndOfInput},
  report,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Choice {
  AddClass,
  AddGrade,
  AddAssignment,
  ClassAverage,
  Upcoming,
  GpaByTerm,
  CompleteAssignment,
  ListClasses,
  Exit,
}

impl Choice {
  const ALL: [(Self, &'static str); 9] = [
    (Self::AddClass, "Add a class"),
    (Self::AddGrade, "Add a grade"),
    (Self::AddAssignment, "Add an assignment"),
    (Self::ClassAverage, "Calculate class average"),
    (Self::Upcoming, "View upcoming assignments"),
    (Self::GpaByTerm, "View GPA by year and term"),
    (Self::CompleteAssignment, "Mark an assignment completed"),
    (Self::ListClasses, "List classes"),
    (Self::Exit, "Exit"),
  ];

  fn from_input(s: &str) -> Option<Self> {
    let n: usize = s.parse().ok()?;
    Self::ALL.get(n.checked_sub(1)?).map(|(choice, _)| *choice)
  }
}

pub struct Menu<'a, S, R, W> {
  book:     &'a Gradebook<S>,
  settings: &'a Settings,
  console:  Console<R, W>,
  /// Source of "today" for the upcoming-assignments view.
  today:    fn() -> NaiveDate,
}

impl<'a, S, R, W> Menu<'a, S, R, W>
where
  S: RecordStore,
  R: BufRead,
  W: Write,
{
  pub fn new(
    book: &'a Gradebook<S>,
    settings: &'a Settings,
    console: Console<R, W>,
  ) -> Self {
    Self { book, settings, console, today: || Local::now().date_naive() }
  }

  #[cfg(test)]
  pub fn with_today(mut self, today: fn() -> NaiveDate) -> Self {
    self.today = today;
    self
  }

  #[cfg(test)]
  pub fn into_console(self) -> Console<R, W> { self.console }

  pub async fn run(&mut self) -> Result<()> {
    writeln!(
      self.console.out(),
      "Welcome to GradePal: Grade & Assignment Tracker!"
    )?;

    loop {
      self.print_menu()?;

      let Some(input) = self.console.line("Enter your choice: ")? else {
        break;
      };
      let Some(choice) = Choice::from_input(&input) else {
        writeln!(self.console.out(), "\nInvalid choice. Please try again.")?;
        continue;
      };
      if choice == Choice::Exit {
        writeln!(self.console.out(), "\nExiting the tracker. Goodbye!")?;
        break;
      }

      if let Err(err) = self.dispatch(choice).await {
        if err.is::<EndOfInput>() {
          break;
        }
        debug!(?choice, error = %err, "menu action failed");
        writeln!(self.console.out(), "\nError: {err:#}")?;
      }
    }

    Ok(())
  }

  fn print_menu(&mut self) -> Result<()> {
    let out = self.console.out();
    writeln!(out, "\nMenu:")?;
    for (i, (_, label)) in Choice::ALL.iter().enumerate() {
      writeln!(out, "{}. {label}", i + 1)?;
    }
    Ok(())
  }

  async fn dispatch(&mut self, choice: Choice) -> Result<()> {
    match choice {
      Choice::AddClass => self.add_class().await,
      Choice::AddGrade => self.add_grade().await,
      Choice::AddAssignment => self.add_assignment().await,
      Choice::ClassAverage => self.class_average().await,
      Choice::Upcoming => self.upcoming().await,
      Choice::GpaByTerm => self.gpa_by_term().await,
      Choice::CompleteAssignment => self.complete_assignment().await,
      Choice::ListClasses => self.list_classes().await,
      Choice::Exit => Ok(()),
    }
  }

  // ── Actions ───────────────────────────────────────────────────────────────

  async fn add_class(&mut self) -> Result<()> {
    let terms = self.settings.terms_per_year;

    let name = self.console.text("Enter class name: ")?;
    let year: i32 = self.console.parse("Enter year: ")?;
    let term: u8 = self.console.parse(&format!("Enter term (1-{terms}): "))?;
    if !(1..=terms).contains(&term) {
      bail!("term must be between 1 and {terms}");
    }
    let goal = self.console.parse_or(
      &format!("Enter goal % (blank for {:.2}): ", self.settings.default_goal),
      self.settings.default_goal,
    )?;

    let class = self
      .book
      .store()
      .add_class(NewClass { name, year, term, goal })
      .await?;
    writeln!(
      self.console.out(),
      "\nClass added successfully (ID {}).",
      class.class_id
    )?;
    Ok(())
  }

  async fn add_grade(&mut self) -> Result<()> {
    let class_id: ClassId = self.console.parse("Enter class ID: ")?;
    let assignment = self.console.text("Enter assignment name: ")?;
    let grade: f64 = self.console.parse("Enter grade: ")?;
    let weight: f64 = self.console.parse("Enter weight: ")?;

    self
      .book
      .store()
      .add_grade(NewGrade { class_id, assignment, grade, weight })
      .await?;
    writeln!(self.console.out(), "\nGrade added successfully.")?;
    Ok(())
  }

  async fn add_assignment(&mut self) -> Result<()> {
    let class_id: ClassId = self.console.parse("Enter class ID: ")?;
    let title = self.console.text("Enter assignment title: ")?;
    let due_date =
      parse_due_date(&self.console.text("Enter due date (YYYY-MM-DD): ")?)?;

    let assignment = self
      .book
      .store()
      .add_assignment(NewAssignment { class_id, title, due_date })
      .await?;
    writeln!(
      self.console.out(),
      "\nAssignment added successfully (ID {}).",
      assignment.assignment_id
    )?;
    Ok(())
  }

  async fn class_average(&mut self) -> Result<()> {
    let class_id: ClassId = self.console.parse("Enter class ID: ")?;

    match self.book.class_standing(class_id).await? {
      Some(standing) => report::write_standing(self.console.out(), &standing),
      None => {
        writeln!(self.console.out(), "\nNo class with ID {class_id}.")?;
        Ok(())
      }
    }
  }

  async fn upcoming(&mut self) -> Result<()> {
    let today = (self.today)();
    let upcoming = self
      .book
      .upcoming_assignments(today, self.settings.window_days)
      .await?;
    report::write_upcoming(self.console.out(), &upcoming, today)
  }

  async fn gpa_by_term(&mut self) -> Result<()> {
    let summary = self.book.gpa_summary().await?;
    writeln!(self.console.out())?;
    report::write_gpa_summary(self.console.out(), &summary)
  }

  async fn complete_assignment(&mut self) -> Result<()> {
    let id = self.console.parse("Enter assignment ID: ")?;
    let assignment = self.book.store().complete_assignment(id).await?;
    writeln!(
      self.console.out(),
      "\nMarked \"{}\" as completed.",
      assignment.title
    )?;
    Ok(())
  }

  async fn list_classes(&mut self) -> Result<()> {
    let classes = self.book.store().list_classes().await?;
    report::write_classes(self.console.out(), &classes)
  }
}

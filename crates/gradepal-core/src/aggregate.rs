//! Weighted class averages and their term and program roll-ups.
//!
//! Every roll-up is an unweighted mean: each class counts once towards its
//! term, and each term counts once towards the program, regardless of how
//! many grades or classes sit underneath. Empty inputs average to 0.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
  Gradebook,
  record::{Class, ClassId, WeightedGrade, YearTerm},
  store::RecordStore,
};

// ─── Pure computation ────────────────────────────────────────────────────────

/// Weighted average of a set of grades, in percent.
///
/// Each grade contributes `grade * weight / 100` points; the point total is
/// then renormalised by the summed weight, so weights need not add up to
/// 100. A summed weight of exactly zero (including no grades at all) yields
/// 0. Negative weights are not rejected and skew the result arithmetically.
pub fn weighted_average(grades: &[WeightedGrade]) -> f64 {
  let total_weighted_score: f64 =
    grades.iter().map(|g| g.grade * g.weight / 100.0).sum();
  let total_weight: f64 = grades.iter().map(|g| g.weight).sum();

  if total_weight == 0.0 {
    0.0
  } else {
    total_weighted_score / total_weight * 100.0
  }
}

/// Arithmetic mean; 0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
  if values.is_empty() {
    0.0
  } else {
    values.iter().sum::<f64>() / values.len() as f64
  }
}

// ─── Report types ────────────────────────────────────────────────────────────

/// The GPA of one (year, term).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TermGpa {
  pub year: i32,
  pub term: u8,
  pub gpa:  f64,
}

/// Every term GPA alongside the program GPA derived from them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GpaSummary {
  pub terms:   Vec<TermGpa>,
  pub program: f64,
}

/// A class with its freshly recomputed average measured against its goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassStanding {
  pub class:    Class,
  pub average:  f64,
  pub goal_met: bool,
}

// ─── Store-backed aggregation ────────────────────────────────────────────────

impl<S: RecordStore> Gradebook<S> {
  /// Compute the weighted average of a class **and write it back** as the
  /// class's cached average.
  ///
  /// A class with no grades (or an unknown id) averages 0.
  pub async fn class_average(&self, class_id: ClassId) -> Result<f64, S::Error> {
    let grades = self.store.list_grades(class_id).await?;
    let average = weighted_average(&grades);
    self.store.write_class_average(class_id, average).await?;
    debug!(class_id, grades = grades.len(), average, "recomputed class average");
    Ok(average)
  }

  /// Mean of the averages of every class in `year_term`; 0 if there are
  /// none. Recomputes, and so rewrites, each class's cached average.
  pub async fn term_gpa(&self, year_term: YearTerm) -> Result<f64, S::Error> {
    let class_ids = self.store.list_class_ids(year_term).await?;

    let mut averages = Vec::with_capacity(class_ids.len());
    for class_id in class_ids {
      averages.push(self.class_average(class_id).await?);
    }

    let gpa = mean(&averages);
    debug!(
      year = year_term.year,
      term = year_term.term,
      classes = averages.len(),
      gpa,
      "computed term gpa"
    );
    Ok(gpa)
  }

  /// Mean of the term GPAs of every distinct (year, term) in the store; 0
  /// if there are no classes. Each term carries equal weight.
  pub async fn program_gpa(&self) -> Result<f64, S::Error> {
    let year_terms = self.store.list_year_terms().await?;

    let mut gpas = Vec::with_capacity(year_terms.len());
    for year_term in year_terms {
      gpas.push(self.term_gpa(year_term).await?);
    }

    Ok(mean(&gpas))
  }

  /// All term GPAs and the program GPA in one pass over the store.
  pub async fn gpa_summary(&self) -> Result<GpaSummary, S::Error> {
    let year_terms = self.store.list_year_terms().await?;

    let mut terms = Vec::with_capacity(year_terms.len());
    for year_term in year_terms {
      terms.push(TermGpa {
        year: year_term.year,
        term: year_term.term,
        gpa:  self.term_gpa(year_term).await?,
      });
    }

    let gpas: Vec<f64> = terms.iter().map(|t| t.gpa).collect();
    Ok(GpaSummary { program: mean(&gpas), terms })
  }

  /// Recompute a class's average and compare it to the class goal. Returns
  /// `None` if the class does not exist.
  pub async fn class_standing(
    &self,
    class_id: ClassId,
  ) -> Result<Option<ClassStanding>, S::Error> {
    if self.store.get_class(class_id).await?.is_none() {
      return Ok(None);
    }

    let average = self.class_average(class_id).await?;

    // Re-read so the returned record carries the average just written.
    let Some(class) = self.store.get_class(class_id).await? else {
      return Ok(None);
    };

    Ok(Some(ClassStanding { goal_met: average >= class.goal, average, class }))
  }
}

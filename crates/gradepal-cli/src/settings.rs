//! Runtime settings, read from an optional TOML file layered under
//! `GRADEPAL_*` environment variables.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use gradepal_core::{DEFAULT_WINDOW_DAYS, record::DEFAULT_GOAL};
use serde::Deserialize;

/// Settings for the `gradepal` binary. Every key is optional.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
  /// SQLite database file; a leading `~/` is expanded.
  pub store_path:     PathBuf,
  /// Look-ahead for the upcoming-assignments view.
  pub window_days:    u32,
  /// Goal given to new classes when none is entered.
  pub default_goal:   f64,
  /// Highest valid term number.
  pub terms_per_year: u8,
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      store_path:     PathBuf::from("grade_tracker.db"),
      window_days:    DEFAULT_WINDOW_DAYS,
      default_goal:   DEFAULT_GOAL,
      terms_per_year: 3,
    }
  }
}

impl Settings {
  /// Load settings from `path` (if it exists) and the environment.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("GRADEPAL"))
      .build()
      .with_context(|| format!("failed to read config file {}", path.display()))?;

    settings
      .try_deserialize()
      .context("failed to deserialise settings")
  }

  /// The look-ahead to use: an explicit `--days` wins over `window_days`.
  pub fn window_or(&self, days: Option<u32>) -> u32 {
    days.unwrap_or(self.window_days)
  }

  /// The store path with `~/` expanded.
  pub fn resolved_store_path(&self) -> PathBuf { expand_tilde(&self.store_path) }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn missing_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let settings = Settings::load(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(settings.window_days, 7);
    assert_eq!(settings.default_goal, 85.0);
    assert_eq!(settings.terms_per_year, 3);
  }

  #[test]
  fn file_overrides_some_keys() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gradepal.toml");
    std::fs::write(&path, "window_days = 14\nterms_per_year = 2\n").unwrap();

    let settings = Settings::load(&path).unwrap();
    assert_eq!(settings.window_days, 14);
    assert_eq!(settings.terms_per_year, 2);
    assert_eq!(settings.default_goal, 85.0);
  }

  #[test]
  fn explicit_days_override_window() {
    let settings = Settings { window_days: 10, ..Settings::default() };
    assert_eq!(settings.window_or(Some(3)), 3);
    assert_eq!(settings.window_or(Some(0)), 0);
    assert_eq!(settings.window_or(None), 10);
  }

  #[test]
  fn relative_paths_are_left_alone() {
    assert_eq!(expand_tilde(Path::new("grades.db")), PathBuf::from("grades.db"));
  }
}

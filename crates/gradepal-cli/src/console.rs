//! Line-oriented prompting over any reader/writer pair.

use std::{
  fmt::Display,
  io::{BufRead, Write},
  str::FromStr,
};

use anyhow::{Context as _, Result, anyhow};
use thiserror::Error;

/// Input ran out before a prompt was answered.
#[derive(Debug, Error)]
#[error("unexpected end of input")]
pub struct EndOfInput;

pub struct Console<R, W> {
  input:  R,
  output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
  pub fn new(input: R, output: W) -> Self { Self { input, output } }

  pub fn out(&mut self) -> &mut W { &mut self.output }

  #[cfg(test)]
  pub fn into_output(self) -> W { self.output }

  /// Print `prompt` and read one trimmed line. `None` at end of input.
  pub fn line(&mut self, prompt: &str) -> Result<Option<String>> {
    write!(self.output, "{prompt}")?;
    self.output.flush()?;

    let mut buf = String::new();
    let read = self.input.read_line(&mut buf).context("reading input")?;
    if read == 0 {
      return Ok(None);
    }
    Ok(Some(buf.trim().to_owned()))
  }

  /// Like [`Console::line`], but end of input is an [`EndOfInput`] error.
  pub fn text(&mut self, prompt: &str) -> Result<String> {
    self.line(prompt)?.ok_or_else(|| EndOfInput.into())
  }

  pub fn parse<T>(&mut self, prompt: &str) -> Result<T>
  where
    T: FromStr,
    T::Err: Display,
  {
    let raw = self.text(prompt)?;
    raw
      .parse()
      .map_err(|e| anyhow!("invalid input {raw:?}: {e}"))
  }

  /// Parse a value, falling back to `default` on a blank line.
  pub fn parse_or<T>(&mut self, prompt: &str, default: T) -> Result<T>
  where
    T: FromStr,
    T::Err: Display,
  {
    let raw = self.text(prompt)?;
    if raw.is_empty() {
      return Ok(default);
    }
    raw
      .parse()
      .map_err(|e| anyhow!("invalid input {raw:?}: {e}"))
  }
}

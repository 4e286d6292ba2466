//! Core types, the record-store abstraction, and the grade aggregation and
//! due-date filtering logic for GradePal.
//!
//! This crate has no database or console dependencies. Storage backends
//! implement [`store::RecordStore`]; front ends drive a [`Gradebook`].

// Native `async fn` in traits; the store trait spells out `Send` futures
// itself.
#![allow(async_fn_in_trait)]

pub mod aggregate;
pub mod error;
pub mod record;
pub mod schedule;
pub mod store;

pub use aggregate::{ClassStanding, GpaSummary, TermGpa};
pub use error::{Error, Result};
pub use schedule::{
  DEFAULT_WINDOW_DAYS, MalformedDueDate, Upcoming, UpcomingAssignment,
};

use store::RecordStore;

/// The aggregation and scheduling entry point, holding an injected
/// [`RecordStore`] handle.
///
/// The store owns its connection lifecycle; a `Gradebook` keeps no state of
/// its own beyond the handle.
#[derive(Debug, Clone)]
pub struct Gradebook<S> {
  store: S,
}

impl<S: RecordStore> Gradebook<S> {
  pub fn new(store: S) -> Self { Self { store } }

  /// The underlying store, for the write paths that bypass aggregation.
  pub fn store(&self) -> &S { &self.store }
}

//! The `MeasurementStore` trait.
//!
//! Implemented by storage backends (e.g. `vitalog-store-sqlite`). The skill
//! layer depends on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::{
  measurement::{Category, Measurement},
  window::ReportWindow,
};

/// Abstraction over the durable, append-only measurement log.
///
/// All methods return `Send` futures so the trait can be used from
/// multi-threaded async hosts.
pub trait MeasurementStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Persist `batch` as a single atomic unit: all rows or none. A failure
  /// mid-write rolls back the whole batch — this is what keeps the two-row
  /// blood-pressure case from ever being half-written. An empty batch is a
  /// no-op.
  fn insert(
    &self,
    batch: Vec<Measurement>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Return every row with `window.from < recorded_at < window.to` (both
  /// bounds strictly exclusive) matching `category` and `person` exactly.
  /// An empty `person` matches only rows stored with an empty person; there
  /// is no wildcard. Rows come back in physical insertion order.
  ///
  /// Zero matches is `Ok` with an empty vec, distinguishable from a genuine
  /// query failure.
  fn query<'a>(
    &'a self,
    window: ReportWindow,
    category: Category,
    person: &'a str,
  ) -> impl Future<Output = Result<Vec<Measurement>, Self::Error>> + Send + 'a;
}

//! Error types for `vitalog-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown category: {0:?}")]
  UnknownCategory(String),

  #[error("unknown period: {0:?}")]
  UnknownPeriod(String),

  #[error("not a numeric value: {0:?}")]
  NonNumericValue(String),

  #[error("report window cannot be represented in the local timezone: {0}")]
  InvalidWindow(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

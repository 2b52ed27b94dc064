//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are normalised to UTC and written in fixed-width RFC 3339 so
//! that SQLite's lexicographic TEXT comparison agrees with time order; they
//! are decoded back into the local timezone on read.

use chrono::{DateTime, Local, SecondsFormat, Utc};
use vitalog_core::measurement::{Category, Measurement};

use crate::Result;

// ─── DateTime<Local> ─────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Local>) -> String {
  dt.with_timezone(&Utc)
    .to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Local>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Local))
    .map_err(|e| crate::Error::DateParse(e.to_string()))
}

// ─── Category ────────────────────────────────────────────────────────────────

pub fn encode_category(c: Category) -> &'static str { c.as_str() }

pub fn decode_category(s: &str) -> Result<Category> {
  Ok(s.parse::<Category>()?)
}

// ─── Row type ────────────────────────────────────────────────────────────────

/// Raw strings read directly from a `health_data` row.
pub struct RawMeasurement {
  pub recorded_at: String,
  pub category:    String,
  pub value:       String,
  pub parameter:   String,
  pub person:      String,
}

impl RawMeasurement {
  pub fn into_measurement(self) -> Result<Measurement> {
    Ok(Measurement {
      recorded_at: decode_dt(&self.recorded_at)?,
      category:    decode_category(&self.category)?,
      value:       self.value,
      parameter:   self.parameter,
      person:      self.person,
    })
  }
}

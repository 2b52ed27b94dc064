//! Measurement types — the fundamental unit of the Vitalog health store.
//!
//! A measurement is an immutable observation taken at the moment of
//! recording. Rows are never updated; deletion does not exist.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

// ─── Category ────────────────────────────────────────────────────────────────

/// The kind of measurement being recorded. This is a closed set; nothing
/// outside it is ever inserted into the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
  Pressure,
  Diabetes,
  Temperature,
  Pain,
  Heartbeat,
}

impl Category {
  pub const ALL: [Category; 5] = [
    Category::Pressure,
    Category::Diabetes,
    Category::Temperature,
    Category::Pain,
    Category::Heartbeat,
  ];

  /// The discriminant string stored in the `category` column.
  /// Must match the `rename_all = "lowercase"` serde tags above.
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Pressure => "pressure",
      Self::Diabetes => "diabetes",
      Self::Temperature => "temperature",
      Self::Pain => "pain",
      Self::Heartbeat => "heartbeat",
    }
  }

  /// How raw spoken values for this category are typed. Carried as data so
  /// validation lives in one place instead of per-intent conditionals.
  pub fn value_rule(&self) -> ValueRule {
    match self {
      Self::Pain => ValueRule::FreeText,
      Self::Heartbeat => ValueRule::Integer,
      Self::Pressure | Self::Diabetes | Self::Temperature => ValueRule::Decimal,
    }
  }
}

impl FromStr for Category {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    match s {
      "pressure" => Ok(Self::Pressure),
      "diabetes" => Ok(Self::Diabetes),
      "temperature" => Ok(Self::Temperature),
      "pain" => Ok(Self::Pain),
      "heartbeat" => Ok(Self::Heartbeat),
      other => Err(Error::UnknownCategory(other.to_owned())),
    }
  }
}

impl fmt::Display for Category {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

// ─── ValueRule ───────────────────────────────────────────────────────────────

/// Value typing for a category: numeric categories reject non-numeric input,
/// pain descriptions are stored verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueRule {
  /// A finite decimal number (blood pressure, blood sugar, temperature).
  Decimal,
  /// A whole number (heart rate).
  Integer,
  /// Free text (pain descriptions).
  FreeText,
}

impl ValueRule {
  /// Validate a raw slot value and return the canonical stored form.
  ///
  /// Values are stored as text in all cases to keep the schema uniform
  /// across category-specific types.
  pub fn canonicalize(&self, raw: &str) -> Result<String> {
    let raw = raw.trim();
    match self {
      Self::Decimal => {
        let n: f64 = raw
          .parse()
          .map_err(|_| Error::NonNumericValue(raw.to_owned()))?;
        if !n.is_finite() {
          return Err(Error::NonNumericValue(raw.to_owned()));
        }
        Ok(n.to_string())
      }
      Self::Integer => {
        let n: i64 = raw
          .parse()
          .map_err(|_| Error::NonNumericValue(raw.to_owned()))?;
        Ok(n.to_string())
      }
      Self::FreeText => Ok(raw.to_owned()),
    }
  }
}

// ─── Measurement ─────────────────────────────────────────────────────────────

/// One stored observation. `parameter` and `person` use the empty string for
/// "not applicable" / "unspecified", mirroring the storage representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
  /// Moment of recording, not of occurrence.
  pub recorded_at: DateTime<Local>,
  pub category:    Category,
  pub value:       String,
  /// Auxiliary qualifier, e.g. meal status for a blood-sugar reading.
  pub parameter:   String,
  pub person:      String,
}

impl Measurement {
  pub fn new(
    recorded_at: DateTime<Local>,
    category: Category,
    value: impl Into<String>,
  ) -> Self {
    Self {
      recorded_at,
      category,
      value: value.into(),
      parameter: String::new(),
      person: String::new(),
    }
  }

  pub fn with_parameter(mut self, parameter: impl Into<String>) -> Self {
    self.parameter = parameter.into();
    self
  }

  pub fn with_person(mut self, person: impl Into<String>) -> Self {
    self.person = person.into();
    self
  }

  /// Build the two rows of a blood-pressure reading: systolic then
  /// diastolic, sharing one timestamp and person, `parameter` empty for
  /// both.
  ///
  /// The pairing has no explicit link field — two pressure readings recorded
  /// in the same second cannot be told apart downstream. Known limitation.
  pub fn pressure_pair(
    recorded_at: DateTime<Local>,
    systolic: impl Into<String>,
    diastolic: impl Into<String>,
    person: &str,
  ) -> [Measurement; 2] {
    [
      Measurement::new(recorded_at, Category::Pressure, systolic)
        .with_person(person),
      Measurement::new(recorded_at, Category::Pressure, diastolic)
        .with_person(person),
    ]
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

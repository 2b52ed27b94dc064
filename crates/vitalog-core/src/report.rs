//! Presentation formatting — mapping stored rows to the shape the HTML
//! renderer consumes.

use serde::Serialize;

use crate::{measurement::Measurement, window::TIMESTAMP_FORMAT};

/// One presentation row: the timestamp rendered as `MM/DD/YYYY HH:MM:SS`
/// local time, the remaining four fields passed through verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
  pub recorded_at: String,
  pub category:    String,
  pub value:       String,
  pub parameter:   String,
  pub person:      String,
}

impl From<&Measurement> for ReportRow {
  fn from(m: &Measurement) -> Self {
    Self {
      recorded_at: m.recorded_at.format(TIMESTAMP_FORMAT).to_string(),
      category:    m.category.as_str().to_owned(),
      value:       m.value.clone(),
      parameter:   m.parameter.clone(),
      person:      m.person.clone(),
    }
  }
}

/// Map stored rows to presentation rows, preserving store order. No
/// re-sorting, no de-duplication, no aggregation across the two rows of a
/// blood-pressure pair.
pub fn rows(measurements: &[Measurement]) -> Vec<ReportRow> {
  measurements.iter().map(ReportRow::from).collect()
}

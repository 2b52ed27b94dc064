//! Month-window resolution — turning a coarse period reference ("this" /
//! "last" month) plus the current moment into a concrete date range.
//!
//! Both window bounds are strictly exclusive when filtering: a record landing
//! on the exact first instant of a month belongs to neither adjoining
//! month's report. Long-standing behaviour, kept deliberately.

use std::str::FromStr;

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Display format for timestamps in reports and range headers.
pub const TIMESTAMP_FORMAT: &str = "%m/%d/%Y %H:%M:%S";

// ─── PeriodToken ─────────────────────────────────────────────────────────────

/// Coarse user-facing time reference. Two synonyms per window; anything else
/// is invalid input and never reaches the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodToken {
  /// The month in progress, up to the current instant.
  This,
  /// The previous calendar month.
  Last,
}

impl FromStr for PeriodToken {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    match s {
      "this" | "current" => Ok(Self::This),
      "last" | "previous" => Ok(Self::Last),
      other => Err(Error::UnknownPeriod(other.to_owned())),
    }
  }
}

// ─── ReportWindow ────────────────────────────────────────────────────────────

/// A concrete date range resolved from a [`PeriodToken`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReportWindow {
  pub from: DateTime<Local>,
  pub to:   DateTime<Local>,
}

impl ReportWindow {
  /// Resolve `token` against `now`.
  ///
  /// - `This` → `to` is the current instant, `from` the first of `now`'s
  ///   month at midnight.
  /// - `Last` → `to` is the last calendar day of the previous month at
  ///   23:59:59 (first of the current month at that time, minus one day),
  ///   `from` the first of that month at midnight.
  ///
  /// Fails only when a bound does not exist in the local timezone (a DST
  /// gap at month start); callers treat that as "no report".
  pub fn resolve(token: PeriodToken, now: DateTime<Local>) -> Result<Self> {
    match token {
      PeriodToken::This => {
        let from = month_start(now.date_naive())?;
        Ok(Self { from, to: now })
      }
      PeriodToken::Last => {
        let first_of_current = first_day(now.date_naive())?;
        let last_of_previous = first_of_current
          .pred_opt()
          .ok_or_else(|| Error::InvalidWindow("date underflow".to_owned()))?;
        let to = local(last_of_previous.and_hms_opt(23, 59, 59).ok_or_else(
          || Error::InvalidWindow(format!("no 23:59:59 on {last_of_previous}")),
        )?)?;
        let from = month_start(last_of_previous)?;
        Ok(Self { from, to })
      }
    }
  }

  /// Strictly exclusive on both ends; mirrors the store's query filter.
  pub fn contains(&self, t: DateTime<Local>) -> bool {
    self.from < t && t < self.to
  }

  pub fn from_label(&self) -> String {
    self.from.format(TIMESTAMP_FORMAT).to_string()
  }

  pub fn to_label(&self) -> String {
    self.to.format(TIMESTAMP_FORMAT).to_string()
  }
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn first_day(d: NaiveDate) -> Result<NaiveDate> {
  d.with_day(1)
    .ok_or_else(|| Error::InvalidWindow(format!("no first day in {d}'s month")))
}

fn month_start(d: NaiveDate) -> Result<DateTime<Local>> {
  let first = first_day(d)?;
  local(
    first
      .and_hms_opt(0, 0, 0)
      .ok_or_else(|| Error::InvalidWindow(format!("no midnight on {first}")))?,
  )
}

fn local(n: NaiveDateTime) -> Result<DateTime<Local>> {
  Local
    .from_local_datetime(&n)
    .earliest()
    .ok_or_else(|| Error::InvalidWindow(format!("{n} does not exist locally")))
}

// ─── Tests ───────────────────────────────────────────────────────────────────

//! Intent-handler glue for the Vitalog health skill.
//!
//! The hosting voice-assistant runtime owns speech understanding and dialog;
//! it hands this crate already-parsed slot values and implements the
//! [`Confirm`] and [`vitalog_report::Mailer`] seams. Every handler returns a
//! [`Reply`] the host maps onto its dialog prompts — no failure path panics
//! the host.

pub mod confirm;
pub mod report;
pub mod track;

use std::path::{Path, PathBuf};

use serde::Deserialize;
use vitalog_core::store::MeasurementStore;
use vitalog_report::Mailer;

pub use confirm::{Confirm, ConfirmRequest};

#[cfg(test)]
mod tests;

// ─── Configuration ───────────────────────────────────────────────────────────

/// Skill configuration, deserialised from a TOML file with
/// `VITALOG_`-prefixed environment overrides.
#[derive(Debug, Clone, Deserialize)]
pub struct SkillConfig {
  /// Store location override; the backend's home-directory default applies
  /// when unset.
  #[serde(default)]
  pub store_path: Option<PathBuf>,
  /// Fixed sender for outgoing reports.
  #[serde(default = "default_mail_from")]
  pub mail_from:  String,
  /// Fixed recipient for outgoing reports.
  #[serde(default)]
  pub mail_to:    String,
}

fn default_mail_from() -> String {
  "Vitalog <reports@vitalog.local>".to_owned()
}

impl Default for SkillConfig {
  fn default() -> Self {
    Self {
      store_path: None,
      mail_from:  default_mail_from(),
      mail_to:    String::new(),
    }
  }
}

impl SkillConfig {
  /// Load from `path` (the file may be absent) plus environment overrides.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .add_source(config::File::from(path.to_path_buf()).required(false))
      .add_source(config::Environment::with_prefix("VITALOG"))
      .build()?
      .try_deserialize()
  }
}

// ─── Replies ─────────────────────────────────────────────────────────────────

/// The outcome of one voice interaction; the host maps each variant to a
/// dialog prompt. There is no retry loop — the interaction simply ends and
/// the user re-invokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply {
  /// Measurement confirmed and durably written.
  Saved,
  /// The store was unavailable or rejected the write; nothing retained.
  SaveFailed,
  /// The user declined (or gave no usable answer to) the confirmation
  /// prompt, or abandoned the interaction; nothing was written.
  Cancelled,
  /// A required slot was missing or failed numeric validation.
  InvalidInput,
  /// Report rendered and handed to the mail transport.
  ReportSent,
  /// The store was unavailable or the query failed; no report produced.
  ReportFailed,
}

// ─── Skill ───────────────────────────────────────────────────────────────────

/// The skill itself, generic over its three host-provided seams: the
/// measurement store, the yes/no confirmation gate, and the mail transport.
pub struct Skill<S, C, M> {
  store:   S,
  confirm: C,
  mailer:  M,
  config:  SkillConfig,
}

impl<S, C, M> Skill<S, C, M>
where
  S: MeasurementStore,
  C: Confirm,
  M: Mailer,
{
  pub fn new(store: S, confirm: C, mailer: M, config: SkillConfig) -> Self {
    Self { store, confirm, mailer, config }
  }
}

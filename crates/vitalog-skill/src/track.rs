//! Handlers for the five measurement-tracking intents.
//!
//! Slot values arrive as raw strings from the intent layer; numeric
//! validation happens here against each category's [`ValueRule`]. The
//! confirmation gate runs to completion before any store access, so no
//! connection is ever held across the dialog pause.
//!
//! [`ValueRule`]: vitalog_core::measurement::ValueRule

use chrono::Local;
use tracing::warn;
use vitalog_core::{
  measurement::{Category, Measurement},
  store::MeasurementStore,
};
use vitalog_report::Mailer;

use crate::{Confirm, ConfirmRequest, Reply, Skill};

impl<S, C, M> Skill<S, C, M>
where
  S: MeasurementStore,
  C: Confirm,
  M: Mailer,
{
  /// Blood pressure: two decimal slots, stored as two rows sharing one
  /// timestamp.
  pub async fn track_pressure(
    &self,
    top: &str,
    bottom: &str,
    person: Option<&str>,
  ) -> Reply {
    let rule = Category::Pressure.value_rule();
    let (Ok(top), Ok(bottom)) = (rule.canonicalize(top), rule.canonicalize(bottom))
    else {
      return Reply::InvalidInput;
    };

    let summary = format!("{top} over {bottom}");
    let batch = Measurement::pressure_pair(
      Local::now(),
      top,
      bottom,
      person.unwrap_or(""),
    );
    self
      .confirm_and_save(Category::Pressure, summary, batch.to_vec())
      .await
  }

  /// Blood sugar: a decimal value plus the required meal-status qualifier.
  /// A missing meal status abandons the interaction without an error prompt.
  pub async fn track_sugar(
    &self,
    value: &str,
    meal_status: Option<&str>,
    person: Option<&str>,
  ) -> Reply {
    let Ok(value) = Category::Diabetes.value_rule().canonicalize(value) else {
      return Reply::InvalidInput;
    };
    let Some(meal_status) = meal_status.filter(|m| !m.trim().is_empty()) else {
      return Reply::Cancelled;
    };

    let summary = format!("{value}, {meal_status}");
    let row = Measurement::new(Local::now(), Category::Diabetes, value)
      .with_parameter(meal_status)
      .with_person(person.unwrap_or(""));
    self
      .confirm_and_save(Category::Diabetes, summary, vec![row])
      .await
  }

  pub async fn track_temperature(
    &self,
    value: &str,
    person: Option<&str>,
  ) -> Reply {
    self.track_single(Category::Temperature, value, person).await
  }

  /// Pain is free text; no numeric validation applies.
  pub async fn track_pain(
    &self,
    description: &str,
    person: Option<&str>,
  ) -> Reply {
    self.track_single(Category::Pain, description, person).await
  }

  pub async fn track_heartbeat(
    &self,
    value: &str,
    person: Option<&str>,
  ) -> Reply {
    self.track_single(Category::Heartbeat, value, person).await
  }

  async fn track_single(
    &self,
    category: Category,
    raw: &str,
    person: Option<&str>,
  ) -> Reply {
    if raw.trim().is_empty() {
      return Reply::InvalidInput;
    }
    let Ok(value) = category.value_rule().canonicalize(raw) else {
      return Reply::InvalidInput;
    };

    let row = Measurement::new(Local::now(), category, value.clone())
      .with_person(person.unwrap_or(""));
    self.confirm_and_save(category, value, vec![row]).await
  }

  /// Runs the confirmation gate to completion, then performs at most one
  /// store operation. A declined confirmation writes nothing.
  async fn confirm_and_save(
    &self,
    category: Category,
    summary: String,
    batch: Vec<Measurement>,
  ) -> Reply {
    let request = ConfirmRequest { category, summary };
    if !self.confirm.confirm(&request).await {
      return Reply::Cancelled;
    }

    match self.store.insert(batch).await {
      Ok(()) => Reply::Saved,
      Err(e) => {
        warn!(category = category.as_str(), error = %e, "failed to save measurement");
        Reply::SaveFailed
      }
    }
  }
}

//! Handler for the monthly report intent: resolve the window, query the
//! store, render HTML, and hand the document to the mail transport.

use chrono::Local;
use tracing::{info, warn};
use vitalog_core::{
  measurement::Category,
  report,
  store::MeasurementStore,
  window::{PeriodToken, ReportWindow},
};
use vitalog_report::{Mailer, ReportEmail, html};

use crate::{Confirm, Reply, Skill};

impl<S, C, M> Skill<S, C, M>
where
  S: MeasurementStore,
  C: Confirm,
  M: Mailer,
{
  /// `period` and `category` arrive as raw slot strings and are validated
  /// here; the window resolver itself assumes a valid token.
  pub async fn generate_report(
    &self,
    period: &str,
    category: &str,
    person: Option<&str>,
  ) -> Reply {
    let Ok(period) = period.parse::<PeriodToken>() else {
      return Reply::InvalidInput;
    };
    let Ok(category) = category.parse::<Category>() else {
      return Reply::InvalidInput;
    };

    let window = match ReportWindow::resolve(period, Local::now()) {
      Ok(w) => w,
      Err(e) => {
        warn!(error = %e, "failed to resolve report window");
        return Reply::ReportFailed;
      }
    };

    // A failed query is not the same as an empty month: the former aborts,
    // the latter still produces (and sends) an empty report.
    let measurements = match self
      .store
      .query(window, category, person.unwrap_or(""))
      .await
    {
      Ok(rows) => rows,
      Err(e) => {
        warn!(category = category.as_str(), error = %e, "report query failed");
        return Reply::ReportFailed;
      }
    };

    let rows = report::rows(&measurements);
    let email = ReportEmail::for_category(category, html::render(&window, &rows));

    // A delivery failure has no user-visible effect. Long-standing
    // behaviour, kept as documented.
    if let Err(e) = self
      .mailer
      .send(&self.config.mail_from, &self.config.mail_to, &email)
      .await
    {
      warn!(error = %e, "report delivery failed");
    } else {
      info!(
        category = category.as_str(),
        rows = rows.len(),
        "report emailed"
      );
    }

    Reply::ReportSent
  }
}

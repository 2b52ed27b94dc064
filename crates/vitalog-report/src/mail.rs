//! Outbound report mail — the payload type and the host-implemented
//! transport trait.

use std::future::Future;

use vitalog_core::measurement::Category;

/// A fully-rendered report email. The body is opaque to the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEmail {
  pub subject: String,
  pub html:    String,
}

impl ReportEmail {
  /// The subject line carries the uppercased category name.
  pub fn for_category(category: Category, html: String) -> Self {
    Self {
      subject: format!("Health Report - {}", category.as_str().to_uppercase()),
      html,
    }
  }
}

/// Mail transport implemented by the hosting runtime.
///
/// Delivery failures are the caller's to handle; the skill logs and swallows
/// them, so a failed send has no user-visible effect.
pub trait Mailer: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  fn send<'a>(
    &'a self,
    from: &'a str,
    to: &'a str,
    email: &'a ReportEmail,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}

//! The yes/no confirmation gate.

use std::future::Future;

use vitalog_core::measurement::Category;

/// What the user is being asked to confirm. The host phrases the actual
/// dialog prompt; `summary` is the reading spoken back for verification
/// (e.g. "120 over 80").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmRequest {
  pub category: Category,
  pub summary:  String,
}

/// Host-implemented yes/no prompt, run to completion *before* any store
/// access. `false` covers both an explicit "no" and no usable answer; either
/// way, no store mutation follows.
pub trait Confirm: Send + Sync {
  fn confirm<'a>(
    &'a self,
    request: &'a ConfirmRequest,
  ) -> impl Future<Output = bool> + Send + 'a;
}

//! HTML report rendering and outbound mail types for Vitalog.
//!
//! This crate only builds payloads. The concrete mail transport is
//! host-provided behind the [`Mailer`] trait.

pub mod html;
pub mod mail;

pub use mail::{Mailer, ReportEmail};

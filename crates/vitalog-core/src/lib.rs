//! Core types and trait definitions for the Vitalog health skill.
//!
//! This crate is deliberately free of database and I/O dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod error;
pub mod measurement;
pub mod report;
pub mod store;
pub mod window;

pub use error::{Error, Result};

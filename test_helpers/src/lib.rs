//! Test helpers shared across crates.
//!
//! This crate provides a capturing sink, parsed views of emitted log lines
//! and jailed environments for configuration tests.

pub mod capture;
pub mod jail;
pub mod lines;

pub use capture::CaptureSink;
pub use jail::{config_from, with_env};
pub use lines::{LogLine, assert_recent};

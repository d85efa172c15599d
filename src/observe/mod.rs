//! Structured logging for browsedb
//!
//! # Principles
//!
//! - One log line = one event
//! - Synchronous, no buffering, no background threads
//! - Deterministic field ordering (alphabetical by key)
//! - Logging never affects query or build results

mod logger;

pub use logger::{Logger, Severity};

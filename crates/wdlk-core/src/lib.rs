//! Core infrastructure shared by the Woodlike storefront crates.
//!
//! This crate provides:
//! - `StoreConfig` - File-backed configuration for every storefront component
//! - `StructuredLogger` - Structured logging with component context
//! - `LogSink` - Pluggable output for log entries

mod config;
mod logging;

pub use config::*;
pub use logging::*;

//! # chainfeed-observability
//!
//! Structured logging for ChainFeed hosts.
//!
//! Every crate in the workspace logs through `tracing` with structured
//! fields (`block`, `hash`, `transport`, `error`). This crate installs the
//! subscriber: human-readable or JSON lines (ELK, Loki, CloudWatch), with
//! levels configurable per component.

pub mod tracing_setup;

pub use tracing_setup::{init_tracing, LogConfig, LogInitError};

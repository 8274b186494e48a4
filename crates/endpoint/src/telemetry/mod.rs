//! Logging and tracing setup.
//!
//! Structured JSON logs always go to stdout. When an OTLP endpoint is
//! configured, spans are additionally exported to that collector.
//!
//! Map contents never appear in span attributes or log fields; only resource
//! keys, file names, and error text do.

pub mod init;

pub use init::{init_telemetry, shutdown};

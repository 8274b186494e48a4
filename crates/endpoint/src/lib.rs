//! Read-only HTTPS endpoint serving system maps (automount, group, services,
//! user) from pre-generated JSON files.

pub mod config;
pub mod maps;
pub mod server;
pub mod telemetry;

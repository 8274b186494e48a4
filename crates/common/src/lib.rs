//! Common types, map data shapes, and errors shared across `map-endpoint` crates.

pub mod error;
pub mod maps;
pub mod protocol;

pub use error::MapError;

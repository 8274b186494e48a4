//! HTTPS server, routing, and handlers.
//!
//! # Responsibilities
//! - Load the TLS certificate and key into a rustls config.
//! - Define the Axum router with the map route and shared middleware.
//! - Accept TCP connections, terminate TLS, and serve HTTP on each one.

pub mod handlers;
pub mod listener;
pub mod middleware;
pub mod router;
pub mod state;
pub mod tls;

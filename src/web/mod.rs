//! HTTP API over stored network sessions.

pub mod api;
pub mod models;
pub mod server;

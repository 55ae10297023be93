//! HTTP surface of the translated weather lookup service.
//!
//! The binary in `main.rs` only parses arguments; routing, error mapping and
//! bootstrap live here so integration tests can drive the router directly.

pub mod app;
pub mod cli;
pub mod error;
pub mod logging;
pub mod routes;

pub use error::ServerError;
pub use routes::router;

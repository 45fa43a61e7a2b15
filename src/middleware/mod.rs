//! Middleware for observability.
//!
//! Request logging with latency tracking. Bearer auth lives in
//! `crate::auth::middleware`.

pub mod logging;

pub use logging::request_logging;

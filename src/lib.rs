//! jwtgate Backend Library
//!
//! Minimal HS256 bearer-token authentication: the token codec, a small
//! signup/login service around it, and the middleware that guards routes.

pub mod auth;
pub mod config;
pub mod middleware;
pub mod server;

pub use server::build_router;

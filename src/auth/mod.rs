//! Authentication Module
//! Mission: Issue and verify HS256 bearer tokens and guard API routes with them

pub mod api;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod secret;
pub mod user_store;

pub use api::AuthState;
pub use jwt::{Clock, FixedClock, SystemClock, TokenCodec, TokenError};
pub use middleware::auth_middleware;
pub use models::{AuthenticatedUser, Claims};
pub use secret::Secret;
pub use user_store::UserStore;

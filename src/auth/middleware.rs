//! Authentication Middleware
//! Mission: Protect API endpoints with bearer token validation

use crate::auth::{
    jwt::{TokenCodec, TokenError},
    models::AuthenticatedUser,
};
use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::debug;

const BEARER_PREFIX: &str = "bearer ";

/// Auth middleware that validates bearer tokens
pub async fn auth_middleware(
    State(codec): State<Arc<TokenCodec>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let token = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(bearer_token)
        .ok_or(AuthError::MissingToken)?;

    let claims = codec.parse_and_validate(token).map_err(|e| {
        debug!(error = %e, "Rejected bearer token");
        AuthError::InvalidToken(e)
    })?;

    // Identity is only visible to handlers that run after this point
    req.extensions_mut().insert(AuthenticatedUser {
        user_id: claims.sub,
    });

    Ok(next.run(req).await)
}

/// Strip a case-insensitive `Bearer ` prefix from an Authorization value
pub fn bearer_token(header: &str) -> Option<&str> {
    let prefix = header.get(..BEARER_PREFIX.len())?;
    if !prefix.eq_ignore_ascii_case(BEARER_PREFIX) {
        return None;
    }
    Some(header[BEARER_PREFIX.len()..].trim())
}

/// Extract the authenticated user (use after auth middleware)
pub fn extract_user(req: &Request) -> Option<&AuthenticatedUser> {
    req.extensions().get::<AuthenticatedUser>()
}

/// Auth error types
#[derive(Debug)]
pub enum AuthError {
    MissingToken,
    InvalidToken(TokenError),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let message = match self {
            AuthError::MissingToken => "missing bearer token".to_string(),
            AuthError::InvalidToken(e) => format!("invalid token: {}", e),
        };

        (StatusCode::UNAUTHORIZED, message).into_response()
    }
}

//! Authentication API Endpoints
//! Mission: Provide signup, login and current-user endpoints

use crate::auth::{
    jwt::TokenCodec,
    middleware::extract_user,
    models::{Claims, LoginRequest, LoginResponse, SignupRequest, UserResponse},
    user_store::{CreateUserError, UserStore},
};
use axum::{
    extract::{rejection::JsonRejection, Request, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Shared auth state
#[derive(Clone)]
pub struct AuthState {
    pub user_store: Arc<UserStore>,
    pub codec: Arc<TokenCodec>,
    pub token_ttl: chrono::Duration,
}

impl AuthState {
    pub fn new(
        user_store: Arc<UserStore>,
        codec: Arc<TokenCodec>,
        token_ttl: chrono::Duration,
    ) -> Self {
        Self {
            user_store,
            codec,
            token_ttl,
        }
    }
}

/// Health check - GET /health
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Signup endpoint - POST /signup
pub async fn signup(
    State(state): State<AuthState>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<Json<UserResponse>, AuthApiError> {
    let Json(payload) = payload.map_err(|_| AuthApiError::BadJson)?;

    if payload.email.is_empty() || payload.password.is_empty() {
        return Err(AuthApiError::MissingCredentials);
    }

    // bcrypt is CPU-bound; keep it off the async workers
    let store = state.user_store.clone();
    let user = tokio::task::spawn_blocking(move || {
        store.create_user(&payload.email, &payload.password, &payload.name)
    })
    .await
    .map_err(|e| {
        error!(error = %e, "Signup task failed");
        AuthApiError::InternalError
    })?
    .map_err(|e| match e {
        CreateUserError::EmailTaken => AuthApiError::EmailTaken,
        CreateUserError::Hash(e) => {
            error!(error = %e, "Failed to hash password");
            AuthApiError::InternalError
        }
    })?;

    Ok(Json(UserResponse::from_user(&user)))
}

/// Login endpoint - POST /login
pub async fn login(
    State(state): State<AuthState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, AuthApiError> {
    let Json(payload) = payload.map_err(|_| AuthApiError::BadJson)?;

    let store = state.user_store.clone();
    let user = tokio::task::spawn_blocking(move || {
        store.verify_password(&payload.email, &payload.password)
    })
    .await
    .map_err(|e| {
        error!(error = %e, "Login task failed");
        AuthApiError::InternalError
    })?
    .map_err(|e| {
        error!(error = %e, "Password verification failed");
        AuthApiError::InternalError
    })?
    .ok_or_else(|| {
        warn!("Failed login attempt");
        AuthApiError::InvalidCredentials
    })?;

    let claims = Claims::new(user.id.clone(), state.codec.expiry(state.token_ttl));
    let token = state.codec.sign(&claims);

    info!(user_id = %user.id, exp = claims.exp, "Login successful");

    Ok(Json(LoginResponse::bearer(token)))
}

/// Get current user info - GET /me
pub async fn get_current_user(
    State(state): State<AuthState>,
    req: Request,
) -> Result<Json<UserResponse>, AuthApiError> {
    let identity = extract_user(&req).ok_or(AuthApiError::MissingIdentity)?;

    let user = state
        .user_store
        .get_user_by_id(&identity.user_id)
        .ok_or(AuthApiError::UserNotFound)?;

    Ok(Json(UserResponse::from_user(&user)))
}

/// Auth API errors
#[derive(Debug)]
pub enum AuthApiError {
    BadJson,
    MissingCredentials,
    EmailTaken,
    InvalidCredentials,
    MissingIdentity,
    UserNotFound,
    InternalError,
}

impl IntoResponse for AuthApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthApiError::BadJson => (StatusCode::BAD_REQUEST, "bad json"),
            AuthApiError::MissingCredentials => {
                (StatusCode::BAD_REQUEST, "email and password required")
            }
            AuthApiError::EmailTaken => (StatusCode::CONFLICT, "email already registered"),
            AuthApiError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "invalid credentials"),
            // Route was mounted without the auth middleware
            AuthApiError::MissingIdentity => {
                (StatusCode::INTERNAL_SERVER_ERROR, "missing context")
            }
            AuthApiError::UserNotFound => (StatusCode::NOT_FOUND, "user not found"),
            AuthApiError::InternalError => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
            }
        };

        (status, message).into_response()
    }
}

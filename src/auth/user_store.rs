//! User Storage
//! Mission: Keep user accounts in memory, keyed by email, with bcrypt password hashes

use crate::auth::models::User;
use anyhow::{Context, Result};
use bcrypt::{hash, verify, DEFAULT_COST};
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::info;
use uuid::Uuid;

/// Range of costs bcrypt accepts
pub const MIN_BCRYPT_COST: u32 = 4;
pub const MAX_BCRYPT_COST: u32 = 31;

/// Why a user could not be created
#[derive(Debug, thiserror::Error)]
pub enum CreateUserError {
    #[error("email already registered")]
    EmailTaken,
    #[error("failed to hash password: {0}")]
    Hash(#[from] bcrypt::BcryptError),
}

/// In-memory user directory
pub struct UserStore {
    users: RwLock<HashMap<String, User>>, // by email
    bcrypt_cost: u32,
}

impl UserStore {
    /// Create an empty store hashing at the default bcrypt cost
    pub fn new() -> Self {
        Self::with_cost(DEFAULT_COST)
    }

    pub fn with_cost(bcrypt_cost: u32) -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            bcrypt_cost,
        }
    }

    /// Create a new user
    pub fn create_user(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<User, CreateUserError> {
        if self.users.read().contains_key(email) {
            return Err(CreateUserError::EmailTaken);
        }

        // Hash outside the write lock; bcrypt is slow on purpose.
        let password_hash = hash(password, self.bcrypt_cost)?;

        let user = User {
            id: format!("u_{}", Uuid::new_v4().simple()),
            email: email.to_string(),
            password_hash,
            name: name.to_string(),
        };

        let mut users = self.users.write();
        if users.contains_key(email) {
            return Err(CreateUserError::EmailTaken);
        }
        users.insert(email.to_string(), user.clone());

        info!(user_id = %user.id, "Created user");

        Ok(user)
    }

    /// Get user by email
    pub fn get_user_by_email(&self, email: &str) -> Option<User> {
        self.users.read().get(email).cloned()
    }

    /// Get user by id
    pub fn get_user_by_id(&self, id: &str) -> Option<User> {
        self.users.read().values().find(|u| u.id == id).cloned()
    }

    /// Verify email and password, returning the user on success
    pub fn verify_password(&self, email: &str, password: &str) -> Result<Option<User>> {
        let Some(user) = self.get_user_by_email(email) else {
            return Ok(None);
        };

        let valid = verify(password, &user.password_hash).context("Failed to verify password")?;
        Ok(valid.then_some(user))
    }

    pub fn len(&self) -> usize {
        self.users.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.read().is_empty()
    }
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}

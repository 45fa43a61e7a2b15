//! Service configuration resolved from the environment

use crate::auth::secret::{Secret, SECRET_ENV_VAR};
use crate::auth::user_store::{MAX_BCRYPT_COST, MIN_BCRYPT_COST};
use anyhow::{ensure, Context, Result};
use bcrypt::DEFAULT_COST;

pub const DEFAULT_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_TOKEN_TTL_MINUTES: i64 = 30;

/// Configuration settings
#[derive(Debug, Clone)]
pub struct Config {
    pub addr: String,
    pub secret: Secret,
    pub token_ttl: chrono::Duration,
    pub bcrypt_cost: u32,
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// `.env` is loaded once by the binary before this runs.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through `lookup`, which maps a variable name to its value
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let addr = lookup("ADDR")
            .filter(|v| !v.is_empty())
            .map(|v| normalize_addr(&v))
            .unwrap_or_else(|| DEFAULT_ADDR.to_string());

        let token_ttl_minutes = match lookup("TOKEN_TTL_MINUTES") {
            Some(v) => v
                .parse::<i64>()
                .with_context(|| format!("Invalid TOKEN_TTL_MINUTES: {}", v))?,
            None => DEFAULT_TOKEN_TTL_MINUTES,
        };
        ensure!(
            token_ttl_minutes > 0,
            "TOKEN_TTL_MINUTES must be positive, got {}",
            token_ttl_minutes
        );
        let token_ttl = chrono::Duration::try_minutes(token_ttl_minutes)
            .with_context(|| format!("TOKEN_TTL_MINUTES out of range: {}", token_ttl_minutes))?;

        let bcrypt_cost = match lookup("BCRYPT_COST") {
            Some(v) => v
                .parse::<u32>()
                .with_context(|| format!("Invalid BCRYPT_COST: {}", v))?,
            None => DEFAULT_COST,
        };
        ensure!(
            (MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&bcrypt_cost),
            "BCRYPT_COST must be between {} and {}, got {}",
            MIN_BCRYPT_COST,
            MAX_BCRYPT_COST,
            bcrypt_cost
        );

        Ok(Config {
            addr,
            secret: Secret::resolve(lookup(SECRET_ENV_VAR)),
            token_ttl,
            bcrypt_cost,
        })
    }
}

/// Expand a bare `:port` into an address that binds on all interfaces
pub fn normalize_addr(addr: &str) -> String {
    if addr.starts_with(':') {
        format!("0.0.0.0{}", addr)
    } else {
        addr.to_string()
    }
}

//! Signing secret
//! Mission: Hold the HMAC key for one trust domain and keep it out of logs

use std::env;
use std::fmt;

/// Environment variable that overrides the fallback secret.
pub const SECRET_ENV_VAR: &str = "JWT_SECRET";

/// HMAC key shared by the issuer and the verifier.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret {
    bytes: Vec<u8>,
    fallback: bool,
}

impl Secret {
    /// Insecure default used when no override is configured.
    pub const FALLBACK: &'static str = "dev-secret-change-me";

    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
            fallback: false,
        }
    }

    /// Use `value` when present and non-empty, otherwise the fallback literal.
    pub fn resolve(value: Option<String>) -> Self {
        match value {
            Some(v) if !v.is_empty() => Self::new(v),
            _ => Self {
                bytes: Self::FALLBACK.as_bytes().to_vec(),
                fallback: true,
            },
        }
    }

    /// Read the secret from `JWT_SECRET` once.
    pub fn from_env() -> Self {
        Self::resolve(env::var(SECRET_ENV_VAR).ok())
    }

    pub fn is_fallback(&self) -> bool {
        self.fallback
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secret")
            .field("len", &self.bytes.len())
            .field("fallback", &self.fallback)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_prefers_override() {
        let secret = Secret::resolve(Some("prod-secret".to_string()));
        assert_eq!(secret.as_bytes(), b"prod-secret");
        assert!(!secret.is_fallback());
    }

    #[test]
    fn test_resolve_falls_back_when_absent_or_empty() {
        for value in [None, Some(String::new())] {
            let secret = Secret::resolve(value);
            assert_eq!(secret.as_bytes(), Secret::FALLBACK.as_bytes());
            assert!(secret.is_fallback());
        }
    }

    #[test]
    fn test_debug_hides_key_material() {
        let secret = Secret::new("super-secret-value");
        let printed = format!("{:?}", secret);
        assert!(!printed.contains("super-secret-value"));
        assert!(printed.contains("len"));
    }
}

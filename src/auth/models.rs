//! Authentication Models
//! Mission: Define the token payload and the user-facing auth data structures

use serde::{Deserialize, Serialize};

/// Token claims payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // subject (user id)
    pub exp: i64,    // unix seconds, 0 = never expires
}

impl Claims {
    pub fn new(sub: impl Into<String>, exp: i64) -> Self {
        Self {
            sub: sub.into(),
            exp,
        }
    }

    /// Whether the claims have lapsed at `now` (unix seconds).
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.exp != 0 && self.exp < now
    }
}

/// Token header. Field order is part of the wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenHeader {
    pub typ: String,
    pub alg: String,
}

impl TokenHeader {
    pub const TYP: &'static str = "JWT";
    pub const ALG: &'static str = "HS256";

    pub fn hs256() -> Self {
        Self {
            typ: Self::TYP.to_string(),
            alg: Self::ALG.to_string(),
        }
    }

    pub fn is_hs256(&self) -> bool {
        self.typ == Self::TYP && self.alg == Self::ALG
    }
}

/// User account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String, // bcrypt hash - never serialize
    pub name: String,
}

/// Identity established by the auth middleware, stored in request extensions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: String,
}

/// Signup request body
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub name: String,
}

/// Login request body
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
}

impl LoginResponse {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "Bearer".to_string(),
        }
    }
}

/// User response (sanitized)
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub name: String,
}

impl UserResponse {
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            email: user.email.clone(),
            name: user.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_wire_shape() {
        let claims = Claims::new("u_1", 1700000000);
        let json = serde_json::to_string(&claims).unwrap();
        assert_eq!(json, r#"{"sub":"u_1","exp":1700000000}"#);
    }

    #[test]
    fn test_header_wire_shape() {
        let json = serde_json::to_string(&TokenHeader::hs256()).unwrap();
        assert_eq!(json, r#"{"typ":"JWT","alg":"HS256"}"#);
    }

    #[test]
    fn test_claims_expiry_boundary() {
        let claims = Claims::new("u_1", 100);
        assert!(!claims.is_expired_at(99));
        assert!(!claims.is_expired_at(100));
        assert!(claims.is_expired_at(101));

        // Zero means no expiry
        assert!(!Claims::new("u_1", 0).is_expired_at(i64::MAX));
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let user = User {
            id: "u_1".to_string(),
            email: "a@example.com".to_string(),
            password_hash: "$2b$04$secret".to_string(),
            name: "A".to_string(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("secret"));
    }

    #[test]
    fn test_signup_name_optional() {
        let req: SignupRequest =
            serde_json::from_str(r#"{"email":"a@example.com","password":"pw"}"#).unwrap();
        assert_eq!(req.name, "");
    }
}

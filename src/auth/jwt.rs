//! JWT Token Codec
//! Mission: Issue and validate HS256 bearer tokens, failing closed on tampering or expiry
//!
//! Wire format: `b64(header) "." b64(claims) "." b64(hmac_sha256(b64(header) "." b64(claims)))`
//! with every segment base64url encoded without padding.

use crate::auth::models::{Claims, TokenHeader};
use crate::auth::secret::Secret;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

type HmacSha256 = Hmac<Sha256>;

/// base64url that never emits padding but accepts it on input.
const B64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Reasons a token is rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("malformed token")]
    Malformed,
    #[error("signature mismatch")]
    SignatureMismatch,
    #[error("token expired")]
    Expired,
}

/// Source of the current time in unix seconds
pub trait Clock: Send + Sync {
    fn now(&self) -> i64;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        Utc::now().timestamp()
    }
}

/// Clock pinned to a single instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now(&self) -> i64 {
        self.0
    }
}

/// Signs and verifies tokens for one trust domain
#[derive(Clone)]
pub struct TokenCodec {
    secret: Secret,
    clock: Arc<dyn Clock>,
}

impl TokenCodec {
    /// Create a codec backed by the wall clock
    pub fn new(secret: Secret) -> Self {
        Self::with_clock(secret, Arc::new(SystemClock))
    }

    pub fn with_clock(secret: Secret, clock: Arc<dyn Clock>) -> Self {
        Self { secret, clock }
    }

    pub fn now(&self) -> i64 {
        self.clock.now()
    }

    /// Timestamp `ttl` from now, in unix seconds
    pub fn expiry(&self, ttl: chrono::Duration) -> i64 {
        self.now().saturating_add(ttl.num_seconds())
    }

    /// Encode and sign `claims`
    pub fn sign(&self, claims: &Claims) -> String {
        let header = serde_json::to_vec(&TokenHeader::hs256())
            .expect("token header always serializes");
        let payload = serde_json::to_vec(claims).expect("claims always serialize");

        let signing_input = format!("{}.{}", B64.encode(header), B64.encode(payload));
        let mut mac = self.mac();
        mac.update(signing_input.as_bytes());
        let signature = B64.encode(mac.finalize().into_bytes());

        debug!(sub = %claims.sub, exp = claims.exp, "Issued token");

        format!("{}.{}", signing_input, signature)
    }

    /// Verify `token` and return its claims
    ///
    /// The signature is checked before the claims segment is decoded, so an
    /// expiry is only ever read from authenticated bytes.
    pub fn parse_and_validate(&self, token: &str) -> Result<Claims, TokenError> {
        let mut parts = token.split('.');
        let (header_b64, claims_b64, signature_b64) =
            match (parts.next(), parts.next(), parts.next(), parts.next()) {
                (Some(h), Some(c), Some(s), None) => (h, c, s),
                _ => return Err(TokenError::Malformed),
            };

        // Pin the algorithm; the header never selects one.
        let header: TokenHeader = decode_segment(header_b64)?;
        if !header.is_hs256() {
            debug!(alg = %header.alg, typ = %header.typ, "Rejected token header");
            return Err(TokenError::Malformed);
        }

        let signature = B64
            .decode(signature_b64)
            .map_err(|_| TokenError::Malformed)?;

        let signing_input = &token[..header_b64.len() + 1 + claims_b64.len()];
        let mut mac = self.mac();
        mac.update(signing_input.as_bytes());
        // Constant-time comparison
        mac.verify_slice(&signature)
            .map_err(|_| TokenError::SignatureMismatch)?;

        let claims: Claims = decode_segment(claims_b64)?;
        if claims.is_expired_at(self.now()) {
            debug!(sub = %claims.sub, exp = claims.exp, "Rejected expired token");
            return Err(TokenError::Expired);
        }

        debug!(sub = %claims.sub, "Validated token");

        Ok(claims)
    }

    fn mac(&self) -> HmacSha256 {
        HmacSha256::new_from_slice(self.secret.as_bytes()).expect("HMAC accepts keys of any length")
    }
}

fn decode_segment<T: serde::de::DeserializeOwned>(segment: &str) -> Result<T, TokenError> {
    let bytes = B64.decode(segment).map_err(|_| TokenError::Malformed)?;
    serde_json::from_slice(&bytes).map_err(|_| TokenError::Malformed)
}

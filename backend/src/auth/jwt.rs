//! Signed bearer token issuance and verification
//!
//! Tokens are self-contained: subject, role, and absolute expiry are all
//! inside the signed payload, so verification needs no store lookup. The
//! flip side is that a token cannot be revoked before its expiry; the TTL
//! is the only bound on a compromised credential.
//!
//! Keys are pre-computed once at startup and held by the codec; there is
//! no process-global signing secret.

use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use nexuskart_shared::Role;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// JWT claims
///
/// The role travels as its wire string; it is parsed (and thereby
/// structurally checked) during verification, not during decode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (account email)
    pub sub: String,
    /// Account role wire form
    pub role: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Why a presented token was rejected
///
/// Both variants are terminal for the request; the caller must log in again
/// to obtain a fresh token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Cannot parse, signature mismatch, or ill-formed claims
    #[error("malformed token")]
    Malformed,
    /// Signature is valid but the expiry has passed
    #[error("token expired")]
    Expired,
}

/// Verified identity extracted from a token
#[derive(Debug, Clone, PartialEq)]
pub struct TokenIdentity {
    pub subject: String,
    pub role: Role,
}

/// Pre-computed JWT keys for efficient token operations
/// These are expensive to create, so we cache them in AppState
#[derive(Clone)]
pub struct JwtKeys {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
}

impl JwtKeys {
    /// Create new JWT keys from secret
    /// This should be called once at startup
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: Arc::new(EncodingKey::from_secret(secret.as_bytes())),
            decoding: Arc::new(DecodingKey::from_secret(secret.as_bytes())),
        }
    }

    pub fn encoding(&self) -> &EncodingKey {
        &self.encoding
    }

    pub fn decoding(&self) -> &DecodingKey {
        &self.decoding
    }
}

/// Token codec for issuing and verifying identity tokens
///
/// # Performance Note
/// Construct once at application startup and store in AppState; keys are
/// wrapped in Arc so cloning is cheap.
#[derive(Clone)]
pub struct JwtService {
    keys: JwtKeys,
    token_ttl_secs: i64,
}

impl JwtService {
    /// Create a new codec with pre-computed keys
    pub fn new(secret: &str, token_ttl_secs: i64) -> Self {
        Self {
            keys: JwtKeys::new(secret),
            token_ttl_secs,
        }
    }

    /// Issue a signed token for a verified identity
    ///
    /// Expiry is absolute: `now + TTL`, fixed at issuance. There is no
    /// sliding renewal and no refresh flow.
    pub fn issue(&self, subject: &str, role: Role, now: DateTime<Utc>) -> Result<String> {
        let exp = now + Duration::seconds(self.token_ttl_secs);

        let claims = Claims {
            sub: subject.to_string(),
            role: role.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };

        encode(&Header::default(), &claims, self.keys.encoding())
            .map_err(|e| anyhow::anyhow!("Failed to issue token: {}", e))
    }

    /// Verify a presented token against the supplied instant
    ///
    /// Check order: signature integrity, then expiry, then claim structure.
    /// `now` is read once by the caller per verification; tests pin it to
    /// arbitrary instants.
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<TokenIdentity, TokenError> {
        // Expiry is checked below against the caller's clock, not the
        // library's wall clock.
        let mut validation = Validation::default();
        validation.validate_exp = false;

        let data = decode::<Claims>(token, self.keys.decoding(), &validation)
            .map_err(|_| TokenError::Malformed)?;

        let claims = data.claims;
        if now.timestamp() > claims.exp {
            return Err(TokenError::Expired);
        }

        let role = claims.role.parse::<Role>().map_err(|_| TokenError::Malformed)?;

        Ok(TokenIdentity {
            subject: claims.sub,
            role,
        })
    }

    /// Configured token lifetime in seconds
    #[inline]
    pub fn token_ttl_secs(&self) -> i64 {
        self.token_ttl_secs
    }
}

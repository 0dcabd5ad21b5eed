//! Bearer token issuance and verification.

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{AuthError, AuthResult};
use crate::user::User;

/// Identity claims embedded in a token. Everything the request pipeline
/// needs to know about the caller without touching the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id, stringified per JWT convention.
    pub sub: String,
    pub email: String,
    pub name: String,
    pub role: String,
    /// Issued at, unix seconds.
    pub iat: u64,
    /// Expiry, unix seconds.
    pub exp: u64,
}

impl Claims {
    /// Parse the subject back into a user id. A non-numeric subject means
    /// the token was not issued by us.
    pub fn user_id(&self) -> AuthResult<i64> {
        self.sub.parse().map_err(|_| AuthError::InvalidToken)
    }
}

/// Signs and verifies HS256 tokens with a secret injected at construction.
/// No process-global key state; two instances with different secrets reject
/// each other's tokens.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_seconds: u64,
}

impl TokenService {
    pub fn new(secret: &str, expiration_days: u64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl_seconds: expiration_days * 24 * 60 * 60,
        }
    }

    /// Sign a token for `user`, expiring one TTL from now.
    pub fn issue(&self, user: &User) -> AuthResult<String> {
        let now = unix_now()?;
        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role.clone(),
            iat: now,
            exp: now + self.ttl_seconds,
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AuthError::Token(e.to_string()))
    }

    /// Check signature and expiry, returning the claims on success. Expired
    /// and tampered tokens fail with the same error so callers cannot tell
    /// which check rejected them.
    pub fn verify(&self, token: &str) -> AuthResult<Claims> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(error = %e, "token verification failed");
                AuthError::InvalidToken
            })
    }
}

fn unix_now() -> AuthResult<u64> {
    let since_epoch = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| AuthError::Token(e.to_string()))?;
    Ok(since_epoch.as_secs())
}

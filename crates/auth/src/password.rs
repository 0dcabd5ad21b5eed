//! Password hashing.
//!
//! bcrypt with a fixed work factor. The salt and the cost are embedded in
//! every digest, so each hash of the same password differs and the cost can
//! be raised later without invalidating rows already stored.

use crate::error::{AuthError, AuthResult};

/// bcrypt work factor used for new digests.
pub const HASH_COST: u32 = 12;

pub fn hash(plaintext: &str) -> AuthResult<String> {
    bcrypt::hash(plaintext, HASH_COST).map_err(|e| AuthError::Hashing(e.to_string()))
}

/// Check a plaintext password against a stored digest. A digest that cannot
/// be parsed counts as a failed match rather than an error, so a corrupted
/// row behaves like a wrong password.
pub fn verify(plaintext: &str, digest: &str) -> bool {
    bcrypt::verify(plaintext, digest).unwrap_or(false)
}

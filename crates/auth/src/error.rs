use thiserror::Error;

/// Errors surfaced by the authentication subsystem.
///
/// The first three variants are the only ones a caller should branch on.
/// `InvalidCredentials` deliberately covers both an unknown email and a wrong
/// password, and `InvalidToken` covers both a bad signature and an expired
/// token, so responses cannot be used to probe which half failed.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Email already registered")]
    EmailTaken,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Password hashing failed")]
    Hashing(String),

    #[error("Token signing failed")]
    Token(String),

    #[error("Database error")]
    Database(#[from] sqlx::Error),
}

pub type AuthResult<T> = Result<T, AuthError>;

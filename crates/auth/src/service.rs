//! Registration, login, and user lookup.

use serde::Serialize;
use sqlx::SqlitePool;

use crate::error::{AuthError, AuthResult};
use crate::token::TokenService;
use crate::user::{PublicUser, User};
use crate::{password, store};

/// Role given to self-registered users.
const DEFAULT_ROLE: &str = "user";

/// A successful login or registration: the bearer token plus the public
/// view of the user it identifies.
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: PublicUser,
}

/// Composes the user store and the token service. The store never sees
/// tokens and the token service never sees the database; only this type
/// connects the two.
#[derive(Clone)]
pub struct AuthService {
    pool: SqlitePool,
    tokens: TokenService,
}

impl AuthService {
    pub fn new(pool: SqlitePool, tokens: TokenService) -> Self {
        Self { pool, tokens }
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// Create an account and sign it in. The email pre-check answers the
    /// common duplicate case without paying for a hash; the UNIQUE index
    /// catches the race between check and insert and surfaces as the same
    /// [`AuthError::EmailTaken`].
    pub async fn register(
        &self,
        email: &str,
        name: &str,
        plaintext: &str,
    ) -> AuthResult<AuthResponse> {
        if store::find_by_email(&self.pool, email).await?.is_some() {
            return Err(AuthError::EmailTaken);
        }

        let digest = password::hash(plaintext)?;
        let user = store::insert_user(&self.pool, email, name, &digest, DEFAULT_ROLE).await?;
        tracing::info!(user_id = user.id, "user registered");

        self.respond(user)
    }

    /// Verify credentials and sign in. Unknown email and wrong password
    /// take the same error path.
    pub async fn login(&self, email: &str, plaintext: &str) -> AuthResult<AuthResponse> {
        let Some(user) = store::find_by_email(&self.pool, email).await? else {
            return Err(AuthError::InvalidCredentials);
        };

        if !password::verify(plaintext, &user.password_hash) {
            return Err(AuthError::InvalidCredentials);
        }

        tracing::debug!(user_id = user.id, "login verified");
        self.respond(user)
    }

    /// Public view of a user, `None` when the id is unknown.
    pub async fn user_by_id(&self, id: i64) -> AuthResult<Option<PublicUser>> {
        Ok(store::find_by_id(&self.pool, id).await?.map(PublicUser::from))
    }

    fn respond(&self, user: User) -> AuthResult<AuthResponse> {
        let token = self.tokens.issue(&user)?;
        Ok(AuthResponse {
            token,
            user: user.into(),
        })
    }
}

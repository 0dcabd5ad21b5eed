//! User rows in SQLite.
//!
//! Thin query functions over a pool. The UNIQUE index on `email` is the
//! real uniqueness guard; `insert_user` translates a violation of it into
//! [`AuthError::EmailTaken`] so two racing registrations both resolve
//! correctly.

use sqlx::SqlitePool;
use time::OffsetDateTime;

use crate::error::{AuthError, AuthResult};
use crate::user::User;

pub async fn insert_user(
    pool: &SqlitePool,
    email: &str,
    name: &str,
    password_hash: &str,
    role: &str,
) -> AuthResult<User> {
    let now = OffsetDateTime::now_utc().unix_timestamp();
    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (email, name, role, password_hash, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?)
        RETURNING id, email, name, role, password_hash, created_at, updated_at
        "#,
    )
    .bind(email)
    .bind(name)
    .bind(role)
    .bind(password_hash)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
    .map_err(|e| match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => AuthError::EmailTaken,
        _ => AuthError::Database(e),
    })?;

    Ok(user)
}

pub async fn find_by_email(pool: &SqlitePool, email: &str) -> AuthResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, email, name, role, password_hash, created_at, updated_at
         FROM users WHERE email = ?",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> AuthResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, email, name, role, password_hash, created_at, updated_at
         FROM users WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

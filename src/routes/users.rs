//! User endpoints under /api/v1/users.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use serde_json::json;

use crate::error::AppError;
use crate::middleware::CurrentUser;
use crate::routes::AppState;

/// GET /api/v1/users/me
///
/// The profile behind the presented token. The token is trusted for
/// identity, but the row must still exist; a user deleted since issuance
/// gets 404, not 401.
pub async fn me(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<impl IntoResponse, AppError> {
    let Some(profile) = state.auth.user_by_id(user.id).await? else {
        return Err(AppError::NotFound("User not found".to_string()));
    };

    Ok(Json(json!({ "user": profile })))
}

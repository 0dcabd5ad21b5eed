//! Authentication endpoints under /api/v1/auth.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Deserialize;
use validator::Validate;

use crate::error::AppError;
use crate::routes::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, max = 255, message = "name must be between 1 and 255 characters"))]
    pub name: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
}

/// POST /api/v1/auth/login
///
/// 200 with `{token, user}` on success, 401 for bad credentials, 422 for a
/// body that fails validation.
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(req) = payload.map_err(|e| AppError::Validation(e.body_text()))?;
    req.validate().map_err(validation_message)?;

    tracing::info!(email = %req.email, "login attempt");
    let response = state.auth.login(&req.email, &req.password).await?;

    Ok(Json(response))
}

/// POST /api/v1/auth/register
///
/// 201 with `{token, user}` on success, 409 when the email is taken, 422
/// for a body that fails validation.
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(req) = payload.map_err(|e| AppError::Validation(e.body_text()))?;
    req.validate().map_err(validation_message)?;

    tracing::info!(email = %req.email, "registration attempt");
    let response = state.auth.register(&req.email, &req.name, &req.password).await?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// Flatten validator's per-field errors into the single message the error
/// body carries. Sorted so the output does not depend on map order.
fn validation_message(errors: validator::ValidationErrors) -> AppError {
    let mut messages: Vec<String> = Vec::new();
    for (field, field_errors) in errors.field_errors() {
        for error in field_errors {
            match &error.message {
                Some(message) => messages.push(message.to_string()),
                None => messages.push(format!("{field} is invalid")),
            }
        }
    }
    messages.sort();

    AppError::Validation(messages.join("; "))
}

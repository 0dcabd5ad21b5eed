use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::TypedHeader;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Bearer;

use crate::error::AppError;
use crate::routes::AppState;

/// Identity attached to a request once its token checks out.
///
/// Built from the token alone; the middleware never touches the store, so a
/// user deleted after issuance still passes until the token expires.
/// Handlers that need the row to exist look it up themselves.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub role: String,
}

/// Authentication middleware for API routes
///
/// Requires an `Authorization: Bearer <token>` header, verifies it, and
/// inserts a [`CurrentUser`] extension. Missing header, malformed scheme,
/// bad signature, and expired token all answer 401.
pub async fn auth_middleware(
    State(state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(TypedHeader(Authorization(bearer))) = bearer else {
        tracing::debug!("missing or malformed authorization header");
        return Err(AppError::Unauthorized(
            "Missing or invalid authorization header".to_string(),
        ));
    };

    let claims = state.auth.tokens().verify(bearer.token())?;

    req.extensions_mut().insert(CurrentUser {
        id: claims.user_id()?,
        email: claims.email,
        name: claims.name,
        role: claims.role,
    });

    Ok(next.run(req).await)
}

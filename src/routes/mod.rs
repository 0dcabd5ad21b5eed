use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router, middleware as axum_middleware};
use serde_json::json;
use sqlx::SqlitePool;
use tera::Tera;
use tower_http::services::ServeDir;

use crate::middleware::auth_middleware;
use crate::pages::{self, PageRoute};
use pagesmith_auth::AuthService;

mod auth;
mod health;
mod users;

#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub auth: AuthService,
    pub templates: Arc<Tera>,
    pub pool: SqlitePool,
}

/// 404 for anything unmatched: JSON for API paths, the rendered not-found
/// page for everything else.
pub async fn fallback(State(state): State<AppState>, req: Request) -> Response {
    let path = req.uri().path();

    if path.starts_with("/api/") {
        let body = json!({
            "error": "Not Found",
            "message": format!("Route {} {} not found", req.method(), path),
            "statusCode": StatusCode::NOT_FOUND.as_u16(),
        });
        return (StatusCode::NOT_FOUND, Json(body)).into_response();
    }

    pages::render_error_page(&state, StatusCode::NOT_FOUND, "Page Not Found")
}

pub fn router(state: AppState, page_routes: Vec<PageRoute>) -> Router {
    let protected = Router::new()
        .route("/users/me", get(users::me))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let api = Router::new()
        .route("/auth/login", post(auth::login))
        .route("/auth/register", post(auth::register))
        .merge(protected);

    let public_dir = state.config.server.public_dir.clone();

    Router::new()
        // Health check endpoints (no auth required)
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .with_state(state.pool.clone())
        .nest("/api/v1", api)
        .merge(pages::page_router(page_routes))
        .nest_service("/static", ServeDir::new(public_dir))
        .fallback(fallback)
        .with_state(state)
}

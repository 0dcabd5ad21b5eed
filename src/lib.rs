pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod observability;
pub mod pages;
pub mod routes;
pub mod server;

pub use routes::AppState;

use std::sync::Arc;

use pagesmith_auth::{AuthService, TokenService};
use tera::Tera;

/// Build the application router: templates loaded, pages scanned, services
/// wired. `server::serve` wraps this with the outer tower layers and a
/// listener; integration tests drive it directly.
pub fn create_app(config: config::Config, pool: sqlx::SqlitePool) -> anyhow::Result<axum::Router> {
    let templates = Arc::new(Tera::new(&config.templates.glob())?);

    let page_routes = pages::scan_pages(&config.templates.pages_dir())?;
    tracing::info!(count = page_routes.len(), "page templates scanned");

    let tokens = TokenService::new(&config.jwt.secret, config.jwt.expiration_days);
    let auth = AuthService::new(pool.clone(), tokens);

    let state = AppState {
        config,
        auth,
        templates,
        pool,
    };

    Ok(routes::router(state, page_routes))
}

use axum::Router;
use pagesmith::config::{
    Config, CorsConfig, DatabaseConfig, JwtConfig, ObservabilityConfig, ServerConfig,
    TemplateConfig,
};
use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};

pub const TEST_JWT_SECRET: &str = "test_secret_key_minimum_32_characters_long";

pub async fn setup_test_db() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect(":memory:")
        .await
        .unwrap();

    sqlx::migrate!("./migrations").run(&pool).await.unwrap();

    pool
}

pub fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            public_dir: "public".to_string(),
        },
        database: DatabaseConfig {
            url: ":memory:".to_string(),
            max_connections: 1,
        },
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            expiration_days: 7,
        },
        cors: CorsConfig::default(),
        templates: TemplateConfig::default(),
        observability: ObservabilityConfig::default(),
    }
}

pub fn create_test_app(pool: SqlitePool) -> Router {
    pagesmith::create_app(test_config(), pool).unwrap()
}

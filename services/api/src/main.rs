use sea_orm::Database;
use tracing::info;

use polly_api::config::ApiConfig;
use polly_api::router::build_router;
use polly_api::state::AppState;
use polly_core::tracing::init_tracing;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = ApiConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let state = AppState {
        db,
        jwt_secret: config.jwt_secret,
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.api_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("poll service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}

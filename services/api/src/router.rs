use axum::{
    Router,
    routing::{delete, get, post},
};
use tower_http::trace::TraceLayer;

use polly_core::health::{healthz, readyz};
use polly_core::middleware::request_id_layer;

use crate::handlers::{
    auth::{login, register},
    poll::{create_poll, delete_poll, get_poll, get_results, list_polls},
    vote::cast_vote,
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Accounts
        .route("/register", post(register))
        .route("/login", post(login))
        // Polls
        .route("/polls", post(create_poll))
        .route("/polls", get(list_polls))
        .route("/polls/{poll_id}", get(get_poll))
        .route("/polls/{poll_id}", delete(delete_poll))
        // Votes
        .route("/polls/{poll_id}/vote", post(cast_vote))
        .route("/polls/{poll_id}/results", get(get_results))
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}

pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::search::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/search", post(handlers::handle_search))
        .route(
            "/api/test",
            get(handlers::handle_connection_test).post(handlers::handle_connection_test),
        )
        .with_state(state)
}

pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::assessment::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Assessment API
        .route(
            "/api/v1/blueprints",
            post(handlers::handle_create_blueprint),
        )
        .route("/api/v1/tests", post(handlers::handle_generate_test))
        .route("/api/v1/tests/:id", get(handlers::handle_fetch_test))
        .route(
            "/api/v1/tests/:id/submit",
            post(handlers::handle_submit_answers),
        )
        .route(
            "/api/v1/tests/:id/report",
            get(handlers::handle_fetch_report),
        )
        .with_state(state)
}

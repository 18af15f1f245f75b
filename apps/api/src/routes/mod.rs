pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::evaluation::handlers::handle_evaluate;
use crate::generation::handlers::handle_generate;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/generate", post(handle_generate))
        .route("/evaluate", post(handle_evaluate))
        .with_state(state)
}

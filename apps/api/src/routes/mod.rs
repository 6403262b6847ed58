pub mod health;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::catch_panic::CatchPanicLayer;

use crate::contact::handlers;
use crate::errors::handle_panic;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/contact", post(handlers::handle_contact))
        .with_state(state)
        .layer(CatchPanicLayer::custom(handle_panic))
}

//! HTTP API module
//!
//! This module exposes the embedding-page surface of the rest timer: user
//! controls, pointer reports, visibility and the close action.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/timer", get(status_handler))
        .route("/timer/toggle", post(toggle_handler))
        .route("/timer/reset", post(reset_handler))
        .route("/timer/increment", post(increment_handler))
        .route("/timer/decrement", post(decrement_handler))
        .route("/timer/minimize", post(minimize_handler))
        .route("/timer/expand", post(expand_handler))
        .route("/timer/outside", post(outside_handler))
        .route("/timer/pointer", post(pointer_handler))
        .route("/timer/viewport", post(viewport_handler))
        .route("/timer/visibility", post(visibility_handler))
        .route("/timer/close", post(close_handler))
        .route("/timer/permission", post(permission_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

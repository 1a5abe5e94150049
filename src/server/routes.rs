//! Router configuration for the web server.

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;

use super::handlers;
use super::AppState;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Batch generation
        .route("/generate", get(handlers::generate_cards))
        // Generated image listing and serving
        .route("/images", get(handlers::list_images))
        .route("/images/:domain", get(handlers::serve_image))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

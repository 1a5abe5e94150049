//! Batch generation handler.

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use tokio::sync::mpsc;

use super::super::AppState;

/// Run one generation batch over the configured domain limit and report
/// aggregate counts.
///
/// Per-domain problems are already absorbed by the service; only failing
/// to read the domain list surfaces here, as a generic 500 so spreadsheet
/// paths never leak to clients.
pub async fn generate_cards(State(state): State<AppState>) -> impl IntoResponse {
    // Progress events are only rendered by the CLI. Dropping the receiver
    // turns every send into a no-op.
    let (event_tx, _) = mpsc::channel(16);

    match state.generator.run(event_tx).await {
        Ok(report) => (
            StatusCode::OK,
            format!("Generated images for companies: {}.", report),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to generate images: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to generate images.").into_response()
        }
    }
}

//! Generated image listing and serving handlers.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};

use super::super::templates;
use super::super::AppState;
use crate::storage;

/// List domains with a generated card as an HTML page of links.
pub async fn list_images(State(state): State<AppState>) -> impl IntoResponse {
    let domains = storage::list_generated(&state.data_dir);
    Html(templates::base_template(
        "Generated Images",
        &templates::images_list(&domains),
    ))
}

/// Serve one domain's generated card.
pub async fn serve_image(State(state): State<AppState>, Path(domain): Path<String>) -> Response {
    if domain.contains("..") || domain.contains('/') {
        return (StatusCode::NOT_FOUND, "Image not found").into_response();
    }

    let image_path = storage::card_path(&state.data_dir, &domain);
    if !image_path.is_file() {
        return (StatusCode::NOT_FOUND, "Image not found").into_response();
    }

    let content = match tokio::fs::read(&image_path).await {
        Ok(c) => c,
        Err(_) => {
            return (StatusCode::INTERNAL_SERVER_ERROR, "Failed to read file").into_response();
        }
    };

    let mime = mime_guess::from_path(&image_path)
        .first_or_octet_stream()
        .to_string();

    ([(header::CONTENT_TYPE, mime)], content).into_response()
}

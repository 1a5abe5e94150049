//! HTTP request handlers for the web server.

mod generate;
mod images;

// Re-export handlers for use by the router
pub use generate::generate_cards;
pub use images::{list_images, serve_image};

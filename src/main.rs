//! logopress - company logo card generation and browsing.
//!
//! Reads company domains from a spreadsheet, fetches each company's logo
//! from a logo-by-domain service, composites it onto a shared background
//! template, and serves the generated cards over a small web interface.

mod cli;
mod compose;
mod config;
mod domains;
mod logo;
mod server;
mod services;
mod storage;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (before anything else)
    let _ = dotenvy::dotenv();

    // Initialize logging based on verbosity
    let default_filter = if cli::is_verbose() {
        "logopress=info"
    } else {
        "logopress=warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Run CLI
    cli::run().await
}

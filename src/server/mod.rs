//! Web server for generating and browsing logo cards.
//!
//! Three endpoints mirror the card lifecycle:
//! - `/generate` runs one bounded generation batch
//! - `/images` lists domains with a generated card
//! - `/images/:domain` serves the card itself

mod handlers;
mod routes;
mod templates;

pub use routes::create_router;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::config::Settings;
use crate::logo::LogoClient;
use crate::services::{GenerationConfig, GenerationService};

/// Shared state for the web server.
#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<GenerationService>,
    pub data_dir: PathBuf,
}

impl AppState {
    pub fn new(settings: &Settings) -> anyhow::Result<Self> {
        let logo_client = LogoClient::new(
            &settings.logo_service_url,
            Duration::from_secs(settings.request_timeout),
            &settings.user_agent,
        )?;

        let generator = GenerationService::new(
            Arc::new(logo_client),
            GenerationConfig {
                data_dir: settings.data_dir.clone(),
                spreadsheet: settings.spreadsheet.clone(),
                background: settings.background.clone(),
                domain_column: settings.domain_column.clone(),
                domain_prefix: settings.domain_prefix.clone(),
                limit: settings.generate_limit,
            },
        );

        Ok(Self {
            generator: Arc::new(generator),
            data_dir: settings.data_dir.clone(),
        })
    }
}

/// Start the web server.
pub async fn serve(settings: &Settings, host: &str, port: u16) -> anyhow::Result<()> {
    let state = AppState::new(settings)?;
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    tracing::info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

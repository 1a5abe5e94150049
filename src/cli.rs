//! CLI commands implementation.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::mpsc;

use crate::config::{self, Settings};
use crate::logo::LogoClient;
use crate::server;
use crate::services::{GenerationConfig, GenerationEvent, GenerationReport, GenerationService};
use crate::storage;

#[derive(Parser)]
#[command(name = "logopress")]
#[command(about = "Company logo card generation and browsing tool")]
#[command(version)]
pub struct Cli {
    /// Data directory (inputs and generated cards)
    #[arg(long, global = true, env = "LOGOPRESS_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Prepare the data directory and check required inputs
    Init,

    /// Generate cards for the leading domains in the spreadsheet
    Generate {
        /// Limit number of domains to process (defaults to the configured batch limit)
        #[arg(short, long)]
        limit: Option<usize>,
        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// List domains with a generated card
    Ls,

    /// Start web server to generate and browse cards
    Serve {
        /// Address to bind to: PORT, HOST, or HOST:PORT (defaults to configured bind)
        bind: Option<String>,
    },
}

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = config::load_settings(cli.data_dir.as_deref())?;

    match cli.command {
        Commands::Init => cmd_init(&settings),
        Commands::Generate { limit, format } => cmd_generate(&settings, limit, &format).await,
        Commands::Ls => cmd_ls(&settings),
        Commands::Serve { bind } => cmd_serve(&settings, bind.as_deref()).await,
    }
}

/// Build the generation service from settings.
fn build_service(settings: &Settings) -> anyhow::Result<GenerationService> {
    let logo_client = LogoClient::new(
        &settings.logo_service_url,
        Duration::from_secs(settings.request_timeout),
        &settings.user_agent,
    )?;

    Ok(GenerationService::new(
        Arc::new(logo_client),
        GenerationConfig {
            data_dir: settings.data_dir.clone(),
            spreadsheet: settings.spreadsheet.clone(),
            background: settings.background.clone(),
            domain_column: settings.domain_column.clone(),
            domain_prefix: settings.domain_prefix.clone(),
            limit: settings.generate_limit,
        },
    ))
}

fn cmd_init(settings: &Settings) -> anyhow::Result<()> {
    std::fs::create_dir_all(&settings.data_dir)?;

    println!(
        "{} Initialized logopress in {}",
        style("✓").green(),
        settings.data_dir.display()
    );

    for (label, path) in [
        ("spreadsheet", &settings.spreadsheet),
        ("background", &settings.background),
    ] {
        if path.is_file() {
            println!(
                "  {} Found {}: {}",
                style("✓").green(),
                label,
                path.display()
            );
        } else {
            println!(
                "  {} Missing {}: {}",
                style("!").yellow(),
                label,
                path.display()
            );
        }
    }

    Ok(())
}

async fn cmd_generate(
    settings: &Settings,
    limit: Option<usize>,
    format: &str,
) -> anyhow::Result<()> {
    let limit = limit.unwrap_or(settings.generate_limit);
    let service = build_service(settings)?;

    // Event channel for progress updates
    let (event_tx, mut event_rx) = mpsc::channel::<GenerationEvent>(100);

    let pb = ProgressBar::new(limit as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    // Spawn event handler task (UI layer)
    let event_handler = tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            match event {
                GenerationEvent::Started { domain } => {
                    pb.set_message(domain);
                }
                GenerationEvent::Finished { .. } => {
                    pb.inc(1);
                }
            }
        }
        pb.finish_and_clear();
    });

    // Run generation service (business logic)
    let result = service.run_with_limit(limit, event_tx).await;

    // Wait for event handler to finish
    let _ = event_handler.await;

    let report = result?;
    print_report(&report, format)
}

fn print_report(report: &GenerationReport, format: &str) -> anyhow::Result<()> {
    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(report)?);
        }
        _ => {
            println!(
                "{} Generated {} cards",
                style("✓").green(),
                report.generated
            );

            if report.skipped > 0 {
                println!(
                    "  {} {} skipped (no logo or unusable directory)",
                    style("→").dim(),
                    report.skipped
                );
            }

            if report.failed > 0 {
                println!("  {} {} failed", style("✗").red(), report.failed);
            }
        }
    }

    Ok(())
}

fn cmd_ls(settings: &Settings) -> anyhow::Result<()> {
    let domains = storage::list_generated(&settings.data_dir);

    if domains.is_empty() {
        println!("{} No cards generated yet", style("!").yellow());
        return Ok(());
    }

    println!("\n{:<30}  {:<10}  Path", "Domain", "Size");
    println!("{}", "-".repeat(70));

    for domain in &domains {
        let path = storage::card_path(&settings.data_dir, domain);
        let size = std::fs::metadata(&path)
            .map(|m| format_bytes(m.len()))
            .unwrap_or_else(|_| "-".to_string());

        println!("{:<30}  {:<10}  {}", domain, size, path.display());
    }

    println!("\n{} cards", domains.len());
    Ok(())
}

async fn cmd_serve(settings: &Settings, bind: Option<&str>) -> anyhow::Result<()> {
    let (host, port) = match bind {
        Some(bind) => parse_bind_address(bind, &settings.host, settings.port)?,
        None => (settings.host.clone(), settings.port),
    };

    println!(
        "{} Starting logopress server at http://{}:{}",
        style("→").cyan(),
        host,
        port
    );
    println!("  Press Ctrl+C to stop");

    server::serve(settings, &host, port).await
}

/// Parse a bind address that can be:
/// - Just a port: "3000" -> {default host}:3000
/// - Just a host: "0.0.0.0" -> 0.0.0.0:{default port}
/// - Host and port: "0.0.0.0:3000" -> 0.0.0.0:3000
fn parse_bind_address(
    bind: &str,
    default_host: &str,
    default_port: u16,
) -> anyhow::Result<(String, u16)> {
    // Try parsing as just a port number
    if let Ok(port) = bind.parse::<u16>() {
        return Ok((default_host.to_string(), port));
    }

    // Try parsing as host:port
    if let Some((host, port_str)) = bind.rsplit_once(':') {
        if let Ok(port) = port_str.parse::<u16>() {
            return Ok((host.to_string(), port));
        }
    }

    // Must be just a host, use default port
    Ok((bind.to_string(), default_port))
}

fn format_bytes(bytes: u64) -> String {
    if bytes >= 1_000_000 {
        format!("{:.2} MB", bytes as f64 / 1_000_000.0)
    } else if bytes >= 1_000 {
        format!("{:.2} KB", bytes as f64 / 1_000.0)
    } else {
        format!("{} bytes", bytes)
    }
}

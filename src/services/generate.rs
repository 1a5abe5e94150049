//! Card generation service.
//!
//! Runs the spreadsheet -> logo fetch -> composite pipeline for a bounded
//! prefix of the domain list, strictly one domain at a time. Each domain
//! has its own failure boundary: a bad domain is recorded and the batch
//! moves on. Only failing to read the domain list aborts a run.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::mpsc;

use crate::compose;
use crate::domains::{self, DomainSourceError};
use crate::logo::LogoSource;
use crate::storage;

/// Events emitted during a generation run.
#[derive(Debug, Clone)]
pub enum GenerationEvent {
    /// Work started for a domain
    Started { domain: String },
    /// Work finished for a domain
    Finished {
        domain: String,
        outcome: DomainOutcome,
    },
}

/// Outcome of one domain's pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainOutcome {
    /// Card written to disk
    Generated,
    /// Output directory could not be made usable
    SkippedDirectory,
    /// Logo service had no logo for the domain
    SkippedNoLogo,
    /// Compositing or writing the card failed
    Failed,
}

/// Aggregate result of one generation run.
#[derive(Debug, Default, Serialize)]
pub struct GenerationReport {
    pub attempted: usize,
    pub generated: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl GenerationReport {
    fn record(&mut self, outcome: DomainOutcome) {
        self.attempted += 1;
        match outcome {
            DomainOutcome::Generated => self.generated += 1,
            DomainOutcome::SkippedDirectory | DomainOutcome::SkippedNoLogo => self.skipped += 1,
            DomainOutcome::Failed => self.failed += 1,
        }
    }
}

impl fmt::Display for GenerationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "generated {}, skipped {}, failed {} of {} attempted",
            self.generated, self.skipped, self.failed, self.attempted
        )
    }
}

/// Configuration for the generation service.
pub struct GenerationConfig {
    pub data_dir: PathBuf,
    pub spreadsheet: PathBuf,
    pub background: PathBuf,
    pub domain_column: String,
    pub domain_prefix: String,
    pub limit: usize,
}

/// Service for generating logo cards from the company spreadsheet.
pub struct GenerationService {
    logo_source: Arc<dyn LogoSource>,
    config: GenerationConfig,
}

impl GenerationService {
    /// Create a new generation service.
    pub fn new(logo_source: Arc<dyn LogoSource>, config: GenerationConfig) -> Self {
        Self {
            logo_source,
            config,
        }
    }

    /// Run one batch over the configured domain limit.
    pub async fn run(
        &self,
        event_tx: mpsc::Sender<GenerationEvent>,
    ) -> Result<GenerationReport, DomainSourceError> {
        self.run_with_limit(self.config.limit, event_tx).await
    }

    /// Run one batch over at most `limit` domains.
    pub async fn run_with_limit(
        &self,
        limit: usize,
        event_tx: mpsc::Sender<GenerationEvent>,
    ) -> Result<GenerationReport, DomainSourceError> {
        let domains = domains::read_domains(
            &self.config.spreadsheet,
            &self.config.domain_column,
            &self.config.domain_prefix,
        )?;

        let mut report = GenerationReport::default();
        for domain in domains.iter().take(limit) {
            let _ = event_tx
                .send(GenerationEvent::Started {
                    domain: domain.clone(),
                })
                .await;

            let outcome = self.generate_one(domain).await;
            report.record(outcome);

            let _ = event_tx
                .send(GenerationEvent::Finished {
                    domain: domain.clone(),
                    outcome,
                })
                .await;
        }

        tracing::info!("Generation run complete: {}", report);
        Ok(report)
    }

    /// One domain's pipeline: ensure the output directory, fetch the logo,
    /// composite the card. Reruns overwrite any existing card.
    async fn generate_one(&self, domain: &str) -> DomainOutcome {
        let dir = storage::domain_dir(&self.config.data_dir, domain);
        if !storage::ensure_dir(&dir) {
            tracing::warn!("Skipping {} due to directory creation issues", domain);
            return DomainOutcome::SkippedDirectory;
        }

        let logo = match self.logo_source.fetch(domain).await {
            Some(bytes) => bytes,
            None => return DomainOutcome::SkippedNoLogo,
        };

        let card_path = storage::card_path(&self.config.data_dir, domain);
        match compose::compose_card(&self.config.background, &logo, &card_path) {
            Ok(()) => {
                tracing::info!("Generated card for domain: {}", domain);
                DomainOutcome::Generated
            }
            Err(e) => {
                tracing::error!("Failed to compose card for {}: {}", domain, e);
                DomainOutcome::Failed
            }
        }
    }
}

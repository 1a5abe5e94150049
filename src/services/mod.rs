//! Service layer for logopress business logic.
//!
//! Domain logic separated from UI concerns, usable from both the CLI and
//! the web server.

pub mod generate;

pub use generate::{
    DomainOutcome, GenerationConfig, GenerationEvent, GenerationReport, GenerationService,
};

//! Error types for the generation pipeline
//!
//! Every error here is recoverable at the orchestrator boundary: remote,
//! parse, and configuration failures all fall through to local generation.
//! Only [`SettingsError`] reaches callers, and only from settings resolution.

use std::path::PathBuf;

use deck_types::AiError;
use thiserror::Error;

/// Main error type for the crate
#[derive(Error, Debug)]
pub enum DeckError {
    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    #[error("Remote generation error: {0}")]
    Remote(#[from] AiError),

    #[error("Response parse error: {0}")]
    Parse(#[from] ParseFailure),
}

/// Degenerate settings rejected before generation starts
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("maxSlides must be at least 1")]
    InvalidMaxSlides,

    #[error("Failed to read settings file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse settings file {path}: {source}")]
    Format {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Neither the JSON stage nor the text stage recovered a slide
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("No slides recovered from remote response ({response_len} bytes)")]
pub struct ParseFailure {
    pub response_len: usize,
}

/// Result type for fallible pipeline operations
pub type DeckResult<T> = Result<T, DeckError>;

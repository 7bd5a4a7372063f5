//! deckgen - slide-deck content generation
//!
//! Turns a topical request (topic, audience, tone, slide budget) into a
//! structured [`Presentation`] ready for rendering or export.
//!
//! ## Pipeline
//!
//! ```text
//! Options -> SettingsResolver -> DeckGenerator
//!              remote: prompt -> ContentClient -> ResponseParser (JSON | text)
//!              local:  TopicAnalyzer -> sections -> balancer
//!           -> assembly (ids, design, visuals, notes) -> Presentation
//! ```
//!
//! The local path is pure and total, so generation always yields a deck.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use deckgen::{DeckGenerator, PresentationOptions, SettingsResolver};
//!
//! # async fn run() -> Result<(), deckgen::DeckError> {
//! let settings = SettingsResolver::resolve(PresentationOptions::for_topic("edge computing"))?;
//! let deck = DeckGenerator::local_only().generate(&settings).await;
//! assert_eq!(deck.slides[0].id, 1);
//! # Ok(())
//! # }
//! ```

// Core error handling
pub mod error;

// Settings resolution and settings-file loading
pub mod settings;

// Shared keyword heuristics
pub mod classifier;

// Local path
pub mod analysis;
pub mod balancer;
pub mod sections;

// Remote path
pub mod ai;
pub mod parser;

// Final document assembly and top-level coordination
pub mod assembly;
pub mod orchestrator;

pub use deck_types::{
    AiConfig, AiError, AiResult, Audience, ChartType, ExtractionStage, Generator, Presentation,
    PresentationOptions, PresentationSettings, Slide, SlideBody, SlideKind, Template, Tone,
    TEMPLATES,
};

pub use ai::{gemini::GeminiClient, ContentClient};
pub use analysis::{TopicAnalysis, TopicAnalyzer};
pub use error::{DeckError, DeckResult, ParseFailure, SettingsError};
pub use orchestrator::DeckGenerator;
pub use parser::ResponseParser;
pub use settings::SettingsResolver;

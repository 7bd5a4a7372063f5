//! Remote content generation
//!
//! [`ContentClient`] is the seam between the pipeline and any generative text
//! service. The pipeline only ever needs raw text back; turning it into slides
//! is the response parser's job.

pub mod gemini;
pub mod prompt;

use async_trait::async_trait;
use deck_types::{AiResult, PresentationSettings};

/// A remote generative text service
#[async_trait]
pub trait ContentClient: Send + Sync {
    /// Send one generation request for these settings, return the raw text
    async fn request(&self, settings: &PresentationSettings) -> AiResult<String>;

    /// Get the provider name for logging
    fn provider_name(&self) -> &str;
}

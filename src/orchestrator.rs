//! Generation orchestrator
//!
//! Tries the remote path once, then falls back to local generation. Remote,
//! parse, and cancellation failures are logged and swallowed here, so
//! [`DeckGenerator::generate`] always returns a deck.
//!
//! The generator holds no per-call state. One instance can serve any number
//! of concurrent generations.

use std::sync::Arc;

use deck_types::{AiError, Generator, Presentation, PresentationSettings};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::watch;
use tracing::{info, warn};

use crate::ai::gemini::GeminiClient;
use crate::ai::ContentClient;
use crate::analysis::TopicAnalyzer;
use crate::assembly::assemble;
use crate::balancer::balance;
use crate::error::DeckResult;
use crate::parser::ResponseParser;
use crate::sections::build_sections;

/// Entry point of the pipeline
pub struct DeckGenerator {
    client: Option<Arc<dyn ContentClient>>,
    analyzer: TopicAnalyzer,
    seed: Option<u64>,
}

impl DeckGenerator {
    /// Generator that tries `client` before falling back to local generation
    pub fn new(client: Arc<dyn ContentClient>) -> Self {
        Self {
            client: Some(client),
            analyzer: TopicAnalyzer::new(),
            seed: None,
        }
    }

    /// Generator that never calls a remote service
    pub fn local_only() -> Self {
        Self {
            client: None,
            analyzer: TopicAnalyzer::new(),
            seed: None,
        }
    }

    /// Gemini-backed generator from `GEMINI_*` environment variables.
    ///
    /// Missing or malformed credentials give a local-only generator.
    pub fn from_env() -> Self {
        match GeminiClient::from_env() {
            Ok(client) => Self::new(Arc::new(client)),
            Err(e) => {
                info!("Remote generation disabled: {}", e);
                Self::local_only()
            }
        }
    }

    /// Fix the random source so chart fallbacks are reproducible
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn has_remote(&self) -> bool {
        self.client.is_some()
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Generate a deck. Never fails.
    pub async fn generate(&self, settings: &PresentationSettings) -> Presentation {
        self.run(settings, None).await
    }

    /// Generate a deck, abandoning the remote call if `shutdown` turns true
    pub async fn generate_with_shutdown(
        &self,
        settings: &PresentationSettings,
        shutdown: watch::Receiver<bool>,
    ) -> Presentation {
        self.run(settings, Some(shutdown)).await
    }

    /// Generate a deck from the topic analysis alone
    pub fn generate_local(&self, settings: &PresentationSettings) -> Presentation {
        self.build_local(settings, &mut self.rng())
    }

    async fn run(
        &self,
        settings: &PresentationSettings,
        shutdown: Option<watch::Receiver<bool>>,
    ) -> Presentation {
        let mut rng = self.rng();

        if let Some(client) = &self.client {
            match self.try_remote(client.as_ref(), settings, shutdown, &mut rng).await {
                Ok(presentation) => {
                    if presentation.slides.len() > settings.max_slides as usize {
                        warn!(
                            slides = presentation.slides.len(),
                            max_slides = settings.max_slides,
                            "Remote deck exceeds the slide budget"
                        );
                    }
                    info!(
                        provider = client.provider_name(),
                        slides = presentation.slides.len(),
                        "Generated presentation remotely"
                    );
                    return presentation;
                }
                Err(e) => {
                    warn!("Remote generation failed, using local generation: {}", e);
                }
            }
        }

        self.build_local(settings, &mut rng)
    }

    async fn try_remote(
        &self,
        client: &dyn ContentClient,
        settings: &PresentationSettings,
        shutdown: Option<watch::Receiver<bool>>,
        rng: &mut StdRng,
    ) -> DeckResult<Presentation> {
        let raw = match shutdown {
            Some(mut shutdown) => {
                if *shutdown.borrow() {
                    return Err(AiError::Cancelled.into());
                }
                tokio::select! {
                    result = client.request(settings) => result?,
                    _ = cancelled(&mut shutdown) => return Err(AiError::Cancelled.into()),
                }
            }
            None => client.request(settings).await?,
        };

        Ok(ResponseParser::try_parse(&raw, settings, rng)?)
    }

    fn build_local<R: Rng + ?Sized>(
        &self,
        settings: &PresentationSettings,
        rng: &mut R,
    ) -> Presentation {
        let analysis = self.analyzer.analyze(&settings.topic, &settings.tone);
        let sections = build_sections(settings, &analysis, rng);
        let balanced = balance(sections, settings.max_slides as usize);

        let presentation = assemble(
            settings.topic.clone(),
            settings,
            balanced.into_slides(),
            Generator::Local,
            None,
        );

        info!(
            slides = presentation.slides.len(),
            max_slides = settings.max_slides,
            "Generated presentation locally"
        );
        presentation
    }
}

/// Resolves once the flag reads true. A dropped sender never cancels.
async fn cancelled(shutdown: &mut watch::Receiver<bool>) {
    loop {
        if *shutdown.borrow_and_update() {
            return;
        }
        if shutdown.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use deck_types::{AiResult, ExtractionStage, SlideKind};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    enum Reply {
        Text(&'static str),
        Fail,
        Hang,
    }

    struct StubClient {
        reply: Reply,
        calls: AtomicUsize,
    }

    impl StubClient {
        fn new(reply: Reply) -> Arc<Self> {
            Arc::new(Self {
                reply,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl ContentClient for StubClient {
        async fn request(&self, _settings: &PresentationSettings) -> AiResult<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.reply {
                Reply::Text(text) => Ok(text.to_string()),
                Reply::Fail => Err(AiError::http(503, "unavailable")),
                Reply::Hang => {
                    tokio::time::sleep(Duration::from_secs(60)).await;
                    Ok(String::new())
                }
            }
        }

        fn provider_name(&self) -> &str {
            "stub"
        }
    }

    fn settings(topic: &str) -> PresentationSettings {
        PresentationSettings {
            topic: topic.to_string(),
            ..PresentationSettings::default()
        }
    }

    const FIVE_SLIDES: &str = r#"```json
{
  "title": "Rust in Production",
  "slides": [
    {"type": "title", "title": "Rust in Production", "subtitle": "Lessons learned"},
    {"type": "introduction", "title": "Why Rust", "content": ["Safety", "Speed"]},
    {"type": "concept", "title": "Ownership", "content": ["One owner"]},
    {"type": "data", "title": "Crash Rates", "content": "Crashes over time", "chartType": "line"},
    {"type": "conclusion", "title": "Takeaways", "content": ["Adopt gradually"]}
  ]
}
```"#;

    #[tokio::test]
    async fn test_remote_json_deck() {
        let client = StubClient::new(Reply::Text(FIVE_SLIDES));
        let generator = DeckGenerator::new(client.clone()).with_seed(1);

        let deck = generator.generate(&settings("Rust")).await;
        assert_eq!(client.calls.load(Ordering::SeqCst), 1);
        assert_eq!(deck.metadata.generator, Generator::Remote);
        assert_eq!(deck.metadata.extraction, Some(ExtractionStage::Json));
        assert_eq!(deck.title, "Rust in Production");
        assert_eq!(
            deck.kinds(),
            [
                SlideKind::Title,
                SlideKind::Introduction,
                SlideKind::Concept,
                SlideKind::Data,
                SlideKind::Conclusion
            ]
        );
    }

    #[tokio::test]
    async fn test_remote_error_falls_back_once() {
        let client = StubClient::new(Reply::Fail);
        let generator = DeckGenerator::new(client.clone());

        let deck = generator.generate(&settings("Rust")).await;
        assert_eq!(client.calls.load(Ordering::SeqCst), 1);
        assert_eq!(deck.metadata.generator, Generator::Local);
        assert_eq!(deck.first_kind(), Some(SlideKind::Title));
    }

    #[tokio::test]
    async fn test_unparseable_response_falls_back() {
        let client = StubClient::new(Reply::Text("I'd rather not."));
        let deck = DeckGenerator::new(client).generate(&settings("Rust")).await;
        assert_eq!(deck.metadata.generator, Generator::Local);
        assert!(deck.metadata.extraction.is_none());
    }

    #[tokio::test]
    async fn test_local_deck_within_budget() {
        let generator = DeckGenerator::local_only();
        let deck = generator
            .generate(&settings("machine learning for healthcare"))
            .await;
        assert!(!generator.has_remote());
        assert_eq!(deck.metadata.generator, Generator::Local);
        assert_eq!(deck.slides.len(), 14);
        assert_eq!(deck.metadata.slide_count, 14);
        assert_eq!(deck.title, "machine learning for healthcare");
    }

    #[tokio::test]
    async fn test_cancelled_before_start_skips_remote() {
        let client = StubClient::new(Reply::Hang);
        let generator = DeckGenerator::new(client.clone());
        let (_tx, rx) = watch::channel(true);

        let deck = generator.generate_with_shutdown(&settings("Rust"), rx).await;
        assert_eq!(client.calls.load(Ordering::SeqCst), 0);
        assert_eq!(deck.metadata.generator, Generator::Local);
    }

    #[tokio::test]
    async fn test_cancel_during_remote_call() {
        let client = StubClient::new(Reply::Hang);
        let generator = DeckGenerator::new(client.clone());
        let (tx, rx) = watch::channel(false);
        let settings = settings("Rust");

        let cancel = async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            let _ = tx.send(true);
        };
        let (deck, ()) = tokio::join!(
            generator.generate_with_shutdown(&settings, rx),
            cancel
        );

        assert_eq!(client.calls.load(Ordering::SeqCst), 1);
        assert_eq!(deck.metadata.generator, Generator::Local);
    }

    #[tokio::test]
    async fn test_dropped_sender_does_not_cancel() {
        let client = StubClient::new(Reply::Text(FIVE_SLIDES));
        let generator = DeckGenerator::new(client);
        let (tx, rx) = watch::channel(false);
        drop(tx);

        let deck = generator.generate_with_shutdown(&settings("Rust"), rx).await;
        assert_eq!(deck.metadata.generator, Generator::Remote);
    }

    #[test]
    fn test_seeded_local_generation_is_reproducible() {
        let generator = DeckGenerator::local_only().with_seed(42);
        let a = generator.generate_local(&settings("quarterly results"));
        let b = generator.generate_local(&settings("quarterly results"));
        assert_eq!(a.slides, b.slides);
    }
}

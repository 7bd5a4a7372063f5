//! Remote response parsing
//!
//! Two stages, tried in order:
//!
//! 1. [`json_stage`]: the response holds the JSON document the prompt asked
//!    for, possibly wrapped in a markdown fence or surrounded by prose.
//! 2. [`text_stage`]: the service ignored the format and wrote slides as free
//!    text. A heuristic grammar recovers what it can.
//!
//! Either stage hands its drafts to the assembler, so both paths produce the
//! same document shape as local generation.

pub mod json_stage;
pub mod text_stage;

use deck_types::{
    ChartType, DataPoint, ExtractionStage, Generator, ImageType, Presentation,
    PresentationSettings, SlideBody, SlideDraft, SlideKind,
};
use rand::Rng;
use tracing::{debug, info, warn};

use crate::assembly::assemble;
use crate::classifier::chart_type_from_text;
use crate::error::ParseFailure;
use crate::sections::subtitle;

/// Content used when a recovered slide has none
pub const PLACEHOLDER_CONTENT: &str = "Content for this slide will be added here.";

/// Slides recovered by one stage, before assembly
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDeck {
    pub title: String,
    pub slides: Vec<SlideDraft>,
    pub stage: ExtractionStage,
}

/// Loose pieces of one recovered slide
#[derive(Debug, Clone, Default)]
pub(crate) struct SlideParts {
    pub kind: Option<SlideKind>,
    pub title: String,
    pub subtitle: Option<String>,
    pub content: Vec<String>,
    pub chart_type: Option<ChartType>,
    pub data_points: Option<Vec<DataPoint>>,
    pub image_type: Option<ImageType>,
    pub notes: Option<String>,
}

impl SlideParts {
    /// Shape the pieces into the typed variant, filling whatever is missing
    pub(crate) fn into_draft<R: Rng + ?Sized>(
        self,
        settings: &PresentationSettings,
        rng: &mut R,
    ) -> SlideDraft {
        let kind = self.kind.unwrap_or(SlideKind::Concept);

        let mut content = self.content;
        if content.is_empty() && kind != SlideKind::Title {
            content.push(PLACEHOLDER_CONTENT.to_string());
        }

        let body = match kind {
            SlideKind::Title => SlideBody::Title {
                subtitle: self
                    .subtitle
                    .filter(|s| !s.trim().is_empty())
                    .unwrap_or_else(|| subtitle(&settings.tone, &settings.audience)),
                content,
            },
            SlideKind::Introduction => SlideBody::Introduction { content },
            SlideKind::Concept => SlideBody::Concept { content },
            SlideKind::Conclusion => SlideBody::Conclusion { content },
            SlideKind::Data => {
                let chart_type = self
                    .chart_type
                    .unwrap_or_else(|| chart_type_from_text(&self.title, &content, rng));
                SlideBody::Data {
                    content: content.join("\n"),
                    chart_type,
                    data_points: self.data_points.filter(|p| !p.is_empty()),
                }
            }
            SlideKind::Example => SlideBody::Example {
                content: content.join("\n"),
                image_type: self.image_type.unwrap_or_default(),
            },
            SlideKind::Qa => SlideBody::Qa {
                content: content.join("\n"),
            },
        };

        SlideDraft::new(self.title, body).with_notes(self.notes.filter(|n| !n.trim().is_empty()))
    }
}

/// Turns raw remote text into a presentation
pub struct ResponseParser;

impl ResponseParser {
    /// Parse a raw response. `None` means neither stage recovered a slide.
    pub fn parse<R: Rng + ?Sized>(
        raw: &str,
        settings: &PresentationSettings,
        rng: &mut R,
    ) -> Option<Presentation> {
        match Self::try_parse(raw, settings, rng) {
            Ok(presentation) => Some(presentation),
            Err(e) => {
                warn!("{}", e);
                None
            }
        }
    }

    /// Parse a raw response, reporting failure as an error
    pub fn try_parse<R: Rng + ?Sized>(
        raw: &str,
        settings: &PresentationSettings,
        rng: &mut R,
    ) -> Result<Presentation, ParseFailure> {
        let deck = Self::extract(raw, settings, rng).ok_or(ParseFailure {
            response_len: raw.len(),
        })?;

        info!(
            stage = ?deck.stage,
            slides = deck.slides.len(),
            "Recovered slides from remote response"
        );

        Ok(assemble(
            deck.title,
            settings,
            deck.slides,
            Generator::Remote,
            Some(deck.stage),
        ))
    }

    /// Run both stages without assembling
    pub fn extract<R: Rng + ?Sized>(
        raw: &str,
        settings: &PresentationSettings,
        rng: &mut R,
    ) -> Option<ParsedDeck> {
        if let Some(deck) = json_stage::parse(raw, settings, rng) {
            return Some(deck);
        }
        debug!("JSON stage found nothing usable, trying text extraction");
        text_stage::parse(raw, settings, rng)
    }
}

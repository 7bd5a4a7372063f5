//! Strict JSON extraction
//!
//! Candidates are tried in order: a ```` ```json ```` fence, a bare fence, then
//! the first balanced `{...}` span. The first one that deserializes into a deck
//! with at least one slide wins.

use std::str::FromStr;
use std::sync::LazyLock;

use deck_types::{
    ChartType, DataPoint, ExtractionStage, ImageType, PresentationSettings, SlideBody, SlideDraft,
    SlideKind,
};
use rand::Rng;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::{ParsedDeck, SlideParts};
use crate::classifier::slide_category_from_heading;
use crate::sections::subtitle;

static JSON_FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```json[ \t]*\r?\n(.*?)```").unwrap());

static BARE_FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```[ \t]*\r?\n(.*?)```").unwrap());

/// The document shape the prompt asks for. Everything but `slides` is optional.
#[derive(Debug, Deserialize)]
struct RawDeck {
    #[serde(default)]
    title: Option<Value>,
    slides: Vec<RawSlide>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSlide {
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    title: Option<Value>,
    #[serde(default)]
    subtitle: Option<Value>,
    #[serde(default)]
    content: Option<Value>,
    #[serde(default)]
    notes: Option<Value>,
    #[serde(default)]
    chart_type: Option<String>,
    #[serde(default)]
    data_points: Option<Value>,
    #[serde(default)]
    image_type: Option<Value>,
}

/// Candidate JSON texts in priority order
pub fn candidates(raw: &str) -> Vec<&str> {
    let mut found = Vec::new();
    if let Some(m) = JSON_FENCE_RE.captures(raw).and_then(|c| c.get(1)) {
        found.push(m.as_str());
    }
    if let Some(m) = BARE_FENCE_RE.captures(raw).and_then(|c| c.get(1)) {
        found.push(m.as_str());
    }
    if let Some(span) = first_object_span(raw) {
        found.push(span);
    }
    found
}

/// First balanced top-level `{...}` span, skipping braces inside strings
pub fn first_object_span(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in raw[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&raw[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Run the JSON stage.
///
/// The deck always opens with a title slide: when the first parsed slide is
/// something else, a title slide is prepended, so the result holds one more
/// slide than the response did.
pub fn parse<R: Rng + ?Sized>(
    raw: &str,
    settings: &PresentationSettings,
    rng: &mut R,
) -> Option<ParsedDeck> {
    for candidate in candidates(raw) {
        match serde_json::from_str::<RawDeck>(candidate.trim()) {
            Ok(deck) if !deck.slides.is_empty() => return Some(map_deck(deck, settings, rng)),
            Ok(_) => debug!("JSON candidate has no slides"),
            Err(e) => debug!("JSON candidate rejected: {}", e),
        }
    }
    None
}

fn map_deck<R: Rng + ?Sized>(
    deck: RawDeck,
    settings: &PresentationSettings,
    rng: &mut R,
) -> ParsedDeck {
    let title = deck
        .title
        .as_ref()
        .and_then(text_of)
        .unwrap_or_else(|| settings.topic.clone());

    let mut slides: Vec<SlideDraft> = deck
        .slides
        .into_iter()
        .enumerate()
        .map(|(index, raw)| map_slide(raw, index, &title, settings, rng))
        .collect();

    if slides.first().map(SlideDraft::kind) != Some(SlideKind::Title) {
        debug!("Remote deck has no leading title slide, adding one");
        slides.insert(
            0,
            SlideDraft::new(
                title.clone(),
                SlideBody::Title {
                    subtitle: subtitle(&settings.tone, &settings.audience),
                    content: Vec::new(),
                },
            ),
        );
    }

    ParsedDeck {
        title,
        slides,
        stage: ExtractionStage::Json,
    }
}

fn map_slide<R: Rng + ?Sized>(
    raw: RawSlide,
    index: usize,
    deck_title: &str,
    settings: &PresentationSettings,
    rng: &mut R,
) -> SlideDraft {
    let heading = raw.title.as_ref().and_then(text_of);

    let kind = raw
        .kind
        .as_deref()
        .and_then(|k| SlideKind::from_str(k).ok())
        .unwrap_or_else(|| slide_category_from_heading(heading.as_deref().unwrap_or_default()));

    let title = heading.unwrap_or_else(|| match kind {
        SlideKind::Title => deck_title.to_string(),
        _ => format!("Slide {}", index + 1),
    });

    SlideParts {
        kind: Some(kind),
        title,
        subtitle: raw.subtitle.as_ref().and_then(text_of),
        content: raw.content.as_ref().map(lines_of).unwrap_or_default(),
        chart_type: raw
            .chart_type
            .as_deref()
            .and_then(|c| ChartType::from_str(c).ok()),
        data_points: raw
            .data_points
            .and_then(|v| serde_json::from_value::<Vec<DataPoint>>(v).ok()),
        image_type: raw
            .image_type
            .and_then(|v| serde_json::from_value::<ImageType>(v).ok()),
        notes: raw.notes.as_ref().and_then(text_of),
    }
    .into_draft(settings, rng)
}

/// Scalar JSON value as trimmed text
fn text_of(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

/// Content as lines: a string is one line, an array is one line per item
fn lines_of(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                Value::Object(_) | Value::Array(_) => Some(item.to_string()),
                scalar => text_of(scalar),
            })
            .collect(),
        other => text_of(other).into_iter().collect(),
    }
}

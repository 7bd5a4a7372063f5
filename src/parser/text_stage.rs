//! Heuristic free-text extraction
//!
//! Sections are cut at `Slide N:` markers (`## Slide N:` and `N. Slide:` also
//! count); without markers, at markdown headings. The first kept section is the
//! title slide. Inside a section:
//!
//! - the first line is the heading
//! - a notes marker switches every following line to speaker notes
//! - bullet lines become content with the marker stripped
//! - other text is kept only while the content is still empty
//! - data and example sections pick up the first chart or image hint
//!
//! Lines that fit none of these are dropped.

use std::sync::LazyLock;

use deck_types::{ExtractionStage, PresentationSettings, SlideDraft, SlideKind};
use rand::Rng;
use regex::Regex;
use tracing::debug;

use super::{ParsedDeck, SlideParts};
use crate::classifier::{chart_hint_from_line, image_hint_from_line, slide_category_from_heading};

static SLIDE_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:#+[ \t]*)?Slide\s+\d+\s*:|\d+\.\s+Slide\s*:").unwrap()
});

/// `# Title` line, one hash only
static DECK_TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#[ \t]+(.+?)[ \t]*\r?$").unwrap());

static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^#{1,3}[ \t]+\S").unwrap());

/// A list marker and the whitespace after it; the text itself may start with digits
static BULLET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[-*•]|\d+\.)\s+").unwrap());

/// Run the text stage
pub fn parse<R: Rng + ?Sized>(
    raw: &str,
    settings: &PresentationSettings,
    rng: &mut R,
) -> Option<ParsedDeck> {
    let sections = if SLIDE_MARKER_RE.is_match(raw) {
        marker_sections(raw)
    } else {
        heading_sections(raw)
    };

    let mut slides: Vec<SlideDraft> = Vec::with_capacity(sections.len());
    for lines in &sections {
        let Some((first, body)) = lines.split_first() else {
            continue;
        };
        let heading = clean_heading(first);
        if heading.is_empty() {
            continue;
        }
        let kind = if slides.is_empty() {
            SlideKind::Title
        } else {
            slide_category_from_heading(&heading)
        };
        slides.push(parse_section(kind, heading, body).into_draft(settings, rng));
    }

    if slides.is_empty() {
        debug!("Text stage found no slide sections");
        return None;
    }

    Some(ParsedDeck {
        title: deck_title(raw).unwrap_or_else(|| settings.topic.clone()),
        slides,
        stage: ExtractionStage::Text,
    })
}

/// Lines with some text on them; bare markup such as `**` or `---` is skipped
fn has_text(line: &str) -> bool {
    line.chars().any(char::is_alphanumeric)
}

fn section_lines(block: &str) -> Vec<String> {
    block
        .lines()
        .map(str::trim)
        .filter(|l| has_text(l))
        .map(str::to_string)
        .collect()
}

/// Text after each marker, preamble dropped
fn marker_sections(raw: &str) -> Vec<Vec<String>> {
    SLIDE_MARKER_RE
        .split(raw)
        .skip(1)
        .map(section_lines)
        .collect()
}

/// One section per markdown heading, text before the first heading dropped
fn heading_sections(raw: &str) -> Vec<Vec<String>> {
    let mut sections: Vec<Vec<String>> = Vec::new();
    for line in raw.lines().map(str::trim).filter(|l| has_text(l)) {
        if HEADING_RE.is_match(line) {
            sections.push(vec![line.to_string()]);
        } else if let Some(current) = sections.last_mut() {
            current.push(line.to_string());
        }
    }
    sections
}

fn deck_title(raw: &str) -> Option<String> {
    DECK_TITLE_RE
        .captures_iter(raw)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().trim())
        .find(|t| !t.is_empty() && !SLIDE_MARKER_RE.is_match(t))
        .map(str::to_string)
}

fn clean_heading(line: &str) -> String {
    line.trim_start_matches('#')
        .trim_matches(|c: char| c == '*' || c.is_whitespace())
        .to_string()
}

fn is_bullet(line: &str) -> bool {
    BULLET_RE.is_match(line)
}

fn is_notes_marker(line: &str) -> bool {
    let lower = line.to_lowercase();
    lower.contains("speaker notes") || lower.contains("speaking notes") || lower.starts_with("note:")
}

/// Text following a notes marker's colon, if any
fn notes_remainder(line: &str) -> Option<String> {
    let (_, rest) = line.split_once(':')?;
    let rest = rest.trim_matches(|c: char| c == '*' || c.is_whitespace());
    (!rest.is_empty()).then(|| rest.to_string())
}

fn parse_section(kind: SlideKind, heading: String, body: &[String]) -> SlideParts {
    let mut body = body;
    let mut subtitle = None;

    if kind == SlideKind::Title {
        if let Some(first) = body.first() {
            if !is_bullet(first) && !is_notes_marker(first) {
                subtitle = Some(
                    first
                        .trim_start_matches(|c: char| matches!(c, '#' | '*' | '-') || c.is_whitespace())
                        .trim()
                        .to_string(),
                );
                body = &body[1..];
            }
        }
    }

    let mut content: Vec<String> = Vec::new();
    let mut notes: Vec<String> = Vec::new();
    let mut chart_type = None;
    let mut image_type = None;
    let mut in_notes = false;

    for line in body {
        if is_notes_marker(line) {
            in_notes = true;
            notes.extend(notes_remainder(line));
            continue;
        }

        if kind == SlideKind::Data && chart_type.is_none() {
            chart_type = chart_hint_from_line(line);
        }
        if kind == SlideKind::Example && image_type.is_none() {
            image_type = image_hint_from_line(line);
        }

        if in_notes {
            notes.push(line.clone());
        } else if is_bullet(line) {
            let bullet = BULLET_RE.replace(line, "").trim().to_string();
            if !bullet.is_empty() {
                content.push(bullet);
            }
        } else if !line.starts_with('#') && content.is_empty() {
            content.push(line.clone());
        }
    }

    SlideParts {
        kind: Some(kind),
        title: heading,
        subtitle,
        content,
        chart_type,
        data_points: None,
        image_type,
        notes: (!notes.is_empty()).then(|| notes.join(" ")),
    }
}

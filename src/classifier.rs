//! Slide classification heuristics
//!
//! Keyword cascades shared by the section builders and the response parser.
//! Every function is total. The only non-determinism is the chart fallback
//! draw when no keyword matches, and it goes through the caller's `Rng`.

use deck_types::{ChartType, ImageType, SlideKind};
use rand::Rng;

use crate::analysis::Fact;

/// Fallback pool for free text: bar and line twice as likely as pie and flow
const TEXT_FALLBACK_POOL: [ChartType; 6] = [
    ChartType::Bar,
    ChartType::Bar,
    ChartType::Line,
    ChartType::Line,
    ChartType::Pie,
    ChartType::Flow,
];

/// Fallback pool for facts, no flow charts for numeric series
const FACT_FALLBACK_POOL: [ChartType; 5] = [
    ChartType::Bar,
    ChartType::Bar,
    ChartType::Line,
    ChartType::Line,
    ChartType::Pie,
];

const BAR_WORDS: &[&str] = &["comparison", "versus", " vs "];
const LINE_WORDS: &[&str] = &["trend", "growth", "time", "over", "increase"];
const PIE_WORDS: &[&str] = &["distribution", "breakdown", "share", "segment", "percentage"];
const FLOW_WORDS: &[&str] = &["flow", "process", "step", "workflow"];

const TIME_KEYS: &[&str] = &["year", "date", "time", "period"];
const GROUP_KEYS: &[&str] = &["category", "group", "type"];
const SHARE_KEYS: &[&str] = &["percentage", "share", "portion"];

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

/// Keyword cascade over already lower-cased text, in fixed priority order
fn chart_type_from_keywords(text: &str) -> Option<ChartType> {
    if contains_any(text, BAR_WORDS) {
        Some(ChartType::Bar)
    } else if contains_any(text, LINE_WORDS) {
        Some(ChartType::Line)
    } else if contains_any(text, PIE_WORDS) {
        Some(ChartType::Pie)
    } else if contains_any(text, FLOW_WORDS) {
        Some(ChartType::Flow)
    } else {
        None
    }
}

fn draw<R: Rng + ?Sized>(pool: &[ChartType], rng: &mut R) -> ChartType {
    pool[rng.gen_range(0..pool.len())]
}

/// Chart type for a slide's title and content
pub fn chart_type_from_text<R: Rng + ?Sized>(
    title: &str,
    content: &[String],
    rng: &mut R,
) -> ChartType {
    let combined = format!("{} {}", title, content.join(" ")).to_lowercase();
    chart_type_from_keywords(&combined).unwrap_or_else(|| draw(&TEXT_FALLBACK_POOL, rng))
}

/// Chart type for an analyzer fact: keywords first, then the shape of its data
pub fn chart_type_from_fact<R: Rng + ?Sized>(fact: &Fact, rng: &mut R) -> ChartType {
    let combined = format!("{} {}", fact.title, fact.description).to_lowercase();
    if let Some(chart) = chart_type_from_keywords(&combined) {
        return chart;
    }

    let has_key = |keys: &[&str]| {
        fact.data
            .iter()
            .any(|point| keys.iter().any(|k| point.has_key(k)))
    };

    if has_key(TIME_KEYS) {
        ChartType::Line
    } else if has_key(GROUP_KEYS) {
        ChartType::Bar
    } else if has_key(SHARE_KEYS) {
        ChartType::Pie
    } else {
        draw(&FACT_FALLBACK_POOL, rng)
    }
}

/// Explicit chart hint inside one line of free text, if any
pub fn chart_hint_from_line(line: &str) -> Option<ChartType> {
    let line = line.to_lowercase();
    if line.contains("bar chart") || line.contains("column chart") {
        Some(ChartType::Bar)
    } else if line.contains("line chart") || line.contains("trend") {
        Some(ChartType::Line)
    } else if line.contains("pie chart") || line.contains("distribution") {
        Some(ChartType::Pie)
    } else if line.contains("flow chart") || line.contains("process") {
        Some(ChartType::Flow)
    } else {
        None
    }
}

/// Image treatment named inside one line of an example section, if any
pub fn image_hint_from_line(line: &str) -> Option<ImageType> {
    let line = line.to_lowercase();
    contains_any(&line, &["image", "figure", "photo"]).then_some(ImageType::CaseStudy)
}

/// Slide category implied by a heading, defaulting to `concept`
pub fn slide_category_from_heading(heading: &str) -> SlideKind {
    let heading = heading.to_lowercase();
    if heading.contains("title") {
        SlideKind::Title
    } else if heading.contains("introduction") || heading.contains("intro") {
        SlideKind::Introduction
    } else if heading.contains("conclusion") {
        SlideKind::Conclusion
    } else if heading.contains("q&a") || heading.contains("question") {
        SlideKind::Qa
    } else if heading.contains("case study") || heading.contains("example") {
        SlideKind::Example
    } else if contains_any(
        &heading,
        &["data", "statistics", "chart", "graph", "figure"],
    ) {
        SlideKind::Data
    } else {
        SlideKind::Concept
    }
}

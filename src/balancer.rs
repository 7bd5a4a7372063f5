//! Slide budget balancing
//!
//! Shrinks a deck toward `maxSlides` by merging consecutive slides inside the
//! low-priority groups. Text is relocated, never dropped. Title, introduction,
//! conclusion, and Q&A are never touched, so a very small budget can still be
//! exceeded after every pass has run.

use deck_types::{ImageType, SlideBody, SlideDraft};
use tracing::debug;

use crate::sections::Sections;

/// Merge passes applied in order until the deck fits
pub fn balance(mut sections: Sections, target: usize) -> Sections {
    if sections.total() <= target {
        return sections;
    }

    let n = sections.examples.len();
    if n > 1 {
        sections.examples = merge_groups(
            std::mem::take(&mut sections.examples),
            n.div_ceil(2),
            merge_examples,
        );
        debug!(from = n, to = sections.examples.len(), "Merged example slides");
        if sections.total() <= target {
            return sections;
        }
    }

    let n = sections.key_concepts.len();
    if n > 1 {
        sections.key_concepts = merge_groups(
            std::mem::take(&mut sections.key_concepts),
            n.div_ceil(2),
            merge_concepts,
        );
        debug!(from = n, to = sections.key_concepts.len(), "Merged concept slides");
        if sections.total() <= target {
            return sections;
        }
    }

    let n = sections.data.len();
    if n > 1 {
        sections.data = merge_groups(std::mem::take(&mut sections.data), n.min(2), merge_data);
        debug!(from = n, to = sections.data.len(), "Merged data slides");
    }

    if sections.total() > target {
        debug!(
            slides = sections.total(),
            target, "Deck still over budget after balancing"
        );
    }
    sections
}

/// Split into runs of `ceil(n / groups)` consecutive slides and merge each run
fn merge_groups(
    slides: Vec<SlideDraft>,
    groups: usize,
    merge: fn(&[SlideDraft]) -> SlideDraft,
) -> Vec<SlideDraft> {
    let size = slides.len().div_ceil(groups.max(1)).max(1);
    slides
        .chunks(size)
        .map(|chunk| match chunk {
            [single] => single.clone(),
            many => merge(many),
        })
        .collect()
}

fn merged_notes(sources: &[SlideDraft], title: &str) -> Option<String> {
    sources.iter().any(|s| s.notes.is_some()).then(|| {
        format!(
            "This slide combines multiple points about {} for brevity. Each point deserves attention, so consider addressing them individually.",
            title.to_lowercase()
        )
    })
}

/// `"{title}: {text}"` per source, one per line
fn labeled_lines(sources: &[SlideDraft]) -> String {
    sources
        .iter()
        .map(|s| format!("{}: {}", s.title, s.body.content_lines().join(" ")))
        .collect::<Vec<_>>()
        .join("\n")
}

fn merge_concepts(sources: &[SlideDraft]) -> SlideDraft {
    let title = format!(
        "Key Concepts: {}",
        sources
            .iter()
            .map(|s| s.title.as_str())
            .collect::<Vec<_>>()
            .join(" & ")
    );

    let mut content = Vec::new();
    for source in sources {
        content.push(source.title.clone());
        content.extend(
            source
                .body
                .content_lines()
                .into_iter()
                .map(|bullet| format!("  - {}", bullet)),
        );
    }

    let notes = merged_notes(sources, &title);
    SlideDraft::new(title, SlideBody::Concept { content }).with_notes(notes)
}

fn merge_data(sources: &[SlideDraft]) -> SlideDraft {
    let title = "Key Data Points".to_string();
    let chart_type = sources
        .iter()
        .find_map(|s| s.body.chart_type())
        .unwrap_or(deck_types::ChartType::Bar);

    let points: Vec<_> = sources
        .iter()
        .filter_map(|s| match &s.body {
            SlideBody::Data { data_points, .. } => data_points.clone(),
            _ => None,
        })
        .flatten()
        .collect();

    let notes = merged_notes(sources, &title);
    SlideDraft::new(
        title,
        SlideBody::Data {
            content: labeled_lines(sources),
            chart_type,
            data_points: (!points.is_empty()).then_some(points),
        },
    )
    .with_notes(notes)
}

fn merge_examples(sources: &[SlideDraft]) -> SlideDraft {
    let title = "Examples".to_string();
    let notes = merged_notes(sources, &title);
    SlideDraft::new(
        title,
        SlideBody::Example {
            content: labeled_lines(sources),
            image_type: ImageType::CaseStudy,
        },
    )
    .with_notes(notes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::TopicAnalyzer;
    use crate::sections::build_sections;
    use deck_types::{ChartType, PresentationSettings, SlideKind};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sections(topic: &str, include_notes: bool) -> Sections {
        let settings = PresentationSettings {
            topic: topic.to_string(),
            include_notes,
            ..PresentationSettings::default()
        };
        let analysis = TopicAnalyzer::new().analyze(topic, &settings.tone);
        build_sections(&settings, &analysis, &mut StdRng::seed_from_u64(3))
    }

    #[test]
    fn test_within_budget_is_untouched() {
        let original = sections("machine learning for healthcare", true);
        let balanced = balance(original.clone(), 20);
        assert_eq!(balanced, original);
    }

    #[test]
    fn test_examples_merged_first() {
        // 16 slides, one over budget: halving examples is enough
        let balanced = balance(sections("machine learning for healthcare", true), 15);
        assert_eq!(balanced.examples.len(), 2);
        assert_eq!(balanced.key_concepts.len(), 3);
        assert_eq!(balanced.data.len(), 5);
        assert_eq!(balanced.total(), 14);
        assert!(balanced.examples.iter().all(|s| s.title == "Examples"));
    }

    #[test]
    fn test_all_passes_for_small_budget() {
        let balanced = balance(sections("machine learning for healthcare", true), 8);
        assert_eq!(balanced.examples.len(), 2);
        assert_eq!(balanced.key_concepts.len(), 2);
        assert_eq!(balanced.data.len(), 2);
        // title, intro, conclusion, qa plus six merged slides
        assert_eq!(balanced.total(), 10);
    }

    #[test]
    fn test_concept_merge_shape() {
        let balanced = balance(sections("machine learning for healthcare", true), 11);
        let first = &balanced.key_concepts[0];
        assert_eq!(
            first.title,
            "Key Concepts: Machine Principles & Learning Applications"
        );
        match &first.body {
            SlideBody::Concept { content } => {
                assert_eq!(content[0], "Machine Principles");
                assert_eq!(content[1], "  - Definition and importance of machine principles");
                assert_eq!(content[4], "Learning Applications");
            }
            other => panic!("expected concept slide, got {:?}", other.kind()),
        }
        // odd count leaves the last concept as it was
        assert_eq!(balanced.key_concepts[1].title, "Healthcare Integration");
    }

    #[test]
    fn test_data_merge_keeps_series_and_first_chart() {
        let original = sections("cloud security", false);
        let first_chart = original.data[0].body.chart_type();
        let total_points: usize = original
            .data
            .iter()
            .filter_map(|s| match &s.body {
                SlideBody::Data { data_points, .. } => data_points.as_ref().map(Vec::len),
                _ => None,
            })
            .sum();

        let balanced = balance(original, 1);
        assert_eq!(balanced.data.len(), 2);
        assert_eq!(balanced.data[0].body.chart_type(), first_chart);
        assert_eq!(balanced.data[0].kind(), SlideKind::Data);

        let merged_points: usize = balanced
            .data
            .iter()
            .filter_map(|s| match &s.body {
                SlideBody::Data { data_points, .. } => data_points.as_ref().map(Vec::len),
                _ => None,
            })
            .sum();
        assert_eq!(merged_points, total_points);
    }

    #[test]
    fn test_merged_notes_follow_sources() {
        let with_notes = balance(sections("cloud security", true), 1);
        assert!(with_notes.examples[0]
            .notes
            .as_deref()
            .is_some_and(|n| n.contains("combines multiple points about examples")));

        let without = balance(sections("cloud security", false), 1);
        assert!(without.examples.iter().all(|s| s.notes.is_none()));
    }

    #[test]
    fn test_single_slide_groups_untouched() {
        let mut s = Sections::default();
        s.data.push(SlideDraft::new(
            "Only Fact",
            SlideBody::Data {
                content: "One".to_string(),
                chart_type: ChartType::Pie,
                data_points: None,
            },
        ));
        let balanced = balance(s.clone(), 0);
        assert_eq!(balanced, s);
    }
}

//! Property tests for local generation and slide balancing
//!
//! Run with: cargo test --test balancer_properties

use deckgen::analysis::TopicAnalyzer;
use deckgen::balancer::balance;
use deckgen::sections::{build_sections, Sections};
use deckgen::{DeckGenerator, PresentationSettings, SlideKind};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Fewest slides the merge passes can reach for any topic
const FLOOR: usize = 10;

fn arb_topic() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop::sample::select(vec![
            "cloud", "security", "machine", "learning", "for", "the", "with", "data", "AI",
            "supply", "chains", "renewable", "energy", "storage",
        ]),
        1..5,
    )
    .prop_map(|words| words.join(" "))
}

fn arb_settings() -> impl Strategy<Value = PresentationSettings> {
    (arb_topic(), 1u32..25, any::<bool>()).prop_map(|(topic, max_slides, include_notes)| {
        PresentationSettings {
            topic,
            max_slides,
            include_notes,
            ..PresentationSettings::default()
        }
    })
}

fn build(settings: &PresentationSettings, seed: u64) -> Sections {
    let analysis = TopicAnalyzer::new().analyze(&settings.topic, &settings.tone);
    build_sections(settings, &analysis, &mut StdRng::seed_from_u64(seed))
}

/// Every line of text a group of slides carries, titles included
fn texts(sections: &Sections) -> Vec<String> {
    sections
        .key_concepts
        .iter()
        .chain(&sections.data)
        .chain(&sections.examples)
        .flat_map(|s| {
            std::iter::once(s.title.clone()).chain(s.body.content_lines())
        })
        .collect()
}

proptest! {
    #[test]
    fn ids_match_positions(settings in arb_settings(), seed in any::<u64>()) {
        let deck = DeckGenerator::local_only().with_seed(seed).generate_local(&settings);
        for (position, slide) in deck.slides.iter().enumerate() {
            prop_assert_eq!(slide.id as usize, position + 1);
        }
        prop_assert_eq!(deck.first_kind(), Some(SlideKind::Title));
        prop_assert_eq!(deck.metadata.slide_count, deck.slides.len());
    }

    #[test]
    fn deck_respects_budget_best_effort(settings in arb_settings(), seed in any::<u64>()) {
        let unbalanced = build(&settings, seed).total();
        let deck = DeckGenerator::local_only().with_seed(seed).generate_local(&settings);
        let budget = settings.max_slides as usize;

        prop_assert!(deck.slides.len() <= budget.max(FLOOR));
        if unbalanced <= budget {
            prop_assert_eq!(deck.slides.len(), unbalanced);
        }
    }

    #[test]
    fn notes_follow_setting(settings in arb_settings()) {
        let deck = DeckGenerator::local_only().with_seed(0).generate_local(&settings);
        prop_assert!(deck
            .slides
            .iter()
            .all(|s| s.notes.is_some() == settings.include_notes));
    }

    #[test]
    fn balancing_relocates_every_line(settings in arb_settings(), seed in any::<u64>()) {
        let original = build(&settings, seed);
        let before = texts(&original);
        let balanced = balance(original, settings.max_slides as usize);

        let after: Vec<String> = balanced
            .key_concepts
            .iter()
            .chain(&balanced.data)
            .chain(&balanced.examples)
            .map(|s| format!("{}\n{}", s.title, s.body.content_lines().join("\n")))
            .collect();

        for line in &before {
            prop_assert!(
                after.iter().any(|text| text.contains(line.as_str())),
                "lost line: {}",
                line
            );
        }
    }
}

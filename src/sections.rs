//! Section builders
//!
//! One pure builder per slide category. Builders never truncate and never
//! assign ids; the balancer and the assembler own those concerns.

use deck_types::{Audience, ImageType, PresentationSettings, SlideBody, SlideDraft, Tone};
use rand::Rng;

use crate::analysis::TopicAnalysis;
use crate::classifier::chart_type_from_fact;

/// Placeholder contact line on the Q&A slide
pub const CONTACT_LINE: &str = "Contact Information: your.email@example.com";

/// Slide groups in deck order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Sections {
    pub title: Vec<SlideDraft>,
    pub introduction: Vec<SlideDraft>,
    pub key_concepts: Vec<SlideDraft>,
    pub data: Vec<SlideDraft>,
    pub examples: Vec<SlideDraft>,
    pub conclusion: Vec<SlideDraft>,
    pub qa: Vec<SlideDraft>,
}

impl Sections {
    /// Flattened slide count
    pub fn total(&self) -> usize {
        self.title.len()
            + self.introduction.len()
            + self.key_concepts.len()
            + self.data.len()
            + self.examples.len()
            + self.conclusion.len()
            + self.qa.len()
    }

    /// Flatten into deck order
    pub fn into_slides(self) -> Vec<SlideDraft> {
        let mut slides = Vec::with_capacity(self.total());
        slides.extend(self.title);
        slides.extend(self.introduction);
        slides.extend(self.key_concepts);
        slides.extend(self.data);
        slides.extend(self.examples);
        slides.extend(self.conclusion);
        slides.extend(self.qa);
        slides
    }
}

/// Build every section for a topic analysis
pub fn build_sections<R: Rng + ?Sized>(
    settings: &PresentationSettings,
    analysis: &TopicAnalysis,
    rng: &mut R,
) -> Sections {
    Sections {
        title: vec![title_slide(settings)],
        introduction: vec![introduction_slide(settings)],
        key_concepts: concept_slides(settings, analysis),
        data: data_slides(settings, analysis, rng),
        examples: example_slides(settings, analysis),
        conclusion: vec![conclusion_slide(settings)],
        qa: vec![qa_slide(settings)],
    }
}

fn notes_if(settings: &PresentationSettings, notes: impl FnOnce() -> String) -> Option<String> {
    settings.include_notes.then(notes)
}

pub fn title_slide(settings: &PresentationSettings) -> SlideDraft {
    SlideDraft::new(
        capitalize_words(&settings.topic),
        SlideBody::Title {
            subtitle: subtitle(&settings.tone, &settings.audience),
            content: Vec::new(),
        },
    )
    .with_notes(notes_if(settings, || {
        format!(
            "Welcome everyone to this presentation on {}. Today we'll be exploring the key aspects of this topic and discussing its implications.",
            settings.topic
        )
    }))
}

pub fn introduction_slide(settings: &PresentationSettings) -> SlideDraft {
    SlideDraft::new(
        "Introduction",
        SlideBody::Introduction {
            content: vec![
                format!("Overview of {}", capitalize_words(&settings.topic)),
                "Key challenges and opportunities".to_string(),
                format!("Why this matters to {}", settings.audience),
            ],
        },
    )
    .with_notes(notes_if(settings, || {
        format!(
            "This introduction sets the stage for our discussion. The goal is to provide context about why {} is relevant to {} and what key challenges and opportunities exist in this space.",
            settings.topic, settings.audience
        )
    }))
}

pub fn concept_slides(settings: &PresentationSettings, analysis: &TopicAnalysis) -> Vec<SlideDraft> {
    analysis
        .main_concepts
        .iter()
        .map(|concept| {
            SlideDraft::new(
                capitalize_words(concept),
                SlideBody::Concept {
                    content: vec![
                        format!("Definition and importance of {}", concept),
                        "Current trends and developments".to_string(),
                        format!("Impact on {}", settings.audience),
                    ],
                },
            )
            .with_notes(notes_if(settings, || {
                format!(
                    "When discussing {}, emphasize how it specifically impacts {}. This concept is fundamental to understanding the broader topic.",
                    concept, settings.audience
                )
            }))
        })
        .collect()
}

pub fn data_slides<R: Rng + ?Sized>(
    settings: &PresentationSettings,
    analysis: &TopicAnalysis,
    rng: &mut R,
) -> Vec<SlideDraft> {
    analysis
        .facts
        .iter()
        .map(|fact| {
            SlideDraft::new(
                fact.title.clone(),
                SlideBody::Data {
                    content: fact.description.clone(),
                    chart_type: chart_type_from_fact(fact, rng),
                    data_points: (!fact.data.is_empty()).then(|| fact.data.clone()),
                },
            )
            .with_notes(notes_if(settings, || {
                format!(
                    "These statistics highlight the significance of {}. The data demonstrates {}.",
                    fact.title.to_lowercase(),
                    fact.interpretation
                )
            }))
        })
        .collect()
}

pub fn example_slides(settings: &PresentationSettings, analysis: &TopicAnalysis) -> Vec<SlideDraft> {
    analysis
        .examples
        .iter()
        .map(|example| {
            SlideDraft::new(
                example.title.clone(),
                SlideBody::Example {
                    content: example.description.clone(),
                    image_type: ImageType::CaseStudy,
                },
            )
            .with_notes(notes_if(settings, || {
                format!(
                    "This example of {} illustrates the practical application of the concepts we've discussed. It's particularly relevant for {}.",
                    example.title, settings.audience
                )
            }))
        })
        .collect()
}

pub fn conclusion_slide(settings: &PresentationSettings) -> SlideDraft {
    SlideDraft::new(
        "Conclusion",
        SlideBody::Conclusion {
            content: vec![
                format!("Summary of key points about {}", settings.topic),
                format!("Implications for {}", settings.audience),
                "Recommended next steps and actions".to_string(),
            ],
        },
    )
    .with_notes(notes_if(settings, || {
        format!(
            "Summarize the key takeaways and emphasize the specific action items that {} should consider. This reinforces the practical value of the presentation.",
            settings.audience
        )
    }))
}

pub fn qa_slide(settings: &PresentationSettings) -> SlideDraft {
    SlideDraft::new(
        "Questions?",
        SlideBody::Qa {
            content: CONTACT_LINE.to_string(),
        },
    )
    .with_notes(notes_if(settings, || {
        "Be prepared to address questions about specific aspects of the topic. Have additional data points ready to support your main arguments if needed.".to_string()
    }))
}

fn tone_phrase(tone: &Tone) -> &'static str {
    match tone {
        Tone::Formal => "A Comprehensive Analysis",
        Tone::Casual => "Exploring Key Insights",
        Tone::Persuasive => "Why It Matters and How to Respond",
        Tone::Informative => "Facts, Trends, and Implications",
        Tone::Inspirational => "Opportunities and Possibilities",
        Tone::Analytical => "Data-Driven Assessment",
        Tone::Enthusiastic => "Exciting Developments and Possibilities",
        Tone::Authoritative => "Expert Insights and Strategic Overview",
        Tone::Conversational => "Let's Talk About What Matters",
        Tone::Other(_) => "Key Insights and Analysis",
    }
}

fn audience_phrase(audience: &Audience) -> Option<&'static str> {
    match audience {
        Audience::Executives => Some("Strategic Considerations for Leadership"),
        Audience::Managers => Some("Implementation Strategies and Outcomes"),
        Audience::Clients => Some("Benefits and Opportunities"),
        Audience::Technical => Some("Technical Analysis and Applications"),
        Audience::Students => Some("Learning and Development Framework"),
        Audience::General => Some("Key Principles and Applications"),
        Audience::Investors => Some("Value Proposition and Growth Potential"),
        Audience::Stakeholders => Some("Impact Analysis and Future Direction"),
        Audience::TeamMembers => Some("Collaborative Approach and Implementation"),
        Audience::Other(_) => None,
    }
}

/// `"{tone phrase}: {audience phrase}"`, or the tone phrase alone
pub fn subtitle(tone: &Tone, audience: &Audience) -> String {
    let tone_part = tone_phrase(tone);
    match audience_phrase(audience) {
        Some(audience_part) => format!("{}: {}", tone_part, audience_part),
        None => tone_part.to_string(),
    }
}

/// Upper-case the first character of every space-separated word
pub fn capitalize_words(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

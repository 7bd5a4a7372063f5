//! Final deck assembly
//!
//! The one place slide ids are handed out. Also stamps the template design,
//! attaches visual hints, and applies the speaker-notes policy so that local
//! and remote decks come out in the same shape.

use chrono::Utc;
use deck_types::{
    ExtractionStage, Generator, Presentation, PresentationMetadata, PresentationSettings, Slide,
    SlideDraft, SlideKind, Template, Visual, VisualKind, PRESENTATION_VERSION,
};
use tracing::{debug, warn};

/// Turn ordered drafts into the output document
pub fn assemble(
    title: impl Into<String>,
    settings: &PresentationSettings,
    drafts: Vec<SlideDraft>,
    generator: Generator,
    extraction: Option<ExtractionStage>,
) -> Presentation {
    let template = match Template::get(&settings.template) {
        Some(template) => template,
        None => {
            warn!(
                "Unknown template '{}', using '{}'",
                settings.template,
                Template::resolve(&settings.template).key
            );
            Template::resolve(&settings.template)
        }
    };
    let design = template.design();

    let slides: Vec<Slide> = drafts
        .into_iter()
        .zip(1u32..)
        .map(|(draft, id)| {
            let visual = visual_for(&draft);
            let SlideDraft { title, body, notes } = draft;
            let notes = if settings.include_notes {
                Some(notes.unwrap_or_else(|| default_notes(body.kind(), &title, settings)))
            } else {
                None
            };

            Slide {
                id,
                title,
                notes,
                body,
                design: Some(design.clone()),
                visual: Some(visual),
            }
        })
        .collect();

    debug!(
        slides = slides.len(),
        template = template.key,
        %generator,
        "Assembled presentation"
    );

    Presentation {
        title: title.into(),
        settings: settings.clone(),
        metadata: PresentationMetadata {
            slide_count: slides.len(),
            date_created: Utc::now(),
            version: PRESENTATION_VERSION.to_string(),
            generator,
            extraction,
        },
        slides,
    }
}

/// Rendering hint for a slide
pub fn visual_for(slide: &SlideDraft) -> Visual {
    let (kind, description) = match slide.kind() {
        SlideKind::Title => (
            VisualKind::Background,
            "Subtle gradient background with company logo".to_string(),
        ),
        SlideKind::Data => {
            let chart = slide
                .body
                .chart_type()
                .map(|c| c.as_str())
                .unwrap_or("chart");
            (
                VisualKind::Chart,
                format!("{} showing {}", chart, slide.title.to_lowercase()),
            )
        }
        SlideKind::Concept => (
            VisualKind::Icon,
            format!("Icon representing the concept of {}", slide.title),
        ),
        SlideKind::Example => (
            VisualKind::Image,
            format!("Image illustrating {}", slide.title),
        ),
        SlideKind::Conclusion => (VisualKind::Icon, "Summary icon or graphic".to_string()),
        SlideKind::Qa => (
            VisualKind::Icon,
            "Question mark icon or contact information graphic".to_string(),
        ),
        SlideKind::Introduction => (VisualKind::None, "No visual element".to_string()),
    };

    Visual {
        kind,
        chart_type: slide.body.chart_type(),
        description,
    }
}

/// Speaker notes for a slide that arrived without any
pub fn default_notes(kind: SlideKind, title: &str, settings: &PresentationSettings) -> String {
    let topic = &settings.topic;
    let audience = &settings.audience;
    match kind {
        SlideKind::Title => format!(
            "Welcome everyone to this presentation on {}. Today we'll be exploring the key aspects of this topic and how it impacts {}.",
            topic, audience
        ),
        SlideKind::Introduction => format!(
            "This introduction sets the context for our discussion about {}. We'll explore why this is relevant for {} and what the key challenges and opportunities are.",
            topic, audience
        ),
        SlideKind::Concept => format!(
            "When discussing {}, emphasize how it specifically impacts {}. This concept is fundamental to understanding {}.",
            title.to_lowercase(),
            audience,
            topic
        ),
        SlideKind::Data => format!(
            "These statistics provide concrete evidence of the impact and trends related to {}. Point out the key insights from this visualization that are most relevant to {}.",
            topic, audience
        ),
        SlideKind::Example => format!(
            "This example demonstrates a practical application of {}. Highlight the specific aspects that would be most interesting to {}.",
            topic, audience
        ),
        SlideKind::Conclusion => format!(
            "Summarize the key takeaways about {} and provide clear next steps or recommendations for {}.",
            topic, audience
        ),
        SlideKind::Qa => format!(
            "Be prepared to address questions about specific aspects of {}. Have additional data points ready to support your main arguments if needed.",
            topic
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deck_types::{ChartType, SlideBody};

    fn settings() -> PresentationSettings {
        PresentationSettings {
            topic: "Data Mesh".to_string(),
            template: "tech".to_string(),
            ..PresentationSettings::default()
        }
    }

    fn drafts() -> Vec<SlideDraft> {
        vec![
            SlideDraft::new(
                "Data Mesh",
                SlideBody::Title {
                    subtitle: "Owning your data".to_string(),
                    content: vec![],
                },
            )
            .with_notes(Some("Custom opener".to_string())),
            SlideDraft::new(
                "Domain Ownership",
                SlideBody::Concept {
                    content: vec!["Teams own data products".to_string()],
                },
            ),
            SlideDraft::new(
                "Query Volume",
                SlideBody::Data {
                    content: "Queries per day".to_string(),
                    chart_type: ChartType::Line,
                    data_points: None,
                },
            ),
        ]
    }

    #[test]
    fn test_ids_are_dense_and_one_based() {
        let deck = assemble("Data Mesh", &settings(), drafts(), Generator::Local, None);
        let ids: Vec<u32> = deck.slides.iter().map(|s| s.id).collect();
        assert_eq!(ids, [1, 2, 3]);
        assert_eq!(deck.metadata.slide_count, 3);
        assert_eq!(deck.metadata.version, "1.0");
        assert_eq!(deck.metadata.generator, Generator::Local);
    }

    #[test]
    fn test_design_stamped_from_template() {
        let deck = assemble("Data Mesh", &settings(), drafts(), Generator::Local, None);
        let design = deck.slides[0].design.as_ref().unwrap();
        assert_eq!(design.template, "tech");
        assert_eq!(design.primary_color, "#0A192F");
        assert_eq!(design.heading_font, "SF Pro Display");
        assert!(deck.slides.iter().all(|s| s.design.as_ref() == Some(design)));
    }

    #[test]
    fn test_unknown_template_falls_back_to_corporate() {
        let settings = PresentationSettings {
            template: "holographic".to_string(),
            ..settings()
        };
        let deck = assemble("Data Mesh", &settings, drafts(), Generator::Local, None);
        let design = deck.slides[0].design.as_ref().unwrap();
        assert_eq!(design.template, "corporate");
        assert_eq!(design.primary_color, "#1F497D");
        // settings are reported as given
        assert_eq!(deck.settings.template, "holographic");
    }

    #[test]
    fn test_notes_kept_or_filled() {
        let deck = assemble("Data Mesh", &settings(), drafts(), Generator::Remote, None);
        assert_eq!(deck.slides[0].notes.as_deref(), Some("Custom opener"));
        assert_eq!(
            deck.slides[1].notes.as_deref(),
            Some("When discussing domain ownership, emphasize how it specifically impacts general. This concept is fundamental to understanding Data Mesh.")
        );
    }

    #[test]
    fn test_notes_stripped_when_disabled() {
        let settings = PresentationSettings {
            include_notes: false,
            ..settings()
        };
        let deck = assemble("Data Mesh", &settings, drafts(), Generator::Remote, None);
        assert!(deck.slides.iter().all(|s| s.notes.is_none()));

        let json = serde_json::to_value(&deck).unwrap();
        assert!(json["slides"][0].get("notes").is_none());
    }

    #[test]
    fn test_visual_hints() {
        let deck = assemble("Data Mesh", &settings(), drafts(), Generator::Local, None);
        let visuals: Vec<&Visual> = deck.slides.iter().filter_map(|s| s.visual.as_ref()).collect();
        assert_eq!(visuals[0].kind, VisualKind::Background);
        assert_eq!(visuals[1].kind, VisualKind::Icon);
        assert_eq!(
            visuals[1].description,
            "Icon representing the concept of Domain Ownership"
        );
        assert_eq!(visuals[2].kind, VisualKind::Chart);
        assert_eq!(visuals[2].chart_type, Some(ChartType::Line));
        assert_eq!(visuals[2].description, "line showing query volume");
    }

    #[test]
    fn test_default_notes_and_visual_from_same_draft() {
        let draft = SlideDraft::new(
            "Case Study: Retailer",
            SlideBody::Example {
                content: "Moved to spot instances".to_string(),
                image_type: deck_types::ImageType::CaseStudy,
            },
        );
        let deck = assemble("Data Mesh", &settings(), vec![draft], Generator::Remote, None);
        let slide = &deck.slides[0];

        assert_eq!(slide.title, "Case Study: Retailer");
        let notes = slide.notes.as_deref().unwrap();
        assert!(notes.starts_with("This example demonstrates a practical application of Data Mesh."));
        let visual = slide.visual.as_ref().unwrap();
        assert_eq!(visual.kind, VisualKind::Image);
        assert_eq!(visual.description, "Image illustrating Case Study: Retailer");
    }

    #[test]
    fn test_metadata_serializes_camel_case() {
        let deck = assemble(
            "Data Mesh",
            &settings(),
            drafts(),
            Generator::Remote,
            Some(ExtractionStage::Json),
        );
        let json = serde_json::to_value(&deck).unwrap();
        assert_eq!(json["metadata"]["slideCount"], 3);
        assert_eq!(json["metadata"]["generator"], "remote");
        assert_eq!(json["metadata"]["extraction"], "json");
        assert!(json["metadata"]["dateCreated"].is_string());
        assert_eq!(json["settings"]["maxSlides"], 15);
    }
}

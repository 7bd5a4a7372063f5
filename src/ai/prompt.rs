//! Prompt construction for remote generation

use deck_types::PresentationSettings;

use crate::settings::PLACEHOLDER_TOPIC;

/// Shape the remote service is asked to answer in
const RESPONSE_SHAPE: &str = r#"Respond with structured JSON in this format:
{
  "title": "Main Presentation Title",
  "slides": [
    {
      "type": "title",
      "title": "Compelling Title",
      "subtitle": "Engaging Subtitle",
      "notes": "Speaker notes about the presentation opening"
    },
    {
      "type": "introduction",
      "title": "Introduction to Topic",
      "content": ["Point 1", "Point 2", "Point 3"],
      "notes": "Speaker notes for this slide"
    },
    {
      "type": "data",
      "title": "Data Analysis",
      "content": "Description of what the chart shows",
      "chartType": "bar",
      "notes": "Notes explaining the data insights"
    }
  ]
}"#;

/// Build the full generation prompt
pub fn build_prompt(settings: &PresentationSettings) -> String {
    let topic = settings.topic.trim();
    let (named_topic, subject) = if topic.is_empty() {
        (PLACEHOLDER_TOPIC, "the topic")
    } else {
        (topic, topic)
    };
    let additional = match settings.additional_info.trim() {
        "" => "None",
        info => info,
    };

    let mut prompt = format!(
        "Create a professional presentation about \"{}\".\n\n",
        named_topic
    );

    prompt.push_str(&format!("Target audience: {}\n", settings.audience));
    prompt.push_str(&format!("Presentation tone: {}\n", settings.tone));
    prompt.push_str(&format!("Maximum number of slides: {}\n", settings.max_slides));
    prompt.push_str(&format!(
        "Include speaker notes: {}\n",
        if settings.include_notes { "yes" } else { "no" }
    ));
    prompt.push_str(&format!("Additional requirements: {}\n\n", additional));

    prompt.push_str("I need a complete presentation with the following:\n\n");
    prompt.push_str("1. An engaging title slide with a memorable title and subtitle\n");
    prompt.push_str(&format!(
        "2. An introduction slide explaining why {} matters to {}\n",
        subject, settings.audience
    ));
    prompt.push_str(&format!(
        "3. 3-5 content slides covering key aspects of {} with bullet points\n",
        subject
    ));
    prompt.push_str("4. 2-3 data visualization slides with appropriate charts (bar charts for comparisons, line charts for trends, pie charts for distributions)\n");
    prompt.push_str("5. 1-2 example/case study slides with real-world applications\n");
    prompt.push_str("6. A conclusion slide summarizing key points\n");
    prompt.push_str("7. A Q&A or contact slide\n\n");

    prompt.push_str("For each slide, provide:\n");
    prompt.push_str("- Slide type (title, introduction, concept, data, example, conclusion, qa)\n");
    prompt.push_str("- Slide title (clear and concise)\n");
    prompt.push_str("- Bullet points or main content (3-5 bullet points per slide)\n");
    prompt.push_str("- Speaker notes to guide the presenter (if requested)\n");
    prompt.push_str("- For data slides, specify appropriate chart type (bar, line, pie) and what data should be visualized\n\n");

    prompt.push_str("Be creative but professional. The content should be detailed, accurate, and valuable to the audience.\n\n");
    prompt.push_str(RESPONSE_SHAPE);

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use deck_types::Audience;

    #[test]
    fn test_prompt_embeds_settings() {
        let settings = PresentationSettings {
            topic: "Zero Trust Networking".to_string(),
            audience: Audience::Technical,
            max_slides: 9,
            include_notes: false,
            additional_info: "Mention SASE".to_string(),
            ..PresentationSettings::default()
        };

        let prompt = build_prompt(&settings);
        assert!(prompt.starts_with("Create a professional presentation about \"Zero Trust Networking\"."));
        assert!(prompt.contains("Target audience: technical"));
        assert!(prompt.contains("Presentation tone: formal"));
        assert!(prompt.contains("Maximum number of slides: 9"));
        assert!(prompt.contains("Include speaker notes: no"));
        assert!(prompt.contains("Additional requirements: Mention SASE"));
        assert!(prompt.contains("why Zero Trust Networking matters to technical"));
        assert!(prompt.contains("\"chartType\": \"bar\""));
    }

    #[test]
    fn test_prompt_placeholders() {
        let prompt = build_prompt(&PresentationSettings::default());
        assert!(prompt.contains("about \"Sample Topic\""));
        assert!(prompt.contains("key aspects of the topic"));
        assert!(prompt.contains("Additional requirements: None"));
        assert!(prompt.contains("Include speaker notes: yes"));
    }
}

//! Settings resolution
//!
//! Merges caller options over defaults. Enum values the pipeline does not
//! recognise are kept as-is; lookups downstream fall back to generic wording.

use std::path::Path;

use deck_types::{PresentationOptions, PresentationSettings};
use tracing::{debug, warn};

use crate::error::SettingsError;

/// Topic substituted when the caller leaves it blank
pub const PLACEHOLDER_TOPIC: &str = "Sample Topic";

/// Turns partial options into complete settings
pub struct SettingsResolver;

impl SettingsResolver {
    /// Resolve options into settings, applying defaults.
    ///
    /// Rejects a zero slide budget. A blank topic is replaced with a
    /// placeholder rather than rejected.
    pub fn resolve(options: PresentationOptions) -> Result<PresentationSettings, SettingsError> {
        let defaults = PresentationSettings::default();

        let max_slides = options.max_slides.unwrap_or(defaults.max_slides);
        if max_slides == 0 {
            return Err(SettingsError::InvalidMaxSlides);
        }

        let topic = match options.topic.map(|t| t.trim().to_string()) {
            Some(t) if !t.is_empty() => t,
            _ => {
                warn!("No topic supplied, using placeholder '{}'", PLACEHOLDER_TOPIC);
                PLACEHOLDER_TOPIC.to_string()
            }
        };

        let settings = PresentationSettings {
            topic,
            audience: options.audience.unwrap_or(defaults.audience),
            tone: options.tone.unwrap_or(defaults.tone),
            template: options.template.unwrap_or(defaults.template),
            max_slides,
            include_notes: options.include_notes.unwrap_or(defaults.include_notes),
            additional_info: options.additional_info.unwrap_or_default(),
        };

        if !settings.audience.is_known() || !settings.tone.is_known() {
            debug!(
                audience = %settings.audience,
                tone = %settings.tone,
                "Unrecognised audience or tone, generic wording will be used"
            );
        }

        Ok(settings)
    }

    /// Load options from a YAML or JSON settings file
    pub fn load_options(path: &Path) -> Result<PresentationOptions, SettingsError> {
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        // YAML is a superset of JSON, one parser covers both
        serde_yaml::from_str(&content).map_err(|source| SettingsError::Format {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deck_types::{Audience, Tone};
    use std::io::Write;

    #[test]
    fn test_defaults_applied() {
        let settings = SettingsResolver::resolve(PresentationOptions::for_topic("AI")).unwrap();
        assert_eq!(settings.topic, "AI");
        assert_eq!(settings.audience, Audience::General);
        assert_eq!(settings.tone, Tone::Formal);
        assert_eq!(settings.template, "corporate");
        assert_eq!(settings.max_slides, 15);
        assert!(settings.include_notes);
        assert!(settings.additional_info.is_empty());
    }

    #[test]
    fn test_unknown_enum_values_pass_through() {
        let options = PresentationOptions {
            topic: Some("AI".to_string()),
            audience: Some("pirates".parse().unwrap()),
            tone: Some("whimsical".parse().unwrap()),
            template: Some("neon".to_string()),
            ..PresentationOptions::default()
        };
        let settings = SettingsResolver::resolve(options).unwrap();
        assert_eq!(settings.audience.as_str(), "pirates");
        assert_eq!(settings.tone.as_str(), "whimsical");
        assert_eq!(settings.template, "neon");
    }

    #[test]
    fn test_zero_max_slides_rejected() {
        let options = PresentationOptions {
            max_slides: Some(0),
            ..PresentationOptions::for_topic("AI")
        };
        assert!(matches!(
            SettingsResolver::resolve(options),
            Err(SettingsError::InvalidMaxSlides)
        ));
    }

    #[test]
    fn test_blank_topic_gets_placeholder() {
        let settings = SettingsResolver::resolve(PresentationOptions::for_topic("   ")).unwrap();
        assert_eq!(settings.topic, PLACEHOLDER_TOPIC);
    }

    #[test]
    fn test_load_options_from_yaml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "topic: renewable energy\naudience: investors\nmaxSlides: 8\nincludeNotes: false"
        )
        .unwrap();

        let options = SettingsResolver::load_options(file.path()).unwrap();
        assert_eq!(options.topic.as_deref(), Some("renewable energy"));
        assert_eq!(options.audience, Some(Audience::Investors));
        assert_eq!(options.max_slides, Some(8));
        assert_eq!(options.include_notes, Some(false));
        assert!(options.tone.is_none());
    }

    #[test]
    fn test_load_options_from_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"topic": "quantum computing", "tone": "casual"}}"#).unwrap();

        let options = SettingsResolver::load_options(file.path()).unwrap();
        assert_eq!(options.topic.as_deref(), Some("quantum computing"));
        assert_eq!(options.tone, Some(Tone::Casual));
    }

    #[test]
    fn test_load_options_missing_file() {
        let err = SettingsResolver::load_options(Path::new("/nonexistent/deck.yaml")).unwrap_err();
        assert!(matches!(err, SettingsError::Read { .. }));
    }
}

//! Deck Types - Level 1 Foundation Types
//!
//! Pure data structures shared by every stage of the slide-deck generation
//! pipeline. Nothing in here talks to the network or holds generation state.
//!
//! ## Contents
//!
//! - Presentation settings (audience, tone, template key, slide budget)
//! - The template table (palette + fonts stamped onto each slide)
//! - The typed slide model and the final `Presentation` document
//! - Remote generation configuration and error types
//!
//! ## Rules
//!
//! 1. **NO PIPELINE LOGIC** - lookups and constructors only
//! 2. **NO WORKSPACE DEPENDENCIES**
//! 3. **SERIALIZABLE** - the `Presentation` JSON is the output contract consumed
//!    by renderers and exporters, field names are camelCase

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// AUDIENCE AND TONE
// ============================================================================

/// Who the presentation is for.
///
/// Unknown values are kept verbatim in `Other` so they survive a round trip;
/// downstream lookups treat them as "no match" and use generic wording.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Audience {
    Executives,
    Managers,
    Clients,
    Technical,
    Students,
    General,
    Investors,
    Stakeholders,
    TeamMembers,
    Other(String),
}

impl Audience {
    /// The nine recognised audiences
    pub const KNOWN: [Audience; 9] = [
        Audience::Executives,
        Audience::Managers,
        Audience::Clients,
        Audience::Technical,
        Audience::Students,
        Audience::General,
        Audience::Investors,
        Audience::Stakeholders,
        Audience::TeamMembers,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Self::Executives => "executives",
            Self::Managers => "managers",
            Self::Clients => "clients",
            Self::Technical => "technical",
            Self::Students => "students",
            Self::General => "general",
            Self::Investors => "investors",
            Self::Stakeholders => "stakeholders",
            Self::TeamMembers => "team members",
            Self::Other(value) => value,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl Default for Audience {
    fn default() -> Self {
        Self::General
    }
}

impl From<String> for Audience {
    fn from(value: String) -> Self {
        match value.as_str() {
            "executives" => Self::Executives,
            "managers" => Self::Managers,
            "clients" => Self::Clients,
            "technical" => Self::Technical,
            "students" => Self::Students,
            "general" => Self::General,
            "investors" => Self::Investors,
            "stakeholders" => Self::Stakeholders,
            "team members" => Self::TeamMembers,
            _ => Self::Other(value),
        }
    }
}

impl From<Audience> for String {
    fn from(value: Audience) -> Self {
        match value {
            Audience::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for Audience {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s.to_string()))
    }
}

impl fmt::Display for Audience {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Presentation tone.
///
/// Same pass-through rule as [`Audience`]: unknown tones are preserved.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Tone {
    Formal,
    Casual,
    Persuasive,
    Informative,
    Inspirational,
    Analytical,
    Enthusiastic,
    Authoritative,
    Conversational,
    Other(String),
}

impl Tone {
    /// The nine recognised tones
    pub const KNOWN: [Tone; 9] = [
        Tone::Formal,
        Tone::Casual,
        Tone::Persuasive,
        Tone::Informative,
        Tone::Inspirational,
        Tone::Analytical,
        Tone::Enthusiastic,
        Tone::Authoritative,
        Tone::Conversational,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Self::Formal => "formal",
            Self::Casual => "casual",
            Self::Persuasive => "persuasive",
            Self::Informative => "informative",
            Self::Inspirational => "inspirational",
            Self::Analytical => "analytical",
            Self::Enthusiastic => "enthusiastic",
            Self::Authoritative => "authoritative",
            Self::Conversational => "conversational",
            Self::Other(value) => value,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl Default for Tone {
    fn default() -> Self {
        Self::Formal
    }
}

impl From<String> for Tone {
    fn from(value: String) -> Self {
        match value.as_str() {
            "formal" => Self::Formal,
            "casual" => Self::Casual,
            "persuasive" => Self::Persuasive,
            "informative" => Self::Informative,
            "inspirational" => Self::Inspirational,
            "analytical" => Self::Analytical,
            "enthusiastic" => Self::Enthusiastic,
            "authoritative" => Self::Authoritative,
            "conversational" => Self::Conversational,
            _ => Self::Other(value),
        }
    }
}

impl From<Tone> for String {
    fn from(value: Tone) -> Self {
        match value {
            Tone::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for Tone {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s.to_string()))
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// PRESENTATION SETTINGS
// ============================================================================

/// Default slide budget
pub const DEFAULT_MAX_SLIDES: u32 = 15;

/// Default template key
pub const DEFAULT_TEMPLATE: &str = "corporate";

/// Caller-supplied options. Every field is independently optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresentationOptions {
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub audience: Option<Audience>,
    #[serde(default)]
    pub tone: Option<Tone>,
    #[serde(default)]
    pub template: Option<String>,
    #[serde(default)]
    pub max_slides: Option<u32>,
    #[serde(default)]
    pub include_notes: Option<bool>,
    #[serde(default)]
    pub additional_info: Option<String>,
}

impl PresentationOptions {
    /// Options with only a topic set
    pub fn for_topic(topic: impl Into<String>) -> Self {
        Self {
            topic: Some(topic.into()),
            ..Self::default()
        }
    }

    /// Overlay `other` on top of `self`: fields set in `other` win.
    pub fn merge(self, other: PresentationOptions) -> Self {
        Self {
            topic: other.topic.or(self.topic),
            audience: other.audience.or(self.audience),
            tone: other.tone.or(self.tone),
            template: other.template.or(self.template),
            max_slides: other.max_slides.or(self.max_slides),
            include_notes: other.include_notes.or(self.include_notes),
            additional_info: other.additional_info.or(self.additional_info),
        }
    }
}

/// Fully resolved settings for one generation call. Read-only once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresentationSettings {
    pub topic: String,
    pub audience: Audience,
    pub tone: Tone,
    pub template: String,
    pub max_slides: u32,
    pub include_notes: bool,
    #[serde(default)]
    pub additional_info: String,
}

impl Default for PresentationSettings {
    fn default() -> Self {
        Self {
            topic: String::new(),
            audience: Audience::default(),
            tone: Tone::default(),
            template: DEFAULT_TEMPLATE.to_string(),
            max_slides: DEFAULT_MAX_SLIDES,
            include_notes: true,
            additional_info: String::new(),
        }
    }
}

// ============================================================================
// TEMPLATES
// ============================================================================

/// A named palette/font bundle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    pub key: &'static str,
    pub name: &'static str,
    pub primary_color: &'static str,
    pub secondary_color: &'static str,
    pub background_color: &'static str,
    pub accent_color: &'static str,
    pub heading_font: &'static str,
    pub body_font: &'static str,
}

/// Fixed template table. The first entry is the fallback for unknown keys.
pub const TEMPLATES: [Template; 8] = [
    Template {
        key: "corporate",
        name: "Professional Business",
        primary_color: "#1F497D",
        secondary_color: "#4472C4",
        background_color: "#FFFFFF",
        accent_color: "#D9D9D9",
        heading_font: "Calibri Light",
        body_font: "Calibri",
    },
    Template {
        key: "creative",
        name: "Creative Design",
        primary_color: "#C00000",
        secondary_color: "#FF9900",
        background_color: "#FFFFFF",
        accent_color: "#FFF2CC",
        heading_font: "Century Gothic",
        body_font: "Georgia",
    },
    Template {
        key: "academic",
        name: "Academic Research",
        primary_color: "#2F5597",
        secondary_color: "#5B9BD5",
        background_color: "#FFFFFF",
        accent_color: "#DEEBF7",
        heading_font: "Cambria",
        body_font: "Cambria",
    },
    Template {
        key: "modern",
        name: "Modern Minimal",
        primary_color: "#212121",
        secondary_color: "#757575",
        background_color: "#FFFFFF",
        accent_color: "#EEEEEE",
        heading_font: "Segoe UI Light",
        body_font: "Segoe UI",
    },
    Template {
        key: "vibrant",
        name: "Vibrant Presentation",
        primary_color: "#7030A0",
        secondary_color: "#00B0F0",
        background_color: "#FFFFFF",
        accent_color: "#E6E6FA",
        heading_font: "Trebuchet MS",
        body_font: "Arial",
    },
    Template {
        key: "gradient",
        name: "Gradient Style",
        primary_color: "#6A11CB",
        secondary_color: "#2575FC",
        background_color: "#FFFFFF",
        accent_color: "#E9F3FE",
        heading_font: "Montserrat",
        body_font: "Roboto",
    },
    Template {
        key: "premium",
        name: "Premium Executive",
        primary_color: "#333333",
        secondary_color: "#B8860B",
        background_color: "#FFFFFF",
        accent_color: "#F5F5F5",
        heading_font: "Georgia",
        body_font: "Helvetica",
    },
    Template {
        key: "tech",
        name: "Technology Focus",
        primary_color: "#0A192F",
        secondary_color: "#64FFDA",
        background_color: "#FFFFFF",
        accent_color: "#112240",
        heading_font: "SF Pro Display",
        body_font: "SF Pro Text",
    },
];

impl Template {
    /// Exact lookup by key
    pub fn get(key: &str) -> Option<&'static Template> {
        TEMPLATES.iter().find(|t| t.key == key)
    }

    /// Lookup with fallback to the corporate template
    pub fn resolve(key: &str) -> &'static Template {
        Self::get(key).unwrap_or(&TEMPLATES[0])
    }

    /// Design block stamped onto every slide
    pub fn design(&self) -> SlideDesign {
        SlideDesign {
            template: self.key.to_string(),
            primary_color: self.primary_color.to_string(),
            secondary_color: self.secondary_color.to_string(),
            background_color: self.background_color.to_string(),
            accent_color: self.accent_color.to_string(),
            heading_font: self.heading_font.to_string(),
            body_font: self.body_font.to_string(),
        }
    }
}

// ============================================================================
// SLIDE MODEL
// ============================================================================

/// Visualization category a data slide asks the renderer for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Bar,
    Line,
    Pie,
    Flow,
}

impl ChartType {
    pub const ALL: [ChartType; 4] = [Self::Bar, Self::Line, Self::Pie, Self::Flow];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bar => "bar",
            Self::Line => "line",
            Self::Pie => "pie",
            Self::Flow => "flow",
        }
    }
}

impl FromStr for ChartType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bar" => Ok(Self::Bar),
            "line" => Ok(Self::Line),
            "pie" => Ok(Self::Pie),
            "flow" => Ok(Self::Flow),
            other => Err(format!("Unknown chart type '{}'", other)),
        }
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Image treatment for example slides. Only one kind exists today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ImageType {
    #[default]
    #[serde(rename = "case-study")]
    CaseStudy,
}

/// A cell in a keyed data record: numeric value or label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DataValue {
    Number(f64),
    Label(String),
}

impl From<f64> for DataValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for DataValue {
    fn from(value: &str) -> Self {
        Self::Label(value.to_string())
    }
}

/// One keyed record of a chart series, e.g. `{"year": "2023", "value": 115}`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataPoint(pub BTreeMap<String, DataValue>);

impl DataPoint {
    pub fn new<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<DataValue>,
    {
        Self(
            fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn has_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&DataValue> {
        self.0.get(key)
    }
}

/// Slide category without payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlideKind {
    Title,
    Introduction,
    Concept,
    Data,
    Example,
    Conclusion,
    Qa,
}

impl SlideKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Introduction => "introduction",
            Self::Concept => "concept",
            Self::Data => "data",
            Self::Example => "example",
            Self::Conclusion => "conclusion",
            Self::Qa => "qa",
        }
    }
}

impl FromStr for SlideKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "title" => Ok(Self::Title),
            "introduction" => Ok(Self::Introduction),
            "concept" => Ok(Self::Concept),
            "data" => Ok(Self::Data),
            "example" => Ok(Self::Example),
            "conclusion" => Ok(Self::Conclusion),
            "qa" => Ok(Self::Qa),
            other => Err(format!("Unknown slide type '{}'", other)),
        }
    }
}

impl fmt::Display for SlideKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Type-specific slide payload, tagged by `type` in JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SlideBody {
    Title {
        subtitle: String,
        /// Bullets recovered from free-text responses; empty for built decks
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        content: Vec<String>,
    },
    Introduction {
        content: Vec<String>,
    },
    Concept {
        content: Vec<String>,
    },
    Data {
        content: String,
        #[serde(rename = "chartType")]
        chart_type: ChartType,
        #[serde(
            rename = "dataPoints",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        data_points: Option<Vec<DataPoint>>,
    },
    Example {
        content: String,
        #[serde(rename = "imageType", default)]
        image_type: ImageType,
    },
    Conclusion {
        content: Vec<String>,
    },
    Qa {
        content: String,
    },
}

impl SlideBody {
    pub fn kind(&self) -> SlideKind {
        match self {
            Self::Title { .. } => SlideKind::Title,
            Self::Introduction { .. } => SlideKind::Introduction,
            Self::Concept { .. } => SlideKind::Concept,
            Self::Data { .. } => SlideKind::Data,
            Self::Example { .. } => SlideKind::Example,
            Self::Conclusion { .. } => SlideKind::Conclusion,
            Self::Qa { .. } => SlideKind::Qa,
        }
    }

    /// Textual content as lines, whatever the variant's shape
    pub fn content_lines(&self) -> Vec<String> {
        match self {
            Self::Title { content, .. }
            | Self::Introduction { content }
            | Self::Concept { content }
            | Self::Conclusion { content } => content.clone(),
            Self::Data { content, .. } | Self::Example { content, .. } | Self::Qa { content } => {
                content.lines().map(str::to_string).collect()
            }
        }
    }

    pub fn chart_type(&self) -> Option<ChartType> {
        match self {
            Self::Data { chart_type, .. } => Some(*chart_type),
            _ => None,
        }
    }
}

/// Palette and fonts copied from the selected template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideDesign {
    pub template: String,
    pub primary_color: String,
    pub secondary_color: String,
    pub background_color: String,
    pub accent_color: String,
    pub heading_font: String,
    pub body_font: String,
}

/// Kind of visual element a renderer should place on the slide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisualKind {
    Background,
    Chart,
    Icon,
    Image,
    None,
}

/// Rendering hint attached at assembly
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visual {
    #[serde(rename = "type")]
    pub kind: VisualKind,
    #[serde(default, rename = "chartType", skip_serializing_if = "Option::is_none")]
    pub chart_type: Option<ChartType>,
    pub description: String,
}

/// A slide before final assembly: no id, no design.
///
/// Section builders, the balancer, and the response parser only ever produce
/// drafts; ids are handed out once, when drafts become [`Slide`]s.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideDraft {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(flatten)]
    pub body: SlideBody,
}

impl SlideDraft {
    pub fn new(title: impl Into<String>, body: SlideBody) -> Self {
        Self {
            title: title.into(),
            notes: None,
            body,
        }
    }

    pub fn with_notes(mut self, notes: Option<String>) -> Self {
        self.notes = notes;
        self
    }

    pub fn kind(&self) -> SlideKind {
        self.body.kind()
    }
}

/// A slide in the final document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    /// 1-based position in the deck
    pub id: u32,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(flatten)]
    pub body: SlideBody,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub design: Option<SlideDesign>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visual: Option<Visual>,
}

impl Slide {
    pub fn kind(&self) -> SlideKind {
        self.body.kind()
    }
}

// ============================================================================
// PRESENTATION DOCUMENT
// ============================================================================

/// Document format version
pub const PRESENTATION_VERSION: &str = "1.0";

/// Which path produced the deck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Generator {
    Remote,
    Local,
}

impl fmt::Display for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote => write!(f, "remote"),
            Self::Local => write!(f, "local"),
        }
    }
}

/// Which response-parser stage recovered a remote deck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionStage {
    Json,
    Text,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresentationMetadata {
    pub slide_count: usize,
    pub date_created: DateTime<Utc>,
    pub version: String,
    pub generator: Generator,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extraction: Option<ExtractionStage>,
}

/// The pipeline's output document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Presentation {
    pub title: String,
    pub settings: PresentationSettings,
    pub slides: Vec<Slide>,
    pub metadata: PresentationMetadata,
}

impl Presentation {
    pub fn first_kind(&self) -> Option<SlideKind> {
        self.slides.first().map(Slide::kind)
    }

    pub fn kinds(&self) -> Vec<SlideKind> {
        self.slides.iter().map(Slide::kind).collect()
    }
}

// ============================================================================
// REMOTE GENERATION CONFIGURATION
// ============================================================================

/// Keys this short are rejected before any request is attempted
pub const MIN_API_KEY_LEN: usize = 11;

/// Default generative model
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-pro";

/// Default generative endpoint base
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Remote generation service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    /// API key for the generative service
    pub api_key: String,

    /// Model name/version to use
    pub model: String,

    /// Endpoint base, `{base_url}/{model}:generateContent`
    pub base_url: String,

    /// Maximum tokens in response
    pub max_tokens: Option<u32>,

    /// Sampling temperature
    pub temperature: Option<f32>,

    /// Nucleus sampling cutoff
    pub top_p: Option<f32>,

    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: std::env::var("GEMINI_API_KEY").unwrap_or_default(),
            model: std::env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string()),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            max_tokens: Some(8192),
            temperature: Some(0.7),
            top_p: Some(0.95),
            timeout_seconds: std::env::var("GEMINI_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
        }
    }
}

impl AiConfig {
    /// Create new configuration with explicit key and model
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            max_tokens: Some(8192),
            temperature: Some(0.7),
            top_p: Some(0.95),
            timeout_seconds: 60,
        }
    }

    /// Load from `GEMINI_*` environment variables
    pub fn from_env() -> AiResult<Self> {
        let config = Self::default();
        config.validate()?;
        Ok(config)
    }

    /// Set the endpoint base (tests point this at a local server)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set maximum tokens
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set timeout
    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    /// Reject malformed credentials before any request is made
    pub fn validate(&self) -> AiResult<()> {
        let key = self.api_key.trim();
        if key.is_empty() {
            return Err(AiError::configuration("missing API key"));
        }
        if key.len() < MIN_API_KEY_LEN {
            return Err(AiError::configuration(format!(
                "API key too short ({} chars, need at least {})",
                key.len(),
                MIN_API_KEY_LEN
            )));
        }
        if self.model.trim().is_empty() {
            return Err(AiError::configuration("missing model name"));
        }
        Ok(())
    }
}

/// Errors that can occur while talking to the remote generative service
#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Empty response: no candidates returned")]
    EmptyResponse,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Remote request cancelled")]
    Cancelled,
}

impl AiError {
    /// Create network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Create HTTP status error
    pub fn http(status: u16, body: impl Into<String>) -> Self {
        Self::Http {
            status,
            body: body.into(),
        }
    }

    /// Create invalid response error
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse(message.into())
    }

    /// Create configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
}

/// Result type for remote operations
pub type AiResult<T> = Result<T, AiError>;

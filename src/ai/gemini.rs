//! Google Gemini API Client Implementation
//!
//! One `generateContent` call per generation, no retry. The API key travels in
//! the `x-goog-api-key` header and never appears in the URL or in logs.

use super::prompt::build_prompt;
use super::ContentClient;
use deck_types::{AiConfig, AiError, AiResult, PresentationSettings};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini API client
#[derive(Debug, Clone)]
pub struct GeminiClient {
    config: AiConfig,
    client: Client,
}

/// Gemini API request format
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GeminiGenerationConfig>,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
struct GeminiPart {
    text: String,
}

/// Gemini generation configuration
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
}

/// Gemini API response format
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    #[serde(default)]
    usage_metadata: Option<GeminiUsageMetadata>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    #[serde(default)]
    content: Option<GeminiResponseContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponseContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponsePart {
    #[serde(default)]
    text: Option<String>,
}

/// Gemini usage metadata
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiUsageMetadata {
    #[serde(default)]
    prompt_token_count: Option<u32>,
    #[serde(default)]
    candidates_token_count: Option<u32>,
    #[serde(default)]
    total_token_count: Option<u32>,
}

impl GeminiClient {
    /// Create a new Gemini client. Malformed credentials are rejected here.
    pub fn new(config: AiConfig) -> AiResult<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| AiError::network(e.to_string()))?;

        Ok(Self { config, client })
    }

    /// Create a client from `GEMINI_*` environment variables
    pub fn from_env() -> AiResult<Self> {
        Self::new(AiConfig::from_env()?)
    }

    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    fn request_body(&self, prompt: String) -> GeminiRequest {
        GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart { text: prompt }],
            }],
            generation_config: Some(GeminiGenerationConfig {
                temperature: self.config.temperature,
                max_output_tokens: self.config.max_tokens,
                top_p: self.config.top_p,
            }),
        }
    }

    /// Send the prompt and return the first candidate's text
    async fn send_request(&self, prompt: String) -> AiResult<String> {
        let url = self.endpoint();
        let request_body = self.request_body(prompt);

        debug!(
            "Sending request to Gemini API: {} ({}: ***)",
            url, API_KEY_HEADER
        );

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &self.config.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| AiError::network(e.to_string()))?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|e| AiError::network(e.to_string()))?;

        debug!("Gemini API response status: {}", status);

        if !status.is_success() {
            error!("Gemini API error: {} - {}", status, response_text);
            return Err(AiError::http(status.as_u16(), response_text));
        }

        extract_text(&response_text)
    }
}

/// Pull the first candidate's text out of a `generateContent` response body
fn extract_text(body: &str) -> AiResult<String> {
    let gemini_response: GeminiResponse = serde_json::from_str(body).map_err(|e| {
        error!("Failed to parse Gemini response: {}", e);
        AiError::invalid_response(e.to_string())
    })?;

    if let Some(usage) = &gemini_response.usage_metadata {
        info!(
            "Gemini API usage - Prompt: {:?} tokens, Response: {:?} tokens, Total: {:?} tokens",
            usage.prompt_token_count, usage.candidates_token_count, usage.total_token_count
        );
    }

    gemini_response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().next())
        .and_then(|part| part.text)
        .filter(|text| !text.trim().is_empty())
        .ok_or(AiError::EmptyResponse)
}

#[async_trait::async_trait]
impl ContentClient for GeminiClient {
    async fn request(&self, settings: &PresentationSettings) -> AiResult<String> {
        info!(
            model = %self.config.model,
            topic = %settings.topic,
            "Requesting remote deck content"
        );

        let text = self.send_request(build_prompt(settings)).await?;

        info!("Remote content received: {} chars", text.len());
        Ok(text)
    }

    fn provider_name(&self) -> &str {
        "gemini"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deck_types::DEFAULT_GEMINI_MODEL;

    fn create_test_config() -> AiConfig {
        AiConfig::new("test-key-0123456789", DEFAULT_GEMINI_MODEL)
    }

    #[test]
    fn test_gemini_client_creation() {
        let client = GeminiClient::new(create_test_config());
        assert!(client.is_ok());
    }

    #[test]
    fn test_gemini_client_short_api_key() {
        let config = AiConfig::new("abc", DEFAULT_GEMINI_MODEL);
        let client = GeminiClient::new(config);
        assert!(matches!(client.err(), Some(AiError::Configuration(_))));
    }

    #[test]
    fn test_endpoint_keeps_key_out_of_url() {
        let config = create_test_config().with_base_url("http://localhost:9999/models/");
        let client = GeminiClient::new(config).unwrap();
        let url = client.endpoint();
        assert_eq!(
            url,
            "http://localhost:9999/models/gemini-1.5-pro:generateContent"
        );
        assert!(!url.contains("test-key"));
    }

    #[test]
    fn test_request_body_shape() {
        let client = GeminiClient::new(create_test_config()).unwrap();
        let body = serde_json::to_value(client.request_body("hello".to_string())).unwrap();
        assert_eq!(body["contents"][0]["parts"][0]["text"], "hello");
        let generation = &body["generationConfig"];
        assert_eq!(generation["maxOutputTokens"], 8192);
        assert!((generation["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
        assert!((generation["topP"].as_f64().unwrap() - 0.95).abs() < 1e-6);
    }

    #[test]
    fn test_extract_text() {
        let body = r#"{
            "candidates": [{"content": {"parts": [{"text": "Slide 1: Hello"}]}}],
            "usageMetadata": {"promptTokenCount": 10, "totalTokenCount": 30}
        }"#;
        assert_eq!(extract_text(body).unwrap(), "Slide 1: Hello");
    }

    #[test]
    fn test_extract_text_empty_candidates() {
        assert!(matches!(
            extract_text(r#"{"candidates": []}"#),
            Err(AiError::EmptyResponse)
        ));
        assert!(matches!(
            extract_text(r#"{}"#),
            Err(AiError::EmptyResponse)
        ));
        assert!(matches!(
            extract_text(r#"{"candidates": [{"content": {"parts": []}}]}"#),
            Err(AiError::EmptyResponse)
        ));
    }

    #[test]
    fn test_extract_text_not_json() {
        assert!(matches!(
            extract_text("<html>bad gateway</html>"),
            Err(AiError::InvalidResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_network_error() {
        let config = create_test_config()
            .with_base_url("http://127.0.0.1:9")
            .with_timeout(2);
        let client = GeminiClient::new(config).unwrap();
        let result = client.request(&PresentationSettings::default()).await;
        assert!(matches!(result, Err(AiError::Network(_))));
    }

    // Integration test - requires API key
    #[tokio::test]
    #[ignore = "Requires GEMINI_API_KEY environment variable"]
    async fn test_gemini_integration() {
        let client = GeminiClient::from_env()
            .expect("GEMINI_API_KEY environment variable required for integration test");

        let settings = PresentationSettings {
            topic: "Renewable energy storage".to_string(),
            max_slides: 6,
            ..PresentationSettings::default()
        };

        let text = client.request(&settings).await.unwrap();
        assert!(!text.is_empty());
        println!("Raw response: {}", text);
    }
}

// ABOUTME: Gemini generateContent client
// ABOUTME: Handles API requests, error bodies, and extraction of the reply text

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, info};

use crate::generator::TextGenerator;

pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const REQUEST_TIMEOUT_SECS: u64 = 60;
const CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error)]
pub enum AIServiceError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("No API key configured")]
    NoApiKey,

    #[error("Invalid response format")]
    InvalidResponse,
}

pub type AIServiceResult<T> = Result<T, AIServiceError>;

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

/// Client for the Gemini `generateContent` endpoint
pub struct GeminiService {
    client: Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl GeminiService {
    /// A blank key is treated as no key, which leaves the service unavailable
    pub fn new(api_key: Option<String>, model: impl Into<String>) -> AIServiceResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()?;

        let api_key = api_key.filter(|key| !key.trim().is_empty());
        let model = model.into();

        if api_key.is_none() {
            info!("GEMINI_API_KEY not set - agents will answer with canned responses");
        } else {
            debug!("Gemini service configured with model {}", model);
        }

        Ok(Self {
            client,
            api_key,
            model,
            base_url: GEMINI_BASE_URL.to_string(),
        })
    }

    /// Point the client at another host, e.g. a mock server
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Send a single-turn prompt and return the first text part of the reply
    pub async fn generate_text(&self, prompt: &str) -> AIServiceResult<String> {
        let api_key = self.api_key.as_ref().ok_or(AIServiceError::NoApiKey)?;

        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let url = format!("{}/{}:generateContent", self.base_url, self.model);
        debug!("Making Gemini request: model={}", self.model);

        let response = self
            .client
            .post(&url)
            .query(&[("key", api_key)])
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    error!("Gemini request timed out after {}s", REQUEST_TIMEOUT_SECS);
                    AIServiceError::ApiError("Request timed out".to_string())
                } else {
                    error!("Gemini request failed: {}", e);
                    AIServiceError::RequestFailed(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            let message = match serde_json::from_str::<ErrorWrapper>(&body) {
                Ok(wrapper) => {
                    let detail = wrapper.error.message.unwrap_or(body);
                    match wrapper.error.status {
                        Some(code) => format!("{code}: {detail}"),
                        None => detail,
                    }
                }
                Err(_) => body,
            };
            error!("Gemini API error: {} - {}", status, message);
            return Err(AIServiceError::ApiError(format!(
                "API returned {}: {}",
                status, message
            )));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| AIServiceError::ParseError(e.to_string()))?;

        parsed
            .candidates
            .unwrap_or_default()
            .into_iter()
            .filter_map(|candidate| candidate.content)
            .flat_map(|content| content.parts)
            .find_map(|part| part.text)
            .ok_or(AIServiceError::InvalidResponse)
    }
}

#[async_trait]
impl TextGenerator for GeminiService {
    fn is_available(&self) -> bool {
        self.is_configured()
    }

    async fn generate_text(&self, prompt: &str) -> AIServiceResult<String> {
        GeminiService::generate_text(self, prompt).await
    }
}

/// Remove a surrounding markdown code fence (with or without a language tag)
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    if !trimmed.starts_with("```") {
        return trimmed;
    }

    let after_ticks = trimmed.trim_start_matches('`');
    let body = match after_ticks.find('\n') {
        Some(i) => &after_ticks[i + 1..],
        // Single-line fence: drop an optional language tag before the payload
        None => after_ticks
            .find(|c: char| c.is_whitespace() || c == '{' || c == '[')
            .map(|i| &after_ticks[i..])
            .unwrap_or(""),
    };
    let end = body.rfind("```").unwrap_or(body.len());
    body[..end].trim()
}

/// Parse a model reply as JSON, tolerating a surrounding code fence
pub fn parse_json_reply<T: DeserializeOwned>(text: &str) -> AIServiceResult<T> {
    let json_text = strip_code_fences(text);

    serde_json::from_str(json_text).map_err(|e| {
        error!(
            "JSON parsing failed: {}. JSON snippet: {}",
            e,
            json_text.chars().take(500).collect::<String>()
        );
        AIServiceError::ParseError(format!("Failed to parse JSON: {}", e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_json_fence() {
        let fenced = "```json\n{\"overall_score\": 8}\n```";
        assert_eq!(strip_code_fences(fenced), "{\"overall_score\": 8}");
    }

    #[test]
    fn test_strip_single_line_fence() {
        assert_eq!(
            strip_code_fences("```json {\"overall_score\": 9} ```"),
            "{\"overall_score\": 9}"
        );
        assert_eq!(strip_code_fences("```{\"a\": 1}```"), "{\"a\": 1}");
        assert_eq!(strip_code_fences("```json[1, 2]```"), "[1, 2]");
    }

    #[test]
    fn test_parse_json_reply() {
        let value: serde_json::Value =
            parse_json_reply("```json {\"overall_score\": 8.5, \"note\": \"x\"} ```").unwrap();
        assert_eq!(value["overall_score"], 8.5);
        assert_eq!(value["note"], "x");

        let prose: AIServiceResult<serde_json::Value> = parse_json_reply("Great job overall!");
        assert!(matches!(prose, Err(AIServiceError::ParseError(_))));
    }

    #[test]
    fn test_strip_bare_fence_and_whitespace() {
        assert_eq!(strip_code_fences("  ```\n[1, 2]\n```  "), "[1, 2]");
        assert_eq!(strip_code_fences("  {\"a\": 1}\n"), "{\"a\": 1}");
    }

    #[test]
    fn test_unterminated_fence_keeps_body() {
        assert_eq!(strip_code_fences("```json\n{\"a\": 1}"), "{\"a\": 1}");
    }

    #[test]
    fn test_blank_key_means_unconfigured() {
        let service = GeminiService::new(Some("   ".to_string()), "gemini-test").unwrap();
        assert!(!service.is_configured());
        assert_eq!(service.model(), "gemini-test");

        let service = GeminiService::new(Some("key".to_string()), "gemini-test").unwrap();
        assert!(service.is_configured());
    }

    #[tokio::test]
    async fn test_missing_key_short_circuits() {
        let service = GeminiService::new(None, "gemini-test").unwrap();
        assert!(matches!(
            service.generate_text("hello").await,
            Err(AIServiceError::NoApiKey)
        ));
    }
}

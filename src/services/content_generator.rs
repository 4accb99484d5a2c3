//! AI-assisted content generation.
//!
//! The generation service is an opaque external dependency. [`GeminiGenerator`]
//! calls the Gemini `generateContent` REST endpoint; [`UnconfiguredGenerator`]
//! is used when no API key is set and fails every request.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Instruction appended to the draft title before it is sent upstream.
pub const PROMPT_SUFFIX: &str = " Generate a blog content for this topic in simple text format";

#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Generate markdown/markup text for `prompt`.
    ///
    /// Any failure is reported as `AppError::Upstream`. No retry.
    async fn generate(&self, prompt: &str) -> Result<String, AppError>;
}

/// Fails every request; installed when `GEMINI_API_KEY` is not set.
pub struct UnconfiguredGenerator;

#[async_trait]
impl ContentGenerator for UnconfiguredGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, AppError> {
        Err(AppError::Upstream(
            "content generation is not configured (GEMINI_API_KEY unset)".to_string(),
        ))
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
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
    #[serde(default)]
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate, if any.
    fn into_text(self) -> Option<String> {
        let text: String = self
            .candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .filter_map(|p| p.text)
            .collect();

        (!text.trim().is_empty()).then_some(text)
    }
}

/// Gemini REST client.
///
/// # Request
///
/// `POST {base_url}/models/{model}:generateContent` with header
/// `x-goog-api-key` and body `{"contents":[{"parts":[{"text": ...}]}]}`.
pub struct GeminiGenerator {
    client: reqwest::Client,
    endpoint: url::Url,
    api_key: String,
}

impl GeminiGenerator {
    /// # Errors
    ///
    /// `Internal` if the base URL is not a valid http(s) URL or the HTTP client
    /// cannot be built.
    pub fn new(
        base_url: &str,
        model: &str,
        api_key: String,
        timeout: Duration,
    ) -> Result<Self, AppError> {
        let endpoint = url::Url::parse(&format!(
            "{}/models/{}:generateContent",
            base_url.trim_end_matches('/'),
            model
        ))
        .map_err(|e| AppError::Internal(format!("Invalid GEMINI_BASE_URL: {}", e)))?;

        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(AppError::Internal(
                "GEMINI_BASE_URL must use HTTP or HTTPS".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("HTTP client error: {}", e)))?;

        Ok(Self {
            client,
            endpoint,
            api_key,
        })
    }

    pub fn endpoint(&self) -> &url::Url {
        &self.endpoint
    }
}

#[async_trait]
impl ContentGenerator for GeminiGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, AppError> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(self.endpoint.clone())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!(
                "Generation service returned {}: {}",
                status, detail
            )));
        }

        response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|e| AppError::Upstream(format!("Unreadable response: {}", e)))?
            .into_text()
            .ok_or_else(|| AppError::Upstream("Generation service returned no text".to_string()))
    }
}

//! Google Gemini text completion client (API key mode)
//!
//! Sends one `generateContent` request per prompt. No retries: a failed call
//! is logged and reported to the caller as an empty string.

use std::time::{Duration, Instant};

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};

use super::CompletionProvider;
use crate::TrailBuddyError;
use crate::config::LlmConfig;

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
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

impl GenerateResponse {
    /// Text of the first candidate, parts concatenated and trimmed
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
            .trim()
            .to_string()
    }
}

/// Gemini client authenticated with an API key
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GeminiClient {
    /// Create a client; an empty API key is a configuration error
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> crate::Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(TrailBuddyError::config("Gemini API key cannot be empty"));
        }

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("TrailBuddy/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TrailBuddyError::api(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.into(),
            model: model.into(),
        })
    }

    /// Create a client from configuration, reading the key from the environment
    pub fn from_config(config: &LlmConfig) -> crate::Result<Self> {
        let api_key = std::env::var(&config.api_key_env).map_err(|_| {
            TrailBuddyError::config(format!("{} is missing from the environment", config.api_key_env))
        })?;

        Self::new(
            api_key,
            config.model.clone(),
            config.base_url.clone(),
            Duration::from_secs(config.timeout_seconds.into()),
        )
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(&self.model)
        )
    }

    async fn generate(&self, prompt: &str, max_tokens: u32) -> Result<String> {
        let request = GenerateRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                max_output_tokens: max_tokens,
            },
        };

        let url = self.endpoint();
        debug!("Gemini request to: {}", url);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .with_context(|| "Failed to send Gemini request")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("Gemini API error {}: {}", status, body));
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .with_context(|| "Failed to parse Gemini response")?;

        Ok(parsed.text())
    }
}

#[async_trait]
impl CompletionProvider for GeminiClient {
    #[instrument(skip(self, prompt), fields(prompt_len = prompt.len()))]
    async fn complete(&self, prompt: &str, max_tokens: u32) -> String {
        let start_time = Instant::now();

        match self.generate(prompt, max_tokens).await {
            Ok(text) if text.is_empty() => {
                warn!("Gemini returned no text");
                String::new()
            }
            Ok(text) => {
                info!(
                    "{} completion of {} chars in {:.3}s",
                    self.model,
                    text.len(),
                    start_time.elapsed().as_secs_f64()
                );
                text
            }
            Err(e) => {
                error!("LLM error: {:#}", e);
                String::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> GeminiClient {
        GeminiClient::new(
            "test-key",
            "gemini-2.5-flash-lite",
            base_url,
            Duration::from_secs(2),
        )
        .unwrap()
    }

    #[test]
    fn test_empty_key_is_config_error() {
        let result = GeminiClient::new("  ", "m", "https://example.com", Duration::from_secs(1));
        assert!(matches!(result, Err(TrailBuddyError::Config { .. })));
    }

    #[test]
    fn test_missing_env_key_is_config_error() {
        let config = LlmConfig {
            api_key_env: "TRAILBUDDY_TEST_KEY_THAT_IS_NEVER_SET".to_string(),
            ..LlmConfig::default()
        };
        let err = GeminiClient::from_config(&config).err().unwrap();
        assert!(err.to_string().contains("TRAILBUDDY_TEST_KEY_THAT_IS_NEVER_SET"));
    }

    #[test]
    fn test_endpoint() {
        let client = client("https://generativelanguage.googleapis.com/v1beta/");
        assert_eq!(
            client.endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash-lite:generateContent"
        );
    }

    #[test]
    fn test_request_serialization() {
        let request = GenerateRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: "Hello" }],
            }],
            generation_config: GenerationConfig {
                max_output_tokens: 500,
            },
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "Hello");
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 500);
    }

    #[test]
    fn test_response_text_joins_parts() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":" Catbells is "},{"text":"lovely. "}]}}]}"#;
        let parsed: GenerateResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.text(), "Catbells is lovely.");
    }

    #[test]
    fn test_response_without_candidates_is_empty() {
        let parsed: GenerateResponse = serde_json::from_str(r#"{"promptFeedback":{}}"#).unwrap();
        assert_eq!(parsed.text(), "");

        let blocked: GenerateResponse =
            serde_json::from_str(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#).unwrap();
        assert_eq!(blocked.text(), "");
    }

    #[tokio::test]
    async fn test_transport_failure_yields_empty_string() {
        let client = client("http://127.0.0.1:9");
        assert_eq!(client.complete("Describe Catbells", 50).await, "");
    }
}

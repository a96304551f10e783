//! Google Gemini API adapter

use async_trait::async_trait;
use autoposter_domain::{ContentGenerator, GenerateError};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

use super::{FALLBACK_CONTENT, GeneratorConfig, build_article_prompt};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Gemini text generator
pub struct GeminiGenerator {
    client: Client,
    api_key: SecretString,
    base_url: String,
    config: GeneratorConfig,
}

impl GeminiGenerator {
    pub fn new(api_key: SecretString, config: GeneratorConfig) -> Result<Self, GenerateError> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string(), config)
    }

    pub fn with_base_url(
        api_key: SecretString,
        base_url: String,
        config: GeneratorConfig,
    ) -> Result<Self, GenerateError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GenerateError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            config,
        })
    }

    async fn call_api(&self, prompt: &str) -> Result<Value, GenerateError> {
        let request = GenerateTextRequest {
            prompt: Prompt { text: prompt },
            max_output_tokens: self.config.max_output_tokens,
        };

        let url = format!(
            "{}/v1beta/models/{}:generateText",
            self.base_url, self.config.model
        );

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("x-goog-api-key", self.api_key.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Gemini request failed");
                if e.is_timeout() {
                    GenerateError::Timeout
                } else {
                    GenerateError::Network(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "Gemini error");
            return Err(GenerateError::Api(format!(
                "API returned {}: {}",
                status, body
            )));
        }

        response.json().await.map_err(|e| {
            tracing::error!(error = %e, "Gemini returned a non-JSON body");
            GenerateError::InvalidFormat(e.to_string())
        })
    }
}

#[derive(Serialize)]
struct GenerateTextRequest<'a> {
    prompt: Prompt<'a>,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Serialize)]
struct Prompt<'a> {
    text: &'a str,
}

/// First non-empty text at `candidates[0].content` or `output[0].content`.
///
/// `content` is normally a string; the structured `{ "parts": [{ "text" }] }`
/// shape is joined into one string.
fn extract_text(response: &Value) -> Option<String> {
    [
        &response["candidates"][0]["content"],
        &response["output"][0]["content"],
    ]
    .into_iter()
    .filter_map(content_text)
    .find(|text| !text.is_empty())
}

fn content_text(content: &Value) -> Option<String> {
    match content {
        Value::String(text) => Some(text.clone()),
        Value::Object(_) => {
            let parts = content["parts"].as_array()?;
            Some(
                parts
                    .iter()
                    .filter_map(|p| p["text"].as_str())
                    .collect::<Vec<_>>()
                    .join(""),
            )
        }
        _ => None,
    }
}

#[async_trait]
impl ContentGenerator for GeminiGenerator {
    async fn generate(&self, topic: &str) -> Result<String, GenerateError> {
        let prompt = build_article_prompt(topic);
        let response = self.call_api(&prompt).await?;

        match extract_text(&response) {
            Some(text) => Ok(text),
            None => {
                tracing::warn!("Gemini response had no text, using placeholder content");
                Ok(FALLBACK_CONTENT.to_string())
            }
        }
    }
}

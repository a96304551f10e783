//! LLM provider adapters

pub mod gemini;
pub mod stub;

pub use gemini::GeminiGenerator;
pub use stub::StubGenerator;

use serde::{Deserialize, Serialize};

/// Text returned when the API answers without any usable content
pub const FALLBACK_CONTENT: &str = "No content";

/// Common LLM configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Model name/ID
    pub model: String,
    /// Maximum output tokens
    pub max_output_tokens: u32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-pro-latest".to_string(),
            max_output_tokens: 900,
            timeout_secs: 60,
        }
    }
}

/// Build the article generation prompt
pub fn build_article_prompt(topic: &str) -> String {
    format!(
        "Write an SEO-optimized English blog post (700-1000 words) about:\n{}\n\n\
         Produce:\n\
         1) Full blog post in HTML (with H2, H3, paragraphs and 3-5 suggested tags)\n\
         2) A short Reddit-friendly summary (max 90 words) with one discussion question.",
        topic
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_mentions_topic_and_constraints() {
        let prompt = build_article_prompt("Rust for scripting");

        assert!(prompt.contains("about:\nRust for scripting\n\nProduce:"));
        assert!(prompt.contains("700-1000 words"));
        assert!(prompt.contains("H2, H3"));
        assert!(prompt.contains("max 90 words"));
        assert!(prompt.contains("discussion question"));
    }
}

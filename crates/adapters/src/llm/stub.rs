//! Stub generator for testing and offline mode

use async_trait::async_trait;
use autoposter_domain::{ContentGenerator, GenerateError};

/// Stub generator that returns configurable responses
pub struct StubGenerator {
    text: Option<String>,
    error: Option<String>,
}

impl StubGenerator {
    /// Create a stub that writes a small article about the requested topic
    pub fn echo() -> Self {
        Self {
            text: None,
            error: None,
        }
    }

    /// Create a stub that always returns the given text
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            error: None,
        }
    }

    /// Create a stub that always fails with an API error
    pub fn with_error(message: impl Into<String>) -> Self {
        Self {
            text: None,
            error: Some(message.into()),
        }
    }
}

impl Default for StubGenerator {
    fn default() -> Self {
        Self::echo()
    }
}

#[async_trait]
impl ContentGenerator for StubGenerator {
    async fn generate(&self, topic: &str) -> Result<String, GenerateError> {
        if let Some(ref message) = self.error {
            return Err(GenerateError::Api(message.clone()));
        }

        if let Some(ref text) = self.text {
            return Ok(text.clone());
        }

        Ok(format!(
            "{}\n\n<h2>Overview</h2>\n<p>Stub article about {}.</p>\n\n\
             Summary: stub summary. What do you think?",
            topic,
            topic.to_lowercase()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use autoposter_domain::ArticleDraft;

    #[tokio::test]
    async fn test_echo_stub_titles_with_topic() {
        let generator = StubGenerator::echo();
        let text = generator.generate("Rust Tips").await.unwrap();

        let draft = ArticleDraft::from_generated(&text);
        assert_eq!(draft.title, "Rust Tips");
        assert_eq!(draft.slug, "rust-tips");
        assert!(text.contains("<h2>Overview</h2>"));
    }

    #[tokio::test]
    async fn test_fixed_text_stub() {
        let generator = StubGenerator::with_text("Hello World\n\nMore text");
        let text = generator.generate("anything").await.unwrap();

        assert_eq!(text, "Hello World\n\nMore text");
    }

    #[tokio::test]
    async fn test_error_stub() {
        let generator = StubGenerator::with_error("quota exceeded");
        let result = generator.generate("anything").await;

        assert!(matches!(result, Err(GenerateError::Api(ref m)) if m == "quota exceeded"));
    }
}

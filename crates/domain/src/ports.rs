//! Port definitions (traits) for external dependencies
//!
//! These traits define the boundaries between the domain and external systems.
//! Adapters implement these traits to connect to real infrastructure.

use async_trait::async_trait;
use rand::Rng;
use thiserror::Error;
use time::OffsetDateTime;

use crate::model::{BlogPost, DiscussionPost, PostRecord};

/// Error type for content generation
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("LLM API error: {0}")]
    Api(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Timeout")]
    Timeout,
    #[error("Invalid response format: {0}")]
    InvalidFormat(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Port for generating article text from a topic
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Generate article text for the topic.
    ///
    /// Returns the raw generated text, or a placeholder when the API
    /// answered without any usable text.
    async fn generate(&self, topic: &str) -> Result<String, GenerateError>;
}

/// Error type for publisher operations
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("API error: {0}")]
    Api(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Rate limited")]
    RateLimited,
    #[error("Authentication failed: {0}")]
    Auth(String),
    #[error("Publisher is disabled")]
    Disabled,
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Port for publishing the full article
#[async_trait]
pub trait BlogPublisher: Send + Sync {
    /// Create the post, returning its public URL when the API provides one
    async fn publish(&self, post: &BlogPost) -> Result<Option<String>, PublishError>;
}

/// Port for cross-posting a summary to a discussion platform
#[async_trait]
pub trait DiscussionPublisher: Send + Sync {
    /// Submit a self-post
    async fn submit(&self, post: &DiscussionPost) -> Result<bool, PublishError>;
}

/// Error type for posted log operations
#[derive(Debug, Error)]
pub enum LogError {
    #[error("IO error on {path}: {message}")]
    Io { path: String, message: String },
    #[error("Posted log {path} is corrupt: {message}")]
    Corrupt { path: String, message: String },
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Port for the durable list of already published titles
#[async_trait]
pub trait PostedLog: Send + Sync {
    /// Create backing storage holding an empty log, if missing
    async fn initialize(&self) -> Result<(), LogError>;

    /// Load all records, oldest first
    async fn load(&self) -> Result<Vec<PostRecord>, LogError>;

    /// Replace the stored records
    async fn save(&self, records: &[PostRecord]) -> Result<(), LogError>;
}

/// Port for choosing the topic of a run
pub trait TopicPicker: Send + Sync {
    /// Pick one of `topics`, `None` if it is empty
    fn pick<'a>(&self, topics: &'a [String]) -> Option<&'a str>;
}

/// Uniform random topic selection
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomTopicPicker;

impl TopicPicker for RandomTopicPicker {
    fn pick<'a>(&self, topics: &'a [String]) -> Option<&'a str> {
        if topics.is_empty() {
            return None;
        }
        let index = rand::thread_rng().gen_range(0..topics.len());
        topics.get(index).map(String::as_str)
    }
}

/// Port for time/clock operations (enables deterministic testing)
pub trait Clock: Send + Sync {
    /// Get the current time
    fn now(&self) -> OffsetDateTime;
}

/// Real clock implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_picker_empty() {
        assert_eq!(RandomTopicPicker.pick(&[]), None);
    }

    #[test]
    fn test_random_picker_stays_in_list() {
        let topics = vec!["T1".to_string(), "T2".to_string(), "T3".to_string()];

        for _ in 0..50 {
            let picked = RandomTopicPicker.pick(&topics).unwrap();
            assert!(topics.iter().any(|t| t == picked));
        }
    }

    #[test]
    fn test_random_picker_single_topic() {
        let topics = vec!["only".to_string()];
        assert_eq!(RandomTopicPicker.pick(&topics), Some("only"));
    }
}

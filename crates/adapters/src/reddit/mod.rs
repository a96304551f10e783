//! Reddit API adapter for cross-posting summaries
//!
//! Authentication uses the OAuth2 password grant with the app's client
//! credentials. A fresh token is fetched for every submission.

mod auth;
mod submit;

use autoposter_domain::PublishError;
use reqwest::Client;
use secrecy::SecretString;
use std::time::Duration;

const DEFAULT_AUTH_BASE_URL: &str = "https://www.reddit.com";
const DEFAULT_API_BASE_URL: &str = "https://oauth.reddit.com";

/// Script-app credentials and the account that posts
pub struct RedditCredentials {
    pub username: String,
    pub password: SecretString,
    pub client_id: String,
    pub client_secret: SecretString,
}

/// Reddit endpoint and posting settings
#[derive(Debug, Clone)]
pub struct RedditConfig {
    /// Community to post to, without the `r/` prefix
    pub subreddit: String,
    pub user_agent: String,
    pub auth_base_url: String,
    pub api_base_url: String,
    pub timeout_secs: u64,
}

impl Default for RedditConfig {
    fn default() -> Self {
        Self {
            subreddit: "test".to_string(),
            user_agent: "WordloomBot/1.0".to_string(),
            auth_base_url: DEFAULT_AUTH_BASE_URL.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

/// Reddit self-post publisher
pub struct RedditPublisher {
    client: Client,
    credentials: RedditCredentials,
    config: RedditConfig,
    enabled: bool,
}

impl RedditPublisher {
    pub fn new(credentials: RedditCredentials, config: RedditConfig) -> Result<Self, PublishError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| PublishError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            credentials,
            config: RedditConfig {
                auth_base_url: config.auth_base_url.trim_end_matches('/').to_string(),
                api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
                ..config
            },
            enabled: true,
        })
    }

    /// Create a disabled publisher (for dry-run)
    pub fn disabled() -> Self {
        Self {
            client: Client::new(),
            credentials: RedditCredentials {
                username: String::new(),
                password: SecretString::new("".into()),
                client_id: String::new(),
                client_secret: SecretString::new("".into()),
            },
            config: RedditConfig::default(),
            enabled: false,
        }
    }

    /// Community this publisher posts to
    pub fn subreddit(&self) -> &str {
        &self.config.subreddit
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    pub fn publisher(base_url: &str) -> RedditPublisher {
        RedditPublisher::new(
            RedditCredentials {
                username: "poster".to_string(),
                password: SecretString::new("hunter2".into()),
                client_id: "client-id".to_string(),
                client_secret: SecretString::new("client-secret".into()),
            },
            RedditConfig {
                auth_base_url: base_url.to_string(),
                api_base_url: base_url.to_string(),
                ..Default::default()
            },
        )
        .unwrap()
    }
}

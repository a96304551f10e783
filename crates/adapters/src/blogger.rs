//! Blogger API adapter for publishing articles

use async_trait::async_trait;
use autoposter_domain::{BlogPost, BlogPublisher, PublishError};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com";

/// Blogger v3 publisher for a single blog
pub struct BloggerPublisher {
    client: Client,
    blog_id: String,
    token: SecretString,
    base_url: String,
    enabled: bool,
}

impl BloggerPublisher {
    pub fn new(
        blog_id: String,
        token: SecretString,
        timeout_secs: u64,
    ) -> Result<Self, PublishError> {
        Self::with_base_url(blog_id, token, DEFAULT_BASE_URL.to_string(), timeout_secs)
    }

    pub fn with_base_url(
        blog_id: String,
        token: SecretString,
        base_url: String,
        timeout_secs: u64,
    ) -> Result<Self, PublishError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| PublishError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            blog_id,
            token,
            base_url: base_url.trim_end_matches('/').to_string(),
            enabled: true,
        })
    }

    /// Create a disabled publisher (for dry-run)
    pub fn disabled() -> Self {
        Self {
            client: Client::new(),
            blog_id: String::new(),
            token: SecretString::new("".into()),
            base_url: String::new(),
            enabled: false,
        }
    }
}

#[derive(Serialize)]
struct CreatePostRequest<'a> {
    kind: &'static str,
    title: &'a str,
    content: &'a str,
    labels: &'a [String],
}

#[derive(Deserialize)]
struct CreatePostResponse {
    url: Option<String>,
}

#[async_trait]
impl BlogPublisher for BloggerPublisher {
    async fn publish(&self, post: &BlogPost) -> Result<Option<String>, PublishError> {
        if !self.enabled {
            return Err(PublishError::Disabled);
        }

        let request = CreatePostRequest {
            kind: "blogger#post",
            title: &post.title,
            content: &post.html_body,
            labels: &post.labels,
        };

        let url = format!("{}/blogger/v3/blogs/{}/posts/", self.base_url, self.blog_id);

        let response = self
            .client
            .post(&url)
            .header(
                "Authorization",
                format!("Bearer {}", self.token.expose_secret()),
            )
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Blogger request failed");
                PublishError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "Blogger error");
            return Err(match status.as_u16() {
                401 => PublishError::Auth(body),
                429 => PublishError::RateLimited,
                _ => PublishError::Api(format!("Failed to create post ({}): {}", status, body)),
            });
        }

        let created: CreatePostResponse = response.json().await.map_err(|e| {
            tracing::error!(error = %e, "Blogger returned an unreadable body");
            PublishError::Api(e.to_string())
        })?;

        if created.url.is_none() {
            tracing::warn!("Blogger response had no post URL");
        }

        Ok(created.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sample_post() -> BlogPost {
        BlogPost {
            title: "Hello World".to_string(),
            html_body: "<h2>Hello</h2><p>World</p>".to_string(),
            labels: vec![],
        }
    }

    fn publisher(base_url: String) -> BloggerPublisher {
        BloggerPublisher::with_base_url(
            "12345".to_string(),
            SecretString::new("blog-token".into()),
            base_url,
            30,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_publish_success_returns_url() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/blogger/v3/blogs/12345/posts/"))
            .and(header("Authorization", "Bearer blog-token"))
            .and(body_json(serde_json::json!({
                "kind": "blogger#post",
                "title": "Hello World",
                "content": "<h2>Hello</h2><p>World</p>",
                "labels": []
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "kind": "blogger#post",
                "id": "987",
                "url": "https://example.blogspot.com/2024/05/hello-world.html"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let url = publisher(mock_server.uri())
            .publish(&sample_post())
            .await
            .unwrap();

        assert_eq!(
            url.as_deref(),
            Some("https://example.blogspot.com/2024/05/hello-world.html")
        );
    }

    #[tokio::test]
    async fn test_publish_without_url_field() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/blogger/v3/blogs/12345/posts/"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": "987" })),
            )
            .mount(&mock_server)
            .await;

        let url = publisher(mock_server.uri())
            .publish(&sample_post())
            .await
            .unwrap();

        assert_eq!(url, None);
    }

    #[tokio::test]
    async fn test_publish_unauthorized() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/blogger/v3/blogs/12345/posts/"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Invalid Credentials"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let result = publisher(mock_server.uri()).publish(&sample_post()).await;

        assert!(matches!(result, Err(PublishError::Auth(ref body)) if body.contains("Invalid Credentials")));
    }

    #[tokio::test]
    async fn test_publish_server_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/blogger/v3/blogs/12345/posts/"))
            .respond_with(ResponseTemplate::new(500).set_body_string("backend error"))
            .mount(&mock_server)
            .await;

        let result = publisher(mock_server.uri()).publish(&sample_post()).await;

        assert!(matches!(result, Err(PublishError::Api(_))));
    }

    #[tokio::test]
    async fn test_disabled_publisher() {
        let result = BloggerPublisher::disabled().publish(&sample_post()).await;

        assert!(matches!(result, Err(PublishError::Disabled)));
    }
}

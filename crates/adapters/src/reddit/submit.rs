//! Self-post submission

use async_trait::async_trait;
use autoposter_domain::{DiscussionPost, DiscussionPublisher, PublishError};
use secrecy::ExposeSecret;
use serde_json::Value;

use super::RedditPublisher;

/// Messages from the `json.errors` array Reddit returns with a 200 response
fn submission_errors(body: &str) -> Vec<String> {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return vec![];
    };

    value["json"]["errors"]
        .as_array()
        .map(|errors| errors.iter().map(|e| e.to_string()).collect())
        .unwrap_or_default()
}

#[async_trait]
impl DiscussionPublisher for RedditPublisher {
    /// Submit a self-post.
    ///
    /// Reddit may reject a submission with HTTP 200 and a non-empty
    /// `json.errors` array. Those are logged as warnings and the call still
    /// returns `Ok(true)`; only non-2xx statuses are errors.
    async fn submit(&self, post: &DiscussionPost) -> Result<bool, PublishError> {
        if !self.enabled {
            return Err(PublishError::Disabled);
        }

        let token = self.authenticate().await?;
        let url = format!("{}/api/submit", self.config.api_base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(token.expose_secret())
            .form(&[
                ("sr", self.config.subreddit.as_str()),
                ("kind", "self"),
                ("title", post.title.as_str()),
                ("text", post.text.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Reddit submit request failed");
                PublishError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "Reddit post error");
            return Err(match status.as_u16() {
                401 | 403 => PublishError::Auth(body),
                429 => PublishError::RateLimited,
                _ => PublishError::Api(format!("Failed to submit post ({}): {}", status, body)),
            });
        }

        let body = response.text().await.unwrap_or_default();
        let errors = submission_errors(&body);
        if errors.is_empty() {
            tracing::debug!(subreddit = %self.config.subreddit, "Reddit accepted submission");
        } else {
            tracing::warn!(
                subreddit = %self.config.subreddit,
                errors = ?errors,
                "Reddit answered 200 but reported submission errors"
            );
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::publisher;
    use super::*;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sample_post() -> DiscussionPost {
        DiscussionPost {
            title: "Hello World".to_string(),
            text: "Read the full article".to_string(),
        }
    }

    async fn mount_token(mock_server: &MockServer, expected_calls: u64) {
        Mock::given(method("POST"))
            .and(path("/api/v1/access_token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "fresh-token",
                "token_type": "bearer"
            })))
            .expect(expected_calls)
            .mount(mock_server)
            .await;
    }

    #[tokio::test]
    async fn test_submit_self_post() {
        let mock_server = MockServer::start().await;
        mount_token(&mock_server, 1).await;

        Mock::given(method("POST"))
            .and(path("/api/submit"))
            .and(header("Authorization", "Bearer fresh-token"))
            .and(header("User-Agent", "WordloomBot/1.0"))
            .and(body_string_contains("sr=test"))
            .and(body_string_contains("kind=self"))
            .and(body_string_contains("title=Hello+World"))
            .and(body_string_contains("text=Read+the+full+article"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": true
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let submitted = publisher(&mock_server.uri())
            .submit(&sample_post())
            .await
            .unwrap();

        assert!(submitted);
    }

    #[tokio::test]
    async fn test_each_submit_fetches_a_new_token() {
        let mock_server = MockServer::start().await;
        mount_token(&mock_server, 2).await;

        Mock::given(method("POST"))
            .and(path("/api/submit"))
            .respond_with(ResponseTemplate::new(200))
            .expect(2)
            .mount(&mock_server)
            .await;

        let reddit = publisher(&mock_server.uri());
        reddit.submit(&sample_post()).await.unwrap();
        reddit.submit(&sample_post()).await.unwrap();
    }

    #[tokio::test]
    async fn test_token_failure_skips_submit() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/v1/access_token"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        Mock::given(method("POST"))
            .and(path("/api/submit"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let result = publisher(&mock_server.uri()).submit(&sample_post()).await;

        assert!(matches!(result, Err(PublishError::Auth(_))));
    }

    #[tokio::test]
    async fn test_submit_rate_limited() {
        let mock_server = MockServer::start().await;
        mount_token(&mock_server, 1).await;

        Mock::given(method("POST"))
            .and(path("/api/submit"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&mock_server)
            .await;

        let result = publisher(&mock_server.uri()).submit(&sample_post()).await;

        assert!(matches!(result, Err(PublishError::RateLimited)));
    }

    #[test]
    fn test_submission_errors_parsing() {
        let body = r#"{"json":{"errors":[["SUBREDDIT_NOEXIST","that subreddit doesn't exist","sr"]]}}"#;
        let errors = submission_errors(body);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("SUBREDDIT_NOEXIST"));

        assert!(submission_errors(r#"{"json":{"errors":[],"data":{"id":"abc"}}}"#).is_empty());
        assert!(submission_errors("").is_empty());
        assert!(submission_errors("<html>ok</html>").is_empty());
    }

    #[tokio::test]
    async fn test_submit_with_body_errors_still_succeeds() {
        let mock_server = MockServer::start().await;
        mount_token(&mock_server, 1).await;

        Mock::given(method("POST"))
            .and(path("/api/submit"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "json": { "errors": [["RATELIMIT", "you are doing that too much", "ratelimit"]] }
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let result = publisher(&mock_server.uri()).submit(&sample_post()).await;

        assert!(matches!(result, Ok(true)));
    }

    #[tokio::test]
    async fn test_disabled_publisher() {
        let result = RedditPublisher::disabled().submit(&sample_post()).await;

        assert!(matches!(result, Err(PublishError::Disabled)));
    }
}

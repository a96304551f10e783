//! Run pipeline use case - generates, publishes, cross-posts and records one article

use std::sync::Arc;

use crate::{
    derive::compose_discussion_text,
    model::{ArticleDraft, BlogPost, CorruptLogPolicy, DiscussionPost, PostRecord, RunOutcome},
    ports::{
        BlogPublisher, Clock, ContentGenerator, DiscussionPublisher, GenerateError, LogError,
        PostedLog, PublishError, TopicPicker,
    },
};

/// Configuration for a pipeline run
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Candidate topics, one is picked per run
    pub topics: Vec<String>,
    /// Labels attached to the blog post
    pub labels: Vec<String>,
    /// Generate and check, but don't publish or record
    pub dry_run: bool,
    /// What to do with an unparseable posted log
    pub corrupt_log_policy: CorruptLogPolicy,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            topics: crate::model::DEFAULT_TOPICS
                .iter()
                .map(|t| t.to_string())
                .collect(),
            labels: vec![],
            dry_run: false,
            corrupt_log_policy: CorruptLogPolicy::default(),
        }
    }
}

/// Errors that abort a run
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("No topics configured")]
    NoTopics,
    #[error("Content generation failed: {0}")]
    Generate(#[source] GenerateError),
    #[error("Posted log error: {0}")]
    Log(#[source] LogError),
    #[error("Blog publishing failed: {0}")]
    Blog(#[source] PublishError),
    #[error("Discussion publishing failed: {0}")]
    Discussion(#[source] PublishError),
}

/// Single-run orchestrator.
///
/// Steps run strictly in order and any failure aborts the run. A failure
/// after the blog post was created leaves that post unrecorded, so a later
/// run can publish the same title again.
pub struct RunPipeline<G, B, D, L, T, Cl>
where
    G: ContentGenerator + ?Sized,
    B: BlogPublisher + ?Sized,
    D: DiscussionPublisher + ?Sized,
    L: PostedLog + ?Sized,
    T: TopicPicker + ?Sized,
    Cl: Clock + ?Sized,
{
    generator: Arc<G>,
    blog: Arc<B>,
    discussion: Arc<D>,
    posted_log: Arc<L>,
    topic_picker: Arc<T>,
    clock: Arc<Cl>,
    config: RunConfig,
}

impl<G, B, D, L, T, Cl> RunPipeline<G, B, D, L, T, Cl>
where
    G: ContentGenerator + ?Sized,
    B: BlogPublisher + ?Sized,
    D: DiscussionPublisher + ?Sized,
    L: PostedLog + ?Sized,
    T: TopicPicker + ?Sized,
    Cl: Clock + ?Sized,
{
    pub fn new(
        generator: Arc<G>,
        blog: Arc<B>,
        discussion: Arc<D>,
        posted_log: Arc<L>,
        topic_picker: Arc<T>,
        clock: Arc<Cl>,
        config: RunConfig,
    ) -> Self {
        Self {
            generator,
            blog,
            discussion,
            posted_log,
            topic_picker,
            clock,
            config,
        }
    }

    /// Run the whole pipeline once
    pub async fn run_once(&self) -> Result<RunOutcome, RunError> {
        self.posted_log.initialize().await.map_err(RunError::Log)?;

        let topic = self
            .topic_picker
            .pick(&self.config.topics)
            .ok_or(RunError::NoTopics)?
            .to_string();

        tracing::info!(topic = %topic, "Selected topic");

        let text = self
            .generator
            .generate(&topic)
            .await
            .map_err(RunError::Generate)?;

        let draft = ArticleDraft::from_generated(&text);

        tracing::info!(
            title = %draft.title,
            slug = %draft.slug,
            body_len = draft.body.len(),
            "Generated article"
        );

        let mut records = self.load_records().await?;

        if records.iter().any(|r| r.title == draft.title) {
            tracing::info!(title = %draft.title, "Already posted this title, skipping");
            return Ok(RunOutcome::Duplicate {
                topic,
                title: draft.title,
            });
        }

        if self.config.dry_run {
            tracing::info!(
                title = %draft.title,
                labels = ?self.config.labels,
                "[DRY RUN] Would publish"
            );
            return Ok(RunOutcome::DryRun { topic, draft });
        }

        let blog_post = BlogPost {
            title: draft.title.clone(),
            html_body: draft.body.clone(),
            labels: self.config.labels.clone(),
        };
        let url = self.blog.publish(&blog_post).await.map_err(RunError::Blog)?;

        tracing::info!(url = ?url, "Posted to blog");

        let discussion_post = DiscussionPost {
            title: draft.title.clone(),
            text: compose_discussion_text(&draft.title, url.as_deref()),
        };
        self.discussion
            .submit(&discussion_post)
            .await
            .map_err(RunError::Discussion)?;

        tracing::info!(title = %draft.title, "Posted to discussion platform");

        let record = PostRecord {
            title: draft.title,
            url,
            slug: draft.slug,
            date: self.clock.now(),
        };
        records.push(record.clone());
        self.posted_log
            .save(&records)
            .await
            .map_err(RunError::Log)?;

        tracing::info!(total = records.len(), "Saved posted log");

        Ok(RunOutcome::Published { topic, record })
    }

    async fn load_records(&self) -> Result<Vec<PostRecord>, RunError> {
        match self.posted_log.load().await {
            Ok(records) => Ok(records),
            Err(e @ LogError::Corrupt { .. }) => match self.config.corrupt_log_policy {
                CorruptLogPolicy::TreatAsEmpty => {
                    tracing::warn!(
                        error = %e,
                        "Posted log is corrupt, continuing with an empty log; existing entries will be overwritten"
                    );
                    Ok(vec![])
                }
                CorruptLogPolicy::Abort => Err(RunError::Log(e)),
            },
            Err(e) => Err(RunError::Log(e)),
        }
    }
}

//! Domain models and value objects

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::derive::{pick_title, slugify};

/// Topics used when none are configured
pub const DEFAULT_TOPICS: [&str; 3] = [
    "AI writing tools to boost content creation for small businesses",
    "How Wordloom improves SEO and writer productivity",
    "Best practices for using AI content safely and ethically",
];

/// A completed publish event, as kept in the posted log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRecord {
    /// Title derived from the generated content
    pub title: String,
    /// URL of the published blog post, if the blog API returned one
    pub url: Option<String>,
    /// URL-safe slug of the title
    pub slug: String,
    /// When the run completed
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
}

/// An article derived from raw generated text.
///
/// The generator is asked for an article plus a short summary, but its
/// response is handled as a single string: the first non-blank line is the
/// title and the whole text, unmodified, is the body. No summary is taken
/// from the model output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleDraft {
    pub title: String,
    pub slug: String,
    /// HTML body, passed to the blog as-is
    pub body: String,
}

impl ArticleDraft {
    /// Derive title, slug and body from generated text
    pub fn from_generated(text: &str) -> Self {
        let title = pick_title(text);
        let slug = slugify(&title);

        Self {
            title,
            slug,
            body: text.to_string(),
        }
    }
}

/// A post to be created on the blog
#[derive(Debug, Clone)]
pub struct BlogPost {
    pub title: String,
    pub html_body: String,
    pub labels: Vec<String>,
}

/// A self-post to be submitted to the discussion platform
#[derive(Debug, Clone)]
pub struct DiscussionPost {
    pub title: String,
    pub text: String,
}

/// What to do when the posted log cannot be parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CorruptLogPolicy {
    /// Warn and continue as if the log were empty
    #[default]
    TreatAsEmpty,
    /// Stop the run
    Abort,
}

/// Result of a single pipeline run
#[derive(Debug)]
pub enum RunOutcome {
    /// Article was published and recorded
    Published { topic: String, record: PostRecord },
    /// Title already in the posted log; nothing was published
    Duplicate { topic: String, title: String },
    /// Dry run; nothing was published or recorded
    DryRun { topic: String, draft: ArticleDraft },
}

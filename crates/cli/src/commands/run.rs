//! Run command - one generate, publish, cross-post and record cycle

use anyhow::{Context, Result, bail};
use autoposter_adapters::{
    blogger::BloggerPublisher,
    llm::{GeminiGenerator, GeneratorConfig as AdapterGeneratorConfig, StubGenerator},
    reddit::{RedditConfig as AdapterRedditConfig, RedditCredentials, RedditPublisher},
    state::JsonFilePostedLog,
};
use autoposter_domain::{
    BlogPublisher, ContentGenerator, DiscussionPublisher, RandomTopicPicker, RunOutcome,
    SystemClock,
    usecases::{RunConfig, RunPipeline},
};
use std::path::PathBuf;
use std::sync::Arc;

use crate::args::RunArgs;
use crate::config::{AppConfig, load_env_value, load_secret};

pub async fn execute(args: RunArgs, config_path: Option<PathBuf>) -> Result<()> {
    let config = AppConfig::load(config_path.as_deref())?;
    let dry_run = args.dry_run || config.general.dry_run;
    tracing::debug!(config = ?config, "Loaded configuration");

    tracing::info!(
        dry_run = dry_run,
        provider = %config.generator.provider,
        posted_log = %config.posted_log_path().display(),
        topics = config.topics.len(),
        "Starting autoposter run"
    );

    // Build dependencies
    let generator: Arc<dyn ContentGenerator> = Arc::from(build_generator(&config)?);
    let blog: Arc<dyn BlogPublisher> = if dry_run {
        Arc::new(BloggerPublisher::disabled())
    } else {
        Arc::new(build_blog_publisher(&config)?)
    };
    let discussion: Arc<dyn DiscussionPublisher> = if dry_run {
        Arc::new(RedditPublisher::disabled())
    } else {
        Arc::new(build_reddit_publisher(&config)?)
    };
    let posted_log = Arc::new(JsonFilePostedLog::new(config.posted_log_path()));

    let pipeline = RunPipeline::new(
        generator,
        blog,
        discussion,
        posted_log,
        Arc::new(RandomTopicPicker),
        Arc::new(SystemClock),
        run_config_from_config(&config, dry_run),
    );

    let outcome = pipeline.run_once().await.context("Run failed")?;

    match outcome {
        RunOutcome::Published { topic, record } => {
            tracing::info!(
                topic = %topic,
                title = %record.title,
                url = ?record.url,
                slug = %record.slug,
                "Published"
            );
        }
        RunOutcome::Duplicate { topic, title } => {
            tracing::info!(topic = %topic, title = %title, "Skipped duplicate title");
        }
        RunOutcome::DryRun { topic, draft } => {
            tracing::info!(topic = %topic, title = %draft.title, slug = %draft.slug, "Dry run complete");
            println!("{}", draft.title);
        }
    }

    tracing::info!("autoposter run completed");
    Ok(())
}

fn build_generator(config: &AppConfig) -> Result<Box<dyn ContentGenerator>> {
    let generator_config = AdapterGeneratorConfig {
        model: config.generator.model.clone(),
        max_output_tokens: config.generator.max_output_tokens,
        timeout_secs: config.generator.timeout_secs,
    };

    match config.generator.provider.as_str() {
        "gemini" => {
            let api_key = load_secret(&config.generator.api_key_env, "gemini")?;
            let generator = GeminiGenerator::with_base_url(
                api_key,
                config.generator.base_url.clone(),
                generator_config,
            )
            .context("Failed to configure Gemini generator")?;
            Ok(Box::new(generator))
        }
        "stub" => Ok(Box::new(StubGenerator::echo())),
        other => bail!("Unknown generator provider: {}", other),
    }
}

fn build_blog_publisher(config: &AppConfig) -> Result<BloggerPublisher> {
    let blog_id = load_env_value(&config.blogger.blog_id_env, "blogger blog id")?;
    let token = load_secret(&config.blogger.token_env, "blogger token")?;

    BloggerPublisher::with_base_url(
        blog_id,
        token,
        config.blogger.base_url.clone(),
        config.blogger.timeout_secs,
    )
    .context("Failed to configure Blogger publisher")
}

fn build_reddit_publisher(config: &AppConfig) -> Result<RedditPublisher> {
    let reddit = &config.reddit;
    let credentials = RedditCredentials {
        username: load_env_value(&reddit.username_env, "reddit username")?,
        password: load_secret(&reddit.password_env, "reddit password")?,
        client_id: load_env_value(&reddit.client_id_env, "reddit client id")?,
        client_secret: load_secret(&reddit.client_secret_env, "reddit client secret")?,
    };

    let publisher = RedditPublisher::new(
        credentials,
        AdapterRedditConfig {
            subreddit: config.resolve_subreddit(),
            user_agent: reddit.user_agent.clone(),
            auth_base_url: reddit.auth_base_url.clone(),
            api_base_url: reddit.api_base_url.clone(),
            timeout_secs: reddit.timeout_secs,
        },
    )
    .context("Failed to configure Reddit publisher")?;

    tracing::debug!(subreddit = %publisher.subreddit(), "Reddit publisher ready");
    Ok(publisher)
}

fn run_config_from_config(config: &AppConfig, dry_run: bool) -> RunConfig {
    RunConfig {
        topics: config.topics.clone(),
        labels: config.blogger.labels.clone(),
        dry_run,
        corrupt_log_policy: config.general.corrupt_log_policy,
    }
}

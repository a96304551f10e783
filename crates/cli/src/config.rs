//! Configuration loading and management

use anyhow::{Context, Result, bail};
use autoposter_domain::{CorruptLogPolicy, DEFAULT_TOPICS};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Candidate topics, one is picked at random per run
    #[serde(default = "default_topics")]
    pub topics: Vec<String>,

    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub generator: GeneratorConfig,

    #[serde(default)]
    pub blogger: BloggerConfig,

    #[serde(default)]
    pub reddit: RedditConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_posted_file")]
    pub posted_file: String,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub dry_run: bool,

    #[serde(default)]
    pub corrupt_log_policy: CorruptLogPolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// gemini or stub
    #[serde(default = "default_provider")]
    pub provider: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_gemini_base_url")]
    pub base_url: String,

    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,

    #[serde(default = "default_generator_timeout")]
    pub timeout_secs: u64,

    #[serde(default = "default_gemini_api_key_env")]
    pub api_key_env: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BloggerConfig {
    #[serde(default = "default_blogger_base_url")]
    pub base_url: String,

    #[serde(default = "default_blog_id_env")]
    pub blog_id_env: String,

    #[serde(default = "default_blogger_token_env")]
    pub token_env: String,

    #[serde(default)]
    pub labels: Vec<String>,

    #[serde(default = "default_publish_timeout")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditConfig {
    #[serde(default = "default_reddit_auth_base_url")]
    pub auth_base_url: String,

    #[serde(default = "default_reddit_api_base_url")]
    pub api_base_url: String,

    #[serde(default = "default_reddit_username_env")]
    pub username_env: String,

    #[serde(default = "default_reddit_password_env")]
    pub password_env: String,

    #[serde(default = "default_reddit_client_id_env")]
    pub client_id_env: String,

    #[serde(default = "default_reddit_client_secret_env")]
    pub client_secret_env: String,

    /// Used when the env var named by `subreddit_env` is unset
    #[serde(default = "default_subreddit")]
    pub subreddit: String,

    #[serde(default = "default_subreddit_env")]
    pub subreddit_env: String,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default = "default_publish_timeout")]
    pub timeout_secs: u64,
}

// Default value functions
fn default_topics() -> Vec<String> {
    DEFAULT_TOPICS.iter().map(|t| t.to_string()).collect()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_posted_file() -> String {
    "posted.json".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_provider() -> String {
    "gemini".to_string()
}

fn default_model() -> String {
    "gemini-2.5-pro-latest".to_string()
}

fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_max_output_tokens() -> u32 {
    900
}

fn default_generator_timeout() -> u64 {
    60
}

fn default_gemini_api_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}

fn default_blogger_base_url() -> String {
    "https://www.googleapis.com".to_string()
}

fn default_blog_id_env() -> String {
    "BLOGGER_ID".to_string()
}

fn default_blogger_token_env() -> String {
    "BLOGGER_TOKEN".to_string()
}

fn default_publish_timeout() -> u64 {
    30
}

fn default_reddit_auth_base_url() -> String {
    "https://www.reddit.com".to_string()
}

fn default_reddit_api_base_url() -> String {
    "https://oauth.reddit.com".to_string()
}

fn default_reddit_username_env() -> String {
    "REDDIT_USER".to_string()
}

fn default_reddit_password_env() -> String {
    "REDDIT_PASS".to_string()
}

fn default_reddit_client_id_env() -> String {
    "REDDIT_CLIENT_ID".to_string()
}

fn default_reddit_client_secret_env() -> String {
    "REDDIT_SECRET".to_string()
}

fn default_subreddit() -> String {
    "test".to_string()
}

fn default_subreddit_env() -> String {
    "REDDIT_SUBREDDIT".to_string()
}

fn default_user_agent() -> String {
    "WordloomBot/1.0".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            topics: default_topics(),
            general: GeneralConfig::default(),
            generator: GeneratorConfig::default(),
            blogger: BloggerConfig::default(),
            reddit: RedditConfig::default(),
        }
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            posted_file: default_posted_file(),
            log_level: default_log_level(),
            dry_run: false,
            corrupt_log_policy: CorruptLogPolicy::default(),
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: default_model(),
            base_url: default_gemini_base_url(),
            max_output_tokens: default_max_output_tokens(),
            timeout_secs: default_generator_timeout(),
            api_key_env: default_gemini_api_key_env(),
        }
    }
}

impl Default for BloggerConfig {
    fn default() -> Self {
        Self {
            base_url: default_blogger_base_url(),
            blog_id_env: default_blog_id_env(),
            token_env: default_blogger_token_env(),
            labels: vec![],
            timeout_secs: default_publish_timeout(),
        }
    }
}

impl Default for RedditConfig {
    fn default() -> Self {
        Self {
            auth_base_url: default_reddit_auth_base_url(),
            api_base_url: default_reddit_api_base_url(),
            username_env: default_reddit_username_env(),
            password_env: default_reddit_password_env(),
            client_id_env: default_reddit_client_id_env(),
            client_secret_env: default_reddit_client_secret_env(),
            subreddit: default_subreddit(),
            subreddit_env: default_subreddit_env(),
            user_agent: default_user_agent(),
            timeout_secs: default_publish_timeout(),
        }
    }
}

impl AppConfig {
    /// Load configuration from file and environment
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        // Try default config path if none specified
        let default_path = PathBuf::from("./config.toml");
        let path = config_path.unwrap_or(&default_path);

        if path.exists() {
            builder = builder.add_source(config::File::from(path));
        } else if config_path.is_some() {
            // User specified a path that doesn't exist
            bail!("Config file not found: {}", path.display());
        }

        // Add environment variable overrides
        builder = builder.add_source(
            config::Environment::with_prefix("AUTOPOSTER")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Full path of the posted log file
    pub fn posted_log_path(&self) -> PathBuf {
        self.general.data_dir.join(&self.general.posted_file)
    }

    /// Community to post to: `subreddit_env` if set, else `subreddit`
    pub fn resolve_subreddit(&self) -> String {
        env_value(&self.reddit.subreddit_env).unwrap_or_else(|| self.reddit.subreddit.clone())
    }

    /// Generate example configuration as TOML string
    pub fn example_toml() -> String {
        r#"# autoposter configuration
# Secrets are never stored here; each *_env key names the environment
# variable to read them from (a .env file in the working directory is loaded).

topics = [
    "AI writing tools to boost content creation for small businesses",
    "How Wordloom improves SEO and writer productivity",
    "Best practices for using AI content safely and ethically",
]

[general]
data_dir = "./data"
posted_file = "posted.json"
log_level = "info"
dry_run = false
# treat_as_empty or abort
corrupt_log_policy = "treat_as_empty"

[generator]
provider = "gemini"  # gemini, stub
model = "gemini-2.5-pro-latest"
base_url = "https://generativelanguage.googleapis.com"
max_output_tokens = 900
timeout_secs = 60
api_key_env = "GEMINI_API_KEY"

[blogger]
base_url = "https://www.googleapis.com"
blog_id_env = "BLOGGER_ID"
token_env = "BLOGGER_TOKEN"
labels = []
timeout_secs = 30

[reddit]
auth_base_url = "https://www.reddit.com"
api_base_url = "https://oauth.reddit.com"
username_env = "REDDIT_USER"
password_env = "REDDIT_PASS"
client_id_env = "REDDIT_CLIENT_ID"
client_secret_env = "REDDIT_SECRET"
subreddit = "test"
subreddit_env = "REDDIT_SUBREDDIT"
user_agent = "WordloomBot/1.0"
timeout_secs = 30
"#
        .to_string()
    }
}

/// Non-empty value of an environment variable
pub(crate) fn env_value(env_var: &str) -> Option<String> {
    if env_var.trim().is_empty() {
        return None;
    }
    std::env::var(env_var)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Required plain value from the named environment variable
pub(crate) fn load_env_value(env_var: &str, what: &str) -> Result<String> {
    if env_var.trim().is_empty() {
        bail!("No env var configured for {}", what);
    }

    env_value(env_var).with_context(|| format!("Missing or empty env var {} for {}", env_var, what))
}

/// Required secret from the named environment variable
pub(crate) fn load_secret(env_var: &str, what: &str) -> Result<SecretString> {
    let value = load_env_value(env_var, what)?;
    Ok(SecretString::new(value.into()))
}

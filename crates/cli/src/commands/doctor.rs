//! Doctor command - validate configuration and show status

use anyhow::Result;
use autoposter_adapters::state::JsonFilePostedLog;
use autoposter_domain::{CorruptLogPolicy, LogError, PostedLog};
use serde::Serialize;
use std::path::PathBuf;

use crate::args::DoctorArgs;
use crate::config::{AppConfig, env_value};

#[derive(Debug, Serialize)]
struct DoctorReport {
    config: CheckResult,
    topics: CheckResult,
    generator: CheckResult,
    blogger: CheckResult,
    reddit: CheckResult,
    posted_log: CheckResult,
    overall: String,
}

#[derive(Debug, Serialize)]
struct CheckResult {
    status: String,
    message: String,
    details: Option<serde_json::Value>,
}

impl CheckResult {
    fn ok(message: impl Into<String>) -> Self {
        Self {
            status: "ok".to_string(),
            message: message.into(),
            details: None,
        }
    }

    fn warn(message: impl Into<String>) -> Self {
        Self {
            status: "warn".to_string(),
            message: message.into(),
            details: None,
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
            details: None,
        }
    }

    fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    fn is_ok(&self) -> bool {
        self.status == "ok"
    }

    fn is_error(&self) -> bool {
        self.status == "error"
    }
}

pub async fn execute(args: DoctorArgs, config_path: Option<PathBuf>) -> Result<()> {
    let mut report = DoctorReport {
        config: CheckResult::error("Not checked"),
        topics: CheckResult::error("Not checked"),
        generator: CheckResult::error("Not checked"),
        blogger: CheckResult::error("Not checked"),
        reddit: CheckResult::error("Not checked"),
        posted_log: CheckResult::error("Not checked"),
        overall: "error".to_string(),
    };

    let config = match AppConfig::load(config_path.as_deref()) {
        Ok(c) => {
            report.config = CheckResult::ok("Configuration loaded successfully");
            Some(c)
        }
        Err(e) => {
            report.config = CheckResult::error(format!("Failed to load config: {:#}", e));
            None
        }
    };

    if let Some(ref config) = config {
        report.topics = check_topics(config);
        report.generator = check_generator(config);
        report.blogger = check_blogger(config);
        report.reddit = check_reddit(config);
        report.posted_log = check_posted_log(config).await;
    }

    report.overall = overall_status(&[
        &report.config,
        &report.topics,
        &report.generator,
        &report.blogger,
        &report.reddit,
        &report.posted_log,
    ]);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    if report.overall == "error" {
        std::process::exit(1);
    }

    Ok(())
}

fn overall_status(checks: &[&CheckResult]) -> String {
    if checks.iter().any(|c| c.is_error()) {
        "error".to_string()
    } else if checks.iter().all(|c| c.is_ok()) {
        "ok".to_string()
    } else {
        "warn".to_string()
    }
}

fn check_topics(config: &AppConfig) -> CheckResult {
    let usable = config
        .topics
        .iter()
        .filter(|t| !t.trim().is_empty())
        .count();

    if usable == 0 {
        return CheckResult::error("No topics configured");
    }

    CheckResult::ok(format!("{} topics configured", usable))
        .with_details(serde_json::json!({ "topics": config.topics }))
}

fn check_generator(config: &AppConfig) -> CheckResult {
    let generator = &config.generator;

    match generator.provider.as_str() {
        "stub" => CheckResult::ok("Provider: stub (offline)"),
        "gemini" => env_check(
            &generator.api_key_env,
            &format!("Provider: gemini, Model: {}", generator.model),
        ),
        other => CheckResult::error(format!("Unknown provider: {}", other)),
    }
}

fn check_blogger(config: &AppConfig) -> CheckResult {
    let blogger = &config.blogger;
    let missing = missing_env(&[&blogger.blog_id_env, &blogger.token_env]);

    if missing.is_empty() {
        CheckResult::ok(format!(
            "Blog id: {} (set), Token: {} (set)",
            blogger.blog_id_env, blogger.token_env
        ))
    } else {
        CheckResult::warn(format!("Not set: {}", missing.join(", ")))
    }
}

fn check_reddit(config: &AppConfig) -> CheckResult {
    let reddit = &config.reddit;
    let subreddit = config.resolve_subreddit();
    let missing = missing_env(&[
        &reddit.username_env,
        &reddit.password_env,
        &reddit.client_id_env,
        &reddit.client_secret_env,
    ]);

    if missing.is_empty() {
        CheckResult::ok(format!("Credentials set, Subreddit: r/{}", subreddit))
    } else {
        CheckResult::warn(format!(
            "Not set: {}, Subreddit: r/{}",
            missing.join(", "),
            subreddit
        ))
    }
}

async fn check_posted_log(config: &AppConfig) -> CheckResult {
    let path = config.posted_log_path();
    let log = JsonFilePostedLog::new(&path);

    match log.load().await {
        Ok(_) if !path.exists() => {
            CheckResult::ok(format!("{} (created on first run)", path.display()))
        }
        Ok(records) => CheckResult::ok(format!("{} posts recorded", records.len()))
            .with_details(serde_json::json!({
                "path": path.display().to_string(),
                "count": records.len(),
                "latest": records.last().map(|r| &r.title),
            })),
        Err(LogError::Corrupt { message, .. }) => {
            let text = format!("Posted log is corrupt: {}", message);
            if config.general.corrupt_log_policy == CorruptLogPolicy::Abort {
                CheckResult::error(text)
            } else {
                CheckResult::warn(format!("{} (will be treated as empty)", text))
            }
        }
        Err(e) => CheckResult::error(format!("Failed to read posted log: {}", e)),
    }
}

fn env_check(env_var: &str, label: &str) -> CheckResult {
    if env_var.trim().is_empty() {
        return CheckResult::error(format!("{}, no API key env var configured", label));
    }

    match env_value(env_var) {
        Some(_) => CheckResult::ok(format!("{}, API key: {} (set)", label, env_var)),
        None => CheckResult::warn(format!("{}, API key: {} (not set)", label, env_var)),
    }
}

fn missing_env<'a>(env_vars: &[&'a String]) -> Vec<&'a str> {
    env_vars
        .iter()
        .copied()
        .filter(|name| env_value(name).is_none())
        .map(String::as_str)
        .collect()
}

fn print_report(report: &DoctorReport) {
    println!("autoposter Doctor Report");
    println!("========================");
    println!();

    print_check("Config", &report.config);
    print_check("Topics", &report.topics);
    print_check("Generator", &report.generator);
    print_check("Blogger", &report.blogger);
    print_check("Reddit", &report.reddit);
    print_check("Posted Log", &report.posted_log);

    println!();
    println!(
        "{} Overall: {}",
        symbol(&report.overall),
        report.overall.to_uppercase()
    );

    if report.overall == "ok" {
        println!();
        println!("Ready to run! Try: autoposter run --dry-run");
    }
}

fn print_check(name: &str, result: &CheckResult) {
    println!("{} {}: {}", symbol(&result.status), name, result.message);
}

fn symbol(status: &str) -> &'static str {
    match status {
        "ok" => "✓",
        "warn" => "⚠",
        _ => "✗",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_overall_status() {
        let ok = CheckResult::ok("fine");
        let warn = CheckResult::warn("meh");
        let error = CheckResult::error("bad");

        assert_eq!(overall_status(&[&ok, &ok]), "ok");
        assert_eq!(overall_status(&[&ok, &warn]), "warn");
        assert_eq!(overall_status(&[&warn, &error]), "error");
    }

    #[test]
    fn test_check_topics_rejects_blank_list() {
        let mut config = AppConfig::default();
        config.topics = vec!["  ".to_string()];

        assert!(check_topics(&config).is_error());
        assert!(check_topics(&AppConfig::default()).is_ok());
    }

    #[test]
    fn test_check_generator() {
        let mut config = AppConfig::default();
        config.generator.provider = "stub".to_string();
        assert!(check_generator(&config).is_ok());

        config.generator.provider = "gemini".to_string();
        config.generator.api_key_env = "AUTOPOSTER_TEST_UNSET_DOCTOR_KEY".to_string();
        assert_eq!(check_generator(&config).status, "warn");

        config.generator.provider = "other".to_string();
        assert!(check_generator(&config).is_error());
    }

    #[test]
    fn test_check_reddit_lists_missing_vars() {
        let mut config = AppConfig::default();
        config.reddit.username_env = "AUTOPOSTER_TEST_UNSET_REDDIT_USER".to_string();

        let result = check_reddit(&config);

        assert_eq!(result.status, "warn");
        assert!(result.message.contains("AUTOPOSTER_TEST_UNSET_REDDIT_USER"));
    }

    #[tokio::test]
    async fn test_check_posted_log_missing_file() {
        let dir = TempDir::new().unwrap();
        let mut config = AppConfig::default();
        config.general.data_dir = dir.path().to_path_buf();

        let result = check_posted_log(&config).await;

        assert!(result.is_ok());
        assert!(result.message.contains("created on first run"));
    }

    #[tokio::test]
    async fn test_check_posted_log_counts_records() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("posted.json"),
            r#"[{"title":"One","url":null,"slug":"one","date":"2024-01-01T00:00:00Z"}]"#,
        )
        .unwrap();
        let mut config = AppConfig::default();
        config.general.data_dir = dir.path().to_path_buf();

        let result = check_posted_log(&config).await;

        assert!(result.is_ok());
        assert_eq!(result.message, "1 posts recorded");
    }

    #[tokio::test]
    async fn test_check_posted_log_corrupt_respects_policy() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("posted.json"), "not json").unwrap();
        let mut config = AppConfig::default();
        config.general.data_dir = dir.path().to_path_buf();

        assert_eq!(check_posted_log(&config).await.status, "warn");

        config.general.corrupt_log_policy = CorruptLogPolicy::Abort;
        assert!(check_posted_log(&config).await.is_error());
    }
}

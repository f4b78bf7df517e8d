//! Process configuration.
//!
//! Sources, lowest precedence first: built-in defaults, an optional config
//! file, `VULN_MONITOR_*` environment variables, command-line flags.

use ::config::{Environment, File};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

use crate::cli::Cli;
use crate::error::{MonitorError, Result};
use crate::filter::KeywordSet;
use crate::scrapers::DEFAULT_ARCHIVE_URL;
use crate::utils::http::default_user_agent;

const ENV_PREFIX: &str = "VULN_MONITOR";
const DEFAULT_CONFIG_FILE: &str = "vuln_monitor";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub archive_url: String,
    pub keywords: String,
    pub slack_webhook: Option<String>,
    pub dingtalk_webhook: Option<String>,
    pub discord_webhook: Option<String>,
    pub interval_minutes: u64,
    pub state_dir: PathBuf,
    pub user_agent: String,
    pub request_timeout_seconds: u64,
    /// Refuse to start without at least one webhook
    pub require_channels: bool,
    /// Refuse to start with an empty keyword list
    pub require_keywords: bool,
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            archive_url: DEFAULT_ARCHIVE_URL.to_string(),
            keywords: String::new(),
            slack_webhook: None,
            dingtalk_webhook: None,
            discord_webhook: None,
            interval_minutes: 60,
            state_dir: PathBuf::from("."),
            user_agent: default_user_agent(),
            request_timeout_seconds: 30,
            require_channels: false,
            require_keywords: false,
            log_format: LogFormat::Text,
        }
    }
}

impl Config {
    /// Merge every source and validate the result.
    pub fn load(cli: &Cli) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => File::from(path.as_path()),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let mut builder = ::config::Config::builder()
            .add_source(file)
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true));

        if let Some(keywords) = &cli.keywords {
            builder = builder.set_override("keywords", keywords.as_str())?;
        }
        if let Some(url) = &cli.slack_webhook {
            builder = builder.set_override("slack_webhook", url.as_str())?;
        }
        if let Some(url) = &cli.dingtalk_webhook {
            builder = builder.set_override("dingtalk_webhook", url.as_str())?;
        }
        if let Some(url) = &cli.discord_webhook {
            builder = builder.set_override("discord_webhook", url.as_str())?;
        }
        if let Some(minutes) = cli.interval {
            let minutes = i64::try_from(minutes)
                .map_err(|_| MonitorError::Config(format!("interval {minutes} is too large")))?;
            builder = builder.set_override("interval_minutes", minutes)?;
        }
        if let Some(dir) = &cli.state_dir {
            builder = builder.set_override("state_dir", dir.to_string_lossy().to_string())?;
        }

        let config: Config = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.interval_minutes == 0 {
            return Err(MonitorError::Config(
                "interval_minutes must be at least 1".to_string(),
            ));
        }
        if self.request_timeout_seconds == 0 {
            return Err(MonitorError::Config(
                "request_timeout_seconds must be at least 1".to_string(),
            ));
        }

        let archive = parse_http_url("archive_url", &self.archive_url)?;
        if !archive.path().ends_with('/') {
            return Err(MonitorError::Config(format!(
                "archive_url must end with '/': {}",
                self.archive_url
            )));
        }

        for (name, url) in self.webhooks() {
            parse_http_url(name, url)?;
        }

        if self.require_channels && self.webhooks().is_empty() {
            return Err(MonitorError::Config(
                "at least one webhook is required".to_string(),
            ));
        }
        if self.require_keywords && self.keyword_set().is_empty() {
            return Err(MonitorError::Config("keywords are required".to_string()));
        }

        Ok(())
    }

    pub fn keyword_set(&self) -> KeywordSet {
        KeywordSet::parse(&self.keywords)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_minutes.saturating_mul(60))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    pub fn slack_webhook(&self) -> Option<&str> {
        non_empty(&self.slack_webhook)
    }

    pub fn dingtalk_webhook(&self) -> Option<&str> {
        non_empty(&self.dingtalk_webhook)
    }

    pub fn discord_webhook(&self) -> Option<&str> {
        non_empty(&self.discord_webhook)
    }

    /// Configured webhooks as `(setting name, url)` pairs.
    pub fn webhooks(&self) -> Vec<(&'static str, &str)> {
        [
            ("slack_webhook", self.slack_webhook()),
            ("dingtalk_webhook", self.dingtalk_webhook()),
            ("discord_webhook", self.discord_webhook()),
        ]
        .into_iter()
        .filter_map(|(name, url)| url.map(|url| (name, url)))
        .collect()
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

fn parse_http_url(name: &str, value: &str) -> Result<Url> {
    let url = Url::parse(value)
        .map_err(|e| MonitorError::Config(format!("{name} is not a valid URL ({value}): {e}")))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(MonitorError::Config(format!(
            "{name} must use http or https, got {scheme}"
        ))),
    }
}

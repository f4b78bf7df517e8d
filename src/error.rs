//! Error types shared by every stage of the monitor cycle.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, MonitorError>;

#[derive(Debug, Error)]
pub enum MonitorError {
    /// Network failure or non-success status while fetching a listing page
    #[error("failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    /// Listing content could not be parsed
    #[error("failed to parse listing: {0}")]
    Parse(String),

    /// The page parsed but contained no message links
    #[error("no list items found at {url}")]
    NoItems { url: String },

    /// A single notification channel rejected or never received the message
    #[error("delivery to {channel} failed: {reason}")]
    Delivery { channel: String, reason: String },

    /// Reading or writing a day record failed
    #[error("persistence error on {}: {source}", .path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl MonitorError {
    pub fn delivery(channel: &str, reason: impl Into<String>) -> Self {
        Self::Delivery {
            channel: channel.to_string(),
            reason: reason.into(),
        }
    }

    pub fn persistence(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Persistence {
            path: path.into(),
            source,
        }
    }

    /// Errors that abort the current cycle before any state is touched.
    pub fn aborts_cycle(&self) -> bool {
        matches!(
            self,
            Self::Fetch { .. } | Self::Parse(_) | Self::NoItems { .. }
        )
    }
}

impl From<::config::ConfigError> for MonitorError {
    fn from(err: ::config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_aborting_errors() {
        assert!(MonitorError::Parse("bad".into()).aborts_cycle());
        assert!(MonitorError::NoItems { url: "u".into() }.aborts_cycle());
        assert!(!MonitorError::delivery("slack", "boom").aborts_cycle());
    }

    #[test]
    fn test_display_includes_path() {
        let err = MonitorError::persistence(
            "/tmp/vuln-2024-01-01.txt",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.to_string().contains("vuln-2024-01-01.txt"));
    }
}

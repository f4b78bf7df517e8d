use async_trait::async_trait;
use chrono::NaiveDate;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use crate::error::{MonitorError, Result};
use crate::models::VisitedSet;
use crate::parsers::normalize_title;
use crate::storage::{audit_key, record_key, VisitedStore};

/// Day records stored as newline-delimited text files in one directory.
pub struct FileVisitedStore {
    dir: PathBuf,
}

impl FileVisitedStore {
    pub async fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| MonitorError::persistence(&dir, e))?;

        info!("Using state directory {}", dir.display());
        Ok(Self { dir })
    }

    pub fn record_path(&self, day: NaiveDate) -> PathBuf {
        self.dir.join(format!("{}.txt", record_key(day)))
    }

    pub fn audit_path(&self, day: NaiveDate) -> PathBuf {
        self.dir.join(format!("{}.txt", audit_key(day)))
    }

    async fn append(path: &Path, content: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await
            .map_err(|e| MonitorError::persistence(path, e))?;

        file.write_all(content.as_bytes())
            .await
            .map_err(|e| MonitorError::persistence(path, e))?;
        file.flush()
            .await
            .map_err(|e| MonitorError::persistence(path, e))
    }
}

#[async_trait]
impl VisitedStore for FileVisitedStore {
    async fn load(&self, day: NaiveDate) -> Result<VisitedSet> {
        let path = self.record_path(day);
        match fs::read_to_string(&path).await {
            Ok(content) => {
                let visited = VisitedSet::from_record(&content);
                debug!(path = %path.display(), titles = visited.len(), "Loaded visited record");
                Ok(visited)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(VisitedSet::new()),
            Err(e) => Err(MonitorError::persistence(path, e)),
        }
    }

    async fn mark_visited(&self, day: NaiveDate, title: &str) -> Result<()> {
        let line = format!("{}\n", normalize_title(title));
        Self::append(&self.record_path(day), &line).await
    }

    async fn record_notification(
        &self,
        day: NaiveDate,
        title: &str,
        detail_url: &str,
    ) -> Result<()> {
        let block = format!("{}\n{}\n\n", normalize_title(title), detail_url);
        Self::append(&self.audit_path(day), &block).await
    }
}

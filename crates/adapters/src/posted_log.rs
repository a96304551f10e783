//! JSON file posted log

use async_trait::async_trait;
use autoposter_domain::{LogError, PostRecord, PostedLog};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Posted log kept as a pretty-printed JSON array in a single file
#[derive(Debug, Clone)]
pub struct JsonFilePostedLog {
    path: PathBuf,
}

impl JsonFilePostedLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, error: std::io::Error) -> LogError {
        LogError::Io {
            path: self.path.display().to_string(),
            message: error.to_string(),
        }
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "posted.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl PostedLog for JsonFilePostedLog {
    async fn initialize(&self) -> Result<(), LogError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .await
                    .map_err(|e| self.io_error(e))?;
            }
        }

        if !fs::try_exists(&self.path)
            .await
            .map_err(|e| self.io_error(e))?
        {
            tracing::info!(path = %self.path.display(), "Creating empty posted log");
            fs::write(&self.path, "[]").await.map_err(|e| self.io_error(e))?;
        }

        Ok(())
    }

    async fn load(&self) -> Result<Vec<PostRecord>, LogError> {
        let contents = match fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(vec![]),
            Err(e) => return Err(self.io_error(e)),
        };

        serde_json::from_str(&contents).map_err(|e| LogError::Corrupt {
            path: self.path.display().to_string(),
            message: e.to_string(),
        })
    }

    async fn save(&self, records: &[PostRecord]) -> Result<(), LogError> {
        let json = serde_json::to_string_pretty(records)
            .map_err(|e| LogError::Serialization(e.to_string()))?;

        let tmp = self.tmp_path();
        fs::write(&tmp, json).await.map_err(|e| self.io_error(e))?;
        fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| self.io_error(e))?;

        tracing::debug!(path = %self.path.display(), count = records.len(), "Wrote posted log");
        Ok(())
    }
}

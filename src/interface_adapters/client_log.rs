use async_trait::async_trait;
use chrono::NaiveDate;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

use crate::domain::entities::ClientLogEntry;
use crate::domain::errors::ClientLogError;
use crate::domain::ports::ClientLogSink;

// Client diagnostics written as JSON lines, one file per UTC day.
#[derive(Clone, Debug)]
pub struct FileClientLogSink {
    logs_dir: PathBuf,
}

impl FileClientLogSink {
    pub fn new(logs_dir: impl Into<PathBuf>) -> Self {
        Self {
            logs_dir: logs_dir.into(),
        }
    }

    pub fn logs_dir(&self) -> &Path {
        &self.logs_dir
    }

    pub fn day_path(&self, day: NaiveDate) -> PathBuf {
        self.logs_dir.join(format!("session_{}.log", day.format("%Y-%m-%d")))
    }
}

#[async_trait]
impl ClientLogSink for FileClientLogSink {
    async fn append(&self, day: NaiveDate, entry: &ClientLogEntry) -> Result<(), ClientLogError> {
        let mut line = serde_json::to_vec(entry).map_err(io::Error::other)?;
        line.push(b'\n');

        fs::create_dir_all(&self.logs_dir).await?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.day_path(day))
            .await?;

        // One write per line keeps concurrent appends from interleaving.
        file.write_all(&line).await?;
        file.flush().await?;
        Ok(())
    }
}

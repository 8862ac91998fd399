// src/sink/jsonl.rs
// =============================================================================
// Datasets as JSON-Lines files: <storage>/datasets/<name>.jsonl
//
// Each push opens the file in append mode and writes one line, so a run
// that stops early leaves every record pushed before it on disk.
// =============================================================================

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use super::{Dataset, Sink};
use crate::error::{SinkError, SinkResult};

pub struct JsonlSink {
    dir: PathBuf,
    // Serializes appends so lines from different pushes never interleave
    write_lock: Mutex<()>,
}

impl JsonlSink {
    /// Creates `<storage>/datasets` if needed.
    pub async fn open(storage: &Path) -> SinkResult<Self> {
        let dir = storage.join("datasets");
        fs::create_dir_all(&dir).await.map_err(|source| SinkError::Io {
            path: dir.clone(),
            source,
        })?;

        Ok(Self {
            dir,
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self, dataset: Dataset) -> PathBuf {
        self.dir.join(format!("{}.jsonl", dataset.name()))
    }

    /// Removes every dataset file left by a previous run.
    pub async fn purge(&self) -> SinkResult<()> {
        for dataset in Dataset::ALL {
            let path = self.path(dataset);
            match fs::remove_file(&path).await {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(source) => return Err(SinkError::Io { path, source }),
            }
        }
        Ok(())
    }
}

#[async_trait]
impl Sink for JsonlSink {
    async fn push(&self, dataset: Dataset, item: serde_json::Value) -> SinkResult<()> {
        let mut line = serde_json::to_vec(&item)?;
        line.push(b'\n');

        let path = self.path(dataset);
        let io_err = |source: std::io::Error| SinkError::Io {
            path: path.clone(),
            source,
        };

        let _guard = self.write_lock.lock().await;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await
            .map_err(io_err)?;
        file.write_all(&line).await.map_err(io_err)?;
        file.flush().await.map_err(io_err)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("statute-crawler-{}-{}", name, std::process::id()))
    }

    async fn read(path: &Path) -> String {
        fs::read_to_string(path).await.unwrap()
    }

    #[tokio::test]
    async fn test_push_appends_lines() {
        let dir = scratch_dir("append");
        let sink = JsonlSink::open(&dir).await.unwrap();

        sink.push(Dataset::Chapters, serde_json::json!({"url": "a"})).await.unwrap();
        sink.push(Dataset::Chapters, serde_json::json!({"url": "b"})).await.unwrap();

        assert_eq!(
            read(&sink.path(Dataset::Chapters)).await,
            "{\"url\":\"a\"}\n{\"url\":\"b\"}\n"
        );
        assert!(sink.path(Dataset::Default).ends_with("datasets/default.jsonl"));

        fs::remove_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn test_purge_clears_previous_run() {
        let dir = scratch_dir("purge");
        let sink = JsonlSink::open(&dir).await.unwrap();
        sink.push(Dataset::Parts, serde_json::json!({"url": "old"})).await.unwrap();

        sink.purge().await.unwrap();
        // Purging with nothing on disk is fine too
        sink.purge().await.unwrap();
        assert!(!sink.path(Dataset::Parts).exists());

        sink.push(Dataset::Parts, serde_json::json!({"url": "new"})).await.unwrap();
        assert_eq!(read(&sink.path(Dataset::Parts)).await, "{\"url\":\"new\"}\n");

        fs::remove_dir_all(&dir).await.unwrap();
    }
}

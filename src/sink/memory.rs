// src/sink/memory.rs
// In-memory datasets for tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use super::{Dataset, Sink};
use crate::error::SinkResult;

#[derive(Default)]
pub struct MemorySink {
    datasets: Mutex<HashMap<Dataset, Vec<serde_json::Value>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self, dataset: Dataset) -> Vec<serde_json::Value> {
        self.datasets
            .lock()
            .unwrap()
            .get(&dataset)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl Sink for MemorySink {
    async fn push(&self, dataset: Dataset, item: serde_json::Value) -> SinkResult<()> {
        self.datasets
            .lock()
            .unwrap()
            .entry(dataset)
            .or_default()
            .push(item);
        Ok(())
    }
}

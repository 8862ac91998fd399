// src/sink/mod.rs
// =============================================================================
// Append-only datasets the crawl writes into.
//
// - default:  one StatuteRecord per visited leaf page (complete or empty)
// - chapters: one {url} per CollectionA page
// - parts:    one {url} per CollectionB page
//
// Submodules:
// - jsonl: one JSON-Lines file per dataset on disk
// - memory: in-process store for tests
// =============================================================================

mod jsonl;
#[cfg(test)]
pub mod memory;

pub use jsonl::JsonlSink;

use async_trait::async_trait;
use serde::Serialize;
use std::fmt;

use crate::classify::Role;
use crate::error::SinkResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dataset {
    Default,
    Chapters,
    Parts,
}

impl Dataset {
    pub const ALL: [Dataset; 3] = [Dataset::Default, Dataset::Chapters, Dataset::Parts];

    pub fn name(&self) -> &'static str {
        match self {
            Dataset::Default => "default",
            Dataset::Chapters => "chapters",
            Dataset::Parts => "parts",
        }
    }

    /// Dataset a page with this role is recorded in.
    pub fn for_role(role: Role) -> Self {
        match role {
            Role::Leaf => Dataset::Default,
            Role::CollectionA => Dataset::Chapters,
            Role::CollectionB => Dataset::Parts,
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[async_trait]
pub trait Sink: Send + Sync {
    /// Appends one item to `dataset`.
    async fn push(&self, dataset: Dataset, item: serde_json::Value) -> SinkResult<()>;
}

/// Serializes `item` and appends it to `dataset`.
pub async fn push_item<S, T>(sink: &S, dataset: Dataset, item: &T) -> SinkResult<()>
where
    S: Sink + ?Sized,
    T: Serialize,
{
    let value = serde_json::to_value(item)?;
    sink.push(dataset, value).await
}

// src/classify/mod.rs
// =============================================================================
// URL classification: which role does a URL play on its site?
//
// A site's route table is an ordered list of (glob, role) pairs. The first
// glob that matches the whole URL decides the role; URLs that match nothing
// are not part of the crawl. Order is significant: a general pattern placed
// before a more specific one sharing its prefix will shadow it.
// =============================================================================

mod glob;

pub use glob::Glob;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ConfigResult;

/// What a page is, as far as the crawl is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Chapter-level collection page, recorded in the "chapters" dataset
    CollectionA,
    /// Finer-grained collection page, recorded in the "parts" dataset
    CollectionB,
    /// Statute section page, extracted into the default dataset
    Leaf,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::CollectionA => "collection_a",
            Role::CollectionB => "collection_b",
            Role::Leaf => "leaf",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of a site's route table, as written in site files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub glob: String,
    pub role: Role,
}

impl Route {
    pub fn new(glob: impl Into<String>, role: Role) -> Self {
        Self {
            glob: glob.into(),
            role,
        }
    }
}

/// Compiled, ordered route table.
#[derive(Debug, Clone)]
pub struct Classifier {
    routes: Vec<(Glob, Role)>,
}

impl Classifier {
    pub fn new(routes: &[Route]) -> ConfigResult<Self> {
        let routes = routes
            .iter()
            .map(|route| Ok((Glob::new(&route.glob)?, route.role)))
            .collect::<ConfigResult<Vec<_>>>()?;
        Ok(Self { routes })
    }

    /// Role of the first matching route, or None.
    pub fn classify(&self, url: &str) -> Option<Role> {
        self.routes
            .iter()
            .find(|(glob, _)| glob.is_match(url))
            .map(|(_, role)| *role)
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

// src/crawl/queue.rs
// =============================================================================
// The crawl frontier: a breadth-first queue of pending visits.
//
// How it works:
// 1. Start URLs go in first, in the order given
// 2. Links discovered on a page go to the back of the queue
// 3. Every URL the frontier ever accepted is remembered, so a URL is
//    queued (and visited) at most once per run
//
// Dedup is plain string equality; no URL normalization happens here.
// =============================================================================

use std::collections::{HashSet, VecDeque};

use crate::classify::Role;

/// A discovered, classified URL waiting to be visited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlTarget {
    pub url: String,
    pub role: Role,
}

/// One pending visit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Visit {
    /// A start URL with no role: visited only for its links
    Seed(String),
    Target(CrawlTarget),
}

impl Visit {
    pub fn url(&self) -> &str {
        match self {
            Visit::Seed(url) => url,
            Visit::Target(target) => &target.url,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Visit::Seed(_) => "seed",
            Visit::Target(target) => target.role.as_str(),
        }
    }
}

#[derive(Debug, Default)]
pub struct Frontier {
    queue: VecDeque<Visit>,
    seen: HashSet<String>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `visit` unless its URL was accepted before. Returns whether it
    /// was queued.
    pub fn push(&mut self, visit: Visit) -> bool {
        if !self.seen.insert(visit.url().to_string()) {
            return false;
        }
        self.queue.push_back(visit);
        true
    }

    pub fn pop(&mut self) -> Option<Visit> {
        self.queue.pop_front()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(url: &str) -> Visit {
        Visit::Target(CrawlTarget {
            url: url.to_string(),
            role: Role::Leaf,
        })
    }

    #[test]
    fn test_fifo_order() {
        let mut frontier = Frontier::new();
        frontier.push(Visit::Seed("https://a.test/".into()));
        frontier.push(leaf("https://a.test/1"));
        frontier.push(leaf("https://a.test/2"));

        assert_eq!(frontier.pop().map(|v| v.url().to_string()), Some("https://a.test/".into()));
        assert_eq!(frontier.pop().map(|v| v.url().to_string()), Some("https://a.test/1".into()));
        assert_eq!(frontier.len(), 1);
    }

    #[test]
    fn test_url_accepted_once() {
        let mut frontier = Frontier::new();
        assert!(frontier.push(leaf("https://a.test/1")));
        assert!(!frontier.push(leaf("https://a.test/1")));

        // Still rejected after it has been popped (visited)
        frontier.pop();
        assert!(!frontier.push(leaf("https://a.test/1")));
        assert!(frontier.is_empty());
    }

    #[test]
    fn test_no_normalization() {
        let mut frontier = Frontier::new();
        assert!(frontier.push(leaf("https://a.test/1")));
        assert!(frontier.push(leaf("https://a.test/1/")));
        assert_eq!(frontier.len(), 2);
    }

    #[test]
    fn test_labels() {
        assert_eq!(Visit::Seed("x".into()).label(), "seed");
        assert_eq!(leaf("x").label(), "leaf");
    }
}

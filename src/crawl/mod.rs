// src/crawl/mod.rs
// =============================================================================
// This module runs a crawl over one site.
//
// Features:
// - Breadth-first frontier seeded with the site's start URLs
// - Role dispatch per visited page (section, chapter, part, seed)
// - Only links matching the site's route table are followed
// - Hard visit budget, optional render concurrency, polite delay
// =============================================================================

mod queue;
mod runner;

pub use runner::{CrawlOptions, CrawlSummary, Crawler};

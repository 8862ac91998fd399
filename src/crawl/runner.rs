// src/crawl/runner.rs
// =============================================================================
// The crawl loop.
//
// Per visit:
// 1. Render the page (up to `concurrency` renders are in flight at once)
// 2. Dispatch on the visit's role:
//      Leaf        -> extract, append the record to "default"
//      CollectionA -> append {url} to "chapters"
//      CollectionB -> append {url} to "parts"
//      Seed        -> nothing is stored
// 3. Classify every outbound link and queue the ones with a role
//
// Pages are handled one at a time, in the order they left the frontier.
// The loop ends when `visit_budget` visits have been made or the frontier
// runs dry. A page that fails to render still uses up one visit.
// =============================================================================

use futures::stream::{self, StreamExt};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::queue::{CrawlTarget, Frontier, Visit};
use crate::classify::Role;
use crate::error::{ConfigError, CrawlResult};
use crate::extract::{Extractor, DEFAULT_TITLE_TIMEOUT};
use crate::record::{CollectionEntry, Extraction, StatuteRecord};
use crate::render::{Page, Renderer};
use crate::site::Site;
use crate::sink::{push_item, Dataset, Sink};

#[derive(Debug, Clone)]
pub struct CrawlOptions {
    /// Renders in flight at once
    pub concurrency: usize,
    /// Pause between render batches
    pub delay: Duration,
    /// How long the extractor waits for a title element
    pub title_timeout: Duration,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            concurrency: 1,
            delay: Duration::from_millis(100),
            title_timeout: DEFAULT_TITLE_TIMEOUT,
        }
    }
}

/// Counts reported at the end of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CrawlSummary {
    pub visited: usize,
    pub records: usize,
    pub empty_records: usize,
    pub chapters: usize,
    pub parts: usize,
    pub seeds: usize,
    pub failed: usize,
    pub enqueued: usize,
    /// Frontier entries dropped when the budget ran out
    pub unvisited: usize,
}

pub struct Crawler<'a, R, S: ?Sized> {
    site: &'a Site,
    renderer: &'a R,
    sink: &'a S,
    extractor: Extractor,
    options: CrawlOptions,
}

impl<'a, R, S> Crawler<'a, R, S>
where
    R: Renderer,
    S: Sink + ?Sized,
{
    pub fn new(site: &'a Site, renderer: &'a R, sink: &'a S, options: CrawlOptions) -> Self {
        let extractor = Extractor::new(site.selectors().clone(), options.title_timeout);
        Self {
            site,
            renderer,
            sink,
            extractor,
            options,
        }
    }

    pub async fn run(&self, start_urls: &[String], visit_budget: usize) -> CrawlResult<CrawlSummary> {
        if start_urls.is_empty() {
            return Err(ConfigError::NoStartUrls {
                site: self.site.name().to_string(),
            }
            .into());
        }
        if visit_budget == 0 {
            return Err(ConfigError::ZeroBudget.into());
        }

        // Seed the frontier. A start URL the route table knows keeps that role;
        // otherwise the site's start role applies, and None makes it a seed
        let mut frontier = Frontier::new();
        for url in start_urls {
            let visit = match self.site.start_role(url) {
                Some(role) => Visit::Target(CrawlTarget {
                    url: url.clone(),
                    role,
                }),
                None => Visit::Seed(url.clone()),
            };
            frontier.push(visit);
        }

        let concurrency = self.options.concurrency.max(1);
        let mut summary = CrawlSummary::default();

        while summary.visited < visit_budget {
            // Never take more than the budget has left
            let batch_size = concurrency.min(visit_budget - summary.visited);
            let batch: Vec<Visit> = (0..batch_size).map_while(|_| frontier.pop()).collect();
            if batch.is_empty() {
                break;
            }
            // Every dequeued target counts, whether or not it renders
            summary.visited += batch.len();

            // `buffered` yields results in dequeue order even when renders overlap
            let renderer = self.renderer;
            let rendered: Vec<_> = stream::iter(batch)
                .map(|visit| async move {
                    let result = renderer.render(visit.url()).await;
                    (visit, result)
                })
                .buffered(concurrency)
                .collect()
                .await;

            // Handle the batch one page at a time
            for (visit, result) in rendered {
                match result {
                    // A sink failure inside handle() aborts the run
                    Ok(page) => self.handle(&visit, &page, &mut frontier, &mut summary).await?,
                    // The renderer has already retried; give up on this page
                    Err(e) => {
                        warn!("Skipping {}: {}", visit.url(), e);
                        summary.failed += 1;
                    }
                }
            }

            // Polite pause, skipped when no batch follows
            if !frontier.is_empty() && summary.visited < visit_budget && !self.options.delay.is_zero() {
                tokio::time::sleep(self.options.delay).await;
            }
        }

        // Whatever is still queued is dropped with the frontier
        summary.unvisited = frontier.len();
        info!(
            "Crawl of {} finished: {} visited, {} records ({} empty), {} chapters, {} parts, {} failed, {} left unvisited",
            self.site.name(),
            summary.visited,
            summary.records,
            summary.empty_records,
            summary.chapters,
            summary.parts,
            summary.failed,
            summary.unvisited
        );

        Ok(summary)
    }

    async fn handle(
        &self,
        visit: &Visit,
        page: &R::Page,
        frontier: &mut Frontier,
        summary: &mut CrawlSummary,
    ) -> CrawlResult<()> {
        info!("Processing {} as {}", visit.url(), visit.label());

        // Store what the role calls for
        match visit {
            // Only visited for its links
            Visit::Seed(_) => summary.seeds += 1,
            Visit::Target(target) => match target.role {
                // Section page: a record is stored even when the title is missing
                Role::Leaf => {
                    let extraction = self.extractor.extract(page).await;
                    self.log_extraction(&extraction, summary);
                    let record = StatuteRecord::from(extraction);
                    push_item(self.sink, Dataset::for_role(target.role), &record).await?;
                }
                // Chapter and part pages are recorded by URL only
                Role::CollectionA => {
                    let entry = CollectionEntry {
                        url: target.url.clone(),
                    };
                    push_item(self.sink, Dataset::for_role(target.role), &entry).await?;
                    summary.chapters += 1;
                }
                Role::CollectionB => {
                    let entry = CollectionEntry {
                        url: target.url.clone(),
                    };
                    push_item(self.sink, Dataset::for_role(target.role), &entry).await?;
                    summary.parts += 1;
                }
            },
        }

        // Follow only links the route table gives a role; the frontier
        // ignores URLs it has already seen this run
        let classifier = self.site.classifier();
        for link in page.links() {
            if let Some(role) = classifier.classify(&link) {
                if frontier.push(Visit::Target(CrawlTarget { url: link, role })) {
                    summary.enqueued += 1;
                }
            }
        }
        debug!("Frontier holds {} pending visit(s)", frontier.len());

        Ok(())
    }

    fn log_extraction(&self, extraction: &Extraction, summary: &mut CrawlSummary) {
        summary.records += 1;
        if extraction.is_complete() {
            info!("Extracted {} from {}", extraction.id(), extraction.url());
        } else {
            summary.empty_records += 1;
            info!("Stored empty record {} for {}", extraction.id(), extraction.url());
        }
    }
}

// src/extract.rs
// =============================================================================
// Turns a rendered leaf page into a statute record.
//
// 1. id = last non-empty '/'-segment of the page's final URL, verbatim
// 2. every query is scoped to the first match of the container selector
// 3. wait (bounded) for the title; none, or a blank one, means Empty
// 4. otherwise join the inner text of every body match with '\n'
//
// Only the three selector strings differ between sites.
// =============================================================================

use std::time::Duration;
use tracing::warn;

use crate::record::{Extraction, Statute};
use crate::render::Page;
use crate::site::Selectors;

pub const DEFAULT_TITLE_TIMEOUT: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone)]
pub struct Extractor {
    selectors: Selectors,
    title_timeout: Duration,
}

impl Extractor {
    pub fn new(selectors: Selectors, title_timeout: Duration) -> Self {
        Self {
            selectors,
            title_timeout,
        }
    }

    pub async fn extract<P: Page + ?Sized>(&self, page: &P) -> Extraction {
        // Identity comes from where the page ended up, after redirects
        let url = page.current_url().to_string();
        let id = record_id(&url).to_string();

        // The page may never produce a title; the timeout turns that into "not found"
        let wait = page.wait_for_text(&self.selectors.container, &self.selectors.title);
        let title = match tokio::time::timeout(self.title_timeout, wait).await {
            // Stored verbatim, surrounding whitespace included
            Ok(Some(title)) if !title.trim().is_empty() => title,
            // Timed out, no container, no title element, or a blank title
            _ => {
                warn!("No title found for {}", url);
                return Extraction::Empty { id, url };
            }
        };

        // Body fragments in document order, scoped to the same container
        let fragments = page.inner_texts(&self.selectors.container, &self.selectors.body);
        Extraction::Complete(Statute {
            id,
            url,
            title,
            text: join_fragments(&fragments),
        })
    }
}

/// Last non-empty path token of `url`; the whole string if it has none.
pub fn record_id(url: &str) -> &str {
    url.rsplit('/').find(|segment| !segment.is_empty()).unwrap_or(url)
}

/// Body fragments in document order, one per line. Duplicates are kept.
pub fn join_fragments(fragments: &[String]) -> String {
    fragments.join("\n")
}

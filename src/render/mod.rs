// src/render/mod.rs
// =============================================================================
// The page-rendering side of the crawl engine.
//
// The crawl loop and extractor only see these two traits:
// - Renderer: turns a URL into a rendered Page (or a RenderError)
// - Page: the DOM queries the extractor needs, plus the page's links
//
// Submodules:
// - http: reqwest-backed Renderer with retries
// - html: StaticPage, a scraper-backed Page over a fetched document
// =============================================================================

mod html;
mod http;
#[cfg(test)]
pub mod mock;

pub use html::StaticPage;
pub use http::{HttpRenderer, RendererOptions};

use async_trait::async_trait;

use crate::error::RenderResult;

#[async_trait]
pub trait Page: Send + Sync {
    /// URL of the page after any redirects.
    fn current_url(&self) -> &str;

    /// Text content of the first `selector` match inside the first
    /// `container` match. May never resolve; callers bound the wait.
    async fn wait_for_text(&self, container: &str, selector: &str) -> Option<String>;

    /// Inner text of every `selector` match inside the first `container`
    /// match, in document order.
    fn inner_texts(&self, container: &str, selector: &str) -> Vec<String>;

    /// Absolute http(s) URLs of the page's anchors, first-seen order.
    fn links(&self) -> Vec<String>;
}

#[async_trait]
pub trait Renderer: Send + Sync {
    type Page: Page;

    async fn render(&self, url: &str) -> RenderResult<Self::Page>;
}

// src/render/http.rs
// =============================================================================
// HttpRenderer: fetches pages over HTTP and hands them out as StaticPages.
//
// - Follows redirects (the final URL becomes the page's current_url)
// - Retries network errors, 429 and 5xx with exponential backoff
// - Any other non-2xx status fails immediately
// =============================================================================

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::warn;

use super::{Renderer, StaticPage};
use crate::error::{RenderError, RenderResult};

#[derive(Debug, Clone)]
pub struct RendererOptions {
    /// Per-request timeout
    pub timeout: Duration,
    /// Extra attempts after the first failure
    pub max_retries: u32,
    /// Delay before the first retry; doubles on each further retry
    pub backoff: Duration,
    pub user_agent: String,
}

impl Default for RendererOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_retries: 3,
            backoff: Duration::from_millis(500),
            user_agent: format!("statute-crawler/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl RendererOptions {
    fn backoff_for(&self, attempt: u32) -> Duration {
        self.backoff.saturating_mul(2u32.saturating_pow(attempt))
    }
}

pub struct HttpRenderer {
    client: Client,
    options: RendererOptions,
}

impl HttpRenderer {
    pub fn new(options: RendererOptions) -> RenderResult<Self> {
        let client = Client::builder()
            .timeout(options.timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .user_agent(options.user_agent.clone())
            .build()?;

        Ok(Self { client, options })
    }

    async fn fetch_once(&self, url: &str) -> RenderResult<StaticPage> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RenderError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let final_url = response.url().to_string();
        let html = response.text().await?;
        Ok(StaticPage::new(final_url, html))
    }
}

#[async_trait]
impl Renderer for HttpRenderer {
    type Page = StaticPage;

    async fn render(&self, url: &str) -> RenderResult<StaticPage> {
        let mut attempt = 0;
        loop {
            match self.fetch_once(url).await {
                Ok(page) => return Ok(page),
                Err(e) if !e.is_retryable() => return Err(e),
                Err(e) if attempt >= self.options.max_retries => {
                    return Err(RenderError::Exhausted {
                        url: url.to_string(),
                        attempts: attempt + 1,
                        last: Box::new(e),
                    });
                }
                Err(e) => {
                    let backoff = self.options.backoff_for(attempt);
                    warn!(
                        "Fetching {} failed (attempt {}/{}): {}; retrying in {:.1}s",
                        url,
                        attempt + 1,
                        self.options.max_retries + 1,
                        e,
                        backoff.as_secs_f64()
                    );
                    tokio::time::sleep(backoff).await;
                    attempt += 1;
                }
            }
        }
    }
}

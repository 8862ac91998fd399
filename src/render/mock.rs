// src/render/mock.rs
// Canned pages for crawl-loop and extractor tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use super::{Page, Renderer};
use crate::error::{RenderError, RenderResult};

#[derive(Debug, Clone)]
pub enum MockTitle {
    Present(String),
    /// The title element never shows up; wait_for_text never resolves
    Never,
}

#[derive(Debug, Clone)]
pub struct MockPage {
    pub url: String,
    pub title: MockTitle,
    pub body: Vec<String>,
    pub links: Vec<String>,
}

impl MockPage {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: MockTitle::Never,
            body: Vec::new(),
            links: Vec::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = MockTitle::Present(title.into());
        self
    }

    pub fn with_body(mut self, body: &[&str]) -> Self {
        self.body = body.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_links<S: AsRef<str>>(mut self, links: &[S]) -> Self {
        self.links = links.iter().map(|s| s.as_ref().to_string()).collect();
        self
    }
}

#[async_trait]
impl Page for MockPage {
    fn current_url(&self) -> &str {
        &self.url
    }

    async fn wait_for_text(&self, _container: &str, _selector: &str) -> Option<String> {
        match &self.title {
            MockTitle::Present(title) => Some(title.clone()),
            MockTitle::Never => std::future::pending().await,
        }
    }

    fn inner_texts(&self, _container: &str, _selector: &str) -> Vec<String> {
        self.body.clone()
    }

    fn links(&self) -> Vec<String> {
        self.links.clone()
    }
}

/// Serves registered pages by URL; anything else is a 404.
#[derive(Default)]
pub struct MockRenderer {
    pages: HashMap<String, MockPage>,
    rendered: Mutex<Vec<String>>,
}

impl MockRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, page: MockPage) -> Self {
        self.pages.insert(page.url.clone(), page);
        self
    }

    /// Serve `page` when `requested` is asked for (a redirect).
    pub fn with_redirect(mut self, requested: impl Into<String>, page: MockPage) -> Self {
        self.pages.insert(requested.into(), page);
        self
    }

    /// URLs passed to render, in call order.
    pub fn rendered(&self) -> Vec<String> {
        self.rendered.lock().unwrap().clone()
    }
}

#[async_trait]
impl Renderer for MockRenderer {
    type Page = MockPage;

    async fn render(&self, url: &str) -> RenderResult<MockPage> {
        self.rendered.lock().unwrap().push(url.to_string());
        self.pages.get(url).cloned().ok_or_else(|| RenderError::Status {
            url: url.to_string(),
            status: 404,
        })
    }
}

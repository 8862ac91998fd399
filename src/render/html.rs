// src/render/html.rs
// =============================================================================
// StaticPage: a Page over a server-delivered HTML document.
//
// We use the `scraper` crate which parses HTML into a DOM and supports CSS
// selectors. scraper's Html is not Send, so the page keeps the raw document
// and parses it inside each (synchronous) query.
//
// Text semantics:
// - text_content: every text node under the element, verbatim
// - inner_text:   <br> becomes a newline, block-level descendants (div, li,
//                 p, headings, ...) sit on their own lines, other whitespace
//                 runs collapse to one space, each line is trimmed, and
//                 script/style are skipped
//
// Links lose their #fragment: one document is one crawl target.
// =============================================================================

use async_trait::async_trait;
use scraper::{ElementRef, Html, Node, Selector};
use std::collections::HashSet;
use url::Url;

use super::Page;

#[derive(Debug, Clone)]
pub struct StaticPage {
    url: String,
    html: String,
}

impl StaticPage {
    pub fn new(url: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            html: html.into(),
        }
    }

    fn first_text(&self, container: &str, selector: &str) -> Option<String> {
        let container = Selector::parse(container).ok()?;
        let selector = Selector::parse(selector).ok()?;

        let document = Html::parse_document(&self.html);
        let scope = document.select(&container).next()?;
        scope
            .select(&selector)
            .next()
            .map(|element| element.text().collect::<String>())
    }
}

#[async_trait]
impl Page for StaticPage {
    fn current_url(&self) -> &str {
        &self.url
    }

    // The document is already complete, so this resolves immediately
    async fn wait_for_text(&self, container: &str, selector: &str) -> Option<String> {
        self.first_text(container, selector)
    }

    fn inner_texts(&self, container: &str, selector: &str) -> Vec<String> {
        let (Ok(container), Ok(selector)) = (Selector::parse(container), Selector::parse(selector))
        else {
            return Vec::new();
        };

        let document = Html::parse_document(&self.html);
        let Some(scope) = document.select(&container).next() else {
            return Vec::new();
        };

        scope.select(&selector).map(inner_text).collect()
    }

    fn links(&self) -> Vec<String> {
        extract_links(&self.html, &self.url)
    }
}

fn inner_text(element: ElementRef<'_>) -> String {
    // Source newlines are plain whitespace; <br> and block edges start new lines
    let mut lines = vec![String::new()];
    collect_lines(element, &mut lines);

    lines
        .iter()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .collect::<Vec<_>>()
        .join("\n")
        .trim_matches('\n')
        .to_string()
}

fn collect_lines(element: ElementRef<'_>, lines: &mut Vec<String>) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                if let Some(line) = lines.last_mut() {
                    line.push_str(text);
                }
            }
            Node::Element(e) => match e.name() {
                "br" => lines.push(String::new()),
                // Never rendered
                "script" | "style" => {}
                name => {
                    let block = is_block(name);
                    if block {
                        break_line(lines);
                    }
                    if let Some(child) = ElementRef::wrap(child) {
                        collect_lines(child, lines);
                    }
                    if block {
                        break_line(lines);
                    }
                }
            },
            _ => {}
        }
    }
}

// Starts a new line unless the current one is still blank, so adjacent
// block edges produce a single break
fn break_line(lines: &mut Vec<String>) {
    let blank = lines.last().map_or(true, |line| line.trim().is_empty());
    if !blank {
        lines.push(String::new());
    }
}

fn is_block(name: &str) -> bool {
    matches!(
        name,
        "address"
            | "article"
            | "aside"
            | "blockquote"
            | "dd"
            | "div"
            | "dl"
            | "dt"
            | "figcaption"
            | "figure"
            | "footer"
            | "h1"
            | "h2"
            | "h3"
            | "h4"
            | "h5"
            | "h6"
            | "header"
            | "hr"
            | "li"
            | "main"
            | "nav"
            | "ol"
            | "p"
            | "pre"
            | "section"
            | "table"
            | "tr"
            | "ul"
    )
}

// Extracts all http(s) links from HTML content, resolved against `base_url`
//
// Example:
//   html = "<a href='/docs'>Docs</a>"
//   base_url = "https://example.com"
//   result = ["https://example.com/docs"]
fn extract_links(html: &str, base_url: &str) -> Vec<String> {
    let mut links = Vec::new();

    let base = match Url::parse(base_url) {
        Ok(url) => url,
        Err(_) => {
            tracing::warn!("Invalid base URL: {}", base_url);
            return links;
        }
    };

    let Ok(selector) = Selector::parse("a[href]") else {
        return links;
    };

    let document = Html::parse_document(html);
    let mut seen = HashSet::new();

    for element in document.select(&selector) {
        if let Some(href) = element.value().attr("href") {
            if let Some(absolute_url) = resolve_link(&base, href.trim()) {
                if seen.insert(absolute_url.clone()) {
                    links.push(absolute_url);
                }
            }
        }
    }

    links
}

// Resolves a link (possibly relative) to an absolute http(s) URL
fn resolve_link(base: &Url, href: &str) -> Option<String> {
    // Skip anchors and special protocols
    if href.is_empty()
        || href.starts_with('#')
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("javascript:")
    {
        return None;
    }

    let mut url = base.join(href).ok()?;
    // "/cite/1.01#stat.1.01.1" is the same page as "/cite/1.01"
    url.set_fragment(None);
    match url.scheme() {
        "http" | "https" => Some(url.to_string()),
        _ => None,
    }
}

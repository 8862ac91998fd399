// src/site/mod.rs
// =============================================================================
// Per-site configuration.
//
// Everything that differs between statute sites lives in one SiteConfig:
// start URLs, the role of an unclassified start URL, three CSS selectors,
// and the ordered route table. The crawl loop and extractor are shared.
//
// SiteConfig is the serde shape (JSON site files, presets). Site is the
// validated, compiled form the crawler actually uses.
// =============================================================================

mod presets;

pub use presets::{preset, PRESETS};

use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

use crate::classify::{Classifier, Role, Route};
use crate::error::{ConfigError, ConfigResult};

/// CSS selectors used by the page extractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selectors {
    /// Content container; only its first match is read
    pub container: String,
    /// Title element inside the container
    pub title: String,
    /// Body fragments inside the container, joined in document order
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfig {
    pub name: String,
    pub start_urls: Vec<String>,
    /// Role for a start URL that no route matches. `null` makes it a seed:
    /// visited for its links only. A start URL a route does match takes
    /// that route's role instead.
    #[serde(default = "default_start_role")]
    pub start_role: Option<Role>,
    pub selectors: Selectors,
    /// Ordered: the first matching route wins
    #[serde(default)]
    pub routes: Vec<Route>,
}

fn default_start_role() -> Option<Role> {
    Some(Role::Leaf)
}

/// A validated site, ready to crawl.
#[derive(Debug, Clone)]
pub struct Site {
    config: SiteConfig,
    classifier: Classifier,
}

impl Site {
    pub fn new(config: SiteConfig) -> ConfigResult<Self> {
        if config.start_urls.is_empty() {
            return Err(ConfigError::NoStartUrls { site: config.name });
        }

        for url in &config.start_urls {
            Url::parse(url).map_err(|source| ConfigError::InvalidStartUrl {
                url: url.clone(),
                source,
            })?;
        }

        validate_selector("container", &config.selectors.container)?;
        validate_selector("title", &config.selectors.title)?;
        validate_selector("body", &config.selectors.body)?;

        let classifier = Classifier::new(&config.routes)?;

        Ok(Self { config, classifier })
    }

    /// Looks up a built-in preset by name.
    pub fn from_preset(name: &str) -> ConfigResult<Self> {
        let config = preset(name).ok_or_else(|| ConfigError::UnknownPreset(name.to_string()))?;
        Self::new(config)
    }

    /// Loads a site from a JSON file.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadSiteFile {
            path: path.to_path_buf(),
            source,
        })?;
        let config: SiteConfig =
            serde_json::from_str(&raw).map_err(|source| ConfigError::ParseSiteFile {
                path: path.to_path_buf(),
                source,
            })?;
        Self::new(config)
    }

    /// Replaces the configured start URLs (e.g. from the command line).
    pub fn with_start_urls(mut self, start_urls: Vec<String>) -> ConfigResult<Self> {
        self.config.start_urls = start_urls;
        let config = self.config;
        Self::new(config)
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn start_urls(&self) -> &[String] {
        &self.config.start_urls
    }

    pub fn selectors(&self) -> &Selectors {
        &self.config.selectors
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Role a start URL is visited with. The route table decides first, so
    /// a start URL shaped like a chapter is stored as a chapter; only an
    /// unmatched URL falls back to the configured start role. None means
    /// link discovery only.
    pub fn start_role(&self, url: &str) -> Option<Role> {
        self.classifier.classify(url).or(self.config.start_role)
    }
}

fn validate_selector(field: &'static str, selector: &str) -> ConfigResult<()> {
    scraper::Selector::parse(selector)
        .map(|_| ())
        .map_err(|e| ConfigError::InvalidSelector {
            field,
            selector: selector.to_string(),
            reason: format!("{:?}", e),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SiteConfig {
        SiteConfig {
            name: "test".into(),
            start_urls: vec!["https://a.test/statutes".into()],
            start_role: None,
            selectors: Selectors {
                container: ".section".into(),
                title: ".shn".into(),
                body: "p".into(),
            },
            routes: vec![Route::new("https://a.test/cite/*", Role::Leaf)],
        }
    }

    #[test]
    fn test_valid_config() {
        let site = Site::new(config()).unwrap();
        assert_eq!(site.name(), "test");
        assert_eq!(site.start_role("https://a.test/statutes"), None);
        assert_eq!(site.start_role("https://a.test/cite/1"), Some(Role::Leaf));
    }

    #[test]
    fn test_no_start_urls() {
        let mut cfg = config();
        cfg.start_urls.clear();
        assert!(matches!(Site::new(cfg), Err(ConfigError::NoStartUrls { .. })));
    }

    #[test]
    fn test_relative_start_url_rejected() {
        let mut cfg = config();
        cfg.start_urls = vec!["/statutes".into()];
        assert!(matches!(Site::new(cfg), Err(ConfigError::InvalidStartUrl { .. })));
    }

    #[test]
    fn test_bad_selector_rejected() {
        let mut cfg = config();
        cfg.selectors.title = "..broken[".into();
        assert!(matches!(
            Site::new(cfg),
            Err(ConfigError::InvalidSelector { field: "title", .. })
        ));
    }

    #[test]
    fn test_start_role_defaults_to_leaf_when_missing() {
        let json = r#"{
            "name": "single",
            "start_urls": ["https://a.test/law/1"],
            "selectors": {"container": "main", "title": "h1", "body": "p"}
        }"#;
        let cfg: SiteConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.start_role, Some(Role::Leaf));
        assert!(cfg.routes.is_empty());
    }

    #[test]
    fn test_start_role_null_is_seed() {
        let json = r#"{
            "name": "seeded",
            "start_urls": ["https://a.test/"],
            "start_role": null,
            "selectors": {"container": "main", "title": "h1", "body": "p"},
            "routes": [{"glob": "https://a.test/*", "role": "leaf"}]
        }"#;
        let cfg: SiteConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.start_role, None);
    }

    #[test]
    fn test_with_start_urls_revalidates() {
        let site = Site::new(config()).unwrap();
        assert!(site.clone().with_start_urls(vec![]).is_err());
        let site = site.with_start_urls(vec!["https://a.test/cite/2".into()]).unwrap();
        assert_eq!(site.start_urls(), ["https://a.test/cite/2".to_string()]);
    }

    #[test]
    fn test_sample_site_file_matches_preset() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("sites/mn-statutes.json");
        let from_file = Site::from_file(&path).unwrap();
        assert_eq!(from_file.config, preset("mn-statutes").unwrap());
    }

    #[test]
    fn test_from_file_missing() {
        let err = Site::from_file(Path::new("/nonexistent/site.json")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadSiteFile { .. }));
    }
}

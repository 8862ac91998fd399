// src/error.rs
// =============================================================================
// Typed errors for the crawler's library-side modules.
//
// The binary entry point (main.rs) works with anyhow::Result; everything
// below it returns one of these enums so callers can tell a bad site file
// apart from a failed fetch or a broken dataset directory.
// =============================================================================

use std::path::PathBuf;

use thiserror::Error;

/// Problems with a site configuration or crawl options. Always fatal, and
/// always detected before the first page is fetched.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("site '{site}' has no start URLs")]
    NoStartUrls { site: String },

    #[error("invalid start URL '{url}': {source}")]
    InvalidStartUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("invalid glob pattern '{glob}': {reason}")]
    InvalidGlob { glob: String, reason: String },

    #[error("invalid {field} selector '{selector}': {reason}")]
    InvalidSelector {
        field: &'static str,
        selector: String,
        reason: String,
    },

    #[error("unknown site preset '{0}' (try `statute-crawler sites`)")]
    UnknownPreset(String),

    #[error("could not read site file {path}: {source}")]
    ReadSiteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse site file {path}: {source}")]
    ParseSiteFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("visit budget must be at least 1")]
    ZeroBudget,
}

/// A single target could not be rendered. Never fatal for the crawl.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("gave up on {url} after {attempts} attempts: {last}")]
    Exhausted {
        url: String,
        attempts: u32,
        last: Box<RenderError>,
    },
}

impl RenderError {
    /// Whether another attempt at the same URL could succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            RenderError::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            RenderError::Status { status, .. } => *status == 429 || (500..600).contains(status),
            RenderError::Exhausted { .. } => false,
        }
    }
}

/// Dataset persistence failed. Fatal: records can no longer be stored.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("dataset I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not encode record: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Errors that stop a crawl run.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Sink(#[from] SinkError),
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
pub type RenderResult<T> = std::result::Result<T, RenderError>;
pub type SinkResult<T> = std::result::Result<T, SinkError>;
pub type CrawlResult<T> = std::result::Result<T, CrawlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_retryable() {
        let retry = RenderError::Status { url: "https://x.test".into(), status: 503 };
        let too_many = RenderError::Status { url: "https://x.test".into(), status: 429 };
        let missing = RenderError::Status { url: "https://x.test".into(), status: 404 };
        assert!(retry.is_retryable());
        assert!(too_many.is_retryable());
        assert!(!missing.is_retryable());
    }

    #[test]
    fn test_exhausted_not_retryable() {
        let err = RenderError::Exhausted {
            url: "https://x.test".into(),
            attempts: 4,
            last: Box::new(RenderError::Status { url: "https://x.test".into(), status: 500 }),
        };
        assert!(!err.is_retryable());
        assert!(err.to_string().contains("after 4 attempts"));
    }
}

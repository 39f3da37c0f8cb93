// src/parser/mod.rs
// =============================================================================
// This module turns a URL into the two things the crawler needs from a page:
// - how often each word appears on it
// - which other pages it links to
//
// The crawl engine only sees the PageParser trait, so it can run against the
// real HTML parser or against an in-memory fake in tests.
//
// Submodules:
// - html: fetches http(s):// and file:// pages and parses them with scraper
// =============================================================================

mod html;

pub use html::HtmlPageParser;

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;

/// What one page contributed to the crawl
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageContent {
    pub word_counts: HashMap<String, u64>,
    pub links: Vec<String>,
}

/// Why a page could not be fetched or parsed
///
/// The crawler logs these and moves on; none of them stop a crawl.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("unsupported URL scheme '{0}'")]
    UnsupportedScheme(String),

    #[error("file URL has no local path: {0}")]
    BadFilePath(String),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} for {url}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("failed to read {path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Fetches and parses a single page
///
/// Implementations may be slow or fail; they are called concurrently from
/// many crawl workers, hence Send + Sync.
#[async_trait]
pub trait PageParser: Send + Sync {
    async fn parse(&self, url: &str) -> Result<PageContent, ParseError>;
}

// src/parser/html.rs
// =============================================================================
// This module fetches pages and extracts their words and links.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever (Mozilla's HTML parser)
//
// Supported URL schemes:
// - http:// and https:// are fetched with reqwest
// - file:// is read from the local disk (handy for offline crawls and tests)
//
// Word extraction:
// - only visible text: <script> and <style> contents are skipped
// - tokens are split on whitespace, stripped of surrounding punctuation
//   and lowercased
// - tokens matching an ignored-word pattern in full are dropped
// =============================================================================

use super::{PageContent, PageParser, ParseError};
use crate::crawl::PatternSet;
use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Node, Selector};
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

// Per-request limits; the crawl deadline is separate and only checked
// between fetches
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const MAX_REDIRECTS: usize = 5;

pub struct HtmlPageParser {
    client: Client,
    ignored_words: PatternSet,
}

impl HtmlPageParser {
    pub fn new(ignored_words: PatternSet) -> Result<Self, ParseError> {
        // One client for every request so connections are pooled
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .user_agent(concat!("word-crawler/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            ignored_words,
        })
    }

    async fn fetch(&self, url: &Url) -> Result<String, ParseError> {
        match url.scheme() {
            "http" | "https" => {
                let response = self.client.get(url.clone()).send().await?;

                if !response.status().is_success() {
                    return Err(ParseError::Status {
                        url: url.to_string(),
                        status: response.status(),
                    });
                }

                Ok(response.text().await?)
            }
            "file" => {
                let path = url
                    .to_file_path()
                    .map_err(|_| ParseError::BadFilePath(url.to_string()))?;
                tokio::fs::read_to_string(&path)
                    .await
                    .map_err(|source| ParseError::File { path, source })
            }
            other => Err(ParseError::UnsupportedScheme(other.to_string())),
        }
    }
}

#[async_trait]
impl PageParser for HtmlPageParser {
    async fn parse(&self, url: &str) -> Result<PageContent, ParseError> {
        let base = Url::parse(url).map_err(|source| ParseError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;

        let html = self.fetch(&base).await?;
        Ok(parse_html(&html, &base, &self.ignored_words))
    }
}

/// Extracts word counts and links from an HTML document
///
/// `base` is the page's own URL, used to resolve relative links.
pub fn parse_html(html: &str, base: &Url, ignored_words: &PatternSet) -> PageContent {
    let document = Html::parse_document(html);

    PageContent {
        word_counts: extract_words(&document, ignored_words),
        links: extract_links(&document, base),
    }
}

fn extract_words(document: &Html, ignored_words: &PatternSet) -> HashMap<String, u64> {
    let mut counts = HashMap::new();

    // Selector::parse only fails on invalid CSS; this one is a constant
    let body_selector = Selector::parse("body").unwrap();
    let root = document
        .select(&body_selector)
        .next()
        .unwrap_or_else(|| document.root_element());

    for node in root.descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };

        let hidden = node.ancestors().any(|ancestor| {
            matches!(ancestor.value(), Node::Element(element) if matches!(element.name(), "script" | "style"))
        });
        if hidden {
            continue;
        }

        for token in text.split_whitespace() {
            let word = normalize_word(token);
            if word.is_empty() || ignored_words.matches(&word) {
                continue;
            }
            *counts.entry(word).or_insert(0) += 1;
        }
    }

    counts
}

// "Hello," -> "hello", "(rust)" -> "rust", "--" -> ""
fn normalize_word(token: &str) -> String {
    token
        .trim_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase()
}

fn extract_links(document: &Html, base: &Url) -> Vec<String> {
    let selector = Selector::parse("a[href]").unwrap();

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve_link(base, href))
        .collect()
}

// Resolves a link (possibly relative) to an absolute, fragment-free URL
//
// Returns None for anchors, mail/phone/script links and any scheme the
// parser cannot fetch.
fn resolve_link(base: &Url, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty()
        || href.starts_with('#')
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("javascript:")
    {
        return None;
    }

    // join() handles both absolute and relative hrefs
    let mut url = base.join(href).ok()?;
    if !matches!(url.scheme(), "http" | "https" | "file") {
        return None;
    }
    url.set_fragment(None);
    Some(url.to_string())
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why walk text nodes instead of calling .text() on <body>?
//    - .text() would include the contents of <script> and <style>, which
//      are code, not words a reader sees
//
// 2. Why strip the fragment from links?
//    - /docs#install and /docs#usage are the same page; without this the
//      visited set would treat them as two pages and fetch both
//
// 3. Why support file:// URLs?
//    - Crawling a folder of saved HTML pages works offline and makes the
//      parser easy to test
// -----------------------------------------------------------------------------

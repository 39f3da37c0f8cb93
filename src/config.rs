// src/config.rs
// =============================================================================
// This module loads and validates the crawler configuration.
//
// The configuration is a small JSON document, for example:
//
//   {
//     "startPages": ["https://example.com"],
//     "ignoredUrls": [".*\\.pdf"],
//     "ignoredWords": ["^.{1,3}$"],
//     "parallelism": 4,
//     "maxDepth": 2,
//     "timeoutSeconds": 5,
//     "popularWordCount": 10,
//     "resultPath": "result.json"
//   }
//
// Two stages:
// - CrawlerConfig: exactly what the user wrote (serde)
// - CrawlSettings: the validated, compiled form the crawler runs with
//
// Validation happens before the crawler exists, so a bad pattern or a zero
// parallelism never produces a half-finished crawl.
// =============================================================================

use crate::crawl::PatternSet;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Errors raised while loading or validating a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("parallelism must be at least 1")]
    ZeroParallelism,
}

// The raw configuration as written in the JSON file
//
// Every field has a default so a config can be as small as
// {"startPages": [...], "maxDepth": 1}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CrawlerConfig {
    #[serde(default)]
    pub start_pages: Vec<String>,

    /// Regular expressions; a URL matching one in full is never crawled
    #[serde(default)]
    pub ignored_urls: Vec<String>,

    /// Regular expressions; a word matching one in full is never counted
    #[serde(default)]
    pub ignored_words: Vec<String>,

    #[serde(default = "default_parallelism")]
    pub parallelism: usize,

    #[serde(default)]
    pub max_depth: usize,

    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    #[serde(default)]
    pub popular_word_count: usize,

    /// Where to write the JSON result; stdout when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_path: Option<PathBuf>,
}

fn default_parallelism() -> usize {
    num_cpus::get()
}

fn default_timeout_seconds() -> u64 {
    1
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            start_pages: Vec::new(),
            ignored_urls: Vec::new(),
            ignored_words: Vec::new(),
            parallelism: default_parallelism(),
            max_depth: 0,
            timeout_seconds: default_timeout_seconds(),
            popular_word_count: 0,
            result_path: None,
        }
    }
}

impl CrawlerConfig {
    /// Reads a JSON config file from disk
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

// The validated settings the crawl engine runs with
//
// Fields are public so tests (and callers embedding the engine) can build
// settings directly, e.g. with a sub-second timeout.
#[derive(Debug, Clone)]
pub struct CrawlSettings {
    pub timeout: Duration,
    pub max_depth: usize,
    pub popular_word_count: usize,
    pub parallelism: usize,
    pub ignored_urls: PatternSet,
}

impl Default for CrawlSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(default_timeout_seconds()),
            max_depth: 0,
            popular_word_count: 0,
            parallelism: 1,
            ignored_urls: PatternSet::default(),
        }
    }
}

impl CrawlSettings {
    /// Validates a raw config and compiles its URL patterns
    pub fn from_config(config: &CrawlerConfig) -> Result<Self, ConfigError> {
        if config.parallelism == 0 {
            return Err(ConfigError::ZeroParallelism);
        }

        Ok(Self {
            timeout: config.timeout(),
            max_depth: config.max_depth,
            popular_word_count: config.popular_word_count,
            parallelism: config.parallelism,
            ignored_urls: PatternSet::compile(&config.ignored_urls)?,
        })
    }
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. What does deny_unknown_fields do?
//    - A typo like "maxDepthh" becomes an error instead of silently
//      falling back to the default depth
//
// 2. Why are sizes usize and not i64?
//    - A negative depth or word count makes no sense; with usize serde
//      rejects -1 while parsing, before the crawler is built
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_full_config() {
        let json = r#"{
            "startPages": ["https://example.com"],
            "ignoredUrls": [".*\\.pdf"],
            "ignoredWords": ["^.{1,3}$"],
            "parallelism": 4,
            "maxDepth": 2,
            "timeoutSeconds": 5,
            "popularWordCount": 10,
            "resultPath": "out.json"
        }"#;
        let config = CrawlerConfig::from_json(json).unwrap();

        assert_eq!(config.start_pages, vec!["https://example.com"]);
        assert_eq!(config.ignored_urls, vec![".*\\.pdf"]);
        assert_eq!(config.parallelism, 4);
        assert_eq!(config.max_depth, 2);
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert_eq!(config.popular_word_count, 10);
        assert_eq!(config.result_path, Some(PathBuf::from("out.json")));
    }

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config = CrawlerConfig::from_json(r#"{"startPages": ["a"]}"#).unwrap();
        assert_eq!(config.max_depth, 0);
        assert_eq!(config.timeout_seconds, 1);
        assert_eq!(config.parallelism, num_cpus::get());
        assert!(config.result_path.is_none());
    }

    #[test]
    fn test_reject_negative_depth() {
        let result = CrawlerConfig::from_json(r#"{"maxDepth": -1}"#);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_reject_unknown_field() {
        let result = CrawlerConfig::from_json(r#"{"maxDepthh": 1}"#);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_zero_parallelism_fails_fast() {
        let config = CrawlerConfig {
            parallelism: 0,
            ..CrawlerConfig::default()
        };
        let result = CrawlSettings::from_config(&config);
        assert!(matches!(result, Err(ConfigError::ZeroParallelism)));
    }

    #[test]
    fn test_malformed_pattern_fails_fast() {
        let config = CrawlerConfig {
            ignored_urls: vec!["(unclosed".to_string()],
            ..CrawlerConfig::default()
        };
        match CrawlSettings::from_config(&config) {
            Err(ConfigError::InvalidPattern { pattern, .. }) => assert_eq!(pattern, "(unclosed"),
            other => panic!("expected InvalidPattern, got {:?}", other),
        }
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, r#"{{"startPages": ["https://example.com"], "maxDepth": 3}}"#).unwrap();

        let config = CrawlerConfig::from_path(&path).unwrap();
        assert_eq!(config.max_depth, 3);
    }

    #[test]
    fn test_from_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let result = CrawlerConfig::from_path(&dir.path().join("missing.json"));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }
}

// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Two ways to describe a crawl:
// - `crawl <CONFIG>`: everything comes from a JSON config file
// - `site <URL>...`: everything comes from flags
//
// Both end up as the same CrawlerConfig, so the rest of the program does
// not care which one was used.
// =============================================================================

use crate::config::{ConfigError, CrawlerConfig};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "word-crawler",
    version,
    about = "Crawl websites in parallel and report the most popular words",
    long_about = "word-crawler follows links from a set of starting pages, up to a maximum depth \
                  and within a time budget, counts every word it sees and prints the most \
                  frequent ones together with the number of pages visited."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a crawl described by a JSON config file
    ///
    /// Example: word-crawler crawl crawl.json
    Crawl {
        /// Path to the JSON config file
        config: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Crawl from URLs given on the command line
    ///
    /// Example: word-crawler site https://example.com --max-depth 2
    Site {
        /// One or more starting URLs
        #[arg(required = true)]
        urls: Vec<String>,

        /// Maximum link depth (0 visits nothing, 1 only the starting pages)
        #[arg(long, default_value_t = 1)]
        max_depth: usize,

        /// Time budget for the whole crawl, in seconds
        #[arg(long, default_value_t = 10)]
        timeout_seconds: u64,

        /// How many of the most popular words to report
        #[arg(long, default_value_t = 10)]
        popular_word_count: usize,

        /// Worker threads (clamped to the number of CPUs)
        #[arg(long)]
        parallelism: Option<usize>,

        /// Regex of URLs never to crawl (whole-URL match, repeatable)
        #[arg(long = "ignore-url", value_name = "REGEX")]
        ignored_urls: Vec<String>,

        /// Regex of words never to count (whole-word match, repeatable)
        #[arg(long = "ignore-word", value_name = "REGEX")]
        ignored_words: Vec<String>,

        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Output the result as JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// Write the JSON result to this file (implies --json)
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

impl Commands {
    /// Resolves this command into the crawl config and output options
    ///
    /// `crawl` reads its config file here; `--output` overrides the file's
    /// resultPath.
    pub fn into_config(self) -> Result<(CrawlerConfig, OutputArgs), ConfigError> {
        match self {
            Commands::Crawl { config, output } => {
                let mut config = CrawlerConfig::from_path(&config)?;
                if output.output.is_some() {
                    config.result_path = output.output.clone();
                }
                Ok((config, output))
            }
            Commands::Site {
                urls,
                max_depth,
                timeout_seconds,
                popular_word_count,
                parallelism,
                ignored_urls,
                ignored_words,
                output,
            } => {
                let mut config = CrawlerConfig {
                    start_pages: urls,
                    ignored_urls,
                    ignored_words,
                    max_depth,
                    timeout_seconds,
                    popular_word_count,
                    result_path: output.output.clone(),
                    ..CrawlerConfig::default()
                };
                if let Some(parallelism) = parallelism {
                    config.parallelism = parallelism;
                }
                Ok((config, output))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_flags_become_config() {
        let cli = Cli::try_parse_from([
            "word-crawler",
            "site",
            "https://a.example",
            "https://b.example",
            "--max-depth",
            "3",
            "--popular-word-count",
            "5",
            "--parallelism",
            "2",
            "--ignore-url",
            ".*\\.pdf",
            "--ignore-word",
            "the",
            "--ignore-word",
            "and",
        ])
        .unwrap();

        let (config, output) = cli.command.into_config().unwrap();
        assert_eq!(config.start_pages, vec!["https://a.example", "https://b.example"]);
        assert_eq!(config.max_depth, 3);
        assert_eq!(config.popular_word_count, 5);
        assert_eq!(config.parallelism, 2);
        assert_eq!(config.ignored_urls, vec![".*\\.pdf"]);
        assert_eq!(config.ignored_words, vec!["the", "and"]);
        assert!(!output.json);
        assert!(output.output.is_none());
    }

    #[test]
    fn test_site_requires_a_url() {
        assert!(Cli::try_parse_from(["word-crawler", "site"]).is_err());
    }

    #[test]
    fn test_crawl_loads_config_and_overrides_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("crawl.json");
        std::fs::write(
            &path,
            r#"{"startPages": ["https://example.com"], "maxDepth": 2, "resultPath": "a.json"}"#,
        )
        .unwrap();

        let cli = Cli::try_parse_from([
            "word-crawler",
            "crawl",
            path.to_str().unwrap(),
            "--output",
            "b.json",
        ])
        .unwrap();
        let (config, output) = cli.command.into_config().unwrap();

        assert_eq!(config.start_pages, vec!["https://example.com"]);
        assert_eq!(config.max_depth, 2);
        assert_eq!(config.result_path, Some(PathBuf::from("b.json")));
        assert_eq!(output.output, Some(PathBuf::from("b.json")));
    }

    #[test]
    fn test_crawl_with_missing_config_fails() {
        let cli = Cli::try_parse_from(["word-crawler", "crawl", "/nonexistent/crawl.json"]).unwrap();
        assert!(matches!(
            cli.command.into_config(),
            Err(ConfigError::Read { .. })
        ));
    }
}

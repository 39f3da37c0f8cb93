// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Set up logging (to stderr, filtered by RUST_LOG)
// 2. Parse command-line arguments using clap
// 3. Build and validate the crawl configuration
// 4. Run the crawl and print or save the result
// 5. Exit with proper code (0 = success, 2 = error)
//
// Why is main not async?
// - The Crawler owns its own multi-threaded tokio runtime (the worker pool)
//   sized from the config, and blocks on it inside crawl()
// - Blocking on a runtime from inside another runtime panics, so main stays
//   a plain synchronous function
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli;     // src/cli.rs - command-line parsing
mod config;  // src/config.rs - JSON config loading and validation
mod crawl;   // src/crawl/ - the parallel crawl engine
mod output;  // src/output.rs - JSON / table reporting
mod parser;  // src/parser/ - page fetching and HTML parsing

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use config::CrawlSettings;
use crawl::{Crawler, PatternSet};
use output::Report;
use parser::HtmlPageParser;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn main() {
    init_logging();

    let exit_code = match run() {
        Ok(()) => 0,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Logs go to stderr so JSON on stdout stays machine-readable
// Default level is info; override with e.g. RUST_LOG=word_crawler=debug
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let (config, output) = cli
        .command
        .into_config()
        .context("failed to load crawl configuration")?;

    // Validate everything before a single task is spawned
    let settings = CrawlSettings::from_config(&config).context("invalid crawl configuration")?;
    let ignored_words = PatternSet::compile(&config.ignored_words)
        .context("invalid crawl configuration")?;

    let parser = HtmlPageParser::new(ignored_words).context("failed to create HTTP client")?;
    let crawler = Crawler::new(settings, Arc::new(parser), num_cpus::get())?;
    tracing::debug!(workers = crawler.parallelism(), "worker pool ready");

    let result = crawler.crawl(&config.start_pages);

    let report = match (&config.result_path, output.json) {
        (Some(path), _) => Report::JsonFile(path),
        (None, true) => Report::Json,
        (None, false) => Report::Table,
    };
    output::write_result(&result, report)
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why Arc::new(parser)?
//    - Every crawl task on every worker thread calls the same parser
//    - Arc (atomically reference counted) lets them share one instance
//    - The crawler stores it as Arc<dyn PageParser>, so tests can swap in
//      a fake parser without touching the engine
//
// 2. Why num_cpus::get() here and not inside the crawler?
//    - The crawler is told how much parallelism the host offers instead of
//      asking the machine itself, so tests can pin it to a fixed number
//
// 3. What if some pages fail to load?
//    - The crawl still succeeds; failed pages are logged as warnings and
//      simply contribute no words or links
// -----------------------------------------------------------------------------

// src/crawl/mod.rs
// =============================================================================
// This module handles the parallel crawl.
//
// Features:
// - Recursive crawl tasks on a fixed-size worker pool
// - Each URL fetched at most once per crawl
// - Depth limit and a single crawl-wide deadline
// - Word counts merged from every visited page, then ranked
//
// Submodules:
// - engine: the Crawler (worker pool, traversal tasks, join barrier)
// - state: the shared visited set and word counts
// - rank: ordering of the most popular words
// - patterns: whole-string regex matching for ignored URLs and words
// - result: the CrawlResult handed back to the caller
// =============================================================================

mod engine;
mod patterns;
mod rank;
mod result;
mod state;

// Re-export the public crawl API
pub use engine::Crawler;
pub use patterns::PatternSet;
pub use result::CrawlResult;

// src/crawl/state.rs
// =============================================================================
// Shared state for a single crawl: the visited set and the word counts.
//
// Both are written by every traversal task at once, from every worker thread.
// DashMap/DashSet split their contents into shards, each behind its own lock,
// so two tasks only contend when they touch the same shard, and no lock is
// ever held across a network fetch.
//
// A fresh CrawlState is created for every crawl() call and dropped once the
// result is built.
// =============================================================================

use dashmap::{DashMap, DashSet};
use std::collections::HashMap;

/// URLs claimed by some traversal task during this crawl
#[derive(Debug, Default)]
pub struct VisitedSet {
    urls: DashSet<String>,
}

impl VisitedSet {
    /// Atomically claims `url`; only the first caller gets `true`
    pub fn claim(&self, url: &str) -> bool {
        // insert() takes the shard's write lock, so the membership test and
        // the insert cannot interleave with another claim of the same URL
        self.urls.insert(url.to_string())
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

/// word -> cumulative occurrence count across every visited page
#[derive(Debug, Default)]
pub struct WordAccumulator {
    counts: DashMap<String, u64>,
}

impl WordAccumulator {
    pub fn add(&self, word: &str, count: u64) {
        // entry() holds the shard lock for the read-add-write
        *self.counts.entry(word.to_string()).or_insert(0) += count;
    }

    /// Adds every (word, count) pair of one page
    pub fn merge(&self, page_counts: &HashMap<String, u64>) {
        for (word, &count) in page_counts {
            self.add(word, count);
        }
    }

    /// Plain copy of the current counts, for ranking
    pub fn snapshot(&self) -> HashMap<String, u64> {
        self.counts
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect()
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().map(|entry| *entry.value()).sum()
    }
}

#[derive(Debug, Default)]
pub struct CrawlState {
    pub visited: VisitedSet,
    pub words: WordAccumulator,
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why not Mutex<HashSet<String>>?
//    - One lock for the whole set would make every task wait on every other
//    - DashSet locks one shard at a time, so claims on different URLs
//      mostly proceed in parallel
//
// 2. Why must claim() be a single insert() call?
//    - "if !contains { insert }" is two steps; two tasks could both see
//      "not contained" and both fetch the page
//    - insert() returns false when the URL was already there, in one step
// -----------------------------------------------------------------------------

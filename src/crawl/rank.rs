// src/crawl/rank.rs
// =============================================================================
// Picks the most popular words out of the accumulated counts.
//
// Ordering:
// 1. higher count first
// 2. equal counts: longer word first
// 3. equal length: alphabetical (lexicographic) order
//
// The three keys together form a total order over distinct words, so the
// output never depends on HashMap iteration order.
// =============================================================================

use std::cmp::Ordering;
use std::collections::HashMap;

/// Returns at most `limit` (word, count) pairs in ranked order
///
/// The input is only borrowed; it is never modified.
pub fn rank(counts: &HashMap<String, u64>, limit: usize) -> Vec<(String, u64)> {
    let mut entries: Vec<(&String, &u64)> = counts.iter().collect();
    entries.sort_by(|a, b| compare(a, b));

    entries
        .into_iter()
        .take(limit)
        .map(|(word, &count)| (word.clone(), count))
        .collect()
}

fn compare(a: &(&String, &u64), b: &(&String, &u64)) -> Ordering {
    b.1.cmp(a.1)
        .then_with(|| b.0.len().cmp(&a.0.len()))
        .then_with(|| a.0.cmp(b.0))
}

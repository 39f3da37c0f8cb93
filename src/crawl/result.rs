// src/crawl/result.rs
// =============================================================================
// The output of one crawl.
//
// JSON shape:
//   {
//     "wordCounts": { "rust": 12, "crab": 7 },
//     "urlsVisited": 3
//   }
//
// wordCounts is written as a JSON object, but its keys keep ranked order,
// so word_counts is stored as a Vec of pairs rather than a HashMap.
// =============================================================================

use serde::{Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlResult {
    /// Most popular words, highest ranked first
    #[serde(serialize_with = "serialize_ranked")]
    pub word_counts: Vec<(String, u64)>,
    /// Number of distinct URLs claimed during the crawl
    pub urls_visited: usize,
}

impl CrawlResult {
    pub fn empty() -> Self {
        Self {
            word_counts: Vec::new(),
            urls_visited: 0,
        }
    }
}

fn serialize_ranked<S: Serializer>(words: &[(String, u64)], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_map(words.iter().map(|(word, count)| (word, count)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_keeps_ranked_order() {
        let result = CrawlResult {
            word_counts: vec![("zebra".to_string(), 9), ("apple".to_string(), 2)],
            urls_visited: 4,
        };
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(json, r#"{"wordCounts":{"zebra":9,"apple":2},"urlsVisited":4}"#);
    }

    #[test]
    fn test_empty_result_json() {
        let json = serde_json::to_string(&CrawlResult::empty()).unwrap();
        assert_eq!(json, r#"{"wordCounts":{},"urlsVisited":0}"#);
    }
}

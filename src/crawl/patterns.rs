// src/crawl/patterns.rs
// =============================================================================
// Whole-string pattern matching for ignored URLs and ignored words.
//
// The regex crate's is_match() finds a match ANYWHERE in the input, so
// "example" would match "https://example.com". Our patterns must match the
// whole string instead, so each one is wrapped as ^(?:pattern)$ before it is
// compiled.
// =============================================================================

use crate::config::ConfigError;
use regex::Regex;

#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    patterns: Vec<Regex>,
}

impl PatternSet {
    /// Compiles every pattern, failing on the first malformed one
    pub fn compile<S: AsRef<str>>(patterns: &[S]) -> Result<Self, ConfigError> {
        let patterns = patterns
            .iter()
            .map(|pattern| {
                let pattern = pattern.as_ref();
                Regex::new(&format!("^(?:{})$", pattern)).map_err(|source| {
                    ConfigError::InvalidPattern {
                        pattern: pattern.to_string(),
                        source,
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { patterns })
    }

    /// True if any pattern matches the entire input
    pub fn matches(&self, input: &str) -> bool {
        self.patterns.iter().any(|pattern| pattern.is_match(input))
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why ^(?:...)$ and not just ^...$?
//    - Alternation binds loosest: ^a|b$ means (^a)|(b$)
//    - The non-capturing group keeps the anchors around the whole pattern
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_match_only() {
        let set = PatternSet::compile(&["example"]).unwrap();
        assert!(set.matches("example"));
        assert!(!set.matches("https://example.com"));
    }

    #[test]
    fn test_any_pattern_matches() {
        let set = PatternSet::compile(&[r".*\.pdf", r"https://ads\..*"]).unwrap();
        assert!(set.matches("https://example.com/paper.pdf"));
        assert!(set.matches("https://ads.example.com/banner"));
        assert!(!set.matches("https://example.com/paper.pdf.html"));
    }

    #[test]
    fn test_alternation_is_anchored_as_a_group() {
        // Without the (?:...) group, "^a|b$" would accept "ax"
        let set = PatternSet::compile(&["a|b"]).unwrap();
        assert!(set.matches("a"));
        assert!(!set.matches("ax"));
        assert!(!set.matches("xb"));
    }

    #[test]
    fn test_empty_set_matches_nothing() {
        let set = PatternSet::default();
        assert!(set.is_empty());
        assert!(!set.matches(""));
        assert!(!set.matches("anything"));
    }

    #[test]
    fn test_invalid_pattern() {
        let result = PatternSet::compile(&["[z-a]"]);
        assert!(matches!(result, Err(ConfigError::InvalidPattern { .. })));
    }
}

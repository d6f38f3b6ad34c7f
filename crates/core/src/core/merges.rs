//! Merge rule management for BPE.
//!
//! Merge rules are keyed by the pair of fragment strings they join. The rank
//! of a rule is its position in the merge list; a lower rank merges earlier.

use ahash::AHashMap;
use compact_str::CompactString;
use tracing::debug;

/// A pair of adjacent fragments that can be merged.
pub type Pair = (CompactString, CompactString);

/// Merge rule mapping: pair -> rank.
pub type MergeMap = AHashMap<Pair, u32>;

/// Collection of BPE merge rules with efficient lookup.
#[derive(Debug, Clone, Default)]
pub struct MergeRules {
    merges: MergeMap,
    /// Maximum rank (for validation and ordering)
    max_rank: u32,
    /// Lines of the source list that did not hold exactly two fields
    skipped: usize,
}

impl MergeRules {
    /// Create a new empty collection of merge rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new collection with capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            merges: MergeMap::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Parse a merge list in the `vocab.bpe` / `merges.txt` layout.
    ///
    /// The first line is a version header and is ignored. Every following
    /// line holds two whitespace-separated fragments. Lines with any other
    /// number of fields are skipped, but still consume a rank, so the rank of
    /// a rule is always its 0-based line index after the header.
    pub fn parse(text: &str) -> Self {
        let mut rules = Self::with_capacity(text.len() / 8);

        for (rank, line) in text.split('\n').skip(1).enumerate() {
            let mut fields = line.split_whitespace();
            match (fields.next(), fields.next(), fields.next()) {
                (Some(left), Some(right), None) => rules.add_merge(left, right, rank as u32),
                _ => rules.skipped += 1,
            }
        }

        debug!(
            merge_count = rules.len(),
            skipped_lines = rules.skipped,
            max_rank = rules.max_rank,
            "merge rules loaded"
        );
        rules
    }

    /// Add a merge rule.
    ///
    /// A pair that is already registered takes the new rank, so in a parsed
    /// list the last occurrence of a pair decides its rank.
    pub fn add_merge(&mut self, left: &str, right: &str, rank: u32) {
        let pair = (CompactString::new(left), CompactString::new(right));
        if let Some(previous) = self.merges.insert(pair, rank) {
            debug!(left, right, previous, rank, "duplicate merge rule re-ranked");
        }
        self.max_rank = self.max_rank.max(rank);
    }

    /// Get the rank of a pair, or `None` if the pair is never merged.
    #[inline]
    pub fn rank(&self, left: &str, right: &str) -> Option<u32> {
        let pair = (CompactString::new(left), CompactString::new(right));
        self.merges.get(&pair).copied()
    }

    /// Get the number of merge rules.
    #[inline]
    pub fn len(&self) -> usize {
        self.merges.len()
    }

    /// Check if there are no merge rules.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.merges.is_empty()
    }

    /// Create merge rules from a list of pairs.
    ///
    /// The pairs are assigned ranks in order (0, 1, 2, ...).
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut rules = Self::new();

        for (rank, (left, right)) in pairs.into_iter().enumerate() {
            rules.add_merge(left, right, rank as u32);
        }

        rules
    }
}

/// Statistics about merge rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeStats {
    /// Number of merge rules
    pub count: usize,
    /// Maximum rank
    pub max_rank: u32,
    /// Minimum rank
    pub min_rank: u32,
    /// Malformed lines skipped while parsing
    pub skipped: usize,
}

impl MergeRules {
    /// Get statistics about the merge rules.
    pub fn stats(&self) -> MergeStats {
        let min_rank = self.merges.values().copied().min().unwrap_or(0);

        MergeStats {
            count: self.len(),
            max_rank: self.max_rank,
            min_rank,
            skipped: self.skipped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_merge() {
        let mut rules = MergeRules::new();
        rules.add_merge("a", "b", 0);
        rules.add_merge("b", "c", 1);

        assert_eq!(rules.rank("a", "b"), Some(0));
        assert_eq!(rules.rank("b", "c"), Some(1));
        assert_eq!(rules.rank("c", "d"), None);
        // order matters
        assert_eq!(rules.rank("b", "a"), None);
    }

    #[test]
    fn test_duplicate_takes_last_rank() {
        let rules = MergeRules::parse("#version: 0.2\na b\nc d\na b\n");
        assert_eq!(rules.rank("a", "b"), Some(2));
        assert_eq!(rules.rank("c", "d"), Some(1));
        assert_eq!(rules.len(), 2);

        let stats = rules.stats();
        assert_eq!(stats.min_rank, 1);
        assert_eq!(stats.max_rank, 2);
    }

    #[test]
    fn test_parse_skips_header() {
        let rules = MergeRules::parse("#version: 0.2\nĠ t\nh e\n");

        assert_eq!(rules.rank("Ġ", "t"), Some(0));
        assert_eq!(rules.rank("h", "e"), Some(1));
        // the header never becomes a rule even though it has two fields
        assert_eq!(rules.rank("#version:", "0.2"), None);
    }

    #[test]
    fn test_parse_malformed_lines_keep_line_index() {
        let text = "#version: 0.2\na b\nbroken\nc d e\n\nf g\n";
        let rules = MergeRules::parse(text);

        assert_eq!(rules.len(), 2);
        assert_eq!(rules.rank("a", "b"), Some(0));
        assert_eq!(rules.rank("f", "g"), Some(4));
        // "broken", "c d e" and the empty line, plus the trailing empty line
        assert_eq!(rules.stats().skipped, 4);
    }

    #[test]
    fn test_parse_crlf_and_tabs() {
        let rules = MergeRules::parse("header\r\nh\te\r\nl l\r\n");
        assert_eq!(rules.rank("h", "e"), Some(0));
        assert_eq!(rules.rank("l", "l"), Some(1));
    }

    #[test]
    fn test_parse_empty() {
        assert!(MergeRules::parse("").is_empty());
        assert!(MergeRules::parse("#version: 0.2").is_empty());
    }

    #[test]
    fn test_stats() {
        let mut rules = MergeRules::new();
        rules.add_merge("a", "b", 0);
        rules.add_merge("b", "c", 1);
        rules.add_merge("c", "d", 5);

        let stats = rules.stats();
        assert_eq!(stats.count, 3);
        assert_eq!(stats.min_rank, 0);
        assert_eq!(stats.max_rank, 5);
        assert_eq!(stats.skipped, 0);
    }
}

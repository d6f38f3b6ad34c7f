//! The BPE merge loop.
//!
//! A chunk of remapped text starts as one fragment per character. On every
//! iteration the adjacent pair with the lowest rank in [`MergeRules`] is
//! found, and every non-overlapping occurrence of that pair is joined, left
//! to right. The loop ends when no adjacent pair has a rank or a single
//! fragment remains. Each iteration removes at least one fragment, so the
//! loop runs at most `chars - 1` times.

use super::merges::MergeRules;
use compact_str::CompactString;
use std::fmt;
use tracing::trace;

/// The fragments a chunk was merged into, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Word(Vec<CompactString>);

impl Word {
    /// Split a string into one fragment per character.
    pub fn from_chars(text: &str) -> Self {
        let mut buf = [0u8; 4];
        Word(
            text.chars()
                .map(|ch| CompactString::new(ch.encode_utf8(&mut buf)))
                .collect(),
        )
    }

    /// Number of fragments.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The fragments in order.
    pub fn fragments(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.iter().map(|f| f.as_str())
    }

    /// Position and rank of the lowest-ranked adjacent pair.
    ///
    /// Equal ranks cannot occur for distinct pairs; for repeated occurrences
    /// of the same pair the leftmost position is reported.
    fn best_pair(&self, rules: &MergeRules) -> Option<(usize, u32)> {
        self.0
            .windows(2)
            .enumerate()
            .filter_map(|(pos, w)| rules.rank(&w[0], &w[1]).map(|rank| (pos, rank)))
            .min_by_key(|&(pos, rank)| (rank, pos))
    }

    /// Join every non-overlapping occurrence of `(first, second)`, scanning
    /// left to right. A freshly joined fragment is not reconsidered in the
    /// same pass.
    fn merge_pair(&mut self, first: &str, second: &str) {
        let mut merged = Vec::with_capacity(self.0.len());
        let mut i = 0;

        while i < self.0.len() {
            if i + 1 < self.0.len() && self.0[i] == first && self.0[i + 1] == second {
                let mut joined = CompactString::with_capacity(first.len() + second.len());
                joined.push_str(first);
                joined.push_str(second);
                merged.push(joined);
                i += 2;
            } else {
                merged.push(std::mem::take(&mut self.0[i]));
                i += 1;
            }
        }

        self.0 = merged;
    }
}

/// Fragments joined by single spaces, the form used in merge lists.
impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, fragment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(fragment)?;
        }
        Ok(())
    }
}

/// Applies merge rules to single chunks.
#[derive(Debug, Clone, Copy)]
pub struct BpeEngine<'r> {
    rules: &'r MergeRules,
}

impl<'r> BpeEngine<'r> {
    pub fn new(rules: &'r MergeRules) -> Self {
        Self { rules }
    }

    /// Merge one already-remapped chunk into vocabulary fragments.
    pub fn merge(&self, chunk: &str) -> Word {
        let mut word = Word::from_chars(chunk);

        while word.len() >= 2 {
            let Some((pos, rank)) = word.best_pair(self.rules) else {
                break;
            };

            let first = word.0[pos].clone();
            let second = word.0[pos + 1].clone();
            let before = word.len();
            word.merge_pair(&first, &second);

            trace!(
                left = %first,
                right = %second,
                rank,
                fragments = word.len(),
                "bpe merge"
            );

            // the selected pair is always present, so this only guards the loop
            if word.len() == before {
                break;
            }
        }

        word
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fragments(word: &Word) -> Vec<&str> {
        word.fragments().collect()
    }

    #[test]
    fn test_no_rules_leaves_characters() {
        let rules = MergeRules::new();
        let word = BpeEngine::new(&rules).merge("abc");
        assert_eq!(fragments(&word), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_trivial_chunks() {
        let rules = MergeRules::from_pairs([("a", "b")]);
        let engine = BpeEngine::new(&rules);

        assert!(engine.merge("").is_empty());
        assert_eq!(fragments(&engine.merge("a")), vec!["a"]);
    }

    #[test]
    fn test_full_merge() {
        let rules = MergeRules::from_pairs([("h", "e"), ("l", "l"), ("he", "ll"), ("hell", "o")]);
        let word = BpeEngine::new(&rules).merge("hello");
        assert_eq!(fragments(&word), vec!["hello"]);
    }

    #[test]
    fn test_lowest_rank_wins_regardless_of_position() {
        // "a b" occurs first in the chunk but "b c" has rank 0
        let rules = MergeRules::from_pairs([("b", "c"), ("a", "b")]);
        let word = BpeEngine::new(&rules).merge("abc");
        assert_eq!(fragments(&word), vec!["a", "bc"]);

        // and the other way round
        let rules = MergeRules::from_pairs([("a", "b"), ("b", "c")]);
        let word = BpeEngine::new(&rules).merge("abc");
        assert_eq!(fragments(&word), vec!["ab", "c"]);
    }

    #[test]
    fn test_later_pair_with_rank_zero() {
        let rules = MergeRules::from_pairs([("y", "z"), ("w", "x"), ("x", "y")]);
        let word = BpeEngine::new(&rules).merge("wxyz");
        // "y z" first, then "w x"; "x y" no longer exists
        assert_eq!(fragments(&word), vec!["wx", "yz"]);
    }

    #[test]
    fn test_non_overlapping_occurrences() {
        let rules = MergeRules::from_pairs([("a", "a")]);
        let word = BpeEngine::new(&rules).merge("aaa");
        assert_eq!(fragments(&word), vec!["aa", "a"]);

        let word = BpeEngine::new(&rules).merge("aaaa");
        assert_eq!(fragments(&word), vec!["aa", "aa"]);
    }

    #[test]
    fn test_merged_fragment_not_reused_in_same_pass() {
        // after "a a" -> "aa", the pass must not immediately join "aa" with "a"
        let rules = MergeRules::from_pairs([("a", "a"), ("aa", "a")]);
        let word = BpeEngine::new(&rules).merge("aaa");
        // second iteration joins "aa" + "a"
        assert_eq!(fragments(&word), vec!["aaa"]);
    }

    #[test]
    fn test_multibyte_fragments() {
        // the remapped form of U+1F44B
        let rules = MergeRules::from_pairs([("ð", "Ł"), ("ðŁ", "ĳ"), ("ðŁĳ", "ĭ")]);
        let word = BpeEngine::new(&rules).merge("ðŁĳĭ");
        assert_eq!(fragments(&word), vec!["ðŁĳĭ"]);
    }

    #[test]
    fn test_display_joins_with_spaces() {
        let rules = MergeRules::from_pairs([("l", "l")]);
        let word = BpeEngine::new(&rules).merge("hello");
        assert_eq!(word.to_string(), "h e ll o");
    }

    #[test]
    fn test_deterministic() {
        let rules = MergeRules::from_pairs([("a", "b"), ("c", "d"), ("ab", "cd")]);
        let engine = BpeEngine::new(&rules);
        let first = engine.merge("abcdabcd");
        for _ in 0..5 {
            assert_eq!(engine.merge("abcdabcd"), first);
        }
        assert_eq!(fragments(&first), vec!["abcd", "abcd"]);
    }
}

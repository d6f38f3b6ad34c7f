//! Text splitting for pre-tokenization.
//!
//! Input text is cut into chunks by character class before any byte
//! remapping happens, so the merge loop never joins bytes across a chunk
//! boundary.

use bytebpe_core::{Result, TokenizerError};
use fancy_regex::Regex as LookaroundRegex;
use regex::Regex;

/// Letters, numbers, other non-space runs, whitespace runs, then any single
/// character.
///
/// Whitespace here is the ASCII set `[\t\n\f\r ]` only. NBSP, vertical tab
/// and the other Unicode spaces fall into the punctuation run.
pub const CATEGORICAL_PATTERN: &str =
    r"\p{L}+|\p{N}+|[^\t\n\f\r \p{L}\p{N}]+|[\t\n\f\r ]+|\S";

/// The GPT-2 pre-tokenizer: English contractions, and a single leading space
/// attached to the following letter, number or punctuation run.
pub const GPT2_PATTERN: &str =
    r"'s|'t|'re|'ve|'m|'ll|'d| ?\p{L}+| ?\p{N}+| ?[^\s\p{L}\p{N}]+|\s+(?!\S)|\s+";

/// Splitting patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SplitPattern {
    /// Pure character-class runs; whitespace is always its own chunk
    #[default]
    Categorical,
    /// GPT-2 pre-tokenization with leading-space words
    Gpt2,
}

impl SplitPattern {
    /// The regular expression behind this pattern.
    pub fn as_regex(&self) -> &'static str {
        match self {
            SplitPattern::Categorical => CATEGORICAL_PATTERN,
            SplitPattern::Gpt2 => GPT2_PATTERN,
        }
    }
}

impl std::str::FromStr for SplitPattern {
    type Err = TokenizerError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "categorical" => Ok(SplitPattern::Categorical),
            "gpt2" | "gpt-2" => Ok(SplitPattern::Gpt2),
            other => Err(TokenizerError::InvalidConfig(format!(
                "Unknown split pattern '{}'. Options: categorical, gpt2",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone)]
enum Engine {
    Plain(Regex),
    /// `fancy_regex` is only needed for the look-ahead in [`GPT2_PATTERN`]
    Lookaround(LookaroundRegex),
}

/// Text splitter for pre-tokenization.
#[derive(Debug, Clone)]
pub struct Splitter {
    /// Pattern to split on
    pattern: SplitPattern,
    engine: Engine,
}

impl Splitter {
    /// Create a new splitter.
    pub fn new(pattern: SplitPattern) -> Result<Self> {
        let invalid = |e: String| {
            TokenizerError::InvalidConfig(format!("Invalid split pattern: {}", e))
        };
        let engine = match pattern {
            SplitPattern::Categorical => Engine::Plain(
                Regex::new(pattern.as_regex()).map_err(|e| invalid(e.to_string()))?,
            ),
            SplitPattern::Gpt2 => Engine::Lookaround(
                LookaroundRegex::new(pattern.as_regex()).map_err(|e| invalid(e.to_string()))?,
            ),
        };

        Ok(Self { pattern, engine })
    }

    /// Create a character-class splitter.
    pub fn categorical() -> Result<Self> {
        Self::new(SplitPattern::Categorical)
    }

    /// Create a GPT-2 splitter.
    pub fn gpt2() -> Result<Self> {
        Self::new(SplitPattern::Gpt2)
    }

    pub fn pattern(&self) -> SplitPattern {
        self.pattern
    }

    /// Split text into chunks, lazily and left to right.
    ///
    /// Chunks never overlap and together cover the whole input.
    pub fn split<'s, 't>(&'s self, text: &'t str) -> Chunks<'s, 't> {
        let inner = match &self.engine {
            Engine::Plain(re) => ChunksInner::Plain(re.find_iter(text)),
            Engine::Lookaround(re) => ChunksInner::Lookaround(re.find_iter(text)),
        };
        Chunks { inner }
    }
}

/// Iterator over the chunks of one input text.
pub struct Chunks<'s, 't> {
    inner: ChunksInner<'s, 't>,
}

enum ChunksInner<'s, 't> {
    Plain(regex::Matches<'s, 't>),
    Lookaround(fancy_regex::Matches<'s, 't>),
}

impl<'s, 't> Iterator for Chunks<'s, 't> {
    type Item = Result<&'t str>;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.inner {
            ChunksInner::Plain(matches) => matches.next().map(|m| Ok(m.as_str())),
            ChunksInner::Lookaround(matches) => matches.next().map(|m| {
                m.map(|m| m.as_str())
                    .map_err(|e| TokenizerError::Segmentation(e.to_string()))
            }),
        }
    }
}

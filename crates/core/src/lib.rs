//! Bytebpe-core - Core byte-level BPE implementation
//!
//! This crate provides the lookup tables and the merge algorithm behind a
//! GPT-2 style byte-level BPE tokenizer.
//!
//! # Features
//!
//! - Byte-to-printable-character codec shared with the vocabulary files
//! - Vocabulary storage using `AHashMap` and compact strings
//! - Merge rank table parsed from `vocab.bpe` style merge lists
//! - Merge loop that always applies the lowest-ranked pair first
//!
//! # Example
//!
//! ```rust
//! use bytebpe_core::{BpeEngine, MergeRules};
//!
//! let rules = MergeRules::parse("#version: 0.2\nl l\nh e\n");
//! let word = BpeEngine::new(&rules).merge("hello");
//! assert_eq!(word.to_string(), "he ll o");
//! ```

pub mod error;
pub use error::{Result, TokenizerError};

// Core BPE algorithm modules
pub mod core;
pub use self::core::{
    BpeEngine, MergeMap, MergeRules, MergeStats, Pair, Vocab, VocabR, Vocabulary, Word,
};

// Byte-level representation
pub mod encoding;
pub use encoding::ByteCodec;

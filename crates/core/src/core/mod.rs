//! Core BPE algorithm implementation.
//!
//! This module contains the lookup tables and the merge loop, independent of
//! how input text is split into chunks.

pub mod bpe;
pub mod merges;
pub mod vocab;

pub use bpe::{BpeEngine, Word};
pub use merges::{MergeMap, MergeRules, MergeStats, Pair};
pub use vocab::{Vocab, VocabR, Vocabulary};

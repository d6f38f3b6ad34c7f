//! Pre-tokenization.
//!
//! Splitting of raw input text into chunks that are encoded independently.

pub mod split;

pub use split::{Chunks, SplitPattern, Splitter, CATEGORICAL_PATTERN, GPT2_PATTERN};

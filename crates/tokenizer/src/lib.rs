//! Bytebpe-tokenizer - High-level tokenizer API
//!
//! This crate turns the tables and merge loop of `bytebpe-core` into a
//! GPT-2 style byte-level BPE tokenizer with two operations, `encode` and
//! `decode`.
//!
//! # Features
//!
//! - Loading of `encoder.json` + `vocab.bpe` or `vocab.json` + `merges.txt`
//! - Character-class or GPT-2 pre-tokenization
//! - Lossless round trip for any UTF-8 input covered by the byte alphabet
//!
//! # Example
//!
//! ```rust,no_run
//! use bytebpe_tokenizer::Tokenizer;
//! use std::path::Path;
//!
//! let tokenizer = Tokenizer::from_files(Path::new("encoder.json"), Path::new("vocab.bpe"))?;
//!
//! let ids = tokenizer.encode("Hello, world!")?;
//! println!("{:?}", ids);
//!
//! let text = tokenizer.decode(&ids)?;
//! assert_eq!(text, "Hello, world!");
//! # Ok::<(), bytebpe_tokenizer::TokenizerError>(())
//! ```

// Re-export core types
pub use bytebpe_core::{ByteCodec, MergeRules, MergeStats, Result, TokenizerError, Vocabulary};

// Tokenizer API
pub mod tokenizer;
pub use tokenizer::{Tokenizer, TokenizerBuilder, TokenizerConfig};

// IO
pub mod io;
pub use io::TokenizerLoader;

// Pre-tokenization
pub mod pre_tokenizer;
pub use pre_tokenizer::{SplitPattern, Splitter};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

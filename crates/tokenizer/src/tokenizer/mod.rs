//! Main tokenizer implementation.
//!
//! This module provides the high-level `Tokenizer` struct that wires the
//! splitter, byte codec, merge rules and vocabulary together.

use crate::io::TokenizerLoader;
use crate::pre_tokenizer::{SplitPattern, Splitter};
use bytebpe_core::{BpeEngine, ByteCodec, MergeRules, Result, TokenizerError, Vocabulary};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, trace};

/// Configuration for building a tokenizer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenizerConfig {
    /// How input text is split before merging
    pub split_pattern: SplitPattern,
}

/// Builder for creating a tokenizer.
#[derive(Debug, Clone, Default)]
pub struct TokenizerBuilder {
    config: TokenizerConfig,
    vocab: Option<Vocabulary>,
    merges: Option<MergeRules>,
}

impl TokenizerBuilder {
    /// Create a new tokenizer builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the vocabulary.
    pub fn vocab(mut self, vocab: Vocabulary) -> Self {
        self.vocab = Some(vocab);
        self
    }

    /// Set the merge rules.
    pub fn merges(mut self, merges: MergeRules) -> Self {
        self.merges = Some(merges);
        self
    }

    /// Set the pre-tokenization pattern.
    pub fn split_pattern(mut self, pattern: SplitPattern) -> Self {
        self.config.split_pattern = pattern;
        self
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: TokenizerConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the tokenizer.
    pub fn build(self) -> Result<Tokenizer> {
        let vocab = self
            .vocab
            .ok_or_else(|| TokenizerError::InvalidConfig("No vocabulary provided".to_string()))?;
        let merges = self
            .merges
            .ok_or_else(|| TokenizerError::InvalidConfig("No merge rules provided".to_string()))?;

        debug!(
            vocab_size = vocab.len(),
            merge_count = merges.len(),
            split_pattern = ?self.config.split_pattern,
            "tokenizer built"
        );

        Ok(Tokenizer {
            vocab: Arc::new(vocab),
            merges: Arc::new(merges),
            codec: Arc::new(ByteCodec::new()),
            splitter: Splitter::new(self.config.split_pattern)?,
            config: self.config,
        })
    }
}

/// Byte-level BPE tokenizer.
///
/// All tables are immutable and reference counted, so cloning is cheap and a
/// tokenizer can be shared between threads without locking.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    vocab: Arc<Vocabulary>,
    merges: Arc<MergeRules>,
    codec: Arc<ByteCodec>,
    splitter: Splitter,
    config: TokenizerConfig,
}

impl Tokenizer {
    /// Create a tokenizer with the default configuration.
    pub fn new(vocab: Vocabulary, merges: MergeRules) -> Result<Self> {
        Self::builder().vocab(vocab).merges(merges).build()
    }

    /// Create a tokenizer builder.
    pub fn builder() -> TokenizerBuilder {
        TokenizerBuilder::new()
    }

    /// Create a tokenizer from the raw contents of a JSON vocabulary and a
    /// merge list.
    pub fn from_bytes(vocab_json: &[u8], merges: &[u8]) -> Result<Self> {
        let vocab = TokenizerLoader::parse_vocab(vocab_json)?;
        let merges = TokenizerLoader::parse_merges(merges)?;
        Self::new(vocab, merges)
    }

    /// Load a tokenizer from a vocabulary file and a merge list file.
    pub fn from_files(vocab_path: &Path, merges_path: &Path) -> Result<Self> {
        let (vocab, merges) = TokenizerLoader::load_files(vocab_path, merges_path)?;
        Self::new(vocab, merges)
    }

    /// Load a tokenizer from a directory.
    ///
    /// See [`TokenizerLoader::load_dir`] for the accepted file names.
    pub fn load(path: &Path) -> Result<Self> {
        let (vocab, merges) = TokenizerLoader::load_dir(path)?;
        Self::new(vocab, merges)
    }

    /// Encode text to token IDs.
    ///
    /// The text is split by character class, each chunk's UTF-8 bytes are
    /// remapped to printable characters and merged, and every resulting
    /// fragment is looked up in the vocabulary. Fails on the first fragment
    /// missing from the vocabulary; no partial result is returned.
    pub fn encode(&self, text: &str) -> Result<Vec<u32>> {
        let engine = BpeEngine::new(&self.merges);
        let mut ids = Vec::with_capacity(text.len() / 3 + 1);
        let mut remapped = String::new();

        for chunk in self.splitter.split(text) {
            let chunk = chunk?;
            remapped.clear();
            self.codec.encode_into(chunk.as_bytes(), &mut remapped);

            let word = engine.merge(&remapped);
            trace!(chunk, word = %word, "chunk merged");

            for fragment in word.fragments() {
                ids.push(self.vocab.token_id(fragment)?);
            }
        }

        Ok(ids)
    }

    /// Decode token IDs back to raw bytes.
    ///
    /// The bytes are returned as-is, without any UTF-8 validation. A token
    /// string holding a character outside the byte alphabet means the
    /// vocabulary was not built for this codec, and fails the whole call.
    pub fn decode_bytes(&self, ids: &[u32]) -> Result<Vec<u8>> {
        let mut bytes = Vec::with_capacity(ids.len() * 4);

        for &id in ids {
            let token = self.vocab.token_str(id)?;

            // Each character in the token represents a byte
            for ch in token.chars() {
                let byte = self.codec.decode_char(ch).ok_or_else(|| {
                    TokenizerError::Decode(format!(
                        "Token {} ({:?}) contains {:?}, which is not in the byte alphabet",
                        id, token, ch
                    ))
                })?;
                bytes.push(byte);
            }
        }

        Ok(bytes)
    }

    /// Decode token IDs back to text.
    ///
    /// Fails if the decoded bytes are not valid UTF-8, for example when the
    /// IDs cut a multi-byte character in half. Use [`decode_bytes`] to get
    /// the raw bytes instead.
    ///
    /// [`decode_bytes`]: Tokenizer::decode_bytes
    pub fn decode(&self, ids: &[u32]) -> Result<String> {
        let bytes = self.decode_bytes(ids)?;
        String::from_utf8(bytes).map_err(|e| {
            TokenizerError::Decode(format!("Invalid UTF-8 sequence during decoding: {}", e))
        })
    }

    /// Get the vocabulary size.
    pub fn vocab_size(&self) -> usize {
        self.vocab.len()
    }

    /// Get a reference to the vocabulary.
    pub fn vocab(&self) -> &Vocabulary {
        &self.vocab
    }

    /// Get a reference to the merge rules.
    pub fn merges(&self) -> &MergeRules {
        &self.merges
    }

    /// Get a reference to the byte codec.
    pub fn codec(&self) -> &ByteCodec {
        &self.codec
    }

    pub fn config(&self) -> &TokenizerConfig {
        &self.config
    }
}

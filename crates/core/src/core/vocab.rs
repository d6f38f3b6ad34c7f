//! Vocabulary storage and lookup.
//!
//! Token strings are stored in their byte-remapped form (see
//! [`ByteCodec`](crate::encoding::ByteCodec)) using `CompactString`, so the
//! short tokens that make up almost all of a BPE vocabulary stay inline.

use crate::error::{Result, TokenizerError};
use ahash::AHashMap;
use compact_str::CompactString;
use std::collections::HashMap;
use tracing::debug;

/// Forward mapping: token string -> ID
pub type Vocab = AHashMap<CompactString, u32>;

/// Reverse mapping: ID -> token string
pub type VocabR = AHashMap<u32, CompactString>;

/// Vocabulary with forward and reverse mappings.
///
/// The reverse mapping is derived from the forward one and kept in sync by
/// every mutating method.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    vocab: Vocab,
    vocab_r: VocabR,
    /// Smallest ID greater than every ID in use
    next_id: u32,
}

impl Vocabulary {
    /// Create a new empty vocabulary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new vocabulary with capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            vocab: Vocab::with_capacity(capacity),
            vocab_r: VocabR::with_capacity(capacity),
            next_id: 0,
        }
    }

    /// Parse a vocabulary from a JSON object mapping token strings to IDs.
    ///
    /// Fails if the document is not an object of non-negative integers that
    /// fit in a `u32`, or if two tokens claim the same ID.
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        let map: HashMap<String, u32> = serde_json::from_slice(bytes)?;

        let mut vocab = Self::with_capacity(map.len());
        for (token, id) in map {
            vocab
                .add_token_with_id(&token, id)
                .map_err(|e| TokenizerError::Load(format!("Invalid vocabulary entry: {}", e)))?;
        }

        debug!(vocab_size = vocab.len(), "vocabulary loaded");
        Ok(vocab)
    }

    /// Add a token to the vocabulary.
    ///
    /// Returns the ID assigned to the token, or its existing ID.
    pub fn add_token(&mut self, token: &str) -> u32 {
        if let Some(&id) = self.vocab.get(token) {
            return id;
        }

        let id = self.next_id;
        let token = CompactString::new(token);
        self.vocab_r.insert(id, token.clone());
        self.vocab.insert(token, id);
        self.next_id = id + 1;
        id
    }

    /// Add a token with a specific ID.
    ///
    /// Returns an error if either the ID or the token is already present.
    pub fn add_token_with_id(&mut self, token: &str, id: u32) -> Result<()> {
        if let Some(existing) = self.vocab_r.get(&id) {
            return Err(TokenizerError::InvalidConfig(format!(
                "Token ID {} already assigned to {:?}",
                id, existing
            )));
        }
        if let Some(existing) = self.vocab.get(token) {
            return Err(TokenizerError::InvalidConfig(format!(
                "Token {:?} already has ID {}",
                token, existing
            )));
        }

        let token = CompactString::new(token);
        self.vocab_r.insert(id, token.clone());
        self.vocab.insert(token, id);
        self.next_id = self.next_id.max(id.saturating_add(1));

        Ok(())
    }

    /// Get the ID for a token string.
    #[inline]
    pub fn get_id(&self, token: &str) -> Option<u32> {
        self.vocab.get(token).copied()
    }

    /// Get the token string for an ID.
    #[inline]
    pub fn get_token(&self, id: u32) -> Option<&str> {
        self.vocab_r.get(&id).map(|s| s.as_str())
    }

    /// Resolve a token string, failing with [`TokenizerError::UnknownToken`].
    #[inline]
    pub fn token_id(&self, token: &str) -> Result<u32> {
        self.get_id(token)
            .ok_or_else(|| TokenizerError::UnknownToken(token.to_string()))
    }

    /// Resolve an ID, failing with [`TokenizerError::UnknownTokenId`].
    #[inline]
    pub fn token_str(&self, id: u32) -> Result<&str> {
        self.get_token(id).ok_or(TokenizerError::UnknownTokenId(id))
    }

    /// Get the size of the vocabulary.
    #[inline]
    pub fn len(&self) -> usize {
        self.vocab.len()
    }

    /// Check if the vocabulary is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vocab.is_empty()
    }

    /// Largest ID in use, if any.
    pub fn max_id(&self) -> Option<u32> {
        self.vocab_r.keys().copied().max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_token() {
        let mut vocab = Vocabulary::new();
        let id1 = vocab.add_token("hello");
        let id2 = vocab.add_token("world");

        assert_eq!(id1, 0);
        assert_eq!(id2, 1);
        assert_eq!(vocab.get_id("hello"), Some(0));
        assert_eq!(vocab.get_token(1), Some("world"));
    }

    #[test]
    fn test_add_duplicate_token() {
        let mut vocab = Vocabulary::new();
        let id1 = vocab.add_token("hello");
        let id2 = vocab.add_token("hello");

        assert_eq!(id1, id2);
        assert_eq!(vocab.len(), 1);
    }

    #[test]
    fn test_add_token_after_explicit_id() {
        let mut vocab = Vocabulary::new();
        vocab.add_token_with_id("hello", 5).unwrap();
        assert_eq!(vocab.add_token("world"), 6);
        assert_eq!(vocab.max_id(), Some(6));
    }

    #[test]
    fn test_add_token_with_taken_id() {
        let mut vocab = Vocabulary::new();
        vocab.add_token_with_id("hello", 5).unwrap();
        assert!(vocab.add_token_with_id("world", 5).is_err());
        assert!(vocab.add_token_with_id("hello", 6).is_err());
        assert_eq!(vocab.len(), 1);
    }

    #[test]
    fn test_from_json() {
        let vocab = Vocabulary::from_json(r#"{"hello": 0, "Ġworld": 7}"#.as_bytes()).unwrap();

        assert_eq!(vocab.len(), 2);
        assert_eq!(vocab.get_id("Ġworld"), Some(7));
        assert_eq!(vocab.get_token(0), Some("hello"));
        assert_eq!(vocab.get_token(1), None);
    }

    #[test]
    fn test_from_json_rejects_malformed() {
        let not_json = Vocabulary::from_json(b"{\"a\": 0,").unwrap_err();
        assert!(not_json.is_load_error());

        let negative = Vocabulary::from_json(br#"{"a": -1}"#).unwrap_err();
        assert!(negative.is_load_error());

        let not_a_map = Vocabulary::from_json(br#"["a", "b"]"#).unwrap_err();
        assert!(not_a_map.is_load_error());

        let shared_id = Vocabulary::from_json(br#"{"a": 3, "b": 3}"#).unwrap_err();
        assert!(matches!(shared_id, TokenizerError::Load(_)));
    }

    #[test]
    fn test_lookup_errors() {
        let mut vocab = Vocabulary::new();
        vocab.add_token("a");

        assert_eq!(vocab.token_id("a").unwrap(), 0);
        assert_eq!(vocab.token_str(0).unwrap(), "a");
        assert!(matches!(
            vocab.token_id("zz"),
            Err(TokenizerError::UnknownToken(t)) if t == "zz"
        ));
        assert!(matches!(
            vocab.token_str(9),
            Err(TokenizerError::UnknownTokenId(9))
        ));
    }
}

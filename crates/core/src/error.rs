//! Error types for the byte-level BPE tokenizer.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the tokenizer library.
#[derive(Error, Debug)]
pub enum TokenizerError {
    /// Vocabulary or merge data is malformed
    #[error("Load error: {0}")]
    Load(String),

    /// I/O error with file context
    #[error("I/O error for {path}: {err}")]
    Io {
        path: PathBuf,
        #[source]
        err: std::io::Error,
    },

    /// Vocabulary JSON could not be parsed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Fragment produced by the merge loop is missing from the vocabulary
    #[error("Unknown token: {0}")]
    UnknownToken(String),

    /// Token ID not present in the vocabulary
    #[error("Unknown token ID: {0}")]
    UnknownTokenId(u32),

    /// Pre-tokenization failed (regex engine error)
    #[error("Segmentation error: {0}")]
    Segmentation(String),

    /// A token maps to no byte, or decoded bytes are not valid UTF-8
    #[error("Decode error: {0}")]
    Decode(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl TokenizerError {
    /// Whether this error was raised while loading the vocabulary or merge tables.
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            TokenizerError::Load(_) | TokenizerError::Io { .. } | TokenizerError::Json(_)
        )
    }
}

/// Result type alias for tokenizer operations.
pub type Result<T> = std::result::Result<T, TokenizerError>;

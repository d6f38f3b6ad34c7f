//! Load functionality for pre-trained byte-level BPE tables.
//!
//! Two file layouts are understood, both a JSON vocabulary next to a plain
//! text merge list:
//! - OpenAI GPT-2 release: `encoder.json` + `vocab.bpe`
//! - HuggingFace: `vocab.json` + `merges.txt`

use bytebpe_core::{MergeRules, Result, TokenizerError, Vocabulary};
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name pairs searched by [`TokenizerLoader::load_dir`], in order.
pub const FILE_LAYOUTS: [(&str, &str); 2] =
    [("encoder.json", "vocab.bpe"), ("vocab.json", "merges.txt")];

/// Tokenizer loader - reads vocabulary and merge tables.
pub struct TokenizerLoader;

impl TokenizerLoader {
    /// Parse a vocabulary from the raw bytes of a JSON file.
    pub fn parse_vocab(bytes: &[u8]) -> Result<Vocabulary> {
        Vocabulary::from_json(bytes)
    }

    /// Parse merge rules from the raw bytes of a merge list.
    pub fn parse_merges(bytes: &[u8]) -> Result<MergeRules> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| TokenizerError::Load(format!("Merge list is not UTF-8: {}", e)))?;
        Ok(MergeRules::parse(text))
    }

    /// Load a vocabulary file.
    pub fn load_vocab(path: &Path) -> Result<Vocabulary> {
        let bytes = read_file(path)?;
        Self::parse_vocab(&bytes).map_err(|e| match e {
            TokenizerError::Json(err) => TokenizerError::Load(format!(
                "Failed to deserialize vocabulary {}: {}",
                path.display(),
                err
            )),
            other => other,
        })
    }

    /// Load a merge list file.
    pub fn load_merges(path: &Path) -> Result<MergeRules> {
        let bytes = read_file(path)?;
        Self::parse_merges(&bytes)
    }

    /// Load both tables from explicit paths.
    pub fn load_files(vocab_path: &Path, merges_path: &Path) -> Result<(Vocabulary, MergeRules)> {
        let vocab = Self::load_vocab(vocab_path)?;
        let merges = Self::load_merges(merges_path)?;
        Ok((vocab, merges))
    }

    /// Load both tables from a directory using the first complete layout in
    /// [`FILE_LAYOUTS`].
    pub fn load_dir(dir: &Path) -> Result<(Vocabulary, MergeRules)> {
        let (vocab_path, merges_path) = Self::find_layout(dir)?;
        debug!(
            vocab = %vocab_path.display(),
            merges = %merges_path.display(),
            "loading tokenizer tables"
        );
        Self::load_files(&vocab_path, &merges_path)
    }

    /// Locate the vocabulary and merge files inside `dir`.
    pub fn find_layout(dir: &Path) -> Result<(PathBuf, PathBuf)> {
        FILE_LAYOUTS
            .iter()
            .map(|(vocab, merges)| (dir.join(vocab), dir.join(merges)))
            .find(|(vocab, merges)| vocab.is_file() && merges.is_file())
            .ok_or_else(|| {
                TokenizerError::Load(format!(
                    "No encoder.json/vocab.bpe or vocab.json/merges.txt pair in {}",
                    dir.display()
                ))
            })
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|err| TokenizerError::Io {
        path: path.to_path_buf(),
        err,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const VOCAB: &str = r#"{"h": 0, "i": 1, "hi": 2, "Ġ": 3}"#;
    const MERGES: &str = "#version: 0.2\nh i\n";

    #[test]
    fn test_load_files() {
        let dir = tempfile::tempdir().unwrap();
        let vocab_path = dir.path().join("encoder.json");
        let merges_path = dir.path().join("vocab.bpe");
        fs::write(&vocab_path, VOCAB).unwrap();
        fs::write(&merges_path, MERGES).unwrap();

        let (vocab, merges) = TokenizerLoader::load_files(&vocab_path, &merges_path).unwrap();
        assert_eq!(vocab.len(), 4);
        assert_eq!(vocab.get_id("Ġ"), Some(3));
        assert_eq!(merges.rank("h", "i"), Some(0));
    }

    #[test]
    fn test_load_dir_huggingface_layout() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("vocab.json"), VOCAB).unwrap();
        fs::write(dir.path().join("merges.txt"), MERGES).unwrap();

        let (vocab, merges) = TokenizerLoader::load_dir(dir.path()).unwrap();
        assert_eq!(vocab.len(), 4);
        assert_eq!(merges.len(), 1);
    }

    #[test]
    fn test_load_dir_prefers_gpt2_layout() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("encoder.json"), VOCAB).unwrap();
        fs::write(dir.path().join("vocab.bpe"), MERGES).unwrap();
        fs::write(dir.path().join("vocab.json"), r#"{"x": 0}"#).unwrap();
        fs::write(dir.path().join("merges.txt"), "#\n").unwrap();

        let (vocab_path, merges_path) = TokenizerLoader::find_layout(dir.path()).unwrap();
        assert!(vocab_path.ends_with("encoder.json"));
        assert!(merges_path.ends_with("vocab.bpe"));
    }

    #[test]
    fn test_load_dir_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("encoder.json"), VOCAB).unwrap();

        let err = TokenizerLoader::load_dir(dir.path()).unwrap_err();
        assert!(matches!(err, TokenizerError::Load(_)));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");

        match TokenizerLoader::load_vocab(&missing) {
            Err(TokenizerError::Io { path, .. }) => assert_eq!(path, missing),
            other => panic!("expected I/O error, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_vocab_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("encoder.json");
        fs::write(&path, "{\"h\": ").unwrap();

        let err = TokenizerLoader::load_vocab(&path).unwrap_err();
        assert!(matches!(err, TokenizerError::Load(_)));
        assert!(err.to_string().contains("encoder.json"));
    }

    #[test]
    fn test_merges_not_utf8() {
        let err = TokenizerLoader::parse_merges(b"#version\n\xff\xfe a\n").unwrap_err();
        assert!(err.is_load_error());
    }
}

//! CLI commands for the bytebpe tokenizer.

pub mod benchmark;
pub mod decode;
pub mod encode;
pub mod info;

pub use benchmark::BenchmarkCommand;
pub use decode::DecodeCommand;
pub use encode::EncodeCommand;
pub use info::InfoCommand;

use anyhow::{Context, Result as AnyhowResult};
use bytebpe_tokenizer::{SplitPattern, Tokenizer, TokenizerLoader};
use clap::Args;
use std::path::PathBuf;

/// Location of the vocabulary and merge tables.
#[derive(Args, Debug, Clone)]
pub struct TableArgs {
    /// JSON vocabulary (token -> id)
    #[arg(long, default_value = "encoder.json")]
    pub vocab: PathBuf,

    /// Merge list, one pair per line after a header line
    #[arg(long, default_value = "vocab.bpe")]
    pub merges: PathBuf,

    /// Pre-tokenization pattern: categorical or gpt2
    #[arg(long, default_value = "categorical")]
    pub pattern: SplitPattern,
}

impl TableArgs {
    /// Load the tables and build a tokenizer.
    pub fn load(&self) -> AnyhowResult<Tokenizer> {
        let (vocab, merges) = TokenizerLoader::load_files(&self.vocab, &self.merges)
            .with_context(|| {
                format!(
                    "failed to load tokenizer from {} and {}",
                    self.vocab.display(),
                    self.merges.display()
                )
            })?;

        let tokenizer = Tokenizer::builder()
            .vocab(vocab)
            .merges(merges)
            .split_pattern(self.pattern)
            .build()?;

        tracing::info!(
            vocab_size = tokenizer.vocab_size(),
            merge_count = tokenizer.merges().len(),
            "tokenizer loaded"
        );
        Ok(tokenizer)
    }
}

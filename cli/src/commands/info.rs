//! Info command implementation.

use super::TableArgs;
use anyhow::Result as AnyhowResult;
use clap::Parser;

/// Info command arguments.
#[derive(Parser)]
pub struct InfoCommand {
    #[command(flatten)]
    pub tables: TableArgs,
}

pub fn run(cmd: InfoCommand) -> AnyhowResult<()> {
    let tokenizer = cmd.tables.load()?;
    let vocab = tokenizer.vocab();
    let stats = tokenizer.merges().stats();

    println!("Vocabulary: {}", cmd.tables.vocab.display());
    println!("  Tokens: {}", vocab.len());
    match vocab.max_id() {
        Some(max_id) => println!("  Max ID: {}", max_id),
        None => println!("  Max ID: -"),
    }

    let codec = tokenizer.codec();
    let missing_bytes = (0..=u8::MAX)
        .filter(|&b| vocab.get_id(&codec.encode_byte(b).to_string()).is_none())
        .count();
    println!("  Byte tokens missing: {}", missing_bytes);

    println!("Merges: {}", cmd.tables.merges.display());
    println!("  Rules: {}", stats.count);
    println!("  Rank range: {}..={}", stats.min_rank, stats.max_rank);
    println!("  Skipped lines: {}", stats.skipped);
    println!("Split pattern: {:?}", tokenizer.config().split_pattern);

    Ok(())
}

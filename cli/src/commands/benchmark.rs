//! Benchmark command implementation.

use super::TableArgs;
use anyhow::Result as AnyhowResult;
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

/// Benchmark command arguments.
#[derive(Parser)]
pub struct BenchmarkCommand {
    #[command(flatten)]
    pub tables: TableArgs,

    /// Path to input text file for benchmarking
    #[arg(short, long)]
    pub input: PathBuf,

    /// Number of iterations to run
    #[arg(short = 'n', long, default_value_t = 100)]
    pub iterations: usize,
}

pub fn run(cmd: BenchmarkCommand) -> AnyhowResult<()> {
    let tokenizer = cmd.tables.load()?;

    // Read input text
    let text = fs::read_to_string(&cmd.input)?;
    let iterations = cmd.iterations.max(1);

    println!("Benchmarking encoding...");
    println!("  Text length: {} bytes", text.len());
    println!("  Iterations: {}", iterations);
    println!();

    // Warmup
    let token_count = tokenizer.encode(&text)?.len();

    let start = Instant::now();
    for _ in 0..iterations {
        tokenizer.encode(&text)?;
    }
    let elapsed = start.elapsed();

    let avg_secs = elapsed.as_secs_f64() / iterations as f64;

    println!("Results:");
    println!("  Tokens per pass: {}", token_count);
    println!("  Total time: {:.2}s", elapsed.as_secs_f64());
    println!("  Average time: {:.3}ms", avg_secs * 1000.0);
    if avg_secs > 0.0 {
        println!("  Throughput: {:.0} tokens/s", token_count as f64 / avg_secs);
        println!(
            "  Throughput: {:.2} MB/s",
            text.len() as f64 / avg_secs / 1_000_000.0
        );
    }

    Ok(())
}

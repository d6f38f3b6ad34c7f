//! Decode command implementation.

use super::TableArgs;
use anyhow::{Context, Result as AnyhowResult};
use clap::Parser;
use std::io::Write;

/// Decode command arguments.
#[derive(Parser)]
pub struct DecodeCommand {
    #[command(flatten)]
    pub tables: TableArgs,

    /// Token IDs to decode (comma or space separated)
    #[arg(required = true, num_args = 1..)]
    pub ids: Vec<String>,

    /// Write the raw decoded bytes even if they are not valid UTF-8
    #[arg(long)]
    pub lossy: bool,
}

/// Parse IDs given as separate arguments, comma lists, or both.
fn parse_ids(args: &[String]) -> AnyhowResult<Vec<u32>> {
    args.iter()
        .flat_map(|arg| arg.split(|c: char| c == ',' || c.is_whitespace()))
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<u32>()
                .with_context(|| format!("invalid token ID '{}'", s))
        })
        .collect()
}

pub fn run(cmd: DecodeCommand) -> AnyhowResult<()> {
    let tokenizer = cmd.tables.load()?;
    let ids = parse_ids(&cmd.ids)?;

    if cmd.lossy {
        let bytes = tokenizer.decode_bytes(&ids)?;
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(&bytes)?;
        stdout.write_all(b"\n")?;
    } else {
        let text = tokenizer.decode(&ids)?;
        println!("{}", text);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ids() {
        let args = vec!["1,2, 3".to_string(), "4".to_string()];
        assert_eq!(parse_ids(&args).unwrap(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_parse_ids_rejects_garbage() {
        let args = vec!["1,x".to_string()];
        assert!(parse_ids(&args).is_err());

        let args = vec!["-3".to_string()];
        assert!(parse_ids(&args).is_err());
    }
}

//! Encode command implementation.

use super::TableArgs;
use anyhow::{bail, Context, Result as AnyhowResult};
use clap::Parser;
use serde::Serialize;
use std::io::Read;
use std::path::PathBuf;

/// Encode command arguments.
#[derive(Parser)]
pub struct EncodeCommand {
    #[command(flatten)]
    pub tables: TableArgs,

    /// Text to encode ("-" reads stdin)
    #[arg(conflicts_with = "file")]
    pub input: Option<String>,

    /// Read text from a file
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Print token strings instead of IDs
    #[arg(long)]
    pub tokens: bool,

    /// Decode the IDs again and report whether the input was reproduced
    #[arg(long)]
    pub roundtrip: bool,

    /// Print a JSON object instead of plain text
    #[arg(long)]
    pub json: bool,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Serialize)]
struct EncodeOutput<'a> {
    ids: &'a [u32],
    #[serde(skip_serializing_if = "Option::is_none")]
    tokens: Option<Vec<&'a str>>,
    count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    roundtrip: Option<bool>,
}

fn read_input(cmd: &EncodeCommand) -> AnyhowResult<String> {
    match (&cmd.input, &cmd.file) {
        (Some(text), _) if text == "-" => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
        (Some(text), _) => Ok(text.clone()),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        (None, None) => bail!("no input given: pass TEXT, '-' for stdin, or --file"),
    }
}

pub fn run(cmd: EncodeCommand) -> AnyhowResult<()> {
    let tokenizer = cmd.tables.load()?;
    let input_text = read_input(&cmd)?;

    let ids = tokenizer.encode(&input_text)?;

    let tokens = if cmd.tokens || cmd.json {
        Some(
            ids.iter()
                .map(|&id| tokenizer.vocab().token_str(id))
                .collect::<Result<Vec<_>, _>>()?,
        )
    } else {
        None
    };

    let roundtrip = if cmd.roundtrip {
        Some(tokenizer.decode_bytes(&ids)? == input_text.as_bytes())
    } else {
        None
    };

    let output = if cmd.json {
        serde_json::to_string(&EncodeOutput {
            ids: &ids,
            tokens,
            count: ids.len(),
            roundtrip,
        })?
    } else {
        let mut out = match (&tokens, cmd.tokens) {
            (Some(tokens), true) => tokens.join(" "),
            _ => ids
                .iter()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join(" "),
        };
        if let Some(ok) = roundtrip {
            out.push_str(if ok {
                "\nroundtrip: ok"
            } else {
                "\nroundtrip: MISMATCH"
            });
        }
        out
    };

    match &cmd.output {
        Some(path) => {
            std::fs::write(path, &output)?;
            println!("Encoded {} tokens to {}", ids.len(), path.display());
        }
        None => {
            println!("{}", output);
        }
    }

    if roundtrip == Some(false) {
        bail!("decoded text differs from the input");
    }

    Ok(())
}

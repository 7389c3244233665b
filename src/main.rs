//! `tomlconv` CLI: convert JSON to TOML and TOML to JSON from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # JSON to TOML (stdin → stdout); every top-level JSON value is one document
//! echo '{"name":"Alice","tags":["a","b"]}' | tomlconv to-toml
//!
//! # Keep three levels of nesting instead of two
//! tomlconv to-toml --depth 3 -i data.json -o data.toml
//!
//! # TOML to pretty-printed JSON, one document per file
//! tomlconv from-toml a.toml b.toml
//!
//! # Treat all inputs as one document split across files
//! tomlconv from-toml --concat header.toml body.toml
//! ```
//!
//! Warnings and per-item errors (including input files that cannot be read)
//! go to stderr; set `RUST_LOG` to see more. The exit status is 1 if any item
//! failed.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, Read};
use std::process::ExitCode;
use tomlconv::batch::{decode_all, decode_fragments, encode_all};
use tomlconv::options::DEFAULT_DEPTH;
use tomlconv::{EncodeOptions, Error, HostValue};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tomlconv", version, about = "Convert between TOML and JSON")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a stream of JSON values to TOML documents
    ToToml {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Levels of nesting kept below the root before values are stringified
        #[arg(long, default_value_t = DEFAULT_DEPTH)]
        depth: usize,
    },
    /// Convert TOML documents to pretty-printed JSON
    FromToml {
        /// Input files (reads stdin if none are given)
        files: Vec<String>,
        /// Join all inputs line by line and parse them as one document
        #[arg(long)]
        concat: bool,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();

    let failed = match cli.command {
        Commands::ToToml {
            input,
            output,
            depth,
        } => to_toml(input.as_deref(), output.as_deref(), depth)?,
        Commands::FromToml {
            files,
            concat,
            output,
        } => from_toml(&files, concat, output.as_deref())?,
    };

    Ok(if failed == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Returns the number of items that failed.
fn to_toml(input: Option<&str>, output: Option<&str>, depth: usize) -> Result<usize> {
    let json = read_input(input)?;

    let mut values = Vec::new();
    let mut failed = 0;
    for item in serde_json::Deserializer::from_str(&json).into_iter::<HostValue>() {
        match item {
            Ok(value) => values.push(value),
            Err(err) => {
                // no item boundary after a syntax error, stop here
                tracing::error!(category = "InputObjectInvalid", "invalid JSON input: {}", err);
                failed += 1;
                break;
            }
        }
    }

    let options = EncodeOptions::new().with_depth(depth);
    let mut documents = Vec::new();
    for result in encode_all(values, &options) {
        match result {
            Ok(encoded) => {
                if encoded.truncated {
                    tracing::warn!(
                        "Resulting TOML is truncated as serialization has exceeded the set depth of {}",
                        depth
                    );
                }
                documents.push(encoded.text);
            }
            Err(err) => {
                tracing::error!(category = %err.category, input = %err.target, "{}", err.error);
                failed += 1;
            }
        }
    }

    write_output(output, &documents.join("\n"))?;
    Ok(failed)
}

/// Returns the number of items that failed.
fn from_toml(files: &[String], concat: bool, output: Option<&str>) -> Result<usize> {
    let mut failed = 0;
    let inputs = if files.is_empty() {
        vec![read_input(None)?]
    } else {
        let mut inputs = Vec::with_capacity(files.len());
        for path in files {
            match std::fs::read_to_string(path) {
                Ok(text) => inputs.push(text),
                Err(err) => {
                    let err = Error::io(&format!("Failed to read file {}: {}", path, err));
                    tracing::error!(file = %path, "{}", err);
                    failed += 1;
                }
            }
        }
        inputs
    };

    let results = if concat && failed > 0 {
        // the joined document is incomplete without every fragment
        Vec::new()
    } else if concat {
        vec![decode_fragments(&inputs)]
    } else {
        decode_all(inputs)
    };

    let mut documents = Vec::new();
    for result in results {
        match result {
            Ok(map) => {
                let json = serde_json::to_string_pretty(&map)
                    .context("Failed to render decoded TOML as JSON")?;
                documents.push(json + "\n");
            }
            Err(err) => {
                tracing::error!(category = %err.category, "{}", err.error);
                failed += 1;
            }
        }
    }

    write_output(output, &documents.concat())?;
    Ok(failed)
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}

// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! streamable-inspect - decode, encode and describe canonical records.
//!
//! TYPE is any type expression the resolver accepts: a record name
//! (`Coin`), a leaf (`Bytes32`) or a composite (`Vec<Option<Coin>>`).
//!
//! ```text
//! streamable-inspect types
//! streamable-inspect describe SignagePoint
//! streamable-inspect decode Coin --hex 0x...
//! streamable-inspect --schema ledger.json encode Ledger --file ledger.json
//! ```

mod commands;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "streamable-inspect")]
#[command(about = "Decode, encode and describe canonical consensus records")]
#[command(version)]
struct Cli {
    /// Verbose logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Schema document declaring extra records (repeatable)
    #[arg(long = "schema", value_name = "FILE", global = true)]
    schemas: Vec<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List known record and custom leaf names
    Types,

    /// Print the schema tree of a type
    Describe {
        #[arg(value_name = "TYPE")]
        ty: String,
    },

    /// Decode canonical bytes to JSON
    Decode {
        #[arg(value_name = "TYPE")]
        ty: String,

        #[command(flatten)]
        input: BytesInput,

        /// Single-line JSON output
        #[arg(long)]
        compact: bool,
    },

    /// Encode JSON to canonical bytes (hex)
    Encode {
        #[arg(value_name = "TYPE")]
        ty: String,

        #[command(flatten)]
        input: JsonInput,
    },
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct BytesInput {
    /// Hex-encoded input, `0x` prefix optional
    #[arg(long, value_name = "HEX")]
    hex: Option<String>,

    /// Raw binary input file
    #[arg(long, value_name = "PATH")]
    file: Option<PathBuf>,
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct JsonInput {
    /// Inline JSON input
    #[arg(long, value_name = "JSON")]
    json: Option<String>,

    /// JSON input file
    #[arg(long, value_name = "PATH")]
    file: Option<PathBuf>,
}

impl BytesInput {
    fn read(&self) -> anyhow::Result<Vec<u8>> {
        match (&self.hex, &self.file) {
            (Some(text), _) => commands::parse_hex(text),
            (None, Some(path)) => std::fs::read(path)
                .with_context(|| format!("failed to read {}", path.display())),
            (None, None) => anyhow::bail!("one of --hex or --file is required"),
        }
    }
}

impl JsonInput {
    fn read(&self) -> anyhow::Result<serde_json::Value> {
        let text = match (&self.json, &self.file) {
            (Some(text), _) => text.clone(),
            (None, Some(path)) => std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?,
            (None, None) => anyhow::bail!("one of --json or --file is required"),
        };
        serde_json::from_str(&text).context("input is not valid JSON")
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    commands::load_schemas(&cli.schemas)?;
    debug!("registry holds {} records", streamable::registry::names().len());

    let output = match &cli.command {
        Command::Types => commands::types(),
        Command::Describe { ty } => commands::describe(ty)?,
        Command::Decode { ty, input, compact } => commands::decode(ty, &input.read()?, *compact)?,
        Command::Encode { ty, input } => commands::encode(ty, &input.read()?)?,
    };
    println!("{output}");
    Ok(())
}

//! `courier inspect`

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use courier_codegen::{inspect_file, CodegenOptions};

/// Arguments for `courier inspect`.
#[derive(Args, Debug, Clone)]
pub struct InspectArgs {
    /// Rust source file containing #[api] traits.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Emit compact rather than pretty-printed JSON.
    #[arg(long)]
    pub compact: bool,
}

/// Prints the scanned definitions as JSON.
pub fn run(args: &InspectArgs, options: &CodegenOptions, out: &mut impl Write) -> anyhow::Result<()> {
    let source = super::read_source(&args.input)?;
    let apis = inspect_file(&source, options)
        .with_context(|| format!("scanning {}", args.input.display()))?;

    tracing::info!(input = %args.input.display(), apis = apis.len(), "inspected");

    if args.compact {
        serde_json::to_writer(&mut *out, &apis)?;
    } else {
        serde_json::to_writer_pretty(&mut *out, &apis)?;
    }
    writeln!(out)?;
    Ok(())
}

//! `courier generate`

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use courier_codegen::{generate_file, CodegenOptions};

/// Arguments for `courier generate`.
#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Rust source file containing #[api] traits.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Write the generated source here instead of stdout.
    #[arg(short, long, value_name = "OUTPUT")]
    pub output: Option<PathBuf>,
}

/// Expands the input file and writes the result.
pub fn run(args: &GenerateArgs, options: &CodegenOptions, out: &mut impl Write) -> anyhow::Result<()> {
    let source = super::read_source(&args.input)?;
    let generated = generate_file(&source, options)
        .with_context(|| format!("generating {}", args.input.display()))?;

    match &args.output {
        Some(path) => {
            fs::write(path, generated).with_context(|| format!("writing {}", path.display()))?;
            tracing::info!(input = %args.input.display(), output = %path.display(), "wrote client");
        }
        None => writeln!(out, "{generated}")?,
    }
    Ok(())
}

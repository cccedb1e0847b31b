//! `courier classify`

use std::io::Write;

use anyhow::{bail, Context};
use clap::Args;
use courier_codegen::{raw_attribute, CodegenOptions};
use courier_core::{Directive, StatementBlock};
use serde::Serialize;
use syn::parse::Parser;
use syn::Attribute;

/// Arguments for `courier classify`.
#[derive(Args, Debug, Clone)]
pub struct ClassifyArgs {
    /// One attribute in Rust syntax, e.g. '#[Query("page")]'.
    #[arg(value_name = "ATTRIBUTE")]
    pub attribute: String,

    /// Name of the value bound to a parameter directive.
    #[arg(long, value_name = "NAME")]
    pub input: Option<String>,

    /// Print the result as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct Classified {
    directive: Directive,
    statements: StatementBlock,
}

/// Classifies the attribute and prints the directive and its statements.
pub fn run(args: &ClassifyArgs, options: &CodegenOptions, out: &mut impl Write) -> anyhow::Result<()> {
    let attrs = Attribute::parse_outer
        .parse_str(&args.attribute)
        .with_context(|| format!("`{}` is not an attribute", args.attribute))?;
    let [attr] = attrs.as_slice() else {
        bail!("expected exactly one attribute, found {}", attrs.len());
    };

    let raw = raw_attribute(attr)?;
    let directive = options.classifier.classify(&raw)?;
    let statements = options.renderer.render(&directive, args.input.as_deref())?;

    if args.json {
        let classified = Classified {
            directive,
            statements,
        };
        serde_json::to_writer_pretty(&mut *out, &classified)?;
        writeln!(out)?;
    } else {
        writeln!(out, "{directive}")?;
        for line in statements {
            writeln!(out, "{line}")?;
        }
    }
    Ok(())
}

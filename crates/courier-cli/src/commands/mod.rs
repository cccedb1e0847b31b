//! Subcommand implementations.

pub mod classify;
pub mod generate;
pub mod inspect;

use std::fs;
use std::path::Path;

use anyhow::Context;

fn read_source(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

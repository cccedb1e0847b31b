//! Expansion options for the invoking crate.

use std::path::Path;

use courier_codegen::CodegenOptions;
use courier_config::{ConfigError, ConfigLoader, CONFIG_FILE_NAME};

/// Loads `courier.toml` from `manifest_dir` (if present) plus `COURIER__*`
/// overrides and turns the result into codegen options.
pub fn load_options(manifest_dir: Option<&Path>) -> Result<CodegenOptions, ConfigError> {
    let loader = ConfigLoader::new().with_defaults();
    let loader = match manifest_dir {
        Some(dir) => loader.with_optional_file(dir.join(CONFIG_FILE_NAME))?,
        None => loader,
    };
    let config = loader.with_env_prefix("COURIER").load()?;

    Ok(CodegenOptions::new(config.classifier(), config.renderer()))
}

/// Options for the crate currently being compiled.
pub fn crate_options() -> Result<CodegenOptions, ConfigError> {
    let manifest_dir = std::env::var_os("CARGO_MANIFEST_DIR");
    load_options(manifest_dir.as_deref().map(Path::new))
}

//! Subcommand implementations

pub mod families;
pub mod resolve;
pub mod styles;

use std::fs;

use fontres_core::config::ResolverConfig;
use fontres_db::FontContext;

use crate::cli::Cli;
use crate::error::{CliError, Result};
use crate::manifest::{Manifest, ManifestAdapter};

/// Builds a context from the manifest and optional configuration file
///
/// Environment overrides (`FONTRES_CACHE`, `FONTRES_CACHE_LIMIT`) apply on
/// top of the file.
pub fn open_context(cli: &Cli) -> Result<FontContext> {
    let manifest = Manifest::from_file(&cli.manifest)?;

    let mut config = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path).map_err(|source| CliError::Io {
                path: path.clone(),
                source,
            })?;
            serde_json::from_str::<ResolverConfig>(&text).map_err(|source| CliError::Json {
                path: path.clone(),
                source,
            })?
        }
        None => ResolverConfig::default(),
    };
    config.apply_env(|key| std::env::var(key).ok());

    let mut context = FontContext::with_config(ManifestAdapter::new(&manifest), config)?;
    for (family, substitutes) in &manifest.substitutions {
        context.insert_substitutions(family, substitutes);
    }
    log::debug!(
        "loaded {} faces from {}",
        manifest.faces.len(),
        cli.manifest.display()
    );
    Ok(context)
}

/// Prints `value` as pretty JSON
pub fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

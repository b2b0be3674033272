//! # sxg-cli: SXG Command-Line Interface
//!
//! Provides the `sxg` binary for checking gateway RPC payloads captured
//! from a node or explorer session.
//!
//! ## Subcommands
//!
//! - `sxg validate <TYPE> [PATH]`: validate a JSON/YAML payload
//! - `sxg types`: list gateway type names
//! - `sxg describe <TYPE>`: print a type's shape
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from validation logic.
//! - Handlers delegate to `sxg-schema`; no schema logic lives here.

pub mod catalog;
pub mod document;
pub mod validate;

use std::path::Path;

use anyhow::{Context, Result};
use sxg_core::ValidatorConfig;

/// Resolve the effective validator configuration.
///
/// Precedence, lowest first: built-in defaults, the YAML file at `path`,
/// `SXG_MAX_DEPTH`, then the explicit `max_depth` override.
pub fn resolve_config(path: Option<&Path>, max_depth: Option<usize>) -> Result<ValidatorConfig> {
    let base = match path {
        Some(path) => ValidatorConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => ValidatorConfig::default(),
    };
    let mut config = base.with_env_overrides()?;
    if let Some(depth) = max_depth {
        config.max_depth = Some(depth);
    }
    Ok(config)
}

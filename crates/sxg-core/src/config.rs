//! # Validator Configuration
//!
//! Tunables for the validation engine, loadable from a YAML file, from the
//! environment, or constructed in code.
//!
//! ```text
//! SXG_MAX_DEPTH=512      # maximum value nesting the validator will descend into
//! SXG_MAX_DEPTH=none     # disable the depth guard
//! ```
//!
//! YAML form:
//!
//! ```yaml
//! max_depth: 512
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::SxgError;

/// Default bound on how many levels of the value tree the validator descends.
///
/// Matches the recursion limit `serde_json` applies while decoding. Each
/// value level costs several validator frames (a move type tag level passes
/// through a union, a variant, an array and a reference), so the bound must
/// hold on a 2 MiB thread stack in unoptimized builds.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Environment variable overriding [`ValidatorConfig::max_depth`].
pub const MAX_DEPTH_ENV: &str = "SXG_MAX_DEPTH";

/// Configuration for a validator instance.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidatorConfig {
    /// Maximum depth of value nesting to descend into. Deeper input is
    /// rejected with a false verdict. `None` disables the guard.
    pub max_depth: Option<usize>,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            max_depth: Some(DEFAULT_MAX_DEPTH),
        }
    }
}

impl ValidatorConfig {
    /// A configuration with no depth guard.
    pub fn unbounded() -> Self {
        Self { max_depth: None }
    }

    /// Parse a configuration from YAML text.
    ///
    /// # Errors
    ///
    /// Returns `SxgError::Config` if the text is not valid YAML or contains
    /// unknown keys.
    pub fn from_yaml_str(text: &str) -> Result<Self, SxgError> {
        serde_yaml::from_str(text).map_err(|e| SxgError::Config(format!("invalid YAML: {e}")))
    }

    /// Load a configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns `SxgError::Io` if the file cannot be read and `SxgError::Config`
    /// if it cannot be parsed.
    pub fn load(path: &Path) -> Result<Self, SxgError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text).map_err(|e| match e {
            SxgError::Config(reason) => SxgError::Config(format!("{}: {reason}", path.display())),
            other => other,
        })
    }

    /// Apply overrides from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `SxgError::Config` if `SXG_MAX_DEPTH` is set to something other
    /// than a non-negative integer or `none`.
    pub fn with_env_overrides(self) -> Result<Self, SxgError> {
        match std::env::var(MAX_DEPTH_ENV) {
            Ok(raw) => self.with_max_depth_str(&raw),
            Err(_) => Ok(self),
        }
    }

    fn with_max_depth_str(mut self, raw: &str) -> Result<Self, SxgError> {
        let raw = raw.trim();
        self.max_depth = if raw.eq_ignore_ascii_case("none") {
            None
        } else {
            let depth = raw.parse::<usize>().map_err(|e| {
                SxgError::Config(format!("{MAX_DEPTH_ENV}={raw:?} is not a depth: {e}"))
            })?;
            Some(depth)
        };
        tracing::debug!(max_depth = ?self.max_depth, "applied {MAX_DEPTH_ENV} override");
        Ok(self)
    }
}

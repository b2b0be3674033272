//! # Validate Subcommand
//!
//! Validates a JSON or YAML payload against a named gateway type.
//!
//! ```bash
//! sxg validate GetObjectInfoResponse response.json
//! curl -s ... | jq .result | sxg validate TransactionEffectsResponse --explain
//! ```
//!
//! Exit codes: 0 when the payload conforms, 1 when it does not, 2 on
//! operational error (unreadable file, undecodable document, unknown type).

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use serde_json::Value;

use sxg_core::ValidatorConfig;
use sxg_schema::{gateway, SchemaCatalog, Validator};

/// Arguments for the `sxg validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Gateway type name to validate against (see `sxg types`).
    #[arg(value_name = "TYPE")]
    pub type_name: String,

    /// Payload file (`.json`, `.yaml`, `.yml`). Reads JSON from stdin when omitted.
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// On failure, print the path to the first failing location.
    #[arg(long)]
    pub explain: bool,
}

/// Outcome of validating one document.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The document conforms.
    Valid,
    /// The document does not conform; carries the rendered mismatch.
    Invalid(String),
}

/// Execute the validate subcommand.
///
/// Returns exit code: 0 on success, 1 on validation failure.
pub fn run_validate(args: &ValidateArgs, config: &ValidatorConfig) -> Result<u8> {
    let catalog = gateway::catalog().context("gateway catalog is inconsistent")?;
    let document = crate::document::load(args.path.as_deref())
        .with_context(|| format!("failed to load payload for '{}'", args.type_name))?;

    let label = args
        .path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| crate::document::STDIN_LABEL.to_string());

    match validate_document(&catalog, config, &args.type_name, &document)? {
        Outcome::Valid => {
            println!("OK: {label} is a valid {}", args.type_name);
            Ok(0)
        }
        Outcome::Invalid(mismatch) => {
            println!("FAIL: {label} is not a valid {}", args.type_name);
            if args.explain {
                println!("  {mismatch}");
            }
            Ok(1)
        }
    }
}

/// Validate a decoded document against `type_name`.
///
/// # Errors
///
/// Fails if `type_name` is not defined in `catalog`; an undefined type is a
/// usage error rather than a rejected payload.
pub fn validate_document(
    catalog: &SchemaCatalog,
    config: &ValidatorConfig,
    type_name: &str,
    document: &Value,
) -> Result<Outcome> {
    if !catalog.contains(type_name) {
        bail!("unknown type '{type_name}'; run `sxg types` to list available types");
    }
    let validator = Validator::with_config(catalog, config);
    let outcome = match validator.check(document, type_name) {
        Ok(()) => Outcome::Valid,
        Err(mismatch) => Outcome::Invalid(mismatch.to_string()),
    };
    tracing::info!(type_name, valid = matches!(outcome, Outcome::Valid), "validated payload");
    Ok(outcome)
}

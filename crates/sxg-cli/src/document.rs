//! # Document Loading
//!
//! Reads a payload from a file or stdin and decodes it into a JSON value
//! tree. `.yaml`/`.yml` files are parsed as YAML and converted; everything
//! else is parsed as JSON.

use std::io::Read;
use std::path::Path;

use serde_json::Value;
use sxg_core::SxgError;

/// Label used in diagnostics for documents read from stdin.
pub const STDIN_LABEL: &str = "<stdin>";

/// Load a document from `path`, or from stdin when `path` is `None`.
///
/// # Errors
///
/// Returns `SxgError::Io` if the source cannot be read and
/// `SxgError::Document` if it cannot be decoded.
pub fn load(path: Option<&Path>) -> Result<Value, SxgError> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            let label = path.display().to_string();
            if is_yaml(path) {
                parse_yaml(&text, &label)
            } else {
                parse_json(&text, &label)
            }
        }
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            parse_json(&text, STDIN_LABEL)
        }
    }
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

/// Parse JSON text.
pub fn parse_json(text: &str, label: &str) -> Result<Value, SxgError> {
    serde_json::from_str(text).map_err(|e| SxgError::Document {
        path: label.to_string(),
        reason: format!("invalid JSON: {e}"),
    })
}

/// Parse YAML text and convert it to a JSON value tree.
pub fn parse_yaml(text: &str, label: &str) -> Result<Value, SxgError> {
    let yaml: serde_yaml::Value = serde_yaml::from_str(text).map_err(|e| SxgError::Document {
        path: label.to_string(),
        reason: format!("invalid YAML: {e}"),
    })?;
    yaml_to_json_value(&yaml).map_err(|reason| SxgError::Document {
        path: label.to_string(),
        reason: format!("YAML-to-JSON conversion failed: {reason}"),
    })
}

/// Convert a `serde_yaml::Value` to a `serde_json::Value`.
///
/// Payload fixtures use only the JSON-compatible subset of YAML; tags are
/// dropped and scalar map keys are stringified.
fn yaml_to_json_value(yaml: &serde_yaml::Value) -> Result<Value, String> {
    match yaml {
        serde_yaml::Value::Null => Ok(Value::Null),
        serde_yaml::Value::Bool(b) => Ok(Value::Bool(*b)),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Number(i.into()))
            } else if let Some(u) = n.as_u64() {
                Ok(Value::Number(u.into()))
            } else if let Some(f) = n.as_f64() {
                serde_json::Number::from_f64(f)
                    .map(Value::Number)
                    .ok_or_else(|| format!("cannot represent float {f} in JSON"))
            } else {
                Err(format!("unsupported YAML number: {n:?}"))
            }
        }
        serde_yaml::Value::String(s) => Ok(Value::String(s.clone())),
        serde_yaml::Value::Sequence(seq) => seq.iter().map(yaml_to_json_value).collect::<Result<_, _>>().map(Value::Array),
        serde_yaml::Value::Mapping(map) => {
            let mut json_map = serde_json::Map::new();
            for (k, v) in map {
                let key = match k {
                    serde_yaml::Value::String(s) => s.clone(),
                    serde_yaml::Value::Number(n) => n.to_string(),
                    serde_yaml::Value::Bool(b) => b.to_string(),
                    other => return Err(format!("unsupported YAML map key: {other:?}")),
                };
                json_map.insert(key, yaml_to_json_value(v)?);
            }
            Ok(Value::Object(json_map))
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json_value(&tagged.value),
    }
}

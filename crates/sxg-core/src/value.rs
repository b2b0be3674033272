//! # Value Kinds: Structural Introspection of Decoded Payloads
//!
//! RPC payloads reach the validator as untyped trees. This module defines the
//! closed set of kinds such a tree can be made of and the [`DynamicValue`]
//! trait through which the validator inspects a node without knowing its
//! concrete representation.
//!
//! ## Invariants
//!
//! - Every node reports exactly one [`ValueKind`]. Kind checks are a match on
//!   that discriminant, never a probe of accessor results.
//! - A node reports [`ValueKind::Number`] only when it holds a finite number.
//!   Non-finite floats (which can exist in an owned [`Value`] but never in
//!   decoded JSON) report as [`ValueKind::Unrepresentable`] and match no schema.
//! - `serde_json::Value` never reports [`ValueKind::Bytes`]; JSON has no byte
//!   type. Byte sequences only arise from an owned [`Value`].

use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value as JsonValue;

/// The closed set of kinds a decoded value can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// JSON `null` or an absent value.
    Null,
    /// `true` or `false`.
    Boolean,
    /// A finite number.
    Number,
    /// A UTF-8 string.
    String,
    /// A raw byte sequence.
    Bytes,
    /// An ordered sequence of values.
    Sequence,
    /// A keyed structure with string keys.
    Structure,
    /// A node that cannot be represented in the RPC protocol (non-finite number).
    Unrepresentable,
}

impl ValueKind {
    /// Lowercase name used in diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Bytes => "bytes",
            Self::Sequence => "sequence",
            Self::Structure => "structure",
            Self::Unrepresentable => "unrepresentable",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read-only structural view of a decoded value tree.
///
/// Accessors return `None` whenever the node is of a different kind, so the
/// validator can never observe a value through the wrong lens.
pub trait DynamicValue: Sized {
    /// The kind of this node.
    fn kind(&self) -> ValueKind;

    /// The string payload, if this node is a string.
    fn as_str(&self) -> Option<&str>;

    /// The boolean payload, if this node is a boolean.
    fn as_bool(&self) -> Option<bool>;

    /// The numeric payload, if this node is a finite number.
    fn as_number(&self) -> Option<f64>;

    /// The byte payload, if this node is a byte sequence.
    fn as_bytes(&self) -> Option<&[u8]>;

    /// The elements, if this node is an ordered sequence.
    fn elements(&self) -> Option<&[Self]>;

    /// Look up a field, if this node is a keyed structure that has `key`.
    fn field(&self, key: &str) -> Option<&Self>;

    /// Iterate over `(key, value)` entries, if this node is a keyed structure.
    fn entries(&self) -> Option<Box<dyn Iterator<Item = (&str, &Self)> + '_>>;
}

impl DynamicValue for JsonValue {
    fn kind(&self) -> ValueKind {
        match self {
            JsonValue::Null => ValueKind::Null,
            JsonValue::Bool(_) => ValueKind::Boolean,
            JsonValue::Number(_) => ValueKind::Number,
            JsonValue::String(_) => ValueKind::String,
            JsonValue::Array(_) => ValueKind::Sequence,
            JsonValue::Object(_) => ValueKind::Structure,
        }
    }

    fn as_str(&self) -> Option<&str> {
        JsonValue::as_str(self)
    }

    fn as_bool(&self) -> Option<bool> {
        JsonValue::as_bool(self)
    }

    fn as_number(&self) -> Option<f64> {
        JsonValue::as_f64(self)
    }

    fn as_bytes(&self) -> Option<&[u8]> {
        None
    }

    fn elements(&self) -> Option<&[Self]> {
        self.as_array().map(Vec::as_slice)
    }

    fn field(&self, key: &str) -> Option<&Self> {
        self.as_object().and_then(|map| map.get(key))
    }

    fn entries(&self) -> Option<Box<dyn Iterator<Item = (&str, &Self)> + '_>> {
        let map = self.as_object()?;
        Some(Box::new(map.iter().map(|(k, v)| (k.as_str(), v))))
    }
}

/// An owned value tree covering every [`ValueKind`], including raw bytes.
///
/// Wallet-side callers hold key material as bytes rather than encoded
/// strings; this type lets such payloads pass through the same validator as
/// decoded JSON.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absent value.
    Null,
    /// Boolean.
    Bool(bool),
    /// Number. Non-finite values are unrepresentable.
    Number(f64),
    /// String.
    String(String),
    /// Raw byte sequence.
    Bytes(Vec<u8>),
    /// Ordered sequence.
    Sequence(Vec<Value>),
    /// Keyed structure.
    Structure(BTreeMap<String, Value>),
}

impl Value {
    /// Build a keyed structure from `(key, value)` pairs.
    pub fn structure<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Self::Structure(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl DynamicValue for Value {
    fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Boolean,
            Value::Number(n) if n.is_finite() => ValueKind::Number,
            Value::Number(_) => ValueKind::Unrepresentable,
            Value::String(_) => ValueKind::String,
            Value::Bytes(_) => ValueKind::Bytes,
            Value::Sequence(_) => ValueKind::Sequence,
            Value::Structure(_) => ValueKind::Structure,
        }
    }

    fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) if n.is_finite() => Some(*n),
            _ => None,
        }
    }

    fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    fn elements(&self) -> Option<&[Self]> {
        match self {
            Value::Sequence(items) => Some(items),
            _ => None,
        }
    }

    fn field(&self, key: &str) -> Option<&Self> {
        match self {
            Value::Structure(map) => map.get(key),
            _ => None,
        }
    }

    fn entries(&self) -> Option<Box<dyn Iterator<Item = (&str, &Self)> + '_>> {
        match self {
            Value::Structure(map) => Some(Box::new(map.iter().map(|(k, v)| (k.as_str(), v)))),
            _ => None,
        }
    }
}

impl From<JsonValue> for Value {
    fn from(json: JsonValue) -> Self {
        match json {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(b) => Value::Bool(b),
            // serde_json numbers are always finite; u64/i64 beyond 2^53 lose precision.
            JsonValue::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            JsonValue::String(s) => Value::String(s),
            JsonValue::Array(items) => Value::Sequence(items.into_iter().map(Value::from).collect()),
            JsonValue::Object(map) => {
                Value::Structure(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Vec<u8>> for Value {
    fn from(bytes: Vec<u8>) -> Self {
        Value::Bytes(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_kinds_cover_every_variant() {
        assert_eq!(json!(null).kind(), ValueKind::Null);
        assert_eq!(json!(true).kind(), ValueKind::Boolean);
        assert_eq!(json!(1.5).kind(), ValueKind::Number);
        assert_eq!(json!("x").kind(), ValueKind::String);
        assert_eq!(json!([1]).kind(), ValueKind::Sequence);
        assert_eq!(json!({"a": 1}).kind(), ValueKind::Structure);
    }

    #[test]
    fn json_never_reports_bytes() {
        let v = json!([1, 2, 3]);
        assert!(v.as_bytes().is_none());
        assert_eq!(v.elements().map(<[_]>::len), Some(3));
    }

    #[test]
    fn json_field_lookup_only_on_structures() {
        let obj = json!({"objectId": "0x1"});
        assert_eq!(obj.field("objectId").and_then(DynamicValue::as_str), Some("0x1"));
        assert!(obj.field("digest").is_none());
        assert!(json!(["objectId"]).field("objectId").is_none());
        assert!(json!(null).field("objectId").is_none());
    }

    #[test]
    fn json_entries_iterate_all_keys() {
        let obj = json!({"a": 1, "b": 2});
        let keys: Vec<&str> = obj.entries().unwrap().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert!(json!("a").entries().is_none());
    }

    #[test]
    fn owned_non_finite_number_is_unrepresentable() {
        assert_eq!(Value::Number(f64::NAN).kind(), ValueKind::Unrepresentable);
        assert_eq!(Value::Number(f64::INFINITY).kind(), ValueKind::Unrepresentable);
        assert!(Value::Number(f64::NAN).as_number().is_none());
        assert_eq!(Value::Number(-3.0).as_number(), Some(-3.0));
    }

    #[test]
    fn owned_bytes_report_bytes_kind() {
        let v = Value::from(vec![1u8, 2, 3]);
        assert_eq!(v.kind(), ValueKind::Bytes);
        assert_eq!(v.as_bytes(), Some(&[1u8, 2, 3][..]));
        assert!(v.elements().is_none());
    }

    #[test]
    fn owned_from_json_preserves_shape() {
        let v = Value::from(json!({"vector": [{"vector": []}], "n": 7, "ok": false}));
        assert_eq!(v.kind(), ValueKind::Structure);
        let inner = v.field("vector").and_then(DynamicValue::elements).unwrap();
        assert_eq!(inner.len(), 1);
        assert_eq!(inner[0].field("vector").map(DynamicValue::kind), Some(ValueKind::Sequence));
        assert_eq!(v.field("n").and_then(DynamicValue::as_number), Some(7.0));
        assert_eq!(v.field("ok").and_then(DynamicValue::as_bool), Some(false));
    }

    #[test]
    fn structure_builder_collects_entries() {
        let v = Value::structure([("a", Value::from("x")), ("b", Value::Null)]);
        assert_eq!(v.field("a").and_then(DynamicValue::as_str), Some("x"));
        assert_eq!(v.field("b").map(DynamicValue::kind), Some(ValueKind::Null));
    }

    #[test]
    fn kind_display_names() {
        assert_eq!(ValueKind::Structure.to_string(), "structure");
        assert_eq!(ValueKind::Bytes.to_string(), "bytes");
    }
}

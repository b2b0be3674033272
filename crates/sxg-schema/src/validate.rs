//! # Structural Validation
//!
//! Decides whether a decoded value conforms to a schema node.
//!
//! ## Trust Boundary
//!
//! RPC payloads arrive with no static type information. Before any caller
//! reads a payload's fields it must obtain a verdict here; a false verdict
//! means the payload is rejected as a whole, never partially trusted.
//!
//! ## Totality
//!
//! Validation never panics and never returns an error for malformed input.
//! Every value/schema pair yields either `Ok(())` or a [`Mismatch`] describing
//! the first failing location. An unknown type name and input nested deeper
//! than the configured limit are also mismatches.
//!
//! ## Evaluation Order
//!
//! - Record fields: declaration order, stop at the first failure.
//! - Union alternatives: declaration order, stop at the first success.
//!   Alternatives may overlap; exclusivity is not required.
//! - Variant keys: declaration order, first key that is present *and* whose
//!   payload validates wins.

use std::fmt;
use std::marker::PhantomData;
use std::ops::Deref;

use sxg_core::{DynamicValue, ValidatorConfig, ValueKind};
use thiserror::Error;

use crate::catalog::SchemaCatalog;
use crate::node::{Field, SchemaNode};

/// The schema a value is validated against: a catalog name or an inline node.
#[derive(Debug, Clone, Copy)]
pub enum SchemaRef<'s> {
    /// A definition in the validator's catalog.
    Named(&'s str),
    /// A node supplied by the caller; references inside it resolve against
    /// the validator's catalog.
    Inline(&'s SchemaNode),
}

impl<'s> From<&'s str> for SchemaRef<'s> {
    fn from(name: &'s str) -> Self {
        Self::Named(name)
    }
}

impl<'s> From<&'s String> for SchemaRef<'s> {
    fn from(name: &'s String) -> Self {
        Self::Named(name)
    }
}

impl<'s> From<&'s SchemaNode> for SchemaRef<'s> {
    fn from(node: &'s SchemaNode) -> Self {
        Self::Inline(node)
    }
}

impl fmt::Display for SchemaRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => f.write_str(name),
            Self::Inline(node) => write!(f, "{node}"),
        }
    }
}

/// One step of the path from the root of a value to a failing location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// A structure key.
    Key(String),
    /// A sequence position.
    Index(usize),
}

/// Why a value failed to validate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MismatchReason {
    /// The value is of the wrong kind.
    #[error("expected {expected}, found {found}")]
    WrongKind {
        /// Kind the schema requires.
        expected: ValueKind,
        /// Kind the value has.
        found: ValueKind,
    },

    /// The value is a string outside the allowed literal set.
    #[error("expected one of {allowed:?}, found {found:?}")]
    NotALiteral {
        /// The allowed literals.
        allowed: Vec<String>,
        /// The string that was found.
        found: String,
    },

    /// A required record field is absent.
    #[error("missing required field '{field}'")]
    MissingField {
        /// The absent field.
        field: String,
    },

    /// A tuple has the wrong number of positions.
    #[error("expected {expected} elements, found {found}")]
    WrongLength {
        /// Required length.
        expected: usize,
        /// Actual length.
        found: usize,
    },

    /// No union alternative matched.
    #[error("matched none of {tried} alternatives")]
    NoAlternative {
        /// Number of alternatives tried.
        tried: usize,
    },

    /// No variant key was present with a valid payload.
    #[error("no valid variant among {keys:?}")]
    NoVariant {
        /// Keys that were tried.
        keys: Vec<String>,
    },

    /// The value nests deeper than the configured limit.
    #[error("nesting exceeds depth limit {limit}")]
    DepthExceeded {
        /// The configured limit.
        limit: usize,
    },

    /// The schema names a type the catalog does not define.
    #[error("unknown type '{name}'")]
    UnknownType {
        /// The undefined name.
        name: String,
    },
}

/// The first failing location of a rejected value.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{}: {reason}", DisplayPath(path))]
pub struct Mismatch {
    /// Path from the root of the value to the failing node.
    pub path: Vec<PathSegment>,
    /// What was wrong there.
    pub reason: MismatchReason,
}

impl Mismatch {
    fn new(reason: MismatchReason) -> Self {
        Self {
            path: Vec::new(),
            reason,
        }
    }

    /// JSON Pointer (RFC 6901) rendering of the path; empty for the root.
    pub fn pointer(&self) -> String {
        let mut out = String::new();
        for segment in &self.path {
            out.push('/');
            match segment {
                PathSegment::Key(key) => out.push_str(&key.replace('~', "~0").replace('/', "~1")),
                PathSegment::Index(i) => out.push_str(&i.to_string()),
            }
        }
        out
    }

    // Segments are pushed while unwinding, so they arrive innermost-first.
    fn within(mut self, segment: PathSegment) -> Self {
        self.path.push(segment);
        self
    }

    fn rooted(mut self) -> Self {
        self.path.reverse();
        self
    }

    fn is_depth_exceeded(&self) -> bool {
        matches!(self.reason, MismatchReason::DepthExceeded { .. })
    }
}

struct DisplayPath<'a>(&'a [PathSegment]);

impl fmt::Display for DisplayPath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("(root)");
        }
        for segment in self.0 {
            match segment {
                PathSegment::Key(key) => write!(f, "/{key}")?,
                PathSegment::Index(i) => write!(f, "/{i}")?,
            }
        }
        Ok(())
    }
}

/// A type defined in a catalog, usable with [`Validator::narrow`].
pub trait CatalogType {
    /// The catalog name of the type.
    const NAME: &'static str;
}

/// A value that has been validated against `T`.
///
/// The witness borrows the value; it can only be obtained from
/// [`Validator::narrow`] or [`Validator::verify`].
pub struct Verified<'v, T, V> {
    value: &'v V,
    _type: PhantomData<fn() -> T>,
}

impl<'v, T: CatalogType, V> Verified<'v, T, V> {
    /// The validated value.
    pub fn get(&self) -> &'v V {
        self.value
    }

    /// Catalog name of the type the value was validated against.
    pub fn type_name(&self) -> &'static str {
        T::NAME
    }
}

impl<T, V> Deref for Verified<'_, T, V> {
    type Target = V;

    fn deref(&self) -> &V {
        self.value
    }
}

impl<T, V> Clone for Verified<'_, T, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, V> Copy for Verified<'_, T, V> {}

impl<T: CatalogType, V: fmt::Debug> fmt::Debug for Verified<'_, T, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Verified")
            .field("type", &T::NAME)
            .field("value", self.value)
            .finish()
    }
}

/// Validates values against the schemas of one catalog.
///
/// Holds no per-call state; one instance can serve any number of concurrent
/// callers.
#[derive(Debug, Clone, Copy)]
pub struct Validator<'c> {
    catalog: &'c SchemaCatalog,
    max_depth: Option<usize>,
}

impl<'c> Validator<'c> {
    /// A validator over `catalog` with the default configuration.
    pub fn new(catalog: &'c SchemaCatalog) -> Self {
        Self::with_config(catalog, &ValidatorConfig::default())
    }

    /// A validator over `catalog` with an explicit configuration.
    pub fn with_config(catalog: &'c SchemaCatalog, config: &ValidatorConfig) -> Self {
        Self {
            catalog,
            max_depth: config.max_depth,
        }
    }

    /// The catalog this validator resolves names against.
    pub fn catalog(&self) -> &'c SchemaCatalog {
        self.catalog
    }

    /// Whether `value` conforms to `schema`.
    pub fn validate<'s, V: DynamicValue>(&self, value: &V, schema: impl Into<SchemaRef<'s>>) -> bool {
        self.check(value, schema).is_ok()
    }

    /// Validate `value` against `schema`, reporting the first failing location.
    ///
    /// # Errors
    ///
    /// Returns the [`Mismatch`] if `value` does not conform. This is an
    /// ordinary outcome, not a fault.
    pub fn check<'s, V: DynamicValue>(&self, value: &V, schema: impl Into<SchemaRef<'s>>) -> Result<(), Mismatch> {
        let schema = schema.into();
        let result = match schema {
            SchemaRef::Named(name) => self.walk_named(value, name, 0),
            SchemaRef::Inline(node) => self.walk(value, node, 0),
        };
        result.map_err(|mismatch| {
            let mismatch = mismatch.rooted();
            match &mismatch.reason {
                MismatchReason::UnknownType { name } => {
                    tracing::warn!(%schema, unknown = %name, "validation against undefined type");
                }
                _ => tracing::trace!(%schema, %mismatch, "payload rejected"),
            }
            mismatch
        })
    }

    /// Validate `value` as `T`, returning a typed witness on success.
    pub fn narrow<'v, T: CatalogType, V: DynamicValue>(&self, value: &'v V) -> Option<Verified<'v, T, V>> {
        self.verify(value).ok()
    }

    /// Validate `value` as `T`, returning a typed witness or the mismatch.
    ///
    /// # Errors
    ///
    /// Returns the [`Mismatch`] if `value` does not conform to `T`.
    pub fn verify<'v, T: CatalogType, V: DynamicValue>(&self, value: &'v V) -> Result<Verified<'v, T, V>, Mismatch> {
        self.check(value, T::NAME)?;
        Ok(Verified {
            value,
            _type: PhantomData,
        })
    }

    fn walk_named<V: DynamicValue>(&self, value: &V, name: &str, depth: usize) -> Result<(), Mismatch> {
        match self.catalog.resolve(name) {
            Ok(node) => self.walk(value, node, depth),
            Err(_) => Err(Mismatch::new(MismatchReason::UnknownType {
                name: name.to_string(),
            })),
        }
    }

    fn walk<V: DynamicValue>(&self, value: &V, node: &SchemaNode, depth: usize) -> Result<(), Mismatch> {
        match node {
            SchemaNode::Primitive(primitive) => expect_kind(value, primitive.kind()),
            SchemaNode::Absent => expect_kind(value, ValueKind::Null),
            SchemaNode::Literals(allowed) => {
                let found = value.as_str().ok_or_else(|| wrong_kind(ValueKind::String, value))?;
                if allowed.iter().any(|literal| literal == found) {
                    Ok(())
                } else {
                    Err(Mismatch::new(MismatchReason::NotALiteral {
                        allowed: allowed.clone(),
                        found: found.to_string(),
                    }))
                }
            }
            SchemaNode::Record(fields) => self.walk_record(value, fields, depth),
            SchemaNode::Map(values) => {
                let entries = value.entries().ok_or_else(|| wrong_kind(ValueKind::Structure, value))?;
                let depth = self.descend(depth)?;
                for (key, entry) in entries {
                    self.walk(entry, values, depth)
                        .map_err(|m| m.within(PathSegment::Key(key.to_string())))?;
                }
                Ok(())
            }
            SchemaNode::Array(element) => {
                let items = value.elements().ok_or_else(|| wrong_kind(ValueKind::Sequence, value))?;
                let depth = self.descend(depth)?;
                for (i, item) in items.iter().enumerate() {
                    self.walk(item, element, depth)
                        .map_err(|m| m.within(PathSegment::Index(i)))?;
                }
                Ok(())
            }
            SchemaNode::Tuple(positions) => {
                let items = value.elements().ok_or_else(|| wrong_kind(ValueKind::Sequence, value))?;
                if items.len() != positions.len() {
                    return Err(Mismatch::new(MismatchReason::WrongLength {
                        expected: positions.len(),
                        found: items.len(),
                    }));
                }
                let depth = self.descend(depth)?;
                for (i, (item, schema)) in items.iter().zip(positions).enumerate() {
                    self.walk(item, schema, depth)
                        .map_err(|m| m.within(PathSegment::Index(i)))?;
                }
                Ok(())
            }
            SchemaNode::Union(alternatives) => self.walk_union(value, alternatives, depth),
            SchemaNode::Variant(cases) => self.walk_variant(value, cases, depth),
            SchemaNode::Reference(name) => self.walk_named(value, name, depth),
        }
    }

    fn walk_record<V: DynamicValue>(&self, value: &V, fields: &[Field], depth: usize) -> Result<(), Mismatch> {
        if value.kind() != ValueKind::Structure {
            return Err(wrong_kind(ValueKind::Structure, value));
        }
        if fields.is_empty() {
            return Ok(());
        }
        let depth = self.descend(depth)?;
        for field in fields {
            let member = value.field(&field.name).ok_or_else(|| {
                Mismatch::new(MismatchReason::MissingField {
                    field: field.name.clone(),
                })
            })?;
            self.walk(member, &field.schema, depth)
                .map_err(|m| m.within(PathSegment::Key(field.name.clone())))?;
        }
        Ok(())
    }

    fn walk_variant<V: DynamicValue>(&self, value: &V, cases: &[Field], depth: usize) -> Result<(), Mismatch> {
        if value.kind() != ValueKind::Structure {
            return Err(wrong_kind(ValueKind::Structure, value));
        }
        let depth = self.descend(depth)?;
        let mut guard_trip = None;
        for case in cases {
            let Some(payload) = value.field(&case.name) else {
                continue;
            };
            match self.walk(payload, &case.schema, depth) {
                Ok(()) => return Ok(()),
                Err(mismatch) if guard_trip.is_none() && mismatch.is_depth_exceeded() => {
                    guard_trip = Some(mismatch.within(PathSegment::Key(case.name.clone())));
                }
                Err(_) => {}
            }
        }
        Err(guard_trip.unwrap_or_else(|| {
            Mismatch::new(MismatchReason::NoVariant {
                keys: cases.iter().map(|case| case.name.clone()).collect(),
            })
        }))
    }

    // The first depth-guard trip among the alternatives is reported in place
    // of `NoAlternative`.
    fn walk_union<V: DynamicValue>(
        &self,
        value: &V,
        alternatives: &[SchemaNode],
        depth: usize,
    ) -> Result<(), Mismatch> {
        let mut guard_trip = None;
        for alternative in alternatives {
            match self.walk(value, alternative, depth) {
                Ok(()) => return Ok(()),
                Err(mismatch) if guard_trip.is_none() && mismatch.is_depth_exceeded() => {
                    guard_trip = Some(mismatch);
                }
                Err(_) => {}
            }
        }
        Err(guard_trip.unwrap_or_else(|| {
            Mismatch::new(MismatchReason::NoAlternative {
                tried: alternatives.len(),
            })
        }))
    }

    /// Depth of the children of a node at `depth`, if within the limit.
    fn descend(&self, depth: usize) -> Result<usize, Mismatch> {
        match self.max_depth {
            Some(limit) if depth >= limit => Err(Mismatch::new(MismatchReason::DepthExceeded { limit })),
            _ => Ok(depth + 1),
        }
    }
}

fn expect_kind<V: DynamicValue>(value: &V, expected: ValueKind) -> Result<(), Mismatch> {
    if value.kind() == expected {
        Ok(())
    } else {
        Err(wrong_kind(expected, value))
    }
}

fn wrong_kind<V: DynamicValue>(expected: ValueKind, value: &V) -> Mismatch {
    Mismatch::new(MismatchReason::WrongKind {
        expected,
        found: value.kind(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogBuilder;
    use serde_json::json;
    use sxg_core::Value;

    fn catalog() -> SchemaCatalog {
        let mut builder = CatalogBuilder::new();
        builder
            .define("ObjectId", SchemaNode::string())
            .unwrap()
            .define("SequenceNumber", SchemaNode::number())
            .unwrap()
            .define(
                "ObjectRef",
                SchemaNode::record([
                    ("objectId", SchemaNode::reference("ObjectId")),
                    ("digest", SchemaNode::string()),
                    ("version", SchemaNode::reference("SequenceNumber")),
                ]),
            )
            .unwrap()
            .define("Numbers", SchemaNode::array(SchemaNode::number()))
            .unwrap()
            .define(
                "Effects",
                SchemaNode::variant([
                    ("created", SchemaNode::array(SchemaNode::reference("ObjectId"))),
                    ("deleted", SchemaNode::array(SchemaNode::reference("ObjectId"))),
                    ("mutated", SchemaNode::array(SchemaNode::reference("ObjectId"))),
                ]),
            )
            .unwrap()
            .define(
                "TypeTag",
                SchemaNode::union([
                    SchemaNode::literals(["bool", "u8", "u64", "address"]),
                    SchemaNode::variant([("vector", SchemaNode::array(SchemaNode::reference("TypeTag")))]),
                ]),
            )
            .unwrap()
            .define(
                "Pair",
                SchemaNode::tuple([SchemaNode::reference("SequenceNumber"), SchemaNode::string()]),
            )
            .unwrap()
            .define("Maybe", SchemaNode::union([SchemaNode::string(), SchemaNode::Absent]))
            .unwrap();
        builder.build().unwrap()
    }

    #[test]
    fn record_with_all_fields_validates() {
        let catalog = catalog();
        let v = Validator::new(&catalog);
        assert!(v.validate(&json!({"objectId": "0x1", "digest": "abc", "version": 3}), "ObjectRef"));
    }

    #[test]
    fn record_missing_field_rejected() {
        let catalog = catalog();
        let v = Validator::new(&catalog);
        let value = json!({"objectId": "0x1", "digest": "abc"});
        assert!(!v.validate(&value, "ObjectRef"));
        let mismatch = v.check(&value, "ObjectRef").unwrap_err();
        assert_eq!(
            mismatch.reason,
            MismatchReason::MissingField {
                field: "version".into()
            }
        );
        assert!(mismatch.path.is_empty());
    }

    #[test]
    fn record_extra_field_tolerated() {
        let catalog = catalog();
        let v = Validator::new(&catalog);
        let value = json!({"objectId": "0x1", "digest": "abc", "version": 3, "previousTransaction": "x"});
        assert!(v.validate(&value, "ObjectRef"));
    }

    #[test]
    fn null_rejected_except_by_absent() {
        let catalog = catalog();
        let v = Validator::new(&catalog);
        let null = json!(null);
        for name in ["ObjectId", "SequenceNumber", "ObjectRef", "Numbers", "Effects", "TypeTag", "Pair"] {
            assert!(!v.validate(&null, name), "{name} accepted null");
        }
        assert!(v.validate(&null, "Maybe"));
        assert!(v.validate(&json!("x"), "Maybe"));
        assert!(!v.validate(&json!(1), "Maybe"));
    }

    #[test]
    fn array_homogeneity() {
        let catalog = catalog();
        let v = Validator::new(&catalog);
        assert!(v.validate(&json!([1, 2, 3]), "Numbers"));
        assert!(v.validate(&json!([]), "Numbers"));
        let mismatch = v.check(&json!([1, 2, "x"]), "Numbers").unwrap_err();
        assert_eq!(mismatch.path, vec![PathSegment::Index(2)]);
        assert_eq!(
            mismatch.reason,
            MismatchReason::WrongKind {
                expected: ValueKind::Number,
                found: ValueKind::String
            }
        );
        assert!(!v.validate(&json!({"0": 1}), "Numbers"));
    }

    #[test]
    fn numbers_are_not_range_checked() {
        let catalog = catalog();
        let v = Validator::new(&catalog);
        assert!(v.validate(&json!(-5), "SequenceNumber"));
        assert!(v.validate(&json!(1.25), "SequenceNumber"));
        assert!(!v.validate(&json!("5"), "SequenceNumber"));
        assert!(!v.validate(&Value::Number(f64::NAN), "SequenceNumber"));
    }

    #[test]
    fn tuple_requires_exact_length() {
        let catalog = catalog();
        let v = Validator::new(&catalog);
        assert!(v.validate(&json!([1, "d"]), "Pair"));
        let short = v.check(&json!([1]), "Pair").unwrap_err();
        assert_eq!(short.reason, MismatchReason::WrongLength { expected: 2, found: 1 });
        assert!(!v.validate(&json!([1, "d", "extra"]), "Pair"));
        assert!(!v.validate(&json!(["d", 1]), "Pair"));
    }

    #[test]
    fn variant_selected_by_present_key() {
        let catalog = catalog();
        let v = Validator::new(&catalog);
        assert!(v.validate(&json!({"created": ["0xA"]}), "Effects"));
        assert!(v.validate(&json!({"deleted": [], "other": 1}), "Effects"));
        let empty = v.check(&json!({}), "Effects").unwrap_err();
        assert!(matches!(empty.reason, MismatchReason::NoVariant { ref keys } if keys.len() == 3));
        assert!(!v.validate(&json!("created"), "Effects"));
    }

    #[test]
    fn variant_falls_through_invalid_payload_to_later_key() {
        let catalog = catalog();
        let v = Validator::new(&catalog);
        assert!(v.validate(&json!({"created": 5, "mutated": ["0x1"]}), "Effects"));
        assert!(!v.validate(&json!({"created": 5}), "Effects"));
    }

    #[test]
    fn recursive_type_tag() {
        let catalog = catalog();
        let v = Validator::new(&catalog);
        assert!(v.validate(&json!({"vector": [{"vector": []}]}), "TypeTag"));
        assert!(v.validate(&json!({"vector": ["u8", {"vector": ["address"]}]}), "TypeTag"));
        assert!(!v.validate(&json!({"vector": [{"bogus": 1}]}), "TypeTag"));
        assert!(!v.validate(&json!("U8"), "TypeTag"));
    }

    #[test]
    fn union_accepts_overlapping_alternatives() {
        let catalog = catalog();
        let v = Validator::new(&catalog);
        let overlapping = SchemaNode::union([
            SchemaNode::record([("objectId", SchemaNode::string())]),
            SchemaNode::reference("ObjectRef"),
        ]);
        let value = json!({"objectId": "0x1", "digest": "abc", "version": 1});
        assert!(v.validate(&value, &overlapping));
    }

    #[test]
    fn nested_mismatch_path_is_rooted() {
        let catalog = catalog();
        let v = Validator::new(&catalog);
        let node = SchemaNode::record([("objects", SchemaNode::array(SchemaNode::reference("ObjectRef")))]);
        let value = json!({"objects": [
            {"objectId": "0x1", "digest": "a", "version": 1},
            {"objectId": "0x2", "digest": 7, "version": 1}
        ]});
        let mismatch = v.check(&value, &node).unwrap_err();
        assert_eq!(
            mismatch.path,
            vec![
                PathSegment::Key("objects".into()),
                PathSegment::Index(1),
                PathSegment::Key("digest".into()),
            ]
        );
        assert_eq!(mismatch.pointer(), "/objects/1/digest");
        assert_eq!(mismatch.to_string(), "/objects/1/digest: expected string, found number");
    }

    #[test]
    fn pointer_escapes_special_characters() {
        let mismatch = Mismatch::new(MismatchReason::NoAlternative { tried: 2 })
            .within(PathSegment::Key("a/b~c".into()))
            .rooted();
        assert_eq!(mismatch.pointer(), "/a~1b~0c");
        assert_eq!(mismatch.to_string(), "/a/b~c: matched none of 2 alternatives");
    }

    #[test]
    fn unknown_type_is_false_not_fault() {
        let catalog = catalog();
        let v = Validator::new(&catalog);
        assert!(!v.validate(&json!("x"), "NoSuchType"));
        let mismatch = v.check(&json!("x"), "NoSuchType").unwrap_err();
        assert_eq!(mismatch.to_string(), "(root): unknown type 'NoSuchType'");
        let inline = SchemaNode::array(SchemaNode::reference("AlsoMissing"));
        assert!(v.validate(&json!([]), &inline));
        assert!(!v.validate(&json!([1]), &inline));
    }

    #[test]
    fn depth_limit_rejects_deep_input() {
        let catalog = catalog();
        let config = ValidatorConfig { max_depth: Some(3) };
        let v = Validator::with_config(&catalog, &config);
        let shallow = json!({"vector": ["u8"]});
        assert!(v.validate(&shallow, "TypeTag"));
        let deep = json!({"vector": [{"vector": [{"vector": ["u8"]}]}]});
        assert!(!v.validate(&deep, "TypeTag"));
        assert!(Validator::with_config(&catalog, &ValidatorConfig::unbounded()).validate(&deep, "TypeTag"));
    }

    #[test]
    fn depth_limit_surfaces_through_unions_and_variants() {
        let catalog = catalog();
        let config = ValidatorConfig { max_depth: Some(3) };
        let v = Validator::with_config(&catalog, &config);
        let deep = json!({"vector": [{"vector": [{"vector": ["u8"]}]}]});
        let mismatch = v.check(&deep, "TypeTag").unwrap_err();
        assert_eq!(mismatch.reason, MismatchReason::DepthExceeded { limit: 3 });
        assert_eq!(mismatch.pointer(), "/vector/0/vector");

        let plain = v.check(&json!({"vector": [7]}), "TypeTag").unwrap_err();
        assert_eq!(plain.reason, MismatchReason::NoAlternative { tried: 2 });
    }

    #[test]
    fn depth_limit_surfaces_through_record_path() {
        let catalog = catalog();
        let config = ValidatorConfig { max_depth: Some(1) };
        let v = Validator::with_config(&catalog, &config);
        let node = SchemaNode::record([("inner", SchemaNode::reference("ObjectRef"))]);
        let value = json!({"inner": {"objectId": "0x1", "digest": "a", "version": 1}});
        let mismatch = v.check(&value, &node).unwrap_err();
        assert_eq!(mismatch.reason, MismatchReason::DepthExceeded { limit: 1 });
        assert_eq!(mismatch.pointer(), "/inner");
    }

    #[test]
    fn owned_values_validate_like_json() {
        let catalog = catalog();
        let v = Validator::new(&catalog);
        let owned = Value::from(json!({"objectId": "0x1", "digest": "abc", "version": 3}));
        assert!(v.validate(&owned, "ObjectRef"));
        assert!(v.validate(&Value::from(vec![1u8, 2]), &SchemaNode::bytes()));
        assert!(!v.validate(&json!([1, 2]), &SchemaNode::bytes()));
    }

    #[test]
    fn narrowing_yields_typed_witness() {
        enum ObjectRef {}
        impl CatalogType for ObjectRef {
            const NAME: &'static str = "ObjectRef";
        }

        let catalog = catalog();
        let v = Validator::new(&catalog);
        let good = json!({"objectId": "0x1", "digest": "abc", "version": 3});
        let verified = v.narrow::<ObjectRef, _>(&good).expect("valid object ref");
        assert_eq!(verified.type_name(), "ObjectRef");
        assert_eq!(verified["objectId"], "0x1");
        assert!(std::ptr::eq(verified.get(), &good));

        let bad = json!({"objectId": "0x1"});
        assert!(v.narrow::<ObjectRef, _>(&bad).is_none());
        assert!(v.verify::<ObjectRef, _>(&bad).is_err());
    }
}

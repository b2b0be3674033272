//! # Schema Nodes
//!
//! The type universe of the catalog. A [`SchemaNode`] is a declarative
//! description of the shape a value must have; nodes nest, and
//! [`SchemaNode::Reference`] defers to another catalog entry by name so
//! definitions can be mutually recursive.
//!
//! Ordering is significant wherever a node holds a list: record fields are
//! checked in declaration order, union alternatives and variant keys are
//! tried in declaration order and the first success wins.

use std::fmt;

use sxg_core::ValueKind;

/// A primitive value kind a [`SchemaNode::Primitive`] can require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    /// Any string.
    String,
    /// Any finite number. No range check.
    Number,
    /// `true` or `false`.
    Boolean,
    /// A raw byte sequence.
    Bytes,
}

impl Primitive {
    /// The value kind this primitive accepts.
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::String => ValueKind::String,
            Self::Number => ValueKind::Number,
            Self::Boolean => ValueKind::Boolean,
            Self::Bytes => ValueKind::Bytes,
        }
    }
}

/// A named member of a record or tagged variant.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Key the member is stored under.
    pub name: String,
    /// Schema the member's value must satisfy.
    pub schema: SchemaNode,
}

/// One node of the schema type universe.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
    /// Value must be of exactly this primitive kind.
    Primitive(Primitive),
    /// Value must be null. Only meaningful as a union alternative.
    Absent,
    /// Value must be a string equal to one of these (case-sensitive).
    Literals(Vec<String>),
    /// Keyed structure with every listed field present and valid.
    /// Extra fields are ignored; no fields accepts any keyed structure.
    Record(Vec<Field>),
    /// Keyed structure whose every entry value satisfies the schema.
    Map(Box<SchemaNode>),
    /// Ordered sequence whose every element satisfies the schema.
    Array(Box<SchemaNode>),
    /// Ordered sequence of exactly this length, one schema per position.
    Tuple(Vec<SchemaNode>),
    /// At least one alternative must match, tried in order.
    Union(Vec<SchemaNode>),
    /// Keyed structure where at least one of the keys is present and its
    /// payload is valid, tried in order.
    Variant(Vec<Field>),
    /// Defers to the catalog entry with this name.
    Reference(String),
}

impl SchemaNode {
    /// Any string.
    pub fn string() -> Self {
        Self::Primitive(Primitive::String)
    }

    /// Any finite number.
    pub fn number() -> Self {
        Self::Primitive(Primitive::Number)
    }

    /// A boolean.
    pub fn boolean() -> Self {
        Self::Primitive(Primitive::Boolean)
    }

    /// A raw byte sequence.
    pub fn bytes() -> Self {
        Self::Primitive(Primitive::Bytes)
    }

    /// One of the given string literals.
    pub fn literals<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Literals(values.into_iter().map(Into::into).collect())
    }

    /// A record with the given required fields.
    pub fn record<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = (S, SchemaNode)>,
        S: Into<String>,
    {
        Self::Record(collect_fields(fields))
    }

    /// Any keyed structure.
    pub fn any_structure() -> Self {
        Self::Record(Vec::new())
    }

    /// A keyed structure whose values all satisfy `values`.
    pub fn map(values: SchemaNode) -> Self {
        Self::Map(Box::new(values))
    }

    /// A sequence of `element`.
    pub fn array(element: SchemaNode) -> Self {
        Self::Array(Box::new(element))
    }

    /// A fixed-arity sequence.
    pub fn tuple<I: IntoIterator<Item = SchemaNode>>(positions: I) -> Self {
        Self::Tuple(positions.into_iter().collect())
    }

    /// An ordered union.
    pub fn union<I: IntoIterator<Item = SchemaNode>>(alternatives: I) -> Self {
        Self::Union(alternatives.into_iter().collect())
    }

    /// A tagged variant keyed by the given (key, payload) pairs.
    pub fn variant<I, S>(cases: I) -> Self
    where
        I: IntoIterator<Item = (S, SchemaNode)>,
        S: Into<String>,
    {
        Self::Variant(collect_fields(cases))
    }

    /// A reference to the named catalog entry.
    pub fn reference(name: impl Into<String>) -> Self {
        Self::Reference(name.into())
    }

    /// Call `f` with every reference name reachable inside this node
    /// (not following references).
    pub fn for_each_reference<'a>(&'a self, f: &mut impl FnMut(&'a str)) {
        match self {
            Self::Primitive(_) | Self::Absent | Self::Literals(_) => {}
            Self::Record(fields) | Self::Variant(fields) => {
                for field in fields {
                    field.schema.for_each_reference(f);
                }
            }
            Self::Map(inner) | Self::Array(inner) => inner.for_each_reference(f),
            Self::Tuple(nodes) | Self::Union(nodes) => {
                for node in nodes {
                    node.for_each_reference(f);
                }
            }
            Self::Reference(name) => f(name),
        }
    }

    /// Reference names reachable from this node without descending into the
    /// value, i.e. through references and union alternatives only.
    pub(crate) fn for_each_unguarded_reference<'a>(&'a self, f: &mut impl FnMut(&'a str)) {
        match self {
            Self::Reference(name) => f(name),
            Self::Union(alternatives) => {
                for alt in alternatives {
                    alt.for_each_unguarded_reference(f);
                }
            }
            _ => {}
        }
    }
}

fn collect_fields<I, S>(fields: I) -> Vec<Field>
where
    I: IntoIterator<Item = (S, SchemaNode)>,
    S: Into<String>,
{
    fields
        .into_iter()
        .map(|(name, schema)| Field {
            name: name.into(),
            schema,
        })
        .collect()
}

/// Renders nodes as compact type expressions, e.g.
/// `{ digest: ObjectDigest, version: SequenceNumber }` or `"Shared" | ObjectRef[]`.
impl fmt::Display for SchemaNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(p) => f.write_str(p.kind().as_str()),
            Self::Absent => f.write_str("null"),
            Self::Literals(values) => {
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" | ")?;
                    }
                    write!(f, "{v:?}")?;
                }
                Ok(())
            }
            Self::Record(fields) if fields.is_empty() => f.write_str("{ .. }"),
            Self::Record(fields) => write_fields(f, fields, ", "),
            Self::Map(values) => write!(f, "{{ [key: string]: {values} }}"),
            Self::Array(element) => match element.as_ref() {
                Self::Union(_) | Self::Literals(_) => write!(f, "({element})[]"),
                _ => write!(f, "{element}[]"),
            },
            Self::Tuple(positions) => {
                f.write_str("[")?;
                for (i, node) in positions.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{node}")?;
                }
                f.write_str("]")
            }
            Self::Union(alternatives) => {
                for (i, alt) in alternatives.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" | ")?;
                    }
                    write!(f, "{alt}")?;
                }
                Ok(())
            }
            Self::Variant(cases) => write_fields(f, cases, " | "),
            Self::Reference(name) => f.write_str(name),
        }
    }
}

fn write_fields(f: &mut fmt::Formatter<'_>, fields: &[Field], sep: &str) -> fmt::Result {
    f.write_str("{ ")?;
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{}: {}", field.name, field.schema)?;
    }
    f.write_str(" }")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_record() {
        let node = SchemaNode::record([
            ("digest", SchemaNode::reference("ObjectDigest")),
            ("version", SchemaNode::number()),
        ]);
        assert_eq!(node.to_string(), "{ digest: ObjectDigest, version: number }");
    }

    #[test]
    fn display_union_and_array_parenthesized() {
        let node = SchemaNode::union([
            SchemaNode::literals(["Shared", "Immutable"]),
            SchemaNode::array(SchemaNode::union([SchemaNode::string(), SchemaNode::Absent])),
        ]);
        assert_eq!(node.to_string(), r#""Shared" | "Immutable" | (string | null)[]"#);
    }

    #[test]
    fn display_variant_tuple_map() {
        let variant = SchemaNode::variant([
            ("vector", SchemaNode::array(SchemaNode::reference("MoveTypeTag"))),
            ("struct", SchemaNode::reference("StructTag")),
        ]);
        assert_eq!(variant.to_string(), "{ vector: MoveTypeTag[] | struct: StructTag }");
        let tuple = SchemaNode::tuple([SchemaNode::string(), SchemaNode::bytes()]);
        assert_eq!(tuple.to_string(), "[string, bytes]");
        assert_eq!(SchemaNode::map(SchemaNode::string()).to_string(), "{ [key: string]: string }");
        assert_eq!(SchemaNode::any_structure().to_string(), "{ .. }");
    }

    #[test]
    fn references_collected_in_order() {
        let node = SchemaNode::record([
            ("a", SchemaNode::reference("A")),
            ("b", SchemaNode::array(SchemaNode::union([SchemaNode::reference("B"), SchemaNode::Absent]))),
            ("c", SchemaNode::tuple([SchemaNode::reference("C")])),
        ]);
        let mut seen = Vec::new();
        node.for_each_reference(&mut |name| seen.push(name));
        assert_eq!(seen, vec!["A", "B", "C"]);
    }

    #[test]
    fn unguarded_references_stop_at_value_descent() {
        let node = SchemaNode::union([
            SchemaNode::reference("Direct"),
            SchemaNode::array(SchemaNode::reference("Guarded")),
            SchemaNode::union([SchemaNode::reference("Nested")]),
        ]);
        let mut seen = Vec::new();
        node.for_each_unguarded_reference(&mut |name| seen.push(name));
        assert_eq!(seen, vec!["Direct", "Nested"]);
    }
}

//! # Schema Catalog
//!
//! The closed set of named type definitions, keyed by name.
//!
//! A catalog is populated through a [`CatalogBuilder`] and frozen by
//! [`CatalogBuilder::build`], which checks that the table is closed:
//!
//! - every named reference resolves to a definition, and
//! - every reference cycle passes through a node that descends into the
//!   value (record, map, array, tuple, or variant), so recursion is bounded
//!   by the size of the input.
//!
//! A built [`SchemaCatalog`] is immutable. Validators borrow it; it can be
//! shared across threads without coordination.

use std::collections::{BTreeMap, BTreeSet};

use sxg_core::CatalogError;

use crate::node::SchemaNode;

/// Accumulates definitions before they are frozen into a [`SchemaCatalog`].
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    types: BTreeMap<String, SchemaNode>,
}

impl CatalogBuilder {
    /// Start an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `node` under `name`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateDefinition` if `name` is already defined.
    pub fn define(&mut self, name: impl Into<String>, node: SchemaNode) -> Result<&mut Self, CatalogError> {
        let name = name.into();
        if self.types.contains_key(&name) {
            return Err(CatalogError::DuplicateDefinition { name });
        }
        self.types.insert(name, node);
        Ok(self)
    }

    /// Freeze the definitions into a catalog.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::UnresolvedReference` for a reference to an
    /// undefined name, or `CatalogError::UnguardedRecursion` for a cycle that
    /// never descends into the value.
    pub fn build(self) -> Result<SchemaCatalog, CatalogError> {
        for (name, node) in &self.types {
            let mut missing = None;
            node.for_each_reference(&mut |target| {
                if missing.is_none() && !self.types.contains_key(target) {
                    missing = Some(target.to_string());
                }
            });
            if let Some(target) = missing {
                return Err(CatalogError::UnresolvedReference {
                    referrer: name.clone(),
                    target,
                });
            }
        }

        check_guarded_recursion(&self.types)?;

        tracing::debug!(types = self.types.len(), "schema catalog built");
        Ok(SchemaCatalog { types: self.types })
    }
}

/// Reject any cycle in the graph of unguarded references (references reached
/// through other references and union alternatives only).
fn check_guarded_recursion(types: &BTreeMap<String, SchemaNode>) -> Result<(), CatalogError> {
    #[derive(Clone, Copy, PartialEq)]
    enum Mark {
        Visiting,
        Done,
    }

    fn visit<'a>(
        name: &'a str,
        types: &'a BTreeMap<String, SchemaNode>,
        marks: &mut BTreeMap<&'a str, Mark>,
    ) -> Result<(), CatalogError> {
        match marks.get(name) {
            Some(Mark::Done) => return Ok(()),
            Some(Mark::Visiting) => {
                return Err(CatalogError::UnguardedRecursion {
                    name: name.to_string(),
                })
            }
            None => {}
        }
        marks.insert(name, Mark::Visiting);
        if let Some(node) = types.get(name) {
            let mut next = Vec::new();
            node.for_each_unguarded_reference(&mut |target| next.push(target));
            for target in next {
                visit(target, types, marks)?;
            }
        }
        marks.insert(name, Mark::Done);
        Ok(())
    }

    let mut marks = BTreeMap::new();
    for name in types.keys() {
        visit(name, types, &mut marks)?;
    }
    Ok(())
}

/// An immutable, closed table of named schema definitions.
#[derive(Debug, Clone)]
pub struct SchemaCatalog {
    types: BTreeMap<String, SchemaNode>,
}

impl SchemaCatalog {
    /// Start building a catalog.
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::new()
    }

    /// Look up a definition by name.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::UnknownType` if `name` is not defined.
    pub fn resolve(&self, name: &str) -> Result<&SchemaNode, CatalogError> {
        self.types.get(name).ok_or_else(|| CatalogError::UnknownType {
            name: name.to_string(),
        })
    }

    /// Whether `name` is defined.
    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Defined names, sorted alphabetically.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    /// Number of definitions.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether the catalog has no definitions.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Names transitively referenced from `name`, excluding `name` itself
    /// unless it is recursive.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::UnknownType` if `name` is not defined.
    pub fn dependencies(&self, name: &str) -> Result<BTreeSet<&str>, CatalogError> {
        let root = self.resolve(name)?;
        let mut seen = BTreeSet::new();
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            let mut next = Vec::new();
            node.for_each_reference(&mut |target| next.push(target));
            for target in next {
                if seen.insert(target) {
                    // Build guarantees every reference resolves.
                    if let Some(node) = self.types.get(target) {
                        stack.push(node);
                    }
                }
            }
        }
        Ok(seen)
    }
}

//! # sxg-schema: Schema Catalog & Structural Validation
//!
//! Verifies that decoded RPC payloads conform to the recursive type
//! definitions of the Sui gateway protocol before any caller trusts their
//! fields.
//!
//! ## Schema Catalog (`node`, `catalog`)
//!
//! [`SchemaNode`] is the type universe: primitives, literal sets, records,
//! maps, arrays, tuples, ordered unions, tagged variants, and named
//! references. A [`CatalogBuilder`] collects named definitions and freezes
//! them into an immutable [`SchemaCatalog`], rejecting duplicate names,
//! dangling references, and reference cycles that never consume input.
//!
//! ## Validation (`validate`)
//!
//! [`Validator`] borrows a catalog and answers `validate(value, schema)`,
//! a total boolean verdict. [`Validator::check`] returns the first failing
//! location as a [`Mismatch`]; [`Validator::narrow`] returns a typed
//! [`Verified`] witness.
//!
//! ## Gateway Catalog (`gateway`)
//!
//! [`gateway::catalog`] defines the object, transaction, certificate, and
//! effects types; [`gateway::types`] holds one marker per definition.
//!
//! ## Crate Policy
//!
//! - Depends only on `sxg-core` internally.
//! - The catalog is passed explicitly; there is no global registry.
//! - Malformed input is never an error or a panic, only a false verdict.

pub mod catalog;
pub mod gateway;
pub mod node;
pub mod validate;

pub use catalog::{CatalogBuilder, SchemaCatalog};
pub use node::{Field, Primitive, SchemaNode};
pub use validate::{CatalogType, Mismatch, MismatchReason, PathSegment, SchemaRef, Validator, Verified};

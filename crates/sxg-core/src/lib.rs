//! # sxg-core: Foundational Types for SXG
//!
//! This crate is the leaf of the SXG workspace. It defines the value model
//! the validator inspects, the error hierarchy, and validator configuration.
//! It depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Closed value kinds.** Every decoded node is one of the [`ValueKind`]
//!    variants. Structural checks dispatch on that discriminant instead of
//!    probing accessors ad hoc.
//!
//! 2. **Representation-independent introspection.** The validator reads values
//!    through [`DynamicValue`], implemented for `serde_json::Value` and for the
//!    owned [`Value`] tree (which can also carry raw bytes).
//!
//! 3. **Mismatches are not errors.** [`SxgError`] and [`CatalogError`] cover
//!    construction, configuration, and I/O failures only. A payload failing
//!    its schema is an ordinary false verdict.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `sxg-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod config;
pub mod error;
pub mod value;

// Re-export primary types for ergonomic imports.
pub use config::{ValidatorConfig, DEFAULT_MAX_DEPTH, MAX_DEPTH_ENV};
pub use error::{CatalogError, SxgError};
pub use value::{DynamicValue, Value, ValueKind};

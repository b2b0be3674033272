//! # Error Types: Structured Error Hierarchy
//!
//! Defines the error types used throughout SXG. All errors use `thiserror`
//! for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - A payload that does not match its schema is *not* an error here. The
//!   validator reports that as a false verdict (or a `Mismatch` value).
//! - Catalog errors are construction defects. They are detected once, when
//!   the catalog is built, and a process must not serve with a bad catalog.
//! - Configuration and document errors carry the offending path or key.

use thiserror::Error;

/// Top-level error type for SXG.
#[derive(Error, Debug)]
pub enum SxgError {
    /// Schema catalog construction or lookup failed.
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Validator configuration is invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// A document could not be decoded into a value tree.
    #[error("document error for '{path}': {reason}")]
    Document {
        /// Where the document came from (file path or `<stdin>`).
        path: String,
        /// Reason decoding failed.
        reason: String,
    },

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error in schema catalog construction or lookup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// A type name was defined twice.
    #[error("type '{name}' is already defined")]
    DuplicateDefinition {
        /// The duplicated type name.
        name: String,
    },

    /// A type name is not present in the catalog.
    #[error("unknown type '{name}'")]
    UnknownType {
        /// The name that was looked up.
        name: String,
    },

    /// A named reference inside a definition points at no definition.
    #[error("type '{referrer}' references undefined type '{target}'")]
    UnresolvedReference {
        /// The definition containing the reference.
        referrer: String,
        /// The undefined name.
        target: String,
    },

    /// A reference cycle never descends into the value, so validating it
    /// would recurse without consuming input.
    #[error("type '{name}' refers back to itself without descending into the value")]
    UnguardedRecursion {
        /// A type on the cycle.
        name: String,
    },
}

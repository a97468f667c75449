//! Error types for compilation, schema construction, extraction and
//! type mapping.
//!
//! All failures are raised synchronously at the point of detection and
//! propagate uncaught through this crate: the enclosing operation
//! (compile / extract / render DDL) fails atomically.

use crate::types::CanonicalType;

/// Errors raised while compiling a statement tree to SQL text.
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    /// The backend has no rendering for this construct. Unsupported
    /// constructs are never approximated.
    #[error("unsupported construct: {0}")]
    Unsupported(&'static str),

    /// The statement tree itself is malformed (a caller error, not a
    /// backend limitation).
    #[error("invalid statement: {0}")]
    Invalid(&'static str),
}

/// Structural constraint violations while building the schema model.
///
/// Signaled at construction time, never deferred to render time.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// An object name collides with an existing sibling.
    #[error("duplicate {kind} name '{name}'")]
    DuplicateName {
        /// Object kind ("schema", "table", "column", ...).
        kind: &'static str,
        /// The colliding name.
        name: String,
    },

    /// A table can carry at most one primary key.
    #[error("table '{table}' already has a primary key")]
    DuplicatePrimaryKey {
        /// The offending table.
        table: String,
    },

    /// Foreign-key column lists must have equal, non-zero cardinality.
    #[error(
        "foreign key '{name}' has {local} local and {referenced} referenced columns"
    )]
    ForeignKeyColumnMismatch {
        /// Constraint name.
        name: String,
        /// Number of constrained columns.
        local: usize,
        /// Number of referenced columns.
        referenced: usize,
    },

    /// An expression-based index must have exactly one segment.
    #[error("expression index '{name}' must have exactly one segment, got {segments}")]
    ExpressionIndexSegments {
        /// Index name.
        name: String,
        /// Number of segments supplied.
        segments: usize,
    },

    /// A named schema does not exist in the catalog.
    #[error("no schema named '{0}'")]
    UnknownSchema(String),
}

/// Errors raised while extracting a live database's structure.
///
/// Data-integrity errors are fatal: a catalog value that violates an
/// assumed invariant is never defaulted or retried.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// An introspection query failed at the connection level.
    #[error("introspection query failed: {0}")]
    Query(String),

    /// A row is missing an expected column.
    #[error("introspection row has no column {column}")]
    MissingColumn {
        /// Zero-based column index.
        column: usize,
    },

    /// A column held a value of an unexpected kind.
    #[error("introspection column {column}: expected {expected}, got {got}")]
    UnexpectedValue {
        /// Zero-based column index.
        column: usize,
        /// The expected value kind.
        expected: &'static str,
        /// The actual value kind.
        got: &'static str,
    },

    /// A boolean-flag column normalized to something other than 0 or 1.
    #[error("introspection column {column}: flag value {value} is neither 0 nor 1")]
    MalformedFlag {
        /// Zero-based column index.
        column: usize,
        /// The offending value.
        value: i64,
    },

    /// The backend reported a column type code this extractor does not
    /// know.
    #[error("unknown column type code ({major}, {minor})")]
    UnknownTypeCode {
        /// Major type code.
        major: i64,
        /// Minor (subtype) code.
        minor: i64,
    },

    /// An introspection row referenced an object no earlier pass
    /// extracted.
    #[error("introspection row references unknown {kind} '{name}'")]
    UnknownOwner {
        /// Object kind ("table", "view", ...).
        kind: &'static str,
        /// The missing object's name.
        name: String,
    },

    /// Folded rows produced a structurally invalid schema object.
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Type-mapping gaps and marshalling faults.
///
/// A missing mapping entry is a programming error in the mapping
/// tables, not a recoverable condition.
#[derive(Debug, thiserror::Error)]
pub enum TypeMapError {
    /// No storage mapping exists for a canonical type.
    #[error("no storage mapping for canonical type {0:?}")]
    NoMapping(CanonicalType),

    /// A read value had the wrong kind for the requested canonical
    /// type.
    #[error("expected {expected} value, got {got}")]
    ValueKind {
        /// The expected value kind.
        expected: &'static str,
        /// The actual value kind.
        got: &'static str,
    },

    /// A value does not fit the target representation.
    #[error("value {value} out of range for {target}")]
    OutOfRange {
        /// The offending value, rendered for the message.
        value: String,
        /// The target representation.
        target: &'static str,
    },

    /// A stringified value could not be parsed back.
    #[error("cannot parse '{value}' as {target}")]
    Unparseable {
        /// The stored text.
        value: String,
        /// The target type.
        target: &'static str,
    },
}

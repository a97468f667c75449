//! Backend capability descriptors.
//!
//! A [`Capabilities`] value is a plain data record built once per
//! backend, usually as a `static`. Compilation consults it up front
//! and fails with a stable error before emitting any SQL, instead of
//! letting the server reject the statement at execute time.

use crate::types::CanonicalType;

/// Transaction isolation levels a backend accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IsolationLevel {
    /// READ UNCOMMITTED.
    ReadUncommitted,
    /// READ COMMITTED.
    ReadCommitted,
    /// REPEATABLE READ.
    RepeatableRead,
    /// Snapshot isolation.
    Snapshot,
    /// SERIALIZABLE.
    Serializable,
}

/// Which verbs a DDL object kind supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DdlOperations {
    /// CREATE is supported.
    pub create: bool,
    /// ALTER is supported.
    pub alter: bool,
    /// DROP is supported.
    pub drop: bool,
    /// RENAME is supported.
    pub rename: bool,
}

impl DdlOperations {
    /// All four verbs supported.
    pub const ALL: Self = Self {
        create: true,
        alter: true,
        drop: true,
        rename: true,
    };

    /// Everything except RENAME.
    pub const NO_RENAME: Self = Self {
        create: true,
        alter: true,
        drop: true,
        rename: false,
    };
}

/// DDL support, per object kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DdlCapabilities {
    /// Table DDL.
    pub table: DdlOperations,
    /// View DDL.
    pub view: DdlOperations,
    /// Index DDL.
    pub index: DdlOperations,
    /// Sequence DDL.
    pub sequence: DdlOperations,
}

/// Query-surface features a backend may lack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryFeatures {
    /// INTERSECT set operator.
    pub intersect: bool,
    /// EXCEPT set operator.
    pub except: bool,
    /// OVERLAPS predicate.
    pub overlaps: bool,
    /// Shared (read) row locks.
    pub shared_locks: bool,
    /// SKIP LOCKED on locking clauses.
    pub skip_locked: bool,
    /// RETURNING clause on DML.
    pub returning: bool,
}

/// Static description of what a backend can do.
///
/// Constructed by backend crates, consulted by the compiler. Fields
/// are public so a descriptor can be written as a `static` literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// Longest accepted identifier, in characters.
    pub max_identifier_length: usize,
    /// Accepted isolation levels.
    pub isolation_levels: &'static [IsolationLevel],
    /// DDL support.
    pub ddl: DdlCapabilities,
    /// Query-surface features.
    pub query: QueryFeatures,
    /// Canonical types with a native mapping.
    pub supported_types: &'static [CanonicalType],
}

impl Capabilities {
    /// A permissive descriptor matching the ANSI rendition: everything
    /// on, generous identifier limit.
    #[must_use]
    pub const fn ansi() -> Self {
        Self {
            max_identifier_length: 128,
            isolation_levels: &[
                IsolationLevel::ReadUncommitted,
                IsolationLevel::ReadCommitted,
                IsolationLevel::RepeatableRead,
                IsolationLevel::Snapshot,
                IsolationLevel::Serializable,
            ],
            ddl: DdlCapabilities {
                table: DdlOperations::ALL,
                view: DdlOperations::ALL,
                index: DdlOperations::ALL,
                sequence: DdlOperations::ALL,
            },
            query: QueryFeatures {
                intersect: true,
                except: true,
                overlaps: true,
                shared_locks: true,
                skip_locked: true,
                returning: true,
            },
            supported_types: &[
                CanonicalType::Bool,
                CanonicalType::Int16,
                CanonicalType::Int32,
                CanonicalType::Int64,
                CanonicalType::UInt32,
                CanonicalType::UInt64,
                CanonicalType::Float32,
                CanonicalType::Float64,
                CanonicalType::Decimal,
                CanonicalType::Char,
                CanonicalType::String,
                CanonicalType::Bytes,
                CanonicalType::Guid,
                CanonicalType::Date,
                CanonicalType::Time,
                CanonicalType::DateTime,
                CanonicalType::Duration,
            ],
        }
    }

    /// Whether the backend accepts `level`.
    #[must_use]
    pub fn supports_isolation(&self, level: IsolationLevel) -> bool {
        self.isolation_levels.contains(&level)
    }

    /// Whether the backend has a native mapping for `ty`.
    #[must_use]
    pub fn supports_type(&self, ty: CanonicalType) -> bool {
        self.supported_types.contains(&ty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ansi_descriptor_is_permissive() {
        let caps = Capabilities::ansi();
        assert!(caps.query.intersect);
        assert!(caps.ddl.table.rename);
        assert!(caps.supports_type(CanonicalType::Guid));
        assert!(caps.supports_isolation(IsolationLevel::Serializable));
    }
}

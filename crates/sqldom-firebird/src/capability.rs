//! What Firebird 2.5 can and cannot do.

use sqldom_core::capability::{
    Capabilities, DdlCapabilities, DdlOperations, IsolationLevel, QueryFeatures,
};
use sqldom_core::types::CanonicalType;

static FIREBIRD: Capabilities = Capabilities {
    max_identifier_length: 31,
    isolation_levels: &[
        IsolationLevel::ReadCommitted,
        IsolationLevel::Snapshot,
        IsolationLevel::Serializable,
    ],
    ddl: DdlCapabilities {
        table: DdlOperations::NO_RENAME,
        view: DdlOperations::NO_RENAME,
        index: DdlOperations::NO_RENAME,
        sequence: DdlOperations::NO_RENAME,
    },
    query: QueryFeatures {
        intersect: false,
        except: false,
        overlaps: false,
        shared_locks: false,
        skip_locked: false,
        returning: true,
    },
    // Every canonical type is storable, several only through the type
    // mapper's compensating representations.
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
};

/// Returns the Firebird capability descriptor.
#[must_use]
pub fn capabilities() -> &'static Capabilities {
    &FIREBIRD
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_limit_is_31() {
        assert_eq!(capabilities().max_identifier_length, 31);
    }

    #[test]
    fn missing_query_features() {
        let query = &capabilities().query;
        assert!(!query.intersect);
        assert!(!query.except);
        assert!(!query.overlaps);
        assert!(!query.shared_locks);
        assert!(!query.skip_locked);
        assert!(query.returning);
    }

    #[test]
    fn nothing_renames() {
        let ddl = &capabilities().ddl;
        assert!(!ddl.table.rename);
        assert!(!ddl.view.rename);
        assert!(!ddl.index.rename);
        assert!(!ddl.sequence.rename);
    }
}

//! Table constraints.

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;

/// Foreign-key referential action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ReferentialAction {
    /// No action.
    #[default]
    NoAction,
    /// Restrict the operation.
    Restrict,
    /// Cascade the operation.
    Cascade,
    /// Set referencing columns to NULL.
    SetNull,
    /// Set referencing columns to their default.
    SetDefault,
}

impl ReferentialAction {
    /// Returns the SQL spelling of the action.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::NoAction => "NO ACTION",
            Self::Restrict => "RESTRICT",
            Self::Cascade => "CASCADE",
            Self::SetNull => "SET NULL",
            Self::SetDefault => "SET DEFAULT",
        }
    }
}

/// A primary-key or unique constraint: an ordered column list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyConstraint {
    /// Constraint name.
    pub name: String,
    /// Constrained columns, in key order.
    pub columns: Vec<String>,
}

/// A foreign-key constraint.
///
/// Local and referenced column lists have equal, positionally-matched
/// cardinality, validated at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForeignKey {
    name: String,
    columns: Vec<String>,
    referenced_table: String,
    referenced_columns: Vec<String>,
    on_delete: ReferentialAction,
    on_update: ReferentialAction,
    deferrable: bool,
    initially_deferred: bool,
}

impl ForeignKey {
    /// Creates a foreign key, validating column-list cardinality.
    pub fn new(
        name: impl Into<String>,
        columns: Vec<String>,
        referenced_table: impl Into<String>,
        referenced_columns: Vec<String>,
        on_delete: ReferentialAction,
        on_update: ReferentialAction,
    ) -> Result<Self, SchemaError> {
        let name = name.into();
        if columns.is_empty() || columns.len() != referenced_columns.len() {
            return Err(SchemaError::ForeignKeyColumnMismatch {
                name,
                local: columns.len(),
                referenced: referenced_columns.len(),
            });
        }
        Ok(Self {
            name,
            columns,
            referenced_table: referenced_table.into(),
            referenced_columns,
            on_delete,
            on_update,
            deferrable: false,
            initially_deferred: false,
        })
    }

    /// Sets deferrability.
    #[must_use]
    pub fn deferred(mut self, deferrable: bool, initially_deferred: bool) -> Self {
        self.deferrable = deferrable;
        self.initially_deferred = initially_deferred;
        self
    }

    /// Returns the constraint name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the constrained columns, in order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns the referenced table name.
    #[must_use]
    pub fn referenced_table(&self) -> &str {
        &self.referenced_table
    }

    /// Returns the referenced columns, positionally matching
    /// [`columns`](Self::columns).
    #[must_use]
    pub fn referenced_columns(&self) -> &[String] {
        &self.referenced_columns
    }

    /// Returns the ON DELETE action.
    #[must_use]
    pub fn on_delete(&self) -> ReferentialAction {
        self.on_delete
    }

    /// Returns the ON UPDATE action.
    #[must_use]
    pub fn on_update(&self) -> ReferentialAction {
        self.on_update
    }

    /// Whether the constraint is deferrable.
    #[must_use]
    pub fn is_deferrable(&self) -> bool {
        self.deferrable
    }

    /// Whether the constraint is initially deferred.
    #[must_use]
    pub fn is_initially_deferred(&self) -> bool {
        self.initially_deferred
    }
}

/// A check constraint with its condition stored as native SQL text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckConstraint {
    /// Constraint name.
    pub name: String,
    /// The checked condition.
    pub condition: String,
}

/// A table constraint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Constraint {
    /// Primary key (at most one per table).
    PrimaryKey(KeyConstraint),
    /// Unique constraint.
    Unique(KeyConstraint),
    /// Foreign key.
    ForeignKey(ForeignKey),
    /// Check constraint.
    Check(CheckConstraint),
}

impl Constraint {
    /// Returns the constraint name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::PrimaryKey(k) | Self::Unique(k) => &k.name,
            Self::ForeignKey(fk) => fk.name(),
            Self::Check(c) => &c.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn foreign_key_cardinality_mismatch_rejected() {
        let err = ForeignKey::new(
            "fk_lines_orders",
            vec![String::from("order_id"), String::from("order_rev")],
            "orders",
            vec![String::from("id")],
            ReferentialAction::Cascade,
            ReferentialAction::NoAction,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            SchemaError::ForeignKeyColumnMismatch {
                local: 2,
                referenced: 1,
                ..
            }
        ));
    }

    #[test]
    fn two_column_foreign_key_matches_positionally() {
        let fk = ForeignKey::new(
            "fk_lines_orders",
            vec![String::from("order_id"), String::from("order_rev")],
            "orders",
            vec![String::from("id"), String::from("rev")],
            ReferentialAction::Cascade,
            ReferentialAction::NoAction,
        )
        .unwrap();
        assert_eq!(fk.columns().len(), fk.referenced_columns().len());
        assert_eq!(fk.columns()[0], "order_id");
        assert_eq!(fk.referenced_columns()[0], "id");
        assert_eq!(fk.columns()[1], "order_rev");
        assert_eq!(fk.referenced_columns()[1], "rev");
    }

    #[test]
    fn empty_foreign_key_rejected() {
        let err = ForeignKey::new(
            "fk_empty",
            vec![],
            "orders",
            vec![],
            ReferentialAction::NoAction,
            ReferentialAction::NoAction,
        )
        .unwrap_err();
        assert!(matches!(err, SchemaError::ForeignKeyColumnMismatch { .. }));
    }
}

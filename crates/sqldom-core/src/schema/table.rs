//! Tables and columns.

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;
use crate::types::SqlType;

use super::constraint::{Constraint, KeyConstraint};
use super::index::Index;

/// Table persistence scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TableScope {
    /// An ordinary persistent table.
    #[default]
    Permanent,
    /// A global temporary table.
    GlobalTemporary {
        /// Whether rows survive commit (session scope) or are deleted
        /// at commit (transaction scope).
        preserve_rows: bool,
    },
}

/// A table: ordered columns (position = ordinal), indexes and
/// constraints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    name: String,
    scope: TableScope,
    columns: Vec<Column>,
    indexes: Vec<Index>,
    constraints: Vec<Constraint>,
}

impl Table {
    /// Creates an empty permanent table.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scope: TableScope::Permanent,
            columns: Vec::new(),
            indexes: Vec::new(),
            constraints: Vec::new(),
        }
    }

    /// Sets the persistence scope.
    #[must_use]
    pub fn with_scope(mut self, scope: TableScope) -> Self {
        self.scope = scope;
        self
    }

    /// Returns the table name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the persistence scope.
    #[must_use]
    pub fn scope(&self) -> TableScope {
        self.scope
    }

    /// Appends a column, rejecting duplicate names. Ordinals are the
    /// append order: contiguous from 1.
    pub fn add_column(&mut self, column: Column) -> Result<(), SchemaError> {
        if self.columns.iter().any(|c| c.name == column.name) {
            return Err(SchemaError::DuplicateName {
                kind: "column",
                name: column.name,
            });
        }
        self.columns.push(column);
        Ok(())
    }

    /// Returns the columns in ordinal order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Looks up a column by name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Returns a column's 1-based ordinal position.
    #[must_use]
    pub fn column_ordinal(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name).map(|i| i + 1)
    }

    /// Adds an index, rejecting duplicate names.
    pub fn add_index(&mut self, index: Index) -> Result<(), SchemaError> {
        if self.indexes.iter().any(|i| i.name() == index.name()) {
            return Err(SchemaError::DuplicateName {
                kind: "index",
                name: index.name().to_string(),
            });
        }
        self.indexes.push(index);
        Ok(())
    }

    /// Returns the indexes.
    #[must_use]
    pub fn indexes(&self) -> &[Index] {
        &self.indexes
    }

    /// Adds a constraint, rejecting duplicate names and a second
    /// primary key.
    pub fn add_constraint(&mut self, constraint: Constraint) -> Result<(), SchemaError> {
        if matches!(constraint, Constraint::PrimaryKey(_)) && self.primary_key().is_some() {
            return Err(SchemaError::DuplicatePrimaryKey {
                table: self.name.clone(),
            });
        }
        if self.constraints.iter().any(|c| c.name() == constraint.name()) {
            return Err(SchemaError::DuplicateName {
                kind: "constraint",
                name: constraint.name().to_string(),
            });
        }
        self.constraints.push(constraint);
        Ok(())
    }

    /// Returns the constraints.
    #[must_use]
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Returns the primary key, if the table has one.
    #[must_use]
    pub fn primary_key(&self) -> Option<&KeyConstraint> {
        self.constraints.iter().find_map(|c| match c {
            Constraint::PrimaryKey(key) => Some(key),
            _ => None,
        })
    }
}

/// A column: name, storage type, nullability and an optional default
/// expression stored as native SQL text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Column name.
    pub name: String,
    /// Storage type.
    pub sql_type: SqlType,
    /// Whether the column accepts NULL.
    pub nullable: bool,
    /// Default expression, if any.
    pub default: Option<String>,
}

impl Column {
    /// Creates a nullable column with no default.
    #[must_use]
    pub fn new(name: impl Into<String>, sql_type: SqlType) -> Self {
        Self {
            name: name.into(),
            sql_type,
            nullable: true,
            default: None,
        }
    }

    /// Marks the column NOT NULL.
    #[must_use]
    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Sets the default expression.
    #[must_use]
    pub fn with_default(mut self, expr: impl Into<String>) -> Self {
        self.default = Some(expr.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Constraint;

    #[test]
    fn column_ordinals_follow_append_order() {
        let mut table = Table::new("orders");
        table.add_column(Column::new("id", SqlType::Bigint)).unwrap();
        table
            .add_column(Column::new("total", SqlType::Integer))
            .unwrap();
        assert_eq!(table.column_ordinal("id"), Some(1));
        assert_eq!(table.column_ordinal("total"), Some(2));
    }

    #[test]
    fn duplicate_column_rejected() {
        let mut table = Table::new("orders");
        table.add_column(Column::new("id", SqlType::Bigint)).unwrap();
        let err = table
            .add_column(Column::new("id", SqlType::Integer))
            .unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateName { kind: "column", .. }));
    }

    #[test]
    fn second_primary_key_rejected() {
        let mut table = Table::new("orders");
        table
            .add_constraint(Constraint::PrimaryKey(KeyConstraint {
                name: String::from("pk_orders"),
                columns: vec![String::from("id")],
            }))
            .unwrap();
        let err = table
            .add_constraint(Constraint::PrimaryKey(KeyConstraint {
                name: String::from("pk_orders_2"),
                columns: vec![String::from("total")],
            }))
            .unwrap_err();
        assert!(matches!(err, SchemaError::DuplicatePrimaryKey { .. }));
    }
}

//! DDL statement AST types.
//!
//! DDL nodes reference the schema model directly, so a catalog built
//! by an extractor can be fed straight back into a compiler.

use crate::schema::{Column, Constraint, Index, Sequence, Table, View};

/// A data-definition statement.
#[derive(Debug, Clone, PartialEq)]
pub enum DdlStatement {
    /// CREATE TABLE from a schema-model table.
    CreateTable {
        /// Schema qualifier.
        schema: Option<String>,
        /// The table definition.
        table: Table,
    },
    /// DROP TABLE.
    DropTable {
        /// Schema qualifier.
        schema: Option<String>,
        /// Table name.
        name: String,
    },
    /// RENAME TABLE. Rejected by backends whose capability facts say
    /// tables cannot be renamed.
    RenameTable {
        /// Schema qualifier.
        schema: Option<String>,
        /// Current name.
        old_name: String,
        /// New name.
        new_name: String,
    },
    /// ALTER TABLE ... ADD a column.
    AddColumn {
        /// Schema qualifier.
        schema: Option<String>,
        /// Table name.
        table: String,
        /// The new column.
        column: Column,
    },
    /// ALTER TABLE ... DROP a column.
    DropColumn {
        /// Schema qualifier.
        schema: Option<String>,
        /// Table name.
        table: String,
        /// Column name.
        column: String,
    },
    /// CREATE INDEX from a schema-model index.
    CreateIndex {
        /// Schema qualifier.
        schema: Option<String>,
        /// Table the index covers.
        table: String,
        /// The index definition.
        index: Index,
    },
    /// DROP INDEX.
    DropIndex {
        /// Schema qualifier.
        schema: Option<String>,
        /// Table the index covers (ignored by backends whose indexes
        /// are database-global).
        table: String,
        /// Index name.
        name: String,
    },
    /// ALTER TABLE ... ADD a table constraint.
    AddConstraint {
        /// Schema qualifier.
        schema: Option<String>,
        /// Table name.
        table: String,
        /// The constraint definition.
        constraint: Constraint,
    },
    /// ALTER TABLE ... DROP CONSTRAINT.
    DropConstraint {
        /// Schema qualifier.
        schema: Option<String>,
        /// Table name.
        table: String,
        /// Constraint name.
        name: String,
    },
    /// CREATE SEQUENCE from a schema-model sequence.
    CreateSequence {
        /// Schema qualifier.
        schema: Option<String>,
        /// The sequence definition.
        sequence: Sequence,
    },
    /// ALTER SEQUENCE ... RESTART WITH.
    AlterSequence {
        /// Schema qualifier.
        schema: Option<String>,
        /// Sequence name.
        name: String,
        /// The value to restart from.
        restart_with: i64,
    },
    /// DROP SEQUENCE.
    DropSequence {
        /// Schema qualifier.
        schema: Option<String>,
        /// Sequence name.
        name: String,
    },
    /// CREATE VIEW from a schema-model view.
    CreateView {
        /// Schema qualifier.
        schema: Option<String>,
        /// The view definition.
        view: View,
    },
    /// DROP VIEW.
    DropView {
        /// Schema qualifier.
        schema: Option<String>,
        /// View name.
        name: String,
    },
}

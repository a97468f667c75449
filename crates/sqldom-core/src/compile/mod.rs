//! Statement compilation.
//!
//! A [`Compiler`] walks a statement tree once and renders backend SQL
//! text into a growing output buffer. Default method bodies produce
//! the ANSI rendition; backends override the methods whose structure
//! they disagree with and rewrite unsupported nodes into equivalent
//! supported shapes before re-dispatching through
//! [`Compiler::visit_expr`]. Constructs a backend can neither render
//! nor rewrite fail with [`CompileError::Unsupported`], checked twice:
//! once against the capability descriptor, once at the translator.

use crate::ast::{
    BinaryOp, DateTimeField, DdlStatement, DeleteStatement, Expr, InsertSource,
    InsertStatement, LockClause, LockMode, SelectStatement, SetOperator, Statement,
    TableRef, UnaryOp, UpdateStatement,
};
use crate::capability::Capabilities;
use crate::dialect::Translator;
use crate::error::CompileError;
use crate::schema::{
    Column, Constraint, Index, IndexTarget, ReferentialAction, Sequence, SortOrder,
    Table, TableScope, View,
};

/// The kind of statement a traversal is currently inside.
///
/// Threaded explicitly through the walk; rendering decisions that
/// depend on the enclosing statement read it instead of inspecting an
/// ancestor stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementScope {
    /// Not inside any statement yet.
    Root,
    /// Inside a SELECT.
    Select,
    /// Inside an INSERT.
    Insert,
    /// Inside an UPDATE.
    Update,
    /// Inside a DELETE.
    Delete,
    /// Inside a DDL statement.
    Ddl,
}

/// The product of compilation: finished SQL text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledStatement {
    text: String,
}

impl CompiledStatement {
    /// Returns the SQL text, ready to hand to a connection.
    #[must_use]
    pub fn command_text(&self) -> &str {
        &self.text
    }
}

impl core::fmt::Display for CompiledStatement {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.text)
    }
}

/// One backend's statement-to-text compiler.
pub trait Compiler {
    /// The backend's symbol rules.
    fn translator(&self) -> &dyn Translator;

    /// The backend's capability descriptor.
    fn capabilities(&self) -> &Capabilities;

    /// Compiles a statement tree to SQL text. Fails atomically: on
    /// error the partial buffer is discarded.
    fn compile(&self, statement: &Statement) -> Result<CompiledStatement, CompileError> {
        let mut out = String::new();
        self.visit_statement(&mut out, statement, StatementScope::Root)?;
        Ok(CompiledStatement { text: out })
    }

    /// Dispatches on the statement kind.
    fn visit_statement(
        &self,
        out: &mut String,
        statement: &Statement,
        _scope: StatementScope,
    ) -> Result<(), CompileError> {
        match statement {
            Statement::Select(select) => self.visit_select(out, select),
            Statement::Insert(insert) => self.visit_insert(out, insert),
            Statement::Update(update) => self.visit_update(out, update),
            Statement::Delete(delete) => self.visit_delete(out, delete),
            Statement::Ddl(ddl) => self.visit_ddl(out, ddl),
        }
    }

    /// Renders a SELECT, gating set operators and locking against the
    /// capability descriptor before emitting anything.
    fn visit_select(
        &self,
        out: &mut String,
        select: &SelectStatement,
    ) -> Result<(), CompileError> {
        for set_op in &select.set_ops {
            self.check_set_operator(set_op.op)?;
        }
        if let Some(lock) = &select.lock {
            self.check_lock_clause(lock)?;
        }

        out.push_str("SELECT ");
        if select.distinct {
            out.push_str("DISTINCT ");
        }
        if select.columns.is_empty() {
            out.push('*');
        } else {
            for (i, column) in select.columns.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                self.visit_expr(out, &column.expr, StatementScope::Select)?;
                if let Some(alias) = &column.alias {
                    out.push_str(" AS ");
                    out.push_str(&self.translator().quote_identifier(alias));
                }
            }
        }

        self.visit_from(out, select, StatementScope::Select)?;

        if let Some(predicate) = &select.where_clause {
            out.push_str(" WHERE ");
            self.visit_expr(out, predicate, StatementScope::Select)?;
        }
        if !select.group_by.is_empty() {
            out.push_str(" GROUP BY ");
            for (i, expr) in select.group_by.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                self.visit_expr(out, expr, StatementScope::Select)?;
            }
        }
        if let Some(having) = &select.having {
            out.push_str(" HAVING ");
            self.visit_expr(out, having, StatementScope::Select)?;
        }

        for set_op in &select.set_ops {
            out.push(' ');
            out.push_str(self.translator().set_operator(set_op.op)?);
            if set_op.all {
                out.push_str(" ALL");
            }
            out.push(' ');
            self.visit_select(out, &set_op.query)?;
        }

        if !select.order_by.is_empty() {
            out.push_str(" ORDER BY ");
            for (i, entry) in select.order_by.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                self.visit_expr(out, &entry.expr, StatementScope::Select)?;
                out.push(' ');
                out.push_str(entry.direction.as_str());
            }
        }

        self.visit_row_limit(out, select)?;

        if let Some(lock) = &select.lock {
            out.push(' ');
            out.push_str(&self.translator().lock_clause(lock)?);
        }
        Ok(())
    }

    /// Renders the FROM clause. FROM-less selects render nothing here;
    /// backends that require a FROM substitute their dummy table.
    fn visit_from(
        &self,
        out: &mut String,
        select: &SelectStatement,
        scope: StatementScope,
    ) -> Result<(), CompileError> {
        render_from(self, out, select, scope)
    }

    /// Renders a table reference.
    fn visit_table_ref(
        &self,
        out: &mut String,
        table_ref: &TableRef,
        scope: StatementScope,
    ) -> Result<(), CompileError> {
        render_table_ref(self, out, table_ref, scope)
    }

    /// Renders the paging clauses.
    fn visit_row_limit(
        &self,
        out: &mut String,
        select: &SelectStatement,
    ) -> Result<(), CompileError> {
        render_row_limit(self, out, select)
    }

    /// Renders an INSERT.
    fn visit_insert(
        &self,
        out: &mut String,
        insert: &InsertStatement,
    ) -> Result<(), CompileError> {
        out.push_str("INSERT INTO ");
        out.push_str(
            &self
                .translator()
                .qualified(insert.schema.as_deref(), &insert.table),
        );
        if !insert.columns.is_empty() {
            out.push_str(" (");
            for (i, column) in insert.columns.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                out.push_str(&self.translator().quote_identifier(column));
            }
            out.push(')');
        }
        match &insert.source {
            InsertSource::Values(rows) => {
                if rows.is_empty() {
                    return Err(CompileError::Invalid("INSERT VALUES with no rows"));
                }
                out.push_str(" VALUES ");
                for (r, row) in rows.iter().enumerate() {
                    if r > 0 {
                        out.push_str(", ");
                    }
                    out.push('(');
                    for (i, value) in row.iter().enumerate() {
                        if i > 0 {
                            out.push_str(", ");
                        }
                        self.visit_expr(out, value, StatementScope::Insert)?;
                    }
                    out.push(')');
                }
            }
            InsertSource::Query(table_ref) => {
                out.push(' ');
                self.visit_table_ref(out, table_ref, StatementScope::Insert)?;
            }
            InsertSource::DefaultValues => out.push_str(" DEFAULT VALUES"),
        }
        Ok(())
    }

    /// Renders an UPDATE.
    fn visit_update(
        &self,
        out: &mut String,
        update: &UpdateStatement,
    ) -> Result<(), CompileError> {
        if update.assignments.is_empty() {
            return Err(CompileError::Invalid("UPDATE with no assignments"));
        }
        out.push_str("UPDATE ");
        out.push_str(
            &self
                .translator()
                .qualified(update.schema.as_deref(), &update.table),
        );
        if let Some(alias) = &update.alias {
            out.push(' ');
            out.push_str(&self.translator().quote_identifier(alias));
        }
        out.push_str(" SET ");
        for (i, assignment) in update.assignments.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push_str(&self.translator().quote_identifier(&assignment.column));
            out.push_str(" = ");
            self.visit_expr(out, &assignment.value, StatementScope::Update)?;
        }
        if let Some(predicate) = &update.where_clause {
            out.push_str(" WHERE ");
            self.visit_expr(out, predicate, StatementScope::Update)?;
        }
        Ok(())
    }

    /// Renders a DELETE.
    fn visit_delete(
        &self,
        out: &mut String,
        delete: &DeleteStatement,
    ) -> Result<(), CompileError> {
        out.push_str("DELETE FROM ");
        out.push_str(
            &self
                .translator()
                .qualified(delete.schema.as_deref(), &delete.table),
        );
        if let Some(alias) = &delete.alias {
            out.push(' ');
            out.push_str(&self.translator().quote_identifier(alias));
        }
        if let Some(predicate) = &delete.where_clause {
            out.push_str(" WHERE ");
            self.visit_expr(out, predicate, StatementScope::Delete)?;
        }
        Ok(())
    }

    /// Dispatches a DDL statement, gating verbs the capability
    /// descriptor declares missing.
    fn visit_ddl(&self, out: &mut String, ddl: &DdlStatement) -> Result<(), CompileError> {
        match ddl {
            DdlStatement::CreateTable { schema, table } => {
                self.create_table(out, schema.as_deref(), table)
            }
            DdlStatement::DropTable { schema, name } => {
                out.push_str("DROP TABLE ");
                out.push_str(&self.translator().qualified(schema.as_deref(), name));
                Ok(())
            }
            DdlStatement::RenameTable {
                schema,
                old_name,
                new_name,
            } => {
                if !self.capabilities().ddl.table.rename {
                    return Err(CompileError::Unsupported("RENAME TABLE"));
                }
                self.rename_table(out, schema.as_deref(), old_name, new_name)
            }
            DdlStatement::AddColumn {
                schema,
                table,
                column,
            } => {
                out.push_str("ALTER TABLE ");
                out.push_str(&self.translator().qualified(schema.as_deref(), table));
                out.push_str(" ADD ");
                self.column_definition(out, column)
            }
            DdlStatement::DropColumn {
                schema,
                table,
                column,
            } => {
                out.push_str("ALTER TABLE ");
                out.push_str(&self.translator().qualified(schema.as_deref(), table));
                out.push_str(" DROP ");
                out.push_str(self.drop_column_keyword());
                out.push_str(&self.translator().quote_identifier(column));
                Ok(())
            }
            DdlStatement::CreateIndex {
                schema,
                table,
                index,
            } => self.create_index(out, schema.as_deref(), table, index),
            DdlStatement::DropIndex {
                schema,
                table,
                name,
            } => self.drop_index(out, schema.as_deref(), table, name),
            DdlStatement::AddConstraint {
                schema,
                table,
                constraint,
            } => {
                out.push_str("ALTER TABLE ");
                out.push_str(&self.translator().qualified(schema.as_deref(), table));
                out.push_str(" ADD ");
                self.table_constraint(out, constraint)
            }
            DdlStatement::DropConstraint {
                schema,
                table,
                name,
            } => {
                out.push_str("ALTER TABLE ");
                out.push_str(&self.translator().qualified(schema.as_deref(), table));
                out.push_str(" DROP CONSTRAINT ");
                out.push_str(&self.translator().quote_identifier(name));
                Ok(())
            }
            DdlStatement::CreateSequence { schema, sequence } => {
                self.create_sequence(out, schema.as_deref(), sequence)
            }
            DdlStatement::AlterSequence {
                schema,
                name,
                restart_with,
            } => self.alter_sequence(out, schema.as_deref(), name, *restart_with),
            DdlStatement::DropSequence { schema, name } => {
                out.push_str("DROP SEQUENCE ");
                out.push_str(&self.translator().qualified(schema.as_deref(), name));
                Ok(())
            }
            DdlStatement::CreateView { schema, view } => {
                self.create_view(out, schema.as_deref(), view)
            }
            DdlStatement::DropView { schema, name } => {
                out.push_str("DROP VIEW ");
                out.push_str(&self.translator().qualified(schema.as_deref(), name));
                Ok(())
            }
        }
    }

    /// The keyword (if any) between DROP and the column name.
    fn drop_column_keyword(&self) -> &'static str {
        "COLUMN "
    }

    /// Renders CREATE TABLE from a schema-model table.
    fn create_table(
        &self,
        out: &mut String,
        schema: Option<&str>,
        table: &Table,
    ) -> Result<(), CompileError> {
        if table.columns().is_empty() {
            return Err(CompileError::Invalid("CREATE TABLE with no columns"));
        }
        match table.scope() {
            TableScope::Permanent => out.push_str("CREATE TABLE "),
            TableScope::GlobalTemporary { .. } => {
                out.push_str("CREATE GLOBAL TEMPORARY TABLE ");
            }
        }
        out.push_str(&self.translator().qualified(schema, table.name()));
        out.push_str(" (");
        for (i, column) in table.columns().iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            self.column_definition(out, column)?;
        }
        for constraint in table.constraints() {
            out.push_str(", ");
            self.table_constraint(out, constraint)?;
        }
        out.push(')');
        if let TableScope::GlobalTemporary { preserve_rows } = table.scope() {
            out.push_str(if preserve_rows {
                " ON COMMIT PRESERVE ROWS"
            } else {
                " ON COMMIT DELETE ROWS"
            });
        }
        Ok(())
    }

    /// Renders one column definition. DEFAULT precedes NOT NULL; some
    /// backends reject the reverse order.
    fn column_definition(&self, out: &mut String, column: &Column) -> Result<(), CompileError> {
        out.push_str(&self.translator().quote_identifier(&column.name));
        out.push(' ');
        out.push_str(&self.translator().sql_type(&column.sql_type));
        if let Some(default) = &column.default {
            out.push_str(" DEFAULT ");
            out.push_str(default);
        }
        if !column.nullable {
            out.push_str(" NOT NULL");
        }
        Ok(())
    }

    /// Renders one table constraint.
    fn table_constraint(
        &self,
        out: &mut String,
        constraint: &Constraint,
    ) -> Result<(), CompileError> {
        out.push_str("CONSTRAINT ");
        out.push_str(&self.translator().quote_identifier(constraint.name()));
        match constraint {
            Constraint::PrimaryKey(key) => {
                out.push_str(" PRIMARY KEY (");
                self.identifier_list(out, &key.columns);
                out.push(')');
            }
            Constraint::Unique(key) => {
                out.push_str(" UNIQUE (");
                self.identifier_list(out, &key.columns);
                out.push(')');
            }
            Constraint::ForeignKey(fk) => {
                out.push_str(" FOREIGN KEY (");
                self.identifier_list(out, fk.columns());
                out.push_str(") REFERENCES ");
                out.push_str(&self.translator().quote_identifier(fk.referenced_table()));
                out.push_str(" (");
                self.identifier_list(out, fk.referenced_columns());
                out.push(')');
                if fk.on_delete() != ReferentialAction::NoAction {
                    out.push_str(" ON DELETE ");
                    out.push_str(self.translator().referential_action(fk.on_delete()));
                }
                if fk.on_update() != ReferentialAction::NoAction {
                    out.push_str(" ON UPDATE ");
                    out.push_str(self.translator().referential_action(fk.on_update()));
                }
            }
            Constraint::Check(check) => {
                out.push_str(" CHECK (");
                out.push_str(&check.condition);
                out.push(')');
            }
        }
        Ok(())
    }

    /// Renders a comma-separated quoted identifier list.
    fn identifier_list(&self, out: &mut String, names: &[String]) {
        for (i, name) in names.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push_str(&self.translator().quote_identifier(name));
        }
    }

    /// Renders CREATE INDEX.
    fn create_index(
        &self,
        out: &mut String,
        schema: Option<&str>,
        table: &str,
        index: &Index,
    ) -> Result<(), CompileError> {
        render_create_index(self, out, schema, table, index)
    }

    /// Renders DROP INDEX.
    fn drop_index(
        &self,
        out: &mut String,
        schema: Option<&str>,
        _table: &str,
        name: &str,
    ) -> Result<(), CompileError> {
        out.push_str("DROP INDEX ");
        out.push_str(&self.translator().qualified(schema, name));
        Ok(())
    }

    /// Renders CREATE SEQUENCE.
    fn create_sequence(
        &self,
        out: &mut String,
        schema: Option<&str>,
        sequence: &Sequence,
    ) -> Result<(), CompileError> {
        out.push_str("CREATE SEQUENCE ");
        out.push_str(&self.translator().qualified(schema, &sequence.name));
        if let Some(start) = sequence.descriptor.current_value {
            out.push_str(" START WITH ");
            out.push_str(&start.to_string());
        }
        if sequence.descriptor.increment != 1 {
            out.push_str(" INCREMENT BY ");
            out.push_str(&sequence.descriptor.increment.to_string());
        }
        if let Some(min) = sequence.descriptor.min_value {
            out.push_str(" MINVALUE ");
            out.push_str(&min.to_string());
        }
        Ok(())
    }

    /// Renders ALTER SEQUENCE ... RESTART WITH.
    fn alter_sequence(
        &self,
        out: &mut String,
        schema: Option<&str>,
        name: &str,
        restart_with: i64,
    ) -> Result<(), CompileError> {
        out.push_str("ALTER SEQUENCE ");
        out.push_str(&self.translator().qualified(schema, name));
        out.push_str(" RESTART WITH ");
        out.push_str(&restart_with.to_string());
        Ok(())
    }

    /// Renders RENAME TABLE.
    fn rename_table(
        &self,
        out: &mut String,
        schema: Option<&str>,
        old_name: &str,
        new_name: &str,
    ) -> Result<(), CompileError> {
        out.push_str("ALTER TABLE ");
        out.push_str(&self.translator().qualified(schema, old_name));
        out.push_str(" RENAME TO ");
        out.push_str(&self.translator().quote_identifier(new_name));
        Ok(())
    }

    /// Renders CREATE VIEW.
    fn create_view(
        &self,
        out: &mut String,
        schema: Option<&str>,
        view: &View,
    ) -> Result<(), CompileError> {
        let Some(definition) = &view.definition else {
            return Err(CompileError::Invalid("CREATE VIEW without a definition"));
        };
        out.push_str("CREATE VIEW ");
        out.push_str(&self.translator().qualified(schema, &view.name));
        if !view.columns.is_empty() {
            out.push_str(" (");
            self.identifier_list(out, &view.columns);
            out.push(')');
        }
        out.push_str(" AS ");
        out.push_str(definition);
        Ok(())
    }

    /// Renders an expression.
    fn visit_expr(
        &self,
        out: &mut String,
        expr: &Expr,
        scope: StatementScope,
    ) -> Result<(), CompileError> {
        match expr {
            Expr::Literal(literal) => {
                out.push_str(&self.translator().literal(literal)?);
                Ok(())
            }
            Expr::Column { table, name } => {
                if let Some(table) = table {
                    out.push_str(&self.translator().quote_identifier(table));
                    out.push('.');
                }
                out.push_str(&self.translator().quote_identifier(name));
                Ok(())
            }
            Expr::Binary { left, op, right } => self.visit_binary(out, left, *op, right, scope),
            Expr::Unary { op, operand } => self.visit_unary(out, *op, operand, scope),
            Expr::Function(call) => {
                out.push_str(&call.name);
                out.push('(');
                if call.distinct {
                    out.push_str("DISTINCT ");
                }
                for (i, arg) in call.args.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    self.visit_expr(out, arg, scope)?;
                }
                out.push(')');
                Ok(())
            }
            Expr::Extract {
                field,
                expr,
                compensated,
            } => self.visit_extract(out, *field, expr, *compensated, scope),
            Expr::Case {
                operand,
                when_clauses,
                else_clause,
            } => {
                if when_clauses.is_empty() {
                    return Err(CompileError::Invalid("CASE with no WHEN clauses"));
                }
                out.push_str("CASE");
                if let Some(operand) = operand {
                    out.push(' ');
                    self.visit_expr(out, operand, scope)?;
                }
                for (when, then) in when_clauses {
                    out.push_str(" WHEN ");
                    self.visit_expr(out, when, scope)?;
                    out.push_str(" THEN ");
                    self.visit_expr(out, then, scope)?;
                }
                if let Some(else_clause) = else_clause {
                    out.push_str(" ELSE ");
                    self.visit_expr(out, else_clause, scope)?;
                }
                out.push_str(" END");
                Ok(())
            }
            Expr::Cast { expr, data_type } => {
                out.push_str("CAST(");
                self.visit_expr(out, expr, scope)?;
                out.push_str(" AS ");
                out.push_str(&self.translator().sql_type(data_type));
                out.push(')');
                Ok(())
            }
            Expr::IsNull { expr, negated } => {
                self.visit_expr(out, expr, scope)?;
                out.push_str(if *negated { " IS NOT NULL" } else { " IS NULL" });
                Ok(())
            }
            Expr::In {
                expr,
                list,
                negated,
            } => {
                if list.is_empty() {
                    return Err(CompileError::Invalid("IN with an empty list"));
                }
                self.visit_expr(out, expr, scope)?;
                out.push_str(if *negated { " NOT IN (" } else { " IN (" });
                for (i, item) in list.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    self.visit_expr(out, item, scope)?;
                }
                out.push(')');
                Ok(())
            }
            Expr::Between {
                expr,
                low,
                high,
                negated,
            } => {
                self.visit_expr(out, expr, scope)?;
                out.push_str(if *negated { " NOT BETWEEN " } else { " BETWEEN " });
                self.visit_expr(out, low, scope)?;
                out.push_str(" AND ");
                self.visit_expr(out, high, scope)?;
                Ok(())
            }
            Expr::Subquery(query) => {
                out.push('(');
                self.visit_select(out, query)?;
                out.push(')');
                Ok(())
            }
            Expr::Paren(inner) => {
                out.push('(');
                self.visit_expr(out, inner, scope)?;
                out.push(')');
                Ok(())
            }
            Expr::Parameter { name, position: _ } => {
                match name {
                    Some(name) => {
                        out.push(':');
                        out.push_str(name);
                    }
                    None => out.push('?'),
                }
                Ok(())
            }
            Expr::Wildcard { table } => {
                if let Some(table) = table {
                    out.push_str(&self.translator().quote_identifier(table));
                    out.push('.');
                }
                out.push('*');
                Ok(())
            }
            Expr::NextValue {
                sequence,
                increment,
            } => {
                out.push_str(self.translator().next_value_open());
                out.push_str(&self.translator().quote_identifier(sequence));
                out.push_str(&self.translator().next_value_close(*increment));
                Ok(())
            }
            Expr::Raw(text) => {
                out.push_str(text);
                Ok(())
            }
        }
    }

    /// Renders a binary expression.
    fn visit_binary(
        &self,
        out: &mut String,
        left: &Expr,
        op: BinaryOp,
        right: &Expr,
        scope: StatementScope,
    ) -> Result<(), CompileError> {
        render_binary(self, out, left, op, right, scope)
    }

    /// Renders a unary expression.
    fn visit_unary(
        &self,
        out: &mut String,
        op: UnaryOp,
        operand: &Expr,
        scope: StatementScope,
    ) -> Result<(), CompileError> {
        render_unary(self, out, op, operand, scope)
    }

    /// Renders an EXTRACT expression.
    fn visit_extract(
        &self,
        out: &mut String,
        field: DateTimeField,
        expr: &Expr,
        _compensated: bool,
        scope: StatementScope,
    ) -> Result<(), CompileError> {
        render_extract(self, out, field, expr, scope)
    }

    /// Fails when the capability descriptor lacks a set operator.
    fn check_set_operator(&self, op: SetOperator) -> Result<(), CompileError> {
        let query = &self.capabilities().query;
        match op {
            SetOperator::Intersect if !query.intersect => {
                Err(CompileError::Unsupported("INTERSECT"))
            }
            SetOperator::Except if !query.except => Err(CompileError::Unsupported("EXCEPT")),
            _ => Ok(()),
        }
    }

    /// Fails when the capability descriptor lacks the requested lock.
    fn check_lock_clause(&self, lock: &LockClause) -> Result<(), CompileError> {
        let query = &self.capabilities().query;
        if lock.mode == LockMode::Share && !query.shared_locks {
            return Err(CompileError::Unsupported("shared row locks"));
        }
        if lock.skip_locked && !query.skip_locked {
            return Err(CompileError::Unsupported("SKIP LOCKED"));
        }
        Ok(())
    }
}

/// Whether `child` needs parentheses as the `right`-hand operand of
/// `parent`.
fn needs_parens(child: &Expr, parent: BinaryOp, right: bool) -> bool {
    match child {
        Expr::Binary { op, .. } => {
            let child_prec = op.precedence();
            let parent_prec = parent.precedence();
            child_prec < parent_prec || (right && child_prec == parent_prec)
        }
        _ => false,
    }
}

/// Renders `left op right` with precedence-driven parentheses. The
/// ANSI body behind [`Compiler::visit_binary`]; backend overrides fall
/// back here for operators they do not rewrite.
pub fn render_binary<C: Compiler + ?Sized>(
    compiler: &C,
    out: &mut String,
    left: &Expr,
    op: BinaryOp,
    right: &Expr,
    scope: StatementScope,
) -> Result<(), CompileError> {
    let spelled = compiler.translator().binary_operator(op)?;
    if needs_parens(left, op, false) {
        out.push('(');
        compiler.visit_expr(out, left, scope)?;
        out.push(')');
    } else {
        compiler.visit_expr(out, left, scope)?;
    }
    out.push(' ');
    out.push_str(spelled);
    out.push(' ');
    if needs_parens(right, op, true) {
        out.push('(');
        compiler.visit_expr(out, right, scope)?;
        out.push(')');
    } else {
        compiler.visit_expr(out, right, scope)?;
    }
    Ok(())
}

/// The ANSI body behind [`Compiler::visit_unary`].
pub fn render_unary<C: Compiler + ?Sized>(
    compiler: &C,
    out: &mut String,
    op: UnaryOp,
    operand: &Expr,
    scope: StatementScope,
) -> Result<(), CompileError> {
    out.push_str(compiler.translator().unary_operator(op));
    match op {
        UnaryOp::Not => out.push(' '),
        UnaryOp::Neg | UnaryOp::BitNot => {}
    }
    if matches!(operand, Expr::Binary { .. }) {
        out.push('(');
        compiler.visit_expr(out, operand, scope)?;
        out.push(')');
    } else {
        compiler.visit_expr(out, operand, scope)?;
    }
    Ok(())
}

/// The ANSI body behind [`Compiler::visit_extract`].
pub fn render_extract<C: Compiler + ?Sized>(
    compiler: &C,
    out: &mut String,
    field: DateTimeField,
    expr: &Expr,
    scope: StatementScope,
) -> Result<(), CompileError> {
    out.push_str("EXTRACT(");
    out.push_str(compiler.translator().extract_field(field));
    out.push_str(" FROM ");
    compiler.visit_expr(out, expr, scope)?;
    out.push(')');
    Ok(())
}

/// The ANSI body behind [`Compiler::visit_from`].
pub fn render_from<C: Compiler + ?Sized>(
    compiler: &C,
    out: &mut String,
    select: &SelectStatement,
    scope: StatementScope,
) -> Result<(), CompileError> {
    if let Some(from) = &select.from {
        out.push_str(" FROM ");
        compiler.visit_table_ref(out, from, scope)?;
    }
    Ok(())
}

/// The ANSI body behind [`Compiler::visit_table_ref`].
///
/// A query reference that is the source of an INSERT renders bare:
/// neither parentheses nor an alias are legal there.
pub fn render_table_ref<C: Compiler + ?Sized>(
    compiler: &C,
    out: &mut String,
    table_ref: &TableRef,
    scope: StatementScope,
) -> Result<(), CompileError> {
    match table_ref {
        TableRef::Table {
            schema,
            name,
            alias,
        } => {
            out.push_str(&compiler.translator().qualified(schema.as_deref(), name));
            if let Some(alias) = alias {
                out.push(' ');
                out.push_str(&compiler.translator().quote_identifier(alias));
            }
            Ok(())
        }
        TableRef::Subquery { query, alias } => {
            if scope == StatementScope::Insert {
                compiler.visit_select(out, query)
            } else {
                out.push('(');
                compiler.visit_select(out, query)?;
                out.push_str(") ");
                out.push_str(&compiler.translator().quote_identifier(alias));
                Ok(())
            }
        }
        TableRef::Join { left, join } => {
            compiler.visit_table_ref(out, left, scope)?;
            out.push(' ');
            out.push_str(join.join_type.as_str());
            out.push(' ');
            compiler.visit_table_ref(out, &join.table, scope)?;
            if let Some(on) = &join.on {
                out.push_str(" ON ");
                compiler.visit_expr(out, on, scope)?;
            }
            Ok(())
        }
    }
}

/// The ANSI body behind [`Compiler::visit_row_limit`]: LIMIT then
/// OFFSET.
pub fn render_row_limit<C: Compiler + ?Sized>(
    compiler: &C,
    out: &mut String,
    select: &SelectStatement,
) -> Result<(), CompileError> {
    if let Some(limit) = &select.limit {
        out.push_str(" LIMIT ");
        compiler.visit_expr(out, limit, StatementScope::Select)?;
    }
    if let Some(offset) = &select.offset {
        out.push_str(" OFFSET ");
        compiler.visit_expr(out, offset, StatementScope::Select)?;
    }
    Ok(())
}

/// The ANSI body behind [`Compiler::create_index`]: expression
/// segments render as a parenthesized expression.
pub fn render_create_index<C: Compiler + ?Sized>(
    compiler: &C,
    out: &mut String,
    schema: Option<&str>,
    table: &str,
    index: &Index,
) -> Result<(), CompileError> {
    out.push_str("CREATE ");
    if index.is_unique() {
        out.push_str("UNIQUE ");
    }
    out.push_str("INDEX ");
    out.push_str(&compiler.translator().quote_identifier(index.name()));
    out.push_str(" ON ");
    out.push_str(&compiler.translator().qualified(schema, table));
    out.push_str(" (");
    for (i, segment) in index.segments().iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        match &segment.target {
            IndexTarget::Column(name) => {
                out.push_str(&compiler.translator().quote_identifier(name));
            }
            IndexTarget::Expression(text) => {
                out.push('(');
                out.push_str(text);
                out.push(')');
            }
        }
        if segment.order == SortOrder::Descending {
            out.push(' ');
            out.push_str(SortOrder::Descending.as_sql());
        }
    }
    out.push(')');
    Ok(())
}

/// The ANSI rendition of the compiler: every default, no overrides.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnsiCompiler {
    translator: crate::dialect::AnsiTranslator,
}

static ANSI_CAPABILITIES: Capabilities = Capabilities::ansi();

impl Compiler for AnsiCompiler {
    fn translator(&self) -> &dyn Translator {
        &self.translator
    }

    fn capabilities(&self) -> &Capabilities {
        &ANSI_CAPABILITIES
    }
}

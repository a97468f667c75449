//! Firebird statement compilation.
//!
//! Firebird 2.5 lacks bitwise operators, `%`, datetime arithmetic,
//! LIMIT/OFFSET and FROM-less selects. Each gap is closed by
//! rewriting the offending node into an equivalent supported shape
//! and re-dispatching the rewritten subtree through
//! [`Compiler::visit_expr`], so nested gaps (a `MOD` inside a
//! datetime rewrite, say) are closed by the same machinery. Rewrites
//! are reentrancy-safe: nodes that must not be rewritten twice carry
//! a marker set by the first pass.

use sqldom_core::ast::{
    BinaryOp, DateTimeField, Expr, FunctionCall, Literal, SelectStatement, UnaryOp,
};
use sqldom_core::capability::Capabilities;
use sqldom_core::compile::{
    render_binary, render_extract, render_from, render_unary, Compiler, CompiledStatement,
    StatementScope,
};
use sqldom_core::dialect::Translator;
use sqldom_core::error::CompileError;
use sqldom_core::schema::{IndexTarget, Sequence, SortOrder};
use sqldom_core::Statement;

use crate::capability;
use crate::dialect::FirebirdTranslator;

/// 100ns ticks per day.
const TICKS_PER_DAY: i64 = 864_000_000_000;
/// 100ns ticks per millisecond.
const TICKS_PER_MILLISECOND: i64 = 10_000;

/// Statement compiler for Firebird 2.5.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirebirdCompiler {
    translator: FirebirdTranslator,
}

impl FirebirdCompiler {
    /// Compiles a statement tree to Firebird SQL.
    pub fn compile_statement(
        &self,
        statement: &Statement,
    ) -> Result<CompiledStatement, CompileError> {
        self.compile(statement)
    }
}

fn call(name: &str, args: Vec<Expr>) -> Expr {
    Expr::Function(FunctionCall::new(name, args))
}

fn datediff(unit: &str, from: Expr, to: Expr) -> Expr {
    call("DATEDIFF", vec![Expr::raw(unit), from, to])
}

fn dateadd(unit: &str, amount: Expr, value: Expr) -> Expr {
    call("DATEADD", vec![Expr::raw(unit), amount, value])
}

/// Sums two expressions, folding when both are integer literals.
fn add_exprs(a: &Expr, b: &Expr) -> Expr {
    if let (Expr::Literal(Literal::Integer(x)), Expr::Literal(Literal::Integer(y))) = (a, b) {
        Expr::integer(x + y)
    } else {
        Expr::Paren(Box::new(a.clone().binary(BinaryOp::Add, b.clone())))
    }
}

fn add_one(expr: &Expr) -> Expr {
    add_exprs(expr, &Expr::integer(1))
}

impl Compiler for FirebirdCompiler {
    fn translator(&self) -> &dyn Translator {
        &self.translator
    }

    fn capabilities(&self) -> &Capabilities {
        capability::capabilities()
    }

    /// Every SELECT needs a FROM; the dummy one-row system table
    /// stands in when the statement has none.
    fn visit_from(
        &self,
        out: &mut String,
        select: &SelectStatement,
        scope: StatementScope,
    ) -> Result<(), CompileError> {
        if select.from.is_some() {
            render_from(self, out, select, scope)
        } else {
            out.push_str(" FROM RDB$DATABASE");
            Ok(())
        }
    }

    fn visit_binary(
        &self,
        out: &mut String,
        left: &Expr,
        op: BinaryOp,
        right: &Expr,
        scope: StatementScope,
    ) -> Result<(), CompileError> {
        let function = match op {
            BinaryOp::BitAnd => Some("BIN_AND"),
            BinaryOp::BitOr => Some("BIN_OR"),
            BinaryOp::BitXor => Some("BIN_XOR"),
            BinaryOp::LeftShift => Some("BIN_SHL"),
            BinaryOp::RightShift => Some("BIN_SHR"),
            BinaryOp::Mod => Some("MOD"),
            _ => None,
        };
        if let Some(name) = function {
            let rewritten = call(name, vec![left.clone(), right.clone()]);
            return self.visit_expr(out, &rewritten, scope);
        }
        match op {
            BinaryOp::DateTimeMinusDateTime => {
                // Whole days via DATEDIFF(DAY), then the sub-day
                // remainder in milliseconds, both scaled to ticks.
                let day_diff = datediff("DAY", right.clone(), left.clone());
                let whole_days = Expr::Paren(Box::new(
                    day_diff
                        .clone()
                        .binary(BinaryOp::Mul, Expr::integer(TICKS_PER_DAY)),
                ));
                let remainder = datediff(
                    "MILLISECOND",
                    dateadd("DAY", day_diff, right.clone()),
                    left.clone(),
                )
                .binary(BinaryOp::Mul, Expr::integer(TICKS_PER_MILLISECOND));
                let rewritten = whole_days.binary(BinaryOp::Add, remainder);
                self.visit_expr(out, &rewritten, scope)
            }
            BinaryOp::DateTimePlusInterval => {
                // DATEADD's INTEGER argument overflows for large tick
                // counts, so days and sub-day milliseconds are added
                // separately. The inner MOD node re-dispatches into
                // the function rewrite above.
                let ticks = Expr::Paren(Box::new(right.clone()));
                let day_part = ticks
                    .clone()
                    .binary(BinaryOp::Div, Expr::integer(TICKS_PER_DAY));
                let ms_part = Expr::Paren(Box::new(
                    ticks.binary(BinaryOp::Mod, Expr::integer(TICKS_PER_DAY)),
                ))
                .binary(BinaryOp::Div, Expr::integer(TICKS_PER_MILLISECOND));
                let rewritten = dateadd(
                    "MILLISECOND",
                    ms_part,
                    dateadd("DAY", day_part, left.clone()),
                );
                self.visit_expr(out, &rewritten, scope)
            }
            BinaryOp::DateTimeMinusInterval => {
                let negated = Expr::Unary {
                    op: UnaryOp::Neg,
                    operand: Box::new(Expr::Paren(Box::new(right.clone()))),
                };
                self.visit_binary(out, left, BinaryOp::DateTimePlusInterval, &negated, scope)
            }
            other => render_binary(self, out, left, other, right, scope),
        }
    }

    fn visit_unary(
        &self,
        out: &mut String,
        op: UnaryOp,
        operand: &Expr,
        scope: StatementScope,
    ) -> Result<(), CompileError> {
        match op {
            UnaryOp::BitNot => {
                let rewritten = call("BIN_NOT", vec![operand.clone()]);
                self.visit_expr(out, &rewritten, scope)
            }
            other => render_unary(self, out, other, operand, scope),
        }
    }

    /// YEARDAY is zero-based and EXTRACT(SECOND) includes the
    /// fractional part; both get compensated once, marked, and
    /// re-dispatched.
    fn visit_extract(
        &self,
        out: &mut String,
        field: DateTimeField,
        expr: &Expr,
        compensated: bool,
        scope: StatementScope,
    ) -> Result<(), CompileError> {
        if compensated {
            return render_extract(self, out, field, expr, scope);
        }
        match field {
            DateTimeField::DayOfYear => {
                let marked = Expr::Extract {
                    field,
                    expr: Box::new(expr.clone()),
                    compensated: true,
                };
                let rewritten = marked.binary(BinaryOp::Add, Expr::integer(1));
                self.visit_expr(out, &rewritten, scope)
            }
            DateTimeField::Second => {
                let marked = Expr::Extract {
                    field,
                    expr: Box::new(expr.clone()),
                    compensated: true,
                };
                let rewritten = call("TRUNC", vec![marked]);
                self.visit_expr(out, &rewritten, scope)
            }
            other => render_extract(self, out, other, expr, scope),
        }
    }

    /// Paging renders as `ROWS lower TO upper`, both bounds 1-based
    /// and inclusive.
    fn visit_row_limit(
        &self,
        out: &mut String,
        select: &SelectStatement,
    ) -> Result<(), CompileError> {
        match (&select.limit, &select.offset) {
            (None, None) => Ok(()),
            (Some(limit), None) => {
                out.push_str(" ROWS ");
                self.visit_expr(out, limit, StatementScope::Select)
            }
            (limit, Some(offset)) => {
                out.push_str(" ROWS ");
                self.visit_expr(out, &add_one(offset), StatementScope::Select)?;
                out.push_str(" TO ");
                let upper = match limit {
                    Some(limit) => add_exprs(offset, limit),
                    None => Expr::integer(i64::MAX),
                };
                self.visit_expr(out, &upper, StatementScope::Select)
            }
        }
    }

    fn drop_column_keyword(&self) -> &'static str {
        ""
    }

    /// Index direction is index-wide; an expression index renders as
    /// COMPUTED BY.
    fn create_index(
        &self,
        out: &mut String,
        schema: Option<&str>,
        table: &str,
        index: &sqldom_core::schema::Index,
    ) -> Result<(), CompileError> {
        out.push_str("CREATE ");
        if index.is_unique() {
            out.push_str("UNIQUE ");
        }
        if index
            .segments()
            .iter()
            .any(|s| s.order == SortOrder::Descending)
        {
            out.push_str("DESCENDING ");
        }
        out.push_str("INDEX ");
        out.push_str(&self.translator.quote_identifier(index.name()));
        out.push_str(" ON ");
        out.push_str(&self.translator.qualified(schema, table));
        if let Some(IndexTarget::Expression(text)) =
            index.segments().first().map(|s| &s.target)
        {
            out.push_str(" COMPUTED BY (");
            out.push_str(text);
            out.push(')');
        } else {
            out.push_str(" (");
            for (i, segment) in index.segments().iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                if let IndexTarget::Column(name) = &segment.target {
                    out.push_str(&self.translator.quote_identifier(name));
                }
            }
            out.push(')');
        }
        Ok(())
    }

    /// CREATE SEQUENCE takes no START WITH; a restart value becomes a
    /// second ALTER SEQUENCE statement.
    fn create_sequence(
        &self,
        out: &mut String,
        schema: Option<&str>,
        sequence: &Sequence,
    ) -> Result<(), CompileError> {
        out.push_str("CREATE SEQUENCE ");
        out.push_str(&self.translator.qualified(schema, &sequence.name));
        if let Some(value) = sequence.descriptor.current_value {
            out.push_str(";\n");
            self.alter_sequence(out, schema, &sequence.name, value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqldom_core::ast::{SelectStatement, Statement, TableRef};

    fn compile_expr(expr: Expr) -> String {
        let select = SelectStatement::new()
            .column(expr)
            .from(TableRef::table("t"));
        FirebirdCompiler::default()
            .compile(&Statement::Select(select))
            .unwrap()
            .command_text()
            .to_string()
    }

    #[test]
    fn bitwise_ops_become_bin_functions() {
        assert_eq!(
            compile_expr(Expr::column("flags").bit_and(Expr::integer(4))),
            "SELECT BIN_AND(\"flags\", 4) FROM \"t\""
        );
        assert_eq!(
            compile_expr(Expr::column("flags").bit_or(Expr::integer(2))),
            "SELECT BIN_OR(\"flags\", 2) FROM \"t\""
        );
        assert_eq!(
            compile_expr(Expr::Unary {
                op: UnaryOp::BitNot,
                operand: Box::new(Expr::column("flags")),
            }),
            "SELECT BIN_NOT(\"flags\") FROM \"t\""
        );
    }

    #[test]
    fn modulo_becomes_mod_function() {
        assert_eq!(
            compile_expr(Expr::column("n").modulo(Expr::integer(7))),
            "SELECT MOD(\"n\", 7) FROM \"t\""
        );
    }

    #[test]
    fn datetime_difference_yields_ticks() {
        let expr = Expr::column("a").binary(BinaryOp::DateTimeMinusDateTime, Expr::column("b"));
        assert_eq!(
            compile_expr(expr),
            "SELECT (DATEDIFF(DAY, \"b\", \"a\") * 864000000000) + \
             DATEDIFF(MILLISECOND, DATEADD(DAY, DATEDIFF(DAY, \"b\", \"a\"), \"b\"), \"a\") \
             * 10000 FROM \"t\""
        );
    }

    #[test]
    fn datetime_plus_interval_splits_days_and_milliseconds() {
        let expr = Expr::column("d").binary(BinaryOp::DateTimePlusInterval, Expr::column("n"));
        assert_eq!(
            compile_expr(expr),
            "SELECT DATEADD(MILLISECOND, (MOD((\"n\"), 864000000000)) / 10000, \
             DATEADD(DAY, (\"n\") / 864000000000, \"d\")) FROM \"t\""
        );
    }

    #[test]
    fn minus_interval_is_plus_of_negated() {
        let expr = Expr::column("d").binary(BinaryOp::DateTimeMinusInterval, Expr::column("n"));
        let sql = compile_expr(expr);
        assert!(sql.contains("-(\"n\")"), "{sql}");
        assert!(sql.starts_with("SELECT DATEADD(MILLISECOND, "), "{sql}");
    }

    #[test]
    fn day_of_year_is_rebased() {
        let expr = Expr::column("d").extract(DateTimeField::DayOfYear);
        assert_eq!(
            compile_expr(expr),
            "SELECT EXTRACT(YEARDAY FROM \"d\") + 1 FROM \"t\""
        );
    }

    #[test]
    fn second_extraction_truncates_fraction() {
        let expr = Expr::column("ts").extract(DateTimeField::Second);
        assert_eq!(
            compile_expr(expr),
            "SELECT TRUNC(EXTRACT(SECOND FROM \"ts\")) FROM \"t\""
        );
    }

    #[test]
    fn compensated_extract_is_not_rewritten_again() {
        let expr = Expr::Extract {
            field: DateTimeField::Second,
            expr: Box::new(Expr::column("ts")),
            compensated: true,
        };
        assert_eq!(
            compile_expr(expr),
            "SELECT EXTRACT(SECOND FROM \"ts\") FROM \"t\""
        );
    }
}

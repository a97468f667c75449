//! Firebird symbol rules.

use sqldom_core::ast::{BinaryOp, DateTimeField, Literal, LockClause, LockMode, SetOperator};
use sqldom_core::dialect::{render_literal, Translator};
use sqldom_core::error::CompileError;
use sqldom_core::types::SqlType;

use crate::mapper::duration_to_ticks;

/// Symbol-level translation for Firebird 2.5.
///
/// Bitwise operators and `%` are absent from the dialect entirely;
/// the compiler rewrites those nodes into `BIN_*`/`MOD` function
/// calls before any operator is spelled, so reaching the `Err` arms
/// here means a node bypassed the rewrite.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirebirdTranslator;

impl Translator for FirebirdTranslator {
    fn name(&self) -> &'static str {
        "firebird"
    }

    fn binary_operator(&self, op: BinaryOp) -> Result<&'static str, CompileError> {
        match op {
            BinaryOp::Overlaps => Err(CompileError::Unsupported("OVERLAPS")),
            BinaryOp::Mod
            | BinaryOp::BitAnd
            | BinaryOp::BitOr
            | BinaryOp::BitXor
            | BinaryOp::LeftShift
            | BinaryOp::RightShift => Err(CompileError::Unsupported(
                "bitwise/modulo operator without function rewrite",
            )),
            other => Ok(other.as_str()),
        }
    }

    fn extract_field(&self, field: DateTimeField) -> &'static str {
        match field {
            DateTimeField::DayOfYear => "YEARDAY",
            DateTimeField::DayOfWeek => "WEEKDAY",
            other => other.as_str(),
        }
    }

    fn literal(&self, literal: &Literal) -> Result<String, CompileError> {
        match literal {
            // No boolean type before Firebird 3; booleans live in
            // SMALLINT columns.
            Literal::Boolean(value) => Ok(String::from(if *value { "1" } else { "0" })),
            // Durations are stored as 100ns tick counts.
            Literal::Duration(value) => Ok(duration_to_ticks(*value).to_string()),
            other => render_literal(self, other),
        }
    }

    fn sql_type(&self, ty: &SqlType) -> String {
        match ty {
            SqlType::Boolean => String::from("SMALLINT"),
            SqlType::Real => String::from("FLOAT"),
            SqlType::Text => String::from("BLOB SUB_TYPE TEXT"),
            SqlType::Blob => String::from("BLOB"),
            SqlType::Binary(len) => match len {
                Some(n) => format!("CHAR({n}) CHARACTER SET OCTETS"),
                None => String::from("CHAR CHARACTER SET OCTETS"),
            },
            SqlType::Varbinary(len) => match len {
                Some(n) => format!("VARCHAR({n}) CHARACTER SET OCTETS"),
                None => String::from("BLOB"),
            },
            other => other.to_sql(),
        }
    }

    fn set_operator(&self, op: SetOperator) -> Result<&'static str, CompileError> {
        match op {
            SetOperator::Union => Ok("UNION"),
            SetOperator::Intersect => Err(CompileError::Unsupported("INTERSECT")),
            SetOperator::Except => Err(CompileError::Unsupported("EXCEPT")),
        }
    }

    fn lock_clause(&self, lock: &LockClause) -> Result<String, CompileError> {
        if lock.skip_locked {
            return Err(CompileError::Unsupported("SKIP LOCKED"));
        }
        match lock.mode {
            LockMode::Update => Ok(String::from("WITH LOCK")),
            LockMode::Share => Err(CompileError::Unsupported("shared row locks")),
        }
    }

    fn next_value_open(&self) -> &'static str {
        "GEN_ID("
    }

    fn next_value_close(&self, increment: i64) -> String {
        format!(", {increment})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn booleans_render_as_smallint_digits() {
        let t = FirebirdTranslator;
        assert_eq!(t.literal(&Literal::Boolean(true)).unwrap(), "1");
        assert_eq!(t.literal(&Literal::Boolean(false)).unwrap(), "0");
    }

    #[test]
    fn duration_renders_as_ticks() {
        let t = FirebirdTranslator;
        let one_second = chrono::TimeDelta::seconds(1);
        assert_eq!(t.literal(&Literal::Duration(one_second)).unwrap(), "10000000");
    }

    #[test]
    fn plain_literals_fall_back_to_ansi() {
        let t = FirebirdTranslator;
        assert_eq!(
            t.literal(&Literal::String(String::from("a'b"))).unwrap(),
            "'a''b'"
        );
    }

    #[test]
    fn extract_field_spellings() {
        let t = FirebirdTranslator;
        assert_eq!(t.extract_field(DateTimeField::DayOfYear), "YEARDAY");
        assert_eq!(t.extract_field(DateTimeField::DayOfWeek), "WEEKDAY");
        assert_eq!(t.extract_field(DateTimeField::Month), "MONTH");
    }

    #[test]
    fn update_lock_spelled_with_lock() {
        let t = FirebirdTranslator;
        assert_eq!(t.lock_clause(&LockClause::update()).unwrap(), "WITH LOCK");
        assert!(t.lock_clause(&LockClause::share()).is_err());
    }

    #[test]
    fn sequence_advance_uses_gen_id() {
        let t = FirebirdTranslator;
        assert_eq!(t.next_value_open(), "GEN_ID(");
        assert_eq!(t.next_value_close(1), ", 1)");
    }
}

//! Lexical dialect rules.
//!
//! A [`Translator`] maps individual symbols to backend text: operator
//! spellings, literal formats, type names, identifier quoting. It
//! never restructures anything; structural differences belong to the
//! compiler. Backends implement the trait and override only the
//! symbols they spell differently, falling back to the ANSI defaults
//! (and to [`render_literal`]) for the rest.

use crate::ast::{
    BinaryOp, DateTimeField, Literal, LockClause, LockMode, SetOperator, UnaryOp,
};
use crate::error::CompileError;
use crate::schema::ReferentialAction;
use crate::types::SqlType;

/// Symbol-level translation rules for one backend.
pub trait Translator {
    /// A short backend name, used in log events.
    fn name(&self) -> &'static str;

    /// The identifier quote character.
    fn identifier_quote(&self) -> char {
        '"'
    }

    /// Quotes an identifier, doubling embedded quote characters.
    fn quote_identifier(&self, name: &str) -> String {
        let quote = self.identifier_quote();
        let mut out = String::with_capacity(name.len() + 2);
        out.push(quote);
        for ch in name.chars() {
            if ch == quote {
                out.push(quote);
            }
            out.push(ch);
        }
        out.push(quote);
        out
    }

    /// Renders an optionally schema-qualified object name.
    fn qualified(&self, schema: Option<&str>, name: &str) -> String {
        match schema {
            Some(schema) => format!(
                "{}.{}",
                self.quote_identifier(schema),
                self.quote_identifier(name)
            ),
            None => self.quote_identifier(name),
        }
    }

    /// Escapes a string for embedding in a single-quoted literal.
    fn escape_string(&self, value: &str) -> String {
        value.replace('\'', "''")
    }

    /// Spells a binary operator, or fails if the backend has neither a
    /// spelling nor a structural rewrite for it.
    fn binary_operator(&self, op: BinaryOp) -> Result<&'static str, CompileError> {
        Ok(op.as_str())
    }

    /// Spells a unary operator.
    fn unary_operator(&self, op: UnaryOp) -> &'static str {
        op.as_str()
    }

    /// Spells an EXTRACT field.
    fn extract_field(&self, field: DateTimeField) -> &'static str {
        field.as_str()
    }

    /// Renders a literal value.
    fn literal(&self, literal: &Literal) -> Result<String, CompileError> {
        render_literal(self, literal)
    }

    /// Spells a storage type.
    fn sql_type(&self, ty: &SqlType) -> String {
        ty.to_sql()
    }

    /// Spells a set operator, or fails if the backend lacks it.
    fn set_operator(&self, op: SetOperator) -> Result<&'static str, CompileError> {
        Ok(op.keyword())
    }

    /// Renders a row-locking clause, or fails if the backend lacks the
    /// requested mode.
    fn lock_clause(&self, lock: &LockClause) -> Result<String, CompileError> {
        let mut text = String::from(match lock.mode {
            LockMode::Update => "FOR UPDATE",
            LockMode::Share => "FOR SHARE",
        });
        if lock.skip_locked {
            text.push_str(" SKIP LOCKED");
        }
        Ok(text)
    }

    /// Spells a referential action.
    fn referential_action(&self, action: ReferentialAction) -> &'static str {
        action.as_sql()
    }

    /// Opening fragment of a sequence-advance expression. The compiler
    /// emits `open + quoted name + close`.
    fn next_value_open(&self) -> &'static str {
        "NEXT VALUE FOR "
    }

    /// Closing fragment of a sequence-advance expression.
    fn next_value_close(&self, _increment: i64) -> String {
        String::new()
    }
}

/// Renders a literal the ANSI way. Backend translators that override
/// [`Translator::literal`] call back into this for the variants they
/// do not respell.
pub fn render_literal<T: Translator + ?Sized>(
    translator: &T,
    literal: &Literal,
) -> Result<String, CompileError> {
    Ok(match literal {
        Literal::Null => String::from("NULL"),
        Literal::Integer(value) => value.to_string(),
        Literal::Float(value) => {
            let mut text = value.to_string();
            // "1" would parse as an integer literal server-side.
            if !text.contains('.') && !text.contains('e') && !text.contains('E') {
                text.push_str(".0");
            }
            text
        }
        Literal::Decimal(value) => value.to_string(),
        Literal::String(value) => format!("'{}'", translator.escape_string(value)),
        Literal::Bytes(value) => format!("X'{}'", hex::encode_upper(value)),
        Literal::Boolean(true) => String::from("TRUE"),
        Literal::Boolean(false) => String::from("FALSE"),
        Literal::Uuid(value) => format!("'{}'", value.hyphenated()),
        Literal::Date(value) => format!("DATE '{}'", value.format("%Y-%m-%d")),
        Literal::Time(value) => format!("TIME '{}'", value.format("%H:%M:%S%.3f")),
        Literal::DateTime(value) => {
            format!("TIMESTAMP '{}'", value.format("%Y-%m-%d %H:%M:%S%.3f"))
        }
        Literal::Duration(value) => {
            let seconds = value.num_seconds();
            let nanos = value.subsec_nanos();
            if nanos == 0 {
                format!("INTERVAL '{seconds}' SECOND")
            } else {
                format!("INTERVAL '{seconds}.{:09}' SECOND", nanos.unsigned_abs())
            }
        }
    })
}

/// The ANSI rendition of the symbol rules: every default, no
/// overrides.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnsiTranslator;

impl Translator for AnsiTranslator {
    fn name(&self) -> &'static str {
        "ansi"
    }
}

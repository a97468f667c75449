//! # sqldom-core
//!
//! The backend-neutral core of a multi-backend SQL toolkit: a
//! statement/expression model, a capability descriptor, and the
//! compiler, translator, extractor and type-mapper seams backends
//! plug into.
//!
//! This crate provides:
//! - A closed, pure-data statement and expression model ([`ast`])
//! - A schema model built by extraction and consumed by DDL ([`schema`])
//! - Trait-based compilation with ANSI default bodies ([`compile`], [`dialect`])
//! - Declared-up-front backend capabilities ([`capability`])
//! - Canonical-to-storage type mapping with compensation seams ([`mapper`])
//!
//! ## Compiling a statement
//!
//! ```rust
//! use sqldom_core::ast::{Expr, SelectStatement, Statement, TableRef};
//! use sqldom_core::compile::{AnsiCompiler, Compiler};
//!
//! let select = SelectStatement::new()
//!     .column(Expr::column("id"))
//!     .from(TableRef::table("orders"))
//!     .and_where(Expr::column("total").gt(Expr::integer(100)));
//!
//! let compiled = AnsiCompiler::default()
//!     .compile(&Statement::Select(select))
//!     .unwrap();
//! assert_eq!(
//!     compiled.command_text(),
//!     "SELECT \"id\" FROM \"orders\" WHERE \"total\" > 100"
//! );
//! ```
//!
//! Backend crates implement [`compile::Compiler`] and
//! [`dialect::Translator`], overriding only the methods their SQL
//! disagrees with and rewriting unsupported constructs into supported
//! shapes before re-dispatching.

pub mod ast;
pub mod capability;
pub mod compile;
pub mod dialect;
pub mod error;
pub mod extract;
pub mod mapper;
pub mod schema;
pub mod types;
pub mod value;

pub use ast::{Expr, Statement};
pub use capability::Capabilities;
pub use compile::{CompiledStatement, Compiler, StatementScope};
pub use dialect::Translator;
pub use error::{CompileError, ExtractError, SchemaError, TypeMapError};
pub use extract::{Connection, Extractor, Row, ScalarValue};
pub use mapper::TypeMapper;
pub use schema::{Catalog, Schema};
pub use types::{CanonicalType, SqlType};
pub use value::SqlValue;

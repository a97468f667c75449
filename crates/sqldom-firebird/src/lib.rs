//! # sqldom-firebird
//!
//! The Firebird 2.5 backend for the sqldom SQL toolkit.
//!
//! This crate provides:
//! - [`FirebirdCompiler`]: statement compilation with structural
//!   rewrites for bitwise operators, datetime arithmetic, paging and
//!   FROM-less selects
//! - [`FirebirdTranslator`]: Firebird operator, literal and type
//!   spellings
//! - [`FirebirdExtractor`]: live-schema extraction from the `RDB$`
//!   system tables
//! - [`FirebirdTypeMapper`]: compensating storage for booleans,
//!   unsigned integers, GUIDs and durations
//! - [`capabilities`]: the static descriptor of what the engine
//!   supports
//!
//! ```rust
//! use sqldom_core::ast::{Expr, SelectStatement, Statement};
//! use sqldom_core::compile::Compiler;
//! use sqldom_firebird::FirebirdCompiler;
//!
//! // No FROM clause: the dummy system table is substituted.
//! let select = SelectStatement::new().column(Expr::integer(1));
//! let compiled = FirebirdCompiler::default()
//!     .compile(&Statement::Select(select))
//!     .unwrap();
//! assert_eq!(compiled.command_text(), "SELECT 1 FROM RDB$DATABASE");
//! ```

pub mod capability;
pub mod compiler;
pub mod dialect;
pub mod extractor;
pub mod mapper;

pub use capability::capabilities;
pub use compiler::FirebirdCompiler;
pub use dialect::FirebirdTranslator;
pub use extractor::{FirebirdExtractor, DEFAULT_SEQUENCE_INCREMENT};
pub use mapper::FirebirdTypeMapper;

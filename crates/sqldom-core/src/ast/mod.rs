//! The dialect-neutral statement/expression model.
//!
//! A closed set of pure-data nodes describing one SQL operation.
//! Higher layers build a tree; a backend compiler renders it to text.

mod ddl;
mod expression;
mod statement;

pub use ddl::DdlStatement;
pub use expression::{BinaryOp, DateTimeField, Expr, FunctionCall, Literal, UnaryOp};
pub use statement::{
    DeleteStatement, InsertSource, InsertStatement, JoinClause, JoinType, LockClause, LockMode,
    OrderBy, OrderDirection, SelectColumn, SelectStatement, SetOperation, SetOperator, Statement,
    TableRef, UpdateAssignment, UpdateStatement,
};

//! The schema (catalog) model.
//!
//! Built once per extractor run, read thereafter by DDL compilation
//! and by external schema-comparison code. Structural invariants are
//! enforced at construction time, never deferred to render time. All
//! types serialize, so extracted catalogs can be snapshotted and
//! compared offline.

mod catalog;
mod constraint;
mod index;
mod sequence;
mod table;
mod view;

pub use catalog::{Catalog, Schema};
pub use constraint::{
    CheckConstraint, Constraint, ForeignKey, KeyConstraint, ReferentialAction,
};
pub use index::{Index, IndexSegment, IndexTarget, SortOrder};
pub use sequence::{Sequence, SequenceDescriptor};
pub use table::{Column, Table, TableScope};
pub use view::View;

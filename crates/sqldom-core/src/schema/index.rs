//! Indexes and their segments.

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;

/// Sort order of an index segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortOrder {
    /// Ascending (default).
    #[default]
    Ascending,
    /// Descending.
    Descending,
}

impl SortOrder {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_sql(&self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }
}

/// What an index segment covers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum IndexTarget {
    /// A plain column reference.
    Column(String),
    /// A computed expression, stored as native SQL text.
    Expression(String),
}

/// One ordered segment of an index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexSegment {
    /// What the segment covers.
    pub target: IndexTarget,
    /// Sort order.
    pub order: SortOrder,
}

impl IndexSegment {
    /// Creates an ascending column segment.
    #[must_use]
    pub fn column(name: impl Into<String>) -> Self {
        Self {
            target: IndexTarget::Column(name.into()),
            order: SortOrder::Ascending,
        }
    }

    /// Creates an ascending expression segment.
    #[must_use]
    pub fn expression(text: impl Into<String>) -> Self {
        Self {
            target: IndexTarget::Expression(text.into()),
            order: SortOrder::Ascending,
        }
    }

    /// Makes the segment descending.
    #[must_use]
    pub fn descending(mut self) -> Self {
        self.order = SortOrder::Descending;
        self
    }
}

/// An index: ordered segments plus a uniqueness flag.
///
/// An expression segment implies exactly one segment in total; the
/// constructor rejects anything else rather than silently dropping a
/// segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Index {
    name: String,
    unique: bool,
    segments: Vec<IndexSegment>,
}

impl Index {
    /// Creates an index from complete segments, validating the
    /// expression-index invariant.
    pub fn new(
        name: impl Into<String>,
        unique: bool,
        segments: Vec<IndexSegment>,
    ) -> Result<Self, SchemaError> {
        let name = name.into();
        let has_expression = segments
            .iter()
            .any(|s| matches!(s.target, IndexTarget::Expression(_)));
        if has_expression && segments.len() != 1 {
            return Err(SchemaError::ExpressionIndexSegments {
                name,
                segments: segments.len(),
            });
        }
        Ok(Self {
            name,
            unique,
            segments,
        })
    }

    /// Returns the index name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the index enforces uniqueness.
    #[must_use]
    pub fn is_unique(&self) -> bool {
        self.unique
    }

    /// Returns the segments in order.
    #[must_use]
    pub fn segments(&self) -> &[IndexSegment] {
        &self.segments
    }

    /// Whether the index is expression-based.
    #[must_use]
    pub fn is_expression(&self) -> bool {
        matches!(
            self.segments.first(),
            Some(IndexSegment {
                target: IndexTarget::Expression(_),
                ..
            })
        )
    }
}

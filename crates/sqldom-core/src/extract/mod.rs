//! Live-schema extraction primitives.
//!
//! Backends introspect by running plain SQL against system tables and
//! folding the flat, ordered result rows into the schema model. This
//! module holds the backend-neutral pieces: the scalar row shape, the
//! minimal connection seam, and the run-folding helper that groups
//! multi-row objects by their position column.

use crate::error::ExtractError;
use crate::schema::Catalog;

/// A scalar cell of an introspection result row.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    /// SQL NULL.
    Null,
    /// Any integer-family value.
    Int(i64),
    /// Any float-family value.
    Float(f64),
    /// Any character value.
    Text(String),
    /// Any binary value.
    Bytes(Vec<u8>),
}

impl ScalarValue {
    /// Returns a short name for the value kind, used in error messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
            Self::Bytes(_) => "bytes",
        }
    }
}

/// One introspection result row, addressed positionally.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    values: Vec<ScalarValue>,
}

impl Row {
    /// Creates a row from its cells.
    #[must_use]
    pub fn new(values: Vec<ScalarValue>) -> Self {
        Self { values }
    }

    fn get(&self, column: usize) -> Result<&ScalarValue, ExtractError> {
        self.values
            .get(column)
            .ok_or(ExtractError::MissingColumn { column })
    }

    /// Reads a non-null integer cell.
    pub fn get_i64(&self, column: usize) -> Result<i64, ExtractError> {
        match self.get(column)? {
            ScalarValue::Int(value) => Ok(*value),
            other => Err(ExtractError::UnexpectedValue {
                column,
                expected: "integer",
                got: other.kind(),
            }),
        }
    }

    /// Reads a nullable integer cell.
    pub fn get_opt_i64(&self, column: usize) -> Result<Option<i64>, ExtractError> {
        match self.get(column)? {
            ScalarValue::Null => Ok(None),
            ScalarValue::Int(value) => Ok(Some(*value)),
            other => Err(ExtractError::UnexpectedValue {
                column,
                expected: "integer or null",
                got: other.kind(),
            }),
        }
    }

    /// Reads a non-null text cell.
    pub fn get_str(&self, column: usize) -> Result<&str, ExtractError> {
        match self.get(column)? {
            ScalarValue::Text(value) => Ok(value),
            other => Err(ExtractError::UnexpectedValue {
                column,
                expected: "text",
                got: other.kind(),
            }),
        }
    }

    /// Reads a nullable text cell.
    pub fn get_opt_str(&self, column: usize) -> Result<Option<&str>, ExtractError> {
        match self.get(column)? {
            ScalarValue::Null => Ok(None),
            ScalarValue::Text(value) => Ok(Some(value)),
            other => Err(ExtractError::UnexpectedValue {
                column,
                expected: "text or null",
                got: other.kind(),
            }),
        }
    }

    /// Reads a boolean-flag cell: NULL normalizes to 0, 0 and 1 map to
    /// the two truth values, anything else is a data-integrity fault.
    pub fn get_flag(&self, column: usize) -> Result<bool, ExtractError> {
        match self.get_opt_i64(column)?.unwrap_or(0) {
            0 => Ok(false),
            1 => Ok(true),
            value => Err(ExtractError::MalformedFlag { column, value }),
        }
    }
}

/// The extraction seam: anything that can run an introspection query
/// and hand back flat rows.
pub trait Connection {
    /// Runs `sql` and returns all result rows.
    fn query(&mut self, sql: &str) -> Result<Vec<Row>, ExtractError>;
}

/// One backend's schema extractor.
pub trait Extractor {
    /// Reads the structure of the given schemas into a fresh catalog.
    fn extract(
        &self,
        connection: &mut dyn Connection,
        catalog_name: &str,
        schemas: &[&str],
    ) -> Result<Catalog, ExtractError>;
}

/// Splits ordered rows into per-owner runs using a 1-based position
/// column: a run ends when the position fails to increase.
///
/// The split is driven purely by the position values, so two
/// extractions of the same data fold identically. Owner-name columns
/// are not consulted; backends whose system tables interleave owners
/// must ORDER BY owner first.
pub fn owner_runs(rows: &[Row], position_column: usize) -> Result<Vec<&[Row]>, ExtractError> {
    let mut runs = Vec::new();
    let mut start = 0usize;
    let mut previous: Option<i64> = None;
    for (i, row) in rows.iter().enumerate() {
        let position = row.get_i64(position_column)?;
        if let Some(previous) = previous {
            if position <= previous {
                runs.push(&rows[start..i]);
                start = i;
            }
        }
        previous = Some(position);
    }
    if start < rows.len() {
        runs.push(&rows[start..]);
    }
    Ok(runs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(position: i64) -> Row {
        Row::new(vec![ScalarValue::Int(position)])
    }

    #[test]
    fn runs_split_where_position_stops_increasing() {
        let rows = vec![row(1), row(2), row(3), row(1), row(2), row(1)];
        let runs = owner_runs(&rows, 0).unwrap();
        let lengths: Vec<usize> = runs.iter().map(|r| r.len()).collect();
        assert_eq!(lengths, vec![3, 2, 1]);
    }

    #[test]
    fn empty_input_yields_no_runs() {
        let runs = owner_runs(&[], 0).unwrap();
        assert!(runs.is_empty());
    }

    #[test]
    fn single_row_is_one_run() {
        let rows = vec![row(1)];
        let runs = owner_runs(&rows, 0).unwrap();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].len(), 1);
    }

    #[test]
    fn flag_normalizes_null_and_rejects_garbage() {
        let ok = Row::new(vec![ScalarValue::Null, ScalarValue::Int(1)]);
        assert!(!ok.get_flag(0).unwrap());
        assert!(ok.get_flag(1).unwrap());

        let bad = Row::new(vec![ScalarValue::Int(7)]);
        let err = bad.get_flag(0).unwrap_err();
        assert!(matches!(err, ExtractError::MalformedFlag { value: 7, .. }));
    }

    #[test]
    fn missing_column_is_reported_by_index() {
        let row = Row::new(vec![ScalarValue::Int(1)]);
        let err = row.get_i64(5).unwrap_err();
        assert!(matches!(err, ExtractError::MissingColumn { column: 5 }));
    }
}

//! Canonical-to-storage type mapping.
//!
//! A [`TypeMapper`] decides, per backend, which storage type holds
//! each canonical type and how values cross the binding/reading
//! boundary. Where the backend has no native analog the mapper
//! compensates with a substitute representation, and the paired
//! `bind_*`/`read_*` methods keep the substitution invisible: binding
//! then reading any in-range value yields the original.

use chrono::TimeDelta;
use rust_decimal::prelude::ToPrimitive;
use uuid::Uuid;

use crate::error::TypeMapError;
use crate::types::{CanonicalType, SqlType};
use crate::value::SqlValue;

/// One backend's type-mapping rules. Every method has an ANSI default
/// body; backends override only where they compensate.
pub trait TypeMapper {
    /// Maps a canonical type to a storage type, threading through
    /// whichever facet (length, precision, scale) the family carries.
    fn map(
        &self,
        ty: CanonicalType,
        length: Option<u32>,
        precision: Option<u16>,
        scale: Option<u16>,
    ) -> Result<SqlType, TypeMapError> {
        match ty {
            CanonicalType::Bool => self.map_bool(),
            CanonicalType::Int16 => Ok(SqlType::Smallint),
            CanonicalType::Int32 => Ok(SqlType::Integer),
            CanonicalType::Int64 => Ok(SqlType::Bigint),
            CanonicalType::UInt32 => self.map_u32(),
            CanonicalType::UInt64 => self.map_u64(),
            CanonicalType::Float32 => Ok(SqlType::Real),
            CanonicalType::Float64 => Ok(SqlType::Double),
            CanonicalType::Decimal => self.map_decimal(precision, scale),
            CanonicalType::Char => self.map_char(),
            CanonicalType::String => self.map_string(length),
            CanonicalType::Bytes => self.map_bytes(length),
            CanonicalType::Guid => self.map_guid(),
            CanonicalType::Date => Ok(SqlType::Date),
            CanonicalType::Time => Ok(SqlType::Time),
            CanonicalType::DateTime => Ok(SqlType::Timestamp),
            CanonicalType::Duration => self.map_duration(),
        }
    }

    /// Storage type for booleans.
    fn map_bool(&self) -> Result<SqlType, TypeMapError> {
        Ok(SqlType::Boolean)
    }

    /// Storage type for unsigned 32-bit integers. The default widens
    /// to a signed 8-byte integer, which holds the full range.
    fn map_u32(&self) -> Result<SqlType, TypeMapError> {
        Ok(SqlType::Bigint)
    }

    /// Storage type for unsigned 64-bit integers. No signed integer
    /// holds the full range, so the default widens to an exact
    /// 20-digit decimal.
    fn map_u64(&self) -> Result<SqlType, TypeMapError> {
        Ok(SqlType::Decimal {
            precision: Some(20),
            scale: Some(0),
        })
    }

    /// Storage type for exact decimals.
    fn map_decimal(
        &self,
        precision: Option<u16>,
        scale: Option<u16>,
    ) -> Result<SqlType, TypeMapError> {
        Ok(SqlType::Decimal { precision, scale })
    }

    /// Storage type for single characters.
    fn map_char(&self) -> Result<SqlType, TypeMapError> {
        Ok(SqlType::Char(Some(1)))
    }

    /// Storage type for strings.
    fn map_string(&self, length: Option<u32>) -> Result<SqlType, TypeMapError> {
        Ok(match length {
            Some(length) => SqlType::Varchar(Some(length)),
            None => SqlType::Text,
        })
    }

    /// Storage type for byte sequences.
    fn map_bytes(&self, length: Option<u32>) -> Result<SqlType, TypeMapError> {
        Ok(match length {
            Some(length) => SqlType::Varbinary(Some(length)),
            None => SqlType::Blob,
        })
    }

    /// Storage type for GUIDs.
    fn map_guid(&self) -> Result<SqlType, TypeMapError> {
        Ok(SqlType::Custom(String::from("UUID")))
    }

    /// Storage type for elapsed-time values.
    fn map_duration(&self) -> Result<SqlType, TypeMapError> {
        Ok(SqlType::Custom(String::from("INTERVAL")))
    }

    /// Binds a boolean.
    fn bind_bool(&self, value: bool) -> SqlValue {
        SqlValue::Bool(value)
    }

    /// Reads a boolean back.
    fn read_bool(&self, value: &SqlValue) -> Result<bool, TypeMapError> {
        match value {
            SqlValue::Bool(b) => Ok(*b),
            other => Err(TypeMapError::ValueKind {
                expected: "boolean",
                got: other.kind(),
            }),
        }
    }

    /// Binds an unsigned 32-bit integer.
    fn bind_u32(&self, value: u32) -> SqlValue {
        SqlValue::I64(i64::from(value))
    }

    /// Reads an unsigned 32-bit integer back.
    fn read_u32(&self, value: &SqlValue) -> Result<u32, TypeMapError> {
        let wide = match value {
            SqlValue::I32(v) => i64::from(*v),
            SqlValue::I64(v) => *v,
            other => {
                return Err(TypeMapError::ValueKind {
                    expected: "integer",
                    got: other.kind(),
                })
            }
        };
        u32::try_from(wide).map_err(|_| TypeMapError::OutOfRange {
            value: wide.to_string(),
            target: "u32",
        })
    }

    /// Binds an unsigned 64-bit integer.
    fn bind_u64(&self, value: u64) -> SqlValue {
        SqlValue::Decimal(rust_decimal::Decimal::from(value))
    }

    /// Reads an unsigned 64-bit integer back.
    fn read_u64(&self, value: &SqlValue) -> Result<u64, TypeMapError> {
        match value {
            SqlValue::Decimal(d) => d.to_u64().ok_or_else(|| TypeMapError::OutOfRange {
                value: d.to_string(),
                target: "u64",
            }),
            SqlValue::I64(v) => u64::try_from(*v).map_err(|_| TypeMapError::OutOfRange {
                value: v.to_string(),
                target: "u64",
            }),
            other => Err(TypeMapError::ValueKind {
                expected: "decimal or integer",
                got: other.kind(),
            }),
        }
    }

    /// Binds a single character.
    fn bind_char(&self, value: char) -> SqlValue {
        SqlValue::Str(value.to_string())
    }

    /// Reads a single character back. `None` means the stored text was
    /// empty.
    fn read_char(&self, value: &SqlValue) -> Result<Option<char>, TypeMapError> {
        match value {
            SqlValue::Str(s) => Ok(s.chars().next()),
            other => Err(TypeMapError::ValueKind {
                expected: "string",
                got: other.kind(),
            }),
        }
    }

    /// Binds a GUID.
    fn bind_guid(&self, value: Uuid) -> SqlValue {
        SqlValue::Uuid(value)
    }

    /// Reads a GUID back.
    fn read_guid(&self, value: &SqlValue) -> Result<Uuid, TypeMapError> {
        match value {
            SqlValue::Uuid(u) => Ok(*u),
            SqlValue::Str(s) => Uuid::parse_str(s).map_err(|_| TypeMapError::Unparseable {
                value: s.clone(),
                target: "uuid",
            }),
            other => Err(TypeMapError::ValueKind {
                expected: "uuid",
                got: other.kind(),
            }),
        }
    }

    /// Binds an elapsed-time value.
    fn bind_duration(&self, value: TimeDelta) -> SqlValue {
        SqlValue::Duration(value)
    }

    /// Reads an elapsed-time value back.
    fn read_duration(&self, value: &SqlValue) -> Result<TimeDelta, TypeMapError> {
        match value {
            SqlValue::Duration(d) => Ok(*d),
            other => Err(TypeMapError::ValueKind {
                expected: "duration",
                got: other.kind(),
            }),
        }
    }
}

/// The ANSI rendition of the mapping rules: every default, no
/// compensation.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnsiTypeMapper;

impl TypeMapper for AnsiTypeMapper {}

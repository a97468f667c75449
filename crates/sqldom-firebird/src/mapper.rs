//! Firebird type mapping.
//!
//! Firebird 2.5 has no boolean, no unsigned integers, no GUID and no
//! interval type, and its exact decimals stop at 18 digits. Each gap
//! gets a compensating representation here, with paired bind/read
//! methods so any in-range value round-trips exactly.

use chrono::TimeDelta;
use uuid::Uuid;

use sqldom_core::error::TypeMapError;
use sqldom_core::mapper::TypeMapper;
use sqldom_core::types::SqlType;
use sqldom_core::value::SqlValue;

/// 100ns ticks per second.
pub const TICKS_PER_SECOND: i64 = 10_000_000;

/// Converts an elapsed time to a 100ns tick count.
#[must_use]
pub fn duration_to_ticks(value: TimeDelta) -> i64 {
    value.num_seconds() * TICKS_PER_SECOND + i64::from(value.subsec_nanos()) / 100
}

/// Converts a 100ns tick count back to an elapsed time.
#[must_use]
pub fn ticks_to_duration(ticks: i64) -> TimeDelta {
    let seconds = ticks.div_euclid(TICKS_PER_SECOND);
    let remainder = ticks.rem_euclid(TICKS_PER_SECOND);
    TimeDelta::seconds(seconds) + TimeDelta::nanoseconds(remainder * 100)
}

/// Type-mapping rules for Firebird 2.5.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirebirdTypeMapper;

impl TypeMapper for FirebirdTypeMapper {
    fn map_bool(&self) -> Result<SqlType, TypeMapError> {
        Ok(SqlType::Smallint)
    }

    // u64::MAX has 20 digits, beyond DECIMAL(18); stored as text.
    fn map_u64(&self) -> Result<SqlType, TypeMapError> {
        Ok(SqlType::Char(Some(20)))
    }

    fn map_decimal(
        &self,
        precision: Option<u16>,
        scale: Option<u16>,
    ) -> Result<SqlType, TypeMapError> {
        if let Some(precision) = precision {
            if precision > 18 {
                return Err(TypeMapError::OutOfRange {
                    value: precision.to_string(),
                    target: "DECIMAL precision (max 18)",
                });
            }
        }
        Ok(SqlType::Decimal { precision, scale })
    }

    fn map_guid(&self) -> Result<SqlType, TypeMapError> {
        Ok(SqlType::Char(Some(36)))
    }

    fn map_duration(&self) -> Result<SqlType, TypeMapError> {
        Ok(SqlType::Bigint)
    }

    fn bind_bool(&self, value: bool) -> SqlValue {
        SqlValue::I16(i16::from(value))
    }

    fn read_bool(&self, value: &SqlValue) -> Result<bool, TypeMapError> {
        match value {
            SqlValue::I16(v) => Ok(*v != 0),
            SqlValue::I32(v) => Ok(*v != 0),
            SqlValue::I64(v) => Ok(*v != 0),
            other => Err(TypeMapError::ValueKind {
                expected: "integer",
                got: other.kind(),
            }),
        }
    }

    fn bind_u64(&self, value: u64) -> SqlValue {
        SqlValue::Str(value.to_string())
    }

    fn read_u64(&self, value: &SqlValue) -> Result<u64, TypeMapError> {
        match value {
            SqlValue::Str(s) => {
                s.trim().parse().map_err(|_| TypeMapError::Unparseable {
                    value: s.clone(),
                    target: "u64",
                })
            }
            other => Err(TypeMapError::ValueKind {
                expected: "string",
                got: other.kind(),
            }),
        }
    }

    fn bind_char(&self, value: char) -> SqlValue {
        SqlValue::Str(value.to_string())
    }

    /// CHAR(1) columns come back space-padded; trailing spaces are
    /// padding, not data, and an all-space cell means "no character".
    fn read_char(&self, value: &SqlValue) -> Result<Option<char>, TypeMapError> {
        match value {
            SqlValue::Str(s) => Ok(s.trim_end_matches(' ').chars().next()),
            other => Err(TypeMapError::ValueKind {
                expected: "string",
                got: other.kind(),
            }),
        }
    }

    fn bind_guid(&self, value: Uuid) -> SqlValue {
        SqlValue::Str(value.hyphenated().to_string())
    }

    fn read_guid(&self, value: &SqlValue) -> Result<Uuid, TypeMapError> {
        match value {
            SqlValue::Str(s) => Uuid::parse_str(s.trim()).map_err(|_| TypeMapError::Unparseable {
                value: s.clone(),
                target: "uuid",
            }),
            other => Err(TypeMapError::ValueKind {
                expected: "string",
                got: other.kind(),
            }),
        }
    }

    fn bind_duration(&self, value: TimeDelta) -> SqlValue {
        SqlValue::I64(duration_to_ticks(value))
    }

    fn read_duration(&self, value: &SqlValue) -> Result<TimeDelta, TypeMapError> {
        match value {
            SqlValue::I64(ticks) => Ok(ticks_to_duration(*ticks)),
            other => Err(TypeMapError::ValueKind {
                expected: "int64",
                got: other.kind(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_round_trips_through_smallint() {
        let mapper = FirebirdTypeMapper;
        assert_eq!(mapper.map_bool().unwrap(), SqlType::Smallint);
        assert_eq!(mapper.bind_bool(true), SqlValue::I16(1));
        assert_eq!(mapper.bind_bool(false), SqlValue::I16(0));
        assert!(mapper.read_bool(&SqlValue::I16(1)).unwrap());
        assert!(!mapper.read_bool(&SqlValue::I16(0)).unwrap());
    }

    #[test]
    fn u64_max_round_trips_through_char20() {
        let mapper = FirebirdTypeMapper;
        assert_eq!(mapper.map_u64().unwrap(), SqlType::Char(Some(20)));
        let bound = mapper.bind_u64(u64::MAX);
        assert_eq!(bound, SqlValue::Str(String::from("18446744073709551615")));
        assert_eq!(mapper.read_u64(&bound).unwrap(), u64::MAX);
    }

    #[test]
    fn padded_u64_text_still_parses() {
        let mapper = FirebirdTypeMapper;
        let padded = SqlValue::Str(String::from("42                  "));
        assert_eq!(mapper.read_u64(&padded).unwrap(), 42);
    }

    #[test]
    fn u32_survives_via_core_widening() {
        let mapper = FirebirdTypeMapper;
        let bound = mapper.bind_u32(u32::MAX);
        assert_eq!(mapper.read_u32(&bound).unwrap(), u32::MAX);
    }

    #[test]
    fn decimal_precision_capped_at_18() {
        let mapper = FirebirdTypeMapper;
        assert!(mapper.map_decimal(Some(18), Some(2)).is_ok());
        let err = mapper.map_decimal(Some(19), Some(2)).unwrap_err();
        assert!(matches!(err, TypeMapError::OutOfRange { .. }));
    }

    #[test]
    fn space_char_reads_as_none_but_tab_survives() {
        let mapper = FirebirdTypeMapper;
        assert_eq!(
            mapper.read_char(&SqlValue::Str(String::from("   "))).unwrap(),
            None
        );
        assert_eq!(
            mapper.read_char(&SqlValue::Str(String::from("\t "))).unwrap(),
            Some('\t')
        );
        assert_eq!(
            mapper.read_char(&SqlValue::Str(String::from("x  "))).unwrap(),
            Some('x')
        );
    }

    #[test]
    fn guid_round_trips_through_char36() {
        let mapper = FirebirdTypeMapper;
        let guid = Uuid::from_u128(0x0123_4567_89ab_cdef_0123_4567_89ab_cdef);
        let bound = mapper.bind_guid(guid);
        assert_eq!(mapper.read_guid(&bound).unwrap(), guid);
        // Padded, as a CHAR(40) read would deliver it.
        let padded = SqlValue::Str(format!("{}    ", guid.hyphenated()));
        assert_eq!(mapper.read_guid(&padded).unwrap(), guid);
    }

    #[test]
    fn duration_ticks_round_trip_including_negative() {
        for delta in [
            TimeDelta::zero(),
            TimeDelta::seconds(1),
            TimeDelta::milliseconds(1500),
            TimeDelta::milliseconds(-1500),
            TimeDelta::nanoseconds(100),
            TimeDelta::days(365),
        ] {
            assert_eq!(ticks_to_duration(duration_to_ticks(delta)), delta);
        }
    }

    #[test]
    fn known_tick_values() {
        assert_eq!(duration_to_ticks(TimeDelta::seconds(1)), 10_000_000);
        assert_eq!(duration_to_ticks(TimeDelta::milliseconds(1)), 10_000);
        assert_eq!(duration_to_ticks(TimeDelta::days(1)), 864_000_000_000);
    }
}

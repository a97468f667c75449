//! Firebird schema extraction.
//!
//! Firebird exposes its structure through `RDB$` system tables, so
//! extraction is ordinary SQL: one query per pass, each ordered by
//! owner then position, folded into the schema model with
//! [`owner_runs`]. Firebird has no schema namespaces; everything
//! lands in a single synthesized schema named after the first
//! requested name.

use tracing::debug;

use sqldom_core::dialect::Translator;
use sqldom_core::error::ExtractError;
use sqldom_core::extract::{owner_runs, Connection, Extractor};
use sqldom_core::schema::{
    Catalog, CheckConstraint, Column, Constraint, ForeignKey, Index, IndexSegment, IndexTarget,
    KeyConstraint, ReferentialAction, Schema, Sequence, SequenceDescriptor, SortOrder,
    Table, TableScope, View,
};
use sqldom_core::types::SqlType;

use crate::dialect::FirebirdTranslator;

/// Pre-3.0 system tables do not record sequence increments; the
/// engine default is assumed.
pub const DEFAULT_SEQUENCE_INCREMENT: i64 = 1;

const TABLES_QUERY: &str = "\
SELECT TRIM(rdb$relation_name), COALESCE(rdb$relation_type, 0) \
FROM rdb$relations \
WHERE COALESCE(rdb$system_flag, 0) = 0 AND rdb$view_blr IS NULL \
ORDER BY rdb$relation_name";

const COLUMNS_QUERY: &str = "\
SELECT TRIM(rf.rdb$relation_name), TRIM(rf.rdb$field_name), rf.rdb$field_position + 1, \
f.rdb$field_type, COALESCE(f.rdb$field_sub_type, 0), \
COALESCE(f.rdb$character_length, f.rdb$field_length), f.rdb$field_precision, \
COALESCE(-f.rdb$field_scale, 0), COALESCE(rf.rdb$null_flag, f.rdb$null_flag, 0), \
rf.rdb$default_source \
FROM rdb$relation_fields rf \
JOIN rdb$fields f ON f.rdb$field_name = rf.rdb$field_source \
JOIN rdb$relations r ON r.rdb$relation_name = rf.rdb$relation_name \
WHERE COALESCE(r.rdb$system_flag, 0) = 0 AND r.rdb$view_blr IS NULL \
ORDER BY rf.rdb$relation_name, rf.rdb$field_position";

const VIEWS_QUERY: &str = "\
SELECT TRIM(rdb$relation_name), rdb$view_source \
FROM rdb$relations \
WHERE COALESCE(rdb$system_flag, 0) = 0 AND rdb$view_blr IS NOT NULL \
ORDER BY rdb$relation_name";

const VIEW_COLUMNS_QUERY: &str = "\
SELECT TRIM(rf.rdb$relation_name), TRIM(rf.rdb$field_name), rf.rdb$field_position + 1 \
FROM rdb$relation_fields rf \
JOIN rdb$relations r ON r.rdb$relation_name = rf.rdb$relation_name \
WHERE COALESCE(r.rdb$system_flag, 0) = 0 AND r.rdb$view_blr IS NOT NULL \
ORDER BY rf.rdb$relation_name, rf.rdb$field_position";

const INDEXES_QUERY: &str = "\
SELECT TRIM(i.rdb$relation_name), TRIM(i.rdb$index_name), \
COALESCE(i.rdb$unique_flag, 0), COALESCE(i.rdb$index_type, 0), \
i.rdb$expression_source, TRIM(s.rdb$field_name), COALESCE(s.rdb$field_position, 0) + 1 \
FROM rdb$indices i \
LEFT JOIN rdb$index_segments s ON s.rdb$index_name = i.rdb$index_name \
WHERE COALESCE(i.rdb$system_flag, 0) = 0 AND NOT EXISTS (\
SELECT 1 FROM rdb$relation_constraints rc WHERE rc.rdb$index_name = i.rdb$index_name) \
ORDER BY i.rdb$relation_name, i.rdb$index_name, s.rdb$field_position";

const FOREIGN_KEYS_QUERY: &str = "\
SELECT TRIM(rc.rdb$constraint_name), TRIM(rc.rdb$relation_name), \
TRIM(cs.rdb$field_name), TRIM(rc2.rdb$relation_name), TRIM(rs.rdb$field_name), \
TRIM(ref.rdb$update_rule), TRIM(ref.rdb$delete_rule), cs.rdb$field_position + 1 \
FROM rdb$relation_constraints rc \
JOIN rdb$ref_constraints ref ON ref.rdb$constraint_name = rc.rdb$constraint_name \
JOIN rdb$relation_constraints rc2 ON rc2.rdb$constraint_name = ref.rdb$const_name_uq \
JOIN rdb$index_segments cs ON cs.rdb$index_name = rc.rdb$index_name \
JOIN rdb$index_segments rs ON rs.rdb$index_name = rc2.rdb$index_name \
AND rs.rdb$field_position = cs.rdb$field_position \
WHERE rc.rdb$constraint_type = 'FOREIGN KEY' \
ORDER BY rc.rdb$relation_name, rc.rdb$constraint_name, cs.rdb$field_position";

const CHECK_CONSTRAINTS_QUERY: &str = "\
SELECT TRIM(rc.rdb$relation_name), TRIM(rc.rdb$constraint_name), t.rdb$trigger_source \
FROM rdb$relation_constraints rc \
JOIN rdb$check_constraints cc ON cc.rdb$constraint_name = rc.rdb$constraint_name \
JOIN rdb$triggers t ON t.rdb$trigger_name = cc.rdb$trigger_name \
WHERE rc.rdb$constraint_type = 'CHECK' AND t.rdb$trigger_type = 1 \
ORDER BY rc.rdb$relation_name, rc.rdb$constraint_name";

const KEY_CONSTRAINTS_QUERY: &str = "\
SELECT TRIM(rc.rdb$relation_name), TRIM(rc.rdb$constraint_name), \
TRIM(rc.rdb$constraint_type), TRIM(s.rdb$field_name), s.rdb$field_position + 1 \
FROM rdb$relation_constraints rc \
JOIN rdb$index_segments s ON s.rdb$index_name = rc.rdb$index_name \
WHERE rc.rdb$constraint_type IN ('PRIMARY KEY', 'UNIQUE') \
ORDER BY rc.rdb$relation_name, rc.rdb$constraint_name, s.rdb$field_position";

const SEQUENCES_QUERY: &str = "\
SELECT TRIM(rdb$generator_name) \
FROM rdb$generators \
WHERE COALESCE(rdb$system_flag, 0) = 0 \
ORDER BY rdb$generator_name";

/// Schema extractor for Firebird 2.5.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirebirdExtractor;

impl Extractor for FirebirdExtractor {
    fn extract(
        &self,
        connection: &mut dyn Connection,
        catalog_name: &str,
        schemas: &[&str],
    ) -> Result<Catalog, ExtractError> {
        let schema_name = schemas.first().copied().unwrap_or("DEFAULT");
        let mut schema = Schema::new(schema_name);

        self.extract_tables(connection, &mut schema)?;
        self.extract_columns(connection, &mut schema)?;
        self.extract_views(connection, &mut schema)?;
        self.extract_view_columns(connection, &mut schema)?;
        self.extract_indexes(connection, &mut schema)?;
        self.extract_foreign_keys(connection, &mut schema)?;
        self.extract_check_constraints(connection, &mut schema)?;
        self.extract_key_constraints(connection, &mut schema)?;
        self.extract_sequences(connection, &mut schema)?;

        let mut catalog = Catalog::new(catalog_name);
        catalog.add_schema(schema)?;
        catalog.set_default_schema(schema_name)?;
        Ok(catalog)
    }
}

impl FirebirdExtractor {
    fn extract_tables(
        &self,
        connection: &mut dyn Connection,
        schema: &mut Schema,
    ) -> Result<(), ExtractError> {
        let rows = connection.query(TABLES_QUERY)?;
        for row in &rows {
            let name = row.get_str(0)?;
            let scope = match row.get_i64(1)? {
                4 => TableScope::GlobalTemporary {
                    preserve_rows: true,
                },
                5 => TableScope::GlobalTemporary {
                    preserve_rows: false,
                },
                _ => TableScope::Permanent,
            };
            schema.add_table(Table::new(name).with_scope(scope))?;
        }
        debug!(count = rows.len(), "extracted tables");
        Ok(())
    }

    fn extract_columns(
        &self,
        connection: &mut dyn Connection,
        schema: &mut Schema,
    ) -> Result<(), ExtractError> {
        let rows = connection.query(COLUMNS_QUERY)?;
        let runs = owner_runs(&rows, 2)?;
        for run in &runs {
            let table_name = run[0].get_str(0)?.to_string();
            let table = schema
                .table_mut(&table_name)
                .ok_or(ExtractError::UnknownOwner {
                    kind: "table",
                    name: table_name,
                })?;
            for row in *run {
                let name = row.get_str(1)?;
                let sql_type = decode_column_type(
                    row.get_i64(3)?,
                    row.get_i64(4)?,
                    row.get_opt_i64(5)?,
                    row.get_opt_i64(6)?,
                    row.get_i64(7)?,
                )?;
                let mut column = Column::new(name, sql_type);
                if row.get_flag(8)? {
                    column = column.not_null();
                }
                if let Some(source) = row.get_opt_str(9)? {
                    let expr = strip_leading_keyword(source, "DEFAULT");
                    if !expr.is_empty() {
                        column = column.with_default(expr);
                    }
                }
                table.add_column(column)?;
            }
        }
        debug!(tables = runs.len(), columns = rows.len(), "extracted columns");
        Ok(())
    }

    fn extract_views(
        &self,
        connection: &mut dyn Connection,
        schema: &mut Schema,
    ) -> Result<(), ExtractError> {
        let rows = connection.query(VIEWS_QUERY)?;
        for row in &rows {
            let name = row.get_str(0)?;
            let definition = row.get_opt_str(1)?.map(|s| s.trim().to_string());
            schema.add_view(View::new(name, definition))?;
        }
        debug!(count = rows.len(), "extracted views");
        Ok(())
    }

    fn extract_view_columns(
        &self,
        connection: &mut dyn Connection,
        schema: &mut Schema,
    ) -> Result<(), ExtractError> {
        let rows = connection.query(VIEW_COLUMNS_QUERY)?;
        for run in owner_runs(&rows, 2)? {
            let view_name = run[0].get_str(0)?.to_string();
            let view = schema
                .view_mut(&view_name)
                .ok_or(ExtractError::UnknownOwner {
                    kind: "view",
                    name: view_name,
                })?;
            for row in run {
                view.columns.push(row.get_str(1)?.to_string());
            }
        }
        debug!(count = rows.len(), "extracted view columns");
        Ok(())
    }

    fn extract_indexes(
        &self,
        connection: &mut dyn Connection,
        schema: &mut Schema,
    ) -> Result<(), ExtractError> {
        let rows = connection.query(INDEXES_QUERY)?;
        let runs = owner_runs(&rows, 6)?;
        for run in &runs {
            let first = &run[0];
            let table_name = first.get_str(0)?.to_string();
            let index_name = first.get_str(1)?;
            let unique = first.get_flag(2)?;
            let order = if first.get_flag(3)? {
                SortOrder::Descending
            } else {
                SortOrder::Ascending
            };
            let segments = match first.get_opt_str(4)? {
                Some(source) => vec![IndexSegment {
                    target: IndexTarget::Expression(source.trim().to_string()),
                    order,
                }],
                None => run
                    .iter()
                    .map(|row| {
                        Ok(IndexSegment {
                            target: IndexTarget::Column(row.get_str(5)?.to_string()),
                            order,
                        })
                    })
                    .collect::<Result<Vec<_>, ExtractError>>()?,
            };
            let index = Index::new(index_name, unique, segments)?;
            schema
                .table_mut(&table_name)
                .ok_or(ExtractError::UnknownOwner {
                    kind: "table",
                    name: table_name,
                })?
                .add_index(index)?;
        }
        debug!(count = runs.len(), "extracted indexes");
        Ok(())
    }

    fn extract_foreign_keys(
        &self,
        connection: &mut dyn Connection,
        schema: &mut Schema,
    ) -> Result<(), ExtractError> {
        let rows = connection.query(FOREIGN_KEYS_QUERY)?;
        let runs = owner_runs(&rows, 7)?;
        for run in &runs {
            let first = &run[0];
            let name = first.get_str(0)?;
            let table_name = first.get_str(1)?.to_string();
            let referenced_table = first.get_str(3)?.to_string();
            let on_update = decode_referential_action(first.get_str(5)?);
            let on_delete = decode_referential_action(first.get_str(6)?);
            let mut columns = Vec::with_capacity(run.len());
            let mut referenced_columns = Vec::with_capacity(run.len());
            for row in *run {
                columns.push(row.get_str(2)?.to_string());
                referenced_columns.push(row.get_str(4)?.to_string());
            }
            if schema.table(&referenced_table).is_none() {
                return Err(ExtractError::UnknownOwner {
                    kind: "table",
                    name: referenced_table,
                });
            }
            let fk = ForeignKey::new(
                name,
                columns,
                referenced_table,
                referenced_columns,
                on_delete,
                on_update,
            )?;
            schema
                .table_mut(&table_name)
                .ok_or(ExtractError::UnknownOwner {
                    kind: "table",
                    name: table_name,
                })?
                .add_constraint(Constraint::ForeignKey(fk))?;
        }
        debug!(count = runs.len(), "extracted foreign keys");
        Ok(())
    }

    fn extract_check_constraints(
        &self,
        connection: &mut dyn Connection,
        schema: &mut Schema,
    ) -> Result<(), ExtractError> {
        let rows = connection.query(CHECK_CONSTRAINTS_QUERY)?;
        let mut count = 0usize;
        for row in &rows {
            let table_name = row.get_str(0)?.to_string();
            let name = row.get_str(1)?;
            let Some(source) = row.get_opt_str(2)? else {
                continue;
            };
            let condition = strip_leading_keyword(source, "CHECK").to_string();
            schema
                .table_mut(&table_name)
                .ok_or(ExtractError::UnknownOwner {
                    kind: "table",
                    name: table_name,
                })?
                .add_constraint(Constraint::Check(CheckConstraint {
                    name: name.to_string(),
                    condition,
                }))?;
            count += 1;
        }
        debug!(count, "extracted check constraints");
        Ok(())
    }

    fn extract_key_constraints(
        &self,
        connection: &mut dyn Connection,
        schema: &mut Schema,
    ) -> Result<(), ExtractError> {
        let rows = connection.query(KEY_CONSTRAINTS_QUERY)?;
        let runs = owner_runs(&rows, 4)?;
        for run in &runs {
            let first = &run[0];
            let table_name = first.get_str(0)?.to_string();
            let key = KeyConstraint {
                name: first.get_str(1)?.to_string(),
                columns: run
                    .iter()
                    .map(|row| Ok(row.get_str(3)?.to_string()))
                    .collect::<Result<Vec<_>, ExtractError>>()?,
            };
            let constraint = if first.get_str(2)? == "PRIMARY KEY" {
                Constraint::PrimaryKey(key)
            } else {
                Constraint::Unique(key)
            };
            schema
                .table_mut(&table_name)
                .ok_or(ExtractError::UnknownOwner {
                    kind: "table",
                    name: table_name,
                })?
                .add_constraint(constraint)?;
        }
        debug!(count = runs.len(), "extracted key constraints");
        Ok(())
    }

    /// Sequences come in two phases: the names from `rdb$generators`,
    /// then one GEN_ID probe per sequence for its current value.
    fn extract_sequences(
        &self,
        connection: &mut dyn Connection,
        schema: &mut Schema,
    ) -> Result<(), ExtractError> {
        let names: Vec<String> = connection
            .query(SEQUENCES_QUERY)?
            .iter()
            .map(|row| Ok(row.get_str(0)?.to_string()))
            .collect::<Result<_, ExtractError>>()?;
        for name in &names {
            let probe = format!(
                "SELECT GEN_ID({}, 0) FROM RDB$DATABASE",
                FirebirdTranslator.quote_identifier(name)
            );
            let rows = connection.query(&probe)?;
            let current = match rows.first() {
                Some(row) => row.get_i64(0)?,
                None => {
                    return Err(ExtractError::Query(format!(
                        "GEN_ID probe for '{name}' returned no rows"
                    )))
                }
            };
            schema.add_sequence(Sequence {
                name: name.clone(),
                descriptor: SequenceDescriptor {
                    min_value: None,
                    increment: DEFAULT_SEQUENCE_INCREMENT,
                    current_value: Some(current),
                },
            })?;
        }
        debug!(count = names.len(), "extracted sequences");
        Ok(())
    }
}

/// Decodes an `rdb$fields` type code pair into a storage type.
fn decode_column_type(
    major: i64,
    minor: i64,
    length: Option<i64>,
    precision: Option<i64>,
    scale: i64,
) -> Result<SqlType, ExtractError> {
    let exact = |default_precision: i64| -> SqlType {
        let precision = to_u16(precision.unwrap_or(default_precision));
        let scale = to_u16(scale);
        if minor == 2 {
            SqlType::Decimal { precision, scale }
        } else {
            SqlType::Numeric { precision, scale }
        }
    };
    match major {
        7 if minor == 0 && scale == 0 => Ok(SqlType::Smallint),
        7 => Ok(exact(4)),
        8 if minor == 0 && scale == 0 => Ok(SqlType::Integer),
        8 => Ok(exact(9)),
        16 if minor == 0 && scale == 0 => Ok(SqlType::Bigint),
        16 => Ok(exact(18)),
        10 => Ok(SqlType::Real),
        27 => Ok(SqlType::Double),
        12 => Ok(SqlType::Date),
        13 => Ok(SqlType::Time),
        35 => Ok(SqlType::Timestamp),
        14 => Ok(SqlType::Char(length.and_then(to_u32))),
        37 => Ok(SqlType::Varchar(length.and_then(to_u32))),
        261 if minor == 1 => Ok(SqlType::Text),
        261 => Ok(SqlType::Blob),
        _ => Err(ExtractError::UnknownTypeCode { major, minor }),
    }
}

fn to_u16(value: i64) -> Option<u16> {
    u16::try_from(value).ok()
}

fn to_u32(value: i64) -> Option<u32> {
    u32::try_from(value).ok()
}

/// Strips a leading keyword from system-table source text, comparing
/// case-insensitively on a character-boundary-safe prefix.
fn strip_leading_keyword<'a>(source: &'a str, keyword: &str) -> &'a str {
    let trimmed = source.trim();
    match trimmed.get(..keyword.len()) {
        Some(head) if head.eq_ignore_ascii_case(keyword) => trimmed[keyword.len()..].trim_start(),
        _ => trimmed,
    }
}

/// Maps an `rdb$ref_constraints` rule name to a referential action.
/// Unrecognized rules fall back to NO ACTION, matching the engine
/// default.
fn decode_referential_action(rule: &str) -> ReferentialAction {
    match rule {
        "CASCADE" => ReferentialAction::Cascade,
        "SET NULL" => ReferentialAction::SetNull,
        "SET DEFAULT" => ReferentialAction::SetDefault,
        "RESTRICT" => ReferentialAction::Restrict,
        _ => ReferentialAction::NoAction,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_codes_decode() {
        assert_eq!(
            decode_column_type(7, 0, None, None, 0).unwrap(),
            SqlType::Smallint
        );
        assert_eq!(
            decode_column_type(8, 0, None, None, 0).unwrap(),
            SqlType::Integer
        );
        assert_eq!(
            decode_column_type(16, 2, None, Some(12), 3).unwrap(),
            SqlType::Decimal {
                precision: Some(12),
                scale: Some(3)
            }
        );
        assert_eq!(
            decode_column_type(16, 1, None, None, 2).unwrap(),
            SqlType::Numeric {
                precision: Some(18),
                scale: Some(2)
            }
        );
        assert_eq!(
            decode_column_type(37, 0, Some(80), None, 0).unwrap(),
            SqlType::Varchar(Some(80))
        );
        assert_eq!(decode_column_type(261, 1, None, None, 0).unwrap(), SqlType::Text);
        assert_eq!(decode_column_type(261, 0, None, None, 0).unwrap(), SqlType::Blob);
    }

    #[test]
    fn unknown_type_code_is_fatal() {
        let err = decode_column_type(99, 0, None, None, 0).unwrap_err();
        assert!(matches!(
            err,
            ExtractError::UnknownTypeCode { major: 99, minor: 0 }
        ));
    }

    #[test]
    fn keyword_stripping_is_boundary_safe() {
        assert_eq!(strip_leading_keyword("DEFAULT 0", "DEFAULT"), "0");
        assert_eq!(strip_leading_keyword("  default 'x'", "DEFAULT"), "'x'");
        assert_eq!(strip_leading_keyword("CHECK (a > 0)", "CHECK"), "(a > 0)");
        // Shorter than the keyword, and multibyte at the boundary.
        assert_eq!(strip_leading_keyword("DEF", "DEFAULT"), "DEF");
        assert_eq!(strip_leading_keyword("défaut 0", "DEFAULT"), "défaut 0");
    }

    #[test]
    fn referential_rules_decode() {
        assert_eq!(decode_referential_action("CASCADE"), ReferentialAction::Cascade);
        assert_eq!(decode_referential_action("SET NULL"), ReferentialAction::SetNull);
        assert_eq!(decode_referential_action("NO ACTION"), ReferentialAction::NoAction);
        assert_eq!(decode_referential_action("???"), ReferentialAction::NoAction);
    }
}

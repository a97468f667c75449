//! Extraction against a scripted connection.
//!
//! The scripted connection replays canned result rows in pass order,
//! exactly as the system tables would deliver them, and records every
//! query it was asked to run.

use std::collections::VecDeque;

use sqldom_core::error::ExtractError;
use sqldom_core::extract::{Connection, Extractor, Row, ScalarValue};
use sqldom_core::schema::{Constraint, IndexTarget, SortOrder, TableScope};
use sqldom_core::types::SqlType;
use sqldom_firebird::{FirebirdExtractor, DEFAULT_SEQUENCE_INCREMENT};

struct ScriptedConnection {
    responses: VecDeque<Vec<Row>>,
    queries: Vec<String>,
}

impl ScriptedConnection {
    fn new(responses: Vec<Vec<Row>>) -> Self {
        Self {
            responses: responses.into(),
            queries: Vec::new(),
        }
    }
}

impl Connection for ScriptedConnection {
    fn query(&mut self, sql: &str) -> Result<Vec<Row>, ExtractError> {
        self.queries.push(sql.to_string());
        self.responses
            .pop_front()
            .ok_or_else(|| ExtractError::Query(format!("unexpected query: {sql}")))
    }
}

fn text(value: &str) -> ScalarValue {
    ScalarValue::Text(value.to_string())
}

fn int(value: i64) -> ScalarValue {
    ScalarValue::Int(value)
}

fn null() -> ScalarValue {
    ScalarValue::Null
}

#[test]
fn full_extraction_builds_the_catalog() {
    let mut connection = ScriptedConnection::new(vec![
        // tables
        vec![
            Row::new(vec![text("orders"), int(0)]),
            Row::new(vec![text("sessions"), int(4)]),
        ],
        // columns: (table, column, position, major, minor, length,
        // precision, scale, null flag, default source)
        vec![
            Row::new(vec![
                text("orders"),
                text("id"),
                int(1),
                int(16),
                int(0),
                null(),
                null(),
                int(0),
                int(1),
                null(),
            ]),
            Row::new(vec![
                text("orders"),
                text("total"),
                int(2),
                int(8),
                int(2),
                null(),
                int(9),
                int(2),
                int(0),
                null(),
            ]),
            Row::new(vec![
                text("sessions"),
                text("sess_key"),
                int(1),
                int(37),
                int(0),
                int(64),
                null(),
                int(0),
                int(1),
                text("DEFAULT 'none'"),
            ]),
        ],
        // views
        vec![Row::new(vec![
            text("v_totals"),
            text("SELECT total FROM orders"),
        ])],
        // view columns
        vec![Row::new(vec![text("v_totals"), text("total"), int(1)])],
        // indexes
        vec![Row::new(vec![
            text("orders"),
            text("ix_orders_total"),
            int(0),
            int(0),
            null(),
            text("total"),
            int(1),
        ])],
        // foreign keys
        vec![],
        // check constraints
        vec![Row::new(vec![
            text("orders"),
            text("chk_total"),
            text("CHECK (total >= 0)"),
        ])],
        // key constraints
        vec![Row::new(vec![
            text("orders"),
            text("pk_orders"),
            text("PRIMARY KEY"),
            text("id"),
            int(1),
        ])],
        // sequence names, then one GEN_ID probe
        vec![Row::new(vec![text("seq_orders")])],
        vec![Row::new(vec![int(42)])],
    ]);

    let catalog = FirebirdExtractor
        .extract(&mut connection, "main", &["APP"])
        .unwrap();

    let schema = catalog.default_schema().unwrap();
    assert_eq!(schema.name(), "APP");
    assert_eq!(schema.tables().len(), 2);

    let orders = schema.table("orders").unwrap();
    assert_eq!(orders.scope(), TableScope::Permanent);
    assert_eq!(orders.column_ordinal("id"), Some(1));
    assert_eq!(orders.column_ordinal("total"), Some(2));
    assert_eq!(orders.column("id").unwrap().sql_type, SqlType::Bigint);
    assert!(!orders.column("id").unwrap().nullable);
    assert_eq!(
        orders.column("total").unwrap().sql_type,
        SqlType::Decimal {
            precision: Some(9),
            scale: Some(2)
        }
    );
    assert_eq!(orders.indexes().len(), 1);
    assert_eq!(orders.primary_key().unwrap().columns, vec!["id"]);
    assert!(orders
        .constraints()
        .iter()
        .any(|c| matches!(c, Constraint::Check(check) if check.condition == "(total >= 0)")));

    let sessions = schema.table("sessions").unwrap();
    assert_eq!(
        sessions.scope(),
        TableScope::GlobalTemporary {
            preserve_rows: true
        }
    );
    assert_eq!(
        sessions.column("sess_key").unwrap().default.as_deref(),
        Some("'none'")
    );

    let view = schema.view("v_totals").unwrap();
    assert_eq!(view.definition.as_deref(), Some("SELECT total FROM orders"));
    assert_eq!(view.columns, vec!["total"]);

    let sequence = schema.sequence("seq_orders").unwrap();
    assert_eq!(sequence.descriptor.current_value, Some(42));
    assert_eq!(sequence.descriptor.increment, DEFAULT_SEQUENCE_INCREMENT);

    // The value probe is a per-sequence second phase.
    assert_eq!(
        connection.queries.last().unwrap(),
        "SELECT GEN_ID(\"seq_orders\", 0) FROM RDB$DATABASE"
    );
}

#[test]
fn composite_key_and_unique_constraint_fold_in_one_pass() {
    let mut connection = ScriptedConnection::new(vec![
        vec![Row::new(vec![text("orders"), int(0)])],
        vec![
            Row::new(vec![
                text("orders"),
                text("id"),
                int(1),
                int(16),
                int(0),
                null(),
                null(),
                int(0),
                int(1),
                null(),
            ]),
            Row::new(vec![
                text("orders"),
                text("rev"),
                int(2),
                int(8),
                int(0),
                null(),
                null(),
                int(0),
                int(1),
                null(),
            ]),
            Row::new(vec![
                text("orders"),
                text("code"),
                int(3),
                int(37),
                int(0),
                int(12),
                null(),
                int(0),
                int(1),
                null(),
            ]),
        ],
        vec![],
        vec![],
        vec![],
        vec![],
        vec![],
        // positions reset from 2 back to 1 at the constraint boundary
        vec![
            Row::new(vec![
                text("orders"),
                text("pk_orders"),
                text("PRIMARY KEY"),
                text("id"),
                int(1),
            ]),
            Row::new(vec![
                text("orders"),
                text("pk_orders"),
                text("PRIMARY KEY"),
                text("rev"),
                int(2),
            ]),
            Row::new(vec![
                text("orders"),
                text("uq_orders_code"),
                text("UNIQUE"),
                text("code"),
                int(1),
            ]),
        ],
        vec![],
    ]);

    let catalog = FirebirdExtractor
        .extract(&mut connection, "main", &[])
        .unwrap();
    let orders = catalog.default_schema().unwrap().table("orders").unwrap();

    assert_eq!(orders.primary_key().unwrap().columns, vec!["id", "rev"]);
    let unique = orders
        .constraints()
        .iter()
        .find_map(|c| match c {
            Constraint::Unique(key) => Some(key),
            _ => None,
        })
        .unwrap();
    assert_eq!(unique.name, "uq_orders_code");
    assert_eq!(unique.columns, vec!["code"]);
    assert_eq!(orders.constraints().len(), 2);
}

#[test]
fn sequence_probe_quotes_the_generator_name() {
    let mut connection = ScriptedConnection::new(vec![
        vec![],
        vec![],
        vec![],
        vec![],
        vec![],
        vec![],
        vec![],
        vec![],
        vec![Row::new(vec![text("se\"q")])],
        vec![Row::new(vec![int(0)])],
    ]);

    FirebirdExtractor
        .extract(&mut connection, "main", &[])
        .unwrap();
    assert_eq!(
        connection.queries.last().unwrap(),
        "SELECT GEN_ID(\"se\"\"q\", 0) FROM RDB$DATABASE"
    );
}

#[test]
fn composite_foreign_key_matches_positionally() {
    let mut connection = ScriptedConnection::new(vec![
        // tables
        vec![
            Row::new(vec![text("order_lines"), int(0)]),
            Row::new(vec![text("orders"), int(0)]),
        ],
        // columns
        vec![
            Row::new(vec![
                text("order_lines"),
                text("order_id"),
                int(1),
                int(16),
                int(0),
                null(),
                null(),
                int(0),
                int(1),
                null(),
            ]),
            Row::new(vec![
                text("order_lines"),
                text("order_rev"),
                int(2),
                int(8),
                int(0),
                null(),
                null(),
                int(0),
                int(1),
                null(),
            ]),
            Row::new(vec![
                text("orders"),
                text("id"),
                int(1),
                int(16),
                int(0),
                null(),
                null(),
                int(0),
                int(1),
                null(),
            ]),
            Row::new(vec![
                text("orders"),
                text("rev"),
                int(2),
                int(8),
                int(0),
                null(),
                null(),
                int(0),
                int(1),
                null(),
            ]),
        ],
        vec![], // views
        vec![], // view columns
        vec![], // indexes
        // foreign keys: (name, table, column, referenced table,
        // referenced column, update rule, delete rule, position)
        vec![
            Row::new(vec![
                text("fk_lines_orders"),
                text("order_lines"),
                text("order_id"),
                text("orders"),
                text("id"),
                text("RESTRICT"),
                text("CASCADE"),
                int(1),
            ]),
            Row::new(vec![
                text("fk_lines_orders"),
                text("order_lines"),
                text("order_rev"),
                text("orders"),
                text("rev"),
                text("RESTRICT"),
                text("CASCADE"),
                int(2),
            ]),
        ],
        vec![], // checks
        vec![], // keys
        vec![], // sequences
    ]);

    let catalog = FirebirdExtractor
        .extract(&mut connection, "main", &[])
        .unwrap();
    let schema = catalog.default_schema().unwrap();
    assert_eq!(schema.name(), "DEFAULT");

    let lines = schema.table("order_lines").unwrap();
    let fk = lines
        .constraints()
        .iter()
        .find_map(|c| match c {
            Constraint::ForeignKey(fk) => Some(fk),
            _ => None,
        })
        .unwrap();
    assert_eq!(fk.columns(), ["order_id", "order_rev"]);
    assert_eq!(fk.referenced_table(), "orders");
    assert_eq!(fk.referenced_columns(), ["id", "rev"]);
    assert_eq!(
        fk.on_delete(),
        sqldom_core::schema::ReferentialAction::Cascade
    );
    assert_eq!(
        fk.on_update(),
        sqldom_core::schema::ReferentialAction::Restrict
    );
}

#[test]
fn expression_and_descending_indexes_fold() {
    let mut connection = ScriptedConnection::new(vec![
        vec![Row::new(vec![text("users"), int(0)])],
        vec![Row::new(vec![
            text("users"),
            text("name"),
            int(1),
            int(37),
            int(0),
            int(40),
            null(),
            int(0),
            int(0),
            null(),
        ])],
        vec![],
        vec![],
        // one expression index, one descending two-column index
        vec![
            Row::new(vec![
                text("users"),
                text("ix_users_lower"),
                int(0),
                int(0),
                text("(LOWER(name))"),
                null(),
                int(1),
            ]),
            Row::new(vec![
                text("users"),
                text("ix_users_name"),
                int(1),
                int(1),
                null(),
                text("name"),
                int(1),
            ]),
        ],
        vec![],
        vec![],
        vec![],
        vec![],
    ]);

    let catalog = FirebirdExtractor
        .extract(&mut connection, "main", &[])
        .unwrap();
    let users = catalog.default_schema().unwrap().table("users").unwrap();

    let lower = users
        .indexes()
        .iter()
        .find(|i| i.name() == "ix_users_lower")
        .unwrap();
    assert!(lower.is_expression());
    assert_eq!(
        lower.segments()[0].target,
        IndexTarget::Expression(String::from("(LOWER(name))"))
    );

    let name = users
        .indexes()
        .iter()
        .find(|i| i.name() == "ix_users_name")
        .unwrap();
    assert!(name.is_unique());
    assert_eq!(name.segments()[0].order, SortOrder::Descending);
}

#[test]
fn malformed_null_flag_aborts_extraction() {
    let mut connection = ScriptedConnection::new(vec![
        vec![Row::new(vec![text("t"), int(0)])],
        vec![Row::new(vec![
            text("t"),
            text("c"),
            int(1),
            int(8),
            int(0),
            null(),
            null(),
            int(0),
            int(7), // neither 0 nor 1
            null(),
        ])],
    ]);

    let err = FirebirdExtractor
        .extract(&mut connection, "main", &[])
        .unwrap_err();
    assert!(matches!(err, ExtractError::MalformedFlag { value: 7, .. }));
}

#[test]
fn column_for_unknown_table_aborts_extraction() {
    let mut connection = ScriptedConnection::new(vec![
        vec![], // no tables
        vec![Row::new(vec![
            text("ghost"),
            text("c"),
            int(1),
            int(8),
            int(0),
            null(),
            null(),
            int(0),
            int(0),
            null(),
        ])],
    ]);

    let err = FirebirdExtractor
        .extract(&mut connection, "main", &[])
        .unwrap_err();
    assert!(matches!(
        err,
        ExtractError::UnknownOwner { kind: "table", .. }
    ));
}

#[test]
fn unknown_type_code_aborts_extraction() {
    let mut connection = ScriptedConnection::new(vec![
        vec![Row::new(vec![text("t"), int(0)])],
        vec![Row::new(vec![
            text("t"),
            text("c"),
            int(1),
            int(99),
            int(0),
            null(),
            null(),
            int(0),
            int(0),
            null(),
        ])],
    ]);

    let err = FirebirdExtractor
        .extract(&mut connection, "main", &[])
        .unwrap_err();
    assert!(matches!(
        err,
        ExtractError::UnknownTypeCode { major: 99, minor: 0 }
    ));
}

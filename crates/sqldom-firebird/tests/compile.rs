//! End-to-end compilation against the Firebird dialect.

use sqldom_core::ast::{
    DdlStatement, Expr, LockClause, SelectStatement, SetOperator, Statement, TableRef,
};
use sqldom_core::compile::Compiler;
use sqldom_core::dialect::Translator;
use sqldom_core::error::CompileError;
use sqldom_core::schema::{Column, Index, IndexSegment, Sequence, SequenceDescriptor, Table, TableScope};
use sqldom_core::types::SqlType;
use sqldom_firebird::{FirebirdCompiler, FirebirdTranslator};

fn compile(statement: &Statement) -> String {
    FirebirdCompiler::default()
        .compile(statement)
        .unwrap()
        .command_text()
        .to_string()
}

fn compile_err(statement: &Statement) -> CompileError {
    FirebirdCompiler::default().compile(statement).unwrap_err()
}

#[test]
fn paging_renders_rows_to() {
    let select = SelectStatement::new()
        .column(Expr::column("id"))
        .from(TableRef::table("orders"))
        .limit(Expr::integer(10))
        .offset(Expr::integer(20));
    assert_eq!(
        compile(&Statement::Select(select)),
        "SELECT \"id\" FROM \"orders\" ROWS 21 TO 30"
    );
}

#[test]
fn limit_only_renders_rows() {
    let select = SelectStatement::new()
        .column(Expr::column("id"))
        .from(TableRef::table("orders"))
        .limit(Expr::integer(10));
    assert_eq!(
        compile(&Statement::Select(select)),
        "SELECT \"id\" FROM \"orders\" ROWS 10"
    );
}

#[test]
fn offset_only_runs_to_the_end() {
    let select = SelectStatement::new()
        .column(Expr::column("id"))
        .from(TableRef::table("orders"))
        .offset(Expr::integer(20));
    assert_eq!(
        compile(&Statement::Select(select)),
        "SELECT \"id\" FROM \"orders\" ROWS 21 TO 9223372036854775807"
    );
}

#[test]
fn non_literal_paging_builds_sums() {
    let select = SelectStatement::new()
        .column(Expr::column("id"))
        .from(TableRef::table("orders"))
        .limit(Expr::Parameter {
            name: None,
            position: 2,
        })
        .offset(Expr::Parameter {
            name: None,
            position: 1,
        });
    assert_eq!(
        compile(&Statement::Select(select)),
        "SELECT \"id\" FROM \"orders\" ROWS (? + 1) TO (? + ?)"
    );
}

#[test]
fn fromless_select_uses_dummy_table() {
    let select = SelectStatement::new().column(Expr::integer(1));
    assert_eq!(compile(&Statement::Select(select)), "SELECT 1 FROM RDB$DATABASE");
}

#[test]
fn booleans_compare_against_digits() {
    let select = SelectStatement::new()
        .column(Expr::column("id"))
        .from(TableRef::table("users"))
        .and_where(Expr::column("active").eq(Expr::boolean(true)));
    assert_eq!(
        compile(&Statement::Select(select)),
        "SELECT \"id\" FROM \"users\" WHERE \"active\" = 1"
    );
}

#[test]
fn rename_table_is_rejected() {
    let ddl = Statement::Ddl(DdlStatement::RenameTable {
        schema: None,
        old_name: String::from("orders"),
        new_name: String::from("orders_old"),
    });
    assert!(matches!(
        compile_err(&ddl),
        CompileError::Unsupported("RENAME TABLE")
    ));
}

#[test]
fn intersect_fails_at_both_gates() {
    // Capability gate, checked before any text is emitted.
    let select = SelectStatement::new()
        .column(Expr::column("id"))
        .from(TableRef::table("a"))
        .set_op(
            SetOperator::Intersect,
            false,
            SelectStatement::new()
                .column(Expr::column("id"))
                .from(TableRef::table("b")),
        );
    assert!(matches!(
        compile_err(&Statement::Select(select)),
        CompileError::Unsupported("INTERSECT")
    ));

    // Translator gate, for callers that bypass the compiler.
    assert!(FirebirdTranslator
        .set_operator(SetOperator::Intersect)
        .is_err());
}

#[test]
fn update_lock_renders_with_lock() {
    let select = SelectStatement::new()
        .column(Expr::column("id"))
        .from(TableRef::table("orders"))
        .lock(LockClause::update());
    assert_eq!(
        compile(&Statement::Select(select)),
        "SELECT \"id\" FROM \"orders\" WITH LOCK"
    );
}

#[test]
fn shared_and_skip_locked_are_rejected() {
    let shared = SelectStatement::new()
        .column(Expr::column("id"))
        .from(TableRef::table("orders"))
        .lock(LockClause::share());
    assert!(matches!(
        compile_err(&Statement::Select(shared)),
        CompileError::Unsupported(_)
    ));

    let skip = SelectStatement::new()
        .column(Expr::column("id"))
        .from(TableRef::table("orders"))
        .lock(LockClause {
            mode: sqldom_core::ast::LockMode::Update,
            skip_locked: true,
        });
    assert!(matches!(
        compile_err(&Statement::Select(skip)),
        CompileError::Unsupported("SKIP LOCKED")
    ));
}

#[test]
fn global_temporary_table_renders_on_commit() {
    let mut table = Table::new("session_data").with_scope(TableScope::GlobalTemporary {
        preserve_rows: true,
    });
    table
        .add_column(Column::new("id", SqlType::Integer).not_null())
        .unwrap();
    let ddl = Statement::Ddl(DdlStatement::CreateTable {
        schema: None,
        table,
    });
    assert_eq!(
        compile(&ddl),
        "CREATE GLOBAL TEMPORARY TABLE \"session_data\" (\"id\" INTEGER NOT NULL) \
         ON COMMIT PRESERVE ROWS"
    );
}

#[test]
fn boolean_column_is_stored_as_smallint() {
    let mut table = Table::new("users");
    table
        .add_column(Column::new("active", SqlType::Boolean).not_null())
        .unwrap();
    let ddl = Statement::Ddl(DdlStatement::CreateTable {
        schema: None,
        table,
    });
    assert_eq!(
        compile(&ddl),
        "CREATE TABLE \"users\" (\"active\" SMALLINT NOT NULL)"
    );
}

#[test]
fn create_sequence_with_restart_is_two_statements() {
    let ddl = Statement::Ddl(DdlStatement::CreateSequence {
        schema: None,
        sequence: Sequence {
            name: String::from("seq_orders"),
            descriptor: SequenceDescriptor {
                min_value: None,
                increment: 1,
                current_value: Some(42),
            },
        },
    });
    assert_eq!(
        compile(&ddl),
        "CREATE SEQUENCE \"seq_orders\";\nALTER SEQUENCE \"seq_orders\" RESTART WITH 42"
    );
}

#[test]
fn plain_create_sequence_is_one_statement() {
    let ddl = Statement::Ddl(DdlStatement::CreateSequence {
        schema: None,
        sequence: Sequence::new("seq_orders"),
    });
    assert_eq!(compile(&ddl), "CREATE SEQUENCE \"seq_orders\"");
}

#[test]
fn sequence_advance_compiles_to_gen_id() {
    let select = SelectStatement::new().column(Expr::NextValue {
        sequence: String::from("seq_orders"),
        increment: 1,
    });
    assert_eq!(
        compile(&Statement::Select(select)),
        "SELECT GEN_ID(\"seq_orders\", 1) FROM RDB$DATABASE"
    );
}

#[test]
fn expression_index_renders_computed_by() {
    let index = Index::new(
        "ix_users_lower_name",
        false,
        vec![IndexSegment::expression("LOWER(name)")],
    )
    .unwrap();
    let ddl = Statement::Ddl(DdlStatement::CreateIndex {
        schema: None,
        table: String::from("users"),
        index,
    });
    assert_eq!(
        compile(&ddl),
        "CREATE INDEX \"ix_users_lower_name\" ON \"users\" COMPUTED BY (LOWER(name))"
    );
}

#[test]
fn descending_index_direction_is_index_wide() {
    let index = Index::new(
        "ix_orders_placed",
        true,
        vec![IndexSegment::column("placed_on").descending()],
    )
    .unwrap();
    let ddl = Statement::Ddl(DdlStatement::CreateIndex {
        schema: None,
        table: String::from("orders"),
        index,
    });
    assert_eq!(
        compile(&ddl),
        "CREATE UNIQUE DESCENDING INDEX \"ix_orders_placed\" ON \"orders\" (\"placed_on\")"
    );
}

#[test]
fn drop_column_has_no_column_keyword() {
    let ddl = Statement::Ddl(DdlStatement::DropColumn {
        schema: None,
        table: String::from("users"),
        column: String::from("age"),
    });
    assert_eq!(compile(&ddl), "ALTER TABLE \"users\" DROP \"age\"");
}

#[test]
fn insert_from_select_renders_bare() {
    let source = SelectStatement::new()
        .column(Expr::column("id"))
        .from(TableRef::table("staging"));
    let insert = sqldom_core::ast::InsertStatement {
        schema: None,
        table: String::from("orders"),
        columns: vec![String::from("id")],
        source: sqldom_core::ast::InsertSource::Query(Box::new(TableRef::subquery(source, "q"))),
    };
    assert_eq!(
        compile(&Statement::Insert(insert)),
        "INSERT INTO \"orders\" (\"id\") SELECT \"id\" FROM \"staging\""
    );
}

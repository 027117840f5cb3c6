#![allow(dead_code)]

use oxide_render_core::ast::{
    CompareOp, DataType, Expr, Field, Predicate, Statement, Table, Value, ValueType,
};
use oxide_render_core::{RenderConfig, RenderError, SqlProvider};
use oxide_render_firebird::FirebirdDialect;

pub fn provider() -> SqlProvider<FirebirdDialect> {
    SqlProvider::new(FirebirdDialect::new(), RenderConfig::default())
}

pub fn quoting_provider() -> SqlProvider<FirebirdDialect> {
    SqlProvider::new(
        FirebirdDialect::new(),
        RenderConfig::new().with_quote_identifiers(true),
    )
}

/// Renders a statement that must produce exactly one command.
pub fn render(statement: Statement) -> String {
    let mut commands = render_all(statement);
    assert_eq!(commands.len(), 1, "Expected one command, got {commands:?}");
    commands.remove(0)
}

pub fn render_all(statement: Statement) -> Vec<String> {
    provider()
        .build_sql(statement)
        .unwrap_or_else(|e| panic!("Failed to render: {e}"))
}

pub fn render_err(statement: Statement) -> RenderError {
    provider()
        .build_sql(statement)
        .expect_err("Expected a render error")
}

/// `people(id INTEGER identity primary key, name VARCHAR(50), age INTEGER)`.
pub fn people() -> Table {
    Table::new("people")
        .column(Field::new("id", DataType::Int32).identity().primary_key())
        .column(Field::new("name", DataType::NVarChar(Some(50))))
        .column(Field::new("age", DataType::Int32))
}

/// `people` with its identity fed from `people_seq`.
pub fn sequenced_people() -> Table {
    Table::new("people")
        .column(
            Field::new("id", DataType::Int32)
                .identity()
                .primary_key()
                .sequence("people_seq"),
        )
        .column(Field::new("name", DataType::NVarChar(Some(50))))
}

/// `tags(tag VARCHAR(20))`, no identity.
pub fn tags() -> Table {
    Table::new("tags").column(Field::new("tag", DataType::VarChar(Some(20))).not_null())
}

pub fn col(table: Option<&str>, name: &str) -> Expr {
    Expr::field(table, name, ValueType::Integer)
}

pub fn param(name: &str, value: i64) -> Expr {
    Expr::parameter(name, Value::Integer(value))
}

pub fn eq(left: Expr, right: Expr) -> Predicate {
    Predicate::Compare {
        left,
        op: CompareOp::Eq,
        right,
    }
}

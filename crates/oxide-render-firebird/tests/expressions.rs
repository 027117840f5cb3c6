//! Expression rewrites rendered end to end.

mod common;
use common::*;

use oxide_render_core::ast::{
    BinaryOp, DataType, DatePart, Expr, SelectQuery, Statement, TableSource, ValueType,
};

fn select(expr: Expr) -> String {
    let query = SelectQuery::new()
        .column(expr)
        .from(TableSource::table(people()));
    let sql = render(Statement::Select(query));
    sql.strip_prefix("SELECT ")
        .and_then(|s| s.strip_suffix(" FROM people"))
        .unwrap_or_else(|| panic!("Unexpected shape: {sql}"))
        .to_string()
}

fn date(name: &str) -> Expr {
    Expr::field(None, name, ValueType::DateTime)
}

fn text(name: &str) -> Expr {
    Expr::field(None, name, ValueType::String)
}

#[test]
fn integer_operators_become_functions() {
    assert_eq!(select(col(None, "a").binary(BinaryOp::Mod, Expr::integer(3))), "Mod(a, 3)");
    assert_eq!(select(col(None, "a").binary(BinaryOp::BitAnd, col(None, "b"))), "Bin_And(a, b)");
    assert_eq!(select(col(None, "a").binary(BinaryOp::BitOr, col(None, "b"))), "Bin_Or(a, b)");
    assert_eq!(select(col(None, "a").binary(BinaryOp::BitXor, col(None, "b"))), "Bin_Xor(a, b)");
}

#[test]
fn rewritten_operands_are_rewritten_too() {
    let inner = col(None, "a").binary(BinaryOp::Mod, Expr::integer(2));
    assert_eq!(
        select(inner.binary(BinaryOp::BitOr, Expr::integer(1))),
        "Bin_Or(Mod(a, 2), 1)"
    );
}

#[test]
fn string_addition_becomes_concatenation() {
    assert_eq!(
        select(text("first").binary(BinaryOp::Add, text("last"))),
        "first || last"
    );
    assert_eq!(
        select(col(None, "a").binary(BinaryOp::Add, col(None, "b"))),
        "a + b"
    );
}

#[test]
fn arithmetic_keeps_its_parentheses() {
    let sum = col(None, "a").binary(BinaryOp::Add, col(None, "b"));
    assert_eq!(select(sum.binary(BinaryOp::Mul, Expr::integer(2))), "(a + b) * 2");
}

#[test]
fn cast_to_boolean_compares_with_zero() {
    assert_eq!(
        select(col(None, "age").convert(DataType::Boolean)),
        "CASE WHEN age = 0 THEN 0 ELSE 1 END"
    );
}

#[test]
fn date_add_rewrites_unsupported_parts() {
    assert_eq!(
        select(Expr::date_add(DatePart::Quarter, Expr::integer(2), date("born"))),
        "DATEADD(MONTH, 2 * 3, born)"
    );
    assert_eq!(
        select(Expr::date_add(DatePart::Week, Expr::integer(1), date("born"))),
        "DATEADD(DAY, 1 * 7, born)"
    );
    assert_eq!(
        select(Expr::date_add(DatePart::DayOfYear, Expr::integer(4), date("born"))),
        "DATEADD(DAY, 4, born)"
    );
    assert_eq!(
        select(Expr::date_add(DatePart::Year, Expr::integer(1), date("born"))),
        "DATEADD(YEAR, 1, born)"
    );
}

#[test]
fn extract_quarter_is_computed_from_month() {
    assert_eq!(
        select(Expr::extract(DatePart::Quarter, date("born"))),
        "1 + FLOOR((EXTRACT(MONTH FROM born) - 1) / 3)"
    );
}

#[test]
fn extract_counts_days_from_one() {
    assert_eq!(
        select(Expr::extract(DatePart::DayOfYear, date("born"))),
        "EXTRACT(yearday FROM born) + 1"
    );
    assert_eq!(
        select(Expr::extract(DatePart::WeekDay, date("born"))),
        "EXTRACT(weekday FROM born) + 1"
    );
    assert_eq!(
        select(Expr::extract(DatePart::Year, date("born"))),
        "EXTRACT(YEAR FROM born)"
    );
}

//! INSERT, UPDATE, DELETE and insert-or-update rendering.

mod common;
use common::*;

use oxide_render_core::ast::{
    DataType, DeleteStatement, Expr, Field, InsertOrUpdateStatement, InsertStatement,
    SelectQuery, SetItem, Statement, Table, TableSource, UpdateStatement, Value, ValueType,
};
use oxide_render_core::RenderError;

fn insert(into: Table, items: Vec<SetItem>, with_identity: bool) -> Statement {
    Statement::Insert(InsertStatement {
        into,
        items,
        with_identity,
    })
}

fn ann() -> Vec<SetItem> {
    vec![SetItem::new("name", Expr::string("Ann"))]
}

#[test]
fn insert_without_generator() {
    assert_eq!(
        render(insert(people(), ann(), false)),
        "INSERT INTO people (name) VALUES ('Ann')"
    );
}

#[test]
fn insert_fills_identity_from_generator() {
    assert_eq!(
        render(insert(sequenced_people(), ann(), false)),
        "INSERT INTO people (name, id) VALUES ('Ann', GEN_ID(people_seq, 1))"
    );
}

#[test]
fn insert_keeps_explicit_identity() {
    let items = vec![
        SetItem::new("id", Expr::integer(42)),
        SetItem::new("name", Expr::string("Ann")),
    ];
    assert_eq!(
        render(insert(sequenced_people(), items, false)),
        "INSERT INTO people (id, name) VALUES (42, 'Ann')"
    );
}

#[test]
fn insert_returning_identity() {
    assert_eq!(
        render(insert(people(), ann(), true)),
        "INSERT INTO people (name) VALUES ('Ann') RETURNING id"
    );
    assert_eq!(
        render(insert(sequenced_people(), ann(), true)),
        "INSERT INTO people (name, id) VALUES ('Ann', GEN_ID(people_seq, 1)) RETURNING id"
    );
}

#[test]
fn insert_parameters_stay_markers() {
    let items = vec![SetItem::new(
        "name",
        Expr::parameter("name", Value::String(String::from("Ann"))),
    )];
    assert_eq!(
        render(insert(people(), items, false)),
        "INSERT INTO people (name) VALUES (@name)"
    );
}

#[test]
fn returning_requires_one_identity_field() {
    let err = render_err(insert(tags(), vec![SetItem::new("tag", Expr::string("x"))], true));
    assert!(matches!(err, RenderError::MissingIdentityField { table } if table == "tags"));

    let twice = Table::new("pairs")
        .column(Field::new("a", DataType::Int32).identity())
        .column(Field::new("b", DataType::Int32).identity());
    let err = render_err(insert(twice, Vec::new(), true));
    assert!(matches!(err, RenderError::MissingIdentityField { table } if table == "pairs"));
}

#[test]
fn update_single_table() {
    let update = UpdateStatement {
        table: people(),
        alias: None,
        items: vec![SetItem::new("age", param("age", 3))],
        query: SelectQuery::new().filter(eq(col(None, "id"), param("id", 1))),
    };
    assert_eq!(
        render(Statement::Update(update)),
        "UPDATE people SET age = @age WHERE id = @id"
    );
}

#[test]
fn update_with_other_sources_uses_subqueries() {
    let update = UpdateStatement {
        table: people(),
        alias: Some(String::from("p")),
        items: vec![
            SetItem::new("name", Expr::field(Some("n"), "name", ValueType::String)),
            SetItem::new("age", Expr::integer(0)),
        ],
        query: SelectQuery::new()
            .from(TableSource::table(Table::new("names")).alias("n"))
            .filter(eq(col(Some("n"), "id"), col(Some("p"), "id"))),
    };
    assert_eq!(
        render(Statement::Update(update)),
        "UPDATE people p \
         SET name = (SELECT n.name FROM names n WHERE n.id = p.id), age = 0 \
         WHERE EXISTS (SELECT * FROM names n WHERE n.id = p.id)"
    );
}

#[test]
fn delete_single_table() {
    let delete = DeleteStatement {
        table: people(),
        alias: None,
        query: SelectQuery::new().filter(eq(col(None, "id"), param("id", 1))),
    };
    assert_eq!(
        render(Statement::Delete(delete)),
        "DELETE FROM people WHERE id = @id"
    );
}

#[test]
fn delete_with_other_sources_uses_exists() {
    let delete = DeleteStatement {
        table: people(),
        alias: Some(String::from("p")),
        query: SelectQuery::new()
            .from(TableSource::table(Table::new("bans")).alias("b"))
            .filter(eq(col(Some("b"), "person_id"), col(Some("p"), "id"))),
    };
    assert_eq!(
        render(Statement::Delete(delete)),
        "DELETE FROM people p WHERE EXISTS (SELECT * FROM bans b WHERE b.person_id = p.id)"
    );
}

#[test]
fn insert_or_update_is_merge_over_dummy_table() {
    let name = || Expr::parameter("name", Value::String(String::from("Ann")));
    let upsert = InsertOrUpdateStatement {
        table: people(),
        insert: vec![SetItem::new("id", param("id", 1)), SetItem::new("name", name())],
        update: vec![SetItem::new("name", name())],
        keys: vec![SetItem::new("id", param("id", 1))],
    };
    let statement = Statement::InsertOrUpdate(upsert);

    assert!(provider().finalize(statement.clone()).query_parameters().is_empty());
    assert_eq!(
        render(statement),
        "MERGE INTO people t1 USING (SELECT 1 AS dummy FROM rdb$database) s ON (t1.id = 1) \
         WHEN MATCHED THEN UPDATE SET name = 'Ann' \
         WHEN NOT MATCHED THEN INSERT (id, name) VALUES (1, 'Ann')"
    );
}

#[test]
fn insert_or_update_without_insert_items_only_updates() {
    let upsert = InsertOrUpdateStatement {
        table: people(),
        insert: Vec::new(),
        update: vec![SetItem::new("name", Expr::string("x"))],
        keys: vec![SetItem::new("id", param("id", 1))],
    };
    assert_eq!(
        render(Statement::InsertOrUpdate(upsert)),
        "MERGE INTO people t1 USING (SELECT 1 AS dummy FROM rdb$database) s ON (t1.id = 1) \
         WHEN MATCHED THEN UPDATE SET name = 'x'"
    );
}

#[test]
fn insert_or_update_needs_keys() {
    let upsert = InsertOrUpdateStatement {
        table: tags(),
        insert: vec![SetItem::new("tag", Expr::string("x"))],
        update: Vec::new(),
        keys: Vec::new(),
    };
    let err = render_err(Statement::InsertOrUpdate(upsert));
    assert!(matches!(err, RenderError::Unsupported { dialect: "firebird", .. }));
}

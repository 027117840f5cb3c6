//! CREATE/DROP TABLE and the generator/trigger identity emulation.

mod common;
use common::*;

use oxide_render_core::ast::{CreateTableStatement, DropTableStatement, Statement, Table};
use oxide_render_core::{IdentityState, RenderError};

fn create(table: Table) -> Statement {
    Statement::CreateTable(CreateTableStatement { table })
}

fn drop_table(table: Table) -> Statement {
    Statement::DropTable(DropTableStatement { table })
}

#[test]
fn create_identity_table_runs_three_commands() {
    assert_eq!(
        render_all(create(people())),
        vec![
            String::from("CREATE GENERATOR GIDENTITY_people"),
            String::from(
                "CREATE TABLE people (\n\
                 \x20   id INTEGER NOT NULL,\n\
                 \x20   name VARCHAR(50),\n\
                 \x20   age INTEGER,\n\
                 \x20   CONSTRAINT PK_people PRIMARY KEY (id)\n\
                 )"
            ),
            String::from(
                "CREATE TRIGGER TIDENTITY_people FOR people\n\
                 BEFORE INSERT POSITION 0\n\
                 AS BEGIN\n\
                 \x20   NEW.id = GEN_ID(GIDENTITY_people, 1);\n\
                 END"
            ),
        ]
    );
}

#[test]
fn drop_identity_table_drops_trigger_then_generator_then_table() {
    assert_eq!(
        render_all(drop_table(people())),
        vec![
            String::from("DROP TRIGGER TIDENTITY_people"),
            String::from("DROP GENERATOR GIDENTITY_people"),
            String::from("DROP TABLE people"),
        ]
    );
}

#[test]
fn plain_tables_run_one_command() {
    assert_eq!(
        render(create(tags())),
        "CREATE TABLE tags (\n\
         \x20   tag VARCHAR(20) NOT NULL\n\
         )"
    );
    assert_eq!(render(drop_table(tags())), "DROP TABLE tags");
}

#[test]
fn plan_records_the_identity_field() {
    let provider = provider();
    let statement = create(people());
    let plan = provider.command_plan(&statement);
    assert_eq!(plan.count(), 3);
    assert!(matches!(plan.identity(), IdentityState::Pending(f) if f.physical_name == "id"));

    let plain = provider.command_plan(&create(tags()));
    assert_eq!(plain.count(), 1);
    assert!(matches!(plain.identity(), IdentityState::NotIdentity));
}

#[test]
fn commands_can_be_rendered_one_by_one() {
    let provider = provider();
    let statement = provider.finalize(drop_table(people()));
    let plan = provider.command_plan(&statement);

    assert_eq!(
        provider.build_command(&statement, &plan, 1).unwrap(),
        "DROP GENERATOR GIDENTITY_people"
    );
    assert_eq!(
        provider.build_command(&statement, &plan, 2).unwrap(),
        "DROP TABLE people"
    );
    assert!(matches!(
        provider.build_command(&statement, &plan, 3),
        Err(RenderError::CommandOutOfRange { index: 3, count: 3 })
    ));
}

#[test]
fn plans_are_independent_of_each_other() {
    let provider = provider();
    let with_identity = create(people());
    let without = create(tags());
    let first = provider.command_plan(&with_identity);
    let second = provider.command_plan(&without);

    assert_eq!(
        provider.build_command(&with_identity, &first, 0).unwrap(),
        "CREATE GENERATOR GIDENTITY_people"
    );
    assert!(provider
        .build_command(&without, &second, 0)
        .unwrap()
        .starts_with("CREATE TABLE tags"));
}

#[test]
fn trigger_uses_quoted_names() {
    let sql = quoting_provider().build_sql(create(people())).unwrap();
    assert_eq!(sql[0], "CREATE GENERATOR GIDENTITY_people");
    assert!(sql[1].starts_with("CREATE TABLE \"people\" (\n    \"id\" INTEGER NOT NULL,"));
    assert_eq!(
        sql[2],
        "CREATE TRIGGER TIDENTITY_people FOR \"people\"\n\
         BEFORE INSERT POSITION 0\n\
         AS BEGIN\n\
         \x20   NEW.\"id\" = GEN_ID(GIDENTITY_people, 1);\n\
         END"
    );
}

//! Identity column emulation with a generator and a BEFORE INSERT trigger.
//!
//! Creating a table with an identity field expands to three commands:
//!
//! 1. `CREATE GENERATOR GIDENTITY_<table>`
//! 2. the CREATE TABLE itself
//! 3. `CREATE TRIGGER TIDENTITY_<table>` feeding the field from the generator
//!
//! Dropping it takes three commands as well: the trigger, then the
//! generator, then the table.

use oxide_render_core::ast::{Field, Statement, Table};
use oxide_render_core::{CommandPlan, ConvertType, IdentityState, RenderError, Renderer, Result};
use tracing::debug;

/// Prefix of the generator backing an identity column.
pub const GENERATOR_PREFIX: &str = "GIDENTITY_";

/// Prefix of the trigger filling an identity column.
pub const TRIGGER_PREFIX: &str = "TIDENTITY_";

/// Number of commands when an identity is emulated.
const IDENTITY_COMMANDS: usize = 3;

/// Plans three commands for a CREATE/DROP TABLE of a table with an identity field.
#[must_use]
pub fn command_plan(statement: &Statement) -> Option<CommandPlan> {
    let table = statement.ddl_table()?;
    let field = table.identity_fields().next()?;
    debug!(
        table = %table.physical_name,
        field = %field.physical_name,
        kind = statement.kind().as_str(),
        "Emulating identity with generator and trigger"
    );
    Some(CommandPlan::with_identity(IDENTITY_COMMANDS, field.clone()))
}

/// Renders identity commands; declines when the plan records no identity.
pub fn build_command(
    r: &Renderer<'_>,
    statement: &Statement,
    plan: &CommandPlan,
    index: usize,
) -> Result<Option<String>> {
    match plan.identity() {
        IdentityState::NotIdentity => Ok(None),
        IdentityState::Pending(_) => build_identity_command(r, statement, plan, index).map(Some),
    }
}

/// Renders command `index` of an identity plan.
///
/// # Errors
///
/// - [`RenderError::IdentityNotRecorded`] if the plan carries no identity field.
/// - [`RenderError::IdentityMismatch`] if the statement is not CREATE/DROP TABLE
///   or the field is not an identity field of its table.
/// - [`RenderError::CommandOutOfRange`] if `index` is past the last command.
pub fn build_identity_command(
    r: &Renderer<'_>,
    statement: &Statement,
    plan: &CommandPlan,
    index: usize,
) -> Result<String> {
    let Some(field) = plan.identity_field() else {
        return Err(RenderError::IdentityNotRecorded {
            table: statement
                .table()
                .map_or_else(|| String::from(statement.kind().as_str()), |t| t.physical_name.clone()),
        });
    };
    let Some(table) = statement.ddl_table() else {
        return Err(RenderError::IdentityMismatch {
            field: field.physical_name.clone(),
            target: String::from(statement.kind().as_str()),
        });
    };
    if !table.identity_fields().any(|f| f == field) {
        return Err(RenderError::IdentityMismatch {
            field: field.physical_name.clone(),
            target: table.physical_name.clone(),
        });
    }

    let sql = match (statement, index) {
        (Statement::CreateTable(_), 0) => create_generator(table),
        (Statement::CreateTable(_), 1) => r.build_create_table(table),
        (Statement::CreateTable(_), 2) => create_trigger(r, table, field),
        (Statement::DropTable(_), 0) => drop_table_body(r, table, plan),
        (Statement::DropTable(_), 1) => drop_generator(table),
        (Statement::DropTable(_), 2) => r.build_drop_table(table),
        _ => {
            return Err(RenderError::CommandOutOfRange {
                index,
                count: plan.count(),
            })
        }
    };
    Ok(sql)
}

/// The first DROP command: the trigger when an identity is recorded,
/// otherwise the table itself.
#[must_use]
pub fn drop_table_body(r: &Renderer<'_>, table: &Table, plan: &CommandPlan) -> String {
    match plan.identity() {
        IdentityState::Pending(_) => format!("DROP TRIGGER {TRIGGER_PREFIX}{}", table.physical_name),
        IdentityState::NotIdentity => r.build_drop_table(table),
    }
}

fn create_generator(table: &Table) -> String {
    format!("CREATE GENERATOR {GENERATOR_PREFIX}{}", table.physical_name)
}

fn drop_generator(table: &Table) -> String {
    format!("DROP GENERATOR {GENERATOR_PREFIX}{}", table.physical_name)
}

fn create_trigger(r: &Renderer<'_>, table: &Table, field: &Field) -> String {
    let name = &table.physical_name;
    format!(
        "CREATE TRIGGER {TRIGGER_PREFIX}{name} FOR {}\n\
         BEFORE INSERT POSITION 0\n\
         AS BEGIN\n\
         \x20   NEW.{} = GEN_ID({GENERATOR_PREFIX}{name}, 1);\n\
         END",
        r.convert_name(name, ConvertType::NameToQueryTable),
        r.convert_name(&field.physical_name, ConvertType::NameToQueryField),
    )
}

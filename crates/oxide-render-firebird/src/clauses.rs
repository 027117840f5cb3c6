//! Clause overrides.

use oxide_render_core::ast::{
    precedence, Expr, Field, InsertOrUpdateStatement, InsertStatement, SelectQuery, StatementKind,
    Table, ValueType,
};
use oxide_render_core::{ConvertType, RenderConfig, RenderError, Renderer, Result};

/// One-row system table used where Firebird requires a FROM clause.
pub const DUMMY_TABLE: &str = "rdb$database";

/// `SELECT ... FROM rdb$database` for queries without sources.
pub fn select_clause(r: &Renderer<'_>, query: &SelectQuery) -> Result<Option<String>> {
    if !query.from.is_empty() {
        return Ok(None);
    }
    Ok(Some(format!(
        "{} FROM {DUMMY_TABLE}",
        r.default_select_clause(query)?
    )))
}

/// UPDATE never carries a FROM clause.
#[must_use]
pub fn from_clause(kind: StatementKind) -> Option<String> {
    (kind == StatementKind::Update).then(String::new)
}

/// Firebird has no boolean columns: boolean search conditions are selected as 1/0.
pub fn column_expression(r: &Renderer<'_>, expr: &Expr) -> Result<Option<String>> {
    if expr.value_type() != ValueType::Boolean || !expr.is_search_condition() {
        return Ok(None);
    }
    Ok(Some(format!(
        "CASE WHEN {} THEN 1 ELSE 0 END",
        r.build_expression(expr)?
    )))
}

/// `RETURNING <identity>`; the table must have exactly one identity field.
pub fn get_identity(r: &Renderer<'_>, insert: &InsertStatement) -> Result<Option<String>> {
    let table = &insert.into;
    let mut identities = table.identity_fields();
    match (identities.next(), identities.next()) {
        (Some(field), None) => Ok(Some(format!(
            "RETURNING {}",
            r.convert_name(&field.physical_name, ConvertType::NameToQueryField)
        ))),
        _ => Err(RenderError::MissingIdentityField {
            table: table.physical_name.clone(),
        }),
    }
}

/// `GEN_ID(<sequence>, 1)` when the table declares a sequence.
#[must_use]
pub fn identity_expression(table: &Table) -> Option<Expr> {
    table.sequence_name().map(|sequence| {
        Expr::raw(
            format!("GEN_ID({sequence}, 1)"),
            ValueType::Integer,
            precedence::PRIMARY,
            Vec::new(),
        )
    })
}

/// Upsert as MERGE over the dummy table.
pub fn insert_or_update(
    r: &Renderer<'_>,
    statement: &InsertOrUpdateStatement,
) -> Result<Option<String>> {
    r.build_insert_or_update_as_merge(statement, Some(DUMMY_TABLE))
        .map(Some)
}

/// `NOT NULL`, or nothing for nullable columns.
#[must_use]
pub fn create_table_null_attribute(field: &Field) -> String {
    if field.nullable {
        String::new()
    } else {
        String::from("NOT NULL")
    }
}

/// Firebird naming: optional double quotes and `@` parameters.
#[must_use]
pub fn convert_name(name: &str, kind: ConvertType, config: &RenderConfig) -> Option<String> {
    match kind {
        ConvertType::NameToQueryField
        | ConvertType::NameToQueryTable
        | ConvertType::NameToQueryTableAlias => {
            if !config.quote_identifiers || name.starts_with('"') {
                return None;
            }
            Some(format!("\"{name}\""))
        }
        ConvertType::NameToQueryParameter
        | ConvertType::NameToCommandParameter
        | ConvertType::NameToSprocParameter => Some(format!("@{name}")),
        ConvertType::SprocParameterToName => {
            Some(name.strip_prefix('@').unwrap_or(name).to_string())
        }
        ConvertType::NameToQueryFieldAlias => None,
    }
}

//! Firebird dialect implementation.

use std::borrow::Cow;

use oxide_render_core::ast::{
    DataType, Expr, Field, InsertOrUpdateStatement, InsertStatement, SelectQuery, Statement,
    StatementKind, Table,
};
use oxide_render_core::{CommandPlan, ConvertType, Dialect, RenderConfig, Renderer, Result};
use tracing::trace;

use crate::{clauses, finalize, identity, rewrite, types};

/// Firebird dialect.
#[derive(Debug, Default, Clone, Copy)]
pub struct FirebirdDialect;

impl FirebirdDialect {
    /// Creates a new Firebird dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for FirebirdDialect {
    fn name(&self) -> &'static str {
        "firebird"
    }

    fn convert_expression<'e>(&self, expr: &'e Expr) -> Cow<'e, Expr> {
        match rewrite::convert_expression(expr) {
            Some(converted) => {
                trace!(from = ?expr, to = ?converted, "Rewrote expression");
                Cow::Owned(converted)
            }
            None => Cow::Borrowed(expr),
        }
    }

    fn data_type(&self, data_type: &DataType) -> Option<String> {
        Some(types::map_data_type(data_type))
    }

    fn convert_name(&self, name: &str, kind: ConvertType, config: &RenderConfig) -> Option<String> {
        clauses::convert_name(name, kind, config)
    }

    fn skip_first(&self) -> bool {
        false
    }

    fn skip_format(&self) -> Option<&'static str> {
        Some("SKIP {0}")
    }

    fn first_format(&self) -> Option<&'static str> {
        Some("FIRST {0}")
    }

    fn limit_format(&self) -> Option<&'static str> {
        None
    }

    fn offset_format(&self) -> Option<&'static str> {
        None
    }

    fn select_clause(&self, r: &Renderer<'_>, query: &SelectQuery) -> Result<Option<String>> {
        clauses::select_clause(r, query)
    }

    fn from_clause(
        &self,
        _r: &Renderer<'_>,
        kind: StatementKind,
        _query: &SelectQuery,
    ) -> Result<Option<String>> {
        Ok(clauses::from_clause(kind))
    }

    fn column_expression(&self, r: &Renderer<'_>, expr: &Expr) -> Result<Option<String>> {
        clauses::column_expression(r, expr)
    }

    fn get_identity(&self, r: &Renderer<'_>, insert: &InsertStatement) -> Result<Option<String>> {
        clauses::get_identity(r, insert)
    }

    fn identity_expression(&self, table: &Table, _field: &Field) -> Option<Expr> {
        clauses::identity_expression(table)
    }

    fn insert_or_update(
        &self,
        r: &Renderer<'_>,
        statement: &InsertOrUpdateStatement,
    ) -> Result<Option<String>> {
        clauses::insert_or_update(r, statement)
    }

    fn create_table_null_attribute(&self, field: &Field) -> Option<String> {
        Some(clauses::create_table_null_attribute(field))
    }

    fn command_plan(&self, statement: &Statement) -> Option<CommandPlan> {
        identity::command_plan(statement)
    }

    fn build_command(
        &self,
        r: &Renderer<'_>,
        statement: &Statement,
        plan: &CommandPlan,
        index: usize,
    ) -> Result<Option<String>> {
        identity::build_command(r, statement, plan, index)
    }

    fn finalize(&self, statement: Statement) -> Statement {
        finalize::finalize(statement)
    }
}

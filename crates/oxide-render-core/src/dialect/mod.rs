//! SQL Dialect support.
//!
//! Different databases spell the same statement differently. A [`Dialect`]
//! is a strategy consulted by the [`Renderer`] at every overridable point.
//! Each hook either produces the dialect's text or declines (`None` /
//! `Ok(None)`), in which case the renderer falls back to its generic form.

mod generic;

use std::borrow::Cow;

pub use generic::GenericDialect;

use crate::ast::{
    DataType, Expr, Field, InsertOrUpdateStatement, InsertStatement, SelectQuery, Statement,
    StatementKind, Table,
};
use crate::command::CommandPlan;
use crate::config::RenderConfig;
use crate::error::Result;
use crate::render::Renderer;

/// The role a name plays at the point it is emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConvertType {
    /// A column reference.
    NameToQueryField,
    /// A table reference.
    NameToQueryTable,
    /// A column output alias.
    NameToQueryFieldAlias,
    /// A table alias.
    NameToQueryTableAlias,
    /// A parameter marker inside query text.
    NameToQueryParameter,
    /// A parameter name on the command object.
    NameToCommandParameter,
    /// A stored procedure parameter name.
    NameToSprocParameter,
    /// A stored procedure parameter back to its logical name.
    SprocParameterToName,
}

/// Name conversion used when a dialect has no opinion.
#[must_use]
pub fn default_convert_name(name: &str, kind: ConvertType) -> String {
    match kind {
        ConvertType::NameToQueryParameter
        | ConvertType::NameToCommandParameter
        | ConvertType::NameToSprocParameter => format!(":{name}"),
        ConvertType::SprocParameterToName => name.strip_prefix(':').unwrap_or(name).to_string(),
        ConvertType::NameToQueryField
        | ConvertType::NameToQueryTable
        | ConvertType::NameToQueryFieldAlias
        | ConvertType::NameToQueryTableAlias => name.to_string(),
    }
}

/// Trait for SQL dialect-specific behavior.
pub trait Dialect: Send + Sync {
    /// Returns the name of the dialect.
    fn name(&self) -> &'static str;

    /// Rewrites a single expression node. Called once per node while rendering.
    fn convert_expression<'e>(&self, expr: &'e Expr) -> Cow<'e, Expr> {
        Cow::Borrowed(expr)
    }

    /// Returns the column type text for `data_type`.
    fn data_type(&self, _data_type: &DataType) -> Option<String> {
        None
    }

    /// Converts a name for the given role.
    fn convert_name(&self, _name: &str, _kind: ConvertType, _config: &RenderConfig) -> Option<String> {
        None
    }

    /// Whether SKIP is emitted before FIRST.
    fn skip_first(&self) -> bool {
        true
    }

    /// Template for the SKIP token after SELECT.
    fn skip_format(&self) -> Option<&'static str> {
        None
    }

    /// Template for the FIRST token after SELECT.
    fn first_format(&self) -> Option<&'static str> {
        None
    }

    /// Template for a trailing LIMIT clause.
    fn limit_format(&self) -> Option<&'static str> {
        Some("LIMIT {0}")
    }

    /// Template for a trailing OFFSET clause.
    fn offset_format(&self) -> Option<&'static str> {
        Some("OFFSET {0}")
    }

    /// Renders the SELECT clause.
    fn select_clause(&self, _r: &Renderer<'_>, _query: &SelectQuery) -> Result<Option<String>> {
        Ok(None)
    }

    /// Renders the FROM clause of `query` inside a statement of kind `kind`.
    fn from_clause(
        &self,
        _r: &Renderer<'_>,
        _kind: StatementKind,
        _query: &SelectQuery,
    ) -> Result<Option<String>> {
        Ok(None)
    }

    /// Renders a selected column expression.
    fn column_expression(&self, _r: &Renderer<'_>, _expr: &Expr) -> Result<Option<String>> {
        Ok(None)
    }

    /// Renders the clause returning the generated identity of an INSERT.
    fn get_identity(&self, _r: &Renderer<'_>, _insert: &InsertStatement) -> Result<Option<String>> {
        Ok(None)
    }

    /// Value for an identity field the INSERT does not assign.
    fn identity_expression(&self, _table: &Table, _field: &Field) -> Option<Expr> {
        None
    }

    /// Renders an insert-or-update statement.
    fn insert_or_update(
        &self,
        _r: &Renderer<'_>,
        _statement: &InsertOrUpdateStatement,
    ) -> Result<Option<String>> {
        Ok(None)
    }

    /// Nullability suffix of a column in CREATE TABLE. `Some("")` emits nothing.
    fn create_table_null_attribute(&self, _field: &Field) -> Option<String> {
        None
    }

    /// Number of commands the statement expands to, and any per-statement state.
    fn command_plan(&self, _statement: &Statement) -> Option<CommandPlan> {
        None
    }

    /// Renders command `index` of the plan.
    fn build_command(
        &self,
        _r: &Renderer<'_>,
        _statement: &Statement,
        _plan: &CommandPlan,
        _index: usize,
    ) -> Result<Option<String>> {
        Ok(None)
    }

    /// Normalizes a statement before rendering.
    fn finalize(&self, statement: Statement) -> Statement {
        crate::finalize::finalize(statement)
    }
}

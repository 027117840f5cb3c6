//! The per-dialect entry point.

use tracing::debug;

use crate::ast::{DataType, Statement};
use crate::command::CommandPlan;
use crate::config::RenderConfig;
use crate::dialect::{ConvertType, Dialect};
use crate::error::{RenderError, Result};
use crate::render::Renderer;

/// Renders statements for one dialect with a fixed configuration.
///
/// A provider holds no per-statement state: everything a multi-command
/// statement needs travels in the [`CommandPlan`] returned by
/// [`command_plan`](Self::command_plan), so one provider can be shared
/// across threads.
#[derive(Debug, Clone)]
pub struct SqlProvider<D> {
    dialect: D,
    config: RenderConfig,
}

impl<D: Dialect> SqlProvider<D> {
    /// Creates a provider.
    #[must_use]
    pub const fn new(dialect: D, config: RenderConfig) -> Self {
        Self { dialect, config }
    }

    /// The dialect.
    #[must_use]
    pub const fn dialect(&self) -> &D {
        &self.dialect
    }

    /// The configuration.
    #[must_use]
    pub const fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// A renderer borrowing this provider's dialect and configuration.
    #[must_use]
    pub fn renderer(&self) -> Renderer<'_> {
        Renderer::new(&self.dialect, &self.config)
    }

    /// Normalizes a statement. Call once per statement before rendering.
    #[must_use]
    pub fn finalize(&self, statement: Statement) -> Statement {
        self.dialect.finalize(statement)
    }

    /// Computes how many commands `statement` renders to.
    #[must_use]
    pub fn command_plan(&self, statement: &Statement) -> CommandPlan {
        let plan = self
            .dialect
            .command_plan(statement)
            .unwrap_or_else(CommandPlan::single);
        debug!(
            dialect = self.dialect.name(),
            kind = statement.kind().as_str(),
            count = plan.count(),
            "Computed command plan"
        );
        plan
    }

    /// Renders command `index` of `plan`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::CommandOutOfRange`] when `index` is not below
    /// the plan's count, or any error raised while rendering.
    pub fn build_command(
        &self,
        statement: &Statement,
        plan: &CommandPlan,
        index: usize,
    ) -> Result<String> {
        if index >= plan.count() {
            return Err(RenderError::CommandOutOfRange {
                index,
                count: plan.count(),
            });
        }

        let renderer = self.renderer();
        if let Some(sql) = self
            .dialect
            .build_command(&renderer, statement, plan, index)?
        {
            return Ok(sql);
        }
        if index == 0 {
            return renderer.build_statement(statement);
        }
        Err(RenderError::CommandOutOfRange {
            index,
            count: plan.count(),
        })
    }

    /// Finalizes `statement` and renders every command of its plan, in order.
    ///
    /// # Errors
    ///
    /// Returns the first error raised while rendering a command.
    pub fn build_sql(&self, statement: Statement) -> Result<Vec<String>> {
        let statement = self.finalize(statement);
        let plan = self.command_plan(&statement);
        (0..plan.count())
            .map(|index| self.build_command(&statement, &plan, index))
            .collect()
    }

    /// Converts a name for the given role.
    #[must_use]
    pub fn convert_name(&self, name: &str, kind: ConvertType) -> String {
        self.renderer().convert_name(name, kind)
    }

    /// Returns the column type text for `data_type`.
    #[must_use]
    pub fn build_data_type(&self, data_type: &DataType) -> String {
        self.renderer().build_data_type(data_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{
        CreateTableStatement, Expr, Field, SelectQuery, Table, TableSource, Value,
    };
    use crate::dialect::GenericDialect;

    fn provider() -> SqlProvider<GenericDialect> {
        SqlProvider::new(GenericDialect::new(), RenderConfig::default())
    }

    #[test]
    fn test_build_sql_single_command() {
        let query = SelectQuery::new()
            .column_as(Expr::parameter("x", Value::Integer(1)), "a")
            .column_as(Expr::integer(2), "a")
            .from(TableSource::table(Table::new("t")));
        let sql = provider().build_sql(Statement::Select(query)).unwrap();
        assert_eq!(sql, vec!["SELECT :x AS a, 2 AS a_1 FROM t"]);
    }

    #[test]
    fn test_command_out_of_range() {
        let stmt = Statement::CreateTable(CreateTableStatement {
            table: Table::new("t").column(Field::new("id", DataType::Int32)),
        });
        let provider = provider();
        let plan = provider.command_plan(&stmt);
        assert_eq!(plan.count(), 1);
        let err = provider.build_command(&stmt, &plan, 1).unwrap_err();
        assert!(matches!(err, RenderError::CommandOutOfRange { index: 1, count: 1 }));
    }

    #[test]
    fn test_convert_name_and_types() {
        let provider = provider();
        assert_eq!(provider.convert_name("p", ConvertType::NameToQueryParameter), ":p");
        assert_eq!(provider.build_data_type(&DataType::Money), "MONEY");
    }
}

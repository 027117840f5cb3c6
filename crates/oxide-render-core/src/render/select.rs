//! SELECT rendering.

use crate::ast::{Expr, JoinType, SelectColumn, SelectQuery, Source, StatementKind, TableSource};
use crate::dialect::ConvertType;
use crate::error::Result;

use super::{fill_template, Renderer};

impl Renderer<'_> {
    /// Renders a SELECT query.
    ///
    /// # Errors
    ///
    /// Returns an error if a clause cannot be expressed by the dialect.
    pub fn build_select_query(&self, query: &SelectQuery) -> Result<String> {
        let mut parts = vec![self.build_select_clause(query)?];

        let from = self.build_from_clause(StatementKind::Select, query)?;
        if !from.is_empty() {
            parts.push(from);
        }
        parts.extend(self.build_where_clause(query)?);
        if !query.group_by.is_empty() {
            let exprs: Vec<String> = query
                .group_by
                .iter()
                .map(|e| self.build_expression(e))
                .collect::<Result<_>>()?;
            parts.push(format!("GROUP BY {}", exprs.join(", ")));
        }
        if !query.having.is_empty() {
            parts.push(format!(
                "HAVING {}",
                self.build_search_condition(&query.having)?
            ));
        }
        if !query.order_by.is_empty() {
            let items: Vec<String> = query
                .order_by
                .iter()
                .map(|o| -> Result<String> {
                    Ok(format!("{} {}", self.build_expression(&o.expr)?, o.direction.as_str()))
                })
                .collect::<Result<_>>()?;
            parts.push(format!("ORDER BY {}", items.join(", ")));
        }
        parts.extend(self.build_offset_limit(query)?);

        Ok(parts.join(" "))
    }

    /// Renders the SELECT clause, asking the dialect first.
    ///
    /// # Errors
    ///
    /// Returns an error if a column cannot be rendered.
    pub fn build_select_clause(&self, query: &SelectQuery) -> Result<String> {
        match self.dialect.select_clause(self, query)? {
            Some(sql) => Ok(sql),
            None => self.default_select_clause(query),
        }
    }

    /// The generic SELECT clause: `SELECT [paging] [DISTINCT] columns`.
    ///
    /// # Errors
    ///
    /// Returns an error if a column cannot be rendered.
    pub fn default_select_clause(&self, query: &SelectQuery) -> Result<String> {
        let mut sql = String::from("SELECT");
        for token in self.build_skip_first(query)? {
            sql.push(' ');
            sql.push_str(&token);
        }
        if query.distinct {
            sql.push_str(" DISTINCT");
        }
        sql.push(' ');
        sql.push_str(&self.build_columns(&query.columns)?);
        Ok(sql)
    }

    /// Paging tokens placed right after SELECT, in the dialect's order.
    ///
    /// # Errors
    ///
    /// Returns an error if a paging expression cannot be rendered.
    pub fn build_skip_first(&self, query: &SelectQuery) -> Result<Vec<String>> {
        let skip = match (&query.skip, self.dialect.skip_format()) {
            (Some(expr), Some(format)) => Some(self.build_paging_token(format, expr)?),
            _ => None,
        };
        let first = match (&query.take, self.dialect.first_format()) {
            (Some(expr), Some(format)) => Some(self.build_paging_token(format, expr)?),
            _ => None,
        };

        let ordered = if self.dialect.skip_first() {
            [skip, first]
        } else {
            [first, skip]
        };
        Ok(ordered.into_iter().flatten().collect())
    }

    /// Trailing paging clauses (`LIMIT` / `OFFSET`).
    ///
    /// # Errors
    ///
    /// Returns an error if a paging expression cannot be rendered.
    pub fn build_offset_limit(&self, query: &SelectQuery) -> Result<Vec<String>> {
        let mut parts = Vec::new();
        if let (Some(expr), Some(format)) = (&query.take, self.dialect.limit_format()) {
            parts.push(self.build_paging_token(format, expr)?);
        }
        if let (Some(expr), Some(format)) = (&query.skip, self.dialect.offset_format()) {
            parts.push(self.build_paging_token(format, expr)?);
        }
        Ok(parts)
    }

    fn build_paging_token(&self, format: &str, expr: &Expr) -> Result<String> {
        Ok(fill_template(format, &[self.build_expression(expr)?]))
    }

    /// Renders the column list; `*` when there are no columns.
    ///
    /// # Errors
    ///
    /// Returns an error if a column cannot be rendered.
    pub fn build_columns(&self, columns: &[SelectColumn]) -> Result<String> {
        if columns.is_empty() {
            return Ok(String::from("*"));
        }
        let columns: Vec<String> = columns
            .iter()
            .map(|c| -> Result<String> {
                let expr = self.build_column_expression(&c.expr)?;
                Ok(match &c.alias {
                    Some(alias) => format!(
                        "{expr} AS {}",
                        self.convert_name(alias, ConvertType::NameToQueryFieldAlias)
                    ),
                    None => expr,
                })
            })
            .collect::<Result<_>>()?;
        Ok(columns.join(", "))
    }

    /// Renders one selected expression, asking the dialect first.
    ///
    /// # Errors
    ///
    /// Returns an error if the expression cannot be rendered.
    pub fn build_column_expression(&self, expr: &Expr) -> Result<String> {
        match self.dialect.column_expression(self, expr)? {
            Some(sql) => Ok(sql),
            None => self.build_expression(expr),
        }
    }

    /// Renders the FROM clause for a statement of kind `kind`, asking the
    /// dialect first. Returns an empty string when there is nothing to emit.
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be rendered.
    pub fn build_from_clause(&self, kind: StatementKind, query: &SelectQuery) -> Result<String> {
        match self.dialect.from_clause(self, kind, query)? {
            Some(sql) => Ok(sql),
            None => self.default_from_clause(kind, query),
        }
    }

    /// The generic FROM clause. DELETE uses `USING` for its extra sources.
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be rendered.
    pub fn default_from_clause(&self, kind: StatementKind, query: &SelectQuery) -> Result<String> {
        if query.from.is_empty() {
            return Ok(String::new());
        }
        let keyword = if kind == StatementKind::Delete {
            "USING"
        } else {
            "FROM"
        };
        let sources: Vec<String> = query
            .from
            .iter()
            .map(|s| self.build_table_source(s))
            .collect::<Result<_>>()?;
        Ok(format!("{keyword} {}", sources.join(", ")))
    }

    /// Renders a FROM entry with its joins.
    ///
    /// # Errors
    ///
    /// Returns an error if a derived table or join condition cannot be rendered.
    pub fn build_table_source(&self, source: &TableSource) -> Result<String> {
        let mut sql = match &source.source {
            Source::Table(table) => self.convert_name(&table.physical_name, ConvertType::NameToQueryTable),
            Source::Query(query) => format!("({})", self.build_select_query(query)?),
        };
        if let Some(alias) = &source.alias {
            sql.push(' ');
            sql.push_str(&self.convert_name(alias, ConvertType::NameToQueryTableAlias));
        }
        for join in &source.joins {
            sql.push(' ');
            sql.push_str(join.join_type.as_str());
            sql.push(' ');
            sql.push_str(&self.build_table_source(&join.source)?);
            if join.join_type != JoinType::Cross {
                let on = if join.on.is_empty() {
                    String::from("1 = 1")
                } else {
                    self.build_search_condition(&join.on)?
                };
                sql.push_str(" ON ");
                sql.push_str(&on);
            }
        }
        Ok(sql)
    }

    pub(crate) fn build_where_clause(&self, query: &SelectQuery) -> Result<Option<String>> {
        if query.where_clause.is_empty() {
            return Ok(None);
        }
        Ok(Some(format!(
            "WHERE {}",
            self.build_search_condition(&query.where_clause)?
        )))
    }
}

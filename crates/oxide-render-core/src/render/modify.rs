//! INSERT / UPDATE / DELETE / upsert rendering.

use crate::ast::{
    DeleteStatement, InsertOrUpdateStatement, InsertStatement, SetItem, StatementKind, Table,
    UpdateStatement,
};
use crate::dialect::ConvertType;
use crate::error::{RenderError, Result};

use super::Renderer;

/// Alias given to the MERGE target.
const MERGE_TARGET: &str = "t1";

impl Renderer<'_> {
    /// Renders an INSERT, filling unassigned identity fields from the dialect.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Unsupported`] when the identity is requested
    /// and the dialect has no way to return it.
    pub fn build_insert(&self, insert: &InsertStatement) -> Result<String> {
        let table = &insert.into;
        let mut columns = Vec::with_capacity(insert.items.len());
        let mut values = Vec::with_capacity(insert.items.len());

        for item in &insert.items {
            columns.push(self.convert_name(&item.column, ConvertType::NameToQueryField));
            values.push(self.build_expression(&item.expr)?);
        }

        for field in table.identity_fields() {
            if insert.items.iter().any(|i| i.column == field.physical_name) {
                continue;
            }
            if let Some(expr) = self.dialect.identity_expression(table, field) {
                columns.push(self.convert_name(&field.physical_name, ConvertType::NameToQueryField));
                values.push(self.build_expression(&expr)?);
            }
        }

        let mut sql = format!("INSERT INTO {}", self.table_name(table));
        if columns.is_empty() {
            sql.push_str(" DEFAULT VALUES");
        } else {
            sql.push_str(&format!(
                " ({}) VALUES ({})",
                columns.join(", "),
                values.join(", ")
            ));
        }

        if insert.with_identity {
            sql.push(' ');
            sql.push_str(&self.build_get_identity(insert)?);
        }

        Ok(sql)
    }

    /// Renders the clause returning the generated identity.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Unsupported`] when the dialect declines, or the
    /// dialect's own error.
    pub fn build_get_identity(&self, insert: &InsertStatement) -> Result<String> {
        self.dialect
            .get_identity(self, insert)?
            .ok_or_else(|| RenderError::Unsupported {
                feature: String::from("Returning the inserted identity"),
                dialect: self.dialect.name(),
            })
    }

    /// Renders an UPDATE.
    ///
    /// # Errors
    ///
    /// Returns an error if an assigned value or the filter cannot be rendered.
    pub fn build_update(&self, update: &UpdateStatement) -> Result<String> {
        let mut parts = vec![format!(
            "UPDATE {}{}",
            self.table_name(&update.table),
            self.alias_suffix(update.alias.as_deref())
        )];
        parts.push(format!("SET {}", self.build_set_items(&update.items)?));

        let from = self.build_from_clause(StatementKind::Update, &update.query)?;
        if !from.is_empty() {
            parts.push(from);
        }
        parts.extend(self.build_where_clause(&update.query)?);

        Ok(parts.join(" "))
    }

    /// Renders a DELETE.
    ///
    /// # Errors
    ///
    /// Returns an error if the filter cannot be rendered.
    pub fn build_delete(&self, delete: &DeleteStatement) -> Result<String> {
        let mut parts = vec![format!(
            "DELETE FROM {}{}",
            self.table_name(&delete.table),
            self.alias_suffix(delete.alias.as_deref())
        )];

        let from = self.build_from_clause(StatementKind::Delete, &delete.query)?;
        if !from.is_empty() {
            parts.push(from);
        }
        parts.extend(self.build_where_clause(&delete.query)?);

        Ok(parts.join(" "))
    }

    /// Renders an insert-or-update, asking the dialect first.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Unsupported`] when the statement has no keys.
    pub fn build_insert_or_update(&self, statement: &InsertOrUpdateStatement) -> Result<String> {
        match self.dialect.insert_or_update(self, statement)? {
            Some(sql) => Ok(sql),
            None => self.build_insert_or_update_as_merge(statement, None),
        }
    }

    /// Renders an insert-or-update as a single MERGE.
    ///
    /// `from_dummy` names a one-row table for dialects that cannot SELECT
    /// without a FROM clause.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Unsupported`] when the statement has no keys,
    /// or neither insert nor update items.
    pub fn build_insert_or_update_as_merge(
        &self,
        statement: &InsertOrUpdateStatement,
        from_dummy: Option<&str>,
    ) -> Result<String> {
        if statement.keys.is_empty() {
            return Err(RenderError::Unsupported {
                feature: format!(
                    "Insert or update on '{}' without key fields",
                    statement.table.physical_name
                ),
                dialect: self.dialect.name(),
            });
        }
        if statement.insert.is_empty() && statement.update.is_empty() {
            return Err(RenderError::Unsupported {
                feature: format!(
                    "Insert or update on '{}' without insert or update items",
                    statement.table.physical_name
                ),
                dialect: self.dialect.name(),
            });
        }

        let target = self.convert_name(MERGE_TARGET, ConvertType::NameToQueryTableAlias);
        let dummy = from_dummy.map(|t| format!(" FROM {t}")).unwrap_or_default();

        let on: Vec<String> = statement
            .keys
            .iter()
            .map(|key| -> Result<String> {
                Ok(format!(
                    "{target}.{} = {}",
                    self.convert_name(&key.column, ConvertType::NameToQueryField),
                    self.build_expression(&key.expr)?
                ))
            })
            .collect::<Result<_>>()?;

        let mut sql = format!(
            "MERGE INTO {} {target} USING (SELECT 1 AS dummy{dummy}) s ON ({})",
            self.table_name(&statement.table),
            on.join(" AND ")
        );

        if !statement.update.is_empty() {
            sql.push_str(" WHEN MATCHED THEN UPDATE SET ");
            sql.push_str(&self.build_set_items(&statement.update)?);
        }

        if !statement.insert.is_empty() {
            let mut columns = Vec::new();
            let mut values = Vec::new();
            for item in &statement.insert {
                columns.push(self.convert_name(&item.column, ConvertType::NameToQueryField));
                values.push(self.build_expression(&item.expr)?);
            }
            sql.push_str(&format!(
                " WHEN NOT MATCHED THEN INSERT ({}) VALUES ({})",
                columns.join(", "),
                values.join(", ")
            ));
        }

        Ok(sql)
    }

    fn build_set_items(&self, items: &[SetItem]) -> Result<String> {
        let items: Vec<String> = items
            .iter()
            .map(|item| -> Result<String> {
                Ok(format!(
                    "{} = {}",
                    self.convert_name(&item.column, ConvertType::NameToQueryField),
                    self.build_expression(&item.expr)?
                ))
            })
            .collect::<Result<_>>()?;
        Ok(items.join(", "))
    }

    pub(crate) fn table_name(&self, table: &Table) -> String {
        self.convert_name(&table.physical_name, ConvertType::NameToQueryTable)
    }

    fn alias_suffix(&self, alias: Option<&str>) -> String {
        alias
            .map(|a| format!(" {}", self.convert_name(a, ConvertType::NameToQueryTableAlias)))
            .unwrap_or_default()
    }
}

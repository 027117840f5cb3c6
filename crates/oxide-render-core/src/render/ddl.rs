//! CREATE TABLE / DROP TABLE rendering.

use crate::ast::{Field, Table};
use crate::dialect::ConvertType;

use super::Renderer;

impl Renderer<'_> {
    /// Renders CREATE TABLE with one column per line and a primary key constraint.
    #[must_use]
    pub fn build_create_table(&self, table: &Table) -> String {
        let mut sql = format!("CREATE TABLE {} (\n", self.table_name(table));

        let mut lines: Vec<String> = table
            .fields
            .iter()
            .map(|f| format!("    {}", self.build_column_definition(f)))
            .collect();

        let keys: Vec<String> = table
            .primary_keys()
            .map(|f| self.convert_name(&f.physical_name, ConvertType::NameToQueryField))
            .collect();
        if !keys.is_empty() {
            lines.push(format!(
                "    CONSTRAINT PK_{} PRIMARY KEY ({})",
                table.physical_name,
                keys.join(", ")
            ));
        }

        sql.push_str(&lines.join(",\n"));
        sql.push_str("\n)");
        sql
    }

    /// Renders `name TYPE [null attribute]`.
    #[must_use]
    pub fn build_column_definition(&self, field: &Field) -> String {
        let mut sql = format!(
            "{} {}",
            self.convert_name(&field.physical_name, ConvertType::NameToQueryField),
            self.build_data_type(&field.data_type)
        );
        let null = self.build_create_table_null_attribute(field);
        if !null.is_empty() {
            sql.push(' ');
            sql.push_str(&null);
        }
        sql
    }

    /// Nullability suffix, asking the dialect first.
    #[must_use]
    pub fn build_create_table_null_attribute(&self, field: &Field) -> String {
        self.dialect
            .create_table_null_attribute(field)
            .unwrap_or_else(|| String::from(if field.nullable { "NULL" } else { "NOT NULL" }))
    }

    /// Renders DROP TABLE.
    #[must_use]
    pub fn build_drop_table(&self, table: &Table) -> String {
        format!("DROP TABLE {}", self.table_name(table))
    }
}

//! The generic statement renderer.
//!
//! [`Renderer`] knows how to emit every clause in a vendor-neutral way. At
//! each overridable point it asks its [`Dialect`] first and only falls back
//! to the generic form when the hook declines. Subqueries are rendered by
//! the same value, so dialect behaviour applies at every nesting level.

mod ddl;
mod expression;
mod modify;
mod select;

use tracing::debug;

use crate::ast::{precedence, DataType, Statement};
use crate::config::RenderConfig;
use crate::dialect::{default_convert_name, ConvertType, Dialect};
use crate::error::Result;

/// Renders statements for one dialect and configuration.
#[derive(Clone, Copy)]
pub struct Renderer<'a> {
    dialect: &'a dyn Dialect,
    config: &'a RenderConfig,
}

impl<'a> Renderer<'a> {
    /// Creates a renderer.
    #[must_use]
    pub const fn new(dialect: &'a dyn Dialect, config: &'a RenderConfig) -> Self {
        Self { dialect, config }
    }

    /// The dialect being rendered for.
    #[must_use]
    pub const fn dialect(&self) -> &'a dyn Dialect {
        self.dialect
    }

    /// The configuration.
    #[must_use]
    pub const fn config(&self) -> &'a RenderConfig {
        self.config
    }

    /// Renders a whole statement as a single command.
    ///
    /// # Errors
    ///
    /// Returns an error if a clause cannot be expressed by the dialect.
    pub fn build_statement(&self, statement: &Statement) -> Result<String> {
        debug!(
            dialect = self.dialect.name(),
            kind = statement.kind().as_str(),
            "Rendering statement"
        );
        match statement {
            Statement::Select(query) => self.build_select_query(query),
            Statement::Insert(insert) => self.build_insert(insert),
            Statement::Update(update) => self.build_update(update),
            Statement::Delete(delete) => self.build_delete(delete),
            Statement::InsertOrUpdate(upsert) => self.build_insert_or_update(upsert),
            Statement::CreateTable(create) => Ok(self.build_create_table(&create.table)),
            Statement::DropTable(drop) => Ok(self.build_drop_table(&drop.table)),
        }
    }

    /// Converts a name for the given role.
    #[must_use]
    pub fn convert_name(&self, name: &str, kind: ConvertType) -> String {
        self.dialect
            .convert_name(name, kind, self.config)
            .unwrap_or_else(|| default_convert_name(name, kind))
    }

    /// Returns the column type text for `data_type`.
    #[must_use]
    pub fn build_data_type(&self, data_type: &DataType) -> String {
        self.dialect
            .data_type(data_type)
            .unwrap_or_else(|| data_type.to_sql())
    }
}

/// Substitutes `{n}` placeholders with `args[n]` in a single pass.
///
/// Placeholders without a matching argument are kept verbatim, and
/// substituted text is never scanned again.
#[must_use]
pub fn fill_template(template: &str, args: &[String]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let digits = after.bytes().take_while(u8::is_ascii_digit).count();
        let closed = digits > 0 && after.as_bytes().get(digits) == Some(&b'}');
        let arg = if closed {
            after[..digits].parse::<usize>().ok().and_then(|i| args.get(i))
        } else {
            None
        };

        if let Some(arg) = arg {
            out.push_str(arg);
            rest = &after[digits + 1..];
        } else {
            out.push('{');
            rest = after;
        }
    }

    out.push_str(rest);
    out
}

/// Returns whether a node of precedence `prec` needs parentheses under `parent`.
#[must_use]
pub const fn needs_parentheses(prec: u8, parent: u8) -> bool {
    if parent == precedence::UNKNOWN {
        return false;
    }
    prec == precedence::UNKNOWN
        || prec < parent
        || (prec == parent
            && matches!(
                parent,
                precedence::SUBTRACTION | precedence::MULTIPLICATIVE | precedence::LOGICAL_NEGATION
            ))
}

//! Marks parameters that Firebird needs inlined as literals.
//!
//! Firebird rejects parameter markers in some positions: selected columns,
//! the values of a MERGE, and the probe expression of `IN (SELECT ...)`.
//! Parameters found there render as their literal value instead.

use oxide_render_core::ast::visit::{walk_predicate_mut, VisitorMut};
use oxide_render_core::ast::{Parameter, Predicate, Statement};

/// Clears `is_query_parameter` on every parameter it reaches.
struct Inline;

impl VisitorMut for Inline {
    fn visit_parameter_mut(&mut self, parameter: &mut Parameter) {
        parameter.is_query_parameter = false;
    }
}

/// Inlines the probe expression of every `IN (SELECT ...)`.
struct InSubqueryProbes;

impl VisitorMut for InSubqueryProbes {
    fn visit_predicate_mut(&mut self, predicate: &mut Predicate) {
        if let Predicate::InSubquery { expr, .. } = predicate {
            Inline.visit_expr_mut(expr);
        }
        walk_predicate_mut(self, predicate);
    }
}

/// Marks the parameters of `statement` that must render inline.
pub fn mark_literal_parameters(statement: &mut Statement) {
    match statement {
        Statement::Select(query) => {
            for column in &mut query.columns {
                Inline.visit_expr_mut(&mut column.expr);
            }
        }
        Statement::InsertOrUpdate(upsert) => {
            let items = upsert
                .insert
                .iter_mut()
                .chain(&mut upsert.update)
                .chain(&mut upsert.keys);
            for item in items {
                Inline.visit_expr_mut(&mut item.expr);
            }
        }
        Statement::Insert(_)
        | Statement::Update(_)
        | Statement::Delete(_)
        | Statement::CreateTable(_)
        | Statement::DropTable(_) => {}
    }

    InSubqueryProbes.visit_statement_mut(statement);
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxide_render_core::ast::{
        CompareOp, DataType, Expr, Field, InsertOrUpdateStatement, SelectQuery, SetItem, Table,
        TableSource, Value, ValueType,
    };

    fn param(name: &str) -> Expr {
        Expr::parameter(name, Value::Integer(1))
    }

    #[test]
    fn test_selected_columns_are_inlined() {
        let query = SelectQuery::new()
            .column(param("col"))
            .from(TableSource::table(Table::new("t")))
            .filter(Predicate::Compare {
                left: Expr::field(None, "id", ValueType::Integer),
                op: CompareOp::Eq,
                right: param("filter"),
            });
        let mut stmt = Statement::Select(query);
        mark_literal_parameters(&mut stmt);

        let Statement::Select(query) = &stmt else {
            unreachable!()
        };
        assert!(matches!(
            &query.columns[0].expr,
            Expr::Parameter(p) if !p.is_query_parameter
        ));
        assert_eq!(stmt.query_parameters(), vec!["filter"]);
    }

    #[test]
    fn test_merge_items_are_inlined() {
        let mut stmt = Statement::InsertOrUpdate(InsertOrUpdateStatement {
            table: Table::new("t").column(Field::new("id", DataType::Int32).primary_key()),
            insert: vec![SetItem::new("id", param("a"))],
            update: vec![SetItem::new("name", param("b"))],
            keys: vec![SetItem::new("id", param("c"))],
        });
        mark_literal_parameters(&mut stmt);
        assert!(stmt.query_parameters().is_empty());
    }

    #[test]
    fn test_in_subquery_probe_is_inlined_at_any_depth() {
        let inner = SelectQuery::new()
            .column(Expr::field(None, "id", ValueType::Integer))
            .from(TableSource::table(Table::new("u")))
            .filter(Predicate::Compare {
                left: Expr::field(None, "kind", ValueType::Integer),
                op: CompareOp::Eq,
                right: param("kind"),
            });
        let nested = SelectQuery::new()
            .from(TableSource::table(Table::new("v")))
            .filter(Predicate::InSubquery {
                expr: param("probe"),
                query: Box::new(inner),
                negated: false,
            });
        let query = SelectQuery::new()
            .from(TableSource::table(Table::new("t")))
            .filter(Predicate::Exists(Box::new(nested)));
        let mut stmt = Statement::Select(query);
        mark_literal_parameters(&mut stmt);
        assert_eq!(stmt.query_parameters(), vec!["kind"]);
    }
}

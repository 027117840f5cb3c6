//! Statement normalization applied before rendering.

use std::collections::HashSet;

use tracing::debug;

use crate::ast::visit::{walk_condition_mut, walk_expr, walk_query_mut, Visitor, VisitorMut};
use crate::ast::{
    DeleteStatement, Expr, FieldRef, Predicate, SearchCondition, SelectQuery, Statement,
    UpdateStatement, Value,
};

/// Default normalization: unique column aliases, then [`optimize`].
#[must_use]
pub fn finalize(mut statement: Statement) -> Statement {
    check_aliases(&mut statement, usize::MAX);
    optimize(statement)
}

/// Makes column output aliases unique within each query, truncating them
/// to `max_len` characters first.
///
/// Aliases are compared case-insensitively; a clash gets a `_1`, `_2`, ...
/// suffix.
pub fn check_aliases(statement: &mut Statement, max_len: usize) {
    struct Aliases {
        max_len: usize,
    }

    impl VisitorMut for Aliases {
        fn visit_query_mut(&mut self, query: &mut SelectQuery) {
            let mut seen = HashSet::new();
            for column in &mut query.columns {
                let Some(alias) = &mut column.alias else {
                    continue;
                };
                let base: String = alias.chars().take(self.max_len).collect();
                let mut candidate = base.clone();
                let mut n = 0;
                while !seen.insert(candidate.to_lowercase()) {
                    n += 1;
                    candidate = format!("{base}_{n}");
                }
                *alias = candidate;
            }
            walk_query_mut(self, query);
        }
    }

    Aliases { max_len }.visit_statement_mut(statement);
}

/// Simplifies search conditions: boolean condition expressions used as
/// predicates become nested groups, and empty groups joined by AND are
/// dropped.
#[must_use]
pub fn optimize(mut statement: Statement) -> Statement {
    struct Optimize;

    impl VisitorMut for Optimize {
        fn visit_condition_mut(&mut self, condition: &mut SearchCondition) {
            walk_condition_mut(self, condition);

            for cond in &mut condition.conditions {
                if let Predicate::Expr(Expr::Condition(inner)) = &mut cond.predicate {
                    let inner = std::mem::take(inner);
                    cond.predicate = Predicate::Nested(inner);
                }
            }

            if !condition.has_or() {
                condition
                    .conditions
                    .retain(|c| !matches!(&c.predicate, Predicate::Nested(inner) if inner.is_empty()));
            }
        }
    }

    Optimize.visit_statement_mut(&mut statement);
    statement
}

/// Returns whether `expr` references a field qualified by one of `names`.
#[must_use]
pub fn references_any(expr: &Expr, names: &[String]) -> bool {
    struct Find<'a> {
        names: &'a [String],
        found: bool,
    }

    impl Visitor for Find<'_> {
        fn visit_expr(&mut self, expr: &Expr) {
            if let Expr::Field(FieldRef {
                table: Some(table), ..
            }) = expr
            {
                if self.names.iter().any(|n| n == table) {
                    self.found = true;
                }
            }
            walk_expr(self, expr);
        }
    }

    let mut find = Find {
        names,
        found: false,
    };
    find.visit_expr(expr);
    find.found
}

fn exists_over(query: &SelectQuery) -> SearchCondition {
    let probe = SelectQuery {
        from: query.from.clone(),
        where_clause: query.where_clause.clone(),
        ..SelectQuery::default()
    };
    SearchCondition::from(Predicate::Exists(Box::new(probe)))
}

/// Rewrites a DELETE with extra sources into the single-table form
/// `DELETE FROM t WHERE EXISTS (SELECT * FROM <sources> WHERE <filter>)`.
#[must_use]
pub fn alternative_delete(mut delete: DeleteStatement) -> DeleteStatement {
    if delete.query.from.is_empty() {
        return delete;
    }
    debug!(
        table = %delete.table.physical_name,
        sources = delete.query.from.len(),
        "Rewriting multi-table DELETE"
    );
    delete.query = SelectQuery {
        where_clause: exists_over(&delete.query),
        ..SelectQuery::default()
    };
    delete
}

/// Rewrites an UPDATE with extra sources into the single-table form.
///
/// Every SET value that reads another source becomes a scalar subquery over
/// the same sources and filter, and the filter becomes `EXISTS (...)`.
#[must_use]
pub fn alternative_update(mut update: UpdateStatement) -> UpdateStatement {
    if update.query.from.is_empty() {
        return update;
    }
    debug!(
        table = %update.table.physical_name,
        sources = update.query.from.len(),
        "Rewriting multi-table UPDATE"
    );

    let names = update.query.source_names();
    for item in &mut update.items {
        if references_any(&item.expr, &names) {
            let value = std::mem::replace(&mut item.expr, Expr::Value(Value::Null));
            item.expr = Expr::Subquery(Box::new(SelectQuery {
                from: update.query.from.clone(),
                where_clause: update.query.where_clause.clone(),
                ..SelectQuery::default()
            }
            .column(value)));
        }
    }

    update.query = SelectQuery {
        where_clause: exists_over(&update.query),
        ..SelectQuery::default()
    };
    update
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{CompareOp, DataType, Field, SetItem, Table, TableSource, ValueType};

    fn is_null(name: &str) -> Predicate {
        Predicate::IsNull {
            expr: Expr::field(None, name, ValueType::Integer),
            negated: false,
        }
    }

    fn people() -> Table {
        Table::new("people").column(Field::new("name", DataType::VarChar(Some(50))))
    }

    fn joined_query() -> SelectQuery {
        SelectQuery::new()
            .from(TableSource::table(Table::new("names")).alias("n"))
            .filter(Predicate::Compare {
                left: Expr::field(Some("n"), "id", ValueType::Integer),
                op: CompareOp::Eq,
                right: Expr::field(Some("p"), "id", ValueType::Integer),
            })
    }

    #[test]
    fn test_check_aliases() {
        let query = SelectQuery::new()
            .column_as(Expr::integer(1), "value")
            .column_as(Expr::integer(2), "VALUE")
            .column_as(Expr::integer(3), "value");
        let mut stmt = Statement::Select(query);
        check_aliases(&mut stmt, usize::MAX);
        let Statement::Select(query) = stmt else {
            unreachable!()
        };
        let aliases: Vec<_> = query.columns.iter().filter_map(|c| c.alias.clone()).collect();
        assert_eq!(aliases, vec!["value", "VALUE_1", "value_2"]);
    }

    #[test]
    fn test_check_aliases_truncates() {
        let query = SelectQuery::new()
            .column_as(Expr::integer(1), "abcdef")
            .column_as(Expr::integer(2), "abcxyz");
        let mut stmt = Statement::Select(query);
        check_aliases(&mut stmt, 3);
        let Statement::Select(query) = stmt else {
            unreachable!()
        };
        let aliases: Vec<_> = query.columns.iter().filter_map(|c| c.alias.clone()).collect();
        assert_eq!(aliases, vec!["abc", "abc_1"]);
    }

    #[test]
    fn test_optimize() {
        let inner = SearchCondition::from(is_null("a")).or(is_null("b"));
        let query = SelectQuery::new()
            .filter(Predicate::Expr(Expr::Condition(inner.clone())))
            .filter(Predicate::Nested(SearchCondition::new()));
        let Statement::Select(query) = optimize(Statement::Select(query)) else {
            unreachable!()
        };
        assert_eq!(query.where_clause.conditions.len(), 1);
        assert_eq!(query.where_clause.conditions[0].predicate, Predicate::Nested(inner));
    }

    #[test]
    fn test_alternative_delete() {
        let delete = DeleteStatement {
            table: people(),
            alias: Some(String::from("p")),
            query: joined_query(),
        };
        let delete = alternative_delete(delete);
        assert!(delete.query.from.is_empty());
        assert!(matches!(
            &delete.query.where_clause.conditions[0].predicate,
            Predicate::Exists(q) if q.from.len() == 1
        ));
    }

    #[test]
    fn test_alternative_update() {
        let update = UpdateStatement {
            table: people(),
            alias: Some(String::from("p")),
            items: vec![
                SetItem::new("name", Expr::field(Some("n"), "name", ValueType::String)),
                SetItem::new("flag", Expr::integer(1)),
            ],
            query: joined_query(),
        };
        let update = alternative_update(update);
        assert!(matches!(update.items[0].expr, Expr::Subquery(_)));
        assert_eq!(update.items[1].expr, Expr::integer(1));
        assert!(update.query.from.is_empty());
    }

    #[test]
    fn test_single_table_forms_unchanged() {
        let delete = DeleteStatement {
            table: people(),
            alias: None,
            query: SelectQuery::new().filter(is_null("name")),
        };
        assert_eq!(alternative_delete(delete.clone()), delete);
    }
}

//! Depth-first traversal of statements.
//!
//! Implement [`Visitor`] (or [`VisitorMut`]) and override the hooks you
//! care about. Each default hook calls the matching `walk_*` function, so
//! an override that still wants to descend calls it explicitly.

use super::condition::{Predicate, SearchCondition};
use super::expression::{Expr, Parameter};
use super::statement::{SelectQuery, Source, Statement, TableSource};

/// Read-only visitor.
pub trait Visitor {
    fn visit_statement(&mut self, statement: &Statement) {
        walk_statement(self, statement);
    }

    fn visit_query(&mut self, query: &SelectQuery) {
        walk_query(self, query);
    }

    fn visit_condition(&mut self, condition: &SearchCondition) {
        walk_condition(self, condition);
    }

    fn visit_predicate(&mut self, predicate: &Predicate) {
        walk_predicate(self, predicate);
    }

    fn visit_expr(&mut self, expr: &Expr) {
        walk_expr(self, expr);
    }

    fn visit_parameter(&mut self, _parameter: &Parameter) {}
}

pub fn walk_statement<V: Visitor + ?Sized>(v: &mut V, statement: &Statement) {
    match statement {
        Statement::Select(query) => v.visit_query(query),
        Statement::Insert(insert) => {
            for item in &insert.items {
                v.visit_expr(&item.expr);
            }
        }
        Statement::Update(update) => {
            for item in &update.items {
                v.visit_expr(&item.expr);
            }
            v.visit_query(&update.query);
        }
        Statement::Delete(delete) => v.visit_query(&delete.query),
        Statement::InsertOrUpdate(upsert) => {
            for item in upsert.insert.iter().chain(&upsert.update).chain(&upsert.keys) {
                v.visit_expr(&item.expr);
            }
        }
        Statement::CreateTable(_) | Statement::DropTable(_) => {}
    }
}

pub fn walk_query<V: Visitor + ?Sized>(v: &mut V, query: &SelectQuery) {
    for column in &query.columns {
        v.visit_expr(&column.expr);
    }
    for source in &query.from {
        walk_table_source(v, source);
    }
    v.visit_condition(&query.where_clause);
    for expr in &query.group_by {
        v.visit_expr(expr);
    }
    v.visit_condition(&query.having);
    for order in &query.order_by {
        v.visit_expr(&order.expr);
    }
    if let Some(skip) = &query.skip {
        v.visit_expr(skip);
    }
    if let Some(take) = &query.take {
        v.visit_expr(take);
    }
}

fn walk_table_source<V: Visitor + ?Sized>(v: &mut V, source: &TableSource) {
    if let Source::Query(query) = &source.source {
        v.visit_query(query);
    }
    for join in &source.joins {
        walk_table_source(v, &join.source);
        v.visit_condition(&join.on);
    }
}

pub fn walk_condition<V: Visitor + ?Sized>(v: &mut V, condition: &SearchCondition) {
    for cond in &condition.conditions {
        v.visit_predicate(&cond.predicate);
    }
}

pub fn walk_predicate<V: Visitor + ?Sized>(v: &mut V, predicate: &Predicate) {
    match predicate {
        Predicate::Compare { left, right, .. } => {
            v.visit_expr(left);
            v.visit_expr(right);
        }
        Predicate::IsNull { expr, .. } => v.visit_expr(expr),
        Predicate::Like {
            expr,
            pattern,
            escape,
            ..
        } => {
            v.visit_expr(expr);
            v.visit_expr(pattern);
            if let Some(escape) = escape {
                v.visit_expr(escape);
            }
        }
        Predicate::Between {
            expr, low, high, ..
        } => {
            v.visit_expr(expr);
            v.visit_expr(low);
            v.visit_expr(high);
        }
        Predicate::InList { expr, values, .. } => {
            v.visit_expr(expr);
            for value in values {
                v.visit_expr(value);
            }
        }
        Predicate::InSubquery { expr, query, .. } => {
            v.visit_expr(expr);
            v.visit_query(query);
        }
        Predicate::Exists(query) => v.visit_query(query),
        Predicate::Expr(expr) => v.visit_expr(expr),
        Predicate::Nested(condition) => v.visit_condition(condition),
    }
}

pub fn walk_expr<V: Visitor + ?Sized>(v: &mut V, expr: &Expr) {
    match expr {
        Expr::Field(_) | Expr::Wildcard { .. } | Expr::Value(_) => {}
        Expr::Parameter(parameter) => v.visit_parameter(parameter),
        Expr::Binary { left, right, .. } => {
            v.visit_expr(left);
            v.visit_expr(right);
        }
        Expr::Function(call) => {
            for arg in &call.args {
                v.visit_expr(arg);
            }
        }
        Expr::Raw(raw) => {
            for arg in &raw.args {
                v.visit_expr(arg);
            }
        }
        Expr::Case(case) => {
            for (when, then) in &case.cases {
                v.visit_condition(when);
                v.visit_expr(then);
            }
            if let Some(otherwise) = &case.else_result {
                v.visit_expr(otherwise);
            }
        }
        Expr::Convert(convert) => v.visit_expr(&convert.expr),
        Expr::DateAdd(add) => {
            v.visit_expr(&add.number);
            v.visit_expr(&add.date);
        }
        Expr::Extract(extract) => v.visit_expr(&extract.source),
        Expr::Condition(condition) => v.visit_condition(condition),
        Expr::Subquery(query) => v.visit_query(query),
    }
}

/// Mutating visitor.
pub trait VisitorMut {
    fn visit_statement_mut(&mut self, statement: &mut Statement) {
        walk_statement_mut(self, statement);
    }

    fn visit_query_mut(&mut self, query: &mut SelectQuery) {
        walk_query_mut(self, query);
    }

    fn visit_condition_mut(&mut self, condition: &mut SearchCondition) {
        walk_condition_mut(self, condition);
    }

    fn visit_predicate_mut(&mut self, predicate: &mut Predicate) {
        walk_predicate_mut(self, predicate);
    }

    fn visit_expr_mut(&mut self, expr: &mut Expr) {
        walk_expr_mut(self, expr);
    }

    fn visit_parameter_mut(&mut self, _parameter: &mut Parameter) {}
}

pub fn walk_statement_mut<V: VisitorMut + ?Sized>(v: &mut V, statement: &mut Statement) {
    match statement {
        Statement::Select(query) => v.visit_query_mut(query),
        Statement::Insert(insert) => {
            for item in &mut insert.items {
                v.visit_expr_mut(&mut item.expr);
            }
        }
        Statement::Update(update) => {
            for item in &mut update.items {
                v.visit_expr_mut(&mut item.expr);
            }
            v.visit_query_mut(&mut update.query);
        }
        Statement::Delete(delete) => v.visit_query_mut(&mut delete.query),
        Statement::InsertOrUpdate(upsert) => {
            for item in upsert
                .insert
                .iter_mut()
                .chain(&mut upsert.update)
                .chain(&mut upsert.keys)
            {
                v.visit_expr_mut(&mut item.expr);
            }
        }
        Statement::CreateTable(_) | Statement::DropTable(_) => {}
    }
}

pub fn walk_query_mut<V: VisitorMut + ?Sized>(v: &mut V, query: &mut SelectQuery) {
    for column in &mut query.columns {
        v.visit_expr_mut(&mut column.expr);
    }
    for source in &mut query.from {
        walk_table_source_mut(v, source);
    }
    v.visit_condition_mut(&mut query.where_clause);
    for expr in &mut query.group_by {
        v.visit_expr_mut(expr);
    }
    v.visit_condition_mut(&mut query.having);
    for order in &mut query.order_by {
        v.visit_expr_mut(&mut order.expr);
    }
    if let Some(skip) = &mut query.skip {
        v.visit_expr_mut(skip);
    }
    if let Some(take) = &mut query.take {
        v.visit_expr_mut(take);
    }
}

fn walk_table_source_mut<V: VisitorMut + ?Sized>(v: &mut V, source: &mut TableSource) {
    if let Source::Query(query) = &mut source.source {
        v.visit_query_mut(query);
    }
    for join in &mut source.joins {
        walk_table_source_mut(v, &mut join.source);
        v.visit_condition_mut(&mut join.on);
    }
}

pub fn walk_condition_mut<V: VisitorMut + ?Sized>(v: &mut V, condition: &mut SearchCondition) {
    for cond in &mut condition.conditions {
        v.visit_predicate_mut(&mut cond.predicate);
    }
}

pub fn walk_predicate_mut<V: VisitorMut + ?Sized>(v: &mut V, predicate: &mut Predicate) {
    match predicate {
        Predicate::Compare { left, right, .. } => {
            v.visit_expr_mut(left);
            v.visit_expr_mut(right);
        }
        Predicate::IsNull { expr, .. } => v.visit_expr_mut(expr),
        Predicate::Like {
            expr,
            pattern,
            escape,
            ..
        } => {
            v.visit_expr_mut(expr);
            v.visit_expr_mut(pattern);
            if let Some(escape) = escape {
                v.visit_expr_mut(escape);
            }
        }
        Predicate::Between {
            expr, low, high, ..
        } => {
            v.visit_expr_mut(expr);
            v.visit_expr_mut(low);
            v.visit_expr_mut(high);
        }
        Predicate::InList { expr, values, .. } => {
            v.visit_expr_mut(expr);
            for value in values {
                v.visit_expr_mut(value);
            }
        }
        Predicate::InSubquery { expr, query, .. } => {
            v.visit_expr_mut(expr);
            v.visit_query_mut(query);
        }
        Predicate::Exists(query) => v.visit_query_mut(query),
        Predicate::Expr(expr) => v.visit_expr_mut(expr),
        Predicate::Nested(condition) => v.visit_condition_mut(condition),
    }
}

pub fn walk_expr_mut<V: VisitorMut + ?Sized>(v: &mut V, expr: &mut Expr) {
    match expr {
        Expr::Field(_) | Expr::Wildcard { .. } | Expr::Value(_) => {}
        Expr::Parameter(parameter) => v.visit_parameter_mut(parameter),
        Expr::Binary { left, right, .. } => {
            v.visit_expr_mut(left);
            v.visit_expr_mut(right);
        }
        Expr::Function(call) => {
            for arg in &mut call.args {
                v.visit_expr_mut(arg);
            }
        }
        Expr::Raw(raw) => {
            for arg in &mut raw.args {
                v.visit_expr_mut(arg);
            }
        }
        Expr::Case(case) => {
            for (when, then) in &mut case.cases {
                v.visit_condition_mut(when);
                v.visit_expr_mut(then);
            }
            if let Some(otherwise) = &mut case.else_result {
                v.visit_expr_mut(otherwise);
            }
        }
        Expr::Convert(convert) => v.visit_expr_mut(&mut convert.expr),
        Expr::DateAdd(add) => {
            v.visit_expr_mut(&mut add.number);
            v.visit_expr_mut(&mut add.date);
        }
        Expr::Extract(extract) => v.visit_expr_mut(&mut extract.source),
        Expr::Condition(condition) => v.visit_condition_mut(condition),
        Expr::Subquery(query) => v.visit_query_mut(query),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BinaryOp, CompareOp, Value, ValueType};

    struct CountParameters(usize);

    impl Visitor for CountParameters {
        fn visit_parameter(&mut self, _parameter: &Parameter) {
            self.0 += 1;
        }
    }

    struct Rename;

    impl VisitorMut for Rename {
        fn visit_parameter_mut(&mut self, parameter: &mut Parameter) {
            parameter.name = format!("p_{}", parameter.name);
        }
    }

    fn query() -> SelectQuery {
        let inner = SelectQuery::new().column(Expr::parameter("b", Value::Integer(2)));
        SelectQuery::new()
            .column(
                Expr::parameter("a", Value::Integer(1))
                    .binary(BinaryOp::Add, Expr::field(None, "x", ValueType::Integer)),
            )
            .filter(Predicate::InSubquery {
                expr: Expr::field(None, "x", ValueType::Integer),
                query: Box::new(inner),
                negated: false,
            })
            .filter(Predicate::Compare {
                left: Expr::field(None, "y", ValueType::Integer),
                op: CompareOp::Gt,
                right: Expr::parameter("c", Value::Integer(3)),
            })
    }

    #[test]
    fn test_visitor_reaches_nested_parameters() {
        let mut count = CountParameters(0);
        count.visit_statement(&Statement::Select(query()));
        assert_eq!(count.0, 3);
    }

    #[test]
    fn test_visitor_mut_rewrites_parameters() {
        let mut stmt = Statement::Select(query());
        Rename.visit_statement_mut(&mut stmt);
        assert_eq!(stmt.query_parameters(), vec!["p_a", "p_b", "p_c"]);
    }
}

//! Expression and search condition rendering.

use crate::ast::{precedence, Expr, Predicate, SearchCondition};
use crate::dialect::ConvertType;
use crate::error::Result;

use super::{fill_template, needs_parentheses, Renderer};

impl Renderer<'_> {
    /// Renders an expression at top level (never parenthesized).
    ///
    /// # Errors
    ///
    /// Returns an error if a nested subquery cannot be rendered.
    pub fn build_expression(&self, expr: &Expr) -> Result<String> {
        self.build_expression_with(expr, precedence::UNKNOWN)
    }

    /// Renders an expression nested under an operator of precedence `parent`.
    ///
    /// The node is passed through the dialect's expression rewrite first.
    ///
    /// # Errors
    ///
    /// Returns an error if a nested subquery cannot be rendered.
    pub fn build_expression_with(&self, expr: &Expr, parent: u8) -> Result<String> {
        let converted = self.dialect.convert_expression(expr);
        let sql = self.build_node(&converted)?;
        if needs_parentheses(converted.precedence(), parent) {
            Ok(format!("({sql})"))
        } else {
            Ok(sql)
        }
    }

    fn build_node(&self, expr: &Expr) -> Result<String> {
        match expr {
            Expr::Field(field) => Ok(match &field.table {
                Some(table) => format!(
                    "{}.{}",
                    self.convert_name(table, ConvertType::NameToQueryTableAlias),
                    self.convert_name(&field.name, ConvertType::NameToQueryField)
                ),
                None => self.convert_name(&field.name, ConvertType::NameToQueryField),
            }),
            Expr::Wildcard { table } => Ok(match table {
                Some(table) => format!(
                    "{}.*",
                    self.convert_name(table, ConvertType::NameToQueryTableAlias)
                ),
                None => String::from("*"),
            }),
            Expr::Value(value) => Ok(value.to_sql()),
            Expr::Parameter(parameter) => Ok(if parameter.is_query_parameter {
                self.convert_name(&parameter.name, ConvertType::NameToQueryParameter)
            } else {
                parameter.value.to_sql()
            }),
            Expr::Binary {
                left, op, right, ..
            } => {
                let prec = op.precedence();
                Ok(format!(
                    "{} {} {}",
                    self.build_expression_with(left, prec)?,
                    op.as_str(),
                    self.build_expression_with(right, prec)?
                ))
            }
            Expr::Function(call) => {
                let args = self.build_expressions(&call.args)?;
                Ok(format!("{}({})", call.name, args.join(", ")))
            }
            Expr::Raw(raw) => {
                let args = self.build_expressions(&raw.args)?;
                Ok(fill_template(&raw.template, &args))
            }
            Expr::Case(case) => {
                let mut sql = String::from("CASE");
                for (when, then) in &case.cases {
                    sql.push_str(" WHEN ");
                    sql.push_str(&self.build_search_condition(when)?);
                    sql.push_str(" THEN ");
                    sql.push_str(&self.build_expression(then)?);
                }
                if let Some(otherwise) = &case.else_result {
                    sql.push_str(" ELSE ");
                    sql.push_str(&self.build_expression(otherwise)?);
                }
                sql.push_str(" END");
                Ok(sql)
            }
            Expr::Convert(convert) => Ok(format!(
                "CAST({} AS {})",
                self.build_expression(&convert.expr)?,
                self.build_data_type(&convert.to)
            )),
            Expr::DateAdd(add) => Ok(format!(
                "DATEADD({}, {}, {})",
                add.part.as_str(),
                self.build_expression(&add.number)?,
                self.build_expression(&add.date)?
            )),
            Expr::Extract(extract) => Ok(format!(
                "EXTRACT({} FROM {})",
                extract.part.as_str(),
                self.build_expression(&extract.source)?
            )),
            Expr::Condition(condition) => self.build_search_condition(condition),
            Expr::Subquery(query) => Ok(format!("({})", self.build_select_query(query)?)),
        }
    }

    fn build_expressions(&self, exprs: &[Expr]) -> Result<Vec<String>> {
        exprs.iter().map(|e| self.build_expression(e)).collect()
    }

    /// Renders a search condition. An empty condition renders as an empty string.
    ///
    /// # Errors
    ///
    /// Returns an error if a nested subquery cannot be rendered.
    pub fn build_search_condition(&self, condition: &SearchCondition) -> Result<String> {
        let mut sql = String::new();
        let joined = if condition.conditions.len() < 2 {
            precedence::UNKNOWN
        } else if condition.has_or() {
            precedence::LOGICAL_DISJUNCTION
        } else {
            precedence::LOGICAL_CONJUNCTION
        };

        for (i, cond) in condition.conditions.iter().enumerate() {
            if i > 0 {
                let prev = &condition.conditions[i - 1];
                sql.push_str(if prev.is_or { " OR " } else { " AND " });
            }
            if cond.negated {
                sql.push_str("NOT ");
                sql.push_str(&self.build_predicate(&cond.predicate, precedence::LOGICAL_NEGATION)?);
            } else {
                sql.push_str(&self.build_predicate(&cond.predicate, joined)?);
            }
        }

        Ok(sql)
    }

    /// Renders one predicate under an enclosing operator of precedence `parent`.
    ///
    /// # Errors
    ///
    /// Returns an error if a nested subquery cannot be rendered.
    pub fn build_predicate(&self, predicate: &Predicate, parent: u8) -> Result<String> {
        let cmp = precedence::COMPARISON;
        let sql = match predicate {
            Predicate::Compare { left, op, right } => format!(
                "{} {} {}",
                self.build_expression_with(left, cmp)?,
                op.as_str(),
                self.build_expression_with(right, cmp)?
            ),
            Predicate::IsNull { expr, negated } => format!(
                "{} IS {}NULL",
                self.build_expression_with(expr, cmp)?,
                not(*negated)
            ),
            Predicate::Like {
                expr,
                pattern,
                escape,
                negated,
            } => {
                let mut sql = format!(
                    "{} {}LIKE {}",
                    self.build_expression_with(expr, cmp)?,
                    not(*negated),
                    self.build_expression_with(pattern, cmp)?
                );
                if let Some(escape) = escape {
                    sql.push_str(" ESCAPE ");
                    sql.push_str(&self.build_expression_with(escape, cmp)?);
                }
                sql
            }
            Predicate::Between {
                expr,
                low,
                high,
                negated,
            } => format!(
                "{} {}BETWEEN {} AND {}",
                self.build_expression_with(expr, cmp)?,
                not(*negated),
                self.build_expression_with(low, cmp)?,
                self.build_expression_with(high, cmp)?
            ),
            Predicate::InList {
                expr,
                values,
                negated,
            } => {
                if values.is_empty() {
                    // x IN () is false, x NOT IN () is true
                    return Ok(String::from(if *negated { "1 = 1" } else { "1 = 0" }));
                }
                format!(
                    "{} {}IN ({})",
                    self.build_expression_with(expr, cmp)?,
                    not(*negated),
                    self.build_expressions(values)?.join(", ")
                )
            }
            Predicate::InSubquery {
                expr,
                query,
                negated,
            } => format!(
                "{} {}IN ({})",
                self.build_expression_with(expr, cmp)?,
                not(*negated),
                self.build_select_query(query)?
            ),
            Predicate::Exists(query) => format!("EXISTS ({})", self.build_select_query(query)?),
            Predicate::Expr(expr) => return self.build_expression_with(expr, parent),
            Predicate::Nested(condition) => {
                return Ok(format!("({})", self.build_search_condition(condition)?));
            }
        };

        if needs_parentheses(predicate.precedence(), parent) {
            Ok(format!("({sql})"))
        } else {
            Ok(sql)
        }
    }
}

const fn not(negated: bool) -> &'static str {
    if negated {
        "NOT "
    } else {
        ""
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{
        precedence, BinaryOp, CompareOp, DataType, DatePart, Expr, Predicate, SearchCondition,
        Value, ValueType,
    };
    use crate::dialect::GenericDialect;
    use crate::render::Renderer;
    use crate::RenderConfig;

    fn render(expr: &Expr) -> String {
        let config = RenderConfig::default();
        Renderer::new(&GenericDialect, &config)
            .build_expression(expr)
            .unwrap()
    }

    fn int(name: &str) -> Expr {
        Expr::field(None, name, ValueType::Integer)
    }

    #[test]
    fn test_binary_parenthesization() {
        let sum = int("a").binary(BinaryOp::Add, int("b"));
        assert_eq!(render(&sum.clone().binary(BinaryOp::Mul, int("c"))), "(a + b) * c");
        assert_eq!(render(&int("c").binary(BinaryOp::Add, sum.clone())), "c + a + b");
        assert_eq!(render(&int("c").binary(BinaryOp::Sub, int("a").binary(BinaryOp::Sub, int("b")))), "c - (a - b)");
    }

    #[test]
    fn test_parameters() {
        let param = Expr::parameter("id", Value::Integer(5));
        assert_eq!(render(&param), ":id");

        let mut inline = param;
        if let Expr::Parameter(p) = &mut inline {
            p.is_query_parameter = false;
        }
        assert_eq!(render(&inline), "5");
    }

    #[test]
    fn test_generic_nodes() {
        assert_eq!(
            render(&Expr::field(Some("t"), "x", ValueType::Float).convert(DataType::Int32)),
            "CAST(t.x AS INTEGER)"
        );
        assert_eq!(
            render(&Expr::date_add(DatePart::Day, Expr::integer(2), int("d"))),
            "DATEADD(DAY, 2, d)"
        );
        assert_eq!(render(&Expr::extract(DatePart::Year, int("d"))), "EXTRACT(YEAR FROM d)");
        assert_eq!(
            render(&Expr::raw("GEN_ID({0}, 1)", ValueType::Integer, precedence::PRIMARY, vec![int("g")])),
            "GEN_ID(g, 1)"
        );
    }

    #[test]
    fn test_search_condition() {
        let cond = SearchCondition::from(Predicate::Compare {
            left: int("a"),
            op: CompareOp::Eq,
            right: Expr::integer(1),
        })
        .or(Predicate::IsNull {
            expr: int("b"),
            negated: true,
        })
        .and_not(Predicate::InList {
            expr: int("c"),
            values: vec![Expr::integer(1), Expr::integer(2)],
            negated: false,
        });
        assert_eq!(
            render(&Expr::Condition(cond)),
            "a = 1 OR b IS NOT NULL AND NOT c IN (1, 2)"
        );
    }

    #[test]
    fn test_empty_in_list() {
        let cond = SearchCondition::from(Predicate::InList {
            expr: int("a"),
            values: Vec::new(),
            negated: false,
        });
        assert_eq!(render(&Expr::Condition(cond)), "1 = 0");
    }

    #[test]
    fn test_nested_condition_expression_is_wrapped() {
        let inner = SearchCondition::from(Predicate::IsNull {
            expr: int("a"),
            negated: false,
        })
        .or(Predicate::IsNull {
            expr: int("b"),
            negated: false,
        });
        let outer = SearchCondition::from(Predicate::Expr(Expr::Condition(inner))).and(
            Predicate::IsNull {
                expr: int("c"),
                negated: false,
            },
        );
        assert_eq!(
            render(&Expr::Condition(outer)),
            "(a IS NULL OR b IS NULL) AND c IS NULL"
        );
    }
}

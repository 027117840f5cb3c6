//! Search conditions (boolean predicate trees).

use serde::{Deserialize, Serialize};

use super::expression::{precedence, Expr};
use super::statement::SelectQuery;

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompareOp {
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
}

impl CompareOp {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::NotEq => "<>",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
        }
    }
}

/// A single boolean predicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Predicate {
    /// `left op right`.
    Compare {
        left: Expr,
        op: CompareOp,
        right: Expr,
    },
    /// `expr IS [NOT] NULL`.
    IsNull { expr: Expr, negated: bool },
    /// `expr [NOT] LIKE pattern [ESCAPE escape]`.
    Like {
        expr: Expr,
        pattern: Expr,
        escape: Option<Expr>,
        negated: bool,
    },
    /// `expr [NOT] BETWEEN low AND high`.
    Between {
        expr: Expr,
        low: Expr,
        high: Expr,
        negated: bool,
    },
    /// `expr [NOT] IN (values...)`.
    InList {
        expr: Expr,
        values: Vec<Expr>,
        negated: bool,
    },
    /// `expr [NOT] IN (SELECT ...)`.
    InSubquery {
        expr: Expr,
        query: Box<SelectQuery>,
        negated: bool,
    },
    /// `EXISTS (SELECT ...)`.
    Exists(Box<SelectQuery>),
    /// A boolean-valued expression used as a predicate.
    Expr(Expr),
    /// A parenthesized group.
    Nested(SearchCondition),
}

impl Predicate {
    /// Returns the precedence of the predicate on its own.
    #[must_use]
    pub fn precedence(&self) -> u8 {
        match self {
            Self::Expr(expr) => expr.precedence(),
            Self::Nested(cond) => cond.precedence(),
            Self::Exists(_) => precedence::PRIMARY,
            Self::Compare { .. }
            | Self::IsNull { .. }
            | Self::Like { .. }
            | Self::Between { .. }
            | Self::InList { .. }
            | Self::InSubquery { .. } => precedence::COMPARISON,
        }
    }
}

/// A predicate in a search condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    /// Prefix with NOT.
    pub negated: bool,
    /// The predicate.
    pub predicate: Predicate,
    /// Joined to the next condition with OR instead of AND.
    pub is_or: bool,
}

/// An ordered list of conditions joined by AND / OR.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchCondition {
    /// The conditions, in source order.
    pub conditions: Vec<Condition>,
}

impl SearchCondition {
    /// Creates an empty condition (always true).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            conditions: Vec::new(),
        }
    }

    /// Appends a predicate joined with AND.
    #[must_use]
    pub fn and(mut self, predicate: Predicate) -> Self {
        self.conditions.push(Condition {
            negated: false,
            predicate,
            is_or: false,
        });
        self
    }

    /// Appends a predicate joined with OR.
    #[must_use]
    pub fn or(mut self, predicate: Predicate) -> Self {
        if let Some(last) = self.conditions.last_mut() {
            last.is_or = true;
        }
        self.conditions.push(Condition {
            negated: false,
            predicate,
            is_or: false,
        });
        self
    }

    /// Appends a negated predicate joined with AND.
    #[must_use]
    pub fn and_not(mut self, predicate: Predicate) -> Self {
        self.conditions.push(Condition {
            negated: true,
            predicate,
            is_or: false,
        });
        self
    }

    /// Returns whether there are no conditions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Returns whether any two conditions are joined with OR.
    #[must_use]
    pub fn has_or(&self) -> bool {
        let len = self.conditions.len();
        self.conditions
            .iter()
            .take(len.saturating_sub(1))
            .any(|c| c.is_or)
    }

    /// Returns the precedence of the whole condition.
    #[must_use]
    pub fn precedence(&self) -> u8 {
        match self.conditions.as_slice() {
            [] => precedence::PRIMARY,
            [single] if single.negated => precedence::LOGICAL_NEGATION,
            [single] => single.predicate.precedence(),
            _ if self.has_or() => precedence::LOGICAL_DISJUNCTION,
            _ => precedence::LOGICAL_CONJUNCTION,
        }
    }
}

impl From<Predicate> for SearchCondition {
    fn from(predicate: Predicate) -> Self {
        Self::new().and(predicate)
    }
}

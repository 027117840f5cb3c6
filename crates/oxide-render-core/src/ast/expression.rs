//! Expression AST types.

use serde::{Deserialize, Serialize};

use super::condition::{CompareOp, Predicate, SearchCondition};
use super::statement::SelectQuery;
use super::types::{DataType, ValueType};

/// Operator precedence levels (higher = binds tighter).
pub mod precedence {
    /// Literals, names, function calls.
    pub const PRIMARY: u8 = 100;
    /// Unary minus and friends.
    pub const UNARY: u8 = 80;
    /// `*`, `/`, `%`.
    pub const MULTIPLICATIVE: u8 = 70;
    /// `-`.
    pub const SUBTRACTION: u8 = 60;
    /// `+`, `||`.
    pub const ADDITIVE: u8 = 59;
    /// `=`, `<`, `LIKE`, `IN`, ...
    pub const COMPARISON: u8 = 50;
    /// `&`, `|`, `^`.
    pub const BITWISE: u8 = 40;
    /// `NOT`.
    pub const LOGICAL_NEGATION: u8 = 30;
    /// `AND`.
    pub const LOGICAL_CONJUNCTION: u8 = 20;
    /// `OR`.
    pub const LOGICAL_DISJUNCTION: u8 = 10;
    /// Always parenthesized when nested.
    pub const UNKNOWN: u8 = 0;
}

/// A literal value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// NULL.
    Null,
    /// Boolean.
    Boolean(bool),
    /// Integer.
    Integer(i64),
    /// Float.
    Float(f64),
    /// String.
    String(String),
    /// Binary data.
    Binary(Vec<u8>),
}

impl Value {
    /// Returns the declared type of the literal.
    #[must_use]
    pub const fn value_type(&self) -> ValueType {
        match self {
            Self::Null => ValueType::Unknown,
            Self::Boolean(_) => ValueType::Boolean,
            Self::Integer(_) => ValueType::Integer,
            Self::Float(_) => ValueType::Float,
            Self::String(_) => ValueType::String,
            Self::Binary(_) => ValueType::Binary,
        }
    }

    /// Returns the inline SQL representation (escaped).
    #[must_use]
    pub fn to_sql(&self) -> String {
        match self {
            Self::Null => String::from("NULL"),
            Self::Boolean(b) => String::from(if *b { "1" } else { "0" }),
            Self::Integer(n) => format!("{n}"),
            // SQL has no literal for NaN or infinity
            Self::Float(f) if !f.is_finite() => String::from("NULL"),
            Self::Float(f) => format!("{f}"),
            Self::String(s) => {
                // Escape single quotes by doubling them
                let escaped = s.replace('\'', "''");
                format!("'{escaped}'")
            }
            Self::Binary(b) => {
                let hex: String = b.iter().map(|byte| format!("{byte:02X}")).collect();
                format!("X'{hex}'")
            }
        }
    }
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,

    // String
    Concat,

    // Bitwise
    BitAnd,
    BitOr,
    BitXor,
}

impl BinaryOp {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Concat => "||",
            Self::BitAnd => "&",
            Self::BitOr => "|",
            Self::BitXor => "^",
        }
    }

    /// Returns the precedence of the operator.
    #[must_use]
    pub const fn precedence(&self) -> u8 {
        match self {
            Self::Add | Self::Concat => precedence::ADDITIVE,
            Self::Sub => precedence::SUBTRACTION,
            Self::Mul | Self::Div | Self::Mod => precedence::MULTIPLICATIVE,
            Self::BitAnd | Self::BitOr | Self::BitXor => precedence::BITWISE,
        }
    }
}

/// Date and time parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatePart {
    Year,
    Quarter,
    Month,
    DayOfYear,
    Day,
    Week,
    WeekDay,
    Hour,
    Minute,
    Second,
    Millisecond,
}

impl DatePart {
    /// Returns the SQL keyword for the part.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Year => "YEAR",
            Self::Quarter => "QUARTER",
            Self::Month => "MONTH",
            Self::DayOfYear => "YEARDAY",
            Self::Day => "DAY",
            Self::Week => "WEEK",
            Self::WeekDay => "WEEKDAY",
            Self::Hour => "HOUR",
            Self::Minute => "MINUTE",
            Self::Second => "SECOND",
            Self::Millisecond => "MILLISECOND",
        }
    }
}

/// A reference to a field, optionally qualified with a table alias.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRef {
    /// Table name or alias (optional).
    pub table: Option<String>,
    /// Physical field name.
    pub name: String,
    /// Declared type.
    pub value_type: ValueType,
}

/// A named query parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// Logical name, without any dialect prefix.
    pub name: String,
    /// The bound value.
    pub value: Value,
    /// Declared type.
    pub value_type: ValueType,
    /// When false the value is rendered inline instead of as a marker.
    pub is_query_parameter: bool,
}

/// A function call expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    /// The function name, emitted as-is.
    pub name: String,
    /// The arguments.
    pub args: Vec<Expr>,
    /// Declared result type.
    pub value_type: ValueType,
}

/// Raw SQL text with `{n}` placeholders for its arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawExpr {
    /// Template text.
    pub template: String,
    /// Arguments substituted into the template.
    pub args: Vec<Expr>,
    /// Declared result type.
    pub value_type: ValueType,
    /// Precedence of the whole snippet.
    pub precedence: u8,
}

/// A searched CASE expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseExpr {
    /// WHEN/THEN pairs.
    pub cases: Vec<(SearchCondition, Expr)>,
    /// ELSE result.
    pub else_result: Option<Box<Expr>>,
    /// Declared result type.
    pub value_type: ValueType,
}

/// Generic type cast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Convert {
    /// Requested target type.
    pub to: DataType,
    /// Source expression.
    pub expr: Box<Expr>,
}

/// Adds `number` date parts to `date`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateAdd {
    /// The unit being added.
    pub part: DatePart,
    /// How many units.
    pub number: Box<Expr>,
    /// The date being shifted.
    pub date: Box<Expr>,
}

/// Extracts a date part from a date expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extract {
    /// The part to extract.
    pub part: DatePart,
    /// The source date.
    pub source: Box<Expr>,
}

/// An SQL expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    /// A field reference.
    Field(FieldRef),

    /// Wildcard (*) in SELECT.
    Wildcard {
        /// Table qualifier (optional).
        table: Option<String>,
    },

    /// A literal value.
    Value(Value),

    /// A named parameter.
    Parameter(Parameter),

    /// A binary expression.
    Binary {
        /// Left operand.
        left: Box<Expr>,
        /// Operator.
        op: BinaryOp,
        /// Right operand.
        right: Box<Expr>,
        /// Declared result type.
        value_type: ValueType,
    },

    /// A function call.
    Function(FunctionCall),

    /// A raw SQL snippet.
    Raw(RawExpr),

    /// CASE WHEN ... END.
    Case(CaseExpr),

    /// A type cast.
    Convert(Convert),

    /// Date arithmetic.
    DateAdd(DateAdd),

    /// Date part extraction.
    Extract(Extract),

    /// A boolean search condition.
    Condition(SearchCondition),

    /// A scalar subquery.
    Subquery(Box<SelectQuery>),
}

impl Expr {
    /// Creates a field reference.
    #[must_use]
    pub fn field(table: Option<&str>, name: impl Into<String>, value_type: ValueType) -> Self {
        Self::Field(FieldRef {
            table: table.map(String::from),
            name: name.into(),
            value_type,
        })
    }

    /// Creates a literal.
    #[must_use]
    pub const fn value(value: Value) -> Self {
        Self::Value(value)
    }

    /// Creates an integer literal.
    #[must_use]
    pub const fn integer(value: i64) -> Self {
        Self::Value(Value::Integer(value))
    }

    /// Creates a string literal.
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self::Value(Value::String(value.into()))
    }

    /// Creates a boolean literal.
    #[must_use]
    pub const fn boolean(value: bool) -> Self {
        Self::Value(Value::Boolean(value))
    }

    /// Creates a bindable parameter typed after its value.
    #[must_use]
    pub fn parameter(name: impl Into<String>, value: Value) -> Self {
        let value_type = value.value_type();
        Self::Parameter(Parameter {
            name: name.into(),
            value,
            value_type,
            is_query_parameter: true,
        })
    }

    /// Creates a function call.
    #[must_use]
    pub fn function(name: impl Into<String>, value_type: ValueType, args: Vec<Self>) -> Self {
        Self::Function(FunctionCall {
            name: name.into(),
            args,
            value_type,
        })
    }

    /// Creates a raw SQL snippet.
    #[must_use]
    pub fn raw(
        template: impl Into<String>,
        value_type: ValueType,
        precedence: u8,
        args: Vec<Self>,
    ) -> Self {
        Self::Raw(RawExpr {
            template: template.into(),
            args,
            value_type,
            precedence,
        })
    }

    /// Creates a cast to `to`.
    #[must_use]
    pub fn convert(self, to: DataType) -> Self {
        Self::Convert(Convert {
            to,
            expr: Box::new(self),
        })
    }

    /// Creates a date addition.
    #[must_use]
    pub fn date_add(part: DatePart, number: Self, date: Self) -> Self {
        Self::DateAdd(DateAdd {
            part,
            number: Box::new(number),
            date: Box::new(date),
        })
    }

    /// Creates a date part extraction.
    #[must_use]
    pub fn extract(part: DatePart, source: Self) -> Self {
        Self::Extract(Extract {
            part,
            source: Box::new(source),
        })
    }

    /// Creates a binary expression typed after the left operand.
    #[must_use]
    pub fn binary(self, op: BinaryOp, right: Self) -> Self {
        let value_type = self.value_type();
        Self::Binary {
            left: Box::new(self),
            op,
            right: Box::new(right),
            value_type,
        }
    }

    /// `self + 1`.
    #[must_use]
    pub fn inc(self) -> Self {
        self.binary(BinaryOp::Add, Self::integer(1))
    }

    /// `self - 1`.
    #[must_use]
    pub fn dec(self) -> Self {
        self.binary(BinaryOp::Sub, Self::integer(1))
    }

    /// Returns the declared result type.
    #[must_use]
    pub fn value_type(&self) -> ValueType {
        match self {
            Self::Field(f) => f.value_type,
            Self::Wildcard { .. } => ValueType::Unknown,
            Self::Value(v) => v.value_type(),
            Self::Parameter(p) => p.value_type,
            Self::Binary { value_type, .. } => *value_type,
            Self::Function(f) => f.value_type,
            Self::Raw(r) => r.value_type,
            Self::Case(c) => c.value_type,
            Self::Convert(c) => c.to.value_type(),
            Self::DateAdd(_) => ValueType::DateTime,
            Self::Extract(_) => ValueType::Integer,
            Self::Condition(_) => ValueType::Boolean,
            Self::Subquery(q) => q
                .columns
                .first()
                .map_or(ValueType::Unknown, |c| c.expr.value_type()),
        }
    }

    /// Returns the precedence used to decide parenthesization.
    #[must_use]
    pub fn precedence(&self) -> u8 {
        match self {
            Self::Binary { op, .. } => op.precedence(),
            Self::Raw(r) => r.precedence,
            Self::Condition(c) => c.precedence(),
            Self::Field(_)
            | Self::Wildcard { .. }
            | Self::Value(_)
            | Self::Parameter(_)
            | Self::Function(_)
            | Self::Case(_)
            | Self::Convert(_)
            | Self::DateAdd(_)
            | Self::Extract(_)
            | Self::Subquery(_) => precedence::PRIMARY,
        }
    }

    /// Returns whether this is a search condition, or a `{0}` passthrough wrapping one.
    #[must_use]
    pub fn is_search_condition(&self) -> bool {
        match self {
            Self::Condition(_) => true,
            Self::Raw(raw) => {
                raw.template == "{0}"
                    && matches!(raw.args.as_slice(), [Self::Condition(_)])
            }
            _ => false,
        }
    }
}

/// Rewrites a cast of a numeric value to boolean as `CASE WHEN x = 0 THEN 0 ELSE 1 END`.
///
/// Returns `None` when the source is not numeric.
#[must_use]
pub fn alternative_convert_to_boolean(source: &Expr) -> Option<Expr> {
    if !source.value_type().is_numeric() {
        return None;
    }
    let is_zero = SearchCondition::from(Predicate::Compare {
        left: source.clone(),
        op: CompareOp::Eq,
        right: Expr::integer(0),
    });
    Some(Expr::Case(CaseExpr {
        cases: vec![(is_zero, Expr::boolean(false))],
        else_result: Some(Box::new(Expr::boolean(true))),
        value_type: ValueType::Boolean,
    }))
}

/// Returns the cast source, wrapped in `Floor` when a fractional value is cast to an integer.
#[must_use]
pub fn floor_before_convert(convert: &Convert) -> Expr {
    let source = convert.expr.value_type();
    if source.is_fractional() && convert.to.value_type() == ValueType::Integer {
        Expr::function("Floor", source, vec![(*convert.expr).clone()])
    } else {
        (*convert.expr).clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_op_precedence() {
        assert!(BinaryOp::Mul.precedence() > BinaryOp::Add.precedence());
        assert!(BinaryOp::Sub.precedence() > BinaryOp::Add.precedence());
        assert!(BinaryOp::Add.precedence() > BinaryOp::BitAnd.precedence());
    }

    #[test]
    fn test_binary_takes_left_type() {
        let expr = Expr::field(None, "name", ValueType::String).binary(BinaryOp::Add, Expr::string("x"));
        assert_eq!(expr.value_type(), ValueType::String);
        assert_eq!(expr.precedence(), precedence::ADDITIVE);
    }

    #[test]
    fn test_value_to_sql() {
        assert_eq!(Value::String(String::from("it's")).to_sql(), "'it''s'");
        assert_eq!(Value::Boolean(true).to_sql(), "1");
        assert_eq!(Value::Binary(vec![0xAB, 0x01]).to_sql(), "X'AB01'");
        assert_eq!(Value::Null.to_sql(), "NULL");
    }

    #[test]
    fn test_non_finite_float_is_null() {
        assert_eq!(Value::Float(1.5).to_sql(), "1.5");
        assert_eq!(Value::Float(f64::NAN).to_sql(), "NULL");
        assert_eq!(Value::Float(f64::INFINITY).to_sql(), "NULL");
        assert_eq!(Value::Float(f64::NEG_INFINITY).to_sql(), "NULL");
    }

    #[test]
    fn test_alternative_convert_to_boolean() {
        let numeric = Expr::field(None, "flag", ValueType::Integer);
        let converted = alternative_convert_to_boolean(&numeric).unwrap();
        assert_eq!(converted.value_type(), ValueType::Boolean);
        assert!(matches!(converted, Expr::Case(_)));

        let text = Expr::field(None, "flag", ValueType::String);
        assert!(alternative_convert_to_boolean(&text).is_none());
    }

    #[test]
    fn test_floor_before_convert() {
        let convert = Convert {
            to: DataType::Int32,
            expr: Box::new(Expr::field(None, "price", ValueType::Float)),
        };
        assert!(matches!(floor_before_convert(&convert), Expr::Function(f) if f.name == "Floor"));

        let convert = Convert {
            to: DataType::Double,
            expr: Box::new(Expr::field(None, "price", ValueType::Float)),
        };
        assert!(matches!(floor_before_convert(&convert), Expr::Field(_)));
    }

    #[test]
    fn test_is_search_condition() {
        let cond = Expr::Condition(SearchCondition::from(Predicate::IsNull {
            expr: Expr::field(None, "a", ValueType::Integer),
            negated: false,
        }));
        assert!(cond.is_search_condition());

        let passthrough = Expr::raw("{0}", ValueType::Boolean, precedence::PRIMARY, vec![cond.clone()]);
        assert!(passthrough.is_search_condition());

        let wrapped = Expr::raw("NOT {0}", ValueType::Boolean, precedence::LOGICAL_NEGATION, vec![cond]);
        assert!(!wrapped.is_search_condition());
    }
}

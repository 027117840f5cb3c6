//! Expression rewrites onto Firebird operators and functions.
//!
//! [`convert_expression`] looks at a single node. The renderer calls it for
//! every node it emits, so children are rewritten when they are rendered.
//! The rewrite keeps the node's declared value type, and the nodes it
//! produces are not rewritten again.

use oxide_render_core::ast::{
    alternative_convert_to_boolean, floor_before_convert, precedence, BinaryOp, Convert, DateAdd,
    DatePart, Expr, Extract, FunctionCall, ValueType,
};

use crate::types::map_data_type;

/// Rewrites one node, or returns `None` when Firebird accepts it as is.
#[must_use]
pub fn convert_expression(expr: &Expr) -> Option<Expr> {
    match expr {
        Expr::Binary {
            left,
            op,
            right,
            value_type,
        } => convert_binary(left, *op, right, *value_type),
        Expr::Convert(convert) => Some(convert_cast(convert)),
        Expr::DateAdd(add) => convert_date_add(add),
        Expr::Extract(extract) => convert_extract(extract),
        Expr::Field(_)
        | Expr::Wildcard { .. }
        | Expr::Value(_)
        | Expr::Parameter(_)
        | Expr::Function(_)
        | Expr::Raw(_)
        | Expr::Case(_)
        | Expr::Condition(_)
        | Expr::Subquery(_) => None,
    }
}

fn convert_binary(left: &Expr, op: BinaryOp, right: &Expr, value_type: ValueType) -> Option<Expr> {
    let function = |name: &str| {
        Expr::Function(FunctionCall {
            name: name.to_string(),
            args: vec![left.clone(), right.clone()],
            value_type,
        })
    };

    match op {
        BinaryOp::Mod => Some(function("Mod")),
        BinaryOp::BitAnd => Some(function("Bin_And")),
        BinaryOp::BitOr => Some(function("Bin_Or")),
        BinaryOp::BitXor => Some(function("Bin_Xor")),
        BinaryOp::Add if value_type == ValueType::String => Some(Expr::Binary {
            left: Box::new(left.clone()),
            op: BinaryOp::Concat,
            right: Box::new(right.clone()),
            value_type,
        }),
        BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Concat => None,
    }
}

fn convert_cast(convert: &Convert) -> Expr {
    let target = convert.to.value_type();
    if target == ValueType::Boolean {
        if let Some(expr) = alternative_convert_to_boolean(&convert.expr) {
            return expr;
        }
    }
    Expr::raw(
        format!("CAST({{0}} AS {})", map_data_type(&convert.to)),
        target,
        precedence::PRIMARY,
        vec![floor_before_convert(convert)],
    )
}

fn convert_date_add(add: &DateAdd) -> Option<Expr> {
    let (part, number) = match add.part {
        DatePart::Quarter => (DatePart::Month, times(&add.number, 3)),
        DatePart::DayOfYear | DatePart::WeekDay => (DatePart::Day, (*add.number).clone()),
        DatePart::Week => (DatePart::Day, times(&add.number, 7)),
        DatePart::Year
        | DatePart::Month
        | DatePart::Day
        | DatePart::Hour
        | DatePart::Minute
        | DatePart::Second
        | DatePart::Millisecond => return None,
    };
    Some(Expr::date_add(part, number, (*add.date).clone()))
}

fn times(number: &Expr, factor: i64) -> Expr {
    number.clone().binary(BinaryOp::Mul, Expr::integer(factor))
}

fn convert_extract(extract: &Extract) -> Option<Expr> {
    let source = (*extract.source).clone();
    match extract.part {
        DatePart::Quarter => {
            let month = Expr::extract(DatePart::Month, source).dec();
            let quarter = month.binary(BinaryOp::Div, Expr::integer(3));
            let floor = Expr::function("FLOOR", ValueType::Integer, vec![quarter]);
            Some(Expr::integer(1).binary(BinaryOp::Add, floor))
        }
        // Firebird counts both from zero and spells them in lower case
        DatePart::DayOfYear => Some(lower_case_extract("yearday", source).inc()),
        DatePart::WeekDay => Some(lower_case_extract("weekday", source).inc()),
        DatePart::Year
        | DatePart::Month
        | DatePart::Day
        | DatePart::Week
        | DatePart::Hour
        | DatePart::Minute
        | DatePart::Second
        | DatePart::Millisecond => None,
    }
}

fn lower_case_extract(part: &str, source: Expr) -> Expr {
    Expr::raw(
        format!("EXTRACT({part} FROM {{0}})"),
        ValueType::Integer,
        precedence::PRIMARY,
        vec![source],
    )
}

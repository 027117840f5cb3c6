//! Abstract Syntax Tree (AST) types for SQL statements.

mod condition;
mod expression;
mod statement;
mod types;
pub mod visit;

pub use condition::{CompareOp, Condition, Predicate, SearchCondition};
pub use expression::{
    alternative_convert_to_boolean, floor_before_convert, precedence, BinaryOp, CaseExpr, Convert,
    DateAdd, DatePart, Expr, Extract, FieldRef, FunctionCall, Parameter, RawExpr, Value,
};
pub use statement::{
    CreateTableStatement, DeleteStatement, DropTableStatement, Field, InsertOrUpdateStatement,
    InsertStatement, Join, JoinType, OrderBy, OrderDirection, SelectColumn, SelectQuery, SetItem,
    Source, Statement, StatementKind, Table, TableSource, UpdateStatement,
};
pub use types::{DataType, ValueType};

//! SQL statement AST types.

use serde::{Deserialize, Serialize};

use super::condition::{Predicate, SearchCondition};
use super::expression::{Expr, Parameter};
use super::types::DataType;
use super::visit::{walk_statement, Visitor};

/// Order direction for ORDER BY.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OrderDirection {
    /// Ascending order (default).
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl OrderDirection {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// An ORDER BY clause entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBy {
    /// The expression to order by.
    pub expr: Expr,
    /// The direction (ASC or DESC).
    pub direction: OrderDirection,
}

/// Join type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JoinType {
    /// INNER JOIN.
    Inner,
    /// LEFT OUTER JOIN.
    Left,
    /// RIGHT OUTER JOIN.
    Right,
    /// FULL OUTER JOIN.
    Full,
    /// CROSS JOIN.
    Cross,
}

impl JoinType {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Inner => "INNER JOIN",
            Self::Left => "LEFT JOIN",
            Self::Right => "RIGHT JOIN",
            Self::Full => "FULL JOIN",
            Self::Cross => "CROSS JOIN",
        }
    }
}

/// A column of a mapped table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Logical name.
    pub name: String,
    /// Name of the column in the database.
    pub physical_name: String,
    /// Abstract column type.
    pub data_type: DataType,
    /// Whether NULL is allowed.
    pub nullable: bool,
    /// Part of the primary key.
    pub primary_key: bool,
    /// Value generated by the database on insert.
    pub is_identity: bool,
    /// Generator feeding this column, if any.
    pub sequence: Option<String>,
}

impl Field {
    /// Creates a nullable field whose physical name equals its name.
    #[must_use]
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        let name = name.into();
        Self {
            physical_name: name.clone(),
            name,
            data_type,
            nullable: true,
            primary_key: false,
            is_identity: false,
            sequence: None,
        }
    }

    /// Sets the physical column name.
    #[must_use]
    pub fn physical_name(mut self, name: impl Into<String>) -> Self {
        self.physical_name = name.into();
        self
    }

    /// Marks the field NOT NULL.
    #[must_use]
    pub const fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Marks the field as (part of) the primary key. Implies NOT NULL.
    #[must_use]
    pub const fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self.nullable = false;
        self
    }

    /// Marks the field as an identity column. Implies NOT NULL.
    #[must_use]
    pub const fn identity(mut self) -> Self {
        self.is_identity = true;
        self.nullable = false;
        self
    }

    /// Attaches a generator to the field.
    #[must_use]
    pub fn sequence(mut self, name: impl Into<String>) -> Self {
        self.sequence = Some(name.into());
        self
    }

    /// Returns a reference to this field, optionally qualified.
    #[must_use]
    pub fn to_expr(&self, table: Option<&str>) -> Expr {
        Expr::field(table, &self.physical_name, self.data_type.value_type())
    }
}

/// A mapped table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Logical name.
    pub name: String,
    /// Name of the table in the database.
    pub physical_name: String,
    /// Columns in declaration order.
    pub fields: Vec<Field>,
}

impl Table {
    /// Creates an empty table whose physical name equals its name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            physical_name: name.clone(),
            name,
            fields: Vec::new(),
        }
    }

    /// Sets the physical table name.
    #[must_use]
    pub fn physical_name(mut self, name: impl Into<String>) -> Self {
        self.physical_name = name.into();
        self
    }

    /// Appends a field.
    #[must_use]
    pub fn column(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Looks up a field by logical or physical name.
    #[must_use]
    pub fn find_field(&self, name: &str) -> Option<&Field> {
        self.fields
            .iter()
            .find(|f| f.name == name || f.physical_name == name)
    }

    /// Returns the identity fields.
    pub fn identity_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| f.is_identity)
    }

    /// Returns the primary key fields.
    pub fn primary_keys(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| f.primary_key)
    }

    /// Returns the first sequence declared on any field.
    #[must_use]
    pub fn sequence_name(&self) -> Option<&str> {
        self.fields.iter().find_map(|f| f.sequence.as_deref())
    }
}

/// What a FROM entry reads from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Source {
    /// A mapped table.
    Table(Table),
    /// A derived table.
    Query(Box<SelectQuery>),
}

/// A FROM entry with its joins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSource {
    /// The source.
    pub source: Source,
    /// Alias (optional).
    pub alias: Option<String>,
    /// Joins hanging off this source.
    pub joins: Vec<Join>,
}

impl TableSource {
    /// Creates a source reading a table.
    #[must_use]
    pub const fn table(table: Table) -> Self {
        Self {
            source: Source::Table(table),
            alias: None,
            joins: Vec::new(),
        }
    }

    /// Creates a source reading a subquery.
    #[must_use]
    pub fn query(query: SelectQuery) -> Self {
        Self {
            source: Source::Query(Box::new(query)),
            alias: None,
            joins: Vec::new(),
        }
    }

    /// Adds an alias to this source.
    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Adds a join.
    #[must_use]
    pub fn join(mut self, join_type: JoinType, source: Self, on: SearchCondition) -> Self {
        self.joins.push(Join {
            join_type,
            source,
            on,
        });
        self
    }

    /// Returns every alias (or table name) reachable from this source.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let own = self.alias.clone().or_else(|| match &self.source {
            Source::Table(table) => Some(table.physical_name.clone()),
            Source::Query(_) => None,
        });
        own.into_iter()
            .chain(self.joins.iter().flat_map(|j| j.source.names()))
            .collect()
    }
}

/// A JOIN clause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Join {
    /// The type of join.
    pub join_type: JoinType,
    /// The joined source.
    pub source: TableSource,
    /// The join condition (empty for CROSS joins).
    pub on: SearchCondition,
}

/// A column in SELECT clause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectColumn {
    /// The expression.
    pub expr: Expr,
    /// Column alias.
    pub alias: Option<String>,
}

impl SelectColumn {
    /// Creates a new select column.
    #[must_use]
    pub const fn new(expr: Expr) -> Self {
        Self { expr, alias: None }
    }

    /// Creates a select column with an alias.
    #[must_use]
    pub fn with_alias(expr: Expr, alias: impl Into<String>) -> Self {
        Self {
            expr,
            alias: Some(alias.into()),
        }
    }
}

/// A SELECT query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectQuery {
    /// Whether to select DISTINCT values.
    pub distinct: bool,
    /// The columns to select (`*` when empty).
    pub columns: Vec<SelectColumn>,
    /// The FROM entries.
    pub from: Vec<TableSource>,
    /// The WHERE clause.
    pub where_clause: SearchCondition,
    /// GROUP BY expressions.
    pub group_by: Vec<Expr>,
    /// HAVING clause.
    pub having: SearchCondition,
    /// ORDER BY clauses.
    pub order_by: Vec<OrderBy>,
    /// Rows to skip.
    pub skip: Option<Expr>,
    /// Rows to take.
    pub take: Option<Expr>,
}

impl SelectQuery {
    /// Creates an empty query.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a column.
    #[must_use]
    pub fn column(mut self, expr: Expr) -> Self {
        self.columns.push(SelectColumn::new(expr));
        self
    }

    /// Adds an aliased column.
    #[must_use]
    pub fn column_as(mut self, expr: Expr, alias: impl Into<String>) -> Self {
        self.columns.push(SelectColumn::with_alias(expr, alias));
        self
    }

    /// Adds a FROM entry.
    #[must_use]
    pub fn from(mut self, source: TableSource) -> Self {
        self.from.push(source);
        self
    }

    /// Adds a predicate to WHERE, joined with AND.
    #[must_use]
    pub fn filter(mut self, predicate: Predicate) -> Self {
        self.where_clause = self.where_clause.and(predicate);
        self
    }

    /// Adds an ORDER BY entry.
    #[must_use]
    pub fn order_by(mut self, expr: Expr, direction: OrderDirection) -> Self {
        self.order_by.push(OrderBy { expr, direction });
        self
    }

    /// Sets the number of rows to skip.
    #[must_use]
    pub fn skip(mut self, expr: Expr) -> Self {
        self.skip = Some(expr);
        self
    }

    /// Sets the number of rows to take.
    #[must_use]
    pub fn take(mut self, expr: Expr) -> Self {
        self.take = Some(expr);
        self
    }

    /// Returns every alias (or table name) introduced by the FROM clause.
    #[must_use]
    pub fn source_names(&self) -> Vec<String> {
        self.from.iter().flat_map(TableSource::names).collect()
    }
}

/// An assignment `column = expr` (INSERT / UPDATE / MERGE keys).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetItem {
    /// Physical column name.
    pub column: String,
    /// Value expression.
    pub expr: Expr,
}

impl SetItem {
    /// Creates an assignment.
    #[must_use]
    pub fn new(column: impl Into<String>, expr: Expr) -> Self {
        Self {
            column: column.into(),
            expr,
        }
    }
}

/// An INSERT statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsertStatement {
    /// Target table.
    pub into: Table,
    /// Assigned columns.
    pub items: Vec<SetItem>,
    /// Return the generated identity value.
    pub with_identity: bool,
}

/// An UPDATE statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateStatement {
    /// Target table.
    pub table: Table,
    /// Target alias.
    pub alias: Option<String>,
    /// SET assignments.
    pub items: Vec<SetItem>,
    /// Other sources (in `from`) and the filter (in `where_clause`).
    pub query: SelectQuery,
}

/// A DELETE statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteStatement {
    /// Target table.
    pub table: Table,
    /// Target alias.
    pub alias: Option<String>,
    /// Other sources (in `from`) and the filter (in `where_clause`).
    pub query: SelectQuery,
}

/// Insert a row, or update it when the keys already match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsertOrUpdateStatement {
    /// Target table.
    pub table: Table,
    /// Columns assigned on insert.
    pub insert: Vec<SetItem>,
    /// Columns assigned on update.
    pub update: Vec<SetItem>,
    /// Key columns and the values they must match.
    pub keys: Vec<SetItem>,
}

/// A CREATE TABLE statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTableStatement {
    /// The table to create.
    pub table: Table,
}

/// A DROP TABLE statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropTableStatement {
    /// The table to drop.
    pub table: Table,
}

/// A SQL statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Statement {
    /// SELECT statement.
    Select(SelectQuery),
    /// INSERT statement.
    Insert(InsertStatement),
    /// UPDATE statement.
    Update(UpdateStatement),
    /// DELETE statement.
    Delete(DeleteStatement),
    /// MERGE-style upsert.
    InsertOrUpdate(InsertOrUpdateStatement),
    /// CREATE TABLE statement.
    CreateTable(CreateTableStatement),
    /// DROP TABLE statement.
    DropTable(DropTableStatement),
}

/// The kind of a [`Statement`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatementKind {
    Select,
    Insert,
    Update,
    Delete,
    InsertOrUpdate,
    CreateTable,
    DropTable,
}

impl StatementKind {
    /// Returns a human-readable name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Select => "SELECT",
            Self::Insert => "INSERT",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
            Self::InsertOrUpdate => "INSERT OR UPDATE",
            Self::CreateTable => "CREATE TABLE",
            Self::DropTable => "DROP TABLE",
        }
    }
}

impl Statement {
    /// Returns the kind of the statement.
    #[must_use]
    pub const fn kind(&self) -> StatementKind {
        match self {
            Self::Select(_) => StatementKind::Select,
            Self::Insert(_) => StatementKind::Insert,
            Self::Update(_) => StatementKind::Update,
            Self::Delete(_) => StatementKind::Delete,
            Self::InsertOrUpdate(_) => StatementKind::InsertOrUpdate,
            Self::CreateTable(_) => StatementKind::CreateTable,
            Self::DropTable(_) => StatementKind::DropTable,
        }
    }

    /// Returns the target table of a data-modification or DDL statement.
    #[must_use]
    pub const fn table(&self) -> Option<&Table> {
        match self {
            Self::Select(_) => None,
            Self::Insert(s) => Some(&s.into),
            Self::Update(s) => Some(&s.table),
            Self::Delete(s) => Some(&s.table),
            Self::InsertOrUpdate(s) => Some(&s.table),
            Self::CreateTable(s) => Some(&s.table),
            Self::DropTable(s) => Some(&s.table),
        }
    }

    /// Returns the table of a CREATE TABLE or DROP TABLE statement.
    #[must_use]
    pub const fn ddl_table(&self) -> Option<&Table> {
        match self {
            Self::CreateTable(s) => Some(&s.table),
            Self::DropTable(s) => Some(&s.table),
            _ => None,
        }
    }

    /// Returns the names of parameters that must be bound by the caller, in
    /// the order they appear.
    #[must_use]
    pub fn query_parameters(&self) -> Vec<String> {
        struct Collect(Vec<String>);

        impl Visitor for Collect {
            fn visit_parameter(&mut self, parameter: &Parameter) {
                if parameter.is_query_parameter && !self.0.contains(&parameter.name) {
                    self.0.push(parameter.name.clone());
                }
            }
        }

        let mut collect = Collect(Vec::new());
        walk_statement(&mut collect, self);
        collect.0
    }
}

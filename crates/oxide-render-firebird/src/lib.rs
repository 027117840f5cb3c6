//! # oxide-render-firebird
//!
//! Firebird dialect for `oxide-render-core`.
//!
//! # How Firebird differs from other dialects
//!
//! - **[FIRST/SKIP]**: paging goes right after `SELECT` as
//!   `SELECT FIRST m SKIP n ...`; there is no `LIMIT`/`OFFSET`.
//! - **No FROM-less SELECT**: a query without sources reads from the
//!   one-row system table `rdb$database`.
//! - **[Generators]**: identity columns are emulated with a generator
//!   and a `BEFORE INSERT` trigger, so CREATE/DROP TABLE of such a
//!   table expands to three commands.
//! - **[RETURNING]**: `INSERT ... RETURNING <identity>` returns the
//!   generated value.
//! - **[MERGE]**: insert-or-update is a `MERGE` over `rdb$database`.
//! - **Built-in functions**: `%`, `&`, `|` and `^` are spelled `Mod`,
//!   `Bin_And`, `Bin_Or` and `Bin_Xor`. String `+` is `||`.
//! - **No boolean columns** (before Firebird 3): selected search
//!   conditions are wrapped as `CASE WHEN ... THEN 1 ELSE 0 END`.
//! - **Types**: `DECIMAL` precision is at most 18; there is no
//!   `TINYINT`, `NVARCHAR` or `DATETIME`.
//! - **Parameters** are named `@name`, and some positions (selected
//!   columns, MERGE values, `IN (SELECT ...)` probes) take inline
//!   literals instead of markers.
//!
//! [FIRST/SKIP]: https://firebirdsql.org/file/documentation/html/en/refdocs/fblangref25/firebird-25-language-reference.html#fblangref25-dml-select-first-skip
//! [Generators]: https://firebirdsql.org/file/documentation/html/en/refdocs/fblangref25/firebird-25-language-reference.html#fblangref25-ddl-sequence
//! [RETURNING]: https://firebirdsql.org/file/documentation/html/en/refdocs/fblangref25/firebird-25-language-reference.html#fblangref25-dml-insert-returning
//! [MERGE]: https://firebirdsql.org/file/documentation/html/en/refdocs/fblangref25/firebird-25-language-reference.html#fblangref25-dml-merge
//!
//! ## Example
//!
//! ```rust
//! use oxide_render_core::ast::{
//!     CreateTableStatement, DataType, Field, Statement, Table,
//! };
//! use oxide_render_core::{RenderConfig, SqlProvider};
//! use oxide_render_firebird::FirebirdDialect;
//!
//! let provider = SqlProvider::new(FirebirdDialect::new(), RenderConfig::default());
//! let table = Table::new("people")
//!     .column(Field::new("id", DataType::Int32).identity().primary_key());
//!
//! let commands = provider
//!     .build_sql(Statement::CreateTable(CreateTableStatement { table }))
//!     .unwrap();
//! assert_eq!(commands.len(), 3);
//! assert_eq!(commands[0], "CREATE GENERATOR GIDENTITY_people");
//! ```

mod clauses;
mod dialect;
pub mod finalize;
mod identity;
pub mod parameters;
pub mod rewrite;
pub mod types;

pub use clauses::DUMMY_TABLE;
pub use dialect::FirebirdDialect;
pub use identity::{GENERATOR_PREFIX, TRIGGER_PREFIX};

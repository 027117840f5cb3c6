//! # oxide-render-core
//!
//! A vendor-neutral SQL statement model and the generic renderer that
//! dialect crates build on.
//!
//! This crate provides:
//! - An in-memory statement AST ([`ast`]) built from typed expression nodes
//! - A [`Dialect`] strategy trait whose hooks override individual clauses
//! - A generic [`Renderer`] used whenever a dialect hook declines
//! - [`CommandPlan`]s for statements that expand to several commands
//! - A normalization pass ([`finalize`]) run once before rendering
//!
//! ## Rendering a statement
//!
//! ```rust
//! use oxide_render_core::ast::{Expr, SelectQuery, Statement, Table, TableSource, ValueType};
//! use oxide_render_core::{GenericDialect, RenderConfig, SqlProvider};
//!
//! let provider = SqlProvider::new(GenericDialect::new(), RenderConfig::default());
//! let query = SelectQuery::new()
//!     .column(Expr::field(None, "id", ValueType::Integer))
//!     .from(TableSource::table(Table::new("users")))
//!     .take(Expr::integer(10));
//!
//! let sql = provider.build_sql(Statement::Select(query)).unwrap();
//! assert_eq!(sql, vec!["SELECT id FROM users LIMIT 10"]);
//! ```

pub mod ast;
pub mod command;
pub mod config;
pub mod dialect;
pub mod error;
pub mod finalize;
pub mod provider;
pub mod render;

pub use ast::{Expr, Statement};
pub use command::{CommandPlan, IdentityState};
pub use config::RenderConfig;
pub use dialect::{ConvertType, Dialect, GenericDialect};
pub use error::{RenderError, Result};
pub use provider::SqlProvider;
pub use render::Renderer;

//! Statement normalization for Firebird.

use oxide_render_core::ast::Statement;
use oxide_render_core::finalize::{alternative_delete, alternative_update, check_aliases, optimize};
use tracing::debug;

use crate::parameters::mark_literal_parameters;

/// Normalizes a statement before rendering:
///
/// 1. make column aliases unique;
/// 2. inline parameters Firebird cannot bind;
/// 3. apply the generic optimizations;
/// 4. rewrite multi-table DELETE/UPDATE into single-table form.
#[must_use]
pub fn finalize(mut statement: Statement) -> Statement {
    debug!(kind = statement.kind().as_str(), "Finalizing statement");

    check_aliases(&mut statement, usize::MAX);
    mark_literal_parameters(&mut statement);

    match optimize(statement) {
        Statement::Delete(delete) => Statement::Delete(alternative_delete(delete)),
        Statement::Update(update) => Statement::Update(alternative_update(update)),
        other => other,
    }
}

//! Post-walk resolution of a scope's raw column accesses.

use super::scope::{ScopeState, DUAL_TABLE};
use crate::types::ColumnAccess;
use std::collections::HashSet;
#[cfg(feature = "tracing")]
use tracing::debug;

/// Resolves every raw column of a finished scope into its final, canonical form.
///
/// Runs the table-less discard, the qualifier fill, the aliased-subquery column
/// remap and finally the alias-to-table remap, in that order, then dedupes and
/// sorts.
pub(crate) fn resolve_scope(scope: ScopeState) -> Vec<ColumnAccess> {
    if scope.tables.len() == 1 && scope.tables[0] == DUAL_TABLE {
        #[cfg(feature = "tracing")]
        debug!(
            discarded = scope.columns.len(),
            "scope has no real table, discarding columns"
        );
        return Vec::new();
    }

    let fill = fill_qualifier(&scope.tables);
    let ScopeState {
        alias_to_table,
        alias_column_to_column,
        columns,
        ..
    } = scope;

    let resolved = columns
        .into_iter()
        .map(|mut access| {
            if access.table.is_empty() {
                access.table = fill.clone();
            }

            let key = (access.table.clone(), access.column.clone());
            if let Some((table, _)) = alias_column_to_column.get(&key) {
                access.table = table.clone();
            }

            if let Some(table) = alias_to_table.get(&access.table) {
                access.table = table.clone();
            }

            debug_assert!(
                !access.table.is_empty() || fill.is_empty(),
                "column {} left without a table after resolution",
                access.column
            );
            access
        })
        .collect();

    dedup_and_sort(resolved)
}

/// The table assigned to unqualified columns: the single distinct table, or the
/// comma-joined list of distinct tables in encounter order.
fn fill_qualifier(tables: &[String]) -> String {
    let mut seen = HashSet::new();
    let distinct: Vec<&str> = tables
        .iter()
        .map(String::as_str)
        .filter(|table| seen.insert(*table))
        .collect();
    distinct.join(",")
}

/// Removes duplicate triples and orders by `table:column:type`.
pub(crate) fn dedup_and_sort(mut columns: Vec<ColumnAccess>) -> Vec<ColumnAccess> {
    let mut seen = HashSet::new();
    columns.retain(|access| seen.insert(access.clone()));
    columns.sort_by_cached_key(|access| (access.sort_key(), access.clone()));
    columns
}

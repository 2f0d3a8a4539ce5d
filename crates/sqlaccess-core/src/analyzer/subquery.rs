//! Independent scopes for nested subqueries and common table expressions.

use super::helpers::ident_value;
use super::resolution::resolve_scope;
use super::scope::{Frame, ScopeState};
use super::Analyzer;
use crate::error::AnalyzeError;
use crate::types::ColumnAccess;
use sqlparser::ast::{Cte, Query};
#[cfg(feature = "tracing")]
use tracing::debug;

impl Analyzer {
    /// Walks `query` in a fresh scope, resolves it, and merges the result into
    /// `parent`.
    ///
    /// Every resolved column is appended to the parent's columns and its table
    /// added to the parent's tables if missing. With a non-empty `alias`, each
    /// column is also reachable from the parent as `alias.column`.
    pub(super) fn resolve_subquery(
        &self,
        query: &Query,
        alias: &str,
        parent: &mut ScopeState,
        frame: Frame,
    ) -> Result<Vec<ColumnAccess>, AnalyzeError> {
        let mut inner = parent.nested();
        self.walk_query(query, &mut inner, frame.subquery()?)?;
        let resolved = resolve_scope(inner);

        #[cfg(feature = "tracing")]
        debug!(
            alias,
            columns = resolved.len(),
            depth = frame.depth,
            "merging subquery scope"
        );

        for access in &resolved {
            parent.add_table_if_absent(&access.table);
            if !alias.is_empty() {
                parent.register_alias_column(alias, access);
            }
        }
        parent.columns.extend(resolved.iter().cloned());
        Ok(resolved)
    }

    /// Resolves one `WITH` entry and makes it visible to the rest of `scope`.
    ///
    /// The CTE's own columns count as accesses of the defining scope. Its tables
    /// are not added until the CTE is referenced.
    pub(super) fn resolve_cte(
        &self,
        cte: &Cte,
        scope: &mut ScopeState,
        frame: Frame,
    ) -> Result<(), AnalyzeError> {
        let name = ident_value(&cte.alias.name, self.case);
        let mut inner = scope.nested();
        self.walk_query(&cte.query, &mut inner, frame.subquery()?)?;
        let resolved = resolve_scope(inner);

        #[cfg(feature = "tracing")]
        debug!(cte = %name, columns = resolved.len(), "registering common table expression");

        scope.columns.extend(resolved.iter().cloned());
        scope.ctes.insert(name, resolved);
        Ok(())
    }

    /// Binds a `FROM cte [AS alias]` reference: the CTE's source tables join the
    /// scope and `qualifier.column` maps back to them. A CTE without any
    /// resolved column stands in as a table of its own.
    pub(super) fn reference_cte(
        &self,
        name: &str,
        qualifier: &str,
        columns: &[ColumnAccess],
        scope: &mut ScopeState,
    ) {
        if columns.is_empty() {
            scope.add_table(name);
            scope.register_alias(qualifier, name);
            return;
        }
        for access in columns {
            scope.add_table_if_absent(&access.table);
            scope.register_alias_column(qualifier, access);
        }
    }
}

//! Per-scope walk state.
//!
//! A [`ScopeState`] lives for exactly one statement or subquery walk. Lists are
//! append-only and maps are last-write-wins, so the order in which the walker
//! visits nodes is the only thing that decides tie-breaking before the final
//! sort.

use crate::error::AnalyzeError;
use crate::types::{ColumnAccess, StatementType};
use std::collections::HashMap;

/// Sentinel table recorded for a `SELECT` without a `FROM` clause.
pub(crate) const DUAL_TABLE: &str = "dual";

/// Key of the aliased-subquery column map: `(qualifier, column)`.
pub(crate) type ColumnKey = (String, String);

#[derive(Debug, Default)]
pub(crate) struct ScopeState {
    /// Tables in encounter order; may hold duplicates.
    pub(crate) tables: Vec<String>,
    /// Alias (or bare table name) to canonical table name.
    pub(crate) alias_to_table: HashMap<String, String>,
    /// `(outer alias, column)` to `(inner table, column)` for columns surfaced by an
    /// aliased subquery.
    pub(crate) alias_column_to_column: HashMap<ColumnKey, ColumnKey>,
    /// Raw column accesses, table possibly empty until resolution.
    pub(crate) columns: Vec<ColumnAccess>,
    /// Resolved columns of every common table expression visible here.
    pub(crate) ctes: HashMap<String, Vec<ColumnAccess>>,
}

impl ScopeState {
    /// A fresh scope for a nested subquery.
    ///
    /// Only the visible CTE definitions carry over; tables, aliases and columns
    /// start empty.
    pub(crate) fn nested(&self) -> Self {
        Self {
            ctes: self.ctes.clone(),
            ..Self::default()
        }
    }

    pub(crate) fn add_table(&mut self, table: impl Into<String>) {
        self.tables.push(table.into());
    }

    pub(crate) fn add_table_if_absent(&mut self, table: &str) {
        if !self.tables.iter().any(|existing| existing == table) {
            self.tables.push(table.to_string());
        }
    }

    pub(crate) fn register_alias(&mut self, alias: impl Into<String>, table: impl Into<String>) {
        self.alias_to_table.insert(alias.into(), table.into());
    }

    pub(crate) fn register_alias_column(&mut self, alias: &str, access: &ColumnAccess) {
        self.alias_column_to_column.insert(
            (alias.to_string(), access.column.clone()),
            (access.table.clone(), access.column.clone()),
        );
    }

    pub(crate) fn push_column(
        &mut self,
        table: impl Into<String>,
        column: impl Into<String>,
        statement_type: StatementType,
    ) {
        self.columns.push(ColumnAccess::new(table, column, statement_type));
    }

    pub(crate) fn cte(&self, name: &str) -> Option<&Vec<ColumnAccess>> {
        self.ctes.get(name)
    }
}

/// Statement type and nesting depth handed down the walk by value.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Frame {
    pub(crate) statement_type: StatementType,
    pub(crate) depth: usize,
    max_depth: usize,
}

impl Frame {
    pub(crate) fn root(max_depth: usize) -> Self {
        Self {
            statement_type: StatementType::Unknown,
            depth: 0,
            max_depth,
        }
    }

    /// One level deeper, keeping the statement type.
    pub(crate) fn descend(self) -> Result<Self, AnalyzeError> {
        let depth = self.depth + 1;
        if depth > self.max_depth {
            return Err(AnalyzeError::DepthExceeded {
                limit: self.max_depth,
            });
        }
        Ok(Self { depth, ..self })
    }

    /// One level deeper inside a statement root of the given kind.
    pub(crate) fn enter(self, statement_type: StatementType) -> Result<Self, AnalyzeError> {
        Ok(Self {
            statement_type,
            ..self.descend()?
        })
    }

    /// One level deeper inside an independent subquery scope.
    pub(crate) fn subquery(self) -> Result<Self, AnalyzeError> {
        self.enter(StatementType::Unknown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_scope_keeps_only_ctes() {
        let mut scope = ScopeState::default();
        scope.add_table("users");
        scope.register_alias("u", "users");
        scope.push_column("u", "id", StatementType::Select);
        scope.ctes.insert(
            "recent".to_string(),
            vec![ColumnAccess::new("orders", "id", StatementType::Select)],
        );

        let nested = scope.nested();
        assert!(nested.tables.is_empty());
        assert!(nested.alias_to_table.is_empty());
        assert!(nested.columns.is_empty());
        assert!(nested.cte("recent").is_some());
    }

    #[test]
    fn add_table_if_absent_skips_duplicates() {
        let mut scope = ScopeState::default();
        scope.add_table("a");
        scope.add_table("a");
        scope.add_table_if_absent("a");
        scope.add_table_if_absent("b");
        assert_eq!(scope.tables, vec!["a", "a", "b"]);
    }

    #[test]
    fn frame_stops_at_max_depth() {
        let frame = Frame::root(2);
        let frame = frame.descend().unwrap();
        let frame = frame.enter(StatementType::Select).unwrap();
        assert_eq!(frame.depth, 2);
        assert_eq!(frame.statement_type, StatementType::Select);
        assert_eq!(
            frame.descend().unwrap_err(),
            AnalyzeError::DepthExceeded { limit: 2 }
        );
    }

    #[test]
    fn subquery_frame_resets_statement_type() {
        let frame = Frame::root(8).enter(StatementType::Delete).unwrap();
        assert_eq!(frame.subquery().unwrap().statement_type, StatementType::Unknown);
    }
}

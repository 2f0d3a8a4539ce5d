//! Response types: column access patterns and the combined analysis result.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of statement that performed a column access.
///
/// A scope's statement type is taken from the nearest enclosing statement root
/// (`SELECT`, `INSERT`, ...). It never crosses into a nested subquery, which
/// starts again from `Unknown`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
    Default,
)]
pub enum StatementType {
    Select,
    Update,
    Insert,
    Delete,
    Create,
    Drop,
    #[default]
    Unknown,
}

impl StatementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Select => "Select",
            Self::Update => "Update",
            Self::Insert => "Insert",
            Self::Delete => "Delete",
            Self::Create => "Create",
            Self::Drop => "Drop",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for StatementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One observed column reference: which table, which column, which statement kind.
///
/// A column of `"*"` denotes a star expansion over `table`. When a reference
/// could not be attributed to a single table, `table` holds the comma-joined
/// list of every table in scope (for example `"orders,users"`).
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
pub struct ColumnAccess {
    #[serde(rename = "table_name")]
    pub table: String,
    #[serde(rename = "column_name")]
    pub column: String,
    #[serde(rename = "query_type")]
    pub statement_type: StatementType,
}

impl ColumnAccess {
    pub fn new(
        table: impl Into<String>,
        column: impl Into<String>,
        statement_type: StatementType,
    ) -> Self {
        Self {
            table: table.into(),
            column: column.into(),
            statement_type,
        }
    }

    /// The `table:column:type` string that defines the output order.
    pub fn sort_key(&self) -> String {
        format!("{}:{}:{}", self.table, self.column, self.statement_type)
    }
}

/// Result of analyzing one statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AnalyzeResult {
    /// Deduplicated column accesses, sorted by [`ColumnAccess::sort_key`]
    pub column_access_patterns: Vec<ColumnAccess>,
    /// The statement with every literal replaced by `?`
    pub redacted_query: String,
}

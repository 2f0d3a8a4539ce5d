//! Request and option types for analysis and redaction.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::common::CaseSensitivity;

/// Nesting depth allowed when no explicit limit is configured.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// A request to analyze or redact one SQL statement.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    /// The SQL text; must hold exactly one statement
    pub sql: String,

    /// SQL dialect
    #[serde(default)]
    pub dialect: Dialect,

    /// Optional analysis options
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<AnalysisOptions>,
}

impl AnalyzeRequest {
    /// Builds a Generic-dialect request with default options.
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            dialect: Dialect::Generic,
            options: None,
        }
    }

    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    pub fn with_options(mut self, options: AnalysisOptions) -> Self {
        self.options = Some(options);
        self
    }

    /// The effective options, falling back to defaults.
    pub fn options(&self) -> AnalysisOptions {
        self.options.clone().unwrap_or_default()
    }
}

/// SQL dialect for parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[default]
    Generic,
    Ansi,
    Bigquery,
    Clickhouse,
    Databricks,
    Duckdb,
    Hive,
    Mssql,
    Mysql,
    Postgres,
    Redshift,
    Snowflake,
    Sqlite,
}

impl Dialect {
    pub fn to_sqlparser_dialect(&self) -> Box<dyn sqlparser::dialect::Dialect> {
        use sqlparser::dialect::{
            AnsiDialect, BigQueryDialect, ClickHouseDialect, DatabricksDialect, DuckDbDialect,
            GenericDialect, HiveDialect, MsSqlDialect, MySqlDialect, PostgreSqlDialect,
            RedshiftSqlDialect, SQLiteDialect, SnowflakeDialect,
        };
        match self {
            Self::Generic => Box::new(GenericDialect {}),
            Self::Ansi => Box::new(AnsiDialect {}),
            Self::Bigquery => Box::new(BigQueryDialect {}),
            Self::Clickhouse => Box::new(ClickHouseDialect {}),
            Self::Databricks => Box::new(DatabricksDialect {}),
            Self::Duckdb => Box::new(DuckDbDialect {}),
            Self::Hive => Box::new(HiveDialect {}),
            Self::Mssql => Box::new(MsSqlDialect {}),
            Self::Mysql => Box::new(MySqlDialect {}),
            Self::Postgres => Box::new(PostgreSqlDialect {}),
            Self::Redshift => Box::new(RedshiftSqlDialect {}),
            Self::Snowflake => Box::new(SnowflakeDialect {}),
            Self::Sqlite => Box::new(SQLiteDialect {}),
        }
    }
}

/// Options controlling analysis and redaction.
///
/// Every field is optional on the wire; the accessor methods supply defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisOptions {
    /// Folding applied to unquoted identifiers before alias matching (default 'exact')
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_sensitivity: Option<CaseSensitivity>,

    /// Maximum statement nesting depth before analysis aborts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,

    /// Collapse `IN (...)` lists made only of literals into one placeholder (default true)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collapse_in_lists: Option<bool>,
}

impl AnalysisOptions {
    pub fn case_sensitivity(&self) -> CaseSensitivity {
        self.case_sensitivity.unwrap_or_default()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth.unwrap_or(DEFAULT_MAX_DEPTH)
    }

    pub fn collapse_in_lists(&self) -> bool {
        self.collapse_in_lists.unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_request_serialization() {
        let request = AnalyzeRequest::new("SELECT * FROM users").with_dialect(Dialect::Postgres);
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"dialect\":\"postgres\""));
        assert!(!json.contains("options"));

        let deserialized: AnalyzeRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.dialect, Dialect::Postgres);
    }

    #[test]
    fn test_request_dialect_defaults_to_generic() {
        let request: AnalyzeRequest = serde_json::from_str(r#"{"sql":"select 1"}"#).unwrap();
        assert_eq!(request.dialect, Dialect::Generic);
        assert_eq!(request.options(), AnalysisOptions::default());
    }

    #[test]
    fn test_option_defaults() {
        let options = AnalysisOptions::default();
        assert_eq!(options.case_sensitivity(), CaseSensitivity::Exact);
        assert_eq!(options.max_depth(), DEFAULT_MAX_DEPTH);
        assert!(options.collapse_in_lists());
    }

    #[test]
    fn test_options_use_camel_case() {
        let options: AnalysisOptions = serde_json::from_str(
            r#"{"caseSensitivity":"lower","maxDepth":16,"collapseInLists":false}"#,
        )
        .unwrap();
        assert_eq!(options.case_sensitivity(), CaseSensitivity::Lower);
        assert_eq!(options.max_depth(), 16);
        assert!(!options.collapse_in_lists());
    }
}

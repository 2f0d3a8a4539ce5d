pub mod analyzer;
pub mod error;
pub mod parser;
pub mod redactor;
pub mod types;

// Re-export main types and functions
pub use analyzer::{analyze, analyze_sql, column_access_patterns};
pub use error::{AnalyzeError, ParseError, ParseErrorKind, Position};
pub use parser::{parse_single_statement, parse_sql, parse_sql_with_dialect};
pub use redactor::{
    normalize, redact, redact_sql, redact_statement, BindVariable, BindVariables,
    PLACEHOLDER_PREFIX,
};

pub use types::{
    // Request types
    AnalysisOptions,
    AnalyzeRequest,
    // Response types
    AnalyzeResult,
    CaseSensitivity,
    ColumnAccess,
    Dialect,
    StatementType,
    DEFAULT_MAX_DEPTH,
};

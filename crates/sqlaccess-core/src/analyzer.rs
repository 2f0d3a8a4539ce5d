use crate::error::AnalyzeError;
use crate::parser::parse_single_statement;
use crate::redactor::redact_statement;
use crate::types::*;
use sqlparser::ast::Statement;
#[cfg(feature = "tracing")]
use tracing::info_span;

mod children;
mod helpers;
mod resolution;
mod scope;
mod subquery;
mod walker;

use resolution::resolve_scope;
use scope::{Frame, ScopeState};

/// Main entry point: parses one statement, reports its column accesses and
/// redacts its literals.
pub fn analyze(request: &AnalyzeRequest) -> Result<AnalyzeResult, AnalyzeError> {
    #[cfg(feature = "tracing")]
    let _span = info_span!("analyze_request", dialect = ?request.dialect, len = request.sql.len())
        .entered();
    let options = request.options();
    let statement = parse_single_statement(&request.sql, request.dialect)?;
    let column_access_patterns = column_access_patterns(&statement, &options)?;
    let redacted_query = redact_statement(statement, &options)?;
    Ok(AnalyzeResult {
        column_access_patterns,
        redacted_query,
    })
}

/// [`analyze`] with the Generic dialect and default options.
pub fn analyze_sql(sql: &str) -> Result<AnalyzeResult, AnalyzeError> {
    analyze(&AnalyzeRequest::new(sql))
}

/// Column accesses of an already parsed statement, deduplicated and sorted.
pub fn column_access_patterns(
    statement: &Statement,
    options: &AnalysisOptions,
) -> Result<Vec<ColumnAccess>, AnalyzeError> {
    let analyzer = Analyzer::new(options);
    let mut scope = ScopeState::default();
    analyzer.walk_statement(statement, &mut scope, Frame::root(options.max_depth()))?;
    Ok(resolve_scope(scope))
}

/// Walk configuration shared by every scope of one statement.
pub(crate) struct Analyzer {
    pub(crate) case: CaseSensitivity,
}

impl Analyzer {
    fn new(options: &AnalysisOptions) -> Self {
        Self {
            case: options.case_sensitivity(),
        }
    }
}

#[cfg(test)]
mod tests;

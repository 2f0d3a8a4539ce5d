use crate::error::ParseError;
use crate::types::Dialect;
use sqlparser::ast::Statement;
use sqlparser::dialect::PostgreSqlDialect;
use sqlparser::parser::Parser;

/// Parse SQL using the specified dialect
pub fn parse_sql_with_dialect(sql: &str, dialect: Dialect) -> Result<Vec<Statement>, ParseError> {
    let sqlparser_dialect = dialect.to_sqlparser_dialect();
    match Parser::parse_sql(sqlparser_dialect.as_ref(), sql) {
        Ok(statements) => Ok(statements),
        Err(primary_err) => {
            // Generic rejects Postgres-only operators (`::`, `->>`, `?`) that
            // show up constantly in application queries.
            if matches!(dialect, Dialect::Generic) && looks_like_postgres_syntax(sql) {
                let postgres = PostgreSqlDialect {};
                if let Ok(statements) = Parser::parse_sql(&postgres, sql) {
                    return Ok(statements);
                }
            }
            Err(ParseError::from(primary_err).with_dialect(dialect))
        }
    }
}

fn looks_like_postgres_syntax(sql: &str) -> bool {
    sql.contains("::")
        || sql.contains("->")
        || sql.contains("?|")
        || sql.contains("?&")
        || sql.contains(" ? ")
        || sql.contains(" ?\n")
        || sql.contains("? '")
}

/// Parse SQL that must hold exactly one statement.
///
/// Empty input and multi-statement batches are rejected with
/// [`crate::error::ParseErrorKind::StatementCount`].
pub fn parse_single_statement(sql: &str, dialect: Dialect) -> Result<Statement, ParseError> {
    let mut statements = parse_sql_with_dialect(sql, dialect)?;
    if statements.len() != 1 {
        return Err(ParseError::statement_count(statements.len()).with_dialect(dialect));
    }
    match statements.pop() {
        Some(statement) => Ok(statement),
        None => Err(ParseError::statement_count(0).with_dialect(dialect)),
    }
}

/// Parse SQL using the generic dialect
pub fn parse_sql(sql: &str) -> Result<Vec<Statement>, ParseError> {
    parse_sql_with_dialect(sql, Dialect::Generic)
}

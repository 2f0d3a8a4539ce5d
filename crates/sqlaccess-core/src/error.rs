//! Error types for parsing, analysis and redaction.
//!
//! Every public operation returns `Result<_, AnalyzeError>` and never yields a
//! partial result. A [`ParseError`] means the input is not a single valid
//! statement and is raised before any walk begins. [`AnalyzeError::DepthExceeded`]
//! is raised by both the column walker and the literal normalizer.
//!
//! Structural surprises inside the walk are asserted in debug builds rather
//! than reported to callers.

use crate::types::Dialect;
use regex::Regex;
use sqlparser::parser::ParserError;
use std::fmt;
use std::sync::OnceLock;
#[cfg(feature = "tracing")]
use tracing::trace;

/// Error returned by [`crate::analyze`], [`crate::redact`] and friends.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalyzeError {
    /// The input could not be parsed into exactly one statement.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Statement nesting exceeded the configured limit.
    #[error("statement nesting exceeds the maximum depth of {limit}")]
    DepthExceeded { limit: usize },
}

impl AnalyzeError {
    pub fn as_parse_error(&self) -> Option<&ParseError> {
        match self {
            Self::Parse(err) => Some(err),
            Self::DepthExceeded { .. } => None,
        }
    }
}

/// The input is not exactly one statement the chosen dialect accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    /// Where sqlparser stopped, when its message says so.
    pub position: Option<Position>,
    pub dialect: Option<Dialect>,
    pub kind: ParseErrorKind,
}

/// 1-indexed line and column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseErrorKind {
    #[default]
    SyntaxError,
    /// A required keyword or clause is missing.
    MissingClause,
    UnexpectedEof,
    UnsupportedFeature,
    /// The tokenizer rejected the input, or nesting hit sqlparser's own limit.
    LexerError,
    /// Zero or several statements where exactly one is required.
    StatementCount,
}

impl ParseError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            position: None,
            dialect: None,
            kind: ParseErrorKind::default(),
        }
    }

    pub fn with_position(message: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            position: Some(Position { line, column }),
            ..Self::new(message)
        }
    }

    pub fn statement_count(found: usize) -> Self {
        Self::new(format!("expected exactly one statement, found {found}"))
            .with_kind(ParseErrorKind::StatementCount)
    }

    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = Some(dialect);
        self
    }

    pub fn with_kind(mut self, kind: ParseErrorKind) -> Self {
        self.kind = kind;
        self
    }
}

/// Extracts `Line: X, Column: Y` from a sqlparser message.
fn position_in(message: &str) -> Option<Position> {
    static LOCATION: OnceLock<Regex> = OnceLock::new();
    let re = LOCATION.get_or_init(|| {
        Regex::new(r"Line:\s*(\d+)\s*,\s*Column:\s*(\d+)").expect("Invalid regex pattern")
    });

    let position = re.captures(message).and_then(|caps| {
        Some(Position {
            line: caps[1].parse().ok()?,
            column: caps[2].parse().ok()?,
        })
    });

    #[cfg(feature = "tracing")]
    if position.is_none() && message.contains("Line") {
        trace!(error = message, "parse error carries no readable location");
    }

    position
}

/// Classifies a parser (not tokenizer) message.
fn kind_of(message: &str) -> ParseErrorKind {
    let lower = message.to_lowercase();
    if lower.contains("found: eof") || lower.contains("unexpected end") {
        ParseErrorKind::UnexpectedEof
    } else if lower.contains("not supported") || lower.contains("unsupported") {
        ParseErrorKind::UnsupportedFeature
    } else if lower.starts_with("expected") || lower.contains(": expected") {
        ParseErrorKind::MissingClause
    } else {
        ParseErrorKind::SyntaxError
    }
}

impl From<ParserError> for ParseError {
    fn from(err: ParserError) -> Self {
        let kind = match &err {
            ParserError::TokenizerError(_) | ParserError::RecursionLimitExceeded => {
                ParseErrorKind::LexerError
            }
            ParserError::ParserError(message) => kind_of(message),
        };
        let message = err.to_string();
        let error = match position_in(&message) {
            Some(Position { line, column }) => Self::with_position(message, line, column),
            None => Self::new(message),
        };
        error.with_kind(kind)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Parse error")?;
        if let Some(dialect) = self.dialect {
            write!(f, " ({dialect:?})")?;
        }
        if let Some(Position { line, column }) = self.position {
            write!(f, " at line {line}, column {column}")?;
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for ParseError {}

//! Literal redaction.
//!
//! [`normalize`] rewrites every literal value of a statement into a numbered
//! placeholder (`?1`, `?2`, ...) and returns the values it removed. The
//! redacted text is the statement rendered after that numbering is collapsed
//! back to a bare `?`, so structurally identical statements always redact to
//! identical strings.

use crate::error::AnalyzeError;
use crate::parser::parse_single_statement;
use crate::types::{AnalysisOptions, AnalyzeRequest};
use regex::Regex;
use sqlparser::ast::{Expr, Statement, UnaryOperator, Value, VisitMut, VisitorMut};
use std::ops::ControlFlow;
use std::sync::OnceLock;
#[cfg(feature = "tracing")]
use tracing::info_span;

/// Prefix of every placeholder written by the normalizer.
pub const PLACEHOLDER_PREFIX: &str = "?";

/// A literal lifted out of a statement by [`normalize`].
#[derive(Debug, Clone, PartialEq)]
pub struct BindVariable {
    /// Placeholder text that replaced the literal, e.g. `?1`.
    pub name: String,
    /// The literal as parsed.
    pub value: Value,
}

/// Bind variables in placeholder order.
pub type BindVariables = Vec<BindVariable>;

/// Redacts the single statement in `request.sql`.
pub fn redact(request: &AnalyzeRequest) -> Result<String, AnalyzeError> {
    #[cfg(feature = "tracing")]
    let _span = info_span!("redact_request", dialect = ?request.dialect, len = request.sql.len())
        .entered();
    let statement = parse_single_statement(&request.sql, request.dialect)?;
    redact_statement(statement, &request.options())
}

/// [`redact`] with the Generic dialect and default options.
pub fn redact_sql(sql: &str) -> Result<String, AnalyzeError> {
    redact(&AnalyzeRequest::new(sql))
}

/// Normalizes `statement`, collapses placeholder numbering, and renders it.
pub fn redact_statement(
    mut statement: Statement,
    options: &AnalysisOptions,
) -> Result<String, AnalyzeError> {
    normalize(&mut statement, options)?;
    let _ = statement.visit(&mut PlaceholderCollapser);
    Ok(statement.to_string())
}

/// Replaces every literal in `statement` with a numbered placeholder.
///
/// Numbers (a leading sign included), every string literal form and typed
/// literals such as `DATE '2020-01-01'` are literals. `NULL`, booleans and
/// existing placeholders are not. Equal values share one placeholder. With
/// `collapse_in_lists` enabled, an `IN (...)` list made only of literals is
/// first cut down to its first item.
pub fn normalize(
    statement: &mut Statement,
    options: &AnalysisOptions,
) -> Result<BindVariables, AnalyzeError> {
    let mut normalizer = LiteralNormalizer {
        bind_variables: Vec::new(),
        collapse_in_lists: options.collapse_in_lists(),
        depth: 0,
        max_depth: options.max_depth(),
        last_bound: None,
    };
    match statement.visit(&mut normalizer) {
        ControlFlow::Continue(()) => Ok(normalizer.bind_variables),
        ControlFlow::Break(err) => Err(err),
    }
}

fn is_numbered_placeholder(name: &str) -> bool {
    static NUMBERED_PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    NUMBERED_PLACEHOLDER
        .get_or_init(|| Regex::new(r"^\?\d+$").expect("Invalid regex pattern"))
        .is_match(name)
}

/// Turns `?N` placeholders into a bare `?`. Identifiers and string contents
/// are never touched.
struct PlaceholderCollapser;

impl VisitorMut for PlaceholderCollapser {
    type Break = ();

    fn pre_visit_value(&mut self, value: &mut Value) -> ControlFlow<()> {
        if let Value::Placeholder(name) = value {
            if is_numbered_placeholder(name) {
                *name = PLACEHOLDER_PREFIX.to_string();
            }
        }
        ControlFlow::Continue(())
    }
}

struct LiteralNormalizer {
    bind_variables: BindVariables,
    collapse_in_lists: bool,
    depth: usize,
    max_depth: usize,
    /// Placeholder most recently written, read back when a typed literal closes.
    last_bound: Option<String>,
}

impl LiteralNormalizer {
    fn bind(&mut self, value: &Value) -> String {
        if let Some(existing) = self.bind_variables.iter().find(|bv| bv.value == *value) {
            return existing.name.clone();
        }
        let name = format!("{PLACEHOLDER_PREFIX}{}", self.bind_variables.len() + 1);
        self.bind_variables.push(BindVariable {
            name: name.clone(),
            value: value.clone(),
        });
        name
    }
}

impl VisitorMut for LiteralNormalizer {
    type Break = AnalyzeError;

    fn pre_visit_expr(&mut self, expr: &mut Expr) -> ControlFlow<Self::Break> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return ControlFlow::Break(AnalyzeError::DepthExceeded {
                limit: self.max_depth,
            });
        }

        match expr {
            Expr::InList { list, .. }
                if self.collapse_in_lists && list.len() > 1 && list.iter().all(is_literal) =>
            {
                list.truncate(1);
            }
            Expr::TypedString { .. } => self.last_bound = None,
            _ => {
                if let Some(number) = signed_number(expr) {
                    *expr = Expr::value(number);
                }
            }
        }
        ControlFlow::Continue(())
    }

    fn post_visit_expr(&mut self, expr: &mut Expr) -> ControlFlow<Self::Break> {
        self.depth -= 1;
        // `DATE ?` does not parse, so the whole typed literal becomes the placeholder.
        if matches!(expr, Expr::TypedString { .. }) {
            if let Some(name) = self.last_bound.take() {
                *expr = Expr::value(Value::Placeholder(name));
            }
        }
        ControlFlow::Continue(())
    }

    fn pre_visit_value(&mut self, value: &mut Value) -> ControlFlow<Self::Break> {
        if is_redactable(value) {
            let name = self.bind(value);
            *value = Value::Placeholder(name.clone());
            self.last_bound = Some(name);
        }
        ControlFlow::Continue(())
    }
}

fn is_redactable(value: &Value) -> bool {
    !matches!(
        value,
        Value::Null | Value::Boolean(_) | Value::Placeholder(_)
    )
}

/// `-5` and `+5` parse as a unary operator over a number; fold the sign into
/// the literal so it is bound with it.
fn signed_number(expr: &Expr) -> Option<Value> {
    let Expr::UnaryOp { op, expr: operand } = expr else {
        return None;
    };
    let sign = match op {
        UnaryOperator::Minus => "-",
        UnaryOperator::Plus => "",
        _ => return None,
    };
    match operand.as_ref() {
        Expr::Value(literal) => match &literal.value {
            Value::Number(digits, long) => Some(Value::Number(format!("{sign}{digits}"), *long)),
            _ => None,
        },
        _ => None,
    }
}

fn is_literal(expr: &Expr) -> bool {
    match expr {
        Expr::Value(literal) => is_redactable(&literal.value),
        Expr::TypedString { .. } => true,
        _ => signed_number(expr).is_some(),
    }
}

//! Types for the column access and redaction API.
//!
//! Requests carry the SQL text, its dialect and optional tuning; responses
//! carry the resolved column accesses and the redacted statement text.

mod common;
mod request;
mod response;

pub use common::CaseSensitivity;
pub use request::{AnalysisOptions, AnalyzeRequest, Dialect, DEFAULT_MAX_DEPTH};
pub use response::{AnalyzeResult, ColumnAccess, StatementType};

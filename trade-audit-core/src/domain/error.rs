// trade-audit-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic, PartialEq)]
pub enum DomainError {
    #[error("Column '{column}' missing from {check} result")]
    #[diagnostic(
        code(trade_audit::domain::missing_column),
        help("The query result no longer matches the expected shape.")
    )]
    MissingColumn { check: String, column: String },

    #[error("Column '{column}' in {check} result: expected {expected}, found {found}")]
    #[diagnostic(code(trade_audit::domain::unexpected_type))]
    UnexpectedType {
        check: String,
        column: String,
        expected: &'static str,
        found: String,
    },

    #[error("{check} result returned no rows")]
    #[diagnostic(code(trade_audit::domain::empty_result))]
    EmptyResult { check: String },

    #[error("Unexpected value in {check} result: {detail}")]
    #[diagnostic(code(trade_audit::domain::unexpected_value))]
    UnexpectedValue { check: String, detail: String },
}

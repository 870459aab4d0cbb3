// trade-audit-core/src/error.rs

use crate::domain::error::DomainError;
use crate::domain::findings::CheckKind;
use crate::infrastructure::error::InfrastructureError;
use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum AuditError {
    // --- DOMAIN ERRORS (result shapes, unexpected values) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Domain(#[from] DomainError),

    // --- INFRASTRUCTURE ERRORS (database, config, IO) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Infrastructure(#[from] InfrastructureError),

    // --- CHECK FAILURES ---
    #[error("{check} check failed: {source}")]
    #[diagnostic(code(trade_audit::check))]
    Check {
        check: CheckKind,
        #[source]
        source: Box<AuditError>,
    },

    #[error("Internal Error: {0}")]
    InternalError(String),
}

impl AuditError {
    /// Attaches the failing check to an error raised while running it.
    pub fn in_check(self, check: CheckKind) -> Self {
        match self {
            already @ AuditError::Check { .. } => already,
            other => AuditError::Check {
                check,
                source: Box::new(other),
            },
        }
    }

    pub fn is_connection_failure(&self) -> bool {
        matches!(
            self,
            AuditError::Infrastructure(InfrastructureError::Connection(_))
        )
    }
}

impl From<std::io::Error> for AuditError {
    fn from(err: std::io::Error) -> Self {
        AuditError::Infrastructure(InfrastructureError::Io(err))
    }
}

impl From<duckdb::Error> for AuditError {
    fn from(err: duckdb::Error) -> Self {
        AuditError::Infrastructure(InfrastructureError::from(err))
    }
}

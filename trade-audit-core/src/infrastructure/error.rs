// trade-audit-core/src/infrastructure/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DatabaseError {
    #[error("DuckDB Engine Error: {0}")]
    #[diagnostic(
        code(trade_audit::infra::database::duckdb),
        help("An error occurred inside the SQL engine.")
    )]
    DuckDB(#[from] duckdb::Error),

    #[error("Database connection lock poisoned")]
    #[diagnostic(code(trade_audit::infra::database::poisoned))]
    Poisoned,
}

#[derive(Error, Debug, Diagnostic)]
pub enum InfrastructureError {
    // --- DATABASE (Abstracted) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Database(#[from] DatabaseError),

    #[error("{0}")]
    #[diagnostic(
        code(trade_audit::infra::connection),
        help("Check host, port, database name and credentials (PGHOST, PGPORT, PGDATABASE, PGUSER, PGPASSWORD).")
    )]
    Connection(String),

    // --- FILESYSTEM (IO) ---
    #[error("File System Error: {0}")]
    #[diagnostic(
        code(trade_audit::infra::io),
        help("Check file permissions or path validity.")
    )]
    Io(#[from] std::io::Error),

    // --- CONFIG / YAML ---
    #[error("YAML Parsing Error: {0}")]
    #[diagnostic(
        code(trade_audit::infra::yaml),
        help("Check your YAML syntax (indentation, types).")
    )]
    YamlError(#[from] serde_yaml::Error),

    #[error("Configuration Error: {0}")]
    #[diagnostic(code(trade_audit::infra::config))]
    ConfigError(String),

    #[error("Invalid connection settings: {0}")]
    #[diagnostic(code(trade_audit::infra::config_invalid))]
    Validation(#[from] validator::ValidationErrors),

    #[error("Configuration file not found at '{0}'")]
    #[diagnostic(code(trade_audit::infra::config_missing))]
    ConfigNotFound(String),
}

// Shortcut for `?` on duckdb calls
impl From<duckdb::Error> for InfrastructureError {
    fn from(err: duckdb::Error) -> Self {
        InfrastructureError::Database(DatabaseError::DuckDB(err))
    }
}

// Context-wrapped loader errors (anyhow) collapse into a config error
impl From<anyhow::Error> for InfrastructureError {
    fn from(err: anyhow::Error) -> Self {
        InfrastructureError::ConfigError(format!("{:#}", err))
    }
}

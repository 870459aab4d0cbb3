// trade-audit/src/commands/audit.rs
//
// USE CASE: run every check and print the report.

use std::path::PathBuf;

use tracing::{debug, info};
use trade_audit_core::application::{AuditOutcome, run_audit};
use trade_audit_core::infrastructure::adapters::DuckDBProvider;
use trade_audit_core::infrastructure::config::{AuditConfig, load_audit_config};
use trade_audit_core::infrastructure::error::InfrastructureError;
use trade_audit_core::ports::ConnectionProvider;

use crate::cli::ConnectionArgs;

fn resolve_config(
    config_path: Option<PathBuf>,
    connection: ConnectionArgs,
) -> Result<AuditConfig, InfrastructureError> {
    let cwd = std::env::current_dir()?;
    load_audit_config(config_path.as_deref(), &cwd)?
        .with_overrides(connection.into())
        .validated()
}

/// Exits non-zero only when the configuration itself is unusable. A connection or
/// check failure is a finished run: it is reported on stdout and the process exits 0.
pub async fn execute(config_path: Option<PathBuf>, connection: ConnectionArgs) -> anyhow::Result<()> {
    let config = match resolve_config(config_path, connection) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{:?}", miette::Report::new(e));
            std::process::exit(2);
        }
    };

    let provider = DuckDBProvider::new(config.connection.clone());
    info!(target = %provider.describe(), policy = ?config.on_check_failure, "Starting data quality audit");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let outcome = run_audit(&provider, config.on_check_failure, &mut out).await;

    match outcome {
        AuditOutcome::ConnectionFailed(_) => debug!("Run aborted before any check"),
        AuditOutcome::Aborted { findings, .. } => {
            debug!(completed = findings.len(), "Run aborted after a check failure")
        }
        AuditOutcome::Completed { report, failures, .. } => debug!(
            issues = report.issue_count(),
            failed_checks = failures.len(),
            "Run completed"
        ),
    }

    Ok(())
}

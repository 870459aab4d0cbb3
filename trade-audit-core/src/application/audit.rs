// trade-audit-core/src/application/audit.rs
//
// USE CASE: run every check against one connection, print the findings and the
// summary, then release the connection.

use std::io::Write;
use std::time::Instant;
use tracing::{error, info, warn};

use crate::application::checks;
use crate::domain::findings::{CheckKind, Findings};
use crate::domain::report::SummaryReport;
use crate::error::AuditError;
use crate::infrastructure::config::FailurePolicy;
use crate::ports::connector::{ConnectionProvider, Connector};

#[derive(Debug)]
pub enum AuditOutcome {
    /// No connection, so no check ran.
    ConnectionFailed(AuditError),
    /// A check (or printing) failed under `FailurePolicy::Abort`.
    Aborted { findings: Findings, error: AuditError },
    /// Every check was attempted and the summary was printed.
    Completed {
        findings: Findings,
        report: SummaryReport,
        failures: Vec<AuditError>,
    },
}

impl AuditOutcome {
    pub fn findings(&self) -> Option<&Findings> {
        match self {
            AuditOutcome::ConnectionFailed(_) => None,
            AuditOutcome::Aborted { findings, .. } | AuditOutcome::Completed { findings, .. } => {
                Some(findings)
            }
        }
    }
}

/// Runs the whole audit. Never fails: errors are printed to `out`, logged, and
/// returned inside the outcome. The connection is released exactly once
/// whenever it was acquired.
pub async fn run_audit<W: Write>(
    provider: &dyn ConnectionProvider,
    policy: FailurePolicy,
    out: &mut W,
) -> AuditOutcome {
    let start = Instant::now();

    let connector = match provider.acquire().await {
        Ok(c) => c,
        Err(e) => {
            error!(target = %provider.describe(), "Connection failed: {}", e);
            emit(out, &format!("Error connecting to database: {}", e));
            return AuditOutcome::ConnectionFailed(e);
        }
    };

    let mut findings = Findings::new();
    let mut failures = Vec::new();

    let result = run_checks(connector.as_ref(), policy, out, &mut findings, &mut failures)
        .await
        .and_then(|()| {
            let report = SummaryReport::derive(&findings);
            write!(out, "{}", report)?;
            Ok(report)
        });

    let outcome = match result {
        Ok(report) => {
            info!(
                checks = findings.len(),
                issues = report.issue_count(),
                failed = failures.len(),
                "✨ Audit finished in {:.2?}",
                start.elapsed()
            );
            AuditOutcome::Completed {
                findings,
                report,
                failures,
            }
        }
        Err(e) => {
            error!("Audit aborted: {}", e);
            emit(out, &format!("Error during data quality check: {}", e));
            AuditOutcome::Aborted { findings, error: e }
        }
    };

    release(connector);
    outcome
}

async fn run_checks<W: Write>(
    connector: &dyn Connector,
    policy: FailurePolicy,
    out: &mut W,
    findings: &mut Findings,
    failures: &mut Vec<AuditError>,
) -> Result<(), AuditError> {
    for kind in CheckKind::ALL {
        match checks::run_check(kind, connector).await {
            Ok(output) => {
                write!(out, "{}", output)?;
                findings.insert(output.finding);
            }
            Err(e) => {
                let e = e.in_check(kind);
                match policy {
                    FailurePolicy::Abort => return Err(e),
                    FailurePolicy::Continue => {
                        warn!(check = %kind, "Check failed, continuing: {}", e);
                        writeln!(out, "\n=== {} ===", checks::title(kind))?;
                        writeln!(out, "Error during data quality check: {}", e)?;
                        failures.push(e);
                    }
                }
            }
        }
    }
    Ok(())
}

fn release(connector: Box<dyn Connector>) {
    match connector.close() {
        Ok(()) => info!("Database connection closed"),
        Err(e) => warn!("Failed to close database connection: {}", e),
    }
}

fn emit<W: Write>(out: &mut W, message: &str) {
    if let Err(e) = writeln!(out, "{}", message) {
        warn!("Could not write to output: {}", e);
    }
}

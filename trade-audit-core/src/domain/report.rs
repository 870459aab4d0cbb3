// trade-audit-core/src/domain/report.rs

// Summary rules applied over the findings. Only numerical and integrity results
// produce issues; the other checks are informational.

use std::fmt;

use crate::domain::findings::Findings;

/// `digits = 0` is a valid instrument precision, not an anomaly.
const ZERO_ALLOWED_FIELD: &str = "digits";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue(String);

impl Issue {
    fn new(message: String) -> Self {
        Self(message)
    }

    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryReport {
    pub numerical: Vec<Issue>,
    pub integrity: Vec<Issue>,
}

impl SummaryReport {
    pub fn derive(findings: &Findings) -> Self {
        let mut numerical = Vec::new();
        if let Some(summary) = findings.numerical() {
            for row in &summary.rows {
                if row.negative_count > 0 {
                    numerical.push(Issue::new(format!(
                        "Found {} negative values in {}",
                        row.negative_count, row.field
                    )));
                }
                if row.zero_count > 0 && row.field != ZERO_ALLOWED_FIELD {
                    numerical.push(Issue::new(format!(
                        "Found {} zero values in {}",
                        row.zero_count, row.field
                    )));
                }
            }
        }

        let mut integrity = Vec::new();
        if let Some(summary) = findings.integrity() {
            if summary.orphaned_trades > 0 {
                integrity.push(Issue::new(format!(
                    "Found {} trades without matching users",
                    summary.orphaned_trades
                )));
            }
        }

        Self {
            numerical,
            integrity,
        }
    }

    pub fn issue_count(&self) -> usize {
        self.numerical.len() + self.integrity.len()
    }

    pub fn is_clean(&self) -> bool {
        self.issue_count() == 0
    }
}

impl fmt::Display for SummaryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\n=== SUMMARY REPORT ===")?;
        writeln!(f, "\nPotential Data Quality Issues:")?;

        for (title, issues) in [
            ("Numerical Issues", &self.numerical),
            ("Integrity Issues", &self.integrity),
        ] {
            if issues.is_empty() {
                continue;
            }
            writeln!(f, "\n{}:", title)?;
            for issue in issues {
                writeln!(f, "- {}", issue)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::findings::Finding;
    use crate::domain::quality::{
        IntegrityStatus, IntegritySummary, NumericalRow, NumericalSummary,
    };

    fn row(field: &str, negative: i64, zero: i64) -> NumericalRow {
        NumericalRow {
            field: field.into(),
            min_value: Some(0.0),
            max_value: Some(1.0),
            avg_value: Some(0.5),
            negative_count: negative,
            zero_count: zero,
        }
    }

    fn integrity(orphaned: i64) -> Finding {
        Finding::Integrity(IntegritySummary {
            total_trades: 20,
            distinct_trade_logins: 5,
            distinct_user_logins: 4,
            orphaned_trades: orphaned,
            null_server_hash: 0,
            null_ticket_hash: 0,
            integrity_status: IntegrityStatus::from_orphaned(orphaned),
        })
    }

    fn messages(issues: &[Issue]) -> Vec<&str> {
        issues.iter().map(Issue::message).collect()
    }

    #[test]
    fn test_numerical_scenario_suppresses_zero_digits() {
        let mut findings = Findings::new();
        findings.insert(Finding::Numerical(NumericalSummary {
            rows: vec![
                row("volume", 3, 0),
                row("digits", 0, 10),
                row("contractsize", 0, 2),
            ],
        }));

        let report = SummaryReport::derive(&findings);
        assert_eq!(
            messages(&report.numerical),
            vec![
                "Found 3 negative values in volume",
                "Found 2 zero values in contractsize"
            ]
        );
        assert!(report.integrity.is_empty());
    }

    #[test]
    fn test_negative_counts_always_reported() {
        let mut findings = Findings::new();
        findings.insert(Finding::Numerical(NumericalSummary {
            rows: vec![row("digits", 4, 0), row("volume", 0, 1)],
        }));

        let report = SummaryReport::derive(&findings);
        assert_eq!(
            messages(&report.numerical),
            vec!["Found 4 negative values in digits", "Found 1 zero values in volume"]
        );
    }

    #[test]
    fn test_orphaned_trades() {
        let mut clean = Findings::new();
        clean.insert(integrity(0));
        let report = SummaryReport::derive(&clean);
        assert!(report.is_clean());
        assert!(!report.to_string().contains("Integrity Issues"));

        let mut dirty = Findings::new();
        dirty.insert(integrity(5));
        let report = SummaryReport::derive(&dirty);
        assert_eq!(report.integrity.len(), 1);
        assert!(report.integrity[0].message().contains('5'));
    }

    #[test]
    fn test_missing_checks_produce_nothing() {
        let report = SummaryReport::derive(&Findings::new());
        assert!(report.is_clean());

        let rendered = report.to_string();
        assert!(rendered.contains("=== SUMMARY REPORT ==="));
        assert!(!rendered.contains("Numerical Issues"));
    }

    #[test]
    fn test_rendering_lists_issues() {
        let mut findings = Findings::new();
        findings.insert(Finding::Numerical(NumericalSummary {
            rows: vec![row("volume", 1, 0)],
        }));
        findings.insert(integrity(2));

        let rendered = SummaryReport::derive(&findings).to_string();
        assert!(rendered.contains("\nNumerical Issues:\n- Found 1 negative values in volume\n"));
        assert!(rendered.contains("\nIntegrity Issues:\n- Found 2 trades without matching users\n"));
    }
}

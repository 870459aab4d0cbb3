// trade-audit-core/src/domain/quality/integrity.rs

use std::fmt;

use super::render_table;
use crate::domain::error::DomainError;
use crate::domain::table::TabularResult;

const CHECK: &str = "integrity";

pub const STATUS_WARNING: &str = "Warning: Found trades without matching users";
pub const STATUS_OK: &str = "OK: All trades have matching users";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegrityStatus {
    Ok,
    Warning,
}

impl IntegrityStatus {
    pub fn from_orphaned(orphaned_trades: i64) -> Self {
        if orphaned_trades > 0 {
            IntegrityStatus::Warning
        } else {
            IntegrityStatus::Ok
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            IntegrityStatus::Ok => STATUS_OK,
            IntegrityStatus::Warning => STATUS_WARNING,
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            STATUS_OK => Some(IntegrityStatus::Ok),
            STATUS_WARNING => Some(IntegrityStatus::Warning),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IntegritySummary {
    pub total_trades: i64,
    pub distinct_trade_logins: i64,
    pub distinct_user_logins: i64,
    pub orphaned_trades: i64,
    pub null_server_hash: i64,
    pub null_ticket_hash: i64,
    pub integrity_status: IntegrityStatus,
}

impl IntegritySummary {
    /// The status label is derived by the query; it must agree with the orphan count.
    pub fn from_table(table: &TabularResult) -> Result<Self, DomainError> {
        let row = table.first_row(CHECK)?;
        let orphaned_trades = row.int("orphaned_trades")?;

        let label = row.text("integrity_status")?;
        let integrity_status =
            IntegrityStatus::from_label(&label).ok_or_else(|| DomainError::UnexpectedValue {
                check: CHECK.to_string(),
                detail: format!("unknown integrity_status '{}'", label),
            })?;
        if integrity_status != IntegrityStatus::from_orphaned(orphaned_trades) {
            return Err(DomainError::UnexpectedValue {
                check: CHECK.to_string(),
                detail: format!(
                    "integrity_status '{}' disagrees with {} orphaned trades",
                    label, orphaned_trades
                ),
            });
        }

        Ok(Self {
            total_trades: row.int("total_trades")?,
            distinct_trade_logins: row.int("distinct_trade_logins")?,
            distinct_user_logins: row.int("distinct_user_logins")?,
            orphaned_trades,
            null_server_hash: row.int("null_server_hash")?,
            null_ticket_hash: row.int("null_ticket_hash")?,
            integrity_status,
        })
    }
}

impl fmt::Display for IntegritySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let table = render_table(
            &[
                "total_trades",
                "distinct_trade_logins",
                "distinct_user_logins",
                "orphaned_trades",
                "null_server_hash",
                "null_ticket_hash",
                "integrity_status",
            ],
            [vec![
                self.total_trades.to_string(),
                self.distinct_trade_logins.to_string(),
                self.distinct_user_logins.to_string(),
                self.orphaned_trades.to_string(),
                self.null_server_hash.to_string(),
                self.null_ticket_hash.to_string(),
                self.integrity_status.label().to_string(),
            ]],
        );
        write!(f, "{}", table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::table::Cell;
    use anyhow::Result;

    fn table(orphaned: i64, label: &str) -> TabularResult {
        TabularResult::new(
            [
                "total_trades",
                "distinct_trade_logins",
                "distinct_user_logins",
                "orphaned_trades",
                "null_server_hash",
                "null_ticket_hash",
                "integrity_status",
            ]
            .iter()
            .map(|c| c.to_string())
            .collect(),
            vec![vec![
                Cell::Int(10),
                Cell::Int(4),
                Cell::Int(3),
                Cell::Int(orphaned),
                Cell::Int(0),
                Cell::Int(1),
                Cell::Text(label.into()),
            ]],
        )
    }

    #[test]
    fn test_status_from_orphan_count() {
        assert_eq!(IntegrityStatus::from_orphaned(0), IntegrityStatus::Ok);
        assert_eq!(IntegrityStatus::from_orphaned(5), IntegrityStatus::Warning);
        assert_eq!(
            IntegrityStatus::Warning.label(),
            "Warning: Found trades without matching users"
        );
        assert_eq!(
            IntegrityStatus::Ok.label(),
            "OK: All trades have matching users"
        );
    }

    #[test]
    fn test_from_table() -> Result<()> {
        let summary = IntegritySummary::from_table(&table(2, STATUS_WARNING))?;
        assert_eq!(summary.orphaned_trades, 2);
        assert_eq!(summary.integrity_status, IntegrityStatus::Warning);
        assert_eq!(summary.null_ticket_hash, 1);
        assert!(summary.to_string().contains(STATUS_WARNING));
        Ok(())
    }

    #[test]
    fn test_unknown_label_rejected() {
        assert!(matches!(
            IntegritySummary::from_table(&table(0, "maybe")),
            Err(DomainError::UnexpectedValue { .. })
        ));
    }

    #[test]
    fn test_label_must_match_orphans() {
        assert!(IntegritySummary::from_table(&table(3, STATUS_OK)).is_err());
    }
}

// trade-audit-core/src/application/checks.rs
//
// USE CASE: the five data-quality checks. Each one issues fixed statements,
// turns the rows into its typed record and renders the console section.

use std::fmt;

use crate::application::engine::fetch_table;
use crate::domain::findings::{CheckKind, Finding};
use crate::domain::quality::{
    BusinessCheckOutput, CategoricalValues, DateSummary, IntegritySummary, NumericalSummary,
};
use crate::error::AuditError;
use crate::ports::connector::Connector;

// --- FIXED STATEMENTS ---

pub const STRING_VALUES_SQL: &str = "
    SELECT DISTINCT
        t.symbol,
        t.currency,
        u.country_hash
    FROM trades t
    LEFT JOIN users u ON t.login_hash = u.login_hash
    ORDER BY t.symbol, t.currency, u.country_hash";

pub const NUMERICAL_SQL: &str = "
    SELECT
        'volume' AS field,
        MIN(volume) AS min_value,
        MAX(volume) AS max_value,
        AVG(volume) AS avg_value,
        COUNT(*) FILTER (WHERE volume < 0) AS negative_count,
        COUNT(*) FILTER (WHERE volume = 0) AS zero_count
    FROM trades

    UNION ALL

    SELECT
        'digits' AS field,
        MIN(digits) AS min_value,
        MAX(digits) AS max_value,
        AVG(digits) AS avg_value,
        COUNT(*) FILTER (WHERE digits < 0) AS negative_count,
        COUNT(*) FILTER (WHERE digits = 0) AS zero_count
    FROM trades

    UNION ALL

    SELECT
        'contractsize' AS field,
        MIN(contractsize) AS min_value,
        MAX(contractsize) AS max_value,
        AVG(contractsize) AS avg_value,
        COUNT(*) FILTER (WHERE contractsize < 0) AS negative_count,
        COUNT(*) FILTER (WHERE contractsize = 0) AS zero_count
    FROM trades";

// `close_time` at the epoch marks an open position (OPEN_POSITION_SENTINEL).
// Such rows are also inversions whenever the trade opened after 1970.
pub const DATES_SQL: &str = "
    SELECT
        MIN(open_time) AS min_open_time,
        MAX(open_time) AS max_open_time,
        MIN(close_time) AS min_close_time,
        MAX(close_time) AS max_close_time,
        COUNT(*) FILTER (WHERE close_time < open_time) AS invalid_time_order,
        COUNT(*) FILTER (WHERE close_time = TIMESTAMP '1970-01-01 00:00:00') AS open_trades,
        COUNT(*) FILTER (WHERE open_time IS NULL) AS null_open_times,
        COUNT(*) FILTER (WHERE close_time IS NULL) AS null_close_times,
        COUNT(*) AS total_trades
    FROM trades";

pub const INTEGRITY_SQL: &str = "
    WITH integrity_checks AS (
        SELECT
            COUNT(*) AS total_trades,
            COUNT(DISTINCT t.login_hash) AS distinct_trade_logins,
            COUNT(DISTINCT u.login_hash) AS distinct_user_logins,
            COUNT(*) FILTER (WHERE u.login_hash IS NULL) AS orphaned_trades,
            COUNT(*) FILTER (WHERE t.server_hash IS NULL) AS null_server_hash,
            COUNT(*) FILTER (WHERE t.ticket_hash IS NULL) AS null_ticket_hash
        FROM trades t
        LEFT JOIN users u ON t.login_hash = u.login_hash
    )
    SELECT
        *,
        CASE
            WHEN orphaned_trades > 0 THEN 'Warning: Found trades without matching users'
            ELSE 'OK: All trades have matching users'
        END AS integrity_status
    FROM integrity_checks";

pub const BUSINESS_RULES_SQL: &str = "
    SELECT
        'cmd_values' AS check_type,
        COUNT(*) FILTER (WHERE cmd NOT IN (0, 1)) AS invalid_cmd_count,
        COUNT(*) AS total_records
    FROM trades
    UNION ALL
    SELECT
        'enable_status' AS check_type,
        COUNT(*) FILTER (WHERE enable IS NULL) AS null_enable_count,
        COUNT(*) AS total_records
    FROM users";

pub const CMD_VALUES_SQL: &str = "SELECT DISTINCT cmd FROM trades ORDER BY cmd";

pub const ENABLE_DISTRIBUTION_SQL: &str = "
    SELECT enable, COUNT(*) AS user_count
    FROM users
    GROUP BY enable
    ORDER BY enable";

// --- CHECK OUTPUT ---

/// One finished check: the console section plus the finding kept for the summary.
#[derive(Debug, Clone)]
pub struct CheckOutput {
    pub finding: Finding,
    body: String,
}

impl CheckOutput {
    fn new(finding: Finding, body: impl fmt::Display) -> Self {
        Self {
            finding,
            body: body.to_string(),
        }
    }

    pub fn kind(&self) -> CheckKind {
        self.finding.kind()
    }
}

impl fmt::Display for CheckOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\n=== {} ===", title(self.kind()))?;
        writeln!(f, "{}", self.body)
    }
}

pub fn title(kind: CheckKind) -> &'static str {
    match kind {
        CheckKind::String => "String Values Check",
        CheckKind::Numerical => "Numerical Values Check",
        CheckKind::Dates => "Date Values Check",
        CheckKind::Integrity => "Data Integrity Check",
        CheckKind::Business => "Business Rules Check",
    }
}

/// Runs a single check. Errors are tagged with the check that raised them.
pub async fn run_check(kind: CheckKind, connector: &dyn Connector) -> Result<CheckOutput, AuditError> {
    let output = match kind {
        CheckKind::String => {
            let values = check_string_values(connector).await?;
            CheckOutput::new(Finding::String(values.clone()), values)
        }
        CheckKind::Numerical => {
            let summary = check_numerical_values(connector).await?;
            CheckOutput::new(Finding::Numerical(summary.clone()), summary)
        }
        CheckKind::Dates => {
            let summary = check_date_values(connector).await?;
            CheckOutput::new(Finding::Dates(summary.clone()), summary)
        }
        CheckKind::Integrity => {
            let summary = check_data_integrity(connector).await?;
            CheckOutput::new(Finding::Integrity(summary.clone()), summary)
        }
        CheckKind::Business => {
            let output = check_business_rules(connector).await?;
            CheckOutput::new(Finding::Business(output.rules.clone()), output)
        }
    };
    Ok(output)
}

// --- THE CHECKS ---

/// Distinct symbol / currency / country combinations across trades joined to users.
pub async fn check_string_values(connector: &dyn Connector) -> Result<CategoricalValues, AuditError> {
    let table = fetch_table(connector, STRING_VALUES_SQL).await?;
    Ok(CategoricalValues::from_table(&table)?)
}

/// min / max / avg plus negative and zero counts for volume, digits and contractsize.
pub async fn check_numerical_values(
    connector: &dyn Connector,
) -> Result<NumericalSummary, AuditError> {
    let table = fetch_table(connector, NUMERICAL_SQL).await?;
    Ok(NumericalSummary::from_table(&table)?)
}

pub async fn check_date_values(connector: &dyn Connector) -> Result<DateSummary, AuditError> {
    let table = fetch_table(connector, DATES_SQL).await?;
    Ok(DateSummary::from_table(&table)?)
}

pub async fn check_data_integrity(
    connector: &dyn Connector,
) -> Result<IntegritySummary, AuditError> {
    let table = fetch_table(connector, INTEGRITY_SQL).await?;
    Ok(IntegritySummary::from_table(&table)?)
}

/// Rule counts plus the two informational listings (cmd values, account status).
pub async fn check_business_rules(
    connector: &dyn Connector,
) -> Result<BusinessCheckOutput, AuditError> {
    let rules = fetch_table(connector, BUSINESS_RULES_SQL).await?;
    let cmd_values = fetch_table(connector, CMD_VALUES_SQL).await?;
    let enable_distribution = fetch_table(connector, ENABLE_DISTRIBUTION_SQL).await?;
    Ok(BusinessCheckOutput::from_tables(
        &rules,
        &cmd_values,
        &enable_distribution,
    )?)
}

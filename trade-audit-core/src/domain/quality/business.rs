// trade-audit-core/src/domain/quality/business.rs

use std::fmt;

use super::render_table;
use crate::domain::error::DomainError;
use crate::domain::table::{Cell, TabularResult};

const CHECK: &str = "business";

/// Permitted `cmd` values for a trade (0 = buy, 1 = sell).
pub const PERMITTED_CMD_VALUES: [i64; 2] = [0, 1];

#[derive(Debug, Clone, PartialEq)]
pub struct BusinessRuleRow {
    pub check_type: String,
    pub violation_count: i64,
    pub total_records: i64,
}

/// Unioned rule counts: `cmd_values` on trades, `enable_status` on users.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BusinessRules {
    pub rows: Vec<BusinessRuleRow>,
}

/// Everything the business check prints. Only `rules` is kept as a finding.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BusinessCheckOutput {
    pub rules: BusinessRules,
    pub cmd_values: Vec<Cell>,
    pub enable_distribution: Vec<(Cell, i64)>,
}

impl BusinessRules {
    pub fn from_table(table: &TabularResult) -> Result<Self, DomainError> {
        // The union keeps the first branch's column names
        let rows = table
            .records(CHECK)
            .map(|row| {
                Ok(BusinessRuleRow {
                    check_type: row.text("check_type")?,
                    violation_count: row.int("invalid_cmd_count")?,
                    total_records: row.int("total_records")?,
                })
            })
            .collect::<Result<Vec<_>, DomainError>>()?;
        Ok(Self { rows })
    }

    pub fn rule(&self, check_type: &str) -> Option<&BusinessRuleRow> {
        self.rows.iter().find(|r| r.check_type == check_type)
    }
}

impl BusinessCheckOutput {
    pub fn from_tables(
        rules: &TabularResult,
        cmd_values: &TabularResult,
        enable_distribution: &TabularResult,
    ) -> Result<Self, DomainError> {
        let rules = BusinessRules::from_table(rules)?;
        let cmd_values = cmd_values
            .column("cmd", CHECK)?
            .into_iter()
            .cloned()
            .collect();
        let enable_distribution = enable_distribution
            .records(CHECK)
            .map(|row| Ok((row.cell("enable")?.clone(), row.int("user_count")?)))
            .collect::<Result<Vec<_>, DomainError>>()?;

        Ok(Self {
            rules,
            cmd_values,
            enable_distribution,
        })
    }
}

impl fmt::Display for BusinessRules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let table = render_table(
            &["check_type", "invalid_cmd_count", "total_records"],
            self.rows.iter().map(|r| {
                vec![
                    r.check_type.clone(),
                    r.violation_count.to_string(),
                    r.total_records.to_string(),
                ]
            }),
        );
        write!(f, "{}", table)
    }
}

impl fmt::Display for BusinessCheckOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.rules)?;

        let cmds: Vec<String> = self.cmd_values.iter().map(|c| c.to_string()).collect();
        writeln!(f, "\nUnique cmd values: [{}]", cmds.join(", "))?;

        writeln!(f, "\nAccount status distribution:")?;
        let table = render_table(
            &["enable", "count"],
            self.enable_distribution
                .iter()
                .map(|(status, n)| vec![status.to_string(), n.to_string()]),
        );
        write!(f, "{}", table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    fn rules_table() -> TabularResult {
        TabularResult::new(
            vec![
                "check_type".into(),
                "invalid_cmd_count".into(),
                "total_records".into(),
            ],
            vec![
                vec![Cell::Text("cmd_values".into()), Cell::Int(2), Cell::Int(50)],
                vec![Cell::Text("enable_status".into()), Cell::Int(1), Cell::Int(8)],
            ],
        )
    }

    #[test]
    fn test_rules_from_union() -> Result<()> {
        let rules = BusinessRules::from_table(&rules_table())?;
        assert_eq!(rules.rows.len(), 2);
        assert_eq!(rules.rule("cmd_values").map(|r| r.violation_count), Some(2));
        assert_eq!(rules.rule("enable_status").map(|r| r.total_records), Some(8));
        Ok(())
    }

    #[test]
    fn test_output_rendering() -> Result<()> {
        let cmds = TabularResult::new(
            vec!["cmd".into()],
            vec![vec![Cell::Int(0)], vec![Cell::Int(1)], vec![Cell::Int(6)]],
        );
        let enable = TabularResult::new(
            vec!["enable".into(), "user_count".into()],
            vec![
                vec![Cell::Int(0), Cell::Int(3)],
                vec![Cell::Int(1), Cell::Int(4)],
                vec![Cell::Null, Cell::Int(1)],
            ],
        );

        let output = BusinessCheckOutput::from_tables(&rules_table(), &cmds, &enable)?;
        assert_eq!(output.cmd_values.len(), 3);
        assert_eq!(output.enable_distribution[2], (Cell::Null, 1));

        let rendered = output.to_string();
        assert!(rendered.contains("Unique cmd values: [0, 1, 6]"));
        assert!(rendered.contains("Account status distribution:"));
        assert!(rendered.contains("enable_status"));
        Ok(())
    }
}

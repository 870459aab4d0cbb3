// trade-audit-core/src/domain/quality/numerical.rs

use std::fmt;

use super::{display_opt, render_table};
use crate::domain::error::DomainError;
use crate::domain::table::TabularResult;

const CHECK: &str = "numerical";

/// Trade columns covered by the range check, in report order.
pub const NUMERIC_FIELDS: [&str; 3] = ["volume", "digits", "contractsize"];

#[derive(Debug, Clone, PartialEq)]
pub struct NumericalRow {
    pub field: String,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
    pub avg_value: Option<f64>,
    pub negative_count: i64,
    pub zero_count: i64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct NumericalSummary {
    pub rows: Vec<NumericalRow>,
}

impl NumericalSummary {
    pub fn from_table(table: &TabularResult) -> Result<Self, DomainError> {
        let rows = table
            .records(CHECK)
            .map(|row| {
                Ok(NumericalRow {
                    field: row.text("field")?,
                    min_value: row.opt_float("min_value")?,
                    max_value: row.opt_float("max_value")?,
                    avg_value: row.opt_float("avg_value")?,
                    negative_count: row.int("negative_count")?,
                    zero_count: row.int("zero_count")?,
                })
            })
            .collect::<Result<Vec<_>, DomainError>>()?;
        Ok(Self { rows })
    }

    pub fn field(&self, name: &str) -> Option<&NumericalRow> {
        self.rows.iter().find(|r| r.field == name)
    }
}

impl fmt::Display for NumericalSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let table = render_table(
            &[
                "field",
                "min_value",
                "max_value",
                "avg_value",
                "negative_count",
                "zero_count",
            ],
            self.rows.iter().map(|r| {
                vec![
                    r.field.clone(),
                    display_opt(r.min_value),
                    display_opt(r.max_value),
                    display_opt(r.avg_value.map(|v| format!("{:.6}", v))),
                    r.negative_count.to_string(),
                    r.zero_count.to_string(),
                ]
            }),
        );
        write!(f, "{}", table)
    }
}

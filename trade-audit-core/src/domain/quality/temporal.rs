// trade-audit-core/src/domain/quality/temporal.rs

use chrono::NaiveDateTime;
use std::fmt;

use super::{display_opt, render_table};
use crate::domain::error::DomainError;
use crate::domain::table::TabularResult;

const CHECK: &str = "dates";

/// `close_time` value the trading platform writes for positions that are still open
/// (the Unix epoch).
pub const OPEN_POSITION_SENTINEL: &str = "1970-01-01 00:00:00";

#[derive(Debug, Clone, PartialEq)]
pub struct DateSummary {
    pub min_open_time: Option<NaiveDateTime>,
    pub max_open_time: Option<NaiveDateTime>,
    pub min_close_time: Option<NaiveDateTime>,
    pub max_close_time: Option<NaiveDateTime>,
    pub invalid_time_order: i64,
    pub open_trades: i64,
    pub null_open_times: i64,
    pub null_close_times: i64,
    pub total_trades: i64,
}

impl DateSummary {
    pub fn from_table(table: &TabularResult) -> Result<Self, DomainError> {
        let row = table.first_row(CHECK)?;
        Ok(Self {
            min_open_time: row.opt_timestamp("min_open_time")?,
            max_open_time: row.opt_timestamp("max_open_time")?,
            min_close_time: row.opt_timestamp("min_close_time")?,
            max_close_time: row.opt_timestamp("max_close_time")?,
            invalid_time_order: row.int("invalid_time_order")?,
            open_trades: row.int("open_trades")?,
            null_open_times: row.int("null_open_times")?,
            null_close_times: row.int("null_close_times")?,
            total_trades: row.int("total_trades")?,
        })
    }
}

fn ts(value: Option<NaiveDateTime>) -> String {
    display_opt(value.map(|t| t.format("%Y-%m-%d %H:%M:%S")))
}

impl fmt::Display for DateSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let table = render_table(
            &[
                "min_open_time",
                "max_open_time",
                "min_close_time",
                "max_close_time",
                "invalid_time_order",
                "open_trades",
                "null_open_times",
                "null_close_times",
                "total_trades",
            ],
            [vec![
                ts(self.min_open_time),
                ts(self.max_open_time),
                ts(self.min_close_time),
                ts(self.max_close_time),
                self.invalid_time_order.to_string(),
                self.open_trades.to_string(),
                self.null_open_times.to_string(),
                self.null_close_times.to_string(),
                self.total_trades.to_string(),
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

    #[test]
    fn test_sentinel_parses_as_epoch() -> Result<()> {
        let parsed = NaiveDateTime::parse_from_str(OPEN_POSITION_SENTINEL, "%Y-%m-%d %H:%M:%S")?;
        assert_eq!(parsed.and_utc().timestamp(), 0);
        Ok(())
    }

    #[test]
    fn test_from_single_row() -> Result<()> {
        let open = NaiveDateTime::parse_from_str("2022-03-01 10:00:00", "%Y-%m-%d %H:%M:%S")?;
        let table = TabularResult::new(
            [
                "min_open_time",
                "max_open_time",
                "min_close_time",
                "max_close_time",
                "invalid_time_order",
                "open_trades",
                "null_open_times",
                "null_close_times",
                "total_trades",
            ]
            .iter()
            .map(|c| c.to_string())
            .collect(),
            vec![vec![
                Cell::Timestamp(open),
                Cell::Timestamp(open),
                Cell::Null,
                Cell::Null,
                Cell::Int(1),
                Cell::Int(2),
                Cell::Int(0),
                Cell::Int(4),
                Cell::Int(4),
            ]],
        );

        let summary = DateSummary::from_table(&table)?;
        assert_eq!(summary.min_open_time, Some(open));
        assert_eq!(summary.max_close_time, None);
        assert_eq!(summary.open_trades, 2);
        assert_eq!(summary.total_trades, 4);

        let rendered = summary.to_string();
        assert!(rendered.contains("2022-03-01 10:00:00"));
        assert!(rendered.contains("invalid_time_order"));
        Ok(())
    }

    #[test]
    fn test_empty_result_is_an_error() {
        let table = TabularResult::new(vec!["total_trades".into()], vec![]);
        assert!(matches!(
            DateSummary::from_table(&table),
            Err(DomainError::EmptyResult { .. })
        ));
    }
}

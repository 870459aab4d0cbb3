// trade-audit-core/src/domain/quality/categorical.rs

use std::fmt;

use super::render_table;
use crate::domain::error::DomainError;
use crate::domain::table::TabularResult;

const CHECK: &str = "string";

pub const CATEGORICAL_COLUMNS: [&str; 3] = ["symbol", "currency", "country_hash"];

/// One distinct (symbol, currency, country) combination seen in trades joined to users.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CategoricalRow {
    pub symbol: Option<String>,
    pub currency: Option<String>,
    pub country_hash: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CategoricalValues {
    pub rows: Vec<CategoricalRow>,
}

impl CategoricalRow {
    fn get(&self, column: &str) -> Option<&str> {
        match column {
            "symbol" => self.symbol.as_deref(),
            "currency" => self.currency.as_deref(),
            "country_hash" => self.country_hash.as_deref(),
            _ => None,
        }
    }
}

impl CategoricalValues {
    pub fn from_table(table: &TabularResult) -> Result<Self, DomainError> {
        let rows = table
            .records(CHECK)
            .map(|row| {
                Ok(CategoricalRow {
                    symbol: row.opt_text("symbol")?,
                    currency: row.opt_text("currency")?,
                    country_hash: row.opt_text("country_hash")?,
                })
            })
            .collect::<Result<Vec<_>, DomainError>>()?;
        Ok(Self { rows })
    }

    /// Frequency of each non-null value of `column`, most frequent first.
    /// Ties keep the order in which values were first seen.
    pub fn value_counts(&self, column: &str) -> Vec<(String, usize)> {
        let mut counts: Vec<(String, usize)> = Vec::new();
        for value in self.rows.iter().filter_map(|r| r.get(column)) {
            match counts.iter_mut().find(|(v, _)| v == value) {
                Some((_, n)) => *n += 1,
                None => counts.push((value.to_string(), 1)),
            }
        }
        // stable sort keeps first-seen order among equal counts
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts
    }
}

impl fmt::Display for CategoricalValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Unique values in categorical columns:")?;
        for column in CATEGORICAL_COLUMNS {
            writeln!(f, "\n{}:", column)?;
            let counts = self.value_counts(column);
            if counts.is_empty() {
                writeln!(f, "(no values)")?;
                continue;
            }
            let table = render_table(
                &[column, "count"],
                counts
                    .into_iter()
                    .map(|(value, n)| vec![value, n.to_string()]),
            );
            writeln!(f, "{}", table)?;
        }
        Ok(())
    }
}

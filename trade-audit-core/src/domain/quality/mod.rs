// trade-audit-core/src/domain/quality/mod.rs
//
// One named-record type per data-quality check. Each record is built from the
// raw query table and renders itself for the console.

pub mod business;
pub mod categorical;
pub mod integrity;
pub mod numerical;
pub mod temporal;

use comfy_table::{Table, presets::UTF8_FULL};
use std::fmt::Display;

pub use business::{BusinessCheckOutput, BusinessRuleRow, BusinessRules};
pub use categorical::{CategoricalRow, CategoricalValues};
pub use integrity::{IntegrityStatus, IntegritySummary};
pub use numerical::{NumericalRow, NumericalSummary};
pub use temporal::{DateSummary, OPEN_POSITION_SENTINEL};

pub(crate) fn render_table<R, C>(header: &[&str], rows: R) -> Table
where
    R: IntoIterator<Item = Vec<C>>,
    C: Display,
{
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(header.to_vec());
    for row in rows {
        table.add_row(row.iter().map(|c| c.to_string()).collect::<Vec<_>>());
    }
    table
}

pub(crate) fn display_opt<T: Display>(value: Option<T>) -> String {
    value.map_or_else(|| "None".to_string(), |v| v.to_string())
}

// trade-audit-core/src/domain/table.rs

// Engine-independent view of a query result: named columns, ordered rows,
// one loosely-typed cell per column. Typed check records are built on top of it.

use chrono::NaiveDateTime;
use comfy_table::{Table, presets::UTF8_FULL};
use std::fmt;

use crate::domain::error::DomainError;

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Timestamp(NaiveDateTime),
}

impl Cell {
    fn type_name(&self) -> &'static str {
        match self {
            Cell::Null => "null",
            Cell::Bool(_) => "boolean",
            Cell::Int(_) => "integer",
            Cell::Float(_) => "float",
            Cell::Text(_) => "text",
            Cell::Timestamp(_) => "timestamp",
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Null => write!(f, "None"),
            Cell::Bool(b) => write!(f, "{}", b),
            Cell::Int(i) => write!(f, "{}", i),
            Cell::Float(x) => write!(f, "{}", x),
            Cell::Text(s) => write!(f, "{}", s),
            Cell::Timestamp(ts) => write!(f, "{}", ts.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TabularResult {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

/// Borrowed row with typed, named accessors.
/// Every getter reports the owning check so shape errors stay readable.
pub struct RowRef<'a> {
    table: &'a TabularResult,
    cells: &'a [Cell],
    check: &'a str,
}

impl TabularResult {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self { columns, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn records<'a>(&'a self, check: &'a str) -> impl Iterator<Item = RowRef<'a>> + 'a {
        self.rows.iter().map(move |cells| RowRef {
            table: self,
            cells,
            check,
        })
    }

    pub fn first_row<'a>(&'a self, check: &'a str) -> Result<RowRef<'a>, DomainError> {
        self.records(check)
            .next()
            .ok_or_else(|| DomainError::EmptyResult {
                check: check.to_string(),
            })
    }

    /// Values of a single column, in row order.
    pub fn column<'a>(&'a self, name: &str, check: &str) -> Result<Vec<&'a Cell>, DomainError> {
        let idx = self
            .column_index(name)
            .ok_or_else(|| DomainError::MissingColumn {
                check: check.to_string(),
                column: name.to_string(),
            })?;
        Ok(self.rows.iter().filter_map(|r| r.get(idx)).collect())
    }

    pub fn to_table(&self) -> Table {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(self.columns.clone());
        for row in &self.rows {
            table.add_row(row.iter().map(|c| c.to_string()).collect::<Vec<_>>());
        }
        table
    }
}

impl fmt::Display for TabularResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_table())
    }
}

impl<'a> RowRef<'a> {
    pub fn cell(&self, column: &str) -> Result<&'a Cell, DomainError> {
        self.table
            .column_index(column)
            .and_then(|idx| self.cells.get(idx))
            .ok_or_else(|| DomainError::MissingColumn {
                check: self.check.to_string(),
                column: column.to_string(),
            })
    }

    fn mismatch(&self, column: &str, expected: &'static str, found: &Cell) -> DomainError {
        DomainError::UnexpectedType {
            check: self.check.to_string(),
            column: column.to_string(),
            expected,
            found: found.type_name().to_string(),
        }
    }

    /// Integer column. Counts never come back NULL, so NULL is a shape error here.
    pub fn int(&self, column: &str) -> Result<i64, DomainError> {
        match self.cell(column)? {
            Cell::Int(i) => Ok(*i),
            // Some engines widen COUNT/SUM to a decimal type
            Cell::Float(x) if x.fract() == 0.0 => Ok(*x as i64),
            other => Err(self.mismatch(column, "integer", other)),
        }
    }

    pub fn opt_float(&self, column: &str) -> Result<Option<f64>, DomainError> {
        match self.cell(column)? {
            Cell::Null => Ok(None),
            Cell::Int(i) => Ok(Some(*i as f64)),
            Cell::Float(x) => Ok(Some(*x)),
            other => Err(self.mismatch(column, "number", other)),
        }
    }

    pub fn text(&self, column: &str) -> Result<String, DomainError> {
        match self.cell(column)? {
            Cell::Text(s) => Ok(s.clone()),
            other => Err(self.mismatch(column, "text", other)),
        }
    }

    pub fn opt_text(&self, column: &str) -> Result<Option<String>, DomainError> {
        match self.cell(column)? {
            Cell::Null => Ok(None),
            Cell::Text(s) => Ok(Some(s.clone())),
            other => Err(self.mismatch(column, "text", other)),
        }
    }

    pub fn opt_timestamp(&self, column: &str) -> Result<Option<NaiveDateTime>, DomainError> {
        match self.cell(column)? {
            Cell::Null => Ok(None),
            Cell::Timestamp(ts) => Ok(Some(*ts)),
            other => Err(self.mismatch(column, "timestamp", other)),
        }
    }
}

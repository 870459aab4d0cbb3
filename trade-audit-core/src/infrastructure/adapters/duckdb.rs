// trade-audit-core/src/infrastructure/adapters/duckdb.rs

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use duckdb::types::{TimeUnit, Value};
use duckdb::{AccessMode, Config, Connection};
use std::sync::Mutex;
use tracing::{debug, info};

// Hexagonal imports
use crate::domain::table::{Cell, TabularResult};
use crate::error::AuditError;
use crate::infrastructure::config::{ConnectionSettings, PostgresSettings};
use crate::infrastructure::error::{DatabaseError, InfrastructureError};
use crate::ports::connector::{ConnectionProvider, Connector};

/// Catalog name the PostgreSQL database is attached under.
const ATTACHED_CATALOG: &str = "source";

pub struct DuckDBConnector {
    conn: Mutex<Connection>,
}

impl DuckDBConnector {
    /// Opens a DuckDB file read-only, or a fresh in-memory database for ":memory:".
    pub fn open(db_path: &str) -> Result<Self, InfrastructureError> {
        let conn = if db_path == ":memory:" {
            Connection::open_in_memory_with_flags(Config::default())?
        } else {
            let config = Config::default().access_mode(AccessMode::ReadOnly)?;
            Connection::open_with_flags(db_path, config)?
        };

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// In-memory DuckDB with the PostgreSQL database attached read-only and
    /// selected as the default catalog/schema.
    pub fn attach_postgres(settings: &PostgresSettings) -> Result<Self, InfrastructureError> {
        let conn = Connection::open_in_memory_with_flags(Config::default())?;
        load_postgres_extension(&conn)?;
        conn.execute_batch(&format!(
            "ATTACH {} AS {} (TYPE postgres, READ_ONLY); USE {}.{};",
            sql_literal(&settings.to_libpq()),
            ATTACHED_CATALOG,
            ATTACHED_CATALOG,
            quote_ident(&settings.schema),
        ))?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn read_table(conn: &Connection, query: &str) -> Result<TabularResult, duckdb::Error> {
        let mut stmt = conn.prepare(query)?;
        let mut rows = stmt.query([])?;

        // Column names are only known once the statement has run
        let columns: Vec<String> = rows
            .as_ref()
            .map(|s| s.column_names())
            .unwrap_or_default();

        let mut data = Vec::new();
        while let Some(row) = rows.next()? {
            let mut cells = Vec::with_capacity(columns.len());
            for idx in 0..columns.len() {
                let value: Value = row.get(idx)?;
                cells.push(to_cell(value));
            }
            data.push(cells);
        }

        Ok(TabularResult::new(columns, data))
    }
}

#[async_trait]
impl Connector for DuckDBConnector {
    async fn fetch(&self, query: &str) -> Result<TabularResult, AuditError> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| InfrastructureError::Database(DatabaseError::Poisoned))?;
        let table = Self::read_table(&conn, query)?;
        debug!(rows = table.rows.len(), "Fetched result set");
        Ok(table)
    }

    fn close(self: Box<Self>) -> Result<(), AuditError> {
        let this = *self;
        let conn = this
            .conn
            .into_inner()
            .map_err(|_| InfrastructureError::Database(DatabaseError::Poisoned))?;
        conn.close().map_err(|(_conn, e)| AuditError::from(e))
    }

    fn engine_name(&self) -> &str {
        "duckdb"
    }
}

/// Opens one DuckDB-backed connection per `acquire`, following the configured backend.
pub struct DuckDBProvider {
    settings: ConnectionSettings,
}

impl DuckDBProvider {
    pub fn new(settings: ConnectionSettings) -> Self {
        Self { settings }
    }
}

#[async_trait]
impl ConnectionProvider for DuckDBProvider {
    async fn acquire(&self) -> Result<Box<dyn Connector>, AuditError> {
        let connector = match &self.settings {
            ConnectionSettings::DuckDb { path } => DuckDBConnector::open(path),
            ConnectionSettings::Postgres(pg) => DuckDBConnector::attach_postgres(pg),
        }
        .map_err(|e| InfrastructureError::Connection(e.to_string()))?;

        info!(target = %self.describe(), "Database connection acquired");
        Ok(Box::new(connector))
    }

    fn describe(&self) -> String {
        match &self.settings {
            ConnectionSettings::DuckDb { path } => format!("duckdb://{}", path),
            ConnectionSettings::Postgres(pg) => pg.describe(),
        }
    }
}

// --- VALUE MAPPING ---

fn to_cell(value: Value) -> Cell {
    match value {
        Value::Null => Cell::Null,
        Value::Boolean(b) => Cell::Bool(b),
        Value::TinyInt(i) => Cell::Int(i.into()),
        Value::SmallInt(i) => Cell::Int(i.into()),
        Value::Int(i) => Cell::Int(i.into()),
        Value::BigInt(i) => Cell::Int(i),
        Value::UTinyInt(i) => Cell::Int(i.into()),
        Value::USmallInt(i) => Cell::Int(i.into()),
        Value::UInt(i) => Cell::Int(i.into()),
        Value::UBigInt(i) => i64::try_from(i).map_or(Cell::Float(i as f64), Cell::Int),
        Value::HugeInt(i) => i64::try_from(i).map_or(Cell::Float(i as f64), Cell::Int),
        Value::Float(x) => Cell::Float(x.into()),
        Value::Double(x) => Cell::Float(x),
        Value::Decimal(d) => d
            .to_string()
            .parse::<f64>()
            .map_or_else(|_| Cell::Text(d.to_string()), Cell::Float),
        Value::Text(s) => Cell::Text(s),
        Value::Enum(s) => Cell::Text(s),
        Value::Timestamp(unit, raw) => {
            timestamp(unit, raw).map_or_else(|| Cell::Text(raw.to_string()), Cell::Timestamp)
        }
        Value::Date32(days) => NaiveDate::from_ymd_opt(1970, 1, 1)
            .and_then(|epoch| epoch.checked_add_signed(chrono::Duration::days(days.into())))
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map_or_else(|| Cell::Text(days.to_string()), Cell::Timestamp),
        other => Cell::Text(format!("{:?}", other)),
    }
}

fn timestamp(unit: TimeUnit, raw: i64) -> Option<NaiveDateTime> {
    let micros = match unit {
        TimeUnit::Second => raw.checked_mul(1_000_000)?,
        TimeUnit::Millisecond => raw.checked_mul(1_000)?,
        TimeUnit::Microsecond => raw,
        TimeUnit::Nanosecond => raw / 1_000,
    };
    DateTime::from_timestamp_micros(micros).map(|dt| dt.naive_utc())
}

/// Loads the `postgres` extension, downloading it only when it is not installed yet.
fn load_postgres_extension(conn: &Connection) -> Result<(), duckdb::Error> {
    if let Err(e) = conn.execute_batch("LOAD postgres;") {
        debug!("postgres extension not loadable ({}), installing it", e);
        conn.execute_batch("INSTALL postgres; LOAD postgres;")?;
    }
    Ok(())
}

fn sql_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

// trade-audit-core/src/application/mock.rs
//
// In-memory stand-ins for the database ports, shared by the application tests.

#![allow(clippy::unwrap_used)]

use async_trait::async_trait;
use chrono::NaiveDateTime;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::application::checks::{
    BUSINESS_RULES_SQL, CMD_VALUES_SQL, DATES_SQL, ENABLE_DISTRIBUTION_SQL, INTEGRITY_SQL,
    NUMERICAL_SQL, STRING_VALUES_SQL,
};
use crate::domain::quality::integrity::{STATUS_OK, STATUS_WARNING};
use crate::domain::table::{Cell, TabularResult};
use crate::error::AuditError;
use crate::infrastructure::error::InfrastructureError;
use crate::ports::connector::{ConnectionProvider, Connector};

fn table(columns: &[&str], rows: Vec<Vec<Cell>>) -> TabularResult {
    TabularResult::new(columns.iter().map(|c| c.to_string()).collect(), rows)
}

fn text(s: &str) -> Cell {
    Cell::Text(s.into())
}

fn ts(s: &str) -> Cell {
    Cell::Timestamp(NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap())
}

fn numerical_row(field: &str, negative: i64, zero: i64) -> Vec<Cell> {
    vec![
        text(field),
        Cell::Float(0.0),
        Cell::Float(100.0),
        Cell::Float(12.5),
        Cell::Int(negative),
        Cell::Int(zero),
    ]
}

fn numerical_table(rows: [(&str, i64, i64); 3]) -> TabularResult {
    table(
        &[
            "field",
            "min_value",
            "max_value",
            "avg_value",
            "negative_count",
            "zero_count",
        ],
        rows.iter()
            .map(|(field, negative, zero)| numerical_row(field, *negative, *zero))
            .collect(),
    )
}

fn integrity_table(orphaned: i64) -> TabularResult {
    let status = if orphaned > 0 { STATUS_WARNING } else { STATUS_OK };
    table(
        &[
            "total_trades",
            "distinct_trade_logins",
            "distinct_user_logins",
            "orphaned_trades",
            "null_server_hash",
            "null_ticket_hash",
            "integrity_status",
        ],
        vec![vec![
            Cell::Int(6),
            Cell::Int(3),
            Cell::Int(3),
            Cell::Int(orphaned),
            Cell::Int(0),
            Cell::Int(0),
            text(status),
        ]],
    )
}

#[derive(Clone, Default)]
pub(crate) struct MockConnector {
    responses: Vec<(String, TabularResult)>,
    failing: Vec<String>,
    executed: Arc<Mutex<Vec<String>>>,
    closed: Arc<AtomicUsize>,
}

impl MockConnector {
    /// Canned answers for every statement, describing a clean dataset.
    pub(crate) fn healthy() -> Self {
        let responses = vec![
            (
                STRING_VALUES_SQL,
                table(
                    &["symbol", "currency", "country_hash"],
                    vec![
                        vec![text("EURUSD"), text("USD"), text("c1")],
                        vec![text("GBPUSD"), text("USD"), text("c2")],
                    ],
                ),
            ),
            (
                NUMERICAL_SQL,
                numerical_table([("volume", 0, 0), ("digits", 0, 4), ("contractsize", 0, 0)]),
            ),
            (
                DATES_SQL,
                table(
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
                    vec![vec![
                        ts("2020-01-01 00:00:00"),
                        ts("2020-06-01 00:00:00"),
                        ts("1970-01-01 00:00:00"),
                        ts("2020-06-02 00:00:00"),
                        Cell::Int(0),
                        Cell::Int(1),
                        Cell::Int(0),
                        Cell::Int(0),
                        Cell::Int(6),
                    ]],
                ),
            ),
            (INTEGRITY_SQL, integrity_table(0)),
            (
                BUSINESS_RULES_SQL,
                table(
                    &["check_type", "invalid_cmd_count", "total_records"],
                    vec![
                        vec![text("cmd_values"), Cell::Int(0), Cell::Int(6)],
                        vec![text("enable_status"), Cell::Int(0), Cell::Int(3)],
                    ],
                ),
            ),
            (
                CMD_VALUES_SQL,
                table(&["cmd"], vec![vec![Cell::Int(0)], vec![Cell::Int(1)]]),
            ),
            (
                ENABLE_DISTRIBUTION_SQL,
                table(
                    &["enable", "user_count"],
                    vec![vec![Cell::Int(1), Cell::Int(3)]],
                ),
            ),
        ];

        Self {
            responses: responses
                .into_iter()
                .map(|(sql, t)| (sql.to_string(), t))
                .collect(),
            ..Self::default()
        }
    }

    fn respond(mut self, query: &str, result: TabularResult) -> Self {
        match self.responses.iter_mut().find(|(sql, _)| sql == query) {
            Some(slot) => slot.1 = result,
            None => self.responses.push((query.to_string(), result)),
        }
        self
    }

    pub(crate) fn with_numerical(self, rows: [(&str, i64, i64); 3]) -> Self {
        self.respond(NUMERICAL_SQL, numerical_table(rows))
    }

    pub(crate) fn with_orphans(self, orphaned: i64) -> Self {
        self.respond(INTEGRITY_SQL, integrity_table(orphaned))
    }

    pub(crate) fn failing_on(mut self, query: &str) -> Self {
        self.failing.push(query.to_string());
        self
    }

    pub(crate) fn executed(&self) -> Vec<String> {
        self.executed.lock().unwrap().clone()
    }

    pub(crate) fn close_count(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Connector for MockConnector {
    async fn fetch(&self, query: &str) -> Result<TabularResult, AuditError> {
        self.executed.lock().unwrap().push(query.to_string());
        if self.failing.iter().any(|q| q == query) {
            return Err(AuditError::InternalError("relation does not exist".into()));
        }
        self.responses
            .iter()
            .find(|(sql, _)| sql == query)
            .map(|(_, t)| t.clone())
            .ok_or_else(|| AuditError::InternalError("no canned response".into()))
    }

    fn close(self: Box<Self>) -> Result<(), AuditError> {
        self.closed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn engine_name(&self) -> &str {
        "mock"
    }
}

/// Hands out clones of one `MockConnector` (they share the recorders), or refuses.
pub(crate) struct MockProvider {
    connector: Option<MockConnector>,
    acquired: AtomicUsize,
}

impl MockProvider {
    pub(crate) fn new(connector: MockConnector) -> Self {
        Self {
            connector: Some(connector),
            acquired: AtomicUsize::new(0),
        }
    }

    pub(crate) fn unreachable() -> Self {
        Self {
            connector: None,
            acquired: AtomicUsize::new(0),
        }
    }

    pub(crate) fn acquire_count(&self) -> usize {
        self.acquired.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ConnectionProvider for MockProvider {
    async fn acquire(&self) -> Result<Box<dyn Connector>, AuditError> {
        self.acquired.fetch_add(1, Ordering::SeqCst);
        match &self.connector {
            Some(c) => Ok(Box::new(c.clone())),
            None => Err(InfrastructureError::Connection(
                "connection refused (localhost:5432)".into(),
            )
            .into()),
        }
    }

    fn describe(&self) -> String {
        "mock://trades".to_string()
    }
}

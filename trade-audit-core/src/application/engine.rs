// trade-audit-core/src/application/engine.rs

use std::time::Instant;
use tracing::{debug, error, instrument};

use crate::domain::table::TabularResult;
use crate::error::AuditError;
use crate::ports::connector::Connector;

/// Runs one fixed diagnostic query with instrumentation (logs + timing).
#[instrument(skip(connector, query), fields(query.len = query.len(), engine = connector.engine_name()))]
pub async fn fetch_table(connector: &dyn Connector, query: &str) -> Result<TabularResult, AuditError> {
    let start = Instant::now();
    debug!("⚡ Executing Query: {}", query.trim());

    let result = connector.fetch(query).await;
    let duration = start.elapsed();

    match result {
        Ok(table) => {
            debug!(rows = table.rows.len(), "✅ Query finished in {:.2?}", duration);
            Ok(table)
        }
        Err(e) => {
            // Logged here for the timing context; the caller still decides what to do
            error!("❌ Query failed after {:.2?}: {}", duration, e);
            Err(e)
        }
    }
}

// trade-audit-core/src/ports/connector.rs

// What the audit needs from a database, without knowing which one answers.
// Acquiring, querying and releasing a connection are the only capabilities used.

use crate::domain::table::TabularResult;
use crate::error::AuditError;
use async_trait::async_trait;

#[async_trait]
pub trait Connector: Send + Sync {
    /// Runs a fixed statement and returns every row it produces.
    async fn fetch(&self, query: &str) -> Result<TabularResult, AuditError>;

    /// Releases the underlying connection. Consuming `self` makes a second release impossible.
    fn close(self: Box<Self>) -> Result<(), AuditError>;

    fn engine_name(&self) -> &str;
}

#[async_trait]
pub trait ConnectionProvider: Send + Sync {
    async fn acquire(&self) -> Result<Box<dyn Connector>, AuditError>;

    /// Human-readable target (never includes credentials).
    fn describe(&self) -> String;
}

pub mod audit;
pub mod connection;

pub use audit::{AuditConfig, FailurePolicy, load_audit_config};
pub use connection::{ConnectionOverrides, ConnectionSettings, PostgresSettings};

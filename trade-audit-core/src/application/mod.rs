// trade-audit-core/src/application/mod.rs

pub mod audit;
pub mod checks;
pub mod engine;

#[cfg(test)]
pub(crate) mod mock;

// --- RE-EXPORTS (FACADE PATTERN) ---
// Lets the CLI write `use trade_audit_core::application::{run_audit, AuditOutcome};`
// without knowing the internal file layout.

pub use audit::{AuditOutcome, run_audit};
pub use checks::{CheckOutput, run_check};
pub use engine::fetch_table;

// trade-audit-core/src/lib.rs

#![allow(missing_docs)]
// Memory safety
#![deny(unsafe_code)]
// Robustness
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
// Performance
#![warn(clippy::perf)]

// --- HEXAGONAL MODULES ---

// 1. Ports (Interfaces / Traits)
// Contracts for the database collaborator (Connector, ConnectionProvider).
pub mod ports;

// 2. Domain
// Result tables, typed check records, findings and reporter rules.
// Depends on NOTHING else (neither infra nor app).
pub mod domain;

// 3. Infrastructure (Adapters)
// DuckDB / PostgreSQL access and configuration files.
pub mod infrastructure;

// 4. Application (Use Cases)
// The five checks and the audit orchestrator.
pub mod application;

// --- GLOBAL ERROR HANDLING ---
pub mod error;

// --- RE-EXPORTS (FACADE) ---
pub use error::AuditError;

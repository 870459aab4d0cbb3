pub mod error;
pub mod findings;
pub mod quality;
pub mod report;
pub mod table;

// Handy re-exports to simplify imports elsewhere
pub use error::DomainError;
pub use findings::{CheckKind, Finding, Findings};
pub use report::{Issue, SummaryReport};
pub use table::{Cell, TabularResult};

// trade-audit/src/commands/mod.rs

pub mod audit;

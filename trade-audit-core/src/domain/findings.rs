// trade-audit-core/src/domain/findings.rs

use std::fmt;

use crate::domain::quality::{
    BusinessRules, CategoricalValues, DateSummary, IntegritySummary, NumericalSummary,
};

/// Identity of one data-quality check. Declaration order is the run order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckKind {
    String,
    Numerical,
    Dates,
    Integrity,
    Business,
}

impl CheckKind {
    pub const ALL: [CheckKind; 5] = [
        CheckKind::String,
        CheckKind::Numerical,
        CheckKind::Dates,
        CheckKind::Integrity,
        CheckKind::Business,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CheckKind::String => "string",
            CheckKind::Numerical => "numerical",
            CheckKind::Dates => "dates",
            CheckKind::Integrity => "integrity",
            CheckKind::Business => "business",
        }
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The result of one check, tagged by the check that produced it.
#[derive(Debug, Clone, PartialEq)]
pub enum Finding {
    String(CategoricalValues),
    Numerical(NumericalSummary),
    Dates(DateSummary),
    Integrity(IntegritySummary),
    Business(BusinessRules),
}

impl Finding {
    pub fn kind(&self) -> CheckKind {
        match self {
            Finding::String(_) => CheckKind::String,
            Finding::Numerical(_) => CheckKind::Numerical,
            Finding::Dates(_) => CheckKind::Dates,
            Finding::Integrity(_) => CheckKind::Integrity,
            Finding::Business(_) => CheckKind::Business,
        }
    }
}

/// Check name -> check result, in population order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Findings {
    entries: Vec<Finding>,
}

impl Findings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a finding under its check name. A second finding for the same
    /// check replaces the first without moving it.
    pub fn insert(&mut self, finding: Finding) {
        let kind = finding.kind();
        match self.entries.iter_mut().find(|f| f.kind() == kind) {
            Some(slot) => *slot = finding,
            None => self.entries.push(finding),
        }
    }

    pub fn get(&self, kind: CheckKind) -> Option<&Finding> {
        self.entries.iter().find(|f| f.kind() == kind)
    }

    pub fn contains(&self, kind: CheckKind) -> bool {
        self.get(kind).is_some()
    }

    pub fn keys(&self) -> Vec<CheckKind> {
        self.entries.iter().map(Finding::kind).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn numerical(&self) -> Option<&NumericalSummary> {
        match self.get(CheckKind::Numerical) {
            Some(Finding::Numerical(summary)) => Some(summary),
            _ => None,
        }
    }

    pub fn integrity(&self) -> Option<&IntegritySummary> {
        match self.get(CheckKind::Integrity) {
            Some(Finding::Integrity(summary)) => Some(summary),
            _ => None,
        }
    }
}

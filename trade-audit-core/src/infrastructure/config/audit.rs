// trade-audit-core/src/infrastructure/config/audit.rs

use anyhow::Context;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};
use validator::Validate;

use super::connection::{ConnectionOverrides, ConnectionSettings};
use crate::infrastructure::error::InfrastructureError;

const CONFIG_CANDIDATES: [&str; 2] = ["trade_audit.yaml", "trade_audit.yml"];

/// What happens to the remaining checks when one check's query fails.
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Stop at the first failing check; no summary report.
    #[default]
    Abort,
    /// Skip the failing check and keep going with a partial set of findings.
    Continue,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct AuditConfig {
    #[serde(default)]
    pub connection: ConnectionSettings,

    #[serde(rename = "on-check-failure", default)]
    pub on_check_failure: FailurePolicy,
}

impl AuditConfig {
    pub fn with_overrides(mut self, overrides: ConnectionOverrides) -> Self {
        self.connection = overrides.apply(self.connection);
        self
    }

    pub fn validated(self) -> Result<Self, InfrastructureError> {
        match &self.connection {
            ConnectionSettings::Postgres(pg) => pg.validate()?,
            ConnectionSettings::DuckDb { path } if path.trim().is_empty() => {
                return Err(InfrastructureError::ConfigError(
                    "duckdb path cannot be empty".into(),
                ));
            }
            ConnectionSettings::DuckDb { .. } => {}
        }
        Ok(self)
    }
}

/// Loads the audit configuration.
///
/// An explicit path must exist. Without one, `trade_audit.yaml` / `trade_audit.yml`
/// are looked up in `search_dir`; when neither exists the defaults apply.
#[instrument(skip(search_dir))]
pub fn load_audit_config(
    explicit: Option<&Path>,
    search_dir: &Path,
) -> Result<AuditConfig, InfrastructureError> {
    let path = match explicit {
        Some(p) if p.exists() => Some(p.to_path_buf()),
        Some(p) => return Err(InfrastructureError::ConfigNotFound(p.display().to_string())),
        None => find_config(search_dir),
    };

    let Some(path) = path else {
        info!("No configuration file found, using defaults");
        return Ok(AuditConfig::default());
    };

    info!(path = ?path, "Loading audit configuration");
    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read audit config at {:?}", path))?;
    // Empty file means "all defaults"
    if content.trim().is_empty() {
        return Ok(AuditConfig::default());
    }
    let config: AuditConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}

fn find_config(root: &Path) -> Option<PathBuf> {
    CONFIG_CANDIDATES
        .iter()
        .map(|name| root.join(name))
        .find(|p| p.exists())
}

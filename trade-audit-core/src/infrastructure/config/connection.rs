// trade-audit-core/src/infrastructure/config/connection.rs

use serde::Deserialize;
use std::fmt;
use validator::Validate;

/// Where the `trades` and `users` tables live.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ConnectionSettings {
    /// A DuckDB database file (or ":memory:").
    DuckDb {
        #[serde(default = "default_duckdb_path")]
        path: String,
    },
    /// A PostgreSQL server, attached through DuckDB's postgres extension.
    Postgres(PostgresSettings),
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        ConnectionSettings::Postgres(PostgresSettings::default())
    }
}

#[derive(Deserialize, Validate, Clone, PartialEq)]
pub struct PostgresSettings {
    #[validate(length(min = 1, message = "host cannot be empty"))]
    #[serde(default = "default_host")]
    pub host: String,

    #[validate(range(min = 1, message = "port must be between 1 and 65535"))]
    #[serde(default = "default_port")]
    pub port: u16,

    #[validate(length(min = 1, message = "database cannot be empty"))]
    #[serde(default = "default_database")]
    pub database: String,

    #[validate(length(min = 1, message = "user cannot be empty"))]
    #[serde(default = "default_user")]
    pub user: String,

    #[serde(default)]
    pub password: Option<String>,

    #[validate(length(min = 1, message = "schema cannot be empty"))]
    #[serde(default = "default_schema")]
    pub schema: String,
}

impl Default for PostgresSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            database: default_database(),
            user: default_user(),
            password: None,
            schema: default_schema(),
        }
    }
}

// Credentials stay out of logs
impl fmt::Debug for PostgresSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostgresSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("schema", &self.schema)
            .finish()
    }
}

impl PostgresSettings {
    /// libpq key/value connection string. Every value is single-quoted so spaces
    /// and quotes in passwords survive.
    pub fn to_libpq(&self) -> String {
        let mut parts = vec![
            format!("host={}", libpq_quote(&self.host)),
            format!("port={}", self.port),
            format!("dbname={}", libpq_quote(&self.database)),
            format!("user={}", libpq_quote(&self.user)),
        ];
        if let Some(password) = &self.password {
            parts.push(format!("password={}", libpq_quote(password)));
        }
        parts.join(" ")
    }

    pub fn describe(&self) -> String {
        format!(
            "postgres://{}@{}:{}/{} (schema {})",
            self.user, self.host, self.port, self.database, self.schema
        )
    }
}

fn libpq_quote(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
}

/// Connection values supplied on the command line or through the standard
/// `PG*` environment variables. They win over the configuration file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConnectionOverrides {
    pub db_path: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub database: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
}

impl ConnectionOverrides {
    fn touches_postgres(&self) -> bool {
        self.host.is_some()
            || self.port.is_some()
            || self.database.is_some()
            || self.user.is_some()
            || self.password.is_some()
    }

    /// `db_path` selects DuckDB outright; any PostgreSQL field selects PostgreSQL.
    pub fn apply(self, settings: ConnectionSettings) -> ConnectionSettings {
        if let Some(path) = self.db_path {
            return ConnectionSettings::DuckDb { path };
        }
        if !self.touches_postgres() {
            return settings;
        }

        let mut pg = match settings {
            ConnectionSettings::Postgres(pg) => pg,
            ConnectionSettings::DuckDb { .. } => PostgresSettings::default(),
        };
        if let Some(host) = self.host {
            pg.host = host;
        }
        if let Some(port) = self.port {
            pg.port = port;
        }
        if let Some(database) = self.database {
            pg.database = database;
        }
        if let Some(user) = self.user {
            pg.user = user;
        }
        if let Some(password) = self.password {
            pg.password = Some(password);
        }
        ConnectionSettings::Postgres(pg)
    }
}

fn default_duckdb_path() -> String {
    ":memory:".to_string()
}
fn default_host() -> String {
    "localhost".to_string()
}
fn default_port() -> u16 {
    5432
}
fn default_database() -> String {
    "technical_test".to_string()
}
fn default_user() -> String {
    "postgres".to_string()
}
fn default_schema() -> String {
    "public".to_string()
}

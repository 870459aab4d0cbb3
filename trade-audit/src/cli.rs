// trade-audit/src/cli.rs
//
// Single source of truth for the CLI definition (Clap structs).

use clap::{Args, Parser};
use std::path::PathBuf;
use trade_audit_core::infrastructure::config::ConnectionOverrides;

#[derive(Parser)]
#[command(name = "trade-audit")]
#[command(about = "Runs the data-quality audit over the trades and users tables", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Configuration file (default: trade_audit.yaml in the working directory)
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub connection: ConnectionArgs,
}

/// Connection parameters. They override the configuration file.
#[derive(Args, Debug, Default, Clone)]
pub struct ConnectionArgs {
    /// Audit a DuckDB database file instead of PostgreSQL (wins over the PG* settings)
    #[arg(long)]
    pub db_path: Option<String>,

    /// PostgreSQL host (the DuckDB postgres extension is downloaded on first use)
    #[arg(long, env = "PGHOST")]
    pub host: Option<String>,

    /// PostgreSQL port
    #[arg(long, env = "PGPORT")]
    pub port: Option<u16>,

    /// PostgreSQL database name
    #[arg(long, env = "PGDATABASE")]
    pub database: Option<String>,

    /// PostgreSQL user
    #[arg(long, env = "PGUSER")]
    pub user: Option<String>,

    /// PostgreSQL password
    #[arg(long, env = "PGPASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

impl From<ConnectionArgs> for ConnectionOverrides {
    fn from(args: ConnectionArgs) -> Self {
        ConnectionOverrides {
            db_path: args.db_path,
            host: args.host,
            port: args.port,
            database: args.database,
            user: args.user,
            password: args.password,
        }
    }
}

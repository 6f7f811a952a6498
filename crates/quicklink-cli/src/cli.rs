use clap::{Parser, Subcommand, ValueEnum};
use quicklink_core::{Alias, RecordId, TargetUrl};
use quicklink_storage::StoreConfig;
use quicklink_telemetry::Environment;
use std::fmt::{Display, Formatter};
use std::time::Duration;

pub const DATABASE_URL_ENV: &str = "QUICKLINK_DATABASE_URL";
pub const ENVIRONMENT_ENV: &str = "QUICKLINK_ENV";
pub const MAX_CONNECTIONS_ENV: &str = "QUICKLINK_MAX_CONNECTIONS";
pub const ACQUIRE_TIMEOUT_ENV: &str = "QUICKLINK_ACQUIRE_TIMEOUT_SECS";
pub const TIMEOUT_ENV: &str = "QUICKLINK_TIMEOUT_MS";

pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;
pub const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EnvironmentArg {
    #[value(name = "local")]
    Local,
    #[value(name = "dev")]
    Dev,
    #[value(name = "prod")]
    Prod,
}

impl Display for EnvironmentArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&Environment::from(*self), f)
    }
}

impl From<EnvironmentArg> for Environment {
    fn from(value: EnvironmentArg) -> Self {
        match value {
            EnvironmentArg::Local => Environment::Local,
            EnvironmentArg::Dev => Environment::Dev,
            EnvironmentArg::Prod => Environment::Prod,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "quicklink", about = "Manage alias to URL mappings in PostgreSQL")]
pub struct CLI {
    #[arg(long, env = DATABASE_URL_ENV, hide_env_values = true)]
    pub database_url: String,

    #[arg(
        long = "env",
        env = ENVIRONMENT_ENV,
        value_enum,
        default_value_t = EnvironmentArg::Local
    )]
    pub environment: EnvironmentArg,

    #[arg(long, env = MAX_CONNECTIONS_ENV, default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,

    #[arg(long, env = ACQUIRE_TIMEOUT_ENV, default_value_t = DEFAULT_ACQUIRE_TIMEOUT_SECS)]
    pub acquire_timeout_secs: u64,

    /// Deadline applied to every store operation, in milliseconds.
    #[arg(long, env = TIMEOUT_ENV)]
    pub timeout_ms: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

impl CLI {
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::builder()
            .database_url(self.database_url.clone())
            .max_connections(self.max_connections)
            .acquire_timeout(Duration::from_secs(self.acquire_timeout_secs))
            .query_timeout(self.timeout_ms.map(Duration::from_millis))
            .build()
    }
}

#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Command {
    /// Check that the database is reachable.
    Ping,
    /// Store a new alias; prints the generated record id.
    Save { url: TargetUrl, alias: Alias },
    /// Print the URL stored under an alias.
    Get {
        alias: Alias,
        #[arg(long)]
        json: bool,
    },
    /// Report whether an alias is taken.
    Exists { alias: Alias },
    /// Delete a record by id.
    Delete { id: RecordId },
}

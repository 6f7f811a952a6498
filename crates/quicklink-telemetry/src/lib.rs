//! Tracing subscriber setup shared by quicklink binaries.
//!
//! The output format and default level follow the deployment environment:
//!
//! | environment | format | default level |
//! |-------------|--------|---------------|
//! | `local`     | text   | `debug`       |
//! | `dev`       | JSON   | `debug`       |
//! | `prod`      | JSON   | `info`        |
//!
//! `RUST_LOG` overrides the default level when set.

use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;
use tracing::Level;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("unknown environment '{0}', expected one of: local, dev, prod")]
    UnknownEnvironment(String),
    #[error("failed to install tracing subscriber: {0}")]
    Init(String),
}

/// Deployment environment the process runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Local,
    Dev,
    Prod,
}

impl Environment {
    pub fn default_level(self) -> Level {
        match self {
            Environment::Local | Environment::Dev => Level::DEBUG,
            Environment::Prod => Level::INFO,
        }
    }

    pub fn is_json(self) -> bool {
        !matches!(self, Environment::Local)
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Local => write!(f, "local"),
            Environment::Dev => write!(f, "dev"),
            Environment::Prod => write!(f, "prod"),
        }
    }
}

impl FromStr for Environment {
    type Err = TelemetryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(Environment::Local),
            "dev" => Ok(Environment::Dev),
            "prod" => Ok(Environment::Prod),
            other => Err(TelemetryError::UnknownEnvironment(other.to_string())),
        }
    }
}

/// Installs the global tracing subscriber for `env`.
///
/// Fails if a global subscriber is already installed.
pub fn init(env: Environment) -> Result<(), TelemetryError> {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(env.default_level()).into())
        .from_env_lossy();

    let installed = if env.is_json() {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .try_init()
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .try_init()
    };

    installed.map_err(|err| TelemetryError::Init(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_environments() {
        assert_eq!("local".parse::<Environment>().unwrap(), Environment::Local);
        assert_eq!("DEV".parse::<Environment>().unwrap(), Environment::Dev);
        assert_eq!(" prod ".parse::<Environment>().unwrap(), Environment::Prod);
    }

    #[test]
    fn rejects_unknown_environment() {
        let err = "staging".parse::<Environment>().unwrap_err();
        assert!(matches!(err, TelemetryError::UnknownEnvironment(_)));
    }

    #[test]
    fn levels_and_formats() {
        assert_eq!(Environment::Local.default_level(), Level::DEBUG);
        assert_eq!(Environment::Dev.default_level(), Level::DEBUG);
        assert_eq!(Environment::Prod.default_level(), Level::INFO);
        assert!(!Environment::Local.is_json());
        assert!(Environment::Dev.is_json());
        assert!(Environment::Prod.is_json());
    }

    #[test]
    fn display_round_trips() {
        for env in [Environment::Local, Environment::Dev, Environment::Prod] {
            assert_eq!(env.to_string().parse::<Environment>().unwrap(), env);
        }
    }

    #[test]
    fn second_init_fails() {
        let _ = init(Environment::Prod);
        assert!(matches!(init(Environment::Prod), Err(TelemetryError::Init(_))));
    }
}

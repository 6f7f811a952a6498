mod cli;
mod commands;

use crate::cli::CLI;
use anyhow::Context;
use clap::Parser;
use quicklink_core::UrlStore;
use quicklink_storage::PostgresStore;
use tracing::{debug, error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CLI::parse();

    quicklink_telemetry::init(config.environment.into())?;

    info!(
        env = %config.environment,
        max_connections = config.max_connections,
        timeout_ms = ?config.timeout_ms,
        "starting quicklink"
    );
    debug!("debug messages are enabled");

    let store = PostgresStore::open(&config.store_config())
        .await
        .inspect_err(|err| error!(error = %err, "failed to init storage"))
        .context("failed to init storage")?;

    let outcome = run(&store, config.command).await;
    store.close().await;

    let output = outcome?;
    println!("{output}");

    Ok(())
}

async fn run<S: UrlStore>(store: &S, command: cli::Command) -> anyhow::Result<String> {
    store
        .ping()
        .await
        .inspect_err(|err| error!(error = %err, "failed to connect"))
        .context("failed to connect")?;

    commands::execute(store, command)
        .await
        .inspect_err(|err| error!(op = err.op(), error = %err, "storage error"))
        .context("command failed")
}

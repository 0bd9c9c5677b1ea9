mod cli;
mod logging;

use crate::cli::{Cli, StorageBackendArg};
use clap::Parser;
use std::process::ExitCode;
use tinylink_storage::{DatabaseConfig, InMemoryStorage, PostgresStorage, UrlRepository};
use tracing::{debug, error, info};

#[tokio::main]
async fn main() -> ExitCode {
    let config = Cli::parse();
    logging::init(config.env);

    info!(env = %config.env, storage = %config.storage, "starting tinylink");
    debug!("debug messages are enabled");

    if let Err(err) = run(config).await {
        error!(error = %err, "fatal error");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

async fn run(config: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match config.storage {
        StorageBackendArg::InMemory => {
            save(&InMemoryStorage::new(), &config.url, &config.alias).await?;
        }
        StorageBackendArg::Postgres => {
            let database = database_config(&config)?;
            let storage = PostgresStorage::connect(&database).await?;
            let result = save(&storage, &config.url, &config.alias).await;
            storage.close().await;
            result?;
        }
    }

    Ok(())
}

async fn save(
    storage: &impl UrlRepository,
    url: &str,
    alias: &str,
) -> Result<(), tinylink_core::StorageError> {
    let id = storage.save_url(url, alias).await?;
    info!(id, alias, "url saved");
    Ok(())
}

fn database_config(config: &Cli) -> Result<DatabaseConfig, Box<dyn std::error::Error>> {
    // clap enforces presence of these when the backend is postgres; the
    // ok_or fallbacks only guard direct construction paths.
    Ok(DatabaseConfig::builder()
        .host(config.db_host.clone().ok_or("db host is required")?)
        .port(config.db_port.ok_or("db port is required")?)
        .user(config.db_user.clone().ok_or("db user is required")?)
        .password(config.db_password.clone().ok_or("db password is required")?)
        .dbname(config.db_name.clone().ok_or("db name is required")?)
        .build())
}

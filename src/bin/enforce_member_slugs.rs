//! Give every member a unique slug and make the CMS enforce it.
//!
//! Reads `DIRECTUS_URL` plus either `DIRECTUS_TOKEN` or
//! `DIRECTUS_EMAIL`/`DIRECTUS_PASSWORD`. Exits non-zero on any failure.

use infra_site_gateway::{
    config::{DirectusConfig, LoggingConfig},
    services::{DirectusClient, DirectusError, run_slug_enforcement},
    telemetry::init_tracing,
};
use std::process::ExitCode;
use tracing::{error, info};

async fn run() -> Result<(), DirectusError> {
    let config = DirectusConfig::from_env()?;
    info!(base_url = %config.base_url, "Connecting to Directus");

    let client = DirectusClient::connect(&config).await?;
    let report = run_slug_enforcement(&client).await?;

    info!(
        updated = report.updated,
        remaining_empty = report.after.empty,
        remaining_duplicates = report.after.duplicates,
        "Member slug enforcement finished"
    );
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(e) = init_tracing(&LoggingConfig::from_env()) {
        eprintln!("failed to initialize tracing: {e}");
    }

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Member slug enforcement failed");
            ExitCode::FAILURE
        }
    }
}

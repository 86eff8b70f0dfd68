mod api;
mod cli;
mod commands;
mod config;
mod errors;
mod filters;
mod graphql;
mod models;
mod priority;
mod referral;
mod storage;
mod views;

use anyhow::Result;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::api::TrackerClient;
use crate::cli::{Cli, Commands};
use crate::commands::Session;
use crate::config::ClientConfig;
use crate::storage::LocalStorage;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = ClientConfig::from_env()?.with_api_url(cli.api_url.clone());

    // Logs go to stderr so command output stays pipeable
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    debug!(
        "Using API {} and storage {}",
        config.api_url,
        config.storage_path.display()
    );

    let session = Session {
        client: TrackerClient::new(config.api_url)?,
        storage: LocalStorage::new(config.storage_path),
    };

    match cli.command {
        Commands::Companies { command } => commands::companies(&session, command).await?,
        Commands::Contacts { command } => commands::contacts(&session, command).await?,
        Commands::Applications { command } => commands::applications(&session, command).await?,
        Commands::Link {
            application_id,
            contact_id,
            role,
        } => commands::link(&session, &application_id, &contact_id, role.as_deref()).await?,
        Commands::Unlink { link_id } => commands::unlink(&session, &link_id).await?,
        Commands::SetRole { link_id, role } => {
            commands::set_role(&session, &link_id, role.as_deref()).await?
        }
        Commands::Referral {
            application_id,
            contact,
        } => commands::referral(&session, &application_id, &contact).await?,
        Commands::Settings { command } => commands::settings(&session, command)?,
    }

    Ok(())
}

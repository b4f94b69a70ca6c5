use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::path::PathBuf;

mod cli;

use cli::commands::{handle_env_command, handle_records_command};
use cli::{Cli, Commands};
use zoho_crm::{Zoho, ZohoClient, ZohoConfig, ZohoHttpClient};

const DEFAULT_LOG_FILE: &str = "zoho-crm.log";

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ZohoConfig::load_from(path)?,
        None => ZohoConfig::load()?,
    };

    // Initialize logger to file (truncate on each run)
    let log_path = config
        .application_log_file_path
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file: {}", log_path.display()))?;
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    info!("Starting zoho-crm {}", Zoho::VERSION);

    match cli.command {
        Commands::Env => handle_env_command(&config),
        Commands::Records(args) => {
            let http: ZohoHttpClient = Zoho::new().initialize(&config, None)?;
            let client = ZohoClient::new(http, cli.module);
            handle_records_command(&client, args).await
        }
    }
}

use super::commands::RecordCommands;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "zoho-crm")]
#[command(about = "A CLI tool for working with Zoho CRM records", version)]
pub struct Cli {
    /// TOML config file (defaults to the per-user config, then ZOHO_* variables)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Module API name the record commands operate on
    #[arg(short, long, global = true, default_value = "Leads")]
    pub module: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the resolved environment and client settings
    Env,
    /// Create, read, search, update and delete records
    Records(RecordCommands),
}

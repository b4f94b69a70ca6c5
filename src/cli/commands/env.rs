//! Show what the client would start with

use anyhow::Result;
use colored::*;

use zoho_crm::api::{ClientConfig, Zoho};
use zoho_crm::config::{ProcessEnv, TokenStore, ZohoConfig};

pub fn handle_env_command(config: &ZohoConfig) -> Result<()> {
    let client_config = Zoho::new().client_config(config, None, &ProcessEnv)?;
    print_client_config(&client_config);
    Ok(())
}

fn print_client_config(client_config: &ClientConfig) {
    let environment = &client_config.environment;

    println!("{} {}", "Environment:".bold(), environment.to_string().bright_green());
    println!("  API domain:   {}", environment.api_domain().cyan());
    println!("  Accounts URL: {}", environment.accounts_url().cyan());
    println!("{} {}", "User:".bold(), client_config.user.email);
    println!("{} {:?}", "Auth flow:".bold(), client_config.token.flow());

    match &client_config.store {
        TokenStore::File { path } => {
            println!("{} file {}", "Token store:".bold(), path.display());
        }
        TokenStore::Db(db) => {
            println!(
                "{} db {}@{}:{}/{} (table {})",
                "Token store:".bold(),
                db.user_name,
                db.host,
                db.port,
                db.database_name,
                db.table_name
            );
        }
    }

    let sdk = &client_config.sdk_config;
    println!("{}", "Client settings:".bold());
    println!("  SSL verification:     {}", sdk.ssl_verification);
    println!("  Auto refresh fields:  {}", sdk.auto_refresh_fields);
    println!("  Pick list validation: {}", sdk.pick_list_validation);
    println!("  Connection timeout:   {}", format_timeout(sdk.connection_timeout));
    println!("  Timeout:              {}", format_timeout(sdk.timeout));
}

fn format_timeout(timeout: Option<std::time::Duration>) -> String {
    match timeout {
        Some(t) => format!("{}s", t.as_secs()),
        None => "none".dimmed().to_string(),
    }
}

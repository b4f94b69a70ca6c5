use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use colored::*;
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

use zoho_crm::api::{
    LeadConverter, NormalizedResult, Pagination, Record, RecordOperations, SearchBy, SuccessResponse,
    ZohoClient, DEFAULT_PER_PAGE,
};

#[derive(Args)]
pub struct RecordCommands {
    #[command(subcommand)]
    pub command: RecordSubcommands,
}

#[derive(Args)]
pub struct PageArgs {
    /// Page number, starting at 1
    #[arg(long, default_value_t = 1)]
    pub page: u32,
    /// Records per page
    #[arg(long, default_value_t = DEFAULT_PER_PAGE)]
    pub per_page: u32,
}

impl From<&PageArgs> for Pagination {
    fn from(args: &PageArgs) -> Self {
        Pagination::new(args.page, args.per_page)
    }
}

#[derive(Args)]
#[group(required = true, multiple = false)]
pub struct SearchArgs {
    /// Criteria expression, e.g. "(Last_Name:equals:Doe)"
    #[arg(long)]
    pub criteria: Option<String>,
    /// Free-text word
    #[arg(long)]
    pub word: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
}

impl SearchArgs {
    fn into_search(self) -> Option<SearchBy> {
        self.criteria
            .map(SearchBy::Criteria)
            .or(self.word.map(SearchBy::Word))
            .or(self.phone.map(SearchBy::Phone))
            .or(self.email.map(SearchBy::Email))
    }
}

#[derive(Subcommand)]
pub enum RecordSubcommands {
    /// Fetch a single record
    Get {
        id: String,
    },
    /// List records page by page
    List {
        #[command(flatten)]
        page: PageArgs,
    },
    /// Search records by criteria, word, phone or email
    Search {
        #[command(flatten)]
        search: SearchArgs,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Create a record from key=value fields
    Create {
        /// Field as key=value; JSON values are accepted (Annual_Revenue=5000)
        #[arg(short, long = "field", required = true)]
        fields: Vec<String>,
    },
    /// Update fields of an existing record
    Update {
        id: String,
        #[arg(short, long = "field", required = true)]
        fields: Vec<String>,
    },
    /// Delete one or more records
    Delete {
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Create many records from a JSON array of objects
    BulkCreate {
        file: PathBuf,
    },
    /// Convert a lead into a contact (and optionally an account and deal)
    Convert {
        id: String,
        #[arg(long)]
        overwrite: bool,
        #[arg(long)]
        notify_lead_owner: bool,
        #[arg(long)]
        notify_new_entity_owner: bool,
        /// Existing account id to attach the contact to
        #[arg(long)]
        account: Option<String>,
        /// Existing contact id to merge into
        #[arg(long)]
        contact: Option<String>,
        /// User id to own the new records
        #[arg(long)]
        assign_to: Option<String>,
    },
}

pub async fn handle_records_command<O: RecordOperations>(client: &ZohoClient<O>, args: RecordCommands) -> Result<()> {
    println!("📦 Module: {}", client.module_api_name().bright_green().bold());

    match args.command {
        RecordSubcommands::Get { id } => match client.get_record(&id).await {
            Some(record) => print_json(&record),
            None => {
                println!("{} record {} not found", "✗".red(), id);
                Ok(())
            }
        },
        RecordSubcommands::List { page } => {
            let records = client.get_records(Pagination::from(&page)).await;
            print_records(&records)
        }
        RecordSubcommands::Search { search, page } => {
            let search = search
                .into_search()
                .context("One of --criteria, --word, --phone or --email is required")?;
            let records = client.search_records(search, Pagination::from(&page)).await;
            print_records(&records)
        }
        RecordSubcommands::Create { fields } => {
            let fields = parse_fields(&fields)?;
            print_outcome(client.create(fields).await)
        }
        RecordSubcommands::Update { id, fields } => {
            let mut record = Record::with_id(id);
            for (key, value) in parse_fields(&fields)? {
                record.add_key_value(key, value);
            }
            print_outcome(client.update(record).await)
        }
        RecordSubcommands::Delete { ids } => print_outcome(client.delete(&ids).await),
        RecordSubcommands::BulkCreate { file } => {
            let content = fs::read_to_string(&file)
                .with_context(|| format!("Failed to read records file: {}", file.display()))?;
            let records: Vec<Record> = serde_json::from_str(&content)
                .with_context(|| format!("Expected a JSON array of objects in {}", file.display()))?;

            let results = client.bulk_create(records).await;
            let succeeded = results.iter().filter(|r| r.is_success()).count();
            println!(
                "{} {} created, {} failed",
                "✓".green(),
                succeeded,
                results.len() - succeeded
            );
            print_json(&results)
        }
        RecordSubcommands::Convert {
            id,
            overwrite,
            notify_lead_owner,
            notify_new_entity_owner,
            account,
            contact,
            assign_to,
        } => {
            let converter = LeadConverter {
                overwrite: Some(overwrite),
                notify_lead_owner: Some(notify_lead_owner),
                notify_new_entity_owner: Some(notify_new_entity_owner),
                accounts: account,
                contacts: contact,
                assign_to,
                deals: None,
            };

            match client.convert_lead(&id, vec![converter]).await {
                Some(converted) => {
                    println!("{} lead {} converted", "✓".green(), id);
                    print_json(&converted)
                }
                None => {
                    println!("{} lead {} was not converted, see the log for details", "✗".red(), id);
                    Ok(())
                }
            }
        }
    }
}

/// Parse `key=value` pairs; values that are valid JSON keep their type
pub fn parse_fields(fields: &[String]) -> Result<Vec<(String, Value)>> {
    fields
        .iter()
        .map(|field| {
            let (key, raw) = field
                .split_once('=')
                .with_context(|| format!("Field '{}' must be written as key=value", field))?;
            let key = key.trim();
            if key.is_empty() {
                anyhow::bail!("Field '{}' has an empty name", field);
            }

            let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
            Ok((key.to_string(), value))
        })
        .collect()
}

fn print_outcome(outcome: NormalizedResult<SuccessResponse>) -> Result<()> {
    match outcome {
        NormalizedResult::Success(success) => {
            println!("{} {}", "✓".green(), success.message);
            print_json(&success)
        }
        NormalizedResult::Failure { status, message } => {
            println!("{} {}: {}", "✗".red(), status.red().bold(), message);
            Ok(())
        }
        NormalizedResult::Empty => {
            println!("{} no result, see the log for details", "•".yellow());
            Ok(())
        }
    }
}

fn print_records(records: &[Record]) -> Result<()> {
    println!("📋 {} records", records.len());
    print_json(&records)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("Failed to format JSON output")?;
    println!("{}", rendered);
    Ok(())
}

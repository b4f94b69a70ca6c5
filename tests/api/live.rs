use anyhow::Result;
use zoho_crm::api::Pagination;
use zoho_crm::{Zoho, ZohoClient, ZohoConfig, ZohoHttpClient};

#[tokio::test]
#[ignore] // Requires a real access token in .env
async fn test_list_leads_with_real_credentials() -> Result<()> {
    dotenvy::dotenv().ok();
    let config = ZohoConfig::from_env(&zoho_crm::config::ProcessEnv)?;

    let http: ZohoHttpClient = Zoho::new().initialize(&config, None)?;
    let client = ZohoClient::new(http, "Leads");

    let records = client.get_records(Pagination::new(1, 5)).await;
    assert!(records.len() <= 5);
    Ok(())
}

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;
use zoho_crm::api::{Initialize, ClientConfig};
use zoho_crm::auth::{AuthFlowType, AuthToken};
use zoho_crm::config::{DataCenter, Environment, TokenStore};
use zoho_crm::{Zoho, ZohoConfig, ZohoHttpClient};

const CONFIG: &str = r#"
resourcePath = "/srv/zoho"
current_user_email = "ops@example.com"
token_persistence_method = "db"
token_persistence_tablename = "zoho_tokens"
auth_flow_type = "refreshToken"
client_id = "1000.ABC"
client_secret = "s3cret"
redirect_uri = "https://example.com/oauth/callback"
token = "1000.refresh"
datacenter = "EUDataCenter"
environment = true
enableSSLVerification = false
connectionTimeout = 5
timeout = 30
"#;

fn write_config(content: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("zoho-crm-{}.toml", uuid::Uuid::new_v4()));
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_config_file_assembles_client_config() {
    let path = write_config(CONFIG);
    let config = ZohoConfig::load_from(&path).unwrap();
    std::fs::remove_file(&path).ok();

    let env: HashMap<&str, &str> = [("DB_HOST", "db.internal"), ("DB_PORT", "3307")].into_iter().collect();
    let client_config = Zoho::new().ignore_routes().client_config(&config, None, &env).unwrap();

    assert_eq!(client_config.environment, DataCenter::Eu.sandbox());
    assert_eq!(client_config.environment.api_domain(), "https://sandbox.zohoapis.eu");
    assert_eq!(client_config.user.email, "ops@example.com");
    assert_eq!(client_config.resource_path, PathBuf::from("/srv/zoho"));
    assert_eq!(client_config.token.flow(), AuthFlowType::RefreshToken);
    assert_eq!(client_config.token.client_id(), Some("1000.ABC"));
    assert!(client_config.host.runs_migrations);
    assert!(!client_config.host.registers_routes);

    let TokenStore::Db(db) = &client_config.store else {
        panic!("expected a database token store");
    };
    assert_eq!(db.host, "db.internal");
    assert_eq!(db.port, 3307);
    assert_eq!(db.table_name, "zoho_tokens");

    assert!(!client_config.sdk_config.ssl_verification);
    assert_eq!(client_config.sdk_config.connection_timeout, Some(Duration::from_secs(5)));
    assert_eq!(client_config.sdk_config.timeout, Some(Duration::from_secs(30)));
}

#[test]
fn test_grant_code_replaces_configured_token() {
    let config = ZohoConfig::from_toml_str(CONFIG).unwrap();
    let env: HashMap<&str, &str> = HashMap::new();

    let client_config = Zoho::new().client_config(&config, Some("1000.grant"), &env).unwrap();

    match client_config.token {
        AuthToken::RefreshToken { refresh_token, .. } => assert_eq!(refresh_token, "1000.grant"),
        other => panic!("unexpected token {:?}", other),
    }
}

#[test]
fn test_environment_override_wins() {
    let config = ZohoConfig::from_toml_str(CONFIG).unwrap();
    let env: HashMap<&str, &str> = HashMap::new();

    let client_config = Zoho::new()
        .use_environment(Environment::resolve(DataCenter::In, false))
        .client_config(&config, None, &env)
        .unwrap();

    assert_eq!(client_config.environment.api_domain(), "https://www.zohoapis.in");
}

#[test]
fn test_missing_config_file_is_an_error() {
    let path = std::env::temp_dir().join(format!("zoho-crm-missing-{}.toml", uuid::Uuid::new_v4()));
    assert!(ZohoConfig::load_from(&path).is_err());
}

#[test]
fn test_http_client_requires_access_token() {
    let mut config = ZohoConfig::from_toml_str(CONFIG).unwrap();
    config.token_persistence_method = "file".to_string().into();
    let env: HashMap<&str, &str> = HashMap::new();

    let refresh: ClientConfig = Zoho::new().client_config(&config, None, &env).unwrap();
    assert!(ZohoHttpClient::initialize(refresh).is_err());

    config.auth_flow_type = AuthFlowType::AccessToken;
    config.token = "1000.access".into();
    let access = Zoho::new().client_config(&config, None, &env).unwrap();
    let client = ZohoHttpClient::initialize(access).unwrap();
    assert_eq!(client.api_domain(), "https://sandbox.zohoapis.eu");
}

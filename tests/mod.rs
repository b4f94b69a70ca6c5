/// Integration tests for zoho-crm
///
/// - api: record facade driven through a scripted binding
/// - config: configuration files assembled into client configuration
mod api;
mod config;

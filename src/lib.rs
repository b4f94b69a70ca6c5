pub mod api;
pub mod auth;
pub mod config;

pub use api::{NormalizedResult, Record, Zoho, ZohoClient, ZohoHttpClient};
pub use config::ZohoConfig;

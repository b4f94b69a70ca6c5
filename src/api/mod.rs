//! Zoho CRM record API module
//!
//! The record facade ([`ZohoClient`]) sits on top of any [`RecordOperations`]
//! binding and normalizes everything it returns. [`ZohoHttpClient`] is the
//! HTTPS binding; [`Zoho`] assembles the configuration it starts from.

pub mod client;
pub mod constants;
pub mod http;
pub mod manager;
pub mod models;
pub mod normalizer;
pub mod operations;
pub mod response;

pub use client::ZohoClient;
pub use http::ZohoHttpClient;
pub use manager::{ClientConfig, HostIntegration, Initialize, LogConfig, SdkConfig, UserSignature, Zoho};
pub use models::{
    ActionError, ActionResponse, ApiException, LeadConverter, Record, SuccessResponse, SuccessfulConvert,
    Trigger,
};
pub use operations::{DEFAULT_PER_PAGE, Pagination, ParameterMap, RecordOperations, SearchBy};
pub use response::{ApiResponse, NormalizedResult, ResponseBody};

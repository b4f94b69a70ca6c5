//! API constants for the Zoho CRM record API

/// Record API version
pub const API_VERSION: &str = "v2";

/// Base API path
pub const API_BASE_PATH: &str = "/crm";

/// Full API path with version
pub fn api_path() -> String {
    format!("{}/{}", API_BASE_PATH, API_VERSION)
}

/// Module lead conversion always runs against
pub const LEADS_MODULE: &str = "Leads";

pub mod headers {
    /// Authorization scheme for OAuth access tokens
    pub const AUTHORIZATION_SCHEME: &str = "Zoho-oauthtoken";

    pub const CONTENT_TYPE_JSON: &str = "application/json";

    /// Correlation id attached to every request for log matching
    pub const X_CORRELATION_ID: &str = "X-Correlation-ID";
}

pub fn user_agent() -> String {
    format!("zoho-crm/{}", env!("CARGO_PKG_VERSION"))
}

/// `POST`/`PUT`/`DELETE`/`GET` on a module
pub fn module_endpoint(api_domain: &str, module: &str) -> String {
    format!("{}{}/{}", api_domain, api_path(), urlencoding::encode(module))
}

pub fn record_endpoint(api_domain: &str, module: &str, id: &str) -> String {
    format!("{}/{}", module_endpoint(api_domain, module), urlencoding::encode(id))
}

pub fn search_endpoint(api_domain: &str, module: &str) -> String {
    format!("{}/search", module_endpoint(api_domain, module))
}

pub fn convert_endpoint(api_domain: &str, lead_id: &str) -> String {
    format!("{}/actions/convert", record_endpoint(api_domain, LEADS_MODULE, lead_id))
}

//! HTTPS binding of [`RecordOperations`] for the Zoho CRM v2 record API
//!
//! Requests are authorized with a pre-issued access token. Token exchange
//! and refresh are outside this crate, so the binding refuses to start from
//! refresh or grant token configurations.

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::debug;
use reqwest::{Method, RequestBuilder};
use serde_json::Value;
use std::time::{Duration, Instant};

use super::constants::{self, headers};
use super::manager::{ClientConfig, Initialize, SdkConfig};
use super::models::{
    ActionResponse, ActionWrapper, ApiException, BodyWrapper, ConvertActionResponse,
    ConvertActionWrapper, ConvertBodyWrapper, RecordResponseWrapper,
};
use super::operations::{ParameterMap, RecordOperations};
use super::response::{ApiResponse, ResponseBody, STATUS_NO_CONTENT, STATUS_NOT_MODIFIED};

/// Envelope family an endpoint answers with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    Records,
    Action,
    Convert,
}

/// Record API client over HTTPS with connection pooling
#[derive(Clone)]
pub struct ZohoHttpClient {
    api_domain: String,
    access_token: String,
    http_client: reqwest::Client,
}

impl ZohoHttpClient {
    pub fn new(api_domain: impl Into<String>, access_token: impl Into<String>, sdk_config: &SdkConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .danger_accept_invalid_certs(!sdk_config.ssl_verification)
            .user_agent(constants::user_agent());

        if let Some(timeout) = sdk_config.connection_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = sdk_config.timeout {
            builder = builder.timeout(timeout);
        }

        let http_client = builder.build().context("Failed to build HTTP client")?;
        Ok(Self::with_custom_client(api_domain, access_token, http_client))
    }

    /// Create a client around an existing HTTP client
    pub fn with_custom_client(
        api_domain: impl Into<String>,
        access_token: impl Into<String>,
        http_client: reqwest::Client,
    ) -> Self {
        Self {
            api_domain: api_domain.into(),
            access_token: access_token.into(),
            http_client,
        }
    }

    pub fn api_domain(&self) -> &str {
        &self.api_domain
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.http_client
            .request(method, url)
            .header(
                "Authorization",
                format!("{} {}", headers::AUTHORIZATION_SCHEME, self.access_token),
            )
            .header("Accept", headers::CONTENT_TYPE_JSON)
    }

    async fn send(&self, kind: ResponseKind, request: RequestBuilder) -> Result<ApiResponse> {
        let correlation_id = uuid::Uuid::new_v4().to_string();
        let request = request
            .header(headers::X_CORRELATION_ID, &correlation_id)
            .build()
            .context("Failed to build request")?;

        debug!("[{}] {} {}", correlation_id, request.method(), request.url());
        let started = Instant::now();

        let response = self
            .http_client
            .execute(request)
            .await
            .context("Request to Zoho CRM failed")?;

        let status_code = response.status().as_u16();
        let text = response.text().await.context("Failed to read response body")?;

        debug!(
            "[{}] {} in {}ms ({} bytes)",
            correlation_id,
            status_code,
            started.elapsed().as_millis(),
            text.len()
        );

        Ok(parse_body(kind, status_code, &text))
    }
}

impl Initialize for ZohoHttpClient {
    fn initialize(config: ClientConfig) -> Result<Self> {
        let Some(access_token) = config.token.access_token() else {
            anyhow::bail!(
                "The HTTP client needs the accessToken auth flow, got {:?}",
                config.token.flow()
            );
        };

        Self::new(config.environment.api_domain(), access_token, &config.sdk_config)
    }
}

#[async_trait]
impl RecordOperations for ZohoHttpClient {
    async fn create_records(&self, module: &str, body: &BodyWrapper) -> Result<ApiResponse> {
        let url = constants::module_endpoint(&self.api_domain, module);
        self.send(ResponseKind::Action, self.request(Method::POST, &url).json(body))
            .await
    }

    async fn update_records(&self, module: &str, body: &BodyWrapper) -> Result<ApiResponse> {
        let url = constants::module_endpoint(&self.api_domain, module);
        self.send(ResponseKind::Action, self.request(Method::PUT, &url).json(body))
            .await
    }

    async fn delete_records(&self, module: &str, params: &ParameterMap) -> Result<ApiResponse> {
        let url = constants::module_endpoint(&self.api_domain, module);
        self.send(
            ResponseKind::Action,
            self.request(Method::DELETE, &url).query(&params.to_query_pairs()),
        )
        .await
    }

    async fn get_record(&self, id: &str, module: &str) -> Result<ApiResponse> {
        let url = constants::record_endpoint(&self.api_domain, module, id);
        self.send(ResponseKind::Records, self.request(Method::GET, &url)).await
    }

    async fn get_records(&self, module: &str, params: &ParameterMap) -> Result<ApiResponse> {
        let url = constants::module_endpoint(&self.api_domain, module);
        self.send(
            ResponseKind::Records,
            self.request(Method::GET, &url).query(&params.to_query_pairs()),
        )
        .await
    }

    async fn search_records(&self, module: &str, params: &ParameterMap) -> Result<ApiResponse> {
        let url = constants::search_endpoint(&self.api_domain, module);
        self.send(
            ResponseKind::Records,
            self.request(Method::GET, &url).query(&params.to_query_pairs()),
        )
        .await
    }

    async fn convert_lead(&self, id: &str, body: &ConvertBodyWrapper) -> Result<ApiResponse> {
        let url = constants::convert_endpoint(&self.api_domain, id);
        self.send(ResponseKind::Convert, self.request(Method::POST, &url).json(body))
            .await
    }
}

/// Map a raw HTTP response onto the response envelope for `kind`.
///
/// Anything that is neither a `data` wrapper nor an error object comes back
/// with `expected == false`.
pub fn parse_body(kind: ResponseKind, status_code: u16, text: &str) -> ApiResponse {
    if matches!(status_code, STATUS_NO_CONTENT | STATUS_NOT_MODIFIED) {
        return ApiResponse::no_body(status_code);
    }

    let Ok(json) = serde_json::from_str::<Value>(text) else {
        debug!("Unreadable {} response body", status_code);
        return ApiResponse::unexpected(status_code);
    };

    let body = match json.get("data") {
        Some(Value::Array(_)) => parse_data(kind, status_code, json),
        _ => parse_exception(json),
    };

    match body {
        Some(body) => ApiResponse::new(status_code, body),
        None => ApiResponse::unexpected(status_code),
    }
}

fn parse_data(kind: ResponseKind, status_code: u16, mut json: Value) -> Option<ResponseBody> {
    match kind {
        ResponseKind::Records if (200..300).contains(&status_code) => {
            serde_json::from_value::<RecordResponseWrapper>(json)
                .ok()
                .map(ResponseBody::Records)
        }
        // A failed fetch reports its error as the first data entry
        ResponseKind::Records => {
            let first = json.get_mut("data")?.as_array_mut()?.drain(..).next()?;
            parse_exception(first)
        }
        ResponseKind::Action => {
            let data = take_data(&mut json)?
                .into_iter()
                .map(ActionResponse::from_value)
                .collect::<serde_json::Result<Vec<_>>>()
                .ok()?;
            Some(ResponseBody::Action(ActionWrapper { data }))
        }
        ResponseKind::Convert => {
            let data = take_data(&mut json)?
                .into_iter()
                .map(ConvertActionResponse::from_value)
                .collect::<serde_json::Result<Vec<_>>>()
                .ok()?;
            Some(ResponseBody::Convert(ConvertActionWrapper { data }))
        }
    }
}

fn take_data(json: &mut Value) -> Option<Vec<Value>> {
    match json.get_mut("data")?.take() {
        Value::Array(data) => Some(data),
        _ => None,
    }
}

fn parse_exception(json: Value) -> Option<ResponseBody> {
    let looks_like_error = json.get("code").is_some()
        || json.get("status").and_then(|s| s.as_str()) == Some("error");

    if !looks_like_error {
        return None;
    }

    serde_json::from_value::<ApiException>(json)
        .ok()
        .map(ResponseBody::Exception)
}

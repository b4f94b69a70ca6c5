//! The record API seam
//!
//! Every transport-level concern lives behind this trait. The facade only
//! builds request bodies and parameter maps and normalizes what comes back.

use async_trait::async_trait;

use super::params::ParameterMap;
use crate::api::models::{BodyWrapper, ConvertBodyWrapper};
use crate::api::response::ApiResponse;

/// Record operations offered by a CRM binding.
///
/// An `Err` means the request never produced a readable response
/// (connection failure, TLS error, ...). CRM-level errors come back as an
/// [`ApiResponse`] carrying an exception or error entries.
#[async_trait]
pub trait RecordOperations: Send + Sync {
    async fn create_records(&self, module: &str, body: &BodyWrapper) -> anyhow::Result<ApiResponse>;

    async fn update_records(&self, module: &str, body: &BodyWrapper) -> anyhow::Result<ApiResponse>;

    async fn delete_records(&self, module: &str, params: &ParameterMap) -> anyhow::Result<ApiResponse>;

    async fn get_record(&self, id: &str, module: &str) -> anyhow::Result<ApiResponse>;

    async fn get_records(&self, module: &str, params: &ParameterMap) -> anyhow::Result<ApiResponse>;

    async fn search_records(&self, module: &str, params: &ParameterMap) -> anyhow::Result<ApiResponse>;

    async fn convert_lead(&self, id: &str, body: &ConvertBodyWrapper) -> anyhow::Result<ApiResponse>;
}

#[async_trait]
impl<T: RecordOperations + ?Sized> RecordOperations for std::sync::Arc<T> {
    async fn create_records(&self, module: &str, body: &BodyWrapper) -> anyhow::Result<ApiResponse> {
        (**self).create_records(module, body).await
    }

    async fn update_records(&self, module: &str, body: &BodyWrapper) -> anyhow::Result<ApiResponse> {
        (**self).update_records(module, body).await
    }

    async fn delete_records(&self, module: &str, params: &ParameterMap) -> anyhow::Result<ApiResponse> {
        (**self).delete_records(module, params).await
    }

    async fn get_record(&self, id: &str, module: &str) -> anyhow::Result<ApiResponse> {
        (**self).get_record(id, module).await
    }

    async fn get_records(&self, module: &str, params: &ParameterMap) -> anyhow::Result<ApiResponse> {
        (**self).get_records(module, params).await
    }

    async fn search_records(&self, module: &str, params: &ParameterMap) -> anyhow::Result<ApiResponse> {
        (**self).search_records(module, params).await
    }

    async fn convert_lead(&self, id: &str, body: &ConvertBodyWrapper) -> anyhow::Result<ApiResponse> {
        (**self).convert_lead(id, body).await
    }
}

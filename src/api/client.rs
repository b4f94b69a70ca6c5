use log::{debug, error};
use serde_json::Value;

use super::models::{
    ActionResponse, BodyWrapper, ConvertBodyWrapper, LeadConverter, Record, SuccessResponse,
    SuccessfulConvert, Trigger,
};
use super::normalizer::{
    normalize_action_response, normalize_bulk_response, normalize_convert_response,
    normalize_list_response,
};
use super::operations::{Pagination, Param, ParameterMap, RecordOperations, SearchBy};
use super::response::{ApiResponse, NormalizedResult};

/// Record facade bound to one CRM module (`Leads`, `Contacts`, ...)
///
/// Errors from the underlying binding are logged and absorbed; callers only
/// ever see a [`NormalizedResult`], an `Option` or a (possibly empty) `Vec`.
#[derive(Clone)]
pub struct ZohoClient<O> {
    operations: O,
    module_api_name: String,
}

impl<O: RecordOperations> ZohoClient<O> {
    pub fn new(operations: O, module_api_name: impl Into<String>) -> Self {
        Self {
            operations,
            module_api_name: module_api_name.into(),
        }
    }

    pub fn module_api_name(&self) -> &str {
        &self.module_api_name
    }

    pub fn operations(&self) -> &O {
        &self.operations
    }

    /// Same binding, different module
    pub fn for_module(&self, module_api_name: impl Into<String>) -> Self
    where
        O: Clone,
    {
        Self::new(self.operations.clone(), module_api_name)
    }

    /// Create one record from plain field/value pairs
    pub async fn create<K, V, I>(&self, fields: I) -> NormalizedResult<SuccessResponse>
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        let record: Record = fields.into_iter().collect();
        debug!("Creating {} record with {} fields", self.module_api_name, record.len());

        let body = BodyWrapper::new(vec![record]);
        let response = absorb(
            "create",
            self.operations.create_records(&self.module_api_name, &body).await,
        );
        normalize_action_response(response.as_ref())
    }

    /// Submit an already populated record as-is
    pub async fn update(&self, record: Record) -> NormalizedResult<SuccessResponse> {
        debug!("Updating {} record {:?}", self.module_api_name, record.id());

        let body = BodyWrapper::new(vec![record]);
        let response = absorb(
            "update",
            self.operations.update_records(&self.module_api_name, &body).await,
        );
        normalize_action_response(response.as_ref())
    }

    pub async fn delete_record(&self, record_id: &str) -> NormalizedResult<SuccessResponse> {
        self.delete(&[record_id]).await
    }

    /// Delete several records in a single request
    pub async fn delete<S: AsRef<str>>(&self, record_ids: &[S]) -> NormalizedResult<SuccessResponse> {
        let mut params = ParameterMap::new();
        for id in record_ids {
            params.add(Param::Ids, id.as_ref());
        }
        debug!("Deleting {} {} records", record_ids.len(), self.module_api_name);

        let response = absorb(
            "delete",
            self.operations.delete_records(&self.module_api_name, &params).await,
        );
        normalize_action_response(response.as_ref())
    }

    /// Fetch one record by id, `None` when the id is empty or nothing usable came back
    pub async fn get_record(&self, record_id: &str) -> Option<Record> {
        if record_id.trim().is_empty() {
            error!("getRecord: Record ID must not be empty or null.");
            return None;
        }

        let response = absorb(
            "get_record",
            self.operations.get_record(record_id, &self.module_api_name).await,
        );
        let record = normalize_list_response(response.as_ref()).into_iter().next();

        if record.is_none() {
            error!("getRecord: Failed to fetch record {} from Zoho.", record_id);
        }
        record
    }

    pub async fn get_records(&self, pagination: Pagination) -> Vec<Record> {
        let mut params = ParameterMap::new();
        pagination.apply(&mut params);

        let response = absorb(
            "get_records",
            self.operations.get_records(&self.module_api_name, &params).await,
        );
        normalize_list_response(response.as_ref())
    }

    pub async fn search_records(&self, search: SearchBy, pagination: Pagination) -> Vec<Record> {
        let mut params = ParameterMap::new();
        search.apply(&mut params);
        pagination.apply(&mut params);

        let response = absorb(
            "search_records",
            self.operations.search_records(&self.module_api_name, &params).await,
        );
        normalize_list_response(response.as_ref())
    }

    /// Search with a criteria expression such as `(Email:equals:jane@example.com)`
    pub async fn search_records_by_criteria(&self, criteria: &str, pagination: Pagination) -> Vec<Record> {
        self.search_records(SearchBy::Criteria(criteria.to_string()), pagination).await
    }

    pub async fn search_records_by_word(&self, word: &str, pagination: Pagination) -> Vec<Record> {
        self.search_records(SearchBy::Word(word.to_string()), pagination).await
    }

    pub async fn search_records_by_phone(&self, phone: &str, pagination: Pagination) -> Vec<Record> {
        self.search_records(SearchBy::Phone(phone.to_string()), pagination).await
    }

    pub async fn search_records_by_email(&self, email: &str, pagination: Pagination) -> Vec<Record> {
        self.search_records(SearchBy::Email(email.to_string()), pagination).await
    }

    pub async fn convert_lead(&self, lead_id: &str, data: Vec<LeadConverter>) -> Option<SuccessfulConvert> {
        let body = ConvertBodyWrapper { data };
        let response = absorb("convert_lead", self.operations.convert_lead(lead_id, &body).await);
        normalize_convert_response(response.as_ref())
    }

    /// Create many records in one request with approval, workflow and
    /// blueprint triggers enabled. Returns one entry per submitted record.
    pub async fn bulk_create(&self, records: Vec<Record>) -> Vec<ActionResponse> {
        debug!("Bulk creating {} {} records", records.len(), self.module_api_name);

        let body = BodyWrapper::new(records)
            .with_trigger(vec![Trigger::Approval, Trigger::Workflow, Trigger::Blueprint]);
        let response = absorb(
            "bulk_create",
            self.operations.create_records(&self.module_api_name, &body).await,
        );
        normalize_bulk_response(response.as_ref())
    }
}

/// Binding errors are logged and treated as an absent response
fn absorb(operation: &str, result: anyhow::Result<ApiResponse>) -> Option<ApiResponse> {
    match result {
        Ok(response) => Some(response),
        Err(e) => {
            error!("{} request failed: {:#}", operation, e);
            None
        }
    }
}

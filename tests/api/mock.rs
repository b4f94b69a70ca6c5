//! Scripted in-memory record binding

use anyhow::Result;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use zoho_crm::api::models::{BodyWrapper, ConvertBodyWrapper};
use zoho_crm::api::{ApiResponse, ParameterMap, RecordOperations};

/// A call the facade made, with the arguments it passed
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Create { module: String, body: BodyWrapper },
    Update { module: String, body: BodyWrapper },
    Delete { module: String, params: ParameterMap },
    GetRecord { id: String, module: String },
    GetRecords { module: String, params: ParameterMap },
    Search { module: String, params: ParameterMap },
    Convert { id: String, body: ConvertBodyWrapper },
}

/// Replies come back in the order they were queued
#[derive(Default)]
pub struct MockOperations {
    replies: Mutex<VecDeque<Result<ApiResponse>>>,
    calls: Mutex<Vec<Call>>,
}

impl MockOperations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, response: ApiResponse) -> Self {
        self.replies.lock().unwrap().push_back(Ok(response));
        self
    }

    pub fn fail(self, message: &str) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Err(anyhow::anyhow!(message.to_string())));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) -> Result<ApiResponse> {
        self.calls.lock().unwrap().push(call);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(ApiResponse::no_body(204)))
    }
}

#[async_trait]
impl RecordOperations for MockOperations {
    async fn create_records(&self, module: &str, body: &BodyWrapper) -> Result<ApiResponse> {
        self.record(Call::Create {
            module: module.to_string(),
            body: body.clone(),
        })
    }

    async fn update_records(&self, module: &str, body: &BodyWrapper) -> Result<ApiResponse> {
        self.record(Call::Update {
            module: module.to_string(),
            body: body.clone(),
        })
    }

    async fn delete_records(&self, module: &str, params: &ParameterMap) -> Result<ApiResponse> {
        self.record(Call::Delete {
            module: module.to_string(),
            params: params.clone(),
        })
    }

    async fn get_record(&self, id: &str, module: &str) -> Result<ApiResponse> {
        self.record(Call::GetRecord {
            id: id.to_string(),
            module: module.to_string(),
        })
    }

    async fn get_records(&self, module: &str, params: &ParameterMap) -> Result<ApiResponse> {
        self.record(Call::GetRecords {
            module: module.to_string(),
            params: params.clone(),
        })
    }

    async fn search_records(&self, module: &str, params: &ParameterMap) -> Result<ApiResponse> {
        self.record(Call::Search {
            module: module.to_string(),
            params: params.clone(),
        })
    }

    async fn convert_lead(&self, id: &str, body: &ConvertBodyWrapper) -> Result<ApiResponse> {
        self.record(Call::Convert {
            id: id.to_string(),
            body: body.clone(),
        })
    }
}

//! Record and envelope models for the Zoho CRM record API

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single CRM record: a flat set of named fields.
///
/// New records are built field by field with [`Record::add_key_value`];
/// records fetched from the CRM are passed back unchanged for updates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: Map<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a record that updates the CRM record with the given id
    pub fn with_id(id: impl Into<String>) -> Self {
        let id: String = id.into();
        let mut record = Self::new();
        record.add_key_value("id", id);
        record
    }

    pub fn add_key_value(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(key.into(), value.into());
    }

    pub fn get_key_value(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn id(&self) -> Option<&str> {
        self.fields.get("id").and_then(|id| id.as_str())
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (key, value) in iter {
            record.add_key_value(key, value);
        }
        record
    }
}

/// Workflow triggers that can be fired by a create request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trigger {
    Approval,
    Workflow,
    Blueprint,
}

/// Request body for create and update calls
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BodyWrapper {
    pub data: Vec<Record>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger: Option<Vec<Trigger>>,
}

impl BodyWrapper {
    pub fn new(data: Vec<Record>) -> Self {
        Self { data, trigger: None }
    }

    pub fn with_trigger(mut self, trigger: Vec<Trigger>) -> Self {
        self.trigger = Some(trigger);
        self
    }
}

/// Per-lead conversion instructions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeadConverter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overwrite: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify_lead_owner: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify_new_entity_owner: Option<bool>,
    /// Existing account id to attach the converted contact to
    #[serde(rename = "Accounts", skip_serializing_if = "Option::is_none")]
    pub accounts: Option<String>,
    /// Existing contact id to merge the lead into
    #[serde(rename = "Contacts", skip_serializing_if = "Option::is_none")]
    pub contacts: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assign_to: Option<String>,
    /// Deal to create during conversion
    #[serde(rename = "Deals", skip_serializing_if = "Option::is_none")]
    pub deals: Option<Record>,
}

/// Request body for lead conversion
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConvertBodyWrapper {
    pub data: Vec<LeadConverter>,
}

/// Successful outcome of a single create/update/delete entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SuccessResponse {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub details: Map<String, Value>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: String,
}

impl SuccessResponse {
    /// Id of the record the action touched, when the CRM reported it
    pub fn record_id(&self) -> Option<&str> {
        self.details.get("id").and_then(|id| id.as_str())
    }
}

/// Per-entry error reported inside an action wrapper
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionError {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

/// One entry of an action wrapper
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ActionResponse {
    Success(SuccessResponse),
    Error(ActionError),
}

impl ActionResponse {
    /// Classify a raw action entry by its `status` field
    pub fn from_value(value: Value) -> serde_json::Result<Self> {
        let is_success = value
            .get("status")
            .and_then(|s| s.as_str())
            .is_some_and(|s| s.eq_ignore_ascii_case("success"));

        if is_success {
            serde_json::from_value(value).map(ActionResponse::Success)
        } else {
            serde_json::from_value(value).map(ActionResponse::Error)
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ActionResponse::Success(_))
    }
}

/// Ids of the entities created or reused by a lead conversion
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SuccessfulConvert {
    #[serde(rename = "Contacts", default)]
    pub contacts: Option<String>,
    #[serde(rename = "Deals", default)]
    pub deals: Option<String>,
    #[serde(rename = "Accounts", default)]
    pub accounts: Option<String>,
}

/// One entry of a convert action wrapper
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ConvertActionResponse {
    Success(SuccessfulConvert),
    Error(ActionError),
}

impl ConvertActionResponse {
    pub fn from_value(value: Value) -> serde_json::Result<Self> {
        let is_error = value
            .get("status")
            .and_then(|s| s.as_str())
            .is_some_and(|s| s.eq_ignore_ascii_case("error"));

        if is_error {
            serde_json::from_value(value).map(ConvertActionResponse::Error)
        } else {
            serde_json::from_value(value).map(ConvertActionResponse::Success)
        }
    }
}

/// Paging metadata returned with record lists
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageInfo {
    #[serde(default)]
    pub per_page: Option<u32>,
    #[serde(default)]
    pub count: Option<u32>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub more_records: Option<bool>,
}

/// Body of get/search responses
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordResponseWrapper {
    pub data: Vec<Record>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<PageInfo>,
}

/// Body of create/update/delete responses
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ActionWrapper {
    pub data: Vec<ActionResponse>,
}

/// Body of lead conversion responses
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConvertActionWrapper {
    pub data: Vec<ConvertActionResponse>,
}

/// Request-level error reported by the CRM instead of a data wrapper
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiException {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

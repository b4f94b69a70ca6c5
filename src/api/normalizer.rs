//! Response normalization
//!
//! Collapses the binding's response taxonomy into the small set of outcomes
//! the record facade returns. Only the single-record mutate path ever yields a
//! [`NormalizedResult::Failure`]; list and bulk paths degrade to empty
//! collections and log instead.

use log::{error, warn};

use super::models::{ActionResponse, ConvertActionResponse, Record, SuccessResponse, SuccessfulConvert};
use super::response::{ApiResponse, NormalizedResult, ResponseBody, STATUS_NO_CONTENT};

const UNKNOWN_STATUS: &str = "unknown";
const UNKNOWN_MESSAGE: &str = "Unknown error";

/// Returns the body when the response is present, has one, and was expected
fn readable_body(response: Option<&ApiResponse>) -> Option<&ResponseBody> {
    let response = response?;

    if response.is_bodiless() {
        if response.status_code == STATUS_NO_CONTENT {
            warn!("No Content");
        } else {
            warn!("Not Modified");
        }
        return None;
    }

    if !response.expected {
        return None;
    }

    response.body.as_ref()
}

pub fn normalize_action_response(response: Option<&ApiResponse>) -> NormalizedResult<SuccessResponse> {
    match readable_body(response) {
        Some(ResponseBody::Action(wrapper)) => match wrapper.data.first() {
            Some(ActionResponse::Success(success)) => NormalizedResult::Success(success.clone()),
            Some(ActionResponse::Error(failure)) => NormalizedResult::Failure {
                status: failure.status.clone().unwrap_or_else(|| UNKNOWN_STATUS.to_string()),
                message: failure.message.clone().unwrap_or_else(|| UNKNOWN_MESSAGE.to_string()),
            },
            None => NormalizedResult::Empty,
        },
        Some(ResponseBody::Exception(exception)) => {
            error!("{}", exception.message);
            NormalizedResult::Empty
        }
        _ => NormalizedResult::Empty,
    }
}

/// Every entry of a bulk create, successes and errors alike, in request order
pub fn normalize_bulk_response(response: Option<&ApiResponse>) -> Vec<ActionResponse> {
    match readable_body(response) {
        Some(ResponseBody::Action(wrapper)) => wrapper.data.clone(),
        Some(ResponseBody::Exception(exception)) => {
            error!("{}", exception.message);
            Vec::new()
        }
        _ => Vec::new(),
    }
}

pub fn normalize_convert_response(response: Option<&ApiResponse>) -> Option<SuccessfulConvert> {
    match readable_body(response) {
        Some(ResponseBody::Convert(wrapper)) => match wrapper.data.first() {
            Some(ConvertActionResponse::Success(converted)) => Some(converted.clone()),
            _ => None,
        },
        Some(ResponseBody::Exception(exception)) => {
            error!("{}", exception.message);
            None
        }
        _ => None,
    }
}

/// Records found by a get or search call; never an error value
pub fn normalize_list_response(response: Option<&ApiResponse>) -> Vec<Record> {
    match readable_body(response) {
        Some(ResponseBody::Records(wrapper)) => wrapper.data.clone(),
        Some(ResponseBody::Exception(exception)) => {
            error!("{}", exception.message);
            Vec::new()
        }
        _ => Vec::new(),
    }
}

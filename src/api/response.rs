//! Response envelopes produced by a record API binding

use super::models::{ActionWrapper, ApiException, ConvertActionWrapper, RecordResponseWrapper};

pub const STATUS_NO_CONTENT: u16 = 204;
pub const STATUS_NOT_MODIFIED: u16 = 304;

/// Everything a binding can hand back for a single request
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Records(RecordResponseWrapper),
    Action(ActionWrapper),
    Convert(ConvertActionWrapper),
    Exception(ApiException),
}

/// Raw response of a record API call, before normalization
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status_code: u16,
    /// False when the payload could not be read as any known envelope
    pub expected: bool,
    pub body: Option<ResponseBody>,
}

impl ApiResponse {
    pub fn new(status_code: u16, body: ResponseBody) -> Self {
        Self {
            status_code,
            expected: true,
            body: Some(body),
        }
    }

    pub fn no_body(status_code: u16) -> Self {
        Self {
            status_code,
            expected: true,
            body: None,
        }
    }

    pub fn unexpected(status_code: u16) -> Self {
        Self {
            status_code,
            expected: false,
            body: None,
        }
    }

    /// 204 and 304 carry no body and must not be inspected further
    pub fn is_bodiless(&self) -> bool {
        matches!(self.status_code, STATUS_NO_CONTENT | STATUS_NOT_MODIFIED)
    }
}

/// Outcome of a single-record mutate call
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizedResult<T> {
    Success(T),
    Failure { status: String, message: String },
    Empty,
}

impl<T> NormalizedResult<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, NormalizedResult::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, NormalizedResult::Failure { .. })
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, NormalizedResult::Empty)
    }

    pub fn success(self) -> Option<T> {
        match self {
            NormalizedResult::Success(value) => Some(value),
            _ => None,
        }
    }
}

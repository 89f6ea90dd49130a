use thiserror::Error;

use crate::owner::owner_liveness::OwnerId;
use crate::request::property::{ErrorCategory, StatusCode};
use crate::request::request_id::RequestId;

#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum CallError {
    #[error("transport rejected the request ({category:?}): {reason}")]
    TransportRejected { category: ErrorCategory, reason: String },
    #[error("remote reported failure with status {status:?}")]
    RemoteReportedFailure { status: StatusCode },
    #[error("request {request_id} timed out")]
    TimedOut { request_id: RequestId },
    #[error("request {request_id} was cancelled")]
    Cancelled { request_id: RequestId },
    #[error("no pending request for id {request_id}")]
    UnknownRequest { request_id: RequestId },
    #[error("invalid request: {reason}")]
    InvalidRequest { reason: String },
    #[error("owner {owner_id} is unreachable")]
    OwnerUnreachable { owner_id: OwnerId },
}

impl CallError {
    pub fn is_timeout(&self) -> bool {
        return matches!(self, CallError::TimedOut { .. });
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum TransportError {
    #[error("transport unavailable: {0}")]
    Unavailable(String),
    #[error("transport returned status {0:?}")]
    ServiceSpecific(StatusCode),
}

impl TransportError {
    pub fn category(&self) -> ErrorCategory {
        return match self {
            TransportError::Unavailable(_) => ErrorCategory::InternalError,
            TransportError::ServiceSpecific(status) => status.category(),
        };
    }
}

impl From<&TransportError> for CallError {
    fn from(err: &TransportError) -> Self {
        return CallError::TransportRejected { category: err.category(), reason: err.to_string() };
    }
}

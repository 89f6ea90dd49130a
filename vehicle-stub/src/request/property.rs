use vehicle_stub_macro::add_request_id;

use crate::request::error::CallError;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum OperationKind {
    Get,
    Set,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum StatusCode {
    Ok,
    TryAgain,
    InvalidArg,
    NotAvailable,
    AccessDenied,
    InternalError,
    NotAvailableDisabled,
    NotAvailableSpeedLow,
    NotAvailableSpeedHigh,
    NotAvailablePoorVisibility,
    NotAvailableSafety,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum ErrorCategory {
    NotAvailable,
    TryAgain,
    InternalError,
}

impl StatusCode {
    pub fn is_ok(&self) -> bool {
        return matches!(self, StatusCode::Ok);
    }

    pub fn category(&self) -> ErrorCategory {
        return match self {
            StatusCode::NotAvailable
            | StatusCode::NotAvailableDisabled
            | StatusCode::NotAvailableSpeedLow
            | StatusCode::NotAvailableSpeedHigh
            | StatusCode::NotAvailablePoorVisibility
            | StatusCode::NotAvailableSafety => ErrorCategory::NotAvailable,
            StatusCode::TryAgain => ErrorCategory::TryAgain,
            _ => ErrorCategory::InternalError,
        };
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawValue {
    pub int32_values: Vec<i32>,
    pub float_values: Vec<f32>,
    pub int64_values: Vec<i64>,
    pub byte_values: Vec<u8>,
    pub string_value: String,
}

impl RawValue {
    pub fn is_empty(&self) -> bool {
        return self.int32_values.is_empty()
            && self.float_values.is_empty()
            && self.int64_values.is_empty()
            && self.byte_values.is_empty()
            && self.string_value.is_empty();
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropValue {
    pub prop_id: i32,
    pub area_id: i32,
    pub timestamp_nanos: i64,
    pub payload: RawValue,
}

impl PropValue {
    pub fn new(prop_id: i32, area_id: i32) -> Self {
        return PropValue { prop_id, area_id, ..Default::default() };
    }

    pub fn with_int32_values(prop_id: i32, area_id: i32, int32_values: Vec<i32>) -> Self {
        let payload = RawValue { int32_values, ..Default::default() };
        return PropValue { prop_id, area_id, timestamp_nanos: 0, payload };
    }

    pub fn describe(&self) -> String {
        return format!("propID: {}, areaID: {}", self.prop_id, self.area_id);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PropertyOp {
    Get(PropValue),
    Set(PropValue),
}

impl PropertyOp {
    pub fn kind(&self) -> OperationKind {
        return match self {
            PropertyOp::Get(_) => OperationKind::Get,
            PropertyOp::Set(_) => OperationKind::Set,
        };
    }

    pub fn value(&self) -> &PropValue {
        return match self {
            PropertyOp::Get(value) | PropertyOp::Set(value) => value,
        };
    }

    pub(crate) fn into_request(self, request_id: u64) -> Result<PropertyRequest, CallError> {
        return match self {
            PropertyOp::Get(value) => Ok(PropertyRequest { kind: OperationKind::Get, value, request_id }),
            PropertyOp::Set(value) => {
                if value.payload.is_empty() {
                    return Err(CallError::InvalidRequest {
                        reason: format!("set request carries no value for {}", value.describe()),
                    });
                }
                Ok(PropertyRequest { kind: OperationKind::Set, value, request_id })
            }
        };
    }
}

#[add_request_id]
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyRequest {
    pub kind: OperationKind,
    pub value: PropValue,
}

#[add_request_id]
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyResult {
    pub status: StatusCode,
    pub value: Option<PropValue>,
}

impl PropertyResult {
    pub fn ok(request_id: u64, value: Option<PropValue>) -> Self {
        return PropertyResult { status: StatusCode::Ok, value, request_id };
    }

    pub fn failed(request_id: u64, status: StatusCode) -> Self {
        return PropertyResult { status, value: None, request_id };
    }

    pub(crate) fn into_sync_outcome(self) -> Result<Option<PropValue>, CallError> {
        if !self.status.is_ok() {
            return Err(CallError::RemoteReportedFailure { status: self.status });
        }
        return Ok(self.value);
    }

    pub(crate) fn into_async_outcome(self, kind: OperationKind) -> Result<Option<PropValue>, CallError> {
        if !self.status.is_ok() {
            return Err(CallError::RemoteReportedFailure { status: self.status });
        }
        return match kind {
            OperationKind::Set => Ok(None),
            OperationKind::Get => match self.value {
                Some(value) => Ok(Some(value)),
                None => Err(CallError::RemoteReportedFailure { status: StatusCode::NotAvailable }),
            },
        };
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Batch {
    pub requests: Vec<PropertyRequest>,
}

impl Batch {
    pub fn len(&self) -> usize {
        return self.requests.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.requests.is_empty();
    }

    pub fn request_ids(&self) -> Vec<u64> {
        return self.requests.iter().map(|request| request.request_id).collect();
    }
}

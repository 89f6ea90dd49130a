use std::sync::Arc;

use crate::request::error::TransportError;
use crate::request::property::{Batch, PropertyResult};

pub trait ResultSink: Send + Sync {
    fn on_results(&self, results: Vec<PropertyResult>);
}

pub type ResultSinkType = Arc<dyn ResultSink + 'static>;

pub trait Transport: Send + Sync {
    fn submit(&self, batch: Batch, result_sink: ResultSinkType) -> Result<(), TransportError>;
}

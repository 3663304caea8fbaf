use crate::services::Flow;

use super::{DecodeError, DeviceError, PatientError};

/// Everything that can abort the processing of one telemetry event.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Device(#[from] DeviceError),

    #[error(transparent)]
    Patient(#[from] PatientError),

    #[error("Store error: {0}")]
    Store(#[from] sqlx::Error),
}

/// Caller facing failure of a flow. The underlying `IngestError` is logged where
/// the flow fails and never travels further.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct FlowError {
    pub flow: Flow,
    pub message: &'static str,
}

impl FlowError {
    pub fn new(flow: Flow) -> Self {
        Self {
            flow,
            message: flow.failure_message(),
        }
    }
}

pub mod api;
pub mod auth;
pub mod decode;
pub mod device;
pub mod ingest;
pub mod patient;

pub use api::ApiError;
pub use auth::AuthError;
pub use decode::{DecodeError, SensorKind};
pub use device::DeviceError;
pub use ingest::{FlowError, IngestError};
pub use patient::PatientError;

use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use uuid::Uuid;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::AuthError(e) => match e.status_code() {
                StatusCode::UNAUTHORIZED => {
                    tracing::warn!("Request is not authenticated: {}", e);
                    (StatusCode::UNAUTHORIZED, "Unauthorized")
                }
                status => {
                    tracing::error!("Authentication check failed: {}", e);
                    (status, "Internal server error")
                }
            },
            ApiError::FlowError(e) => {
                let error_id = Uuid::new_v4();
                tracing::error!(error_id = ?error_id, flow = %e.flow, "{}", e.message);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
            ApiError::NotFound(e) => {
                tracing::debug!("{}", e);
                (StatusCode::NOT_FOUND, "Not found")
            }
            ApiError::DatabaseError(e) => {
                let error_id = Uuid::new_v4();
                tracing::error!(error_id = ?error_id, "Database error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
            ApiError::InternalError(e) => {
                let error_id = Uuid::new_v4();
                tracing::error!(error_id = ?error_id, "Internal error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        // Wearables only look at the status code, so the body stays plain text
        (status, [(header::CONTENT_TYPE, "text/plain; charset=utf-8")], message).into_response()
    }
}

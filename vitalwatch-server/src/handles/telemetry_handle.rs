use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::{Extension, Router, middleware};
use vitalwatch_api::models::VitalsPayload;

use crate::errors::ApiError;
use crate::middlewares::{AuthState, AuthenticatedPayload, device_auth};
use crate::services::IngestService;

#[derive(Clone)]
pub struct TelemetryState {
    pub ingest_service: Arc<IngestService>,
}

pub fn telemetry_router(telemetry_state: TelemetryState, auth_state: AuthState) -> Router {
    Router::new()
        .route("/api/telemetry", post(ingest_telemetry))
        .route_layer(middleware::from_fn_with_state(auth_state, device_auth))
        .with_state(telemetry_state)
}

#[utoipa::path(
    post,
    path = "/api/telemetry",
    tag = "telemetry",
    request_body(
        content = VitalsPayload,
        description = "One of VitalsPayload, AccelerationPayload, SosPayload or FallDetectionPayload; the shape selects the flow"
    ),
    responses(
        (status = 200, description = "Data processing completed", body = String),
        (status = 401, description = "Unknown device or wrong secret key"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn ingest_telemetry(
    State(state): State<TelemetryState>,
    Extension(AuthenticatedPayload(payload)): Extension<AuthenticatedPayload>,
) -> Result<&'static str, ApiError> {
    tracing::info!("New incoming telemetry");

    let outcome = state.ingest_service.handle(&payload).await?;

    tracing::info!("Data processing completed for {} flow", outcome.flow);

    Ok("Data processing completed")
}

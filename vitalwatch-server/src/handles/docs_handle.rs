use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;
use vitalwatch_api::models::*;

#[derive(OpenApi)]
#[openapi(
    paths(
        super::telemetry_handle::ingest_telemetry,
        super::notification_handle::get_notifications_by_patient_id,
        super::patient_handle::get_patient_by_id,
    ),
    components(schemas(
        VitalsPayload,
        AccelerationPayload,
        SosPayload,
        FallDetectionPayload,
        NotificationResponse,
        NotificationType,
        PatientInfoResponse,
        Thresholds,
        Spot,
    )),
    tags(
        (name = "telemetry", description = "Wearable telemetry ingestion"),
        (name = "notification", description = "Alerts raised for patients"),
        (name = "patient", description = "Monitored patients")
    )
)]
pub struct ApiDoc;

pub fn docs_router() -> Router {
    Router::new().route("/api/docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
}

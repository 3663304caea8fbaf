use std::sync::Arc;

use anyhow::anyhow;
use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router, middleware};
use vitalwatch_api::models::NotificationResponse;

use crate::errors::ApiError;
use crate::middlewares::{AuthState, secret_auth};
use crate::repositories::{NotificationRepository, PatientRepository};

#[derive(Clone)]
pub struct NotificationState {
    pub patient_repository: Arc<PatientRepository>,
    pub notification_repository: Arc<NotificationRepository>,
}

pub fn notification_router(notification_state: NotificationState, auth_state: AuthState) -> Router {
    Router::new()
        .route(
            "/api/patients/:patient_id/notifications",
            get(get_notifications_by_patient_id),
        )
        .route_layer(middleware::from_fn_with_state(auth_state, secret_auth))
        .with_state(notification_state)
}

#[utoipa::path(
    get,
    path = "/api/patients/{patient_id}/notifications",
    tag = "notification",
    params(
        ("patient_id" = i32, Path, description = "Patient ID")
    ),
    responses(
        (status = 200, description = "Notifications, newest first", body = Vec<NotificationResponse>),
        (status = 401, description = "Missing or wrong secret key"),
        (status = 404, description = "Patient not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_notifications_by_patient_id(
    State(state): State<NotificationState>,
    Path(patient_id): Path<i32>,
) -> Result<Json<Vec<NotificationResponse>>, ApiError> {
    state
        .patient_repository
        .find_by_id(patient_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("patient {patient_id}")))?;

    let notifications = state
        .notification_repository
        .find_by_patient_id(patient_id)
        .await?
        .into_iter()
        .map(NotificationResponse::try_from)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| anyhow!("Stored notification is invalid: {}", e))?;

    Ok(Json(notifications))
}

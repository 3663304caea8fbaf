use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router, middleware};
use vitalwatch_api::models::PatientInfoResponse;

use crate::errors::ApiError;
use crate::middlewares::{AuthState, secret_auth};
use crate::repositories::PatientRepository;

#[derive(Clone)]
pub struct PatientState {
    pub patient_repository: Arc<PatientRepository>,
}

pub fn patient_router(patient_state: PatientState, auth_state: AuthState) -> Router {
    Router::new()
        .route("/api/patients/:patient_id", get(get_patient_by_id))
        .route_layer(middleware::from_fn_with_state(auth_state, secret_auth))
        .with_state(patient_state)
}

#[utoipa::path(
    get,
    path = "/api/patients/{patient_id}",
    tag = "patient",
    params(
        ("patient_id" = i32, Path, description = "Patient ID")
    ),
    responses(
        (status = 200, description = "Patient with its alert thresholds", body = PatientInfoResponse),
        (status = 401, description = "Missing or wrong secret key"),
        (status = 404, description = "Patient not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_patient_by_id(
    State(state): State<PatientState>,
    Path(patient_id): Path<i32>,
) -> Result<Json<PatientInfoResponse>, ApiError> {
    let patient = state
        .patient_repository
        .find_by_id(patient_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("patient {patient_id}")))?;

    Ok(Json(patient.into()))
}

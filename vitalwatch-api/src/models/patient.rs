use serde::{Deserialize, Serialize};

use super::Id;

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Thresholds {
    /// Body temperature bound in Celsius
    pub temperature: f64,
    /// Heart rate bound in beats per minute
    pub heart_rate: f64,
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientInfoResponse {
    /// Patient identifier
    pub id: Id,
    /// Display name
    pub name: String,
    /// Wearable assigned to the patient
    pub device_id: String,
    /// Configured vital sign bounds
    pub thresholds: Thresholds,
}

use core::fmt;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::Id;

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NotificationType {
    /// A vital sign was evaluated against the patient thresholds
    #[serde(rename = "Vital Alert")]
    VitalAlert,
    /// Raised for every acceleration event and explicit fall reports
    #[serde(rename = "Fall Detection")]
    FallDetection,
    /// Patient pressed the SOS button
    #[serde(rename = "SOS")]
    Sos,
}

impl NotificationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationType::VitalAlert => "Vital Alert",
            NotificationType::FallDetection => "Fall Detection",
            NotificationType::Sos => "SOS",
        }
    }
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for NotificationType {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "Vital Alert" => Ok(NotificationType::VitalAlert),
            "Fall Detection" => Ok(NotificationType::FallDetection),
            "SOS" => Ok(NotificationType::Sos),
            other => Err(format!("unknown notification type: {other}")),
        }
    }
}

/// One charted point of a recent reading.
#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spot {
    pub x: f64,
    pub y: f64,
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationResponse {
    /// Sequential notification identifier
    pub id: String,
    /// Owning patient
    #[serde(rename = "patient_id")]
    pub patient_id: Id,
    /// Alert category
    pub notification_type: NotificationType,
    /// Recent temperature readings, newest first
    pub temperature_spots: Vec<Spot>,
    /// Recent heart rate readings, newest first
    pub heart_rate_spots: Vec<Spot>,
    /// Creation time
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
}

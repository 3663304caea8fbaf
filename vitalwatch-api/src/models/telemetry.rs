use core::fmt;

use serde::{Deserialize, Serialize};

/// Firmware dialect used by a deployment's heart rate instrument.
#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeartRateFormat {
    /// `Avg BPM=72`
    #[default]
    Compact,
    /// `Avg BPM = 72.5`
    Spaced,
}

impl fmt::Display for HeartRateFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            HeartRateFormat::Compact => write!(f, "compact"),
            HeartRateFormat::Spaced => write!(f, "spaced"),
        }
    }
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VitalsPayload {
    /// Registered wearable identifier
    pub device_id: String,
    /// Fleet shared secret
    pub secret_key: String,
    /// Raw thermometer output, e.g. `Object = 36.6`
    pub temperature: String,
    /// Raw pulse sensor output, e.g. `Avg BPM=72`
    pub heart_rate: String,
    /// Raw GPS output, e.g. `Location: 6.9271,79.8612`
    pub location: String,
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccelerationPayload {
    /// Registered wearable identifier
    pub device_id: String,
    /// Fleet shared secret
    pub secret_key: String,
    /// Raw accelerometer output, e.g. `Acceleration X: 0.12, Y: -9.81, Z: 0.03`
    pub acceleration: String,
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SosPayload {
    /// Registered wearable identifier
    pub device_id: String,
    /// Fleet shared secret
    pub secret_key: String,
    /// Presence-only marker, the value is ignored
    #[serde(rename = "SOS")]
    #[cfg_attr(feature = "docs", schema(value_type = Object))]
    pub sos: serde_json::Value,
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FallDetectionPayload {
    /// Registered wearable identifier
    pub device_id: String,
    /// Fleet shared secret
    pub secret_key: String,
    /// Presence-only marker, the value is ignored
    #[cfg_attr(feature = "docs", schema(value_type = Object))]
    pub fall_detection: serde_json::Value,
}

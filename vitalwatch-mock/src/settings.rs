use std::error::Error;

use serde::{Deserialize, Serialize};
use vitalwatch_api::models::HeartRateFormat;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Logger {
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Target {
    pub url: String,
    pub secret_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wearable {
    pub device_ids: Vec<String>,
    pub interval_secs: u64,
    #[serde(default)]
    pub heart_rate_format: HeartRateFormat,
    /// Chance per tick that a device reports an acceleration event instead of vitals.
    pub fall_probability: f64,
    pub sos_probability: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub logger: Logger,
    pub target: Target,
    pub wearable: Wearable,
}

impl Settings {
    pub fn new() -> Result<Self, Box<dyn Error>> {
        let settings: Settings = toml::from_str(include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/../",
            "configs/mock.toml"
        )))?;

        if !(0.0..=1.0).contains(&settings.wearable.fall_probability)
            || !(0.0..=1.0).contains(&settings.wearable.sos_probability)
        {
            return Err("event probabilities must be within 0 and 1".into());
        }

        Ok(settings)
    }
}

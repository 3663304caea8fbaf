use std::env;

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use vitalwatch_api::models::HeartRateFormat;

use crate::configs::normalize_path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Server {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Logger {
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Database {
    pub migration_path: Option<String>,
    pub clean_start: bool,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Auth {
    /// Shared secret every wearable sends along with its telemetry
    pub secret: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Telemetry {
    /// Heart rate grammar emitted by the deployed firmware
    #[serde(default)]
    pub heart_rate_format: HeartRateFormat,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub server: Server,
    pub logger: Logger,
    pub database: Database,
    pub auth: Auth,
    #[serde(default)]
    pub telemetry: Telemetry,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or("development".into());

        let mut settings: Settings = Config::builder()
            .add_source(File::with_name("configs/default"))
            .add_source(File::with_name(&format!("configs/{run_mode}")).required(false))
            .add_source(Environment::default().separator("__"))
            .build()?
            .try_deserialize()?;

        // Whether the directory exists is checked when storage opens, once logging is up
        if let Some(migrate) = &settings.database.migration_path {
            let migrate_path = normalize_path(migrate)
                .map_err(|e| ConfigError::Message(e.to_string()))?
                .to_string_lossy()
                .to_string();

            settings.database.migration_path = Some(migrate_path);
        }

        Ok(settings)
    }
}

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::Table;

/// Axis values stay text, exactly as the accelerometer reported them.
#[derive(Clone, Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct AccelerationReading {
    pub id: i32,
    pub device_id: String,
    pub x: String,
    pub y: String,
    pub z: String,
    pub timestamp: OffsetDateTime,
}

#[derive(Clone)]
pub struct AccelerationReadingTable;

impl Table for AccelerationReadingTable {
    fn name(&self) -> &'static str {
        "acceleration_readings"
    }

    fn create(&self) -> String {
        String::from(
            r#"
            CREATE TABLE IF NOT EXISTS acceleration_readings (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                device_id VARCHAR(255) NOT NULL,
                x VARCHAR(32) NOT NULL,
                y VARCHAR(32) NOT NULL,
                z VARCHAR(32) NOT NULL,
                timestamp TIMESTAMP NOT NULL,
                FOREIGN KEY (device_id) REFERENCES devices (id) ON DELETE CASCADE
            );
            "#,
        )
    }

    fn dispose(&self) -> String {
        String::from("DROP TABLE IF EXISTS acceleration_readings;")
    }

    fn dependencies(&self) -> Vec<&'static str> {
        vec!["devices"]
    }
}

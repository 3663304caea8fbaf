use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::Table;

#[derive(Clone, Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct Reading {
    pub id: i32,
    pub device_id: String,
    /// Body temperature in Celsius
    pub temperature: f64,
    /// Average heart rate in bpm
    pub heart_rate: f64,
    /// Opaque "lat,lon" text as reported by the wearable
    pub location: String,
    /// Server assigned time of the reading
    pub timestamp: OffsetDateTime,
}

#[derive(Clone)]
pub struct ReadingTable;

impl Table for ReadingTable {
    fn name(&self) -> &'static str {
        "readings"
    }

    fn create(&self) -> String {
        String::from(
            r#"
            CREATE TABLE IF NOT EXISTS readings (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                device_id VARCHAR(255) NOT NULL,
                temperature REAL NOT NULL,
                heart_rate REAL NOT NULL,
                location VARCHAR(255) NOT NULL,
                timestamp TIMESTAMP NOT NULL,
                FOREIGN KEY (device_id) REFERENCES devices (id) ON DELETE CASCADE
            );
            "#,
        )
    }

    fn dispose(&self) -> String {
        String::from("DROP TABLE IF EXISTS readings;")
    }

    fn dependencies(&self) -> Vec<&'static str> {
        vec!["devices"]
    }
}

use serde::{Deserialize, Serialize};
use vitalwatch_api::models::{PatientInfoResponse, Thresholds};

use super::Table;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Patient {
    pub id: i32,
    pub name: String,
    /// The wearable this patient is linked to
    pub device_id: String,
    /// Temperature bound in Celsius
    pub temperature_threshold: f64,
    /// Heart rate bound in bpm
    pub heart_rate_threshold: f64,
}

impl Patient {
    pub fn thresholds(&self) -> Thresholds {
        Thresholds {
            temperature: self.temperature_threshold,
            heart_rate: self.heart_rate_threshold,
        }
    }
}

impl From<Patient> for PatientInfoResponse {
    fn from(patient: Patient) -> Self {
        let thresholds = patient.thresholds();

        Self {
            id: patient.id,
            name: patient.name,
            device_id: patient.device_id,
            thresholds,
        }
    }
}

#[derive(Clone)]
pub struct PatientTable;

impl Table for PatientTable {
    fn name(&self) -> &'static str {
        "patients"
    }

    fn create(&self) -> String {
        String::from(
            r#"
            CREATE TABLE IF NOT EXISTS patients (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name VARCHAR(255) NOT NULL,
                device_id VARCHAR(255) NOT NULL,
                temperature_threshold REAL NOT NULL,
                heart_rate_threshold REAL NOT NULL,
                FOREIGN KEY (device_id) REFERENCES devices (id) ON DELETE CASCADE
            );
            "#,
        )
    }

    fn dispose(&self) -> String {
        String::from("DROP TABLE IF EXISTS patients;")
    }

    fn dependencies(&self) -> Vec<&'static str> {
        vec!["devices"]
    }
}

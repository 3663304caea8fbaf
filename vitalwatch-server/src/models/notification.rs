use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use time::OffsetDateTime;
use vitalwatch_api::models::{NotificationResponse, NotificationType, Spot};

use super::Table;

#[derive(Clone, Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct Notification {
    /// Storage key, always `"notification <id>"`
    pub key: String,
    pub id: String,
    pub patient_id: i32,
    pub notification_type: String,
    pub temperature_spots: Json<Vec<Spot>>,
    pub heart_rate_spots: Json<Vec<Spot>>,
    pub date: OffsetDateTime,
}

impl Notification {
    pub fn storage_key(id: &str) -> String {
        format!("notification {id}")
    }
}

impl TryFrom<Notification> for NotificationResponse {
    type Error = String;

    fn try_from(notification: Notification) -> Result<Self, Self::Error> {
        Ok(Self {
            id: notification.id,
            patient_id: notification.patient_id,
            notification_type: NotificationType::try_from(notification.notification_type.as_str())?,
            temperature_spots: notification.temperature_spots.0,
            heart_rate_spots: notification.heart_rate_spots.0,
            date: notification.date,
        })
    }
}

#[derive(Clone)]
pub struct NotificationTable;

impl Table for NotificationTable {
    fn name(&self) -> &'static str {
        "notifications"
    }

    fn create(&self) -> String {
        String::from(
            r#"
            CREATE TABLE IF NOT EXISTS notifications (
                key VARCHAR(255) PRIMARY KEY,
                id VARCHAR(32) NOT NULL UNIQUE,
                patient_id INTEGER NOT NULL,
                notification_type VARCHAR(32) NOT NULL,
                temperature_spots JSON NOT NULL DEFAULT '[]',
                heart_rate_spots JSON NOT NULL DEFAULT '[]',
                date TIMESTAMP NOT NULL,
                FOREIGN KEY (patient_id) REFERENCES patients (id) ON DELETE CASCADE
            );
            "#,
        )
    }

    fn dispose(&self) -> String {
        String::from("DROP TABLE IF EXISTS notifications;")
    }

    fn dependencies(&self) -> Vec<&'static str> {
        vec!["patients"]
    }
}

use std::sync::Arc;

use sqlx::{Error, Sqlite, SqlitePool, Transaction};

use crate::configs::Storage;
use crate::models::Notification;

pub struct NotificationRepository {
    storage: Arc<Storage>,
}

impl NotificationRepository {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }

    pub fn get_pool(&self) -> &SqlitePool {
        self.storage.get_pool()
    }
}

impl NotificationRepository {
    pub async fn create(
        &self,
        item: &Notification,
        transaction: &mut Transaction<'_, Sqlite>,
    ) -> Result<(), Error> {
        sqlx::query(
            r#"
            INSERT INTO notifications (key, id, patient_id, notification_type, temperature_spots, heart_rate_spots, date)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(&item.key)
        .bind(&item.id)
        .bind(item.patient_id)
        .bind(&item.notification_type)
        .bind(&item.temperature_spots)
        .bind(&item.heart_rate_spots)
        .bind(item.date)
        .execute(&mut **transaction)
        .await?;

        Ok(())
    }

    pub async fn count(&self) -> Result<i64, Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM notifications")
            .fetch_one(self.storage.get_pool())
            .await?;

        Ok(count)
    }

    pub async fn count_in_transaction(
        &self,
        transaction: &mut Transaction<'_, Sqlite>,
    ) -> Result<i64, Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM notifications")
            .fetch_one(&mut **transaction)
            .await?;

        Ok(count)
    }

    pub async fn find_by_key(&self, key: &str) -> Result<Option<Notification>, Error> {
        let notification: Option<Notification> =
            sqlx::query_as("SELECT * FROM notifications WHERE key = $1")
                .bind(key)
                .fetch_optional(self.storage.get_pool())
                .await?;

        Ok(notification)
    }

    pub async fn find_by_patient_id(&self, patient_id: i32) -> Result<Vec<Notification>, Error> {
        let notifications: Vec<Notification> = sqlx::query_as(
            r#"
            SELECT * FROM notifications
            WHERE patient_id = $1
            ORDER BY julianday(date) DESC, CAST(id AS INTEGER) DESC
            "#,
        )
        .bind(patient_id)
        .fetch_all(self.storage.get_pool())
        .await?;

        Ok(notifications)
    }
}

use std::sync::Arc;

use sqlx::{Error, Sqlite, SqlitePool, Transaction};

use crate::configs::Storage;
use crate::models::Reading;

pub struct ReadingRepository {
    storage: Arc<Storage>,
}

impl ReadingRepository {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }

    pub fn get_pool(&self) -> &SqlitePool {
        self.storage.get_pool()
    }
}

impl ReadingRepository {
    // Append a vitals reading, returning the stored row
    pub async fn create(
        &self,
        item: &Reading,
        transaction: &mut Transaction<'_, Sqlite>,
    ) -> Result<Reading, Error> {
        let reading: Reading = sqlx::query_as(
            r#"
            INSERT INTO readings (device_id, temperature, heart_rate, location, timestamp)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&item.device_id)
        .bind(item.temperature)
        .bind(item.heart_rate)
        .bind(&item.location)
        .bind(item.timestamp)
        .fetch_one(&mut **transaction)
        .await?;

        Ok(reading)
    }

    // Get latest N readings for a device, newest first
    pub async fn find_latest_by_device_id(
        &self,
        device_id: &str,
        limit: i64,
    ) -> Result<Vec<Reading>, Error> {
        let readings: Vec<Reading> = sqlx::query_as(
            r#"
            SELECT * FROM readings
            WHERE device_id = $1
            ORDER BY julianday(timestamp) DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(device_id)
        .bind(limit)
        .fetch_all(self.storage.get_pool())
        .await?;

        Ok(readings)
    }

    pub async fn count_by_device_id(&self, device_id: &str) -> Result<i64, Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM readings WHERE device_id = $1")
            .bind(device_id)
            .fetch_one(self.storage.get_pool())
            .await?;

        Ok(count)
    }
}

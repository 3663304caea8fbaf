use std::sync::Arc;

use sqlx::{Error, Sqlite, SqlitePool, Transaction};

use crate::configs::Storage;
use crate::models::AccelerationReading;

pub struct AccelerationReadingRepository {
    storage: Arc<Storage>,
}

impl AccelerationReadingRepository {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }

    pub fn get_pool(&self) -> &SqlitePool {
        self.storage.get_pool()
    }
}

impl AccelerationReadingRepository {
    pub async fn create(
        &self,
        item: &AccelerationReading,
        transaction: &mut Transaction<'_, Sqlite>,
    ) -> Result<AccelerationReading, Error> {
        let reading: AccelerationReading = sqlx::query_as(
            r#"
            INSERT INTO acceleration_readings (device_id, x, y, z, timestamp)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&item.device_id)
        .bind(&item.x)
        .bind(&item.y)
        .bind(&item.z)
        .bind(item.timestamp)
        .fetch_one(&mut **transaction)
        .await?;

        Ok(reading)
    }

    pub async fn find_latest_by_device_id(
        &self,
        device_id: &str,
        limit: i64,
    ) -> Result<Vec<AccelerationReading>, Error> {
        let readings: Vec<AccelerationReading> = sqlx::query_as(
            r#"
            SELECT * FROM acceleration_readings
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
}

#[cfg(test)]
mod tests {
    use time::OffsetDateTime;

    use crate::models::Device;
    use crate::repositories::DeviceRepository;
    use crate::repositories::tests::setup_test_db;

    use super::*;

    #[tokio::test]
    async fn test_axis_text_is_kept_verbatim() {
        let storage = setup_test_db().await;
        let device_repo = DeviceRepository::new(storage.clone());
        let repo = AccelerationReadingRepository::new(storage.clone());

        let mut tx = storage.get_pool().begin().await.unwrap();
        device_repo
            .create(
                &Device {
                    id: "WB-0001".to_string(),
                    name: "Wristband 1".to_string(),
                    registered_at: OffsetDateTime::now_utc(),
                },
                &mut tx,
            )
            .await
            .unwrap();
        repo.create(
            &AccelerationReading {
                id: 0,
                device_id: "WB-0001".to_string(),
                x: "-0.50".to_string(),
                y: "+9.81".to_string(),
                z: "0.030".to_string(),
                timestamp: OffsetDateTime::now_utc(),
            },
            &mut tx,
        )
        .await
        .unwrap();
        tx.commit().await.unwrap();

        let latest = repo.find_latest_by_device_id("WB-0001", 1).await.unwrap();
        assert_eq!(latest.len(), 1);
        assert_eq!(latest[0].x, "-0.50");
        assert_eq!(latest[0].y, "+9.81");
        assert_eq!(latest[0].z, "0.030");
    }
}

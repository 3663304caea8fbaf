use std::sync::Arc;

use sqlx::{Error, Sqlite, Transaction};

use crate::configs::Storage;
use crate::models::Patient;

pub struct PatientRepository {
    storage: Arc<Storage>,
}

impl PatientRepository {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }
}

impl PatientRepository {
    pub async fn create(
        &self,
        item: &Patient,
        transaction: &mut Transaction<'_, Sqlite>,
    ) -> Result<i32, Error> {
        let id = sqlx::query(
            r#"
            INSERT INTO patients (name, device_id, temperature_threshold, heart_rate_threshold)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(&item.name)
        .bind(&item.device_id)
        .bind(item.temperature_threshold)
        .bind(item.heart_rate_threshold)
        .execute(&mut **transaction)
        .await?
        .last_insert_rowid();

        Ok(id as i32)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Patient>, Error> {
        let patient: Option<Patient> = sqlx::query_as("SELECT * FROM patients WHERE id = $1")
            .bind(id)
            .fetch_optional(self.storage.get_pool())
            .await?;

        Ok(patient)
    }

    // Only the first linked patient is considered
    pub async fn find_by_device_id(&self, device_id: &str) -> Result<Option<Patient>, Error> {
        let patient: Option<Patient> = sqlx::query_as(
            "SELECT * FROM patients WHERE device_id = $1 ORDER BY id LIMIT 1",
        )
        .bind(device_id)
        .fetch_optional(self.storage.get_pool())
        .await?;

        Ok(patient)
    }
}

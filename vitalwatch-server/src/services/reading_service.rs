use std::sync::Arc;

use time::OffsetDateTime;

use crate::errors::{DeviceError, IngestError};
use crate::models::{AccelerationReading, Reading};
use crate::repositories::{AccelerationReadingRepository, DeviceRepository, ReadingRepository};
use crate::services::decoder::Acceleration;
use crate::services::event_bus::{EventBus, EventPayload, READING_CREATED};

/// Decoded vitals ready to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct VitalsFields {
    pub temperature: f64,
    pub heart_rate: f64,
    pub location: String,
}

pub struct ReadingService {
    device_repository: Arc<DeviceRepository>,
    reading_repository: Arc<ReadingRepository>,
    acceleration_reading_repository: Arc<AccelerationReadingRepository>,
    event_bus: Arc<EventBus>,
}

impl ReadingService {
    pub fn new(
        device_repository: Arc<DeviceRepository>,
        reading_repository: Arc<ReadingRepository>,
        acceleration_reading_repository: Arc<AccelerationReadingRepository>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            device_repository,
            reading_repository,
            acceleration_reading_repository,
            event_bus,
        }
    }

    async fn ensure_device(&self, device_id: &str) -> Result<(), IngestError> {
        self.device_repository
            .find_by_id(device_id)
            .await?
            .ok_or_else(|| DeviceError::DeviceNotFound(device_id.to_string()))?;

        Ok(())
    }

    /// Append a vitals reading and notify `READING_CREATED` subscribers once the
    /// row is committed.
    pub async fn store_vitals(&self, device_id: &str, fields: VitalsFields) -> Result<Reading, IngestError> {
        self.ensure_device(device_id).await?;

        let reading = Reading {
            id: 0,
            device_id: device_id.to_string(),
            temperature: fields.temperature,
            heart_rate: fields.heart_rate,
            location: fields.location,
            timestamp: OffsetDateTime::now_utc(),
        };

        let mut tx = self.reading_repository.get_pool().begin().await?;
        let stored = self.reading_repository.create(&reading, &mut tx).await?;
        tx.commit().await?;

        tracing::debug!("stored reading {} for device {}", stored.id, device_id);

        let delivered = self
            .event_bus
            .publish(READING_CREATED, EventPayload::ReadingCreated(stored.clone()))
            .await;
        if delivered == 0 {
            tracing::warn!("no subscriber for new reading {}", stored.id);
        }

        Ok(stored)
    }

    pub async fn store_acceleration(
        &self,
        device_id: &str,
        acceleration: Acceleration,
    ) -> Result<AccelerationReading, IngestError> {
        self.ensure_device(device_id).await?;

        let reading = AccelerationReading {
            id: 0,
            device_id: device_id.to_string(),
            x: acceleration.x,
            y: acceleration.y,
            z: acceleration.z,
            timestamp: OffsetDateTime::now_utc(),
        };

        let mut tx = self.acceleration_reading_repository.get_pool().begin().await?;
        let stored = self.acceleration_reading_repository.create(&reading, &mut tx).await?;
        tx.commit().await?;

        tracing::debug!("stored acceleration {} for device {}", stored.id, device_id);

        Ok(stored)
    }
}

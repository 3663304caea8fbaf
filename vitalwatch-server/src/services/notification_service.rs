use std::sync::Arc;

use sqlx::types::Json;
use time::OffsetDateTime;
use vitalwatch_api::models::{NotificationType, Spot};

use crate::errors::{IngestError, PatientError};
use crate::models::{Notification, Reading};
use crate::repositories::{
    NotificationRepository, PatientRepository, ReadingRepository, SequenceRepository,
};

/// Number of recent readings charted on a notification.
pub const SPOT_WINDOW: i64 = 3;
/// Distance on the x axis between two charted readings.
pub const SPOT_STEP: f64 = 10.0;

const NOTIFICATION_SEQUENCE: &str = "notifications";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecentSpots {
    pub temperature: Vec<Spot>,
    pub heart_rate: Vec<Spot>,
}

impl RecentSpots {
    /// `readings` must already be ordered newest first.
    pub fn from_readings(readings: &[Reading]) -> Self {
        let mut spots = RecentSpots::default();

        for (index, reading) in readings.iter().enumerate() {
            let x = index as f64 * SPOT_STEP;
            spots.temperature.push(Spot { x, y: reading.temperature });
            spots.heart_rate.push(Spot { x, y: reading.heart_rate });
        }

        spots
    }
}

pub struct NotificationService {
    reading_repository: Arc<ReadingRepository>,
    patient_repository: Arc<PatientRepository>,
    notification_repository: Arc<NotificationRepository>,
    sequence_repository: Arc<SequenceRepository>,
}

impl NotificationService {
    pub fn new(
        reading_repository: Arc<ReadingRepository>,
        patient_repository: Arc<PatientRepository>,
        notification_repository: Arc<NotificationRepository>,
        sequence_repository: Arc<SequenceRepository>,
    ) -> Self {
        Self {
            reading_repository,
            patient_repository,
            notification_repository,
            sequence_repository,
        }
    }

    pub async fn recent_spots(&self, device_id: &str) -> Result<RecentSpots, IngestError> {
        let readings = self
            .reading_repository
            .find_latest_by_device_id(device_id, SPOT_WINDOW)
            .await?;

        tracing::debug!("charting {} recent readings of device {}", readings.len(), device_id);

        Ok(RecentSpots::from_readings(&readings))
    }

    /// Build and persist a notification for `patient_id`, charting the latest
    /// readings of `device_id`.
    pub async fn compose(
        &self,
        device_id: &str,
        patient_id: i32,
        notification_type: NotificationType,
    ) -> Result<Notification, IngestError> {
        let spots = self.recent_spots(device_id).await?;

        let mut tx = self.notification_repository.get_pool().begin().await?;

        let id = match self
            .sequence_repository
            .advance(NOTIFICATION_SEQUENCE, &mut tx)
            .await?
        {
            Some(id) => id,
            None => {
                // First use: continue after whatever the store already holds
                let existing = self
                    .notification_repository
                    .count_in_transaction(&mut tx)
                    .await?;
                self.sequence_repository
                    .start(NOTIFICATION_SEQUENCE, existing + 1, &mut tx)
                    .await?
            }
        }
        .to_string();

        let notification = Notification {
            key: Notification::storage_key(&id),
            id,
            patient_id,
            notification_type: notification_type.to_string(),
            temperature_spots: Json(spots.temperature),
            heart_rate_spots: Json(spots.heart_rate),
            date: OffsetDateTime::now_utc(),
        };

        self.notification_repository.create(&notification, &mut tx).await?;
        tx.commit().await?;

        tracing::info!(
            "created {} notification {} for patient {}",
            notification_type,
            notification.id,
            patient_id
        );

        Ok(notification)
    }

    /// Resolve the patient wearing `device_id`, then compose.
    pub async fn compose_for_device(
        &self,
        device_id: &str,
        notification_type: NotificationType,
    ) -> Result<Notification, IngestError> {
        let patient = self
            .patient_repository
            .find_by_device_id(device_id)
            .await?
            .ok_or_else(|| PatientError::PatientNotFound(device_id.to_string()))?;

        self.compose(device_id, patient.id, notification_type).await
    }
}

#[cfg(test)]
mod tests {
    use crate::models::{Device, Patient};
    use crate::repositories::DeviceRepository;
    use crate::repositories::tests::setup_test_db;

    use super::*;

    struct Fixture {
        service: NotificationService,
        reading_repository: Arc<ReadingRepository>,
        notification_repository: Arc<NotificationRepository>,
        patient_id: i32,
    }

    async fn setup() -> Fixture {
        let storage = setup_test_db().await;
        let device_repository = DeviceRepository::new(storage.clone());
        let patient_repository = Arc::new(PatientRepository::new(storage.clone()));
        let reading_repository = Arc::new(ReadingRepository::new(storage.clone()));
        let notification_repository = Arc::new(NotificationRepository::new(storage.clone()));

        let mut tx = storage.get_pool().begin().await.unwrap();
        device_repository
            .create(
                &Device {
                    id: "D1".to_string(),
                    name: "Wristband D1".to_string(),
                    registered_at: OffsetDateTime::now_utc(),
                },
                &mut tx,
            )
            .await
            .unwrap();
        let patient_id = patient_repository
            .create(
                &Patient {
                    id: 0,
                    name: "P1".to_string(),
                    device_id: "D1".to_string(),
                    temperature_threshold: 38.0,
                    heart_rate_threshold: 100.0,
                },
                &mut tx,
            )
            .await
            .unwrap();
        tx.commit().await.unwrap();

        let service = NotificationService::new(
            reading_repository.clone(),
            patient_repository,
            notification_repository.clone(),
            Arc::new(SequenceRepository::new()),
        );

        Fixture {
            service,
            reading_repository,
            notification_repository,
            patient_id,
        }
    }

    async fn store_readings(repository: &ReadingRepository, values: &[(f64, f64)]) {
        let base_time = OffsetDateTime::now_utc();
        let mut tx = repository.get_pool().begin().await.unwrap();
        for (index, (temperature, heart_rate)) in values.iter().enumerate() {
            repository
                .create(
                    &Reading {
                        id: 0,
                        device_id: "D1".to_string(),
                        temperature: *temperature,
                        heart_rate: *heart_rate,
                        location: "6.9271,79.8612".to_string(),
                        timestamp: base_time + time::Duration::seconds(index as i64),
                    },
                    &mut tx,
                )
                .await
                .unwrap();
        }
        tx.commit().await.unwrap();
    }

    #[test]
    fn test_spots_from_readings() {
        let now = OffsetDateTime::now_utc();
        let readings: Vec<Reading> = [(37.0, 90.0), (36.8, 85.0)]
            .iter()
            .enumerate()
            .map(|(i, (temperature, heart_rate))| Reading {
                id: i as i32,
                device_id: "D1".to_string(),
                temperature: *temperature,
                heart_rate: *heart_rate,
                location: String::new(),
                timestamp: now,
            })
            .collect();

        let spots = RecentSpots::from_readings(&readings);

        assert_eq!(spots.temperature, vec![Spot { x: 0.0, y: 37.0 }, Spot { x: 10.0, y: 36.8 }]);
        assert_eq!(spots.heart_rate, vec![Spot { x: 0.0, y: 90.0 }, Spot { x: 10.0, y: 85.0 }]);
        assert_eq!(RecentSpots::from_readings(&[]), RecentSpots::default());
    }

    #[tokio::test]
    async fn test_compose_charts_three_newest_readings() {
        let fixture = setup().await;
        store_readings(
            &fixture.reading_repository,
            &[(36.0, 60.0), (36.5, 65.0), (37.0, 70.0), (37.5, 75.0)],
        )
        .await;

        let notification = fixture
            .service
            .compose("D1", fixture.patient_id, NotificationType::VitalAlert)
            .await
            .unwrap();

        let x: Vec<f64> = notification.temperature_spots.0.iter().map(|s| s.x).collect();
        let temperatures: Vec<f64> = notification.temperature_spots.0.iter().map(|s| s.y).collect();
        let heart_rates: Vec<f64> = notification.heart_rate_spots.0.iter().map(|s| s.y).collect();
        assert_eq!(x, vec![0.0, 10.0, 20.0]);
        assert_eq!(temperatures, vec![37.5, 37.0, 36.5]);
        assert_eq!(heart_rates, vec![75.0, 70.0, 65.0]);
        assert_eq!(notification.notification_type, "Vital Alert");
    }

    #[tokio::test]
    async fn test_compose_with_fewer_readings_does_not_pad() {
        let fixture = setup().await;
        store_readings(&fixture.reading_repository, &[(36.6, 72.0)]).await;

        let notification = fixture
            .service
            .compose("D1", fixture.patient_id, NotificationType::Sos)
            .await
            .unwrap();

        assert_eq!(notification.temperature_spots.0, vec![Spot { x: 0.0, y: 36.6 }]);
        assert_eq!(notification.heart_rate_spots.0, vec![Spot { x: 0.0, y: 72.0 }]);
    }

    #[tokio::test]
    async fn test_ids_are_sequential_and_keyed() {
        let fixture = setup().await;

        let mut ids = Vec::new();
        for _ in 0..3 {
            let notification = fixture
                .service
                .compose("D1", fixture.patient_id, NotificationType::FallDetection)
                .await
                .unwrap();
            assert_eq!(notification.key, format!("notification {}", notification.id));
            ids.push(notification.id);
        }

        assert_eq!(ids, vec!["1", "2", "3"]);
        assert_eq!(fixture.notification_repository.count().await.unwrap(), 3);
        assert!(
            fixture
                .notification_repository
                .find_by_key("notification 2")
                .await
                .unwrap()
                .is_some()
        );
    }

    #[tokio::test]
    async fn test_ids_continue_after_existing_notifications() {
        let fixture = setup().await;

        let mut tx = fixture.notification_repository.get_pool().begin().await.unwrap();
        for id in ["1", "2"] {
            fixture
                .notification_repository
                .create(
                    &Notification {
                        key: Notification::storage_key(id),
                        id: id.to_string(),
                        patient_id: fixture.patient_id,
                        notification_type: "SOS".to_string(),
                        temperature_spots: Json(vec![]),
                        heart_rate_spots: Json(vec![]),
                        date: OffsetDateTime::now_utc(),
                    },
                    &mut tx,
                )
                .await
                .unwrap();
        }
        tx.commit().await.unwrap();

        let mut ids = Vec::new();
        for _ in 0..2 {
            let notification = fixture
                .service
                .compose("D1", fixture.patient_id, NotificationType::Sos)
                .await
                .unwrap();
            ids.push(notification.id);
        }

        assert_eq!(ids, vec!["3", "4"]);
    }

    #[tokio::test]
    async fn test_compose_for_device_without_patient() {
        let fixture = setup().await;

        let error = fixture
            .service
            .compose_for_device("D9", NotificationType::Sos)
            .await
            .unwrap_err();

        assert!(matches!(error, IngestError::Patient(PatientError::PatientNotFound(_))));
        assert_eq!(fixture.notification_repository.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_compose_for_device_resolves_patient() {
        let fixture = setup().await;

        let notification = fixture
            .service
            .compose_for_device("D1", NotificationType::Sos)
            .await
            .unwrap();

        assert_eq!(notification.patient_id, fixture.patient_id);
        assert_eq!(notification.notification_type, "SOS");
        assert!(notification.temperature_spots.0.is_empty());
    }
}

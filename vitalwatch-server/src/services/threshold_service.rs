use core::fmt;
use std::sync::Arc;

use tokio::sync::mpsc;
use vitalwatch_api::models::{NotificationType, Thresholds};

use crate::errors::IngestError;
use crate::models::Reading;
use crate::repositories::PatientRepository;
use crate::services::event_bus::EventPayload;
use crate::services::notification_service::NotificationService;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VitalSign {
    Temperature,
    HeartRate,
}

impl fmt::Display for VitalSign {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            VitalSign::Temperature => write!(f, "temperature"),
            VitalSign::HeartRate => write!(f, "heart rate"),
        }
    }
}

/// Vitals of `reading` that raise a "Vital Alert".
///
/// A value above its bound is only logged; a value at or below it alerts. This
/// polarity is what deployed wearables and dashboards currently observe and is
/// kept until the clinical intent is confirmed.
pub fn alerting_vitals(reading: &Reading, thresholds: &Thresholds) -> Vec<VitalSign> {
    [
        (VitalSign::Temperature, reading.temperature, thresholds.temperature),
        (VitalSign::HeartRate, reading.heart_rate, thresholds.heart_rate),
    ]
    .into_iter()
    .filter_map(|(vital, value, bound)| {
        if value > bound {
            tracing::info!("{} reading {} exceeds threshold {}", vital, value, bound);
            None
        } else {
            tracing::info!("{} reading {} is within threshold {}", vital, value, bound);
            Some(vital)
        }
    })
    .collect()
}

pub struct ThresholdService {
    patient_repository: Arc<PatientRepository>,
    notification_service: Arc<NotificationService>,
}

impl ThresholdService {
    pub fn new(
        patient_repository: Arc<PatientRepository>,
        notification_service: Arc<NotificationService>,
    ) -> Self {
        Self {
            patient_repository,
            notification_service,
        }
    }

    /// Evaluate one stored reading, returning how many notifications were created.
    pub async fn evaluate(&self, reading: &Reading) -> Result<usize, IngestError> {
        let Some(patient) = self
            .patient_repository
            .find_by_device_id(&reading.device_id)
            .await?
        else {
            tracing::warn!("No patient found for device {}", reading.device_id);
            return Ok(0);
        };

        let thresholds = patient.thresholds();
        tracing::debug!(
            "patient {} thresholds: temperature {}, heart rate {}",
            patient.id,
            thresholds.temperature,
            thresholds.heart_rate
        );

        let vitals = alerting_vitals(reading, &thresholds);
        for _ in &vitals {
            self.notification_service
                .compose(&reading.device_id, patient.id, NotificationType::VitalAlert)
                .await?;
        }

        Ok(vitals.len())
    }

    /// Reacts to `READING_CREATED` until the bus is dropped and the queue is
    /// drained. Failed evaluations are logged and dropped.
    pub async fn start_listening(&self, mut receiver: mpsc::UnboundedReceiver<EventPayload>) {
        while let Some(event) = receiver.recv().await {
            match event {
                EventPayload::ReadingCreated(reading) => match self.evaluate(&reading).await {
                    Ok(count) => tracing::debug!(
                        "reading {} evaluated, {} notifications created",
                        reading.id,
                        count
                    ),
                    Err(e) => tracing::error!(
                        "Error handling threshold logic for reading {}: {}",
                        reading.id,
                        e
                    ),
                },
            }
        }

        tracing::info!("Stopping threshold evaluation");
    }
}

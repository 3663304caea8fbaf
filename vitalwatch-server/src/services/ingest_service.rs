use core::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};
use vitalwatch_api::models::{HeartRateFormat, NotificationType};

use crate::errors::{FlowError, IngestError};
use crate::services::decoder::{self, HeartRateDecoder};
use crate::services::notification_service::NotificationService;
use crate::services::reading_service::{ReadingService, VitalsFields};

const DEVICE_ID: &str = "deviceId";
const TEMPERATURE: &str = "temperature";
const HEART_RATE: &str = "heartRate";
const LOCATION: &str = "location";
const ACCELERATION: &str = "acceleration";
const SOS: &str = "SOS";
const FALL_DETECTION: &str = "fallDetection";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Vitals,
    Acceleration,
    Sos,
    FallDetection,
}

impl Flow {
    /// Pick the flow from the payload shape. Acceleration wins over SOS, SOS over
    /// an explicit fall report, and anything else is a vitals payload.
    pub fn route(payload: &Value) -> Self {
        let Some(fields) = payload.as_object() else {
            return Flow::Vitals;
        };

        if fields.contains_key(ACCELERATION) {
            Flow::Acceleration
        } else if fields.contains_key(SOS) {
            Flow::Sos
        } else if fields.contains_key(FALL_DETECTION) {
            Flow::FallDetection
        } else {
            Flow::Vitals
        }
    }

    pub fn failure_message(&self) -> &'static str {
        match self {
            Flow::Vitals => "Failed to process vitals reading",
            Flow::Acceleration => "Failed to process acceleration reading",
            Flow::Sos => "Failed to raise SOS alert",
            Flow::FallDetection => "Failed to raise fall detection alert",
        }
    }
}

impl fmt::Display for Flow {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Flow::Vitals => write!(f, "vitals"),
            Flow::Acceleration => write!(f, "acceleration"),
            Flow::Sos => write!(f, "sos"),
            Flow::FallDetection => write!(f, "fall detection"),
        }
    }
}

/// A routed payload with its raw instrument strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TelemetryEvent {
    Vitals {
        device_id: String,
        temperature: String,
        heart_rate: String,
        location: String,
    },
    Acceleration {
        device_id: String,
        acceleration: String,
    },
    Sos {
        device_id: String,
    },
    FallDetection {
        device_id: String,
    },
}

fn string_field(fields: &Map<String, Value>, name: &str) -> Result<String, IngestError> {
    match fields.get(name) {
        Some(Value::String(value)) => Ok(value.clone()),
        Some(_) => Err(IngestError::MalformedPayload(format!("{name} must be a string"))),
        None => Err(IngestError::MalformedPayload(format!("missing {name}"))),
    }
}

impl TelemetryEvent {
    pub fn from_payload(flow: Flow, payload: &Value) -> Result<Self, IngestError> {
        let fields = payload
            .as_object()
            .ok_or_else(|| IngestError::MalformedPayload("payload must be a JSON object".into()))?;
        let device_id = string_field(fields, DEVICE_ID)?;

        Ok(match flow {
            Flow::Vitals => TelemetryEvent::Vitals {
                device_id,
                temperature: string_field(fields, TEMPERATURE)?,
                heart_rate: string_field(fields, HEART_RATE)?,
                location: string_field(fields, LOCATION)?,
            },
            Flow::Acceleration => TelemetryEvent::Acceleration {
                device_id,
                acceleration: string_field(fields, ACCELERATION)?,
            },
            Flow::Sos => TelemetryEvent::Sos { device_id },
            Flow::FallDetection => TelemetryEvent::FallDetection { device_id },
        })
    }

    pub fn flow(&self) -> Flow {
        match self {
            TelemetryEvent::Vitals { .. } => Flow::Vitals,
            TelemetryEvent::Acceleration { .. } => Flow::Acceleration,
            TelemetryEvent::Sos { .. } => Flow::Sos,
            TelemetryEvent::FallDetection { .. } => Flow::FallDetection,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowOutcome {
    pub flow: Flow,
}

pub struct IngestService {
    reading_service: Arc<ReadingService>,
    notification_service: Arc<NotificationService>,
    heart_rate_format: HeartRateFormat,
}

impl IngestService {
    pub fn new(
        reading_service: Arc<ReadingService>,
        notification_service: Arc<NotificationService>,
        heart_rate_format: HeartRateFormat,
    ) -> Self {
        Self {
            reading_service,
            notification_service,
            heart_rate_format,
        }
    }

    /// Route one payload and run its flow. Failure detail is logged here and the
    /// caller only learns which flow failed.
    pub async fn handle(&self, payload: &Value) -> Result<FlowOutcome, FlowError> {
        let flow = Flow::route(payload);
        tracing::debug!("routing payload to {} flow", flow);

        let result = match TelemetryEvent::from_payload(flow, payload) {
            Ok(event) => self.dispatch(event).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(()) => Ok(FlowOutcome { flow }),
            Err(e) => {
                tracing::error!("{}: {}", flow.failure_message(), e);
                Err(FlowError::new(flow))
            }
        }
    }

    async fn dispatch(&self, event: TelemetryEvent) -> Result<(), IngestError> {
        match event {
            TelemetryEvent::Vitals {
                device_id,
                temperature,
                heart_rate,
                location,
            } => {
                let fields = VitalsFields {
                    temperature: decoder::decode_temperature(&temperature)?,
                    heart_rate: self.heart_rate_format.decode(&heart_rate)?,
                    location: decoder::decode_location(&location)?,
                };
                self.reading_service.store_vitals(&device_id, fields).await?;
            }
            TelemetryEvent::Acceleration {
                device_id,
                acceleration,
            } => {
                let acceleration = decoder::decode_acceleration(&acceleration)?;
                self.reading_service
                    .store_acceleration(&device_id, acceleration)
                    .await?;
                // Every acceleration event is treated as a fall
                self.notification_service
                    .compose_for_device(&device_id, NotificationType::FallDetection)
                    .await?;
            }
            TelemetryEvent::Sos { device_id } => {
                self.notification_service
                    .compose_for_device(&device_id, NotificationType::Sos)
                    .await?;
            }
            TelemetryEvent::FallDetection { device_id } => {
                self.notification_service
                    .compose_for_device(&device_id, NotificationType::FallDetection)
                    .await?;
            }
        }

        Ok(())
    }
}

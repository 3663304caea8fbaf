use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::configs::{SchemaManager, Settings, Storage};
use crate::handles::*;
use crate::middlewares::AuthState;
use crate::repositories::{
    AccelerationReadingRepository, DeviceRepository, NotificationRepository, PatientRepository,
    ReadingRepository, SequenceRepository,
};
use crate::services::{
    AuthService, EventBus, IngestService, NotificationService, READING_CREATED, ReadingService,
    ThresholdService,
};

/// Every collaborator of the pipeline, wired once per process.
#[derive(Clone)]
pub struct AppContext {
    pub storage: Arc<Storage>,
    pub event_bus: Arc<EventBus>,
    pub device_repository: Arc<DeviceRepository>,
    pub patient_repository: Arc<PatientRepository>,
    pub reading_repository: Arc<ReadingRepository>,
    pub acceleration_reading_repository: Arc<AccelerationReadingRepository>,
    pub notification_repository: Arc<NotificationRepository>,
    pub auth_service: Arc<AuthService>,
    pub reading_service: Arc<ReadingService>,
    pub notification_service: Arc<NotificationService>,
    pub threshold_service: Arc<ThresholdService>,
    pub ingest_service: Arc<IngestService>,
}

impl AppContext {
    pub fn new(settings: &Settings, storage: Arc<Storage>) -> Self {
        let event_bus = Arc::new(EventBus::new());

        let device_repository = Arc::new(DeviceRepository::new(storage.clone()));
        let patient_repository = Arc::new(PatientRepository::new(storage.clone()));
        let reading_repository = Arc::new(ReadingRepository::new(storage.clone()));
        let acceleration_reading_repository =
            Arc::new(AccelerationReadingRepository::new(storage.clone()));
        let notification_repository = Arc::new(NotificationRepository::new(storage.clone()));
        let sequence_repository = Arc::new(SequenceRepository::new());

        let auth_service = Arc::new(AuthService::new(
            settings.auth.clone(),
            device_repository.clone(),
        ));
        let reading_service = Arc::new(ReadingService::new(
            device_repository.clone(),
            reading_repository.clone(),
            acceleration_reading_repository.clone(),
            event_bus.clone(),
        ));
        let notification_service = Arc::new(NotificationService::new(
            reading_repository.clone(),
            patient_repository.clone(),
            notification_repository.clone(),
            sequence_repository,
        ));
        let threshold_service = Arc::new(ThresholdService::new(
            patient_repository.clone(),
            notification_service.clone(),
        ));
        let ingest_service = Arc::new(IngestService::new(
            reading_service.clone(),
            notification_service.clone(),
            settings.telemetry.heart_rate_format,
        ));

        Self {
            storage,
            event_bus,
            device_repository,
            patient_repository,
            reading_repository,
            acceleration_reading_repository,
            notification_repository,
            auth_service,
            reading_service,
            notification_service,
            threshold_service,
            ingest_service,
        }
    }

    /// Subscribe the threshold evaluator to new vitals readings.
    pub async fn start_listeners(&self) {
        let receiver = self.event_bus.subscribe(READING_CREATED).await;
        let threshold_service = self.threshold_service.clone();
        tokio::spawn(async move {
            threshold_service.start_listening(receiver).await;
        });
    }

    pub fn router(&self) -> Router {
        let auth_state = AuthState {
            auth_service: self.auth_service.clone(),
        };

        let telemetry = telemetry_router(
            TelemetryState {
                ingest_service: self.ingest_service.clone(),
            },
            auth_state.clone(),
        );

        let notifications = notification_router(
            NotificationState {
                patient_repository: self.patient_repository.clone(),
                notification_repository: self.notification_repository.clone(),
            },
            auth_state.clone(),
        );

        let patients = patient_router(
            PatientState {
                patient_repository: self.patient_repository.clone(),
            },
            auth_state,
        );

        Router::new()
            .merge(telemetry)
            .merge(notifications)
            .merge(patients)
            .merge(docs_router())
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
    }
}

pub async fn create_app(settings: &Arc<Settings>) -> Result<Router, sqlx::Error> {
    let storage = Arc::new(Storage::new(settings.database.clone(), SchemaManager::default()).await?);

    let context = AppContext::new(settings, storage);
    context.start_listeners().await;

    Ok(context.router())
}

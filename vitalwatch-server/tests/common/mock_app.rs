use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode};
use serde_json::Value;
use time::OffsetDateTime;
use tower::ServiceExt;
use vitalwatch_api::models::HeartRateFormat;
use vitalwatch_server::app::AppContext;
use vitalwatch_server::configs::{
    Auth, Database, Logger, SchemaManager, Server, Settings, Storage, Telemetry,
};
use vitalwatch_server::models::{Device, Patient};

pub const SECRET: &str = "fleet-secret";

pub struct MockApp {
    pub context: AppContext,
    pub router: Router,
}

impl MockApp {
    pub async fn new() -> Self {
        Self::with_heart_rate_format(HeartRateFormat::Compact).await
    }

    pub async fn with_heart_rate_format(heart_rate_format: HeartRateFormat) -> Self {
        let settings = Settings {
            server: Server {
                host: String::from("127.0.0.1"),
                port: 0,
            },
            logger: Logger {
                level: String::from("debug"),
            },
            database: Database {
                migration_path: None,
                clean_start: true,
                url: String::from("sqlite::memory:"),
            },
            auth: Auth {
                secret: String::from(SECRET),
            },
            telemetry: Telemetry { heart_rate_format },
        };

        let storage = Arc::new(
            Storage::new(settings.database.clone(), SchemaManager::default())
                .await
                .unwrap(),
        );

        let context = AppContext::new(&settings, storage);
        context.start_listeners().await;
        let router = context.router();

        Self { context, router }
    }

    pub async fn create_test_device(&self, id: &str) -> Device {
        let device = Device {
            id: id.to_string(),
            name: format!("Wristband {id}"),
            registered_at: OffsetDateTime::now_utc(),
        };

        let mut tx = self.context.storage.get_pool().begin().await.unwrap();
        self.context.device_repository.create(&device, &mut tx).await.unwrap();
        tx.commit().await.unwrap();

        device
    }

    pub async fn create_test_patient(&self, device_id: &str, temperature: f64, heart_rate: f64) -> Patient {
        let mut patient = Patient {
            id: 0,
            name: String::from("P1"),
            device_id: device_id.to_string(),
            temperature_threshold: temperature,
            heart_rate_threshold: heart_rate,
        };

        let mut tx = self.context.storage.get_pool().begin().await.unwrap();
        patient.id = self.context.patient_repository.create(&patient, &mut tx).await.unwrap();
        tx.commit().await.unwrap();

        patient
    }

    pub async fn post_telemetry(&self, body: Value) -> (StatusCode, String) {
        let request = Request::builder()
            .uri("/api/telemetry")
            .method(Method::POST)
            .header("Content-Type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();

        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    /// Threshold evaluation runs on its own task, so poll until it settles.
    pub async fn wait_for_notifications(&self, expected: i64) -> i64 {
        let mut count = 0;
        for _ in 0..100 {
            count = self.context.notification_repository.count().await.unwrap();
            if count >= expected {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }

        // Give a stray extra alert the chance to show up
        tokio::time::sleep(Duration::from_millis(100)).await;
        self.context.notification_repository.count().await.unwrap().max(count)
    }
}

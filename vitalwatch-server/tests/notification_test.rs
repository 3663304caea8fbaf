use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

mod common;
use common::mock_app::{MockApp, SECRET};

async fn get_notifications(app: &MockApp, patient_id: i32, secret: Option<&str>) -> (StatusCode, Vec<u8>) {
    let mut builder = Request::builder()
        .uri(format!("/api/patients/{patient_id}/notifications"))
        .method(Method::GET);
    if let Some(secret) = secret {
        builder = builder.header("x-secret-key", secret);
    }
    let request = builder.body(Body::empty()).unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();

    (status, body.to_vec())
}

#[tokio::test]
async fn test_list_notifications_newest_first() {
    let app = MockApp::new().await;
    app.create_test_device("D1").await;
    let patient = app.create_test_patient("D1", 38.0, 100.0).await;

    let (status, _) = app
        .post_telemetry(json!({"deviceId": "D1", "secretKey": SECRET, "SOS": true}))
        .await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = app
        .post_telemetry(json!({"deviceId": "D1", "secretKey": SECRET, "fallDetection": true}))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = get_notifications(&app, patient.id, Some(SECRET)).await;
    assert_eq!(status, StatusCode::OK);

    let notifications: Vec<Value> = serde_json::from_slice(&body).unwrap();
    assert_eq!(notifications.len(), 2);
    assert_eq!(notifications[0]["id"], "2");
    assert_eq!(notifications[0]["notificationType"], "Fall Detection");
    assert_eq!(notifications[1]["id"], "1");
    assert_eq!(notifications[1]["notificationType"], "SOS");
    assert_eq!(notifications[1]["patient_id"], patient.id);
    assert!(notifications[1]["temperatureSpots"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_list_notifications_requires_secret() {
    let app = MockApp::new().await;
    app.create_test_device("D1").await;
    let patient = app.create_test_patient("D1", 38.0, 100.0).await;

    let (status, body) = get_notifications(&app, patient.id, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, b"Unauthorized");

    let (status, _) = get_notifications(&app, patient.id, Some("guess")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_list_notifications_unknown_patient() {
    let app = MockApp::new().await;

    let (status, body) = get_notifications(&app, 42, Some(SECRET)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, b"Not found");
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = MockApp::new().await;

    let request = Request::builder()
        .uri("/api/docs/openapi.json")
        .method(Method::GET)
        .body(Body::empty())
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let document: Value = serde_json::from_slice(&body).unwrap();
    assert!(document["paths"]["/api/telemetry"].is_object());
}

#[tokio::test]
async fn test_patient_info_carries_thresholds() {
    let app = MockApp::new().await;
    app.create_test_device("D1").await;
    let patient = app.create_test_patient("D1", 38.0, 100.0).await;

    let request = Request::builder()
        .uri(format!("/api/patients/{}", patient.id))
        .method(Method::GET)
        .header("x-secret-key", SECRET)
        .body(Body::empty())
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let info: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(info["deviceId"], "D1");
    assert_eq!(info["thresholds"]["temperature"], 38.0);
    assert_eq!(info["thresholds"]["heartRate"], 100.0);

    let request = Request::builder()
        .uri("/api/patients/42")
        .method(Method::GET)
        .header("x-secret-key", SECRET)
        .body(Body::empty())
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

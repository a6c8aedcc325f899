use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::time::Duration;
use tower::ServiceExt;

use vehicle_guardian::{
    api::create_app, config::environment::EnvironmentConfig,
    repositories::fleet_repository::FleetRepository, AppState,
};

#[tokio::test]
async fn test_health_check() {
    let (app, _) = create_test_app();
    let (status, body) = send(&app, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["service"], "vehicle-guardian");
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_list_vehicles() {
    let (app, _) = create_test_app();
    let (status, body) = send(&app, get("/api/vehicles")).await;

    assert_eq!(status, StatusCode::OK);
    let vehicles = body.as_array().unwrap();
    assert_eq!(vehicles.len(), 3);
    assert_eq!(vehicles[0]["id"], "VH001");
    assert_eq!(vehicles[0]["status"], "action_needed");
    assert_eq!(vehicles[1]["status"], "scheduled");
    assert_eq!(vehicles[0]["telemetry"]["brake_pad_thickness"], 22.0);
}

#[tokio::test]
async fn test_unknown_vehicle_is_404() {
    let (app, _) = create_test_app();
    let (status, body) = send(&app, get("/api/vehicles/VH999/alert")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_vehicle_alert() {
    let (app, _) = create_test_app();
    let (status, body) = send(&app, get("/api/vehicles/VH001/alert")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["severity"], "high");
    assert_eq!(body["requires_immediate_attention"], true);

    let warnings = body["component_warnings"].as_array().unwrap();
    let brakes = warnings
        .iter()
        .find(|w| w["component"] == "brake_pads")
        .unwrap();
    assert_eq!(brakes["level"], "critical");
    assert_eq!(brakes["message"], "Critical: Brake replacement needed");
}

#[tokio::test]
async fn test_engagement_accepted_then_rejected_while_active() {
    // Llamada larga para que la segunda solicitud llegue con la sesión activa
    let (app, state) = create_test_app_with_delay(Duration::from_millis(500));

    let (status, body) = send(&app, post("/api/vehicles/VH001/engagement")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["accepted"], true);
    assert_eq!(body["session"]["active"], true);
    assert_eq!(body["session"]["vehicle"]["id"], "VH001");

    let (status, body) = send(&app, post("/api/vehicles/VH003/engagement")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["accepted"], false);
    assert_eq!(body["reason"], "session_active");
    assert_eq!(body["active_vehicle_id"], "VH001");

    state.orchestrator.wait_for_completion().await.unwrap();

    let (_, session) = send(&app, get("/api/engagement/session")).await;
    assert_eq!(session["active"], false);

    let (_, vehicle) = send(&app, get("/api/vehicles/VH001")).await;
    assert_eq!(vehicle["status"], "scheduled");
}

#[tokio::test]
async fn test_engagement_on_scheduled_vehicle_is_rejected() {
    let (app, _) = create_test_app();

    let (status, body) = send(&app, post("/api/vehicles/VH002/engagement")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["accepted"], false);
    assert_eq!(body["reason"], "already_scheduled");
    assert_eq!(body["session"]["active"], false);

    let (_, notifications) = send(&app, get("/api/notifications")).await;
    assert!(notifications.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_notifications_limit_and_validation() {
    let (app, state) = create_test_app();

    send(&app, post("/api/vehicles/VH001/engagement")).await;
    state.orchestrator.wait_for_completion().await.unwrap();

    let (status, body) = send(&app, get("/api/notifications?limit=1")).await;
    assert_eq!(status, StatusCode::OK);
    let events = body.as_array().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["kind"], "call_completed");

    let (status, body) = send(&app, get("/api/notifications")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);

    let (status, body) = send(&app, get("/api/notifications?limit=0")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_fleet_summary() {
    let (app, _) = create_test_app();
    let (status, body) = send(&app, get("/api/fleet/summary")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_vehicles"], 3);
    assert_eq!(body["vehicles_needing_action"], 2);
    assert_eq!(body["utilization_rate"], 87.0);
    assert_eq!(body["forecast_buckets"].as_array().unwrap().len(), 4);
    assert_eq!(body["action_list"][0]["vehicle_id"], "VH001");
    assert_eq!(body["action_list"][1]["vehicle_id"], "VH003");
    assert_eq!(body["status_breakdown"]["scheduled"], 1);
}

#[tokio::test]
async fn test_update_readings_changes_alert() {
    let (app, _) = create_test_app();

    let request = json!({
        "telemetry": {
            "engine_oil_level": 90,
            "brake_pad_thickness": 85,
            "battery_health": 65,
            "tire_condition": 88,
            "coolant_level": 140,
            "transmission_health": 96,
            "fuel_efficiency": 16.2,
            "mileage": 35900,
            "last_service_date": "2024-10-05",
            "next_service_due": "2025-02-05",
            "engine_temp": 88
        },
        "prediction": {
            "issue": "Battery Health Degradation",
            "severity": "medium",
            "days_until_failure": 9,
            "confidence": 84,
            "recommendation": "Battery replacement recommended"
        }
    });
    let (status, body) = send(&app, put_json("/api/vehicles/VH003/readings", &request)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["prediction"]["severity"], "medium");

    let (_, alert) = send(&app, get("/api/vehicles/VH003/alert")).await;
    let warnings = alert["component_warnings"].as_array().unwrap();
    let battery = warnings.iter().find(|w| w["component"] == "battery").unwrap();
    assert_eq!(battery["message"], "Battery replacement recommended");
    let coolant = warnings.iter().find(|w| w["component"] == "coolant").unwrap();
    assert_eq!(coolant["value"], 100.0);
}

#[tokio::test]
async fn test_update_readings_rejects_empty_issue() {
    let (app, _) = create_test_app();
    let (_, vehicle) = send(&app, get("/api/vehicles/VH003")).await;

    let mut prediction = vehicle["prediction"].clone();
    prediction["issue"] = json!("  ");
    let request = json!({
        "telemetry": vehicle["telemetry"],
        "prediction": prediction,
    });

    let (status, body) = send(&app, put_json("/api/vehicles/VH003/readings", &request)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

// Función helper para crear la app de test con una llamada simulada corta
fn create_test_app() -> (Router, AppState) {
    create_test_app_with_delay(Duration::from_millis(20))
}

fn create_test_app_with_delay(delay: Duration) -> (Router, AppState) {
    let config = EnvironmentConfig {
        call_simulation_delay: delay,
        ..EnvironmentConfig::default()
    };
    let snapshot = FleetRepository::seed().unwrap();
    let state = AppState::new(config, snapshot);
    (create_app(state.clone()), state)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post(uri: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn put_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("PUT")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

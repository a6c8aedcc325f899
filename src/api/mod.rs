//! API endpoints
//!
//! Este módulo contiene los endpoints de la API.

pub mod engagement;
pub mod fleet;
pub mod vehicles;

use axum::{routing::get, Json, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::middleware::cors::cors_layer;
use crate::state::AppState;

/// Crear la aplicación completa: rutas, CORS, trazas y estado
pub fn create_app(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origins);
    create_api_router()
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Crear el router principal de la API
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/vehicles", vehicles::create_vehicle_router())
        .nest("/api/fleet", fleet::create_fleet_router())
        .merge(engagement::create_engagement_router())
}

/// Endpoint de salud simple
async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "service": "vehicle-guardian",
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

//! Handlers de Vehicles
//!
//! Este módulo expone el listado de vehículos, su alerta clasificada,
//! la actualización de lecturas y la solicitud de engagement.

use axum::{
    extract::{Path, State},
    routing::{get, post, put},
    Json, Router,
};

use crate::{
    dto::fleet_dto::{ApiResponse, EngagementResponse, UpdateReadingsRequest},
    models::{ClassifiedAlert, VehicleRecord},
    state::AppState,
    utils::{
        errors::{AppError, AppResult},
        validation::{validate_request, validate_vehicle_id},
    },
};

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vehicles))
        .route("/:id", get(get_vehicle))
        .route("/:id/alert", get(get_vehicle_alert))
        .route("/:id/readings", put(update_readings))
        .route("/:id/engagement", post(request_engagement))
}

/// Obtener todos los vehículos
async fn list_vehicles(State(state): State<AppState>) -> Json<Vec<VehicleRecord>> {
    Json(state.list_vehicles().await)
}

/// Obtener un vehículo por ID
async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<VehicleRecord>> {
    Ok(Json(state.vehicle(&id).await?))
}

/// Alerta clasificada del vehículo
async fn get_vehicle_alert(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ClassifiedAlert>> {
    Ok(Json(state.classify(&id).await?))
}

/// Reemplazar telemetría y predicción (servicio de ingesta)
async fn update_readings(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateReadingsRequest>,
) -> AppResult<Json<ApiResponse<VehicleRecord>>> {
    validate_vehicle_id(&id)
        .map_err(|_| AppError::BadRequest(format!("Invalid vehicle id: {}", id)))?;
    validate_request(&request)?;
    let vehicle = state
        .update_readings(&id, request.telemetry, request.prediction.into())
        .await?;
    Ok(Json(ApiResponse::success_with_message(
        vehicle,
        "Lecturas actualizadas exitosamente".to_string(),
    )))
}

/// Iniciar la llamada de voz. Un rechazo no es un error HTTP.
async fn request_engagement(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<EngagementResponse> {
    let response = match state.try_request_engagement(&id).await {
        Ok(session) => {
            tracing::info!("📞 Engagement aceptado para {}", id);
            EngagementResponse::accepted(session)
        }
        Err(rejection) => {
            tracing::info!("🚫 Engagement rechazado para {}: {}", id, rejection);
            EngagementResponse::rejected(rejection, state.current_session().await)
        }
    };
    Json(response)
}

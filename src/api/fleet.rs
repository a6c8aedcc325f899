//! Handlers de Fleet
//!
//! Resumen de flota y capacidad del centro de servicio.

use axum::{extract::State, routing::get, Json, Router};

use crate::{models::FleetSummary, state::AppState};

pub fn create_fleet_router() -> Router<AppState> {
    Router::new().route("/summary", get(fleet_summary))
}

async fn fleet_summary(State(state): State<AppState>) -> Json<FleetSummary> {
    Json(state.fleet_summary().await)
}

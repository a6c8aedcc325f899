//! Handlers de engagement y notificaciones

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};

use crate::{
    dto::fleet_dto::NotificationQuery,
    models::{CallSession, NotificationEvent},
    state::AppState,
    utils::{errors::AppResult, validation::validate_request},
};

pub fn create_engagement_router() -> Router<AppState> {
    Router::new()
        .route("/api/engagement/session", get(current_session))
        .route("/api/notifications", get(recent_notifications))
}

/// Sesión de llamada actual
async fn current_session(State(state): State<AppState>) -> Json<CallSession> {
    Json(state.current_session().await)
}

/// Notificaciones recientes, de la más nueva a la más antigua
async fn recent_notifications(
    State(state): State<AppState>,
    Query(query): Query<NotificationQuery>,
) -> AppResult<Json<Vec<NotificationEvent>>> {
    validate_request(&query)?;
    let limit = query.limit.unwrap_or(state.config.notification_display_limit);
    Ok(Json(state.recent_notifications(limit).await))
}

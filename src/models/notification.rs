//! Modelos de notificaciones
//!
//! Eventos inmutables emitidos por el orquestador de llamadas.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Tipo de evento
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    CallInitiated,
    CallCompleted,
    CallFailed,
}

/// Evento de notificación
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NotificationEvent {
    /// Id monótono derivado del reloj (milisegundos)
    pub id: u64,
    pub kind: NotificationKind,
    pub vehicle_id: String,
    pub registration: String,
    pub message: String,
    /// Orden de creación dentro del log
    pub sequence: u64,
    pub created_at: DateTime<Utc>,
}

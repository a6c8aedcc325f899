//! Modelos de engagement (llamadas de voz)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::vehicle::VehicleRecord;

/// Vista de la sesión de llamada para la capa de presentación
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CallSession {
    pub active: bool,
    pub vehicle: Option<VehicleRecord>,
    pub started_at: Option<DateTime<Utc>>,
}

impl CallSession {
    pub fn idle() -> Self {
        Self {
            active: false,
            vehicle: None,
            started_at: None,
        }
    }

    pub fn vehicle_id(&self) -> Option<&str> {
        self.vehicle.as_ref().map(|v| v.id.as_str())
    }
}

/// Motivo por el que se rechaza una solicitud de engagement
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum EngagementRejection {
    #[error("Another call is in progress for vehicle {active_vehicle_id}")]
    SessionActive { active_vehicle_id: String },

    #[error("Vehicle {vehicle_id} is already scheduled")]
    AlreadyScheduled { vehicle_id: String },

    #[error("Vehicle {vehicle_id} not found")]
    UnknownVehicle { vehicle_id: String },
}

//! Modelo de Vehicle
//!
//! Este módulo contiene el registro de vehículo con su telemetría y su
//! predicción de mantenimiento embebidas.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Estado de engagement del vehículo
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum EngagementStatus {
    /// Sin acción todavía
    Monitoring,
    /// Alerta levantada, sin llamada iniciada
    ActionNeeded,
    /// Llamada completada, servicio agendado
    Scheduled,
}

impl EngagementStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EngagementStatus::Monitoring => "monitoring",
            EngagementStatus::ActionNeeded => "action_needed",
            EngagementStatus::Scheduled => "scheduled",
        }
    }

    pub fn is_scheduled(&self) -> bool {
        matches!(self, EngagementStatus::Scheduled)
    }
}

/// Severidad de la falla predicha
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    /// Peso usado en el cálculo de urgencia
    pub fn weight(&self) -> u32 {
        match self {
            Severity::Low => 1,
            Severity::Medium => 2,
            Severity::High => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

/// Snapshot de telemetría de un vehículo
///
/// Los porcentajes se guardan tal como llegan; la clasificación los acota a [0, 100].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Telemetry {
    pub engine_oil_level: f64,
    pub brake_pad_thickness: f64,
    pub battery_health: f64,
    pub tire_condition: f64,
    pub coolant_level: f64,
    pub transmission_health: f64,
    /// km/l
    pub fuel_efficiency: f64,
    /// km
    pub mileage: u64,
    pub last_service_date: NaiveDate,
    pub next_service_due: NaiveDate,
    /// Grados Celsius
    pub engine_temp: f64,
}

/// Predicción de mantenimiento (entrada externa)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Prediction {
    pub issue: String,
    pub severity: Severity,
    pub days_until_failure: u32,
    pub confidence: f64,
    pub recommendation: String,
}

/// Registro de vehículo - identidad, telemetría, predicción y estado
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VehicleRecord {
    pub id: String,
    pub model: String,
    pub owner: String,
    pub phone: String,
    pub registration: String,
    pub prediction: Prediction,
    pub status: EngagementStatus,
    pub telemetry: Telemetry,
}

impl VehicleRecord {
    /// Verificar si el vehículo puede recibir una llamada
    pub fn can_be_engaged(&self) -> bool {
        !self.status.is_scheduled()
    }
}

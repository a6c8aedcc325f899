//! Modelos del centro de servicio
//!
//! Estadísticas externas del centro de servicio (entradas, no calculadas)
//! y el resumen de flota listo para el dashboard.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::alert::ClassifiedAlert;
use super::vehicle::{EngagementStatus, Severity};

/// Número de semanas del pronóstico de citas
pub const FORECAST_WEEKS: usize = 4;

/// Citas esperadas para una semana
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ForecastBucket {
    /// Semana 1..=4
    pub week: u8,
    pub expected_appointments: u32,
}

/// Métricas del canal de voz
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VoiceEngagementStats {
    pub engagement_rate: f64,
    pub calls_today: u32,
    pub appointments_booked: u32,
    pub avg_call_duration_minutes: f64,
}

/// Estadísticas del centro de servicio provistas externamente
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServiceCenterStats {
    pub utilization_rate: f64,
    pub avg_service_time_minutes: u32,
    /// Porcentaje de citas pre-agendadas
    pub pre_scheduled_ratio: f64,
    pub monthly_revenue: String,
    pub forecast_buckets: [ForecastBucket; FORECAST_WEEKS],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revenue_forecast: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parts_alert: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub staffing_plan: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice_engagement: Option<VoiceEngagementStats>,
}

/// Vehículo que requiere acción, con su alerta clasificada
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActionItem {
    pub vehicle_id: String,
    pub registration: String,
    pub owner: String,
    pub model: String,
    pub status: EngagementStatus,
    pub alert: ClassifiedAlert,
}

/// Resumen de flota para el dashboard
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FleetSummary {
    pub total_vehicles: usize,
    pub vehicles_needing_action: usize,
    pub utilization_rate: f64,
    pub avg_service_time_minutes: u32,
    pub pre_scheduled_ratio: f64,
    pub monthly_revenue: String,
    pub forecast_buckets: [ForecastBucket; FORECAST_WEEKS],
    /// Ordenada por urgencia descendente
    pub action_list: Vec<ActionItem>,
    pub status_breakdown: BTreeMap<EngagementStatus, usize>,
    /// Severidades dentro de la lista de acción
    pub severity_breakdown: BTreeMap<Severity, usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revenue_forecast: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parts_alert: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub staffing_plan: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice_engagement: Option<VoiceEngagementStats>,
}

//! Agregador de flota
//!
//! Resume el conjunto de vehículos para las vistas de capacidad: la lista
//! "requiere acción" ordenada por urgencia y el paso directo de las
//! estadísticas del centro de servicio. No hace predicción propia.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use crate::models::{ActionItem, FleetSummary, ServiceCenterStats, VehicleRecord};
use crate::services::alert_derivation;

/// Vehículos que requieren acción (estado distinto de `scheduled`),
/// de mayor a menor urgencia; empates por id ascendente.
pub fn action_list(vehicles: &[VehicleRecord]) -> Vec<ActionItem> {
    let mut items: Vec<ActionItem> = vehicles
        .iter()
        .filter(|v| !v.status.is_scheduled())
        .map(|v| ActionItem {
            vehicle_id: v.id.clone(),
            registration: v.registration.clone(),
            owner: v.owner.clone(),
            model: v.model.clone(),
            status: v.status,
            alert: alert_derivation::classify(&v.telemetry, &v.prediction),
        })
        .collect();

    items.sort_by(|a, b| {
        Reverse(a.alert.urgency)
            .cmp(&Reverse(b.alert.urgency))
            .then_with(|| a.vehicle_id.cmp(&b.vehicle_id))
    });
    items
}

/// Resumen de flota listo para el dashboard
pub fn fleet_summary(vehicles: &[VehicleRecord], stats: &ServiceCenterStats) -> FleetSummary {
    let action_list = action_list(vehicles);

    let mut status_breakdown = BTreeMap::new();
    for vehicle in vehicles {
        *status_breakdown.entry(vehicle.status).or_insert(0) += 1;
    }

    let mut severity_breakdown = BTreeMap::new();
    for item in &action_list {
        *severity_breakdown.entry(item.alert.severity).or_insert(0) += 1;
    }

    FleetSummary {
        total_vehicles: vehicles.len(),
        vehicles_needing_action: action_list.len(),
        utilization_rate: stats.utilization_rate,
        avg_service_time_minutes: stats.avg_service_time_minutes,
        pre_scheduled_ratio: stats.pre_scheduled_ratio,
        monthly_revenue: stats.monthly_revenue.clone(),
        forecast_buckets: stats.forecast_buckets,
        action_list,
        status_breakdown,
        severity_breakdown,
        revenue_forecast: stats.revenue_forecast.clone(),
        parts_alert: stats.parts_alert.clone(),
        staffing_plan: stats.staffing_plan.clone(),
        voice_engagement: stats.voice_engagement.clone(),
    }
}

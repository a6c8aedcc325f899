//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum. Es la fachada del núcleo hacia la capa de
//! presentación: toda mutación pasa por el orquestador.

use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::models::{
    CallSession, ClassifiedAlert, EngagementRejection, FleetSummary, NotificationEvent,
    Prediction, ServiceCenterStats, Telemetry, VehicleRecord,
};
use crate::repositories::fleet_repository::FleetSnapshot;
use crate::services::{alert_derivation, fleet_aggregator, EngagementDialer, EngagementOrchestrator};
use crate::utils::errors::{not_found_error, AppResult};

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub orchestrator: Arc<EngagementOrchestrator>,
    pub service_center: Arc<ServiceCenterStats>,
}

impl AppState {
    /// Estado con el marcador simulado según la configuración
    pub fn new(config: EnvironmentConfig, snapshot: FleetSnapshot) -> Self {
        let orchestrator = EngagementOrchestrator::with_simulated_delay(
            snapshot.vehicles,
            config.call_simulation_delay,
        );
        Self::from_parts(config, orchestrator, snapshot.service_center)
    }

    /// Estado con un marcador propio
    pub fn with_dialer(
        config: EnvironmentConfig,
        snapshot: FleetSnapshot,
        dialer: Arc<dyn EngagementDialer>,
    ) -> Self {
        let orchestrator = EngagementOrchestrator::new(snapshot.vehicles, dialer);
        Self::from_parts(config, orchestrator, snapshot.service_center)
    }

    fn from_parts(
        config: EnvironmentConfig,
        orchestrator: EngagementOrchestrator,
        service_center: ServiceCenterStats,
    ) -> Self {
        Self {
            config,
            orchestrator: Arc::new(orchestrator),
            service_center: Arc::new(service_center),
        }
    }

    pub async fn list_vehicles(&self) -> Vec<VehicleRecord> {
        self.orchestrator.list_vehicles().await
    }

    pub async fn vehicle(&self, vehicle_id: &str) -> AppResult<VehicleRecord> {
        self.orchestrator
            .vehicle(vehicle_id)
            .await
            .ok_or_else(|| not_found_error("Vehicle", vehicle_id))
    }

    /// Alerta clasificada de un vehículo
    pub async fn classify(&self, vehicle_id: &str) -> AppResult<ClassifiedAlert> {
        let vehicle = self.vehicle(vehicle_id).await?;
        Ok(alert_derivation::classify(&vehicle.telemetry, &vehicle.prediction))
    }

    pub async fn update_readings(
        &self,
        vehicle_id: &str,
        telemetry: Telemetry,
        prediction: Prediction,
    ) -> AppResult<VehicleRecord> {
        self.orchestrator
            .update_readings(vehicle_id, telemetry, prediction)
            .await
            .ok_or_else(|| not_found_error("Vehicle", vehicle_id))
    }

    /// `true` si la solicitud fue aceptada y la sesión pasó a `Calling`
    pub async fn request_engagement(&self, vehicle_id: &str) -> bool {
        self.orchestrator.request_engagement(vehicle_id).await
    }

    pub async fn try_request_engagement(
        &self,
        vehicle_id: &str,
    ) -> Result<CallSession, EngagementRejection> {
        self.orchestrator.try_request_engagement(vehicle_id).await
    }

    pub async fn current_session(&self) -> CallSession {
        self.orchestrator.current_session().await
    }

    pub async fn recent_notifications(&self, n: usize) -> Vec<NotificationEvent> {
        self.orchestrator.recent_notifications(n).await
    }

    pub async fn fleet_summary(&self) -> FleetSummary {
        let vehicles = self.orchestrator.list_vehicles().await;
        fleet_aggregator::fleet_summary(&vehicles, &self.service_center)
    }
}

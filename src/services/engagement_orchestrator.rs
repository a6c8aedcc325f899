//! Orquestador de engagement (llamadas de voz)
//!
//! Máquina de estados de la llamada con una única sesión activa en toda la
//! flota:
//!
//! ```text
//! Idle ──request──▶ Calling(v) ──dialer ok──▶ Completed(v) ──▶ Idle
//!                        │
//!                        └──dialer err──▶ Failed(v, reason) ──▶ Idle
//! ```
//!
//! Todo el estado mutable (vehículos, sesión, feed) vive detrás de un único
//! `RwLock`; cada transición ocurre dentro de una sola sección crítica de
//! escritura. La finalización corre en una tarea de tokio independiente de
//! quien hizo la solicitud, así que soltar al solicitante no la cancela.
//! Un canal `watch` publica si hay llamada en curso; cualquier cantidad de
//! tareas puede esperar el fin de la llamada.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{watch, RwLock};

use crate::models::{
    CallSession, EngagementRejection, EngagementStatus, NotificationEvent, NotificationKind,
    Prediction, Telemetry, VehicleRecord,
};
use crate::services::notification_feed::NotificationFeed;
use crate::services::telemetry_store::TelemetryStore;
use crate::utils::errors::{internal_error, AppResult};

/// Falla reportada por el marcador
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct DialFailure(pub String);

/// Canal que realiza la llamada al dueño del vehículo
#[async_trait]
pub trait EngagementDialer: Send + Sync {
    /// Resuelve cuando la llamada termina
    async fn place_call(&self, vehicle: &VehicleRecord) -> Result<(), DialFailure>;
}

/// Marcador simulado: espera un retardo fijo y siempre tiene éxito
#[derive(Debug, Clone)]
pub struct SimulatedDialer {
    delay: Duration,
}

impl SimulatedDialer {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl EngagementDialer for SimulatedDialer {
    async fn place_call(&self, vehicle: &VehicleRecord) -> Result<(), DialFailure> {
        log::debug!(
            "📞 Simulando llamada a {} ({} ms)",
            vehicle.owner,
            self.delay.as_millis()
        );
        tokio::time::sleep(self.delay).await;
        Ok(())
    }
}

/// Fase de la sesión de llamada
#[derive(Debug, Clone, PartialEq)]
pub enum SessionPhase {
    Idle,
    Calling {
        vehicle: VehicleRecord,
        started_at: DateTime<Utc>,
    },
    Completed {
        vehicle: VehicleRecord,
    },
    Failed {
        vehicle: VehicleRecord,
        reason: String,
    },
}

impl SessionPhase {
    fn describe(&self) -> String {
        match self {
            SessionPhase::Idle => "Idle".to_string(),
            SessionPhase::Calling { vehicle, .. } => format!("Calling({})", vehicle.id),
            SessionPhase::Completed { vehicle } => format!("Completed({})", vehicle.id),
            SessionPhase::Failed { vehicle, reason } => {
                format!("Failed({}, {})", vehicle.id, reason)
            }
        }
    }
}

/// Estado compartido del proceso
#[derive(Debug)]
struct FleetState {
    store: TelemetryStore,
    phase: SessionPhase,
    feed: NotificationFeed,
    /// `true` mientras la fase es `Calling`
    call_in_progress: watch::Sender<bool>,
    next_sequence: u64,
    last_notification_id: u64,
}

impl FleetState {
    fn transition(&mut self, next: SessionPhase) {
        log::debug!(
            "🔁 Sesión: {} → {}",
            self.phase.describe(),
            next.describe()
        );
        let calling = matches!(next, SessionPhase::Calling { .. });
        self.phase = next;
        self.call_in_progress.send_replace(calling);
    }

    fn emit(&mut self, kind: NotificationKind, vehicle: &VehicleRecord, message: String) {
        let created_at = Utc::now();
        let millis = u64::try_from(created_at.timestamp_millis()).unwrap_or(0);
        let id = millis.max(self.last_notification_id + 1);
        self.last_notification_id = id;
        self.next_sequence += 1;

        log::info!("🔔 [{:?}] {}: {}", kind, vehicle.registration, message);
        self.feed.append(NotificationEvent {
            id,
            kind,
            vehicle_id: vehicle.id.clone(),
            registration: vehicle.registration.clone(),
            message,
            sequence: self.next_sequence,
            created_at,
        });
    }

    fn session(&self) -> CallSession {
        match &self.phase {
            SessionPhase::Calling {
                vehicle,
                started_at,
            } => CallSession {
                active: true,
                vehicle: Some(vehicle.clone()),
                started_at: Some(*started_at),
            },
            _ => CallSession::idle(),
        }
    }
}

/// Orquestador de engagement - dueño único del estado del proceso
pub struct EngagementOrchestrator {
    state: Arc<RwLock<FleetState>>,
    dialer: Arc<dyn EngagementDialer>,
}

impl EngagementOrchestrator {
    /// Crear el orquestador: log vacío y sesión en `Idle`
    pub fn new(vehicles: Vec<VehicleRecord>, dialer: Arc<dyn EngagementDialer>) -> Self {
        Self {
            state: Arc::new(RwLock::new(FleetState {
                store: TelemetryStore::new(vehicles),
                phase: SessionPhase::Idle,
                feed: NotificationFeed::new(),
                call_in_progress: watch::Sender::new(false),
                next_sequence: 0,
                last_notification_id: 0,
            })),
            dialer,
        }
    }

    /// Crear el orquestador con el marcador simulado
    pub fn with_simulated_delay(vehicles: Vec<VehicleRecord>, delay: Duration) -> Self {
        Self::new(vehicles, Arc::new(SimulatedDialer::new(delay)))
    }

    pub async fn list_vehicles(&self) -> Vec<VehicleRecord> {
        self.state.read().await.store.list().to_vec()
    }

    pub async fn vehicle(&self, vehicle_id: &str) -> Option<VehicleRecord> {
        self.state.read().await.store.get(vehicle_id).cloned()
    }

    /// Reemplazar telemetría y predicción de un vehículo
    pub async fn update_readings(
        &self,
        vehicle_id: &str,
        telemetry: Telemetry,
        prediction: Prediction,
    ) -> Option<VehicleRecord> {
        let mut state = self.state.write().await;
        let updated = state
            .store
            .update_readings(vehicle_id, telemetry, prediction)
            .cloned();
        if let Some(vehicle) = &updated {
            log::info!(
                "📡 Lecturas actualizadas para {} (severidad {})",
                vehicle_id,
                vehicle.prediction.severity.as_str()
            );
        }
        updated
    }

    pub async fn current_session(&self) -> CallSession {
        self.state.read().await.session()
    }

    pub async fn phase(&self) -> SessionPhase {
        self.state.read().await.phase.clone()
    }

    pub async fn is_call_in_progress(&self) -> bool {
        matches!(self.state.read().await.phase, SessionPhase::Calling { .. })
    }

    /// Los últimos `n` eventos, del más reciente al más antiguo
    pub async fn recent_notifications(&self, n: usize) -> Vec<NotificationEvent> {
        self.state.read().await.feed.recent(n).cloned().collect()
    }

    pub async fn notification_count(&self) -> usize {
        self.state.read().await.feed.len()
    }

    /// Solicitar una llamada. `true` si la sesión pasó a `Calling`.
    pub async fn request_engagement(&self, vehicle_id: &str) -> bool {
        self.try_request_engagement(vehicle_id).await.is_ok()
    }

    /// Solicitar una llamada, devolviendo el motivo del rechazo
    pub async fn try_request_engagement(
        &self,
        vehicle_id: &str,
    ) -> Result<CallSession, EngagementRejection> {
        let mut state = self.state.write().await;

        if let SessionPhase::Calling { vehicle, .. } = &state.phase {
            log::warn!(
                "🚫 Engagement rechazado para {}: llamada en curso con {}",
                vehicle_id,
                vehicle.id
            );
            return Err(EngagementRejection::SessionActive {
                active_vehicle_id: vehicle.id.clone(),
            });
        }

        let vehicle = match state.store.get(vehicle_id) {
            Some(vehicle) => vehicle.clone(),
            None => {
                log::warn!("🚫 Engagement rechazado: vehículo {} no existe", vehicle_id);
                return Err(EngagementRejection::UnknownVehicle {
                    vehicle_id: vehicle_id.to_string(),
                });
            }
        };

        if !vehicle.can_be_engaged() {
            log::warn!("🚫 Engagement rechazado: {} ya está agendado", vehicle_id);
            return Err(EngagementRejection::AlreadyScheduled {
                vehicle_id: vehicle_id.to_string(),
            });
        }

        state.transition(SessionPhase::Calling {
            vehicle: vehicle.clone(),
            started_at: Utc::now(),
        });
        state.emit(
            NotificationKind::CallInitiated,
            &vehicle,
            format!("Voice AI calling {}...", vehicle.owner),
        );

        tokio::spawn(run_call(
            Arc::clone(&self.state),
            Arc::clone(&self.dialer),
            vehicle,
        ));

        Ok(state.session())
    }

    /// Esperar a que termine la llamada en curso, si hay una.
    /// Todos los que esperan a la vez ven la misma finalización.
    pub async fn wait_for_completion(&self) -> AppResult<()> {
        let mut call_in_progress = self.state.read().await.call_in_progress.subscribe();
        call_in_progress
            .wait_for(|calling| !*calling)
            .await
            .map_err(|e| internal_error(&format!("call watch closed: {}", e)))?;
        Ok(())
    }
}

async fn run_call(
    state: Arc<RwLock<FleetState>>,
    dialer: Arc<dyn EngagementDialer>,
    vehicle: VehicleRecord,
) {
    let outcome = dialer.place_call(&vehicle).await;
    let mut state = state.write().await;

    match outcome {
        Ok(()) => {
            state.transition(SessionPhase::Completed {
                vehicle: vehicle.clone(),
            });
            if let Some(previous) = state
                .store
                .set_status(&vehicle.id, EngagementStatus::Scheduled)
            {
                log::debug!(
                    "🗓️ {}: {} → {}",
                    vehicle.id,
                    previous.as_str(),
                    EngagementStatus::Scheduled.as_str()
                );
            }
            state.emit(
                NotificationKind::CallCompleted,
                &vehicle,
                format!(
                    "Call completed. {} agreed to schedule service.",
                    vehicle.owner
                ),
            );
            log::info!("✅ Servicio agendado para {}", vehicle.id);
        }
        Err(failure) => {
            state.transition(SessionPhase::Failed {
                vehicle: vehicle.clone(),
                reason: failure.0.clone(),
            });
            state.emit(
                NotificationKind::CallFailed,
                &vehicle,
                format!("Call to {} failed: {}", vehicle.owner, failure),
            );
            log::error!("❌ Llamada fallida para {}: {}", vehicle.id, failure);
        }
    }

    state.transition(SessionPhase::Idle);
}

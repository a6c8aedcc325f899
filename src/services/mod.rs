//! Services module
//!
//! Este módulo contiene la lógica de negocio del núcleo: derivación de
//! alertas, feed de notificaciones, orquestación de llamadas y agregación
//! de flota.

pub mod alert_derivation;
pub mod engagement_orchestrator;
pub mod fleet_aggregator;
pub mod notification_feed;
pub mod telemetry_store;

pub use engagement_orchestrator::{
    DialFailure, EngagementDialer, EngagementOrchestrator, SessionPhase, SimulatedDialer,
};
pub use notification_feed::NotificationFeed;
pub use telemetry_store::TelemetryStore;

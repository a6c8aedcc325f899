//! Repositorio de flota
//!
//! Carga los datos iniciales de la flota (vehículos con telemetría y
//! predicción, más las estadísticas del centro de servicio) desde un
//! documento JSON: un archivo configurado o la flota de ejemplo embebida.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::models::{ServiceCenterStats, VehicleRecord};
use crate::utils::errors::{AppError, AppResult};

const SEED_FLEET: &str = include_str!("../../data/fleet_seed.json");

/// Documento de datos de flota
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FleetSnapshot {
    pub vehicles: Vec<VehicleRecord>,
    pub service_center: ServiceCenterStats,
}

pub struct FleetRepository;

impl FleetRepository {
    /// Flota de ejemplo embebida en el binario
    pub fn seed() -> AppResult<FleetSnapshot> {
        Self::parse(SEED_FLEET)
    }

    /// Cargar la flota desde un archivo JSON
    pub async fn load_file(path: &Path) -> AppResult<FleetSnapshot> {
        log::info!("📂 Cargando datos de flota desde {}", path.display());
        let raw = tokio::fs::read_to_string(path).await?;
        Self::parse(&raw)
    }

    /// Cargar desde el archivo si hay uno configurado, si no la flota embebida
    pub async fn load(path: Option<&Path>) -> AppResult<FleetSnapshot> {
        match path {
            Some(path) => Self::load_file(path).await,
            None => {
                log::info!("📂 Usando flota de ejemplo embebida");
                Self::seed()
            }
        }
    }

    /// Parsear y validar un documento de flota
    pub fn parse(raw: &str) -> AppResult<FleetSnapshot> {
        let snapshot: FleetSnapshot = serde_json::from_str(raw)?;
        Self::check_forecast_weeks(&snapshot)?;
        log::info!(
            "✅ Flota cargada: {} vehículos, utilización {}%",
            snapshot.vehicles.len(),
            snapshot.service_center.utilization_rate
        );
        Ok(snapshot)
    }

    fn check_forecast_weeks(snapshot: &FleetSnapshot) -> AppResult<()> {
        for (index, bucket) in snapshot.service_center.forecast_buckets.iter().enumerate() {
            let expected = index as u8 + 1;
            if bucket.week != expected {
                return Err(AppError::Config(format!(
                    "forecast bucket {} has week {}, expected {}",
                    index, bucket.week, expected
                )));
            }
        }
        Ok(())
    }
}

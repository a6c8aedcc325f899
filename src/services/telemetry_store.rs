//! Almacén de telemetría
//!
//! Registros de vehículos en memoria, en orden de carga, indexados por id.

use std::collections::HashMap;

use crate::models::{EngagementStatus, Prediction, Telemetry, VehicleRecord};

#[derive(Debug, Default, Clone)]
pub struct TelemetryStore {
    vehicles: Vec<VehicleRecord>,
    index: HashMap<String, usize>,
}

impl TelemetryStore {
    /// Crear el almacén a partir de los registros iniciales.
    /// Si un id se repite, gana el último registro.
    pub fn new(records: Vec<VehicleRecord>) -> Self {
        let mut store = Self::default();
        for record in records {
            match store.index.get(&record.id) {
                Some(&position) => {
                    log::warn!("⚠️ Vehículo duplicado {}, se reemplaza el registro anterior", record.id);
                    store.vehicles[position] = record;
                }
                None => {
                    store.index.insert(record.id.clone(), store.vehicles.len());
                    store.vehicles.push(record);
                }
            }
        }
        store
    }

    pub fn get(&self, vehicle_id: &str) -> Option<&VehicleRecord> {
        self.index.get(vehicle_id).map(|&i| &self.vehicles[i])
    }

    fn get_mut(&mut self, vehicle_id: &str) -> Option<&mut VehicleRecord> {
        let position = *self.index.get(vehicle_id)?;
        self.vehicles.get_mut(position)
    }

    /// Todos los vehículos en orden de carga
    pub fn list(&self) -> &[VehicleRecord] {
        &self.vehicles
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    /// Cambiar el estado de engagement. Devuelve el estado anterior.
    pub fn set_status(&mut self, vehicle_id: &str, status: EngagementStatus) -> Option<EngagementStatus> {
        let vehicle = self.get_mut(vehicle_id)?;
        let previous = vehicle.status;
        vehicle.status = status;
        Some(previous)
    }

    /// Reemplazar el snapshot de telemetría y la predicción de un vehículo
    pub fn update_readings(
        &mut self,
        vehicle_id: &str,
        telemetry: Telemetry,
        prediction: Prediction,
    ) -> Option<&VehicleRecord> {
        let vehicle = self.get_mut(vehicle_id)?;
        vehicle.telemetry = telemetry;
        vehicle.prediction = prediction;
        Some(&*vehicle)
    }
}

//! Vehicle Guardian
//!
//! Núcleo de un dashboard de mantenimiento predictivo de flota: deriva
//! alertas a partir de la telemetría, orquesta la llamada de voz al dueño
//! del vehículo y agrega la flota para las vistas de capacidad del centro
//! de servicio.

pub mod api;
pub mod config;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod services;
pub mod state;
pub mod utils;

pub use state::AppState;

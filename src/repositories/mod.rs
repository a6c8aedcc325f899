//! Repositorios
//!
//! Fuentes de datos iniciales del sistema.

pub mod fleet_repository;

pub use fleet_repository::*;

//! Middleware del sistema
//!
//! Este módulo contiene el middleware de CORS para la capa de presentación.

pub mod cors;

pub use cors::*;

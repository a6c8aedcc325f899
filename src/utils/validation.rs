//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! de entrada de la API.

use validator::{Validate, ValidationError};

use super::errors::AppResult;

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar longitud mínima y máxima
pub fn validate_length(value: &str, min: usize, max: usize) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len < min || len > max {
        let mut error = ValidationError::new("length");
        error.add_param("min".into(), &min);
        error.add_param("max".into(), &max);
        error.add_param("actual".into(), &len);
        return Err(error);
    }
    Ok(())
}

/// Validar id de vehículo (ej. "VH001")
pub fn validate_vehicle_id(value: &str) -> Result<(), ValidationError> {
    validate_not_empty(value)?;
    validate_length(value, 1, 32)?;
    if !value.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
        let mut error = ValidationError::new("vehicle_id");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Ejecutar las validaciones derivadas de un request
pub fn validate_request<T: Validate>(request: &T) -> AppResult<()> {
    request.validate()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_not_empty() {
        assert!(validate_not_empty("Brake Pad Wear").is_ok());
        assert!(validate_not_empty("   ").is_err());
    }

    #[test]
    fn test_validate_length() {
        let value = "test";
        assert!(validate_length(value, 1, 10).is_ok());
        assert!(validate_length(value, 5, 10).is_err());
        assert!(validate_length(value, 1, 3).is_err());
    }

    #[test]
    fn test_validate_vehicle_id() {
        assert!(validate_vehicle_id("VH001").is_ok());
        assert!(validate_vehicle_id("fleet_a-7").is_ok());
        assert!(validate_vehicle_id("").is_err());
        assert!(validate_vehicle_id("VH 001").is_err());
        assert!(validate_vehicle_id(&"X".repeat(33)).is_err());
    }
}

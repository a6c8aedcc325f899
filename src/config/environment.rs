//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.
//! Todas las claves tienen un valor por defecto; un valor inválido es un error.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::utils::errors::{config_error, AppResult};

/// Retardo por defecto de la llamada simulada (ms)
pub const DEFAULT_CALL_DELAY_MS: u64 = 3000;
/// Cantidad de notificaciones que muestra el dashboard por defecto
pub const DEFAULT_NOTIFICATION_LIMIT: usize = 5;

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub call_simulation_delay: Duration,
    pub notification_display_limit: usize,
    pub fleet_data_path: Option<PathBuf>,
    pub cors_origins: Vec<String>,
    pub log_level: tracing::Level,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            port: 3000,
            host: "0.0.0.0".to_string(),
            call_simulation_delay: Duration::from_millis(DEFAULT_CALL_DELAY_MS),
            notification_display_limit: DEFAULT_NOTIFICATION_LIMIT,
            fleet_data_path: None,
            cors_origins: Vec::new(),
            log_level: tracing::Level::DEBUG,
        }
    }
}

impl EnvironmentConfig {
    /// Cargar configuración desde las variables de entorno del proceso
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Cargar configuración desde una función de búsqueda de claves
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let notification_display_limit: usize =
            parse_or(&lookup, "NOTIFICATION_DISPLAY_LIMIT", defaults.notification_display_limit)?;
        if notification_display_limit == 0 {
            return Err(config_error(
                "NOTIFICATION_DISPLAY_LIMIT",
                "0",
                "must be greater than zero",
            ));
        }

        let delay_ms: u64 = parse_or(&lookup, "CALL_SIMULATION_DELAY_MS", DEFAULT_CALL_DELAY_MS)?;

        Ok(Self {
            environment: lookup("ENVIRONMENT").unwrap_or(defaults.environment),
            port: parse_or(&lookup, "PORT", defaults.port)?,
            host: lookup("HOST").unwrap_or(defaults.host),
            call_simulation_delay: Duration::from_millis(delay_ms),
            notification_display_limit,
            fleet_data_path: lookup("FLEET_DATA_PATH")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            cors_origins: lookup("CORS_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            log_level: parse_or(&lookup, "LOG_LEVEL", defaults.log_level)?,
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> AppResult<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| config_error(key, &raw, "invalid value")),
        None => Ok(default),
    }
}

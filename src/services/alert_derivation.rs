//! Derivación de alertas
//!
//! Clasifica la telemetría y la predicción de un vehículo en una alerta
//! con severidad, urgencia y el nivel de salud de cada componente.
//! Función pura: se re-evalúa cada vez que cambian los datos.

use crate::models::{
    ClassifiedAlert, Component, ComponentWarning, HealthLevel, Prediction, Severity, Telemetry,
    UrgencyScore,
};

/// Valor a partir del cual un componente es nominal
pub const NOMINAL_THRESHOLD: f64 = 80.0;
/// Valor por debajo del cual un componente es crítico
pub const CRITICAL_THRESHOLD: f64 = 50.0;

/// Horizonte en días de la cercanía de la falla.
///
/// El puntaje no decrece al bajar los días ni al subir la confianza, pero solo
/// crece estrictamente dentro del horizonte y por cada punto entero de confianza:
/// dos fallas a más de 100 días, o confianzas que redondean igual, empatan.
const URGENCY_DAY_HORIZON: u32 = 100;

/// Aviso específico de un componente
#[derive(Debug, Clone, Copy)]
pub enum Advisory {
    /// Advertencia cuando el valor está por debajo del umbral
    Below {
        threshold: f64,
        message: &'static str,
    },
    /// Nota positiva cuando el valor alcanza el umbral
    AtLeast {
        threshold: f64,
        message: &'static str,
    },
}

impl Advisory {
    /// Mensaje del aviso si aplica al valor (ya acotado)
    pub fn message_for(&self, value: f64) -> Option<&'static str> {
        match *self {
            Advisory::Below { threshold, message } if value < threshold => Some(message),
            Advisory::AtLeast { threshold, message } if value >= threshold => Some(message),
            _ => None,
        }
    }
}

/// Entrada de la tabla de clasificación
#[derive(Debug, Clone, Copy)]
pub struct ComponentRule {
    pub component: Component,
    pub reading: fn(&Telemetry) -> f64,
    pub advisory: Option<Advisory>,
}

/// Tabla de clasificación por componente.
///
/// Los niveles usan los umbrales genéricos 80/50 para todos; los avisos no.
/// La batería avisa por debajo de 70: su degradación se acelera cerca del fin de vida.
pub const COMPONENT_RULES: [ComponentRule; 6] = [
    ComponentRule {
        component: Component::EngineOil,
        reading: |t| t.engine_oil_level,
        advisory: Some(Advisory::Below {
            threshold: 50.0,
            message: "Oil change recommended soon",
        }),
    },
    ComponentRule {
        component: Component::BrakePads,
        reading: |t| t.brake_pad_thickness,
        advisory: Some(Advisory::Below {
            threshold: 50.0,
            message: "Critical: Brake replacement needed",
        }),
    },
    ComponentRule {
        component: Component::Battery,
        reading: |t| t.battery_health,
        advisory: Some(Advisory::Below {
            threshold: 70.0,
            message: "Battery replacement recommended",
        }),
    },
    ComponentRule {
        component: Component::Tires,
        reading: |t| t.tire_condition,
        advisory: Some(Advisory::AtLeast {
            threshold: NOMINAL_THRESHOLD,
            message: "Tire condition excellent",
        }),
    },
    ComponentRule {
        component: Component::Coolant,
        reading: |t| t.coolant_level,
        advisory: None,
    },
    ComponentRule {
        component: Component::Transmission,
        reading: |t| t.transmission_health,
        advisory: None,
    },
];

/// Acotar un porcentaje a [0, 100]; NaN se trata como 0
pub fn clamp_percentage(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 100.0)
}

/// Nivel de salud para un porcentaje
pub fn health_level(value: f64) -> HealthLevel {
    let value = clamp_percentage(value);
    if value >= NOMINAL_THRESHOLD {
        HealthLevel::Nominal
    } else if value >= CRITICAL_THRESHOLD {
        HealthLevel::Watch
    } else {
        HealthLevel::Critical
    }
}

/// Clasificar un componente según su regla
pub fn classify_component(rule: &ComponentRule, telemetry: &Telemetry) -> ComponentWarning {
    let value = clamp_percentage((rule.reading)(telemetry));
    let message = rule
        .advisory
        .and_then(|advisory| advisory.message_for(value))
        .map(str::to_string);

    ComponentWarning {
        component: rule.component,
        value,
        level: health_level(value),
        message,
    }
}

/// Puntaje de urgencia.
///
/// Orden lexicográfico: severidad, luego cercanía de la falla, luego confianza.
/// Menos días y más confianza nunca lo reducen; los empates los resuelve quien ordena.
pub fn urgency_score(severity: Severity, days_until_failure: u32, confidence: f64) -> UrgencyScore {
    let proximity = URGENCY_DAY_HORIZON - days_until_failure.min(URGENCY_DAY_HORIZON);
    let confidence = clamp_percentage(confidence).round() as u32;
    UrgencyScore(severity.weight() * 100_000 + proximity * 1_000 + confidence)
}

/// Clasificar telemetría + predicción
pub fn classify(telemetry: &Telemetry, prediction: &Prediction) -> ClassifiedAlert {
    let component_warnings = COMPONENT_RULES
        .iter()
        .map(|rule| classify_component(rule, telemetry))
        .collect();

    ClassifiedAlert {
        severity: prediction.severity,
        urgency: urgency_score(
            prediction.severity,
            prediction.days_until_failure,
            prediction.confidence,
        ),
        issue: prediction.issue.clone(),
        recommendation: prediction.recommendation.clone(),
        days_until_failure: prediction.days_until_failure,
        confidence: clamp_percentage(prediction.confidence),
        requires_immediate_attention: prediction.severity == Severity::High,
        component_warnings,
    }
}

//! Modelos de alertas clasificadas
//!
//! Resultado de la derivación de alertas: severidad, urgencia y el estado
//! de cada componente monitoreado.

use serde::{Deserialize, Serialize};

use super::vehicle::Severity;

/// Componentes con lectura porcentual de salud
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Component {
    EngineOil,
    BrakePads,
    Battery,
    Tires,
    Coolant,
    Transmission,
}

/// Nivel de salud de un componente
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum HealthLevel {
    Critical,
    Watch,
    Nominal,
}

/// Estado clasificado de un componente
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComponentWarning {
    pub component: Component,
    /// Valor ya acotado a [0, 100]
    pub value: f64,
    pub level: HealthLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ComponentWarning {
    pub fn has_message(&self) -> bool {
        self.message.is_some()
    }
}

/// Puntaje de urgencia - orden total, mayor es más urgente
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct UrgencyScore(pub u32);

/// Alerta clasificada lista para mostrar
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClassifiedAlert {
    pub severity: Severity,
    pub urgency: UrgencyScore,
    pub issue: String,
    pub recommendation: String,
    pub days_until_failure: u32,
    /// Confianza acotada a [0, 100]
    pub confidence: f64,
    pub requires_immediate_attention: bool,
    pub component_warnings: Vec<ComponentWarning>,
}

impl ClassifiedAlert {
    /// Componentes en nivel crítico
    pub fn critical_components(&self) -> impl Iterator<Item = &ComponentWarning> {
        self.component_warnings
            .iter()
            .filter(|w| w.level == HealthLevel::Critical)
    }

    /// Buscar la lectura de un componente
    pub fn warning_for(&self, component: Component) -> Option<&ComponentWarning> {
        self.component_warnings.iter().find(|w| w.component == component)
    }
}

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{CallSession, EngagementRejection, Prediction, Severity, Telemetry};
use crate::utils::validation::validate_not_empty;

// Response genérica
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success_with_message(data: T, message: String) -> Self {
        Self {
            success: true,
            message: Some(message),
            data: Some(data),
        }
    }
}

// Query del feed de notificaciones
#[derive(Debug, Deserialize, Validate)]
pub struct NotificationQuery {
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<usize>,
}

// Predicción recibida del servicio de ingesta
#[derive(Debug, Deserialize, Validate)]
pub struct PredictionInput {
    #[validate(custom = "validate_not_empty")]
    pub issue: String,
    pub severity: Severity,
    pub days_until_failure: u32,
    pub confidence: f64,
    #[validate(custom = "validate_not_empty")]
    pub recommendation: String,
}

impl From<PredictionInput> for Prediction {
    fn from(input: PredictionInput) -> Self {
        Self {
            issue: input.issue,
            severity: input.severity,
            days_until_failure: input.days_until_failure,
            confidence: input.confidence,
            recommendation: input.recommendation,
        }
    }
}

// Request para reemplazar las lecturas de un vehículo
// Los porcentajes fuera de rango se aceptan: la clasificación los acota.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateReadingsRequest {
    pub telemetry: Telemetry,
    #[validate]
    pub prediction: PredictionInput,
}

// Response de una solicitud de engagement
#[derive(Debug, Serialize)]
pub struct EngagementResponse {
    pub accepted: bool,
    #[serde(flatten)]
    pub rejection: Option<EngagementRejection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub session: CallSession,
}

impl EngagementResponse {
    pub fn accepted(session: CallSession) -> Self {
        Self {
            accepted: true,
            rejection: None,
            message: None,
            session,
        }
    }

    pub fn rejected(rejection: EngagementRejection, session: CallSession) -> Self {
        Self {
            accepted: false,
            message: Some(rejection.to_string()),
            rejection: Some(rejection),
            session,
        }
    }
}

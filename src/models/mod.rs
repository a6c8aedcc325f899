//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos del núcleo: vehículos con su
//! telemetría, alertas clasificadas, notificaciones, sesión de llamada y
//! estadísticas del centro de servicio.

pub mod alert;
pub mod engagement;
pub mod notification;
pub mod service_center;
pub mod vehicle;

pub use alert::*;
pub use engagement::*;
pub use notification::*;
pub use service_center::*;
pub use vehicle::*;

//! Feed de notificaciones
//!
//! Log ordenado y de solo-agregado de eventos de engagement. Nunca se
//! trunca: solo las vistas limitan cuántos eventos se muestran.

use crate::models::NotificationEvent;

/// Log de notificaciones en orden de llegada
#[derive(Debug, Default, Clone)]
pub struct NotificationFeed {
    events: Vec<NotificationEvent>,
}

impl NotificationFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Agregar un evento al final del log
    pub fn append(&mut self, event: NotificationEvent) {
        self.events.push(event);
    }

    /// Los últimos `n` eventos, del más reciente al más antiguo.
    ///
    /// La vista es perezosa y reiniciable (el iterador es `Clone`); no modifica el log.
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &NotificationEvent> + Clone + '_ {
        self.events.iter().rev().take(n)
    }

    /// Todos los eventos en orden cronológico
    pub fn iter(&self) -> impl Iterator<Item = &NotificationEvent> + '_ {
        self.events.iter()
    }

    pub fn last(&self) -> Option<&NotificationEvent> {
        self.events.last()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

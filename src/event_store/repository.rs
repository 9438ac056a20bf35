//! Event Store Repository
//!
//! The single owner of the event collection. Cloning an `EventStore` hands
//! out another handle to the same collection.

use std::sync::Arc;

use rust_decimal::Decimal;
use tokio::sync::RwLock;

use crate::domain::{Amount, Event, EventChanges, EventDate, EventId, EventType, NewEvent};

use super::{EventFilter, EventPage, EventStoreError, Pagination};

/// In-memory event store
///
/// Reads share the lock. Create, update and delete hold the write lock for
/// the whole operation, so id assignment and insert are one step.
#[derive(Debug, Clone, Default)]
pub struct EventStore {
    events: Arc<RwLock<Vec<Event>>>,
}

impl EventStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the given events, in order
    fn with_events(events: Vec<Event>) -> Self {
        Self {
            events: Arc::new(RwLock::new(events)),
        }
    }

    /// Create a store pre-loaded with the demo events the service ships with
    pub fn seeded() -> Self {
        Self::with_events(demo_events())
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Every event in insertion order
    pub async fn list_all(&self) -> Vec<Event> {
        self.events.read().await.clone()
    }

    /// Filter, then paginate. A page past the end is empty, not an error.
    pub async fn list(&self, filter: &EventFilter, pagination: Pagination) -> EventPage {
        let events = self.events.read().await;
        let filtered: Vec<&Event> = events.iter().filter(|e| filter.matches(e)).collect();
        let total = filtered.len();
        let page = filtered
            .into_iter()
            .skip(pagination.offset())
            .take(pagination.take())
            .cloned()
            .collect();

        EventPage {
            events: page,
            page: pagination.page,
            limit: pagination.limit,
            total,
        }
    }

    /// Look up a single event
    pub async fn get(&self, id: EventId) -> Option<Event> {
        self.events.read().await.iter().find(|e| e.id == id).cloned()
    }

    /// Number of live events
    pub async fn len(&self) -> usize {
        self.events.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.events.read().await.is_empty()
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Store a validated event under `max(existing ids) + 1`, or 1 when empty
    pub async fn create(&self, new_event: NewEvent) -> Event {
        let mut events = self.events.write().await;
        let id = events
            .iter()
            .map(|e| e.id)
            .max()
            .map_or(EventId::FIRST, |max| max.next());

        let event = Event::from_new(id, new_event);
        events.push(event.clone());
        tracing::debug!(event_id = %id, total = events.len(), "Event stored");
        event
    }

    /// Overwrite the present fields of an existing event
    pub async fn update(&self, id: EventId, changes: EventChanges) -> Result<Event, EventStoreError> {
        let mut events = self.events.write().await;
        let event = events
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(EventStoreError::NotFound(id))?;

        event.apply(changes);
        Ok(event.clone())
    }

    /// Remove an event for good, returning what was removed
    pub async fn delete(&self, id: EventId) -> Result<Event, EventStoreError> {
        let mut events = self.events.write().await;
        let index = events
            .iter()
            .position(|e| e.id == id)
            .ok_or(EventStoreError::NotFound(id))?;

        Ok(events.remove(index))
    }
}

/// The two entries the service starts with
fn demo_events() -> Vec<Event> {
    let entries = [
        (1, "Sueldo diciembre", "Pago mensual", 1500, (2024, 12, 5), EventType::Ingreso),
        (2, "Renta", "Departamento", 600, (2024, 12, 1), EventType::Egreso),
    ];

    entries
        .into_iter()
        .filter_map(|(id, nombre, descripcion, cantidad, (y, m, d), tipo)| {
            let id = EventId::new(id)?;
            let cantidad = Amount::new(Decimal::from(cantidad)).ok()?;
            let fecha = EventDate::new(chrono::NaiveDate::from_ymd_opt(y, m, d)?);
            Some(Event::from_new(
                id,
                NewEvent::new(nombre, cantidad, fecha, tipo).with_descripcion(descripcion),
            ))
        })
        .collect()
}

//! Event Query Handler
//!
//! Read-side operations: full listing, filtered listing, lookup by id.

use crate::domain::{Event, OperationContext};
use crate::error::AppError;
use crate::event_store::{EventPage, EventStore};

use super::{ListEventsQuery, RequestedId};

/// Handler for read operations
pub struct EventQueryHandler {
    store: EventStore,
}

impl EventQueryHandler {
    pub fn new(store: EventStore) -> Self {
        Self { store }
    }

    /// Every event, insertion order
    pub async fn list_all(&self, context: &OperationContext) -> Vec<Event> {
        let events = self.store.list_all().await;
        tracing::debug!(
            correlation_id = %context.correlation_id,
            total = events.len(),
            "Listed all events"
        );
        events
    }

    /// One page of the filtered events
    pub async fn list(&self, query: ListEventsQuery, context: &OperationContext) -> EventPage {
        let page = self.store.list(&query.filter, query.pagination).await;
        tracing::debug!(
            correlation_id = %context.correlation_id,
            tipo = ?query.filter.tipo,
            mes = ?query.filter.year_month,
            page = page.page,
            limit = page.limit,
            total = page.total,
            "Listed events"
        );
        page
    }

    /// Look up one event
    pub async fn find(&self, target: RequestedId, context: &OperationContext) -> Result<Event, AppError> {
        let found = match target.id {
            Some(id) => self.store.get(id).await,
            None => None,
        };

        tracing::debug!(
            correlation_id = %context.correlation_id,
            event_id = %target.raw,
            found = found.is_some(),
            "Looked up event"
        );

        found.ok_or_else(|| AppError::event_not_found(target.raw))
    }
}

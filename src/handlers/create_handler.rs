//! Event Creation Handler

use crate::domain::{Event, OperationContext};
use crate::event_store::EventStore;

use super::CreateEventCommand;

/// Handler for event creation
pub struct CreateEventHandler {
    store: EventStore,
}

impl CreateEventHandler {
    pub fn new(store: EventStore) -> Self {
        Self { store }
    }

    /// Execute the create event command. The command is already validated,
    /// so this cannot fail.
    pub async fn execute(&self, command: CreateEventCommand, context: &OperationContext) -> Event {
        let event = self.store.create(command.event).await;

        tracing::info!(
            correlation_id = %context.correlation_id,
            event_id = %event.id,
            tipo = %event.tipo,
            cantidad = %event.cantidad,
            "Event created"
        );

        event
    }
}

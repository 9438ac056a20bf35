//! Event Update Handler
//!
//! Applies a partial update to an existing event.

use crate::domain::{Event, OperationContext};
use crate::error::AppError;
use crate::event_store::EventStore;

use super::UpdateEventCommand;

/// Handler for event updates
pub struct UpdateEventHandler {
    store: EventStore,
}

impl UpdateEventHandler {
    pub fn new(store: EventStore) -> Self {
        Self { store }
    }

    /// Execute the update event command
    pub async fn execute(
        &self,
        command: UpdateEventCommand,
        context: &OperationContext,
    ) -> Result<Event, AppError> {
        let UpdateEventCommand { target, changes } = command;
        let id = target
            .id
            .ok_or_else(|| AppError::event_not_found(target.raw.clone()))?;

        let event = self
            .store
            .update(id, changes)
            .await
            .map_err(|_| AppError::event_not_found(target.raw))?;

        tracing::info!(
            correlation_id = %context.correlation_id,
            event_id = %event.id,
            "Event updated"
        );

        Ok(event)
    }
}

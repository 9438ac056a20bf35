//! Event Deletion Handler
//!
//! Removes an event permanently. There is no soft delete.

use crate::domain::{Event, OperationContext};
use crate::error::AppError;
use crate::event_store::EventStore;

use super::DeleteEventCommand;

/// Handler for event deletion
pub struct DeleteEventHandler {
    store: EventStore,
}

impl DeleteEventHandler {
    pub fn new(store: EventStore) -> Self {
        Self { store }
    }

    /// Execute the delete event command, returning the removed event
    pub async fn execute(
        &self,
        command: DeleteEventCommand,
        context: &OperationContext,
    ) -> Result<Event, AppError> {
        let target = command.target;
        let removed = match target.id {
            Some(id) => self.store.delete(id).await.ok(),
            None => None,
        };

        match removed {
            Some(event) => {
                tracing::info!(
                    correlation_id = %context.correlation_id,
                    event_id = %event.id,
                    "Event deleted"
                );
                Ok(event)
            }
            None => {
                tracing::debug!(
                    correlation_id = %context.correlation_id,
                    event_id = %target.raw,
                    "Delete target not found"
                );
                Err(AppError::delete_target_not_found(target.raw))
            }
        }
    }
}

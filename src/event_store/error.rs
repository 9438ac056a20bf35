//! Event Store Errors
//!
//! Error types for event store operations.

use crate::domain::EventId;

/// Errors that can occur in the event store
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EventStoreError {
    /// No live event carries the id
    #[error("Event not found: {0}")]
    NotFound(EventId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = EventStoreError::NotFound(EventId::new(7).unwrap());
        assert_eq!(err.to_string(), "Event not found: 7");
    }
}

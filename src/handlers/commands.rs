//! Command definitions
//!
//! Validated inputs for each operation. Validation produces these; handlers
//! consume them.

use crate::domain::{EventChanges, EventId, NewEvent};
use crate::event_store::{EventFilter, Pagination};

/// An id as the caller sent it, plus its normalized form.
///
/// `id` is `None` when the text cannot denote any event (`"abc"`, `"0"`),
/// which resolves to a not-found outcome rather than a validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestedId {
    pub raw: String,
    pub id: Option<EventId>,
}

impl RequestedId {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let id = EventId::parse(&raw);
        Self { raw, id }
    }
}

/// Filtered, paginated listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListEventsQuery {
    pub filter: EventFilter,
    pub pagination: Pagination,
}

/// Command to record a new event
#[derive(Debug, Clone, PartialEq)]
pub struct CreateEventCommand {
    pub event: NewEvent,
}

impl CreateEventCommand {
    pub fn new(event: NewEvent) -> Self {
        Self { event }
    }
}

/// Command to change some fields of an existing event
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateEventCommand {
    pub target: RequestedId,
    pub changes: EventChanges,
}

impl UpdateEventCommand {
    pub fn new(target: RequestedId, changes: EventChanges) -> Self {
        Self { target, changes }
    }
}

/// Command to remove an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteEventCommand {
    pub target: RequestedId,
}

impl DeleteEventCommand {
    pub fn new(target: RequestedId) -> Self {
        Self { target }
    }
}

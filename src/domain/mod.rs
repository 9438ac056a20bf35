//! Domain module
//!
//! Core domain types for income and expense events.

pub mod amount;
pub mod context;
pub mod event;

pub use amount::{Amount, AmountError};
pub use context::OperationContext;
pub use event::{
    Event, EventChanges, EventDate, EventDateError, EventId, EventType, NewEvent, UnknownEventType,
};

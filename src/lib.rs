//! eventos Library
//!
//! Re-exports modules for integration testing and the server binary.

pub mod api;
pub mod config;
pub mod domain;
pub mod event_store;
pub mod handlers;
pub mod validation;
mod error;

pub use api::{build_app, AppState};
pub use config::{Config, LogFormat};
pub use domain::{Amount, AmountError, Event, EventChanges, EventDate, EventId, EventType, NewEvent};
pub use error::{AppError, AppResult};
pub use event_store::{EventFilter, EventPage, EventStore, EventStoreError, Pagination};

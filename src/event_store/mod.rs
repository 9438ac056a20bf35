//! Event Store module
//!
//! In-memory authoritative collection of events.
//! Handles id assignment, filtering, pagination and mutation.

mod error;
mod query;
mod repository;

pub use error::EventStoreError;
pub use query::{EventFilter, EventPage, Pagination};
pub use repository::EventStore;

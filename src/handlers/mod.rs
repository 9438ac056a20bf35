//! Command Handlers module
//!
//! Each handler takes a validated command, runs it against the event store
//! and reports the outcome. Handlers never see raw request input.

mod commands;
mod create_handler;
mod delete_handler;
mod query_handler;
mod update_handler;

#[cfg(test)]
mod tests;

pub use commands::*;
pub use create_handler::CreateEventHandler;
pub use delete_handler::DeleteEventHandler;
pub use query_handler::EventQueryHandler;
pub use update_handler::UpdateEventHandler;

//! Deletion event publishing for the product aggregation gateway.
//!
//! The gateway announces composite deletions on one named outbound channel
//! per entity type; each backend service consumes its channel and performs
//! its own local cleanup, decoupled from the request/response cycle.

pub mod event;
pub mod publisher;

pub use event::{DeletionEvent, EventType};
pub use publisher::{Channel, EventPublisher, InMemoryEventBus};

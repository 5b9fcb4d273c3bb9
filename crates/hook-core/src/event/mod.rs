//! Diario de ejecución: eventos append-only emitidos por el engine.

mod store;
mod types;

pub use store::{EventStore, InMemoryEventStore};
pub use types::{RunEvent, RunEventKind};

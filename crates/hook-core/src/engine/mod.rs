//! Engine module
//!
//! Provides the `Engine` (registration + execution API) and the per-pass
//! `RunCtx` that walks hooks, features and steps in order.

pub mod core;
mod run_ctx;

pub use self::core::Engine;

pub use crate::event::{EventStore, InMemoryEventStore, RunEvent, RunEventKind};

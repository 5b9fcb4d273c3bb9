//! hookflow-core: motor de hooks de ciclo de vida para suites de features.
//!
//! Registro de acciones por rol, modelo de features/assessments, filtro por
//! nombre y etiquetas, y el engine que ejecuta todo en un orden determinista
//! encadenando un único `Context`.
pub mod action;
pub mod constants;
pub mod context;
pub mod engine;
pub mod errors;
pub mod event;
pub mod feature;
pub mod filter;
pub mod handle;
pub mod hashing;

pub use action::{Action, ActionRegistry, Hook, Role};
pub use context::{CancelToken, Context, HookFailure, HookResult};
pub use engine::Engine;
pub use errors::EngineError;
pub use event::{EventStore, InMemoryEventStore, RunEvent, RunEventKind};
pub use feature::{Feature, FeatureBuilder, FeatureInfo, Level, Step, StepInfo};
pub use filter::{Filter, Selection};
pub use handle::{Recorder, TestHandle};

pub use hookflow_conf::{Config, ConfigError, Labels};

//! Acciones (hooks) clasificadas por rol y su registro.
//!
//! - `Role`: punto del ciclo de vida en el que corre una acción.
//! - `Action` / `Hook`: callback con forma fija según el rol.
//! - `ActionRegistry`: secuencias ordenadas por rol, sólo crecen.

mod definition;
mod registry;
mod role;

pub use definition::{Action, EnvFn, FeatureFn, Hook, TestFn};
pub use registry::ActionRegistry;
pub use role::Role;

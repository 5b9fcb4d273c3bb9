//! Modelo de features y assessments.
//!
//! Una `Feature` es una instantánea inmutable producida por `FeatureBuilder`.
//! Los hooks de feature nunca la ven directamente: reciben un `FeatureInfo`,
//! copia aislada creada por el engine para cada ejecución de feature.

mod builder;
mod definition;
mod info;

pub use builder::FeatureBuilder;
pub use definition::{Feature, Level, Step, StepFn};
pub use info::{FeatureInfo, StepInfo};

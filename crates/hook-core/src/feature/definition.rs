use std::fmt;
use std::sync::Arc;

use hookflow_conf::{Config, Labels};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{FeatureInfo, StepInfo};
use crate::context::Context;
use crate::handle::TestHandle;
use crate::hashing::hash_value;

/// Función de un step. Sin canal de error: los fallos se reportan por el
/// `TestHandle`.
pub type StepFn<S> = dyn Fn(Context<S>, &mut dyn TestHandle, &Config) -> Context<S> + Send + Sync;

/// Nivel de un step dentro de la feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Level {
    Setup,
    Assessment,
    Teardown,
}

pub struct Step<S> {
    name: String,
    level: Level,
    func: Arc<StepFn<S>>,
}

impl<S> Step<S> {
    pub(crate) fn new(name: String, level: Level, func: Arc<StepFn<S>>) -> Self {
        Self { name, level, func }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub(crate) fn run(&self, ctx: Context<S>, t: &mut dyn TestHandle, cfg: &Config) -> Context<S> {
        (self.func)(ctx, t, cfg)
    }
}

impl<S> Clone for Step<S> {
    fn clone(&self) -> Self {
        Self { name: self.name.clone(),
               level: self.level,
               func: Arc::clone(&self.func) }
    }
}

impl<S> fmt::Debug for Step<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Step")
         .field("name", &self.name)
         .field("level", &self.level)
         .finish()
    }
}

/// Feature congelada: nombre, steps en orden declarado y etiquetas.
pub struct Feature<S> {
    name: String,
    labels: Labels,
    steps: Arc<[Step<S>]>,
}

impl<S> Feature<S> {
    pub(crate) fn new(name: String, labels: Labels, steps: Vec<Step<S>>) -> Self {
        Self { name,
               labels,
               steps: steps.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    pub fn steps(&self) -> &[Step<S>] {
        &self.steps
    }

    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(Step::name).collect()
    }

    pub fn steps_at(&self, level: Level) -> impl Iterator<Item = &Step<S>> {
        self.steps.iter().filter(move |s| s.level == level)
    }

    pub fn assessments(&self) -> impl Iterator<Item = &Step<S>> {
        self.steps_at(Level::Assessment)
    }

    /// Vista aislada para los hooks: todo se copia, nada se comparte.
    pub fn info(&self) -> FeatureInfo {
        let steps = self.steps
                        .iter()
                        .map(|s| StepInfo { name: s.name.clone(),
                                            level: s.level })
                        .collect();
        FeatureInfo::new(self.name.clone(), self.labels.clone(), steps)
    }

    /// Fingerprint estable de la definición (nombre, etiquetas, steps).
    pub fn fingerprint(&self) -> String {
        let steps: Vec<_> = self.steps
                                .iter()
                                .map(|s| json!({ "name": s.name, "level": s.level }))
                                .collect();
        hash_value(&json!({
                       "engine_version": crate::constants::ENGINE_VERSION,
                       "name": self.name,
                       "labels": self.labels,
                       "steps": steps,
                   }))
    }
}

impl<S> Clone for Feature<S> {
    fn clone(&self) -> Self {
        Self { name: self.name.clone(),
               labels: self.labels.clone(),
               steps: Arc::clone(&self.steps) }
    }
}

impl<S> fmt::Debug for Feature<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Feature")
         .field("name", &self.name)
         .field("labels", &self.labels)
         .field("steps", &self.steps)
         .finish()
    }
}

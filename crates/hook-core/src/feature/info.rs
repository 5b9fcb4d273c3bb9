use hookflow_conf::Labels;
use serde::{Deserialize, Serialize};

use super::Level;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepInfo {
    pub name: String,
    pub level: Level,
}

/// Vista de una feature entregada a los hooks before/after-feature.
///
/// El engine crea una por ejecución de feature y pasa la misma instancia al
/// before-feature y al after-feature de esa feature; lo que un hook escriba
/// aquí no llega a la `Feature` ni a otras features.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureInfo {
    name: String,
    labels: Labels,
    steps: Vec<StepInfo>,
}

impl FeatureInfo {
    pub(crate) fn new(name: String, labels: Labels, steps: Vec<StepInfo>) -> Self {
        Self { name, labels, steps }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    /// Acceso mutable a las etiquetas de esta vista.
    pub fn labels_mut(&mut self) -> &mut Labels {
        &mut self.labels
    }

    pub fn steps(&self) -> &[StepInfo] {
        &self.steps
    }

    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.name.as_str()).collect()
    }
}

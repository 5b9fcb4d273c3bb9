//! Tipos de evento del diario y estructura `RunEvent`.
//!
//! Cada transición observable del engine (setup, selección de features,
//! steps, fallos de hooks, finish) queda registrada en orden. El diario no
//! participa en el control de flujo; sólo lo describe.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::EngineError;
use crate::feature::Level;
use crate::filter::Selection;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RunEventKind {
    /// Todos los hooks de setup terminaron bien.
    SetupCompleted { hooks: usize },
    /// Feature descartada por el filtro; ningún hook corre para ella.
    FeatureSkipped { feature: String, reason: Selection },
    /// Feature seleccionada; se fija su fingerprint.
    FeatureStarted { feature: String, fingerprint: String },
    /// Un hook devolvió error. `index` es su posición dentro del rol.
    HookFailed {
        feature: Option<String>,
        index: usize,
        error: EngineError,
    },
    /// Los steps de la feature no corren porque falló un before hook.
    StepsSkipped { feature: String },
    /// Assessment descartado por el filtro.
    AssessmentSkipped { feature: String, assessment: String },
    /// Step ejecutado (sin juicio sobre su resultado).
    StepFinished { feature: String, step: String, level: Level },
    /// Fin de la feature, tras los after hooks.
    FeatureFinished { feature: String, hook_failures: usize },
    /// Todos los hooks de finish terminaron bien.
    FinishCompleted { hooks: usize },
    /// Una llamada a `test` no corrió nada: el setup había fallado o el
    /// finish ya se había ejecutado.
    RunAborted { error: EngineError },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunEvent {
    pub seq: u64, // asignado por el EventStore (orden append)
    pub run_id: Uuid,
    pub kind: RunEventKind,
    pub ts: DateTime<Utc>, // metadato
}

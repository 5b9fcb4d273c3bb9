use std::fmt;

use serde::{Deserialize, Serialize};

/// Punto del ciclo de vida en el que se ejecuta una acción.
///
/// El orden de declaración es el orden del ciclo de vida.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    Setup,
    BeforeFeature,
    BeforeTest,
    AfterTest,
    AfterFeature,
    Finish,
}

impl Role {
    pub const ALL: [Role; 6] = [Role::Setup,
                                Role::BeforeFeature,
                                Role::BeforeTest,
                                Role::AfterTest,
                                Role::AfterFeature,
                                Role::Finish];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Setup => "setup",
            Role::BeforeFeature => "before-feature",
            Role::BeforeTest => "before-test",
            Role::AfterTest => "after-test",
            Role::AfterFeature => "after-feature",
            Role::Finish => "finish",
        }
    }

    /// Setup y finish fallan de forma fatal; el resto sólo afecta a la feature.
    pub fn is_fatal_tier(&self) -> bool {
        matches!(self, Role::Setup | Role::Finish)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

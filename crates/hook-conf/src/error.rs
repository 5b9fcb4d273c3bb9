//! Errores de configuración.
//! Cubre patrones de filtro inválidos, etiquetas mal formadas y variables de
//! entorno ilegibles.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {field} pattern {pattern:?}: {reason}")]
    InvalidPattern {
        field: &'static str,
        pattern: String,
        reason: String,
    },
    #[error("invalid label {0:?} (expected key=value)")]
    InvalidLabel(String),
    #[error("environment variable {name}: {reason}")]
    Env { name: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_label_format() {
        let err = ConfigError::InvalidLabel("oops".into());
        assert_eq!(err.to_string(), "invalid label \"oops\" (expected key=value)");
    }

    #[test]
    fn invalid_pattern_format() {
        let err = ConfigError::InvalidPattern { field: "feature",
                                                pattern: "(".into(),
                                                reason: "unclosed group".into() };
        assert_eq!(err.to_string(), "invalid feature pattern \"(\": unclosed group");
    }
}

//! Configuración de una ejecución de pruebas.
//!
//! `Config` es de sólo lectura para el engine: se construye una vez (a mano o
//! desde el entorno) y se comparte por referencia con cada hook y cada step.
//! Contiene el namespace, los patrones de filtrado de features/assessments,
//! el selector de etiquetas y los parámetros de conexión.

use std::path::PathBuf;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::labels::Labels;

/// Parámetros de conexión al clúster. El engine nunca los interpreta; sólo
/// los transporta hasta los hooks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionSettings {
    /// Ruta al fichero de credenciales (kubeconfig). No se lee ni se valida.
    pub kubeconfig: Option<PathBuf>,
    /// Contexto dentro del fichero de credenciales.
    pub context: Option<String>,
    /// URL del API server, si se conoce explícitamente.
    pub server: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    namespace: String,
    feature_regex: Option<Regex>,
    assessment_regex: Option<Regex>,
    skip_feature_regex: Option<Regex>,
    skip_assessment_regex: Option<Regex>,
    labels: Labels,
    connection: ConnectionSettings,
}

fn compile(field: &'static str, pattern: &str) -> Result<Regex, ConfigError> {
    Regex::new(pattern).map_err(|e| ConfigError::InvalidPattern { field,
                                                                  pattern: pattern.to_string(),
                                                                  reason: e.to_string() })
}

impl Config {
    /// Configuración vacía: sin namespace, sin filtros, sin conexión.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Sólo se ejecutan features cuyo nombre contenga una coincidencia.
    pub fn with_feature_regex(mut self, pattern: &str) -> Result<Self, ConfigError> {
        self.feature_regex = Some(compile("feature", pattern)?);
        Ok(self)
    }

    /// Sólo se ejecutan assessments cuyo nombre contenga una coincidencia.
    pub fn with_assessment_regex(mut self, pattern: &str) -> Result<Self, ConfigError> {
        self.assessment_regex = Some(compile("assessment", pattern)?);
        Ok(self)
    }

    /// Excluye features cuyo nombre coincida, aunque pasen `feature_regex`.
    pub fn with_skip_feature_regex(mut self, pattern: &str) -> Result<Self, ConfigError> {
        self.skip_feature_regex = Some(compile("skip-feature", pattern)?);
        Ok(self)
    }

    /// Excluye assessments cuyo nombre coincida, aunque pasen `assessment_regex`.
    pub fn with_skip_assessment_regex(mut self, pattern: &str) -> Result<Self, ConfigError> {
        self.skip_assessment_regex = Some(compile("skip-assessment", pattern)?);
        Ok(self)
    }

    /// Añade un par al selector de etiquetas.
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    /// Reemplaza el selector de etiquetas completo.
    pub fn with_labels(mut self, labels: Labels) -> Self {
        self.labels = labels;
        self
    }

    pub fn with_connection(mut self, connection: ConnectionSettings) -> Self {
        self.connection = connection;
        self
    }

    /// Registra la ruta del fichero de credenciales sin abrirlo.
    pub fn with_kubeconfig_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.connection.kubeconfig = Some(path.into());
        self
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn feature_regex(&self) -> Option<&Regex> {
        self.feature_regex.as_ref()
    }

    pub fn assessment_regex(&self) -> Option<&Regex> {
        self.assessment_regex.as_ref()
    }

    pub fn skip_feature_regex(&self) -> Option<&Regex> {
        self.skip_feature_regex.as_ref()
    }

    pub fn skip_assessment_regex(&self) -> Option<&Regex> {
        self.skip_assessment_regex.as_ref()
    }

    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    pub fn connection(&self) -> &ConnectionSettings {
        &self.connection
    }
}

//! Carga de configuración desde variables de entorno.
//! El fichero `.env` se carga perezosamente una sola vez.

use std::env;

use dotenvy::dotenv;
use log::debug;
use once_cell::sync::Lazy;

use crate::config::Config;
use crate::error::ConfigError;
use crate::labels::parse_labels;

pub const ENV_NAMESPACE: &str = "E2E_NAMESPACE";
pub const ENV_FEATURE: &str = "E2E_FEATURE";
pub const ENV_ASSESS: &str = "E2E_ASSESS";
pub const ENV_SKIP_FEATURE: &str = "E2E_SKIP_FEATURE";
pub const ENV_SKIP_ASSESS: &str = "E2E_SKIP_ASSESS";
pub const ENV_LABELS: &str = "E2E_LABELS";
pub const ENV_KUBECONFIG: &str = "KUBECONFIG";

static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    // ignora error si no existe .env
    let _ = dotenv();
});

/// Forzar carga temprana de .env desde aplicaciones externas si se desea.
pub fn init_dotenv() {
    Lazy::force(&DOTENV_LOADED);
}

fn read_var(name: &str) -> Result<Option<String>, ConfigError> {
    match env::var(name) {
        Ok(v) => Ok(Some(v)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(ConfigError::Env { name: name.to_string(),
                                         reason: e.to_string() }),
    }
}

impl Config {
    /// Construye la configuración a partir del entorno del proceso (y `.env`).
    pub fn from_env() -> Result<Self, ConfigError> {
        init_dotenv();
        let mut failure = None;
        let cfg = Self::from_lookup(|name| match read_var(name) {
            Ok(v) => v,
            Err(e) => {
                failure.get_or_insert(e);
                None
            }
        })?;
        match failure {
            Some(e) => Err(e),
            None => Ok(cfg),
        }
    }

    /// Igual que `from_env` pero con una fuente de variables arbitraria.
    /// Valores vacíos se tratan como ausentes.
    pub fn from_lookup<F>(mut lookup: F) -> Result<Self, ConfigError>
        where F: FnMut(&str) -> Option<String>
    {
        let mut get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let mut cfg = Config::new();
        if let Some(ns) = get(ENV_NAMESPACE) {
            cfg = cfg.with_namespace(ns);
        }
        if let Some(p) = get(ENV_FEATURE) {
            cfg = cfg.with_feature_regex(&p)?;
        }
        if let Some(p) = get(ENV_ASSESS) {
            cfg = cfg.with_assessment_regex(&p)?;
        }
        if let Some(p) = get(ENV_SKIP_FEATURE) {
            cfg = cfg.with_skip_feature_regex(&p)?;
        }
        if let Some(p) = get(ENV_SKIP_ASSESS) {
            cfg = cfg.with_skip_assessment_regex(&p)?;
        }
        if let Some(raw) = get(ENV_LABELS) {
            cfg = cfg.with_labels(parse_labels(&raw)?);
        }
        if let Some(path) = get(ENV_KUBECONFIG) {
            cfg = cfg.with_kubeconfig_file(path);
        }
        debug!("config loaded: namespace={:?} labels={:?}", cfg.namespace(), cfg.labels());
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn lookup_populates_all_fields() {
        let env = vars(&[(ENV_NAMESPACE, "ns-1"),
                         (ENV_FEATURE, "pods"),
                         (ENV_ASSESS, "^create"),
                         (ENV_SKIP_ASSESS, "slow"),
                         (ENV_LABELS, "tier=fast,os=linux"),
                         (ENV_KUBECONFIG, "/home/u/.kube/config")]);
        let cfg = Config::from_lookup(|k| env.get(k).cloned()).unwrap();
        assert_eq!(cfg.namespace(), "ns-1");
        assert!(cfg.feature_regex().unwrap().is_match("list pods"));
        assert!(cfg.assessment_regex().unwrap().is_match("create deployment"));
        assert!(cfg.skip_assessment_regex().unwrap().is_match("slow path"));
        assert!(cfg.skip_feature_regex().is_none());
        assert_eq!(cfg.labels().len(), 2);
        assert!(cfg.connection().kubeconfig.is_some());
    }

    #[test]
    fn blank_values_are_ignored() {
        let env = vars(&[(ENV_FEATURE, "  "), (ENV_LABELS, "")]);
        let cfg = Config::from_lookup(|k| env.get(k).cloned()).unwrap();
        assert!(cfg.feature_regex().is_none());
        assert!(cfg.labels().is_empty());
    }

    #[test]
    fn bad_values_surface_errors() {
        let env = vars(&[(ENV_LABELS, "broken")]);
        assert!(matches!(Config::from_lookup(|k| env.get(k).cloned()),
                         Err(ConfigError::InvalidLabel(_))));

        let env = vars(&[(ENV_FEATURE, "[")]);
        assert!(matches!(Config::from_lookup(|k| env.get(k).cloned()),
                         Err(ConfigError::InvalidPattern { field: "feature", .. })));
    }
}

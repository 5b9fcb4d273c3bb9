//! Hookflow
//!
//! Punto de entrada del workspace:
//! - `hooks`: registro de acciones, modelo de features, filtro y engine.
//! - `conf`: configuración de la suite (patrones, etiquetas, conexión, `.env`).
//!
//! Los clientes normalmente sólo necesitan `hookflow::prelude::*`.

pub use hookflow_conf as conf;
pub use hookflow_core as hooks;

pub mod prelude {
    pub use hookflow_conf::{init_dotenv, parse_labels, Config, ConfigError, ConnectionSettings, Labels};
    pub use hookflow_core::{Action, CancelToken, Context, Engine, EngineError, Feature, FeatureBuilder, FeatureInfo,
                            HookFailure, HookResult, Level, Recorder, Role, RunEventKind, Selection, TestHandle};
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn prelude_builds_a_suite() {
        let mut env = Engine::<Vec<String>>::with_config(Config::new().with_namespace("ns"));
        env.before_each_test(|ctx, cfg, _| Ok(ctx.update(|s| s.push(cfg.namespace().to_string()))));
        let f = FeatureBuilder::<Vec<String>>::new("f").assess("a", |ctx, _, _| ctx.update(|s| s.push("a".into())))
                                                      .feature();
        let mut t = Recorder::new("prelude");
        let ctx = env.test(&mut t, &[f]);
        assert_eq!(ctx.state(), &vec!["ns".to_string(), "a".to_string()]);
    }

    #[test]
    fn config_error_is_reexported() {
        let err = Config::new().with_feature_regex("(").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPattern { .. }));
    }
}

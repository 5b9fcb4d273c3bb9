//! Builder de features.
//!
//! Acumula steps en el orden de llamada. `feature()` congela el estado actual
//! en una `Feature` inmutable; llamadas posteriores al builder no alteran las
//! instantáneas ya producidas.
//!
//! ```ignore
//! let f = FeatureBuilder::new("pods")
//!     .with_label("tier", "fast")
//!     .setup(|ctx, _t, _cfg| ctx)
//!     .assess("pods are running", |ctx, _t, _cfg| ctx)
//!     .teardown(|ctx, _t, _cfg| ctx)
//!     .feature();
//! ```

use std::sync::Arc;

use hookflow_conf::{Config, Labels};

use super::{Feature, Level, Step};
use crate::constants::{FEATURE_SETUP_STEP, FEATURE_TEARDOWN_STEP};
use crate::context::Context;
use crate::handle::TestHandle;

pub struct FeatureBuilder<S> {
    name: String,
    labels: Labels,
    steps: Vec<Step<S>>,
}

impl<S: 'static> FeatureBuilder<S> {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(),
               labels: Labels::new(),
               steps: Vec::new() }
    }

    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    /// Step de preparación propio de la feature; no se filtra.
    pub fn setup<F>(self, f: F) -> Self
        where F: Fn(Context<S>, &mut dyn TestHandle, &Config) -> Context<S> + Send + Sync + 'static
    {
        self.push(FEATURE_SETUP_STEP.to_string(), Level::Setup, f)
    }

    /// Assessment con nombre; sujeto al filtro de assessments.
    pub fn assess<F>(self, name: impl Into<String>, f: F) -> Self
        where F: Fn(Context<S>, &mut dyn TestHandle, &Config) -> Context<S> + Send + Sync + 'static
    {
        self.push(name.into(), Level::Assessment, f)
    }

    /// Step de limpieza propio de la feature; no se filtra.
    pub fn teardown<F>(self, f: F) -> Self
        where F: Fn(Context<S>, &mut dyn TestHandle, &Config) -> Context<S> + Send + Sync + 'static
    {
        self.push(FEATURE_TEARDOWN_STEP.to_string(), Level::Teardown, f)
    }

    fn push<F>(mut self, name: String, level: Level, f: F) -> Self
        where F: Fn(Context<S>, &mut dyn TestHandle, &Config) -> Context<S> + Send + Sync + 'static
    {
        self.steps.push(Step::new(name, level, Arc::new(f)));
        self
    }
}

impl<S> FeatureBuilder<S> {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Congela el builder en una `Feature`.
    pub fn feature(&self) -> Feature<S> {
        Feature::new(self.name.clone(), self.labels.clone(), self.steps.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handle::Recorder;

    fn noop(ctx: Context<u32>, _t: &mut dyn TestHandle, _c: &Config) -> Context<u32> {
        ctx
    }

    #[test]
    fn steps_keep_call_order_and_levels() {
        let f = FeatureBuilder::new("deploy").setup(noop)
                                             .assess("scale up", noop)
                                             .assess("scale down", noop)
                                             .teardown(noop)
                                             .feature();
        assert_eq!(f.name(), "deploy");
        assert_eq!(f.step_names(), vec!["setup", "scale up", "scale down", "teardown"]);
        let levels: Vec<Level> = f.steps().iter().map(Step::level).collect();
        assert_eq!(levels,
                   vec![Level::Setup, Level::Assessment, Level::Assessment, Level::Teardown]);
        assert_eq!(f.assessments().count(), 2);
    }

    #[test]
    fn frozen_feature_ignores_later_builder_calls() {
        let builder = FeatureBuilder::new("f").assess("one", noop);
        let first = builder.feature();
        let builder = builder.assess("two", noop).with_label("k", "v");
        let second = builder.feature();
        assert_eq!(first.step_names(), vec!["one"]);
        assert!(first.labels().is_empty());
        assert_eq!(second.step_names(), vec!["one", "two"]);
        assert_eq!(second.labels()["k"], "v");
    }

    #[test]
    fn steps_run_with_context() {
        let f = FeatureBuilder::new("f").assess("inc", |ctx: Context<u32>, t, _| {
                                            t.log("inc");
                                            ctx.map(|n| n + 1)
                                        })
                                        .feature();
        let mut t = Recorder::new("t");
        let out = f.steps()[0].run(Context::new(41), &mut t, &Config::new());
        assert_eq!(*out.state(), 42);
        assert_eq!(t.logs(), ["inc"]);
    }

    #[test]
    fn info_is_a_detached_copy() {
        let f = FeatureBuilder::new("f").with_label("tier", "fast")
                                        .assess("a", noop)
                                        .feature();
        let mut info = f.info();
        info.labels_mut().insert("foo".into(), "bar".into());
        assert_eq!(info.labels().len(), 2);
        assert_eq!(f.labels().len(), 1);
        assert!(!f.info().labels().contains_key("foo"));
        assert_eq!(info.step_names(), vec!["a"]);
    }

    #[test]
    fn fingerprint_tracks_definition() {
        let a = FeatureBuilder::new("f").assess("a", noop).feature();
        let same = FeatureBuilder::new("f").assess("a", noop).feature();
        let other = FeatureBuilder::new("f").assess("b", noop).feature();
        assert_eq!(a.fingerprint(), same.fingerprint());
        assert_ne!(a.fingerprint(), other.fingerprint());
    }
}

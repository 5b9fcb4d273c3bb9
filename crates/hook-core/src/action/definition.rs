use std::fmt;

use hookflow_conf::Config;

use super::Role;
use crate::context::{Context, HookResult};
use crate::feature::FeatureInfo;
use crate::handle::TestHandle;

/// Hook de entorno: setup y finish.
pub type EnvFn<S> = dyn Fn(Context<S>, &Config) -> HookResult<S> + Send + Sync;

/// Hook por prueba: before/after test.
pub type TestFn<S> = dyn Fn(Context<S>, &Config, &mut dyn TestHandle) -> HookResult<S> + Send + Sync;

/// Hook por feature: recibe la vista aislada de la feature en curso.
pub type FeatureFn<S> = dyn Fn(Context<S>, &Config, &mut FeatureInfo) -> HookResult<S> + Send + Sync;

/// Conjunto cerrado de formas de hook.
pub enum Hook<S> {
    Env(Box<EnvFn<S>>),
    Test(Box<TestFn<S>>),
    Feature(Box<FeatureFn<S>>),
}

impl<S> Hook<S> {
    pub fn shape(&self) -> &'static str {
        match self {
            Hook::Env(_) => "env",
            Hook::Test(_) => "test",
            Hook::Feature(_) => "feature",
        }
    }
}

/// Acción registrada. El rol y la forma del hook se fijan en la construcción
/// y no pueden cambiar después.
pub struct Action<S> {
    role: Role,
    hook: Hook<S>,
}

impl<S: 'static> Action<S> {
    pub fn setup<F>(f: F) -> Self
        where F: Fn(Context<S>, &Config) -> HookResult<S> + Send + Sync + 'static
    {
        Self { role: Role::Setup,
               hook: Hook::Env(Box::new(f)) }
    }

    pub fn finish<F>(f: F) -> Self
        where F: Fn(Context<S>, &Config) -> HookResult<S> + Send + Sync + 'static
    {
        Self { role: Role::Finish,
               hook: Hook::Env(Box::new(f)) }
    }

    pub fn before_test<F>(f: F) -> Self
        where F: Fn(Context<S>, &Config, &mut dyn TestHandle) -> HookResult<S> + Send + Sync + 'static
    {
        Self { role: Role::BeforeTest,
               hook: Hook::Test(Box::new(f)) }
    }

    pub fn after_test<F>(f: F) -> Self
        where F: Fn(Context<S>, &Config, &mut dyn TestHandle) -> HookResult<S> + Send + Sync + 'static
    {
        Self { role: Role::AfterTest,
               hook: Hook::Test(Box::new(f)) }
    }

    pub fn before_feature<F>(f: F) -> Self
        where F: Fn(Context<S>, &Config, &mut FeatureInfo) -> HookResult<S> + Send + Sync + 'static
    {
        Self { role: Role::BeforeFeature,
               hook: Hook::Feature(Box::new(f)) }
    }

    pub fn after_feature<F>(f: F) -> Self
        where F: Fn(Context<S>, &Config, &mut FeatureInfo) -> HookResult<S> + Send + Sync + 'static
    {
        Self { role: Role::AfterFeature,
               hook: Hook::Feature(Box::new(f)) }
    }
}

impl<S> Action<S> {
    pub fn role(&self) -> Role {
        self.role
    }

    pub fn hook(&self) -> &Hook<S> {
        &self.hook
    }

    /// Despacha según la forma del hook. Un hook de feature invocado sin
    /// feature en curso se reporta como fallo en lugar de ejecutarse.
    pub(crate) fn invoke(&self,
                         ctx: Context<S>,
                         cfg: &Config,
                         t: &mut dyn TestHandle,
                         feature: Option<&mut FeatureInfo>)
                         -> HookResult<S> {
        match (&self.hook, feature) {
            (Hook::Env(f), _) => f(ctx, cfg),
            (Hook::Test(f), _) => f(ctx, cfg, t),
            (Hook::Feature(f), Some(info)) => f(ctx, cfg, info),
            (Hook::Feature(_), None) => Err(ctx.fail(format!("{} hook invoked outside of a feature", self.role))),
        }
    }
}

impl<S> fmt::Debug for Action<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
         .field("role", &self.role)
         .field("shape", &self.hook.shape())
         .finish()
    }
}

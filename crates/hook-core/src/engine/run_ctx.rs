//! Contexto de una pasada del engine.
//!
//! Agrupa préstamos de las partes del engine necesarias para ejecutar hooks y
//! features: registro y configuración (lectura), diario (escritura). El
//! contexto de usuario no vive aquí; entra y sale por valor en cada método.

use hookflow_conf::Config;
use log::{debug, error, warn};
use uuid::Uuid;

use crate::action::{ActionRegistry, Role};
use crate::context::Context;
use crate::errors::EngineError;
use crate::event::{EventStore, RunEventKind};
use crate::feature::{Feature, FeatureInfo, Level};
use crate::filter::Filter;
use crate::handle::TestHandle;

/// Qué hacer con el resto de hooks del rol tras un fallo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OnFailure {
    /// Los hooks restantes dependen del fallido: no corren.
    Stop,
    /// Limpieza: cada hook se intenta igualmente.
    Continue,
}

pub(crate) struct RunCtx<'a, S, E: EventStore> {
    pub registry: &'a ActionRegistry<S>,
    pub config: &'a Config,
    pub filter: &'a Filter,
    pub events: &'a mut E,
    pub run_id: Uuid,
}

impl<'a, S, E: EventStore> RunCtx<'a, S, E> {
    fn record(&mut self, kind: RunEventKind) {
        self.events.append_kind(self.run_id, kind);
    }

    fn report(&mut self,
              t: &mut dyn TestHandle,
              feature: Option<&str>,
              index: usize,
              error: EngineError,
              fatal: bool) {
        let message = error.to_string();
        if fatal {
            error!("{message}");
            t.fatal(&message);
        } else {
            warn!("feature {:?}: {message}", feature.unwrap_or_default());
            t.error(&message);
        }
        self.record(RunEventKind::HookFailed { feature: feature.map(str::to_string),
                                               index,
                                               error });
    }

    /// Ejecuta los hooks de `role` en orden de registro encadenando el
    /// contexto. Devuelve el contexto final y los fallos reportados.
    pub fn run_chain(&mut self,
                     role: Role,
                     mut ctx: Context<S>,
                     t: &mut dyn TestHandle,
                     mut info: Option<&mut FeatureInfo>,
                     policy: OnFailure)
                     -> (Context<S>, Vec<EngineError>) {
        let registry = self.registry;
        let config = self.config;
        let feature = info.as_ref().map(|i| i.name().to_string());
        let mut failures = Vec::new();

        for (index, action) in registry.actions_for(role).iter().enumerate() {
            match action.invoke(ctx, config, t, info.as_deref_mut()) {
                Ok(next) => ctx = next,
                Err(failure) => {
                    let (next, reason) = failure.into_parts();
                    ctx = next;
                    let error = EngineError::HookFailed { role, reason };
                    self.report(t, feature.as_deref(), index, error.clone(), role.is_fatal_tier());
                    failures.push(error);
                    if policy == OnFailure::Stop {
                        break;
                    }
                }
            }
        }
        (ctx, failures)
    }

    /// Setup o finish: el primer error es fatal y corta la fase.
    pub fn run_env_phase(&mut self,
                         role: Role,
                         ctx: Context<S>,
                         t: &mut dyn TestHandle)
                         -> (Context<S>, Result<usize, EngineError>) {
        let (ctx, mut failures) = self.run_chain(role, ctx, t, None, OnFailure::Stop);
        if let Some(error) = failures.pop() {
            return (ctx, Err(error));
        }
        let hooks = self.registry.actions_for(role).len();
        let kind = match role {
            Role::Finish => RunEventKind::FinishCompleted { hooks },
            _ => RunEventKind::SetupCompleted { hooks },
        };
        self.record(kind);
        (ctx, Ok(hooks))
    }

    /// Ejecuta una feature completa: filtro, before hooks, steps, after hooks.
    pub fn run_feature(&mut self, ctx: Context<S>, t: &mut dyn TestHandle, feature: &Feature<S>) -> Context<S> {
        let name = feature.name();
        let selection = self.filter.selects(feature);
        if !selection.is_selected() {
            debug!("feature {name:?} skipped: {selection:?}");
            self.record(RunEventKind::FeatureSkipped { feature: name.to_string(),
                                                       reason: selection });
            return ctx;
        }

        debug!("feature {name:?} started");
        self.record(RunEventKind::FeatureStarted { feature: name.to_string(),
                                                   fingerprint: feature.fingerprint() });

        // una vista por ejecución, compartida sólo por el par before/after
        let mut info = feature.info();

        let (mut ctx, mut failures) = self.run_chain(Role::BeforeFeature, ctx, t, Some(&mut info), OnFailure::Stop);
        if failures.is_empty() {
            let (next, more) = self.run_chain(Role::BeforeTest, ctx, t, Some(&mut info), OnFailure::Stop);
            ctx = next;
            failures.extend(more);
        }

        if failures.is_empty() {
            ctx = self.run_steps(ctx, t, feature);
        } else {
            self.record(RunEventKind::StepsSkipped { feature: name.to_string() });
        }

        let (ctx, after_test) = self.run_chain(Role::AfterTest, ctx, t, Some(&mut info), OnFailure::Continue);
        let (ctx, after_feature) = self.run_chain(Role::AfterFeature, ctx, t, Some(&mut info), OnFailure::Continue);

        self.record(RunEventKind::FeatureFinished { feature: name.to_string(),
                                                    hook_failures: failures.len()
                                                                   + after_test.len()
                                                                   + after_feature.len() });
        ctx
    }

    /// Steps de la feature agrupados por nivel: setup, assessments, teardown.
    fn run_steps(&mut self, mut ctx: Context<S>, t: &mut dyn TestHandle, feature: &Feature<S>) -> Context<S> {
        let config = self.config;
        for level in [Level::Setup, Level::Assessment, Level::Teardown] {
            for step in feature.steps_at(level) {
                if level == Level::Assessment && !self.filter.matches_assessment(step.name()) {
                    debug!("assessment {:?} filtered out", step.name());
                    self.record(RunEventKind::AssessmentSkipped { feature: feature.name().to_string(),
                                                                  assessment: step.name().to_string() });
                    continue;
                }
                ctx = step.run(ctx, t, config);
                self.record(RunEventKind::StepFinished { feature: feature.name().to_string(),
                                                         step: step.name().to_string(),
                                                         level });
            }
        }
        ctx
    }
}

//! Core Engine implementation

use hookflow_conf::Config;
use log::{debug, error, info};
use uuid::Uuid;

use super::run_ctx::RunCtx;
use crate::action::{Action, ActionRegistry, Role};
use crate::context::{Context, HookResult};
use crate::errors::EngineError;
use crate::event::{EventStore, InMemoryEventStore, RunEvent, RunEventKind};
use crate::feature::{Feature, FeatureInfo};
use crate::filter::Filter;
use crate::handle::TestHandle;

/// Estado de las fases de entorno (setup).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Pending,
    Completed,
    Failed,
}

/// Motor de ejecución de features con hooks de ciclo de vida.
///
/// Orquesta setup (una vez), las features seleccionadas con sus hooks
/// before/after y finish (una vez), encadenando un único contexto. El
/// contexto resultante de cada llamada queda retenido para la siguiente.
pub struct Engine<S, E: EventStore = InMemoryEventStore> {
    ctx: Context<S>,
    config: Config,
    filter: Filter,
    registry: ActionRegistry<S>,
    events: E,
    run_id: Uuid,
    setup: Phase,
    finished: bool,
}

impl<S: Clone + Default + 'static> Engine<S> {
    /// Engine con configuración vacía y contexto de fondo.
    pub fn new() -> Self {
        Self::with_config(Config::new())
    }

    /// Engine con la configuración dada y contexto de fondo.
    pub fn with_config(config: Config) -> Self {
        Self::from_parts(Context::background(), config, InMemoryEventStore::default())
    }
}

impl<S: Clone + Default + 'static> Default for Engine<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Clone + 'static> Engine<S> {
    /// Engine con un contexto raíz propio. Falla si el contexto ya no es
    /// utilizable (cancelado o con el deadline vencido).
    pub fn with_context(ctx: Context<S>, config: Config) -> Result<Self, EngineError> {
        Self::with_store(ctx, config, InMemoryEventStore::default())
    }
}

impl<S: Clone + 'static, E: EventStore> Engine<S, E> {
    /// Igual que `with_context` pero con un `EventStore` propio.
    pub fn with_store(ctx: Context<S>, config: Config, events: E) -> Result<Self, EngineError> {
        if ctx.is_cancelled() {
            return Err(EngineError::ContextCancelled);
        }
        if ctx.is_expired() {
            return Err(EngineError::DeadlineExceeded);
        }
        Ok(Self::from_parts(ctx, config, events))
    }

    fn from_parts(ctx: Context<S>, config: Config, events: E) -> Self {
        let filter = Filter::from_config(&config);
        Self { ctx,
               config,
               filter,
               registry: ActionRegistry::new(),
               events,
               run_id: Uuid::new_v4(),
               setup: Phase::Pending,
               finished: false }
    }

    fn run_ctx(&mut self) -> RunCtx<'_, S, E> {
        RunCtx { registry: &self.registry,
                 config: &self.config,
                 filter: &self.filter,
                 events: &mut self.events,
                 run_id: self.run_id }
    }

    // ---------------------------------------------------------------
    // Registro
    // ---------------------------------------------------------------

    /// Registra una acción ya construida bajo su rol.
    pub fn register(&mut self, action: Action<S>) -> &mut Self {
        self.registry.register(action);
        self
    }

    pub fn setup<F>(&mut self, f: F) -> &mut Self
        where F: Fn(Context<S>, &Config) -> HookResult<S> + Send + Sync + 'static
    {
        self.register(Action::setup(f))
    }

    pub fn before_each_test<F>(&mut self, f: F) -> &mut Self
        where F: Fn(Context<S>, &Config, &mut dyn TestHandle) -> HookResult<S> + Send + Sync + 'static
    {
        self.register(Action::before_test(f))
    }

    pub fn after_each_test<F>(&mut self, f: F) -> &mut Self
        where F: Fn(Context<S>, &Config, &mut dyn TestHandle) -> HookResult<S> + Send + Sync + 'static
    {
        self.register(Action::after_test(f))
    }

    pub fn before_each_feature<F>(&mut self, f: F) -> &mut Self
        where F: Fn(Context<S>, &Config, &mut FeatureInfo) -> HookResult<S> + Send + Sync + 'static
    {
        self.register(Action::before_feature(f))
    }

    pub fn after_each_feature<F>(&mut self, f: F) -> &mut Self
        where F: Fn(Context<S>, &Config, &mut FeatureInfo) -> HookResult<S> + Send + Sync + 'static
    {
        self.register(Action::after_feature(f))
    }

    pub fn finish<F>(&mut self, f: F) -> &mut Self
        where F: Fn(Context<S>, &Config) -> HookResult<S> + Send + Sync + 'static
    {
        self.register(Action::finish(f))
    }

    // ---------------------------------------------------------------
    // Ejecución
    // ---------------------------------------------------------------

    /// Ejecuta las features en el orden dado y devuelve el contexto final.
    ///
    /// Sin features es un no-op: devuelve el contexto actual y no dispara el
    /// setup. Con features, el setup corre antes si aún no lo hizo. Tras
    /// `run_finish` no se ejecuta nada más: el fallo es fatal.
    pub fn test(&mut self, t: &mut dyn TestHandle, features: &[Feature<S>]) -> Context<S> {
        if features.is_empty() {
            debug!("test called without features");
            return self.ctx.clone();
        }
        if self.finished {
            self.abort(t, EngineError::RunFinished);
            return self.ctx.clone();
        }
        if self.ensure_setup(t).is_err() {
            return self.ctx.clone();
        }

        let mut ctx = self.ctx.clone();
        let mut run = self.run_ctx();
        for feature in features {
            ctx = run.run_feature(ctx, t, feature);
        }
        self.ctx = ctx.clone();
        ctx
    }

    /// Corre los hooks de setup una sola vez por engine.
    fn ensure_setup(&mut self, t: &mut dyn TestHandle) -> Result<(), EngineError> {
        match self.setup {
            Phase::Completed => return Ok(()),
            Phase::Failed => {
                let err = EngineError::SetupAborted;
                self.abort(t, err.clone());
                return Err(err);
            }
            Phase::Pending => {}
        }

        let ctx = self.ctx.clone();
        let (ctx, outcome) = self.run_ctx().run_env_phase(Role::Setup, ctx, t);
        self.ctx = ctx;
        match outcome {
            Ok(hooks) => {
                info!("setup completed ({hooks} hooks)");
                self.setup = Phase::Completed;
                Ok(())
            }
            Err(err) => {
                self.setup = Phase::Failed;
                Err(err)
            }
        }
    }

    /// Reporta de forma fatal una llamada a `test` que no puede ejecutarse.
    fn abort(&mut self, t: &mut dyn TestHandle, err: EngineError) {
        error!("{err}");
        t.fatal(&err.to_string());
        self.events.append_kind(self.run_id, RunEventKind::RunAborted { error: err });
    }

    /// Corre los hooks de finish una sola vez por engine. Se omite si el
    /// setup falló.
    pub fn run_finish(&mut self, t: &mut dyn TestHandle) -> Context<S> {
        if self.finished {
            return self.ctx.clone();
        }
        self.finished = true;
        if self.setup == Phase::Failed {
            debug!("finish skipped: setup failed");
            return self.ctx.clone();
        }

        let ctx = self.ctx.clone();
        let (ctx, outcome) = self.run_ctx().run_env_phase(Role::Finish, ctx, t);
        if let Ok(hooks) = outcome {
            info!("finish completed ({hooks} hooks)");
        }
        self.ctx = ctx.clone();
        ctx
    }

    /// Ciclo completo: setup, `body`, finish.
    pub fn run_suite<F>(&mut self, t: &mut dyn TestHandle, body: F) -> Context<S>
        where F: FnOnce(&mut Self, &mut dyn TestHandle)
    {
        if self.ensure_setup(t).is_ok() {
            body(self, t);
        }
        self.run_finish(t)
    }

    // ---------------------------------------------------------------
    // Inspección
    // ---------------------------------------------------------------

    /// Contexto ambiente actual.
    pub fn context(&self) -> &Context<S> {
        &self.ctx
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn registry(&self) -> &ActionRegistry<S> {
        &self.registry
    }

    pub fn actions_for(&self, role: Role) -> &[Action<S>] {
        self.registry.actions_for(role)
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// Eventos del diario para esta ejecución.
    pub fn events(&self) -> Vec<RunEvent> {
        self.events.list(self.run_id)
    }

    pub fn event_store(&self) -> &E {
        &self.events
    }

    /// Variante compacta de eventos, útil para aserciones de orden.
    pub fn event_variants(&self) -> Vec<&'static str> {
        self.events()
            .iter()
            .map(|e| match e.kind {
                RunEventKind::SetupCompleted { .. } => "S",
                RunEventKind::FeatureSkipped { .. } => "K",
                RunEventKind::FeatureStarted { .. } => "B",
                RunEventKind::HookFailed { .. } => "X",
                RunEventKind::StepsSkipped { .. } => "N",
                RunEventKind::AssessmentSkipped { .. } => "A",
                RunEventKind::StepFinished { .. } => "F",
                RunEventKind::FeatureFinished { .. } => "E",
                RunEventKind::FinishCompleted { .. } => "C",
                RunEventKind::RunAborted { .. } => "R",
            })
            .collect()
    }
}

//! Contexto de ejecución encadenado entre hooks y steps.
//!
//! Cada hook recibe el contexto actual por valor y devuelve el siguiente. El
//! estado acumulado viaja dentro del contexto (`state: S`, tipado) y no en
//! variables capturadas por las closures. Los `bindings` auxiliares son
//! valores JSON que se recuperan con deserialización comprobada.
//!
//! La cancelación y el deadline son sólo informativos: el engine no los hace
//! cumplir.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Señal de cancelación compartida por todos los contextos derivados.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone)]
pub struct Context<S> {
    state: S,
    bindings: BTreeMap<String, Value>,
    deadline: Option<DateTime<Utc>>,
    cancel: CancelToken,
}

/// Resultado de un hook: el siguiente contexto, o un fallo que también
/// transporta el contexto producido para que el encadenamiento continúe.
pub type HookResult<S> = Result<Context<S>, HookFailure<S>>;

/// Fallo de un hook. Mismo patrón que `std::io::IntoInnerError`: el valor
/// viaja junto al error.
#[derive(Debug)]
pub struct HookFailure<S> {
    context: Context<S>,
    reason: String,
}

impl<S> HookFailure<S> {
    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn context(&self) -> &Context<S> {
        &self.context
    }

    pub fn into_parts(self) -> (Context<S>, String) {
        (self.context, self.reason)
    }
}

impl<S> Context<S> {
    /// Contexto raíz con el estado dado, sin deadline y sin cancelar.
    pub fn new(state: S) -> Self {
        Self { state,
               bindings: BTreeMap::new(),
               deadline: None,
               cancel: CancelToken::new() }
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn into_state(self) -> S {
        self.state
    }

    /// Sustituye el estado conservando bindings, deadline y cancelación.
    pub fn with_state(self, state: S) -> Self {
        Self { state, ..self }
    }

    /// Deriva un contexto nuevo transformando el estado.
    pub fn map<F>(self, f: F) -> Self
        where F: FnOnce(S) -> S
    {
        let Context { state, bindings, deadline, cancel } = self;
        Context { state: f(state),
                  bindings,
                  deadline,
                  cancel }
    }

    /// Deriva un contexto nuevo modificando el estado en sitio.
    pub fn update<F>(mut self, f: F) -> Self
        where F: FnOnce(&mut S)
    {
        f(&mut self.state);
        self
    }

    /// Añade un binding. Si el valor no se puede serializar a JSON no se
    /// guarda nada y el contexto vuelve intacto dentro del fallo, listo para
    /// propagarse con `?` desde un hook.
    pub fn with_value<T: Serialize>(mut self, key: impl Into<String>, value: T) -> Result<Self, HookFailure<S>> {
        let key = key.into();
        match serde_json::to_value(value) {
            Ok(v) => {
                self.bindings.insert(key, v);
                Ok(self)
            }
            Err(e) => Err(self.fail(format!("binding {key:?} is not serializable: {e}"))),
        }
    }

    pub fn value(&self, key: &str) -> Option<&Value> {
        self.bindings.get(key)
    }

    /// Recupera un binding con su tipo; `None` si falta o no encaja.
    pub fn value_as<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.bindings
            .get(key)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    pub fn bindings(&self) -> &BTreeMap<String, Value> {
        &self.bindings
    }

    pub fn with_deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Utc::now() + timeout)
    }

    pub fn deadline(&self) -> Option<DateTime<Utc>> {
        self.deadline
    }

    pub fn is_expired(&self) -> bool {
        self.deadline.is_some_and(|d| Utc::now() >= d)
    }

    /// Deriva un contexto con una señal de cancelación propia.
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Convierte el contexto en un fallo de hook.
    pub fn fail(self, reason: impl Into<String>) -> HookFailure<S> {
        HookFailure { context: self,
                      reason: reason.into() }
    }
}

impl<S: Default> Context<S> {
    /// Contexto de fondo: estado por defecto, sin deadline.
    pub fn background() -> Self {
        Self::new(S::default())
    }
}

impl<S: Default> Default for Context<S> {
    fn default() -> Self {
        Self::background()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn update_and_map_derive_new_state() {
        let ctx = Context::new(vec!["a".to_string()]).update(|s| s.push("b".into()))
                                                      .map(|mut s| {
                                                          s.push("c".into());
                                                          s
                                                      });
        assert_eq!(ctx.state(), &vec!["a", "b", "c"]);
    }

    #[test]
    fn bindings_are_typed_on_the_way_out() {
        let ctx = Context::<()>::background().with_value("replicas", 3u32)
                                             .and_then(|c| c.with_value("name", "web"))
                                             .unwrap();
        assert_eq!(ctx.value_as::<u32>("replicas"), Some(3));
        assert_eq!(ctx.value_as::<u32>("name"), None);
        assert_eq!(ctx.value_as::<String>("missing"), None);
        assert_eq!(ctx.value("name"), Some(&Value::String("web".into())));
    }

    #[test]
    fn cancellation_is_shared_by_derived_contexts() {
        let root = Context::<()>::background();
        let token = root.cancel_token();
        let derived = root.clone().with_value("k", 1).unwrap();
        assert!(!derived.is_cancelled());
        token.cancel();
        assert!(derived.is_cancelled());
        assert!(root.is_cancelled());
    }

    #[test]
    fn deadline_in_the_past_is_expired() {
        let ctx = Context::<()>::background().with_deadline(Utc::now() - Duration::seconds(1));
        assert!(ctx.is_expired());
        let ctx = Context::<()>::background().with_timeout(Duration::minutes(5));
        assert!(!ctx.is_expired());
        assert!(!Context::<()>::background().is_expired());
    }

    #[test]
    fn unserializable_binding_is_rejected_not_nulled() {
        let mut grid = HashMap::new();
        grid.insert((1u8, 2u8), 3u8);
        let ctx = Context::new(5u32).with_value("kept", "yes").unwrap();

        let failure = ctx.with_value("grid", grid).unwrap_err();
        assert!(failure.reason().contains("grid"), "{}", failure.reason());
        let (ctx, _) = failure.into_parts();
        assert_eq!(ctx.value("grid"), None);
        assert_eq!(ctx.value_as::<String>("kept").as_deref(), Some("yes"));
        assert_eq!(*ctx.state(), 5);
    }

    #[test]
    fn failure_keeps_the_context() {
        let failure = Context::new(7).fail("nope");
        assert_eq!(failure.reason(), "nope");
        let (ctx, reason) = failure.into_parts();
        assert_eq!(*ctx.state(), 7);
        assert_eq!(reason, "nope");
    }
}

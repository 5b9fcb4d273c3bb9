use std::collections::HashMap;

use super::{Action, Role};

/// Acciones agrupadas por rol, en orden de registro. Se admiten duplicados.
#[derive(Debug)]
pub struct ActionRegistry<S> {
    by_role: HashMap<Role, Vec<Action<S>>>,
}

impl<S> Default for ActionRegistry<S> {
    fn default() -> Self {
        Self { by_role: HashMap::new() }
    }
}

impl<S> ActionRegistry<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Añade la acción al final de la secuencia de su rol.
    pub fn register(&mut self, action: Action<S>) -> &mut Self {
        self.by_role.entry(action.role()).or_default().push(action);
        self
    }

    /// Secuencia exacta registrada para `role`. No crea la entrada si falta.
    pub fn actions_for(&self, role: Role) -> &[Action<S>] {
        self.by_role.get(&role).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Roles con al menos una acción, en orden de ciclo de vida.
    pub fn roles(&self) -> Vec<Role> {
        Role::ALL.into_iter()
                 .filter(|r| !self.actions_for(*r).is_empty())
                 .collect()
    }

    pub fn len(&self) -> usize {
        self.by_role.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop_setup() -> Action<()> {
        Action::setup(|ctx, _| Ok(ctx))
    }

    #[test]
    fn empty_registry_reports_zero_for_every_role() {
        let reg = ActionRegistry::<()>::new();
        for role in Role::ALL {
            assert!(reg.actions_for(role).is_empty());
        }
        assert!(reg.is_empty());
        assert!(reg.roles().is_empty());
    }

    #[test]
    fn querying_does_not_create_buckets() {
        let mut reg = ActionRegistry::<()>::new();
        assert_eq!(reg.actions_for(Role::Finish).len(), 0);
        assert!(reg.by_role.is_empty());
        reg.register(Action::finish(|ctx, _| Ok(ctx)));
        assert_eq!(reg.actions_for(Role::Finish).len(), 1);
    }

    #[test]
    fn interleaved_registration_keeps_roles_apart() {
        let mut reg = ActionRegistry::<()>::new();
        reg.register(noop_setup())
           .register(Action::before_test(|ctx, _, _| Ok(ctx)))
           .register(noop_setup())
           .register(Action::after_test(|ctx, _, _| Ok(ctx)))
           .register(noop_setup());
        assert_eq!(reg.actions_for(Role::Setup).len(), 3);
        assert_eq!(reg.actions_for(Role::BeforeTest).len(), 1);
        assert_eq!(reg.actions_for(Role::AfterTest).len(), 1);
        assert_eq!(reg.actions_for(Role::BeforeFeature).len(), 0);
        assert_eq!(reg.len(), 5);
        assert_eq!(reg.roles(), vec![Role::Setup, Role::BeforeTest, Role::AfterTest]);
    }
}

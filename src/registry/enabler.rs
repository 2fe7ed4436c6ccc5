//! Reversible activation handles.
//!
//! `enable` applies its change immediately. The returned [`PluginEnabler`]
//! only decides what happens afterwards: drop it and the change is permanent,
//! or turn it into a [`ScopedActivation`] guard that puts the previous
//! activation back when it goes out of scope.

use super::{Activation, Registry};

/// Handle for an activation that already happened.
pub struct PluginEnabler<'a, T> {
    registry: &'a Registry<T>,
    name: String,
    previous: Activation,
}

impl<'a, T> PluginEnabler<'a, T> {
    pub(crate) fn new(registry: &'a Registry<T>, name: String, previous: Activation) -> Self {
        Self {
            registry,
            name,
            previous,
        }
    }

    /// Name this handle activated. For a handle from
    /// [`Registry::disable`] this is the name left active, empty if none.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name that was active right before this activation.
    pub fn previous_active(&self) -> Option<&str> {
        self.previous.active.as_deref()
    }

    /// Revert on drop of the returned guard, including during unwinding.
    pub fn scoped(self) -> ScopedActivation<'a, T> {
        ScopedActivation {
            registry: self.registry,
            name: self.name,
            previous: Some(self.previous),
        }
    }

    /// Run `f` with this activation, then restore the previous one.
    pub fn run<R>(self, f: impl FnOnce() -> R) -> R {
        let _guard = self.scoped();
        f()
    }

    /// Restore the previous activation now.
    pub fn revert(self) {
        self.registry.restore(self.previous);
    }
}

impl<T> std::fmt::Debug for PluginEnabler<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginEnabler")
            .field("kind", &self.registry.kind())
            .field("name", &self.name)
            .field("previous", &self.previous.active)
            .finish()
    }
}

/// Guard restoring the activation captured before `enable` when dropped.
#[must_use = "dropping the guard immediately restores the previous activation"]
pub struct ScopedActivation<'a, T> {
    registry: &'a Registry<T>,
    name: String,
    previous: Option<Activation>,
}

impl<T> ScopedActivation<'_, T> {
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<T> Drop for ScopedActivation<'_, T> {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            self.registry.restore(previous);
        }
    }
}

impl<T> std::fmt::Debug for ScopedActivation<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScopedActivation")
            .field("kind", &self.registry.kind())
            .field("name", &self.name)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::error::RegistryError;
    use crate::registry::Registry;
    use serde_json::{json, Map};

    fn sample() -> Registry<&'static str> {
        let registry = Registry::new("plugin");
        registry.register("a", || "A");
        registry.register("b", || "B");
        registry.register("c", || "C");
        registry
    }

    #[test]
    fn unscoped_enable_is_permanent() {
        let registry = sample();
        registry.enable("a").expect("enable");
        let enabler = registry.enable("b").expect("enable");
        assert_eq!(enabler.previous_active(), Some("a"));
        drop(enabler);
        assert_eq!(registry.active().expect("active"), "b");
    }

    #[test]
    fn scope_exit_restores_previous_name() {
        let registry = sample();
        registry.enable("a").expect("enable");
        {
            let guard = registry.enable("b").expect("enable").scoped();
            assert_eq!(guard.name(), "b");
            assert_eq!(registry.active().expect("active"), "b");
        }
        assert_eq!(registry.active().expect("active"), "a");
    }

    #[test]
    fn scope_exit_restores_unset_active_name() {
        let registry = sample();
        registry.enable("c").expect("enable").run(|| {
            assert_eq!(registry.get_active().expect("active")(), "C");
        });
        assert!(registry.active().is_err());
    }

    #[test]
    fn nested_scopes_unwind_lifo() {
        let registry = sample();
        registry.enable("a").expect("enable");
        {
            let _outer = registry.enable("b").expect("enable").scoped();
            {
                let _inner = registry.enable("c").expect("enable").scoped();
                assert_eq!(registry.active().expect("active"), "c");
            }
            assert_eq!(registry.active().expect("active"), "b");
        }
        assert_eq!(registry.active().expect("active"), "a");
    }

    #[test]
    fn error_propagation_restores_previous_name() {
        fn render(registry: &Registry<&'static str>) -> Result<(), RegistryError> {
            let _guard = registry.enable("b")?.scoped();
            registry.get("missing")?;
            Ok(())
        }

        let registry = sample();
        registry.enable("a").expect("enable");
        assert!(render(&registry).is_err());
        assert_eq!(registry.active().expect("active"), "a");
    }

    #[test]
    fn scope_exit_restores_settings_and_enabled_flag() {
        let registry = sample();
        registry.enable("a").expect("enable");
        registry.disable();
        {
            let mut options = Map::new();
            options.insert("renderer".into(), json!("png"));
            let _guard = registry
                .enable_with(Some("b"), options)
                .expect("enable")
                .scoped();
            assert!(registry.is_enabled());
            assert_eq!(registry.global_settings().get("renderer"), Some(&json!("png")));
        }
        assert!(!registry.is_enabled());
        assert!(registry.global_settings().is_empty());
    }

    #[test]
    fn scoped_disable_reenables_on_exit() {
        let registry = sample();
        registry.enable("a").expect("enable");
        registry.disable().run(|| assert!(!registry.is_enabled()));
        assert!(registry.is_enabled());
    }

    #[test]
    fn revert_restores_immediately() {
        let registry = sample();
        registry.enable("a").expect("enable");
        registry.enable("b").expect("enable").revert();
        assert_eq!(registry.active().expect("active"), "a");
    }

    #[test]
    fn restoring_unregistered_name_clears_active() {
        let registry = sample();
        registry.enable("a").expect("enable");
        {
            let _guard = registry.enable("b").expect("enable").scoped();
            registry.unregister("a");
        }
        assert!(registry.active().is_err());
    }

    #[test]
    fn scope_resolves_by_name_after_overwrite() {
        let registry = sample();
        let _guard = registry.enable("b").expect("enable").scoped();
        registry.register("b", || "B2");
        assert_eq!(registry.get_active().expect("active")(), "B2");
    }
}

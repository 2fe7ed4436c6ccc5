//! Named factory registry with a single active entry.
//!
//! A registry maps names to zero-argument factories. One name may be marked
//! active; activation changes go through [`Registry::enable`], which hands
//! back a [`PluginEnabler`] that can optionally scope the change.

use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::RegistryError;

mod enabler;

pub use enabler::{PluginEnabler, ScopedActivation};

/// Shared zero-argument factory producing one registry value.
pub type Factory<T> = Arc<dyn Fn() -> T + Send + Sync>;

/// Activation state captured by enablers and restored on scope exit.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Activation {
    pub(crate) active: Option<String>,
    pub(crate) enabled: bool,
    pub(crate) global_settings: Map<String, Value>,
}

impl Default for Activation {
    fn default() -> Self {
        Self {
            active: None,
            enabled: true,
            global_settings: Map::new(),
        }
    }
}

struct RegistryState<T> {
    entries: BTreeMap<String, Factory<T>>,
    activation: Activation,
}

/// Registry of named factories for one element type.
pub struct Registry<T> {
    kind: &'static str,
    state: RwLock<RegistryState<T>>,
}

impl<T> Registry<T> {
    /// Empty registry. `kind` labels entries in errors and logs (`"theme"`).
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            state: RwLock::new(RegistryState {
                entries: BTreeMap::new(),
                activation: Activation::default(),
            }),
        }
    }

    /// Label used for entries of this registry.
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    /// Store or overwrite the factory for `name`. Activation is untouched.
    pub fn register<F>(&self, name: impl Into<String>, factory: F)
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        self.register_factory(name, Arc::new(factory));
    }

    /// Store or overwrite an already shared factory.
    pub fn register_factory(&self, name: impl Into<String>, factory: Factory<T>) {
        let name = name.into();
        let replaced = self.write().entries.insert(name.clone(), factory).is_some();
        tracing::debug!(kind = self.kind, %name, replaced, "registered entry");
    }

    /// Remove an entry. Clears the active name when it pointed at `name`.
    pub fn unregister(&self, name: &str) -> Option<Factory<T>> {
        let mut state = self.write();
        let removed = state.entries.remove(name);
        if removed.is_some() && state.activation.active.as_deref() == Some(name) {
            state.activation.active = None;
        }
        tracing::debug!(kind = self.kind, name, removed = removed.is_some(), "unregistered entry");
        removed
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        self.read().entries.keys().cloned().collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.read().entries.contains_key(name)
    }

    /// Resolve `name`, or the active name when `name` is `None`.
    ///
    /// The factory is returned uninvoked and the registry lock is released
    /// before the caller runs it.
    pub fn resolve(&self, name: Option<&str>) -> Result<Factory<T>, RegistryError> {
        let state = self.read();
        let resolved = match name {
            Some(name) => name,
            None => state
                .activation
                .active
                .as_deref()
                .ok_or_else(|| self.not_found(&state, None))?,
        };
        match state.entries.get(resolved) {
            Some(factory) => Ok(Arc::clone(factory)),
            None => {
                tracing::debug!(kind = self.kind, name = resolved, "lookup miss");
                Err(self.not_found(&state, Some(resolved)))
            }
        }
    }

    /// Factory registered under `name`.
    pub fn get(&self, name: &str) -> Result<Factory<T>, RegistryError> {
        self.resolve(Some(name))
    }

    /// Factory of the active entry.
    pub fn get_active(&self) -> Result<Factory<T>, RegistryError> {
        self.resolve(None)
    }

    /// Activate `name` with no extra options.
    pub fn enable(&self, name: &str) -> Result<PluginEnabler<'_, T>, RegistryError> {
        self.enable_with(Some(name), Map::new())
    }

    /// Activate `name` (or re-activate the current entry when `None`) and
    /// merge `options` into the global settings.
    ///
    /// Fails without touching any state when the name cannot be resolved.
    pub fn enable_with(
        &self,
        name: Option<&str>,
        options: Map<String, Value>,
    ) -> Result<PluginEnabler<'_, T>, RegistryError> {
        let mut state = self.write();
        let target = match name {
            Some(name) => name.to_string(),
            None => state
                .activation
                .active
                .clone()
                .ok_or_else(|| self.not_found(&state, None))?,
        };
        if !state.entries.contains_key(&target) {
            return Err(self.not_found(&state, Some(&target)));
        }

        let previous = state.activation.clone();
        state.activation.active = Some(target.clone());
        state.activation.enabled = true;
        state.activation.global_settings.extend(options);
        drop(state);

        tracing::info!(
            kind = self.kind,
            name = %target,
            previous = previous.active.as_deref().unwrap_or("<none>"),
            "enabled entry"
        );
        Ok(PluginEnabler::new(self, target, previous))
    }

    /// Turn the registry's effect off. The active name is kept.
    ///
    /// The returned handle's [`PluginEnabler::name`] is that active name, or
    /// an empty string when nothing was active.
    pub fn disable(&self) -> PluginEnabler<'_, T> {
        let mut state = self.write();
        let previous = state.activation.clone();
        state.activation.enabled = false;
        let name = previous.active.clone().unwrap_or_default();
        drop(state);

        tracing::info!(kind = self.kind, "disabled registry");
        PluginEnabler::new(self, name, previous)
    }

    /// Name of the active entry.
    pub fn active(&self) -> Result<String, RegistryError> {
        let state = self.read();
        state
            .activation
            .active
            .clone()
            .ok_or_else(|| self.not_found(&state, None))
    }

    pub fn is_enabled(&self) -> bool {
        self.read().activation.enabled
    }

    /// Options merged by every `enable_with` call so far.
    pub fn global_settings(&self) -> Map<String, Value> {
        self.read().activation.global_settings.clone()
    }

    pub(crate) fn restore(&self, mut snapshot: Activation) {
        let mut state = self.write();
        let dangling = snapshot
            .active
            .as_deref()
            .is_some_and(|name| !state.entries.contains_key(name));
        if dangling {
            tracing::warn!(
                kind = self.kind,
                name = snapshot.active.as_deref().unwrap_or_default(),
                "previously active entry is gone; clearing active name"
            );
            snapshot.active = None;
        }
        tracing::debug!(
            kind = self.kind,
            active = snapshot.active.as_deref().unwrap_or("<none>"),
            "restored activation"
        );
        state.activation = snapshot;
    }

    fn not_found(&self, state: &RegistryState<T>, name: Option<&str>) -> RegistryError {
        RegistryError::NotFound {
            kind: self.kind,
            name: name.map(str::to_string),
            available: state.entries.keys().cloned().collect(),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, RegistryState<T>> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, RegistryState<T>> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self::new("plugin")
    }
}

impl<T> fmt::Debug for Registry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.read();
        f.debug_struct("Registry")
            .field("kind", &self.kind)
            .field("names", &state.entries.keys().collect::<Vec<_>>())
            .field("activation", &state.activation)
            .finish()
    }
}

impl<T> fmt::Display for Registry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.read();
        let names: Vec<&str> = state.entries.keys().map(String::as_str).collect();
        write!(
            f,
            "{}Registry(active={}, enabled={}, registered=[{}])",
            capitalize(self.kind),
            state.activation.active.as_deref().unwrap_or("<none>"),
            state.activation.enabled,
            names.join(", ")
        )
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

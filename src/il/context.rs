//! Mutable state threaded through a generation pass.

use std::collections::HashMap;

use super::{label_generator::LabelGenerator, name_generator::NameGenerator, Label, Name};

/// Per-pass generation state.
///
/// The counters live as long as the pass. The storage map and both variable caches are
/// function-scoped and are wiped by [`Context::enter_function`].
#[derive(Debug, Default)]
pub struct Context {
    names: NameGenerator,
    labels: LabelGenerator,
    /// Identifier to storage name.
    storage: HashMap<String, Name>,
    /// Temporary holding the most recent load of a variable, until it is reassigned.
    last_loaded: HashMap<String, Name>,
    /// Temporary most recently assigned to a variable.
    last_assigned: HashMap<String, Name>,
}
impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_temp(&mut self) -> Name {
        self.names.next_temp()
    }

    pub fn next_label(&mut self) -> Label {
        self.labels.next_label()
    }

    /// Clears the storage map and both caches. Neither counter is touched.
    pub fn enter_function(&mut self) {
        self.storage.clear();
        self.last_loaded.clear();
        self.last_assigned.clear();
    }

    /// Looks up where an identifier lives. An unbound identifier is bound to itself.
    pub fn storage(&mut self, id: &str) -> Name {
        self.storage
            .entry(id.to_string())
            .or_insert_with(|| Name::Var(id.to_string()))
            .clone()
    }

    /// Binds an identifier to a storage name, replacing any earlier binding.
    pub fn bind<S: Into<String>>(&mut self, id: S, name: Name) {
        self.storage.insert(id.into(), name);
    }

    pub fn is_bound(&self, id: &str) -> bool {
        self.storage.contains_key(id)
    }

    pub fn cached_load(&self, id: &str) -> Option<&Name> {
        self.last_loaded.get(id)
    }

    pub fn record_load<S: Into<String>>(&mut self, id: S, temp: Name) {
        self.last_loaded.insert(id.into(), temp);
    }

    /// Records that `value` was stored into `id`. Any earlier load of `id` is stale from now on.
    pub fn record_assignment(&mut self, id: &str, value: Name) {
        self.last_loaded.remove(id);
        self.last_assigned.insert(id.to_string(), value);
    }

    pub fn last_assigned(&self, id: &str) -> Option<&Name> {
        self.last_assigned.get(id)
    }

    /// True when nothing function-scoped is recorded.
    pub fn is_function_scope_clear(&self) -> bool {
        self.storage.is_empty() && self.last_loaded.is_empty() && self.last_assigned.is_empty()
    }
}

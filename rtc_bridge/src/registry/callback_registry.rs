// rtc_bridge/src/registry/callback_registry.rs
use crate::host::host::Host;
use std::collections::HashMap;
use std::sync::MutexGuard;
use std::sync::Mutex;

/// A registered handler and the context it is called with.
pub struct CallbackEntry<H: Host> {
    pub name: String,
    pub handler: H::Function,
    pub context: H::Context,
}

impl<H: Host> Clone for CallbackEntry<H> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            handler: self.handler.clone(),
            context: self.context.clone(),
        }
    }
}

/// Maps an event name to the one handler registered for it.
pub struct CallbackRegistry<H: Host> {
    entries: Mutex<HashMap<String, CallbackEntry<H>>>,
}

impl<H: Host> Default for CallbackRegistry<H> {
    fn default() -> Self {
        Self { entries: Mutex::new(HashMap::new()) }
    }
}

impl<H: Host> CallbackRegistry<H> {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, CallbackEntry<H>>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Registers `handler` for `name`, replacing any earlier handler.
    /// Returns true when an entry was replaced.
    pub fn register(&self, name: impl Into<String>, handler: H::Function, context: H::Context) -> bool {
        let name = name.into();
        let entry = CallbackEntry { name: name.clone(), handler, context };
        // The replaced entry is dropped after the lock is released.
        let previous = self.entries().insert(name, entry);
        previous.is_some()
    }

    /// Removes the handler for `name`. Returns false if there was none.
    pub fn unregister(&self, name: &str) -> bool {
        let removed = self.entries().remove(name);
        removed.is_some()
    }

    /// Returns a copy of the entry so the lock is not held while it runs.
    pub fn lookup(&self, name: &str) -> Option<CallbackEntry<H>> {
        self.entries().get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries().contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// Removes every entry. The entries are dropped after the lock is released.
    pub fn clear(&self) {
        let drained = std::mem::take(&mut *self.entries());
        drop(drained);
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.entries().keys().cloned().collect();
        names.sort();
        names
    }
}

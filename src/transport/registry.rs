//! Process-wide registry of pending script callbacks.
//!
//! Each in-flight callback-script request claims a unique name here. The
//! name is released by [`CallbackGuard`] when the request finishes, whether
//! the callback fired, the timeout elapsed, or the future was dropped.

use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, OnceLock};
use tokio::sync::oneshot;
use uuid::Uuid;

use super::callback::CALLBACK_PREFIX;

static GLOBAL_REGISTRY: OnceLock<CallbackRegistry> = OnceLock::new();

/// Named one-shot callbacks awaiting a script payload
#[derive(Debug, Default)]
pub struct CallbackRegistry {
    pending: Mutex<HashMap<String, oneshot::Sender<JsonValue>>>,
}

impl CallbackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry shared by every client in the process
    pub fn global() -> &'static CallbackRegistry {
        GLOBAL_REGISTRY.get_or_init(CallbackRegistry::new)
    }

    /// Claim a fresh callback name.
    ///
    /// The returned guard removes the entry when dropped.
    pub fn register(&self) -> (CallbackGuard<'_>, oneshot::Receiver<JsonValue>) {
        let (tx, rx) = oneshot::channel();
        let mut pending = self.lock();
        let name = loop {
            let candidate = format!("{}{}", CALLBACK_PREFIX, Uuid::new_v4().simple());
            if !pending.contains_key(&candidate) {
                break candidate;
            }
        };
        pending.insert(name.clone(), tx);
        drop(pending);

        (
            CallbackGuard {
                registry: self,
                name,
            },
            rx,
        )
    }

    /// Fire a registered callback with its payload.
    ///
    /// Returns false when no callback of that name is pending, e.g. because
    /// it already timed out. A callback fires at most once.
    pub fn invoke(&self, name: &str, payload: JsonValue) -> bool {
        let sender = self.lock().remove(name);
        match sender {
            Some(tx) => tx.send(payload).is_ok(),
            None => false,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lock().contains_key(name)
    }

    /// Number of callbacks currently pending
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn unregister(&self, name: &str) {
        self.lock().remove(name);
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, oneshot::Sender<JsonValue>>> {
        // Entries stay consistent even if a holder panicked.
        self.pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Scoped claim on a callback name
#[derive(Debug)]
pub struct CallbackGuard<'a> {
    registry: &'a CallbackRegistry,
    name: String,
}

impl CallbackGuard<'_> {
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Drop for CallbackGuard<'_> {
    fn drop(&mut self) {
        self.registry.unregister(&self.name);
    }
}

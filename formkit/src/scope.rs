//! Teardown scopes.
//!
//! A [`Scope`] stands for the lifetime of whatever owns a form (a page, a
//! modal, a dialog). Hooks registered with [`Scope::on_teardown`] run exactly
//! once, when the scope is ended explicitly or dropped.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use log::debug;

/// A teardown hook.
pub type Teardown = Box<dyn FnOnce() + Send>;

#[derive(Default)]
pub struct Scope {
    hooks: Mutex<Vec<Teardown>>,
    ended: AtomicBool,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a hook to run when the scope ends.
    ///
    /// If the scope has already ended the hook runs immediately.
    pub fn on_teardown<F>(&self, hook: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let mut hooks = self.hooks.lock().unwrap_or_else(PoisonError::into_inner);
        if self.is_ended() {
            drop(hooks);
            hook();
            return;
        }
        hooks.push(Box::new(hook));
    }

    pub fn is_ended(&self) -> bool {
        self.ended.load(Ordering::SeqCst)
    }

    /// Run all hooks in registration order. Later calls do nothing.
    pub fn end(&self) {
        if self.ended.swap(true, Ordering::SeqCst) {
            return;
        }
        let hooks = {
            let mut guard = self.hooks.lock().unwrap_or_else(PoisonError::into_inner);
            std::mem::take(&mut *guard)
        };
        debug!("Scope ended, running {} teardown hooks", hooks.len());
        for hook in hooks {
            hook();
        }
    }
}

impl Drop for Scope {
    fn drop(&mut self) {
        self.end();
    }
}

impl std::fmt::Debug for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scope")
            .field("ended", &self.is_ended())
            .finish_non_exhaustive()
    }
}

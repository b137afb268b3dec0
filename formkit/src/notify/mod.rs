//! Notification sink and catch-and-notify helpers.
//!
//! The form engine never shows notifications itself. Calling code hands a
//! [`Notifier`] to [`catch_notify`] / [`try_notify`] so that unexpected
//! failures (a panicking converter, a failed request) become an error toast
//! and a `None` instead of tearing down the page.

mod catch;
mod toast;

use std::sync::{Mutex, PoisonError};

pub use catch::{catch_notify, extract_panic_message, try_notify};
pub use toast::{DEFAULT_TOAST_DURATION, Toast, ToastLevel};

/// Something that can display toasts.
pub trait Notifier {
    fn notify(&self, toast: Toast);
}

impl<F: Fn(Toast)> Notifier for F {
    fn notify(&self, toast: Toast) {
        self(toast)
    }
}

/// A notifier that keeps every toast it receives.
#[derive(Debug, Default)]
pub struct CollectingNotifier {
    toasts: Mutex<Vec<Toast>>,
}

impl CollectingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// All toasts received so far.
    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Remove and return all toasts received so far.
    pub fn drain(&self) -> Vec<Toast> {
        std::mem::take(&mut *self.toasts.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl Notifier for CollectingNotifier {
    fn notify(&self, toast: Toast) {
        self.toasts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(toast);
    }
}

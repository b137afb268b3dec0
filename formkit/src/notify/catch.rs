use std::any::Any;
use std::fmt::Display;
use std::panic::{self, AssertUnwindSafe};

use log::error;

use super::{Notifier, Toast};

/// Run `f`, turning a panic into an error toast and `None`.
///
/// # Example
///
/// ```ignore
/// let posts = catch_notify(&notifier, || convert_posts(&payload)).unwrap_or_default();
/// ```
pub fn catch_notify<T, N, F>(notifier: &N, f: F) -> Option<T>
where
    N: Notifier + ?Sized,
    F: FnOnce() -> T,
{
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => Some(value),
        Err(panic) => {
            let message = extract_panic_message(&*panic);
            error!("Caught panic: {}", message);
            notifier.notify(Toast::error(format!("Error. {}", message)));
            None
        }
    }
}

/// Like [`catch_notify`], also turning an `Err` into an error toast.
pub fn try_notify<T, E, N, F>(notifier: &N, f: F) -> Option<T>
where
    E: Display,
    N: Notifier + ?Sized,
    F: FnOnce() -> Result<T, E>,
{
    match catch_notify(notifier, f)? {
        Ok(value) => Some(value),
        Err(err) => {
            error!("Caught error: {}", err);
            notifier.notify(Toast::error(format!("Error. {}", err)));
            None
        }
    }
}

/// Extract a human-readable message from a panic payload.
///
/// Panics can contain either `&str` or `String` payloads. This function
/// attempts to extract either, falling back to a generic message.
pub fn extract_panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown client error".to_string()
    }
}

//! Tests for toasts and catch-and-notify.

use formkit::prelude::*;

#[test]
fn test_catch_notify_passes_value_through() {
    let notifier = CollectingNotifier::new();
    assert_eq!(catch_notify(&notifier, || 10 / 2), Some(5));
    assert!(notifier.toasts().is_empty());
}

#[test]
fn test_catch_notify_turns_panic_into_error_toast() {
    let notifier = CollectingNotifier::new();
    let result: Option<u32> = catch_notify(&notifier, || panic!("division by zero"));
    assert_eq!(result, None);

    let toasts = notifier.drain();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].level, ToastLevel::Error);
    assert!(toasts[0].message.contains("division by zero"));
    assert!(notifier.toasts().is_empty());
}

#[test]
fn test_try_notify_turns_err_into_error_toast() {
    let notifier = CollectingNotifier::new();
    let result: Option<i32> = try_notify(&notifier, || "abc".parse::<i32>());
    assert_eq!(result, None);
    let toasts = notifier.toasts();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].level, ToastLevel::Error);

    assert_eq!(try_notify(&notifier, || "42".parse::<i32>()), Some(42));
    assert_eq!(notifier.toasts().len(), 1);
}

#[test]
fn test_closure_notifier() {
    use std::cell::RefCell;

    let seen = RefCell::new(Vec::new());
    let notifier = |toast: Toast| seen.borrow_mut().push(toast.message);
    let _: Option<()> = catch_notify(&notifier, || panic!("{}", String::from("boom")));
    assert_eq!(seen.into_inner(), vec!["Error. boom".to_string()]);
}

#[test]
fn test_toast_constructors() {
    assert_eq!(Toast::success("ok").level, ToastLevel::Success);
    assert_eq!(Toast::warning("hm").level, ToastLevel::Warning);
    assert_eq!(Toast::from("plain").level, ToastLevel::Info);
    let toast = Toast::info("x").with_duration(std::time::Duration::from_secs(1));
    assert_eq!(toast.duration, std::time::Duration::from_secs(1));
}

//! # User Notifications
//!
//! The sink through which background work reports errors to the user.
//! A GUI shows a dialog or toast; the CLI prints to stderr; tests record.

/// Reports errors to the user.
pub trait Notifier: Send + Sync {
    /// Shows an error with a short title and a message.
    fn notify_error(&self, title: &str, message: &str);
}

/// No-op notifier for headless use and tests.
pub struct NoOpNotifier;

impl Notifier for NoOpNotifier {
    fn notify_error(&self, _title: &str, _message: &str) {}
}

//! User-facing notifications (toasts in the host UI).

/// Severity of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Info,
    Error,
}

/// Fire-and-forget notification sink provided by the host
pub trait Notifier {
    fn notify_error(&mut self, message: &str);
    fn notify_success(&mut self, message: &str);
    fn notify_info(&mut self, message: &str);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

/// Notifier that keeps every notification in order.
///
/// Used by tests, and by the terminal host which drains it into its status bar.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notifications: Vec<Notification>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn last(&self) -> Option<&Notification> {
        self.notifications.last()
    }

    pub fn drain(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    fn push(&mut self, kind: NotificationKind, message: &str) {
        self.notifications.push(Notification { kind, message: message.to_string() });
    }
}

impl Notifier for RecordingNotifier {
    fn notify_error(&mut self, message: &str) {
        tracing::debug!(text = message, "error notification");
        self.push(NotificationKind::Error, message);
    }

    fn notify_success(&mut self, message: &str) {
        self.push(NotificationKind::Success, message);
    }

    fn notify_info(&mut self, message: &str) {
        self.push(NotificationKind::Info, message);
    }
}

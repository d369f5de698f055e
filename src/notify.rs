//! Completion/error notifications. Delivery transport stays behind the
//! [`Notifier`] trait; the production implementation resolves recipients from
//! configuration and emits the routed notification through tracing.

use std::sync::Mutex;

use tracing::{info, warn};

use crate::config::EmailSettings;

pub trait Notifier: Send + Sync {
    /// Summary of a successfully processed source type.
    fn notify_success(&self, process: &str, rows_read: usize, duplicates_removed: usize, elapsed: &str);

    /// Per-file failure report. Does not abort sibling files.
    fn notify_error(&self, file: &str, message: &str);
}

/// Routes notifications according to the configured recipient lists and logs
/// them. Success goes to `email_to`, errors to `email_to_error`, both CC
/// `email_cc`; with no recipients the notification is skipped.
pub struct LogNotifier {
    settings: EmailSettings,
}

impl LogNotifier {
    pub fn new(settings: EmailSettings) -> Self {
        Self { settings }
    }

    fn recipients(&self, is_error: bool) -> (Vec<String>, Vec<String>) {
        let to = if is_error {
            split_addresses(&self.settings.email_to_error)
        } else {
            split_addresses(&self.settings.email_to)
        };
        let cc = split_addresses(&self.settings.email_cc);
        (to, cc)
    }
}

impl Notifier for LogNotifier {
    fn notify_success(&self, process: &str, rows_read: usize, duplicates_removed: usize, elapsed: &str) {
        let (to, cc) = self.recipients(false);
        if to.is_empty() && cc.is_empty() {
            warn!(process, "no recipients configured, notification skipped");
            return;
        }
        info!(
            process,
            rows_read,
            duplicates_removed,
            elapsed,
            to = to.join(";"),
            cc = cc.join(";"),
            "success notification"
        );
    }

    fn notify_error(&self, file: &str, message: &str) {
        let (to, cc) = self.recipients(true);
        if to.is_empty() && cc.is_empty() {
            warn!(file, "no recipients configured, notification skipped");
            return;
        }
        warn!(
            file,
            message,
            to = to.join(";"),
            cc = cc.join(";"),
            "error notification"
        );
    }
}

fn split_addresses(list: &str) -> Vec<String> {
    list.split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Captures notifications in memory for tests.
#[derive(Default)]
pub struct RecordingNotifier {
    pub events: Mutex<Vec<NotifyEvent>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifyEvent {
    Success {
        process: String,
        rows_read: usize,
        duplicates_removed: usize,
        elapsed: String,
    },
    Error {
        file: String,
        message: String,
    },
}

impl RecordingNotifier {
    pub fn events(&self) -> Vec<NotifyEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<NotifyEvent> {
        self.events()
            .into_iter()
            .filter(|e| matches!(e, NotifyEvent::Error { .. }))
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify_success(&self, process: &str, rows_read: usize, duplicates_removed: usize, elapsed: &str) {
        self.events.lock().unwrap().push(NotifyEvent::Success {
            process: process.to_string(),
            rows_read,
            duplicates_removed,
            elapsed: elapsed.to_string(),
        });
    }

    fn notify_error(&self, file: &str, message: &str) {
        self.events.lock().unwrap().push(NotifyEvent::Error {
            file: file.to_string(),
            message: message.to_string(),
        });
    }
}

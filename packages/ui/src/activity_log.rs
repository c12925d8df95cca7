//! Client-side diagnostic trail: failed submissions, link errors, sign-outs.
//!
//! Every entry is also mirrored to `tracing`, so the same events reach the
//! console on native builds. Failed submissions keep their [`FailureKind`] so
//! the panel can tell retryable failures from ones that need the user to act.

use dioxus::prelude::*;
use flow::{FailureKind, OperationFailure};

#[derive(Clone, Debug, PartialEq)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl LogLevel {
    /// Recoverable failures are warnings; a failure the form cannot retry is an error.
    pub fn for_failure(failure: &OperationFailure) -> Self {
        if failure.is_recoverable() {
            LogLevel::Warning
        } else {
            LogLevel::Error
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LogEntry {
    pub timestamp: String,
    pub level: LogLevel,
    pub message: String,
    /// Set for failed sign-in / sign-up submissions.
    pub failure: Option<FailureKind>,
}

impl LogEntry {
    /// `Some(true)` when resubmitting the form may succeed.
    pub fn retryable(&self) -> Option<bool> {
        self.failure.map(|kind| kind.is_recoverable())
    }
}

/// Short name shown for a failure kind.
pub fn failure_label(kind: FailureKind) -> &'static str {
    match kind {
        FailureKind::Rejected => "Rejected",
        FailureKind::Conflict => "Account exists",
        FailureKind::Unavailable => "Unavailable",
        FailureKind::Cancelled => "Cancelled",
        FailureKind::TimedOut => "Timed out",
    }
}

#[derive(Clone, Debug, Default)]
pub struct ActivityLog {
    pub entries: Vec<LogEntry>,
    pub visible: bool,
}

impl ActivityLog {
    pub fn has_errors(&self) -> bool {
        self.entries.iter().any(|e| e.level == LogLevel::Error)
    }

    /// Failed submissions counted per kind, in order of first occurrence.
    pub fn failure_counts(&self) -> Vec<(FailureKind, usize)> {
        let mut counts: Vec<(FailureKind, usize)> = Vec::new();
        for kind in self.entries.iter().filter_map(|e| e.failure) {
            match counts.iter_mut().find(|(k, _)| *k == kind) {
                Some((_, n)) => *n += 1,
                None => counts.push((kind, 1)),
            }
        }
        counts
    }

    fn push(&mut self, level: LogLevel, message: &str, failure: Option<FailureKind>) {
        self.entries.push(LogEntry {
            timestamp: current_time(),
            level,
            message: message.to_string(),
            failure,
        });
    }
}

pub fn use_activity_log() -> Signal<ActivityLog> {
    use_context::<Signal<ActivityLog>>()
}

fn trace(level: &LogLevel, message: &str) {
    match level {
        LogLevel::Error => tracing::error!("{message}"),
        LogLevel::Warning => tracing::warn!("{message}"),
        LogLevel::Info | LogLevel::Success => tracing::info!("{message}"),
    }
}

pub fn log_activity(log: &mut Signal<ActivityLog>, level: LogLevel, message: &str) {
    trace(&level, message);
    // The owning scope may already be gone when a late event lands.
    if let Ok(mut log) = log.try_write() {
        log.push(level, message, None);
    }
}

pub fn log_failure(log: &mut Signal<ActivityLog>, failure: &OperationFailure) {
    let level = LogLevel::for_failure(failure);
    trace(&level, &format!("{:?}: {}", failure.kind, failure.message));
    if let Ok(mut log) = log.try_write() {
        log.push(level, &failure.message, Some(failure.kind));
    }
}

#[cfg(target_arch = "wasm32")]
fn current_time() -> String {
    let date = js_sys::Date::new_0();
    let h = date.get_hours();
    let m = date.get_minutes();
    let s = date.get_seconds();
    format!("{h:02}:{m:02}:{s:02}")
}

#[cfg(not(target_arch = "wasm32"))]
fn current_time() -> String {
    "--:--:--".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_counts_group_by_kind() {
        let mut log = ActivityLog::default();
        log.push(LogLevel::Warning, "Invalid email or password", Some(FailureKind::Rejected));
        log.push(LogLevel::Info, "Signed out", None);
        log.push(LogLevel::Warning, "connection refused", Some(FailureKind::Unavailable));
        log.push(LogLevel::Warning, "Invalid email or password", Some(FailureKind::Rejected));

        assert_eq!(
            log.failure_counts(),
            vec![(FailureKind::Rejected, 2), (FailureKind::Unavailable, 1)]
        );
    }

    #[test]
    fn test_conflict_is_not_retryable() {
        let mut log = ActivityLog::default();
        log.push(LogLevel::Error, "An account with this email already exists", Some(FailureKind::Conflict));
        log.push(LogLevel::Warning, "Submission timed out", Some(FailureKind::TimedOut));
        log.push(LogLevel::Success, "Linked 2 account(s)", None);

        let retryable: Vec<Option<bool>> = log.entries.iter().map(LogEntry::retryable).collect();
        assert_eq!(retryable, vec![Some(false), Some(true), None]);
        assert!(log.has_errors());
    }

    #[test]
    fn test_failure_level_follows_recoverability() {
        let conflict = OperationFailure {
            kind: FailureKind::Conflict,
            message: "taken".to_string(),
        };
        let cancelled = OperationFailure {
            kind: FailureKind::Cancelled,
            message: "Submission cancelled".to_string(),
        };
        assert_eq!(LogLevel::for_failure(&conflict), LogLevel::Error);
        assert_eq!(LogLevel::for_failure(&cancelled), LogLevel::Warning);
    }
}

use dioxus::prelude::*;

use crate::activity_log::{failure_label, use_activity_log, LogEntry, LogLevel};

const ACTIVITY_LOG_CSS: Asset = asset!("/assets/styling/activity_log.css");

fn entry_class(entry: &LogEntry) -> &'static str {
    match entry.level {
        LogLevel::Error => "activity-log-entry error",
        LogLevel::Warning => "activity-log-entry warning",
        LogLevel::Success => "activity-log-entry success",
        LogLevel::Info => "activity-log-entry info",
    }
}

/// Diagnostics for the current visit, newest first, with a per-kind summary of
/// failed submissions.
#[component]
pub fn ActivityLogPanel() -> Element {
    let mut log = use_activity_log();

    if !log().visible {
        return rsx! {};
    }

    let snapshot = log();
    let summary: Vec<(&'static str, usize, bool)> = snapshot
        .failure_counts()
        .into_iter()
        .map(|(kind, count)| (failure_label(kind), count, kind.is_recoverable()))
        .collect();
    let rows: Vec<(&LogEntry, Option<&'static str>)> = snapshot
        .entries
        .iter()
        .rev()
        .map(|entry| (entry, entry.failure.map(failure_label)))
        .collect();

    rsx! {
        document::Stylesheet { href: ACTIVITY_LOG_CSS }

        aside {
            class: "activity-log-panel",
            header {
                class: "activity-log-header",
                span { "Activity" }
                nav {
                    class: "activity-log-header-actions",
                    button { onclick: move |_| log.write().entries.clear(), "Clear" }
                    button { onclick: move |_| log.write().visible = false, "Close" }
                }
            }

            if !summary.is_empty() {
                ul {
                    class: "activity-log-summary",
                    for (label, count, recoverable) in summary {
                        li {
                            key: "{label}",
                            class: if recoverable { "failure-chip" } else { "failure-chip blocking" },
                            "{label} × {count}"
                        }
                    }
                }
            }

            if snapshot.entries.is_empty() {
                p { class: "activity-log-empty", "Nothing to report." }
            }
            ol {
                class: "activity-log-entries",
                for (entry, kind_label) in rows {
                    li {
                        class: entry_class(entry),
                        span { class: "activity-log-time", "{entry.timestamp}" }
                        if let Some(kind_label) = kind_label {
                            span { class: "activity-log-kind", "{kind_label}" }
                        }
                        span { class: "activity-log-message", "{entry.message}" }
                        match entry.retryable() {
                            Some(true) => rsx! { span { class: "activity-log-hint", "You can try again" } },
                            Some(false) => rsx! { span { class: "activity-log-hint blocking", "Sign in instead" } },
                            None => rsx! {},
                        }
                    }
                }
            }
        }
    }
}

/// Badge that opens the activity panel. Hidden until there is something to show.
#[component]
pub fn ActivityLogToggle() -> Element {
    let mut log = use_activity_log();
    let snapshot = log();
    let count = snapshot.entries.len();
    if count == 0 {
        return rsx! {};
    }
    let failed: usize = snapshot.failure_counts().iter().map(|(_, n)| n).sum();
    let title = format!("Activity: {failed} failed submission(s)");

    rsx! {
        button {
            class: if snapshot.has_errors() { "activity-log-toggle has-errors" } else { "activity-log-toggle" },
            title,
            onclick: move |_| {
                let visible = log.peek().visible;
                log.write().visible = !visible;
            },
            "{count}"
        }
    }
}

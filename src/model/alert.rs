use std::fmt;

use chrono::{DateTime, Duration, Local};

/// Maximum number of alerts retained; the oldest entry is evicted first.
pub const MAX_ALERTS: usize = 100;

/// Age below which an identical message is suppressed as a duplicate.
const DEDUP_WINDOW_S: i64 = 5;

/// Alert severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Danger,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Danger => "DANGER",
        };
        f.write_str(s)
    }
}

/// A single monitoring alert.
///
/// Immutable once created, except for the acknowledged flag.
#[derive(Debug, Clone)]
pub struct Alert {
    /// Wall-clock time the alert was raised.
    pub timestamp: DateTime<Local>,
    /// Human-readable description of the condition.
    pub message: String,
    /// Severity class.
    pub severity: Severity,
    /// Name of the appliance, group, or subsystem concerned.
    pub affected_item: String,
    /// Whether a user has acknowledged the alert.
    pub acknowledged: bool,
}

impl Alert {
    /// Timestamp formatted as `HH:MM:SS` for compact display.
    pub fn formatted_timestamp(&self) -> String {
        self.timestamp.format("%H:%M:%S").to_string()
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {} ({})",
            self.formatted_timestamp(),
            self.severity,
            self.message,
            self.affected_item
        )
    }
}

/// Bounded, newest-first alert list with duplicate suppression.
///
/// An alert whose message matches an existing entry younger than five
/// seconds is dropped, so a condition persisting across ticks produces
/// one entry rather than one per tick.
#[derive(Debug, Clone, Default)]
pub struct AlertLog {
    entries: Vec<Alert>,
}

impl AlertLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an alert timestamped now. Returns `false` if suppressed.
    pub fn push(&mut self, message: impl Into<String>, severity: Severity, item: impl Into<String>) -> bool {
        self.push_at(Local::now(), message, severity, item)
    }

    /// Records an alert with an explicit timestamp.
    ///
    /// Suppressed (returning `false`) when an entry with an identical
    /// message exists and is younger than the dedup window. Otherwise
    /// the alert is inserted at the front and the oldest entry is
    /// evicted if the log exceeds [`MAX_ALERTS`].
    pub fn push_at(
        &mut self,
        now: DateTime<Local>,
        message: impl Into<String>,
        severity: Severity,
        item: impl Into<String>,
    ) -> bool {
        let message = message.into();
        let window = Duration::seconds(DEDUP_WINDOW_S);
        let duplicate = self
            .entries
            .iter()
            .any(|a| a.message == message && now - a.timestamp < window);
        if duplicate {
            return false;
        }

        self.entries.insert(
            0,
            Alert {
                timestamp: now,
                message,
                severity,
                affected_item: item.into(),
                acknowledged: false,
            },
        );
        if self.entries.len() > MAX_ALERTS {
            self.entries.pop();
        }
        true
    }

    /// Marks the alert at `index` (newest first) as acknowledged.
    pub fn acknowledge(&mut self, index: usize) -> bool {
        match self.entries.get_mut(index) {
            Some(alert) => {
                alert.acknowledged = true;
                true
            }
            None => false,
        }
    }

    /// Removes all alerts.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Alerts in newest-first order.
    pub fn entries(&self) -> &[Alert] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t0() -> DateTime<Local> {
        Local::now()
    }

    #[test]
    fn push_stores_newest_first() {
        let mut log = AlertLog::new();
        let now = t0();
        log.push_at(now, "first", Severity::Info, "System");
        log.push_at(now + Duration::seconds(6), "second", Severity::Warning, "Main");
        assert_eq!(log.len(), 2);
        assert_eq!(log.entries()[0].message, "second");
        assert_eq!(log.entries()[1].message, "first");
    }

    #[test]
    fn duplicate_within_window_is_suppressed() {
        let mut log = AlertLog::new();
        let now = t0();
        assert!(log.push_at(now, "overload", Severity::Danger, "Main"));
        assert!(!log.push_at(now + Duration::seconds(2), "overload", Severity::Danger, "Main"));
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn duplicate_after_window_is_stored() {
        let mut log = AlertLog::new();
        let now = t0();
        assert!(log.push_at(now, "overload", Severity::Danger, "Main"));
        assert!(log.push_at(now + Duration::seconds(5), "overload", Severity::Danger, "Main"));
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn different_messages_are_not_duplicates() {
        let mut log = AlertLog::new();
        let now = t0();
        assert!(log.push_at(now, "overload", Severity::Danger, "Main"));
        assert!(log.push_at(now, "surge", Severity::Warning, "TV"));
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn log_caps_at_max_and_evicts_oldest() {
        let mut log = AlertLog::new();
        let now = t0();
        for i in 0..(MAX_ALERTS + 10) {
            log.push_at(
                now + Duration::seconds(10 * i as i64),
                format!("alert {i}"),
                Severity::Info,
                "System",
            );
        }
        assert_eq!(log.len(), MAX_ALERTS);
        // newest kept at the front, oldest evicted from the back
        assert_eq!(log.entries()[0].message, format!("alert {}", MAX_ALERTS + 9));
        assert_eq!(log.entries()[MAX_ALERTS - 1].message, "alert 10");
    }

    #[test]
    fn acknowledge_flags_entry() {
        let mut log = AlertLog::new();
        log.push_at(t0(), "surge", Severity::Warning, "TV");
        assert!(!log.entries()[0].acknowledged);
        assert!(log.acknowledge(0));
        assert!(log.entries()[0].acknowledged);
        assert!(!log.acknowledge(5));
    }

    #[test]
    fn clear_empties_log() {
        let mut log = AlertLog::new();
        log.push_at(t0(), "surge", Severity::Warning, "TV");
        log.clear();
        assert!(log.is_empty());
    }
}

//! Due-date classification for open tasks.

use chrono::{DateTime, Duration, NaiveDateTime, Utc};

/// How close an open task is to its deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueStatus {
    /// The due instant has passed.
    Expired,
    /// Less than a day remains.
    DueSoon,
    OnTime,
}

impl DueStatus {
    pub fn at(due: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let remaining = due - now;
        if remaining < Duration::zero() {
            DueStatus::Expired
        } else if remaining < Duration::days(1) {
            DueStatus::DueSoon
        } else {
            DueStatus::OnTime
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DueStatus::Expired => "Overdue",
            DueStatus::DueSoon => "Due soon",
            DueStatus::OnTime => "On time",
        }
    }
}

/// Parses an RFC 3339 timestamp; a value without offset is read as UTC,
/// which is how the server stores it.
pub fn parse_due_date(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Wire form sent in `due_date`.
pub fn format_due_date(due: DateTime<Utc>) -> String {
    due.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

/// The "tomorrow" / "in one week" shortcuts of the date picker.
pub fn shortcut(now: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    now + Duration::days(days)
}

pub fn display(due: DateTime<Utc>) -> String {
    due.format("%d %b %Y %H:%M").to_string()
}

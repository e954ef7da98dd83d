//! Timestamp sources
//!
//! Entries carry their save time as a display string, so a clock here yields
//! formatted text rather than an instant.

use chrono::{DateTime, Local, TimeZone};

/// Default display format, matching the en-US locale rendering
/// (`10/18/2026, 3:04:05 PM`)
pub const LOCALE_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// Source of the timestamp stored with each new entry
pub trait Clock {
    /// Current local date-time, formatted for display
    fn now_string(&self) -> String;
}

impl<T: Clock + ?Sized> Clock for Box<T> {
    fn now_string(&self) -> String {
        (**self).now_string()
    }
}

/// Local wall clock
#[derive(Debug, Clone)]
pub struct LocalClock {
    format: String,
}

impl Default for LocalClock {
    fn default() -> Self {
        Self {
            format: LOCALE_FORMAT.to_string(),
        }
    }
}

impl LocalClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom strftime format
    pub fn with_format(format: impl Into<String>) -> Self {
        Self {
            format: format.into(),
        }
    }

    /// Format any date-time with this clock's format
    pub fn format<Tz: TimeZone>(&self, at: &DateTime<Tz>) -> String
    where
        Tz::Offset: std::fmt::Display,
    {
        at.format(&self.format).to_string()
    }
}

impl Clock for LocalClock {
    fn now_string(&self) -> String {
        self.format(&Local::now())
    }
}

/// Clock that always returns the same string
#[derive(Debug, Clone)]
pub struct FixedClock(pub String);

impl FixedClock {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }
}

impl Clock for FixedClock {
    fn now_string(&self) -> String {
        self.0.clone()
    }
}

//! Trait definitions for the stores that receive extracted items
//!
//! These traits define the boundary between the extraction pipeline and the
//! calendar / reminder backends. Implementations live in other crates and are
//! passed in explicitly per call; nothing here holds a global handle.

use chrono::{DateTime, Utc};

/// An event as held by a calendar backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEvent {
    /// Event title
    pub title: String,

    /// Start instant
    pub start: DateTime<Utc>,

    /// End instant
    pub end: DateTime<Utc>,

    /// Optional notes
    pub notes: Option<String>,
}

impl CalendarEvent {
    /// Whether the event overlaps the closed range `[from, to]`
    pub fn overlaps(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> bool {
        self.start <= to && self.end >= from
    }
}

/// A reminder as held by a reminders backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
    /// Reminder title
    pub title: String,

    /// Optional due instant
    pub due: Option<DateTime<Utc>>,

    /// Optional notes
    pub notes: Option<String>,
}

/// Trait for creating and listing calendar events
///
/// Implemented by the application layer (chrono-cli)
pub trait CalendarStore {
    /// Error type for store operations
    type Error;

    /// Create an event with both of its dates known
    fn create_event(
        &mut self,
        title: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        notes: Option<&str>,
    ) -> Result<(), Self::Error>;

    /// Events overlapping `[from, to]`, ordered by start
    fn fetch_events(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<CalendarEvent>, Self::Error>;
}

/// Trait for creating and listing reminders
///
/// Implemented by the application layer (chrono-cli)
pub trait ReminderStore {
    /// Error type for store operations
    type Error;

    /// Create a reminder with an optional due date
    fn create_task(
        &mut self,
        title: &str,
        due: Option<DateTime<Utc>>,
        notes: Option<&str>,
    ) -> Result<(), Self::Error>;

    /// All stored reminders
    fn fetch_reminders(&self) -> Result<Vec<Reminder>, Self::Error>;
}

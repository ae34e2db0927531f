//! JSON file backed calendar and reminder stores.
//!
//! Each store loads its file on open and rewrites it after every create.

use chrono::{DateTime, Utc};
use chrono_domain::{CalendarEvent, CalendarStore, Reminder, ReminderStore};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// File name of the calendar store inside the data directory.
pub const EVENTS_FILE: &str = "events.json";

/// File name of the reminder store inside the data directory.
pub const REMINDERS_FILE: &str = "reminders.json";

/// Errors from the file stores.
#[derive(Debug, Error)]
pub enum StoreError {
    /// I/O error
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File being accessed
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// File contents are not a valid store
    #[error("Corrupt store file {path}: {source}")]
    Corrupt {
        /// File being read
        path: PathBuf,
        /// Underlying error
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredEvent {
    title: String,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    notes: Option<String>,
}

impl From<StoredEvent> for CalendarEvent {
    fn from(stored: StoredEvent) -> Self {
        CalendarEvent {
            title: stored.title,
            start: stored.start,
            end: stored.end,
            notes: stored.notes,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredReminder {
    title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    due: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    notes: Option<String>,
}

impl From<StoredReminder> for Reminder {
    fn from(stored: StoredReminder) -> Self {
        Reminder {
            title: stored.title,
            due: stored.due,
            notes: stored.notes,
        }
    }
}

/// Calendar backed by `events.json`.
#[derive(Debug)]
pub struct JsonCalendarStore {
    path: PathBuf,
    events: Vec<StoredEvent>,
}

impl JsonCalendarStore {
    /// Open the calendar in `data_dir`, starting empty if the file is absent.
    pub fn open(data_dir: &Path) -> Result<Self, StoreError> {
        let path = data_dir.join(EVENTS_FILE);
        let events = load(&path)?;
        Ok(Self { path, events })
    }
}

impl CalendarStore for JsonCalendarStore {
    type Error = StoreError;

    fn create_event(
        &mut self,
        title: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        notes: Option<&str>,
    ) -> Result<(), StoreError> {
        commit(
            &self.path,
            &mut self.events,
            StoredEvent {
                title: title.to_string(),
                start,
                end,
                notes: notes.map(str::to_string),
            },
        )
    }

    fn fetch_events(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<CalendarEvent>, StoreError> {
        let mut events: Vec<CalendarEvent> = self
            .events
            .iter()
            .cloned()
            .map(CalendarEvent::from)
            .filter(|event| event.overlaps(from, to))
            .collect();
        events.sort_by_key(|event| event.start);
        Ok(events)
    }
}

/// Reminder list backed by `reminders.json`.
#[derive(Debug)]
pub struct JsonReminderStore {
    path: PathBuf,
    reminders: Vec<StoredReminder>,
}

impl JsonReminderStore {
    /// Open the reminder list in `data_dir`, starting empty if the file is absent.
    pub fn open(data_dir: &Path) -> Result<Self, StoreError> {
        let path = data_dir.join(REMINDERS_FILE);
        let reminders = load(&path)?;
        Ok(Self { path, reminders })
    }
}

impl ReminderStore for JsonReminderStore {
    type Error = StoreError;

    fn create_task(
        &mut self,
        title: &str,
        due: Option<DateTime<Utc>>,
        notes: Option<&str>,
    ) -> Result<(), StoreError> {
        commit(
            &self.path,
            &mut self.reminders,
            StoredReminder {
                title: title.to_string(),
                due,
                notes: notes.map(str::to_string),
            },
        )
    }

    /// Reminders with a due date first, earliest first; undated ones keep
    /// insertion order at the end.
    fn fetch_reminders(&self) -> Result<Vec<Reminder>, StoreError> {
        let mut reminders: Vec<Reminder> = self
            .reminders
            .iter()
            .cloned()
            .map(Reminder::from)
            .collect();
        reminders.sort_by_key(|reminder| (reminder.due.is_none(), reminder.due));
        Ok(reminders)
    }
}

fn load<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<Vec<T>, StoreError> {
    if !path.exists() {
        debug!("Store file {} not found, starting empty", path.display());
        return Ok(Vec::new());
    }

    let contents = fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    if contents.trim().is_empty() {
        return Ok(Vec::new());
    }

    serde_json::from_str(&contents).map_err(|source| StoreError::Corrupt {
        path: path.to_path_buf(),
        source,
    })
}

/// Append `record` and rewrite the file; on failure the record is dropped
/// again so memory never holds anything the file does not.
fn commit<T: Serialize>(path: &Path, records: &mut Vec<T>, record: T) -> Result<(), StoreError> {
    records.push(record);
    if let Err(e) = persist(path, records) {
        records.pop();
        return Err(e);
    }
    Ok(())
}

fn persist<T: Serialize>(path: &Path, records: &[T]) -> Result<(), StoreError> {
    let io_error = |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_error)?;
    }

    let contents = serde_json::to_string_pretty(records).map_err(|source| StoreError::Corrupt {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, contents).map_err(io_error)
}

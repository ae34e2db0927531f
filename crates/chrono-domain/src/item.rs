//! Schedule item module - the validated unit produced by extraction

use chrono::{DateTime, Utc};
use std::fmt;

/// Unique identifier for a schedule item based on UUIDv7
///
/// Assigned when an item is decoded. Never derived from the item's content,
/// so two decodes of the same JSON still produce distinct identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemId(u128);

impl ItemId {
    /// Generate a new UUIDv7-based ItemId
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono_domain::ItemId;
    ///
    /// let a = ItemId::new();
    /// let b = ItemId::new();
    /// assert_ne!(a, b);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

/// What a schedule item is, with the dates that belong to that kind
///
/// Events only ever carry start/end and tasks only ever carry a due date, so
/// a task with a start date cannot be represented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemKind {
    /// A calendar event
    Event {
        /// When the event starts
        start: Option<DateTime<Utc>>,
        /// When the event ends
        end: Option<DateTime<Utc>>,
    },

    /// A reminder / todo item
    Task {
        /// When the task is due
        due: Option<DateTime<Utc>>,
    },
}

impl ItemKind {
    /// Get the kind name as used in the provider's JSON
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Event { .. } => "event",
            ItemKind::Task { .. } => "task",
        }
    }

    /// Whether this is an event
    pub fn is_event(&self) -> bool {
        matches!(self, ItemKind::Event { .. })
    }

    /// Whether this is a task
    pub fn is_task(&self) -> bool {
        matches!(self, ItemKind::Task { .. })
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated calendar event or standalone task
///
/// Items are immutable values. They are built once by the decoder and handed
/// to the caller; nothing in the pipeline keeps a reference to them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleItem {
    /// Unique identifier
    pub id: ItemId,

    /// Non-empty title
    pub title: String,

    /// Event or task, with its dates
    pub kind: ItemKind,

    /// Optional free text
    pub notes: Option<String>,
}

impl ScheduleItem {
    /// Create a new item with a freshly generated identifier
    pub fn new(title: impl Into<String>, kind: ItemKind, notes: Option<String>) -> Self {
        Self {
            id: ItemId::new(),
            title: title.into(),
            kind,
            notes,
        }
    }

    /// Start date, if this is an event that has one
    pub fn start_date(&self) -> Option<DateTime<Utc>> {
        match self.kind {
            ItemKind::Event { start, .. } => start,
            ItemKind::Task { .. } => None,
        }
    }

    /// End date, if this is an event that has one
    pub fn end_date(&self) -> Option<DateTime<Utc>> {
        match self.kind {
            ItemKind::Event { end, .. } => end,
            ItemKind::Task { .. } => None,
        }
    }

    /// Due date, if this is a task that has one
    pub fn due_date(&self) -> Option<DateTime<Utc>> {
        match self.kind {
            ItemKind::Task { due } => due,
            ItemKind::Event { .. } => None,
        }
    }

    /// Start and end of an event that can be put on a calendar
    ///
    /// Returns `None` for tasks and for events missing either date.
    pub fn event_window(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        match self.kind {
            ItemKind::Event {
                start: Some(start),
                end: Some(end),
            } => Some((start, end)),
            _ => None,
        }
    }

    /// Whether the calendar collaborator can create this item
    pub fn is_schedulable(&self) -> bool {
        self.event_window().is_some()
    }

    /// Compare everything except the identifier
    pub fn same_content(&self, other: &ScheduleItem) -> bool {
        self.title == other.title && self.kind == other.kind && self.notes == other.notes
    }
}

//! Result types for extraction and dispatch

use crate::error::DecodeFailure;
use chrono::{DateTime, Utc};
use chrono_domain::{ItemId, ScheduleItem};

/// Decoded items and the elements that failed, both in source order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedSchedule {
    /// Successfully decoded items
    pub items: Vec<ScheduleItem>,

    /// Elements that could not be decoded
    pub failures: Vec<DecodeFailure>,
}

impl ParsedSchedule {
    /// Whether the batch had elements and none of them decoded
    pub fn is_total_failure(&self) -> bool {
        self.items.is_empty() && !self.failures.is_empty()
    }
}

/// Result of one pipeline run
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Successfully decoded items
    pub items: Vec<ScheduleItem>,

    /// Elements that could not be decoded
    pub failures: Vec<DecodeFailure>,

    /// Metadata about the run
    pub metadata: ExtractionMetadata,
}

/// Metadata about an extraction run
#[derive(Debug, Clone)]
pub struct ExtractionMetadata {
    /// Model the request was sent to
    pub model_name: String,

    /// When the run started
    pub started_at: DateTime<Utc>,

    /// Input length in characters
    pub input_length: usize,

    /// Number of elements in the `items` array
    pub total_items_attempted: usize,

    /// Wall-clock time including the provider call
    pub processing_time_ms: u64,
}

/// Why an item was not handed to a store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Event without a start date
    MissingStart,
    /// Event without an end date
    MissingEnd,
}

/// An item the dispatcher deliberately did not create
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedItem {
    /// ID of the item
    pub item_id: ItemId,

    /// Item title
    pub title: String,

    /// Why it was skipped
    pub reason: SkipReason,
}

/// An item a store refused
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchFailure {
    /// ID of the item
    pub item_id: ItemId,

    /// Item title
    pub title: String,

    /// Store error message
    pub reason: String,
}

/// Outcome of routing items to the calendar and reminder stores
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    /// Events created on the calendar
    pub events_created: usize,

    /// Tasks created as reminders
    pub tasks_created: usize,

    /// Events that could not be scheduled
    pub skipped: Vec<SkippedItem>,

    /// Items a store rejected
    pub failures: Vec<DispatchFailure>,
}

impl DispatchSummary {
    /// Total items created in either store
    pub fn created(&self) -> usize {
        self.events_created + self.tasks_created
    }
}

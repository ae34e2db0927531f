//! Chrono Domain Layer
//!
//! Core value types for schedule extraction and the trait boundaries to the
//! stores that consume them. No I/O lives here.
//!
//! ## Key Concepts
//!
//! - **ScheduleItem**: a validated calendar event or standalone task
//! - **ItemKind**: the discriminated variant, carrying the dates that make
//!   sense for that kind only
//! - **CalendarStore / ReminderStore**: collaborators that receive items
//!
//! ## Architecture
//!
//! Only `uuid` and `chrono` are pulled in, both as primitives. Provider,
//! parsing and persistence code lives in the other crates.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod item;
pub mod traits;

// Re-exports for convenience
pub use item::{ItemId, ItemKind, ScheduleItem};
pub use traits::{CalendarEvent, CalendarStore, Reminder, ReminderStore};

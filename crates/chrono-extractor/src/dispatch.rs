//! Route decoded items to the calendar and reminder stores

use crate::types::{DispatchFailure, DispatchSummary, SkipReason, SkippedItem};
use chrono_domain::{CalendarStore, ItemKind, ReminderStore, ScheduleItem};
use std::fmt::Display;
use tracing::{debug, info, warn};

/// Create every item in the store that owns its kind
///
/// Events need both dates; an event missing either is recorded as skipped,
/// not as a failure. A store error on one item does not stop the rest.
/// Both stores are passed per call; nothing is retained between calls.
pub fn dispatch_items<C, R>(
    items: &[ScheduleItem],
    calendar: &mut C,
    reminders: &mut R,
) -> DispatchSummary
where
    C: CalendarStore,
    R: ReminderStore,
    C::Error: Display,
    R::Error: Display,
{
    let mut summary = DispatchSummary::default();

    for item in items {
        let notes = item.notes.as_deref();

        let outcome = match item.kind {
            ItemKind::Event {
                start: Some(start),
                end: Some(end),
            } => calendar
                .create_event(&item.title, start, end, notes)
                .map(|()| summary.events_created += 1)
                .map_err(|e| e.to_string()),
            ItemKind::Event { start, .. } => {
                let reason = if start.is_none() {
                    SkipReason::MissingStart
                } else {
                    SkipReason::MissingEnd
                };
                debug!("Skipping event '{}': {:?}", item.title, reason);
                summary.skipped.push(SkippedItem {
                    item_id: item.id,
                    title: item.title.clone(),
                    reason,
                });
                Ok(())
            }
            ItemKind::Task { due } => reminders
                .create_task(&item.title, due, notes)
                .map(|()| summary.tasks_created += 1)
                .map_err(|e| e.to_string()),
        };

        if let Err(reason) = outcome {
            warn!("Failed to store '{}': {}", item.title, reason);
            summary.failures.push(DispatchFailure {
                item_id: item.id,
                title: item.title.clone(),
                reason,
            });
        }
    }

    info!(
        "Dispatch complete: {} events, {} tasks, {} skipped, {} failed",
        summary.events_created,
        summary.tasks_created,
        summary.skipped.len(),
        summary.failures.len()
    );

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use chrono_domain::{CalendarEvent, Reminder};

    #[derive(Default)]
    struct MemoryCalendar {
        events: Vec<CalendarEvent>,
        reject: Option<String>,
    }

    impl CalendarStore for MemoryCalendar {
        type Error = String;

        fn create_event(
            &mut self,
            title: &str,
            start: DateTime<Utc>,
            end: DateTime<Utc>,
            notes: Option<&str>,
        ) -> Result<(), String> {
            if self.reject.as_deref() == Some(title) {
                return Err("calendar is read-only".to_string());
            }
            self.events.push(CalendarEvent {
                title: title.to_string(),
                start,
                end,
                notes: notes.map(str::to_string),
            });
            Ok(())
        }

        fn fetch_events(
            &self,
            from: DateTime<Utc>,
            to: DateTime<Utc>,
        ) -> Result<Vec<CalendarEvent>, String> {
            Ok(self
                .events
                .iter()
                .filter(|e| e.overlaps(from, to))
                .cloned()
                .collect())
        }
    }

    #[derive(Default)]
    struct MemoryReminders {
        reminders: Vec<Reminder>,
    }

    impl ReminderStore for MemoryReminders {
        type Error = String;

        fn create_task(
            &mut self,
            title: &str,
            due: Option<DateTime<Utc>>,
            notes: Option<&str>,
        ) -> Result<(), String> {
            self.reminders.push(Reminder {
                title: title.to_string(),
                due,
                notes: notes.map(str::to_string),
            });
            Ok(())
        }

        fn fetch_reminders(&self) -> Result<Vec<Reminder>, String> {
            Ok(self.reminders.clone())
        }
    }

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 14, hour, 0, 0).unwrap()
    }

    fn event(title: &str, start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> ScheduleItem {
        ScheduleItem::new(title, ItemKind::Event { start, end }, None)
    }

    #[test]
    fn test_routes_events_and_tasks() {
        let items = vec![
            event("Sync", Some(at(10)), Some(at(11))),
            ScheduleItem::new(
                "Buy groceries",
                ItemKind::Task { due: Some(at(18)) },
                Some("Milk".to_string()),
            ),
            ScheduleItem::new("Call mom", ItemKind::Task { due: None }, None),
        ];

        let mut calendar = MemoryCalendar::default();
        let mut reminders = MemoryReminders::default();
        let summary = dispatch_items(&items, &mut calendar, &mut reminders);

        assert_eq!(summary.events_created, 1);
        assert_eq!(summary.tasks_created, 2);
        assert_eq!(summary.created(), 3);
        assert!(summary.skipped.is_empty());
        assert!(summary.failures.is_empty());

        assert_eq!(calendar.events[0].title, "Sync");
        assert_eq!(calendar.events[0].start, at(10));
        assert_eq!(reminders.reminders[0].notes.as_deref(), Some("Milk"));
        assert_eq!(reminders.reminders[1].due, None);
    }

    #[test]
    fn test_unschedulable_events_are_skipped() {
        let no_start = event("No start", None, Some(at(11)));
        let no_end = event("No end", Some(at(10)), None);
        let items = vec![no_start.clone(), no_end.clone()];

        let mut calendar = MemoryCalendar::default();
        let mut reminders = MemoryReminders::default();
        let summary = dispatch_items(&items, &mut calendar, &mut reminders);

        assert_eq!(summary.created(), 0);
        assert!(calendar.events.is_empty());
        assert_eq!(
            summary.skipped,
            vec![
                SkippedItem {
                    item_id: no_start.id,
                    title: "No start".to_string(),
                    reason: SkipReason::MissingStart,
                },
                SkippedItem {
                    item_id: no_end.id,
                    title: "No end".to_string(),
                    reason: SkipReason::MissingEnd,
                },
            ]
        );
    }

    #[test]
    fn test_store_error_does_not_stop_dispatch() {
        let items = vec![
            event("Blocked", Some(at(9)), Some(at(10))),
            event("Allowed", Some(at(10)), Some(at(11))),
        ];

        let mut calendar = MemoryCalendar {
            reject: Some("Blocked".to_string()),
            ..Default::default()
        };
        let mut reminders = MemoryReminders::default();
        let summary = dispatch_items(&items, &mut calendar, &mut reminders);

        assert_eq!(summary.events_created, 1);
        assert_eq!(summary.failures.len(), 1);
        assert_eq!(summary.failures[0].title, "Blocked");
        assert_eq!(summary.failures[0].reason, "calendar is read-only");
        assert_eq!(calendar.fetch_events(at(0), at(23)).unwrap().len(), 1);
    }
}

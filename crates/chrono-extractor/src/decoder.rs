//! Decode one untyped JSON element into a schedule item

use crate::error::DecodeFailure;
use chrono::{DateTime, Utc};
use chrono_domain::{ItemKind, ScheduleItem};
use serde_json::{Map, Value};
use tracing::debug;

/// The only `type` value that produces an event; everything else is a task
pub const EVENT_TAG: &str = "event";

/// Decode the element at `index` of the `items` array
///
/// `title` and `type` are required. Dates are best-effort: a date that is
/// present but not RFC 3339 text is dropped and the item still decodes.
/// Every successful decode gets a fresh identifier.
pub fn decode_item(value: &Value, index: usize) -> Result<ScheduleItem, DecodeFailure> {
    let obj = value
        .as_object()
        .ok_or(DecodeFailure::NotAnObject { index })?;

    let title = obj
        .get("title")
        .and_then(Value::as_str)
        .filter(|title| !title.trim().is_empty())
        .ok_or(DecodeFailure::MissingRequiredField {
            index,
            field: "title",
        })?;

    let tag = obj
        .get("type")
        .and_then(Value::as_str)
        .ok_or(DecodeFailure::MissingRequiredField {
            index,
            field: "type",
        })?;

    let kind = if tag == EVENT_TAG {
        ItemKind::Event {
            start: date_field(obj, "startDate", index),
            end: date_field(obj, "endDate", index),
        }
    } else {
        ItemKind::Task {
            due: date_field(obj, "dueDate", index),
        }
    };

    let notes = obj.get("notes").and_then(Value::as_str).map(str::to_string);

    Ok(ScheduleItem::new(title, kind, notes))
}

/// Parse a date in the one accepted format (RFC 3339, offset required)
pub fn parse_date(text: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .ok()
        .map(|date| date.with_timezone(&Utc))
}

fn date_field(obj: &Map<String, Value>, key: &str, index: usize) -> Option<DateTime<Utc>> {
    let raw = obj.get(key)?;

    let parsed = raw.as_str().and_then(parse_date);
    if parsed.is_none() {
        debug!("Item {}: ignoring unparsable {} {}", index, key, raw);
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn utc(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 14, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_decode_event() {
        let value = json!({
            "type": "event",
            "title": "Sync",
            "startDate": "2025-05-14T10:00:00Z",
            "endDate": "2025-05-14T11:00:00Z",
            "notes": "Weekly"
        });

        let item = decode_item(&value, 0).unwrap();
        assert_eq!(item.title, "Sync");
        assert_eq!(
            item.kind,
            ItemKind::Event {
                start: Some(utc(10)),
                end: Some(utc(11)),
            }
        );
        assert_eq!(item.notes.as_deref(), Some("Weekly"));
    }

    #[test]
    fn test_decode_task() {
        let value = json!({
            "type": "task",
            "title": "Buy groceries",
            "dueDate": "2025-05-14T18:00:00Z"
        });

        let item = decode_item(&value, 0).unwrap();
        assert_eq!(item.kind, ItemKind::Task { due: Some(utc(18)) });
        assert_eq!(item.notes, None);
    }

    #[test]
    fn test_unrecognized_type_falls_back_to_task() {
        for tag in ["task", "TODO", "Event", "EVENT", "meeting", ""] {
            let value = json!({"type": tag, "title": "Something"});
            let item = decode_item(&value, 0).unwrap();
            assert!(item.kind.is_task(), "type {:?} should decode as a task", tag);
        }
    }

    #[test]
    fn test_offset_is_normalized_to_utc() {
        let value = json!({
            "type": "task",
            "title": "Call",
            "dueDate": "2025-05-14T11:00:00+01:00"
        });

        let item = decode_item(&value, 0).unwrap();
        assert_eq!(item.due_date(), Some(utc(10)));
    }

    #[test]
    fn test_unparsable_dates_are_dropped() {
        let value = json!({
            "type": "event",
            "title": "Lunch",
            "startDate": "tomorrow at noon",
            "endDate": "2025-05-14T13:00:00"
        });

        let item = decode_item(&value, 0).unwrap();
        assert_eq!(item.start_date(), None);
        // No offset: not the accepted format
        assert_eq!(item.end_date(), None);
        assert!(!item.is_schedulable());
    }

    #[test]
    fn test_non_string_date_is_dropped() {
        let value = json!({"type": "task", "title": "Pay rent", "dueDate": 1747216800});
        let item = decode_item(&value, 0).unwrap();
        assert_eq!(item.due_date(), None);
    }

    #[test]
    fn test_dates_for_other_kind_are_ignored() {
        let value = json!({
            "type": "task",
            "title": "Stretch",
            "startDate": "2025-05-14T10:00:00Z",
            "dueDate": "2025-05-14T18:00:00Z"
        });

        let item = decode_item(&value, 0).unwrap();
        assert_eq!(item.start_date(), None);
        assert_eq!(item.due_date(), Some(utc(18)));
    }

    #[test]
    fn test_missing_title() {
        let value = json!({"type": "event"});
        assert_eq!(
            decode_item(&value, 3),
            Err(DecodeFailure::MissingRequiredField {
                index: 3,
                field: "title"
            })
        );
    }

    #[test]
    fn test_blank_or_non_string_title() {
        for title in [json!(""), json!("   "), json!(42), json!(null)] {
            let value = json!({"type": "task", "title": title});
            assert_eq!(
                decode_item(&value, 1),
                Err(DecodeFailure::MissingRequiredField {
                    index: 1,
                    field: "title"
                })
            );
        }
    }

    #[test]
    fn test_missing_type() {
        let value = json!({"title": "Gym"});
        assert_eq!(
            decode_item(&value, 2),
            Err(DecodeFailure::MissingRequiredField {
                index: 2,
                field: "type"
            })
        );
    }

    #[test]
    fn test_non_string_type() {
        let value = json!({"title": "Gym", "type": true});
        assert!(matches!(
            decode_item(&value, 0),
            Err(DecodeFailure::MissingRequiredField { field: "type", .. })
        ));
    }

    #[test]
    fn test_not_an_object() {
        assert_eq!(
            decode_item(&json!("Gym at 7"), 4),
            Err(DecodeFailure::NotAnObject { index: 4 })
        );
        assert_eq!(
            decode_item(&json!([1, 2]), 5),
            Err(DecodeFailure::NotAnObject { index: 5 })
        );
    }

    #[test]
    fn test_decoding_is_idempotent_except_for_id() {
        let value = json!({
            "type": "event",
            "title": "Sync",
            "startDate": "2025-05-14T10:00:00Z",
            "endDate": "2025-05-14T11:00:00Z"
        });

        let first = decode_item(&value, 0).unwrap();
        let second = decode_item(&value, 0).unwrap();

        assert_ne!(first.id, second.id);
        assert!(first.same_content(&second));
    }

    #[test]
    fn test_parse_date_formats() {
        assert_eq!(parse_date("2025-05-14T10:00:00Z"), Some(utc(10)));
        assert_eq!(parse_date("2025-05-14T03:00:00-07:00"), Some(utc(10)));
        assert_eq!(parse_date("2025-05-14"), None);
        assert_eq!(parse_date("May 14, 2025 10:00"), None);
        assert_eq!(parse_date(""), None);
    }
}

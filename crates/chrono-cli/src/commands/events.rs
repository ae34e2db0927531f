//! Events command implementation.

use crate::cli::EventsArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::store::JsonCalendarStore;
use chrono::{DateTime, Duration, Local, NaiveDate, TimeZone, Utc};
use chrono_domain::{CalendarEvent, CalendarStore};
use std::path::Path;

/// Default listing window when `--to` is omitted.
const DEFAULT_WINDOW_DAYS: i64 = 7;

/// Execute the events command.
pub async fn execute_events(args: EventsArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let from = match &args.from {
        Some(text) => parse_bound(text, false)?,
        None => Utc::now(),
    };
    let to = match &args.to {
        Some(text) => parse_bound(text, true)?,
        None => from + Duration::days(DEFAULT_WINDOW_DAYS),
    };

    let events = list_events(&config.data_dir()?, from, to)?;
    println!("{}", formatter.format_events(&events)?);
    Ok(())
}

/// Events in `data_dir` overlapping `[from, to]`, earliest first.
pub fn list_events(
    data_dir: &Path,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> Result<Vec<CalendarEvent>> {
    if to < from {
        return Err(CliError::InvalidInput(format!(
            "Range end {} is before start {}",
            to.to_rfc3339(),
            from.to_rfc3339()
        )));
    }

    let calendar = JsonCalendarStore::open(data_dir)?;
    Ok(calendar.fetch_events(from, to)?)
}

/// Parse a range bound given as RFC 3339 or as a local `YYYY-MM-DD` date.
///
/// A bare date means local midnight; as an end bound it covers the whole day.
pub(crate) fn parse_bound(text: &str, end_of_range: bool) -> Result<DateTime<Utc>> {
    if let Some(instant) = chrono_extractor::parse_date(text) {
        return Ok(instant);
    }

    let invalid = || {
        CliError::InvalidInput(format!(
            "Invalid date '{}'. Expected YYYY-MM-DD or RFC 3339",
            text
        ))
    };

    let date = NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").map_err(|_| invalid())?;
    let date = if end_of_range {
        date.succ_opt().ok_or_else(invalid)?
    } else {
        date
    };

    let midnight = date.and_hms_opt(0, 0, 0).ok_or_else(invalid)?;
    Local
        .from_local_datetime(&midnight)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
        .ok_or_else(invalid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, day, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_parse_rfc3339_bound() {
        assert_eq!(parse_bound("2025-05-14T10:00:00Z", false).unwrap(), at(14, 10));
        assert_eq!(parse_bound("2025-05-14T10:00:00Z", true).unwrap(), at(14, 10));
    }

    #[test]
    fn test_parse_date_bound_covers_whole_day() {
        let start = parse_bound("2025-05-14", false).unwrap();
        let end = parse_bound("2025-05-14", true).unwrap();
        assert_eq!(end - start, Duration::days(1));
    }

    #[test]
    fn test_parse_invalid_bound() {
        assert!(matches!(
            parse_bound("next tuesday", false),
            Err(CliError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_list_events_in_range() {
        let dir = TempDir::new().unwrap();
        let mut calendar = JsonCalendarStore::open(dir.path()).unwrap();
        calendar.create_event("Sync", at(14, 10), at(14, 11), None).unwrap();
        calendar.create_event("Offsite", at(28, 9), at(28, 17), None).unwrap();

        let events = list_events(dir.path(), at(14, 0), at(21, 0)).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, "Sync");
    }

    #[test]
    fn test_list_events_rejects_reversed_range() {
        let dir = TempDir::new().unwrap();
        let result = list_events(dir.path(), at(21, 0), at(14, 0));
        assert!(matches!(result, Err(CliError::InvalidInput(_))));
    }
}

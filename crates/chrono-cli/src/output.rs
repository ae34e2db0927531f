//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use chrono::{DateTime, Local, Utc};
use chrono_domain::{CalendarEvent, ItemKind, Reminder, ScheduleItem};
use chrono_extractor::{DecodeFailure, DispatchSummary, SkipReason};
use colored::*;
use serde_json::{json, Value};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Active output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format extracted schedule items.
    pub fn format_items(&self, items: &[ScheduleItem]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let values: Vec<Value> = items.iter().map(item_json).collect();
                Ok(serde_json::to_string_pretty(&values)?)
            }
            OutputFormat::Table => Ok(self.format_items_table(items)),
            OutputFormat::Quiet => Ok(items
                .iter()
                .map(|item| item.id.to_string())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    fn format_items_table(&self, items: &[ScheduleItem]) -> String {
        if items.is_empty() {
            return self.colorize("No items found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["ID", "Type", "Title", "When", "Notes"]);

        for item in items {
            let id = item.id.to_string();
            builder.push_record([
                &id[..8],
                item.kind.as_str(),
                item.title.as_str(),
                describe_when(&item.kind).as_str(),
                item.notes.as_deref().unwrap_or(""),
            ]);
        }

        render(builder)
    }

    /// Format per-item decode failures, one warning per line.
    pub fn format_failures(&self, failures: &[DecodeFailure]) -> String {
        failures
            .iter()
            .map(|failure| self.warning(&failure.to_string()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Format the outcome of saving items to the stores.
    pub fn format_summary(&self, summary: &DispatchSummary) -> String {
        let mut lines = vec![self.success(&format!(
            "Added {} item(s) ({} event(s), {} task(s))",
            summary.created(),
            summary.events_created,
            summary.tasks_created
        ))];

        for skipped in &summary.skipped {
            let reason = match skipped.reason {
                SkipReason::MissingStart => "no start time",
                SkipReason::MissingEnd => "no end time",
            };
            lines.push(self.warning(&format!(
                "Skipped event '{}': {}",
                skipped.title, reason
            )));
        }

        for failure in &summary.failures {
            lines.push(self.error(&format!(
                "Could not save '{}': {}",
                failure.title, failure.reason
            )));
        }

        lines.join("\n")
    }

    /// Format stored calendar events.
    pub fn format_events(&self, events: &[CalendarEvent]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let values: Vec<Value> = events
                    .iter()
                    .map(|event| {
                        json!({
                            "title": event.title,
                            "start": event.start.to_rfc3339(),
                            "end": event.end.to_rfc3339(),
                            "notes": event.notes,
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&values)?)
            }
            OutputFormat::Table => {
                if events.is_empty() {
                    return Ok(self.colorize("No events found.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["Title", "Start", "End", "Notes"]);
                for event in events {
                    builder.push_record([
                        event.title.as_str(),
                        local_time(&event.start).as_str(),
                        local_time(&event.end).as_str(),
                        event.notes.as_deref().unwrap_or(""),
                    ]);
                }
                Ok(render(builder))
            }
            OutputFormat::Quiet => Ok(titles(events.iter().map(|e| e.title.as_str()))),
        }
    }

    /// Format stored reminders.
    pub fn format_reminders(&self, reminders: &[Reminder]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let values: Vec<Value> = reminders
                    .iter()
                    .map(|reminder| {
                        json!({
                            "title": reminder.title,
                            "due": reminder.due.map(|due| due.to_rfc3339()),
                            "notes": reminder.notes,
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&values)?)
            }
            OutputFormat::Table => {
                if reminders.is_empty() {
                    return Ok(self.colorize("No tasks found.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["Title", "Due", "Notes"]);
                for reminder in reminders {
                    let due = reminder.due.as_ref().map(local_time).unwrap_or_default();
                    builder.push_record([
                        reminder.title.as_str(),
                        due.as_str(),
                        reminder.notes.as_deref().unwrap_or(""),
                    ]);
                }
                Ok(render(builder))
            }
            OutputFormat::Quiet => Ok(titles(reminders.iter().map(|r| r.title.as_str()))),
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

fn item_json(item: &ScheduleItem) -> Value {
    let mut value = json!({
        "id": item.id.to_string(),
        "type": item.kind.as_str(),
        "title": item.title,
        "notes": item.notes,
    });

    let dates = match &item.kind {
        ItemKind::Event { start, end } => {
            vec![("startDate", start), ("endDate", end)]
        }
        ItemKind::Task { due } => vec![("dueDate", due)],
    };
    for (key, date) in dates {
        value[key] = json!(date.map(|d| d.to_rfc3339()));
    }

    value
}

fn describe_when(kind: &ItemKind) -> String {
    match kind {
        ItemKind::Event { start, end } => {
            let start = start.as_ref().map(local_time).unwrap_or_else(|| "?".into());
            let end = end.as_ref().map(local_time).unwrap_or_else(|| "?".into());
            format!("{} - {}", start, end)
        }
        ItemKind::Task { due: Some(due) } => format!("due {}", local_time(due)),
        ItemKind::Task { due: None } => String::new(),
    }
}

fn local_time(instant: &DateTime<Utc>) -> String {
    instant
        .with_timezone(&Local)
        .format("%a %Y-%m-%d %H:%M")
        .to_string()
}

fn titles<'a>(titles: impl Iterator<Item = &'a str>) -> String {
    titles.collect::<Vec<_>>().join("\n")
}

fn render(builder: Builder) -> String {
    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}

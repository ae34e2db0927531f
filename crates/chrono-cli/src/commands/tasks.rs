//! Tasks command implementation.

use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use crate::store::JsonReminderStore;
use chrono_domain::ReminderStore;

/// Execute the tasks command.
pub async fn execute_tasks(config: &Config, formatter: &Formatter) -> Result<()> {
    let reminders = JsonReminderStore::open(&config.data_dir()?)?;
    println!("{}", formatter.format_reminders(&reminders.fetch_reminders()?)?);
    Ok(())
}

//! Extract command implementation.

use crate::cli::ExtractArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::store::{JsonCalendarStore, JsonReminderStore};
use chrono_extractor::{dispatch_items, DispatchSummary, ExtractionResult, ScheduleExtractor};
use chrono_llm::{CompletionProvider, OpenAiProvider};
use std::fs;
use std::io::{self, Read};
use std::path::Path;
use tracing::{info, warn};

/// Execute the extract command.
pub async fn execute_extract(
    args: ExtractArgs,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    let input = read_input(&args)?;
    let extractor = build_extractor(config)?;
    let data_dir = config.data_dir()?;

    run_extract(&extractor, &input, &data_dir, args.dry_run, formatter).await?;
    Ok(())
}

/// Build an extractor for the active profile.
pub fn build_extractor(config: &Config) -> Result<ScheduleExtractor<OpenAiProvider>> {
    let profile = config.get_active_profile()?;

    let api_key = profile.resolve_api_key();
    if api_key.is_none() {
        warn!(
            "No API key for profile '{}'; sending unauthenticated requests",
            config.active_profile
        );
    }

    let provider = OpenAiProvider::new(profile.endpoint.clone(), api_key);
    Ok(ScheduleExtractor::new(provider, config.effective_extractor()?)?)
}

/// Run the pipeline on `input`, print the items, and save them unless `dry_run`.
///
/// Returns the dispatch summary when items were saved.
pub async fn run_extract<P: CompletionProvider>(
    extractor: &ScheduleExtractor<P>,
    input: &str,
    data_dir: &Path,
    dry_run: bool,
    formatter: &Formatter,
) -> Result<Option<DispatchSummary>> {
    let ExtractionResult {
        items, failures, ..
    } = extractor.extract(input).await?;

    println!("{}", formatter.format_items(&items)?);
    if !failures.is_empty() {
        eprintln!("{}", formatter.format_failures(&failures));
    }

    if dry_run {
        info!("Dry run: {} item(s) not saved", items.len());
        return Ok(None);
    }

    let mut calendar = JsonCalendarStore::open(data_dir)?;
    let mut reminders = JsonReminderStore::open(data_dir)?;
    let summary = dispatch_items(&items, &mut calendar, &mut reminders);

    println!("{}", formatter.format_summary(&summary));
    Ok(Some(summary))
}

/// Collect the schedule description from stdin, a file, or the arguments.
fn read_input(args: &ExtractArgs) -> Result<String> {
    let input = if args.stdin {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else if let Some(file_path) = &args.file {
        fs::read_to_string(file_path)?
    } else {
        args.text.join(" ")
    };

    if input.trim().is_empty() {
        return Err(CliError::InvalidInput(
            "Please describe your schedule first".to_string(),
        ));
    }

    Ok(input)
}

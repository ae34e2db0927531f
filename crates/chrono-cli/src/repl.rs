//! Interactive REPL (Read-Eval-Print Loop) mode.
//!
//! Any line that is not a REPL command is treated as a schedule description.

use crate::cli::{Command, EventsArgs, ExtractArgs, ProfileAction, ProfileArgs};
use crate::commands;
use crate::commands::events::parse_bound;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::PathBuf;

/// Run the interactive REPL.
pub async fn run_repl(config: &mut Config, formatter: &Formatter) -> Result<()> {
    println!(
        "{}",
        formatter.info("Chrono REPL - Describe your schedule, 'help' for commands, 'exit' to quit")
    );
    println!();

    let editor_config = rustyline::Config::builder()
        .max_history_size(config.settings.history_size)
        .map_err(editor_error)?
        .build();
    let mut editor = DefaultEditor::with_config(editor_config).map_err(editor_error)?;

    // Load history
    let history_path = get_history_path()?;
    let _ = editor.load_history(&history_path);

    loop {
        let prompt = format!("chrono ({})> ", config.active_profile);

        match editor.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                editor.add_history_entry(line).ok();

                match parse_repl_command(line) {
                    Ok(ReplCommand::Exit) => {
                        println!("{}", formatter.info("Goodbye!"));
                        break;
                    }
                    Ok(ReplCommand::Help) => {
                        print_help(formatter);
                    }
                    Ok(ReplCommand::Command(cmd)) => {
                        if let Err(e) = execute_repl_command(cmd, config, formatter).await {
                            eprintln!("{}", formatter.error(&e.to_string()));
                        }
                    }
                    Err(e) => {
                        eprintln!("{}", formatter.error(&e.to_string()));
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", formatter.info("Use 'exit' to quit"));
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("{}", formatter.error(&format!("Error: {}", err)));
                break;
            }
        }
    }

    // Save history
    editor.save_history(&history_path).ok();

    Ok(())
}

/// REPL command type.
#[derive(Debug)]
enum ReplCommand {
    Exit,
    Help,
    Command(Command),
}

/// Parse a REPL command line.
///
/// A line is a built-in only when it matches that built-in's full syntax;
/// everything else is a schedule description.
fn parse_repl_command(line: &str) -> Result<ReplCommand> {
    let parts: Vec<&str> = line.split_whitespace().collect();

    if parts.is_empty() {
        return Err(CliError::InvalidInput("Empty command".to_string()));
    }

    let builtin = match (parts[0], &parts[1..]) {
        ("exit" | "quit" | "q", []) => Some(ReplCommand::Exit),
        ("help" | "?", []) => Some(ReplCommand::Help),
        ("tasks", []) => Some(ReplCommand::Command(Command::Tasks)),
        ("events", args) => parse_events_command(args),
        ("profile", args) => parse_profile_command(args),
        ("preview", _) => return parse_describe(&line[parts[0].len()..], true),
        _ => None,
    };

    match builtin {
        Some(command) => Ok(command),
        None => parse_describe(line, false),
    }
}

/// Execute a REPL command.
async fn execute_repl_command(cmd: Command, config: &mut Config, formatter: &Formatter) -> Result<()> {
    match cmd {
        Command::Extract(args) => commands::execute_extract(args, config, formatter).await,
        Command::Events(args) => commands::execute_events(args, config, formatter).await,
        Command::Tasks => commands::execute_tasks(config, formatter).await,
        Command::Profile(args) => commands::execute_profile(args, config, formatter).await,
        Command::Repl => {
            println!("{}", formatter.info("Already in the REPL"));
            Ok(())
        }
    }
}

fn parse_describe(text: &str, dry_run: bool) -> Result<ReplCommand> {
    let text = text.trim();
    if text.is_empty() {
        return Err(CliError::InvalidInput(
            "Usage: preview <schedule description>".to_string(),
        ));
    }

    Ok(ReplCommand::Command(Command::Extract(ExtractArgs {
        text: vec![text.to_string()],
        file: None,
        stdin: false,
        dry_run,
    })))
}

fn parse_events_command(args: &[&str]) -> Option<ReplCommand> {
    // Format: events [from] [to]
    if args.len() > 2 || args.iter().any(|arg| parse_bound(arg, false).is_err()) {
        return None;
    }

    Some(ReplCommand::Command(Command::Events(EventsArgs {
        from: args.first().map(|s| s.to_string()),
        to: args.get(1).map(|s| s.to_string()),
    })))
}

fn parse_profile_command(args: &[&str]) -> Option<ReplCommand> {
    let action = match args {
        [] | ["show"] => ProfileAction::Show,
        ["list"] => ProfileAction::List,
        ["switch", name] => ProfileAction::Switch {
            name: name.to_string(),
        },
        _ => return None,
    };

    Some(ReplCommand::Command(Command::Profile(ProfileArgs { action })))
}

fn editor_error(e: ReadlineError) -> CliError {
    CliError::Io(std::io::Error::other(format!(
        "Failed to initialize editor: {}",
        e
    )))
}

fn get_history_path() -> Result<PathBuf> {
    let chrono_dir = Config::home()?;
    std::fs::create_dir_all(&chrono_dir)?;
    Ok(chrono_dir.join("history.txt"))
}

fn print_help(formatter: &Formatter) {
    println!("{}", formatter.info("Available commands:"));
    println!();
    println!("  <description>                  - Extract and save events and tasks");
    println!("  preview <description>          - Extract without saving");
    println!("  events [from] [to]             - List events (default: next 7 days)");
    println!("    from, to: YYYY-MM-DD or RFC 3339");
    println!("  tasks                          - List tasks");
    println!("  profile [list|show|switch]     - Manage profiles");
    println!("  help, ?                        - Show this help");
    println!("  exit, quit, q                  - Exit REPL");
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract_args(command: ReplCommand) -> ExtractArgs {
        match command {
            ReplCommand::Command(Command::Extract(args)) => args,
            other => panic!("Expected extract, got {:?}", other),
        }
    }

    #[test]
    fn test_free_text_is_a_description() {
        let args = extract_args(parse_repl_command("Dentist Friday at 3pm").unwrap());
        assert_eq!(args.text, vec!["Dentist Friday at 3pm".to_string()]);
        assert!(!args.dry_run);
    }

    #[test]
    fn test_preview_is_a_dry_run() {
        let args = extract_args(parse_repl_command("preview Gym  at 7").unwrap());
        assert_eq!(args.text, vec!["Gym  at 7".to_string()]);
        assert!(args.dry_run);

        assert!(parse_repl_command("preview").is_err());
    }

    #[test]
    fn test_builtin_commands() {
        assert!(matches!(parse_repl_command("exit"), Ok(ReplCommand::Exit)));
        assert!(matches!(parse_repl_command("?"), Ok(ReplCommand::Help)));
        assert!(matches!(
            parse_repl_command("tasks"),
            Ok(ReplCommand::Command(Command::Tasks))
        ));
    }

    #[test]
    fn test_events_range() {
        match parse_repl_command("events 2025-05-14 2025-05-21").unwrap() {
            ReplCommand::Command(Command::Events(args)) => {
                assert_eq!(args.from.as_deref(), Some("2025-05-14"));
                assert_eq!(args.to.as_deref(), Some("2025-05-21"));
            }
            other => panic!("Expected events, got {:?}", other),
        }
        assert!(matches!(
            parse_repl_command("events"),
            Ok(ReplCommand::Command(Command::Events(_)))
        ));
    }

    #[test]
    fn test_profile_commands() {
        assert!(matches!(
            parse_repl_command("profile"),
            Ok(ReplCommand::Command(Command::Profile(ProfileArgs {
                action: ProfileAction::Show
            })))
        ));
        match parse_repl_command("profile switch work").unwrap() {
            ReplCommand::Command(Command::Profile(ProfileArgs {
                action: ProfileAction::Switch { name },
            })) => assert_eq!(name, "work"),
            other => panic!("Expected profile switch, got {:?}", other),
        }
    }

    #[test]
    fn test_descriptions_starting_with_command_words() {
        for line in [
            "tasks for tomorrow are buy milk and call mom",
            "events tomorrow dentist at 3pm",
            "events a b c",
            "profile review with Sam on Monday",
            "profile switch",
            "help Alex move on Saturday",
            "q3 planning Thursday 10am",
            "q and a session Friday",
            "exit interview at 4pm",
        ] {
            let args = extract_args(parse_repl_command(line).unwrap());
            assert_eq!(args.text, vec![line.to_string()]);
            assert!(!args.dry_run);
        }
    }
}

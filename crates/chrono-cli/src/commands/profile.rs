//! Profile command implementation.

use crate::cli::{ProfileAction, ProfileArgs};
use crate::config::{Config, Profile, DEFAULT_API_KEY_ENV};
use crate::error::{CliError, Result};
use crate::output::Formatter;

/// Execute the profile command.
pub async fn execute_profile(
    args: ProfileArgs,
    config: &mut Config,
    formatter: &Formatter,
) -> Result<()> {
    match args.action {
        ProfileAction::List => list_profiles(config, formatter),
        ProfileAction::Show => show_active_profile(config, formatter),
        ProfileAction::Switch { name } => switch_profile(config, name, formatter),
        ProfileAction::Set {
            name,
            endpoint,
            model,
            api_key_env,
        } => {
            let profile = Profile {
                endpoint,
                model,
                api_key_env,
                api_key: None,
            };
            set_profile(config, name, profile, formatter)
        }
        ProfileAction::Delete { name } => delete_profile(config, name, formatter),
    }
}

/// List all profiles.
fn list_profiles(config: &Config, formatter: &Formatter) -> Result<()> {
    if config.profiles.is_empty() {
        println!("{}", formatter.info("No profiles configured"));
        return Ok(());
    }

    let mut names: Vec<&String> = config.profiles.keys().collect();
    names.sort();

    println!("Available profiles:");
    for name in names {
        let profile = &config.profiles[name];
        if name == &config.active_profile {
            println!("* {}", formatter.success(name));
        } else {
            println!("  {}", name);
        }
        print_profile(profile, config, "    ");
    }

    Ok(())
}

/// Show the active profile.
fn show_active_profile(config: &Config, formatter: &Formatter) -> Result<()> {
    let profile = config.get_active_profile()?;

    println!("Active profile: {}", formatter.success(&config.active_profile));
    print_profile(profile, config, "  ");

    Ok(())
}

fn print_profile(profile: &Profile, config: &Config, indent: &str) {
    println!("{}Endpoint: {}", indent, profile.endpoint);
    println!(
        "{}Model: {}",
        indent,
        profile.model.as_deref().unwrap_or(&config.extractor.model)
    );

    let key_source = if profile.api_key.is_some() {
        "inline".to_string()
    } else {
        format!(
            "${}",
            profile.api_key_env.as_deref().unwrap_or(DEFAULT_API_KEY_ENV)
        )
    };
    println!("{}API key: {}", indent, key_source);
}

/// Switch to a different profile.
fn switch_profile(config: &mut Config, name: String, formatter: &Formatter) -> Result<()> {
    config.switch_profile(name.clone())?;
    config.save()?;
    println!(
        "{}",
        formatter.success(&format!("Switched to profile '{}'", name))
    );
    Ok(())
}

/// Create or update a profile.
fn set_profile(
    config: &mut Config,
    name: String,
    mut profile: Profile,
    formatter: &Formatter,
) -> Result<()> {
    if profile.endpoint.trim().is_empty() {
        return Err(CliError::InvalidInput("Endpoint must not be empty".to_string()));
    }

    let action = match config.profiles.get(&name) {
        Some(existing) => {
            // Keep an inline key set by hand in the config file
            profile.api_key = existing.api_key.clone();
            "Updated"
        }
        None => "Created",
    };

    config.set_profile(name.clone(), profile);
    config.save()?;

    println!(
        "{}",
        formatter.success(&format!("{} profile '{}'", action, name))
    );

    Ok(())
}

/// Delete a profile.
fn delete_profile(config: &mut Config, name: String, formatter: &Formatter) -> Result<()> {
    if name == config.active_profile {
        return Err(CliError::NotPermitted(
            "Cannot delete the active profile".to_string(),
        ));
    }

    if config.profiles.remove(&name).is_some() {
        config.save()?;
        println!(
            "{}",
            formatter.success(&format!("Deleted profile '{}'", name))
        );
    } else {
        println!(
            "{}",
            formatter.warning(&format!("Profile '{}' does not exist", name))
        );
    }

    Ok(())
}

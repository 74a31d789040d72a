//! Config command handler

use crate::args::ConfigSubcommand;
use std::io::{self, Write};
use study_planner::config::Config;
use study_planner::core::models::TimeOfDay;
use study_planner::logger::Level;

/// Keys accepted by `config get|set|unset`
const KEYS: &str = "level, file, verbose, sample_file, start_time, end_time, break_duration, submit_delay_ms, out_dir";

/// Dispatch config subcommands. Returns the process exit code.
pub fn run(subcommand: Option<ConfigSubcommand>, config: &mut Config, defaults: &Config) -> i32 {
    let outcome = match subcommand {
        None => handle_config_get(config, None),
        Some(ConfigSubcommand::Get { key }) => handle_config_get(config, key.as_deref()),
        Some(ConfigSubcommand::Set { key, value }) => handle_config_set(config, &key, &value),
        Some(ConfigSubcommand::Unset { key }) => handle_config_unset(config, defaults, &key),
        Some(ConfigSubcommand::Reset) => handle_config_reset(),
    };
    match outcome {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("✗ {e}");
            1
        }
    }
}

/// Reject values the form would later ignore, before they reach the file
fn check_value(key: &str, value: &str) -> Result<(), String> {
    match key {
        "level" => value.parse::<Level>().map(|_| ()),
        "start_time" | "start-time" | "end_time" | "end-time" if !value.trim().is_empty() => {
            value.parse::<TimeOfDay>().map(|_| ())
        }
        "break_duration" | "break-duration" if value.trim() == "0" => {
            Err("break_duration must be at least 1 minute".to_string())
        }
        _ => Ok(()),
    }
}

fn unknown_key(key: &str) -> String {
    format!("Unknown config key: '{key}' (expected one of: {KEYS})")
}

/// Handle the config get subcommand
fn handle_config_get(config: &Config, key: Option<&str>) -> Result<(), String> {
    let Some(key) = key else {
        println!("\n=== Configuration ===\n");
        print!("{config}");
        return Ok(());
    };
    let value = config.get(key).ok_or_else(|| unknown_key(key))?;
    println!("{value}");
    Ok(())
}

/// Handle the config set subcommand
fn handle_config_set(config: &mut Config, key: &str, value: &str) -> Result<(), String> {
    if config.get(key).is_none() {
        return Err(unknown_key(key));
    }
    check_value(key, value)?;
    config.set(key, value)?;
    config
        .save()
        .map_err(|e| format!("Failed to save config: {e}"))?;
    println!("✓ Set {key} = {value}");
    Ok(())
}

/// Handle the config unset subcommand
fn handle_config_unset(config: &mut Config, defaults: &Config, key: &str) -> Result<(), String> {
    config.unset(key, defaults).map_err(|_| unknown_key(key))?;
    config
        .save()
        .map_err(|e| format!("Failed to save config: {e}"))?;
    println!(
        "✓ Reset {key} to default ({})",
        defaults.get(key).unwrap_or_default()
    );
    Ok(())
}

/// Handle the config reset subcommand
fn handle_config_reset() -> Result<(), String> {
    if !Config::get_config_file_path().exists() {
        println!("✓ Config is already at defaults");
        return Ok(());
    }

    print!("Reset all StudyPlanner settings to defaults? (y/n): ");
    io::stdout().flush().ok();

    let mut response = String::new();
    io::stdin().read_line(&mut response).ok();

    if matches!(response.trim().to_ascii_lowercase().as_str(), "y" | "yes") {
        Config::reset().map_err(|e| format!("Failed to remove config file: {e}"))?;
        println!("✓ Config reset to defaults");
    } else {
        println!("✗ Reset cancelled");
    }
    Ok(())
}

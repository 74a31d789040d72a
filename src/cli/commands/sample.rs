//! Sample command handler

use super::seed_subjects;
use std::fs;
use std::path::Path;
use study_planner::config::Config;
use study_planner::core::form::FormInput;
use study_planner::{error, info};

/// Print or write a filled-in example form file listing the seed subjects.
///
/// Returns the process exit code.
pub fn run(output: Option<&Path>, config: &Config) -> i32 {
    let template = FormInput {
        subject: Some(seed_subjects(config)),
        ..FormInput::sample()
    };
    let body = match template.to_toml() {
        Ok(body) => body,
        Err(e) => {
            error!("Failed to render sample form: {e}");
            eprintln!("✗ Failed to render sample form: {e}");
            return 1;
        }
    };

    let Some(path) = output else {
        print!("{body}");
        return 0;
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if let Err(e) = fs::create_dir_all(parent) {
            eprintln!("✗ Failed to create directory {}: {e}", parent.display());
            return 1;
        }
    }
    match fs::write(path, body) {
        Ok(()) => {
            println!("✓ Sample form written to: {}", path.display());
            info!("Sample form written to: {}", path.display());
            0
        }
        Err(e) => {
            eprintln!("✗ Failed to write {}: {e}", path.display());
            1
        }
    }
}

//! Submit command handler

use super::open_form;
use crate::args::SubmitFormat;
use std::fs;
use std::path::{Path, PathBuf};
use study_planner::config::Config;
use study_planner::core::form::SubmissionPayload;
use study_planner::{error, info};

/// Validate a form file and write its payload.
///
/// `output` of `-` prints the payload instead of writing a file. Returns the
/// process exit code: `0` when the payload was delivered, `1` otherwise.
pub fn run(
    form: &Path,
    output: Option<&Path>,
    format: SubmitFormat,
    config: &Config,
    verbose: bool,
) -> i32 {
    match submit_single(form, output, format, config, verbose) {
        Ok(Some(path)) => {
            println!("✓ Submission written to: {}", path.display());
            info!("Submission written to: {}", path.display());
            0
        }
        Ok(None) => 0,
        Err(e) => {
            error!("Submit failed for {}: {e}", form.display());
            eprintln!("{e}");
            1
        }
    }
}

fn submit_single(
    form: &Path,
    output: Option<&Path>,
    format: SubmitFormat,
    config: &Config,
    verbose: bool,
) -> Result<Option<PathBuf>, String> {
    let mut session = open_form(form, config)?;

    let submission = match session.submit() {
        Ok(submission) => submission,
        Err(e) => {
            let presenter = session.presenter();
            let mut message = format!("✗ {e}");
            for notice in &presenter.notices {
                message.push_str(&format!("\n  ! {notice}"));
            }
            if verbose {
                for field in &presenter.invalid {
                    message.push_str(&format!("\n  · invalid: {field}"));
                }
            }
            return Err(message);
        }
    };

    if let Some(warning) = &session.presenter().warning {
        eprintln!("⚠ {warning}");
    }

    let path = output_path(form, output, format, config)?;
    if verbose {
        eprintln!(
            "Submitting {} after {} ms",
            session.subjects().count_label(),
            submission.delay.as_millis()
        );
    }
    submission.dispatch(|payload| write_payload(&payload, path.as_deref(), format))?;
    Ok(path)
}

fn output_path(
    form: &Path,
    output: Option<&Path>,
    format: SubmitFormat,
    config: &Config,
) -> Result<Option<PathBuf>, String> {
    if let Some(output) = output {
        return Ok((output != Path::new("-")).then(|| output.to_path_buf()));
    }
    let out_dir = PathBuf::from(&config.paths.out_dir);
    fs::create_dir_all(&out_dir).map_err(|e| {
        format!(
            "✗ Failed to create output directory {}: {e}",
            out_dir.display()
        )
    })?;
    let stem = form
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("form");
    Ok(Some(
        out_dir.join(format!("{stem}_submission.{}", format.extension())),
    ))
}

/// Render a payload in the requested format
///
/// # Errors
/// Returns a printable message if JSON serialization fails
pub fn render_payload(payload: &SubmissionPayload, format: SubmitFormat) -> Result<String, String> {
    match format {
        SubmitFormat::Json => payload
            .to_json()
            .map_err(|e| format!("✗ Failed to serialize payload: {e}")),
        SubmitFormat::Form => Ok(payload.to_urlencoded()),
    }
}

fn write_payload(
    payload: &SubmissionPayload,
    path: Option<&Path>,
    format: SubmitFormat,
) -> Result<(), String> {
    let body = render_payload(payload, format)?;
    let Some(path) = path else {
        println!("{body}");
        return Ok(());
    };
    fs::write(path, format!("{body}\n"))
        .map_err(|e| format!("✗ Failed to write {}: {e}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use study_planner::core::form::{FormField, FormFields, SubjectList};
    use study_planner::core::models::sample_subjects;

    fn payload() -> SubmissionPayload {
        let mut fields = FormFields::default();
        fields.apply(FormField::TotalHours, "5").unwrap();
        SubmissionPayload::build(&SubjectList::new(sample_subjects()), &fields)
    }

    #[test]
    fn test_render_form_body() {
        let body = render_payload(&payload(), SubmitFormat::Form).unwrap();
        let pairs: Vec<&str> = body.split('&').collect();
        assert_eq!(pairs[0], "subject%5B%5D=Calculus");
        assert_eq!(pairs[1], "difficulty%5B%5D=4");
        assert!(pairs.contains(&"total_hours=5"));
        assert!(pairs.contains(&"study_start_time="));
    }

    #[test]
    fn test_render_json() {
        let body = render_payload(&payload(), SubmitFormat::Json).unwrap();
        assert!(body.contains("\"urgency[]\""));
    }

    #[test]
    fn test_output_path_prefers_explicit_file() {
        let config = Config::default();
        let explicit = Path::new("/tmp/out.json");
        let path = output_path(Path::new("week.toml"), Some(explicit), SubmitFormat::Json, &config)
            .unwrap();
        assert_eq!(path.as_deref(), Some(explicit));
    }

    #[test]
    fn test_output_path_dash_means_stdout() {
        let config = Config::default();
        let path =
            output_path(Path::new("week.toml"), Some(Path::new("-")), SubmitFormat::Json, &config)
                .unwrap();
        assert!(path.is_none());
    }

    #[test]
    fn test_output_path_uses_out_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.paths.out_dir = dir.path().join("subs").to_string_lossy().to_string();
        let path = output_path(Path::new("week.toml"), None, SubmitFormat::Form, &config).unwrap();
        assert_eq!(path, Some(dir.path().join("subs").join("week_submission.txt")));
        assert!(dir.path().join("subs").is_dir());
    }
}

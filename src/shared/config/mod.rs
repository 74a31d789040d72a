//! Configuration module for `StudyPlanner`

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

/// Default CLI configuration loaded based on build profile.
/// Uses release defaults in release mode, debug defaults in debug mode.
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../../assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../../assets/DefaultCLIConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

/// Placeholder expanded to the config directory inside string values.
const DIR_VARIABLE: &str = "$STUDY_PLANNER";

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

/// Form defaults applied when a form file leaves a field blank
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormConfig {
    /// TOML file with the seed subject list (empty means the built-in sample)
    #[serde(default)]
    pub sample_file: String,
    /// Study window start (`HH:MM`)
    #[serde(default)]
    pub default_start_time: String,
    /// Study window end (`HH:MM`)
    #[serde(default)]
    pub default_end_time: String,
    /// Break length in minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_break_duration: Option<u32>,
    /// Pause before a validated payload is handed off
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submit_delay_ms: Option<u64>,
}

/// Paths configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory for submitted payload files
    #[serde(default)]
    pub out_dir: String,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    pub logging: LoggingConfig,
    /// Form settings
    #[serde(default)]
    pub form: FormConfig,
    /// Path settings
    #[serde(default)]
    pub paths: PathsConfig,
}

/// Optional CLI overrides for configuration values
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override logging level
    pub level: Option<String>,
    /// Override log file path
    pub file: Option<String>,
    /// Override verbose flag
    pub verbose: Option<bool>,
    /// Override seed subject file
    pub sample_file: Option<String>,
    /// Override submission pacing delay
    pub submit_delay_ms: Option<u64>,
    /// Override payload output directory
    pub out_dir: Option<String>,
}

fn fill_if_empty(target: &mut String, default: &str) -> bool {
    if target.is_empty() && !default.is_empty() {
        default.clone_into(target);
        true
    } else {
        false
    }
}

fn fill_if_none<T: Copy>(target: &mut Option<T>, default: Option<T>) -> bool {
    if target.is_none() && default.is_some() {
        *target = default;
        true
    } else {
        false
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, String> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| format!("Invalid number for '{key}': '{value}'"))
}

fn display_optional<T: fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(String::new, |v| v.to_string())
}

impl Config {
    /// Get the `$STUDY_PLANNER` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/studyplanner`
    /// - macOS: `~/Library/Application Support/studyplanner`
    /// - Windows: `%APPDATA%\studyplanner`
    #[must_use]
    pub fn get_studyplanner_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("studyplanner")
    }

    /// Merge missing fields from defaults into this config
    ///
    /// Only fields that are empty (or unset) here and populated in `defaults`
    /// are copied, so user settings survive upgrades that add new keys.
    ///
    /// # Returns
    ///
    /// `true` if any fields were added/changed, `false` otherwise
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let merged = [
            fill_if_empty(&mut self.logging.level, &defaults.logging.level),
            fill_if_empty(&mut self.logging.file, &defaults.logging.file),
            fill_if_empty(&mut self.form.sample_file, &defaults.form.sample_file),
            fill_if_empty(
                &mut self.form.default_start_time,
                &defaults.form.default_start_time,
            ),
            fill_if_empty(
                &mut self.form.default_end_time,
                &defaults.form.default_end_time,
            ),
            fill_if_none(
                &mut self.form.default_break_duration,
                defaults.form.default_break_duration,
            ),
            fill_if_none(&mut self.form.submit_delay_ms, defaults.form.submit_delay_ms),
            fill_if_empty(&mut self.paths.out_dir, &defaults.paths.out_dir),
        ];
        merged.contains(&true)
    }

    /// Apply CLI-provided overrides onto the loaded configuration
    ///
    /// Overrides only affect this run; the config file is not rewritten.
    /// Only non-`None` values replace config values.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let mut config = Config::load();
    /// config.apply_overrides(&ConfigOverrides {
    ///     level: Some("debug".to_string()),
    ///     ..Default::default()
    /// });
    /// ```
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file.clone_from(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }
        if let Some(sample_file) = &overrides.sample_file {
            self.form.sample_file.clone_from(sample_file);
        }
        if let Some(delay) = overrides.submit_delay_ms {
            self.form.submit_delay_ms = Some(delay);
        }
        if let Some(out_dir) = &overrides.out_dir {
            self.paths.out_dir.clone_from(out_dir);
        }
    }

    /// Get the user config file path
    ///
    /// Returns `config.toml` for release builds and `dconfig.toml` for debug
    /// builds, inside [`get_studyplanner_dir`].
    ///
    /// [`get_studyplanner_dir`]: Self::get_studyplanner_dir
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_studyplanner_dir().join(CONFIG_FILE_NAME)
    }

    fn expand_variables(value: &str) -> String {
        if value.contains(DIR_VARIABLE) {
            let dir = Self::get_studyplanner_dir();
            value.replace(DIR_VARIABLE, dir.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Initialize config from a TOML string
    ///
    /// `$STUDY_PLANNER` inside path values is expanded to the config directory.
    /// Missing fields fall back to their serde defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML cannot be parsed or doesn't match the expected schema
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;

        config.logging.file = Self::expand_variables(&config.logging.file);
        config.form.sample_file = Self::expand_variables(&config.form.sample_file);
        config.paths.out_dir = Self::expand_variables(&config.paths.out_dir);

        Ok(config)
    }

    /// Load configuration from embedded defaults
    ///
    /// # Panics
    /// Panics if the embedded default configuration is invalid TOML. The
    /// defaults are compiled into the binary and covered by tests.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).expect("Failed to parse compiled-in default configuration")
    }

    /// Load configuration from file, or create it from defaults on first run
    ///
    /// An existing file has any newly introduced keys merged in from the
    /// defaults and is re-saved. Any read or parse error falls back to the
    /// defaults.
    #[must_use]
    pub fn load() -> Self {
        let config_file = Self::get_config_file_path();
        let defaults = Self::from_defaults();

        if !config_file.exists() {
            if let Some(parent) = config_file.parent() {
                let _ = fs::create_dir_all(parent);
            }
            let _ = defaults.save();
            return defaults;
        }

        match fs::read_to_string(&config_file)
            .ok()
            .and_then(|content| Self::from_toml(&content).ok())
        {
            Some(mut config) => {
                if config.merge_defaults(&defaults) {
                    let _ = config.save();
                }
                config
            }
            None => defaults,
        }
    }

    /// Save configuration to file
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be created or the file
    /// cannot be written
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let config_file = Self::get_config_file_path();
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(&config_file, toml_str)?;
        Ok(())
    }

    /// Get a configuration value by key
    ///
    /// Supported keys: `level`, `file`, `verbose`, `sample_file`,
    /// `start_time`, `end_time`, `break_duration`, `submit_delay_ms`, `out_dir`.
    /// Dashed spellings are accepted too. Unset numeric values read as "".
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "level" => Some(self.logging.level.clone()),
            "file" => Some(self.logging.file.clone()),
            "verbose" => Some(self.logging.verbose.to_string()),
            "sample_file" | "sample-file" => Some(self.form.sample_file.clone()),
            "start_time" | "start-time" => Some(self.form.default_start_time.clone()),
            "end_time" | "end-time" => Some(self.form.default_end_time.clone()),
            "break_duration" | "break-duration" => {
                Some(display_optional(self.form.default_break_duration))
            }
            "submit_delay_ms" | "submit-delay-ms" => {
                Some(display_optional(self.form.submit_delay_ms))
            }
            "out_dir" | "out-dir" => Some(self.paths.out_dir.clone()),
            _ => None,
        }
    }

    /// Set a configuration value by key
    ///
    /// Updates the in-memory config only; call [`save()`](Config::save) to persist.
    ///
    /// # Errors
    /// Returns an error if the key is not recognized or the value cannot be
    /// parsed (e.g. "maybe" for `verbose`, "soon" for `submit_delay_ms`)
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key {
            "level" => self.logging.level = value.to_string(),
            "file" => self.logging.file = value.to_string(),
            "verbose" => {
                self.logging.verbose = value
                    .parse::<bool>()
                    .map_err(|_| format!("Invalid boolean value for 'verbose': '{value}'"))?;
            }
            "sample_file" | "sample-file" => self.form.sample_file = value.to_string(),
            "start_time" | "start-time" => self.form.default_start_time = value.to_string(),
            "end_time" | "end-time" => self.form.default_end_time = value.to_string(),
            "break_duration" | "break-duration" => {
                self.form.default_break_duration = Some(parse_number(key, value)?);
            }
            "submit_delay_ms" | "submit-delay-ms" => {
                self.form.submit_delay_ms = Some(parse_number(key, value)?);
            }
            "out_dir" | "out-dir" => self.paths.out_dir = value.to_string(),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Unset a configuration value by key (reset to default)
    ///
    /// # Errors
    /// Returns an error if the key is not recognized.
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        match key {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "sample_file" | "sample-file" => {
                self.form.sample_file.clone_from(&defaults.form.sample_file);
            }
            "start_time" | "start-time" => self
                .form
                .default_start_time
                .clone_from(&defaults.form.default_start_time),
            "end_time" | "end-time" => self
                .form
                .default_end_time
                .clone_from(&defaults.form.default_end_time),
            "break_duration" | "break-duration" => {
                self.form.default_break_duration = defaults.form.default_break_duration;
            }
            "submit_delay_ms" | "submit-delay-ms" => {
                self.form.submit_delay_ms = defaults.form.submit_delay_ms;
            }
            "out_dir" | "out-dir" => self.paths.out_dir.clone_from(&defaults.paths.out_dir),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Reset all configuration to defaults
    ///
    /// Deletes the config file so the next [`load()`](Config::load) recreates
    /// it. Succeeds silently when there is no file.
    ///
    /// # Errors
    /// Returns an error if the config file exists but cannot be deleted
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[form]")?;
        writeln!(f, "  sample_file = \"{}\"", self.form.sample_file)?;
        writeln!(
            f,
            "  default_start_time = \"{}\"",
            self.form.default_start_time
        )?;
        writeln!(f, "  default_end_time = \"{}\"", self.form.default_end_time)?;
        writeln!(
            f,
            "  default_break_duration = {}",
            display_optional(self.form.default_break_duration)
        )?;
        writeln!(
            f,
            "  submit_delay_ms = {}",
            display_optional(self.form.submit_delay_ms)
        )?;

        writeln!(f, "\n[paths]")?;
        writeln!(f, "  out_dir = \"{}\"", self.paths.out_dir)?;

        Ok(())
    }
}

//! Crate-internal logger.
//! Feature flags: `log-info`, `log-debug`, `verbose`, `file-logging`.
//!
//! Messages go to the terminal (or the browser console on `wasm32`) unless a
//! log file has been opened, in which case prefixed records are appended there.

use std::fmt::{self, Arguments};
use std::str::FromStr;
#[cfg(feature = "log-debug")]
use std::sync::atomic::AtomicBool;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::LazyLock;

#[cfg(feature = "file-logging")]
use std::{
    fs::{File, OpenOptions},
    io::Write,
    sync::Mutex,
};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;
#[cfg(target_arch = "wasm32")]
use web_sys::console;

/// Logging levels.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    /// Error-level messages (always enabled).
    Error = 1,
    /// Warning-level messages (always enabled).
    Warn = 2,
    /// Info-level messages (requires `log-info` feature).
    Info = 3,
    /// Debug-level messages (requires `log-debug` feature and runtime enablement).
    Debug = 4,
}

impl Level {
    const fn from_u8(raw: u8) -> Self {
        match raw {
            1 => Self::Error,
            2 => Self::Warn,
            3 => Self::Info,
            _ => Self::Debug,
        }
    }

    const fn prefix(self) -> &'static str {
        match self {
            Self::Error => "[ERROR]",
            Self::Warn => "[WARN]",
            Self::Info => "[INFO]",
            Self::Debug => "[DEBUG]",
        }
    }

    /// Lowercase name as stored in the config file.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        }
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "error" | "err" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            _ => Err(format!("Unknown log level: '{s}'")),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const fn default_level() -> u8 {
    if cfg!(feature = "log-debug") {
        Level::Debug as u8
    } else if cfg!(feature = "log-info") {
        Level::Info as u8
    } else {
        Level::Warn as u8
    }
}

static LOG_LEVEL: LazyLock<AtomicU8> = LazyLock::new(|| AtomicU8::new(default_level()));
#[cfg(feature = "log-debug")]
static DEBUG_ENABLED: AtomicBool = AtomicBool::new(true);
#[cfg(feature = "verbose")]
static VERBOSE_ENABLED: AtomicBool = AtomicBool::new(false);
#[cfg(feature = "file-logging")]
static LOG_FILE: LazyLock<Mutex<Option<File>>> = LazyLock::new(|| Mutex::new(None));

/// Set the global log level.
pub fn set_level(level: Level) {
    LOG_LEVEL.store(level as u8, Ordering::SeqCst);
}

/// Current global log level.
#[must_use]
pub fn level() -> Level {
    Level::from_u8(LOG_LEVEL.load(Ordering::SeqCst))
}

#[must_use]
/// Parse level from string (case-insensitive) and set it. Returns `true` on success.
pub fn set_level_from_str(level: &str) -> bool {
    level.parse::<Level>().map(set_level).is_ok()
}

// Runtime toggles compile to no-ops when their feature is off.
macro_rules! runtime_toggle {
    ($feature:literal, $flag:ident, $enable:ident, $disable:ident, $query:ident, $what:literal) => {
        #[cfg(feature = $feature)]
        #[doc = concat!("Enable ", $what, " at runtime.")]
        pub fn $enable() {
            $flag.store(true, Ordering::SeqCst);
        }
        #[cfg(not(feature = $feature))]
        #[doc = concat!("Enable ", $what, " at runtime (no-op without the `", $feature, "` feature).")]
        pub fn $enable() {}

        #[cfg(feature = $feature)]
        #[doc = concat!("Disable ", $what, " at runtime.")]
        pub fn $disable() {
            $flag.store(false, Ordering::SeqCst);
        }
        #[cfg(not(feature = $feature))]
        #[doc = concat!("Disable ", $what, " at runtime (no-op without the `", $feature, "` feature).")]
        pub fn $disable() {}

        #[cfg(feature = $feature)]
        #[doc = concat!("Returns whether ", $what, " is enabled.")]
        pub fn $query() -> bool {
            $flag.load(Ordering::SeqCst)
        }
        #[cfg(not(feature = $feature))]
        #[doc = concat!("Returns whether ", $what, " is enabled (always false without the `", $feature, "` feature).")]
        pub fn $query() -> bool {
            false
        }
    };
}

runtime_toggle!(
    "log-debug",
    DEBUG_ENABLED,
    enable_debug,
    disable_debug,
    is_debug_enabled,
    "debug logging"
);
runtime_toggle!(
    "verbose",
    VERBOSE_ENABLED,
    enable_verbose,
    disable_verbose,
    is_verbose_enabled,
    "verbose output"
);

#[cfg(feature = "file-logging")]
#[must_use]
/// Route prefixed log records to `path` (opened in append mode). Returns `true` on success.
pub fn init_file_logging(path: &std::path::Path) -> bool {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            let _ = std::fs::create_dir_all(parent);
        }
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .is_ok_and(|file| {
            LOG_FILE.lock().is_ok_and(|mut log_file| {
                *log_file = Some(file);
                true
            })
        })
}

#[cfg(not(feature = "file-logging"))]
#[must_use]
/// File logging is unavailable without the `file-logging` feature; always returns `false`.
pub fn init_file_logging(_path: &std::path::Path) -> bool {
    false
}

/// Appends to the log file if one is open. Returns `false` when no file sink is active.
#[cfg(feature = "file-logging")]
fn write_to_file(message: &str) -> bool {
    let Ok(mut guard) = LOG_FILE.lock() else {
        return false;
    };
    match guard.as_mut() {
        Some(file) => {
            let _ = writeln!(file, "{message}");
            let _ = file.flush();
            true
        }
        None => false,
    }
}

#[cfg(not(feature = "file-logging"))]
const fn write_to_file(_message: &str) -> bool {
    false
}

#[cfg(target_arch = "wasm32")]
fn emit_console(level: Level, msg: &str) {
    let style = match level {
        Level::Error => "color:#fff;background:#c0392b;font-weight:bold;padding:1px 4px;border-radius:3px",
        Level::Warn => "color:#000;background:#ffeb3b;font-weight:bold;padding:1px 4px;border-radius:3px",
        Level::Info => "",
        Level::Debug => "color:#000;background:#bdc3c7;padding:1px 4px;border-radius:3px",
    };
    let formatted = JsValue::from_str(&format!("%c{} {msg}", level.prefix()));
    let style = JsValue::from_str(style);
    match level {
        Level::Error => console::error_2(&formatted, &style),
        Level::Warn => console::warn_2(&formatted, &style),
        _ => console::log_2(&formatted, &style),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit_console(level: Level, msg: &str) {
    match level {
        Level::Error | Level::Warn => eprintln!("{} {msg}", level.prefix()),
        Level::Info | Level::Debug => println!("{} {msg}", level.prefix()),
    }
}

fn should_log(level: Level) -> bool {
    let compiled_in = match level {
        Level::Info => cfg!(feature = "log-info"),
        Level::Debug => cfg!(feature = "log-debug") && is_debug_enabled(),
        Level::Error | Level::Warn => true,
    };
    compiled_in && (level as u8) <= LOG_LEVEL.load(Ordering::SeqCst)
}

/// Internal logging dispatcher used by public macros.
pub fn log_impl(level: Level, args: Arguments) {
    if !should_log(level) {
        return;
    }
    let msg = args.to_string();
    if !write_to_file(&format!("{} {msg}", level.prefix())) {
        emit_console(level, &msg);
    }
}

#[macro_export]
/// Logs an error-level message (always enabled).
macro_rules! error { ($($arg:tt)*) => { $crate::logger::log_impl($crate::logger::Level::Error, format_args!($($arg)*)) }; }
#[macro_export]
/// Logs a warning-level message (always enabled).
macro_rules! warn  { ($($arg:tt)*) => { $crate::logger::log_impl($crate::logger::Level::Warn,  format_args!($($arg)*)) }; }
#[macro_export]
/// Logs an info-level message (requires `log-info` feature).
macro_rules! info  { ($($arg:tt)*) => { $crate::logger::log_impl($crate::logger::Level::Info,  format_args!($($arg)*)) }; }
#[macro_export]
/// Logs a debug-level message (requires `log-debug` feature and runtime enablement).
macro_rules! debug { ($($arg:tt)*) => { $crate::logger::log_impl($crate::logger::Level::Debug, format_args!($($arg)*)) }; }
#[macro_export]
/// Prints a verbose message to stdout when verbose output is enabled. Never written to log files.
macro_rules! verbose {
    ($($arg:tt)*) => {
        if $crate::logger::is_verbose_enabled() { println!($($arg)*); }
    }
}

use chrono::Local;
use log::{LevelFilter, Metadata, Record, SetLoggerError};
use std::collections::HashSet;
use std::io::{self, Write};
use std::sync::OnceLock;

// Custom logger structure
#[derive(Debug)]
struct Ls8Logger {
    level: LevelFilter,
    debug_filters: Option<HashSet<String>>,
}

impl Ls8Logger {
    fn format(&self, record: &Record) -> String {
        let level_color = match record.level() {
            log::Level::Error => "\x1B[31m", // Red
            log::Level::Warn => "\x1B[33m",  // Yellow
            log::Level::Info => "\x1B[32m",  // Green
            log::Level::Debug => "\x1B[36m", // Cyan
            log::Level::Trace => "\x1B[35m", // Magenta
        };
        let reset = "\x1B[0m";
        let timestamp = Local::now().format("%H:%M:%S%.3f");

        let mut output = format!(
            "{timestamp} {level_color}{level:5}{reset} {target}: {message}",
            level = record.level(),
            target = record.target(),
            message = record.args()
        );

        // Add module path if available and different from target
        if let Some(module_path) = record.module_path() {
            if module_path != record.target() {
                output.push_str(&format!(" [{}]", module_path));
            }
        }
        output
    }
}

// Implement the log::Log trait for our custom logger
impl log::Log for Ls8Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        if metadata.level() > self.level {
            return false;
        }
        // Debug and trace records are limited to the filtered topics
        if let Some(filters) = &self.debug_filters {
            if metadata.level() >= log::Level::Debug {
                return filters.contains(metadata.target())
                    || filters.iter().any(|f| metadata.target().starts_with(f.as_str()));
            }
        }
        true
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            // Diagnostics go to stderr; stdout carries program output only
            let mut stderr = io::stderr().lock();
            let _ = writeln!(stderr, "{}", self.format(record));
        }
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
    }
}

static LOGGER: OnceLock<Ls8Logger> = OnceLock::new();

/// Parse a comma separated topic list, e.g. "vm,stack"
pub fn parse_debug_filter(filter: &str) -> HashSet<String> {
    filter
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Initialize the logger with optional debug filters.
///
/// When `RUST_LOG` is set, `env_logger` takes over and the level and filter
/// arguments are ignored.
pub fn init_logger(level: LevelFilter, debug_filter: Option<String>) -> Result<(), SetLoggerError> {
    if std::env::var_os("RUST_LOG").is_some() {
        return env_logger::Builder::from_default_env()
            .target(env_logger::Target::Stderr)
            .try_init();
    }

    let logger = LOGGER.get_or_init(|| Ls8Logger {
        level,
        debug_filters: debug_filter.as_deref().map(parse_debug_filter),
    });
    log::set_logger(logger).map(|()| log::set_max_level(level))
}

// Helper macros for specific debug topics. The `cycle, pc =>` form prefixes
// the message with the machine position.
#[macro_export]
macro_rules! debug_vm {
    ($cycle:expr, $pc:expr => $($arg:tt)+) => {
        log::debug!(target: "vm", "[C{:04}][PC {:#04X}] {}", $cycle, $pc, format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        log::debug!(target: "vm", "{}", format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! debug_instructions {
    ($cycle:expr, $pc:expr => $($arg:tt)+) => {
        log::debug!(target: "instructions", "[C{:04}][PC {:#04X}] {}", $cycle, $pc, format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        log::debug!(target: "instructions", "{}", format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! debug_stack {
    ($cycle:expr, $pc:expr => $($arg:tt)+) => {
        log::debug!(target: "stack", "[C{:04}][PC {:#04X}] {}", $cycle, $pc, format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        log::debug!(target: "stack", "{}", format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! debug_loader {
    ($($arg:tt)+) => {
        log::debug!(target: "loader", "{}", format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! trace_cpu {
    ($($arg:tt)+) => {
        log::trace!(target: "trace", "{}", format_args!($($arg)+))
    };
}

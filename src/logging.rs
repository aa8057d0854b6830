use colored::{Color, Colorize};
use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::fmt;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU8, Ordering};

/// Diagnostic severity, ordered from most verbose to silent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    #[default]
    Info = 2,
    Warning = 3,
    Error = 4,
    None = 5,
}

/// Output stream a record is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

static LEVEL: AtomicU8 = AtomicU8::new(LogLevel::Info as u8);
static LOGGER: ConsoleLogger = ConsoleLogger;

impl LogLevel {
    /// Case-insensitive. Unknown input falls back to `Info`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "trace" => LogLevel::Trace,
            "debug" => LogLevel::Debug,
            "info" => LogLevel::Info,
            "warning" | "warn" => LogLevel::Warning,
            "error" => LogLevel::Error,
            "none" => LogLevel::None,
            _ => LogLevel::Info,
        }
    }

    pub fn from_raw(raw: i32) -> Self {
        match raw {
            0 => LogLevel::Trace,
            1 => LogLevel::Debug,
            2 => LogLevel::Info,
            3 => LogLevel::Warning,
            4 => LogLevel::Error,
            5 => LogLevel::None,
            _ => LogLevel::Info,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
            LogLevel::None => "NONE",
        }
    }

    pub fn stream(self) -> Stream {
        if self >= LogLevel::Error {
            Stream::Stderr
        } else {
            Stream::Stdout
        }
    }

    fn color(self) -> Color {
        match self {
            LogLevel::Trace => Color::BrightBlack,
            LogLevel::Debug => Color::Cyan,
            LogLevel::Info => Color::Green,
            LogLevel::Warning => Color::Yellow,
            LogLevel::Error | LogLevel::None => Color::Red,
        }
    }

    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            LogLevel::Trace => LevelFilter::Trace,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Warning => LevelFilter::Warn,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::None => LevelFilter::Off,
        }
    }
}

impl From<log::Level> for LogLevel {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Trace => LogLevel::Trace,
            log::Level::Debug => LogLevel::Debug,
            log::Level::Info => LogLevel::Info,
            log::Level::Warn => LogLevel::Warning,
            log::Level::Error => LogLevel::Error,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Takes effect for every record emitted after the call.
pub fn set_log_level(level: LogLevel) {
    LEVEL.store(level as u8, Ordering::Relaxed);
    log::set_max_level(level.to_level_filter());
}

pub fn log_level() -> LogLevel {
    LogLevel::from_raw(i32::from(LEVEL.load(Ordering::Relaxed)))
}

pub fn should_log(level: LogLevel) -> bool {
    level != LogLevel::None && level >= log_level()
}

/// Installs the console logger as the `log` backend.
///
/// Fails if another logger was installed first; callers that only need
/// "a logger is present" can ignore the error.
pub fn init() -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER)?;
    log::set_max_level(log_level().to_level_filter());
    Ok(())
}

/// Colored line logger. Errors go to stderr, everything else to stdout.
pub struct ConsoleLogger;

impl ConsoleLogger {
    /// Writes a single record to whichever writer matches its stream.
    /// Returns `Ok(false)` when the record is below the current level.
    pub fn emit<O: Write, E: Write>(
        &self,
        level: LogLevel,
        args: fmt::Arguments<'_>,
        out: &mut O,
        err: &mut E,
    ) -> io::Result<bool> {
        if !should_log(level) {
            return Ok(false);
        }

        let line = format!("[{}]: {}", level.label(), args).color(level.color());
        match level.stream() {
            Stream::Stdout => writeln!(out, "{}", line)?,
            Stream::Stderr => writeln!(err, "{}", line)?,
        }
        Ok(true)
    }
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        should_log(LogLevel::from(metadata.level()))
    }

    fn log(&self, record: &Record<'_>) {
        let level = LogLevel::from(record.level());
        let args = *record.args();
        #[cfg(test)]
        capture::record(level, &args);
        let _ = match level.stream() {
            Stream::Stdout => self.emit(level, args, &mut io::stdout().lock(), &mut io::sink()),
            Stream::Stderr => self.emit(level, args, &mut io::sink(), &mut io::stderr().lock()),
        };
    }

    fn flush(&self) {
        let _ = io::stdout().flush();
        let _ = io::stderr().flush();
    }
}

//! # Logging
//!
//! The store reports diagnostics through a [`Logger`] capability supplied in
//! [`Options`](crate::Options). The default, [`TracingLogger`], forwards
//! records as `tracing` events under the `docstore` target; installing a
//! subscriber is left to the application.
//!
//! ```rust
//! use docstore::{LogLevel, Logger, TracingLogger};
//!
//! let logger = TracingLogger::new(LogLevel::Debug);
//! logger.debug(format_args!("opened {}", "db"));
//! assert!(logger.enabled(LogLevel::Debug));
//! assert!(!logger.enabled(LogLevel::Trace));
//! ```

use std::fmt;

/// Severity of a log record, most severe first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    /// The application cannot continue.
    Fatal,
    /// An operation failed.
    Error,
    /// Something unexpected that did not fail the operation.
    Warn,
    /// Normal lifecycle events.
    Info,
    /// Per-operation diagnostics.
    Debug,
    /// Very chatty diagnostics.
    Trace,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Fatal => "FATAL",
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::Trace => "TRACE",
        };
        f.write_str(s)
    }
}

/// Leveled logging capability.
///
/// Implementors provide [`log`](Logger::log); the per-level methods are
/// provided. Records above the logger's threshold should be dropped cheaply,
/// which callers can check up front with [`enabled`](Logger::enabled).
pub trait Logger: Send + Sync {
    /// Whether records at `level` would be emitted.
    fn enabled(&self, level: LogLevel) -> bool {
        let _ = level;
        true
    }

    /// Emit one record.
    fn log(&self, level: LogLevel, args: fmt::Arguments<'_>);

    /// Log at [`LogLevel::Fatal`]. Does not abort.
    fn fatal(&self, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Fatal, args);
    }

    /// Log at [`LogLevel::Error`].
    fn error(&self, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Error, args);
    }

    /// Log at [`LogLevel::Warn`].
    fn warn(&self, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Warn, args);
    }

    /// Log at [`LogLevel::Info`].
    fn info(&self, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Info, args);
    }

    /// Log at [`LogLevel::Debug`].
    fn debug(&self, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Debug, args);
    }

    /// Log at [`LogLevel::Trace`].
    fn trace(&self, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Trace, args);
    }
}

/// Default logger: filters by level, then emits `tracing` events.
#[derive(Debug, Clone, Copy)]
pub struct TracingLogger {
    max_level: LogLevel,
}

impl TracingLogger {
    /// Emit records at `max_level` and more severe.
    pub fn new(max_level: LogLevel) -> Self {
        Self { max_level }
    }

    /// The configured threshold.
    pub fn max_level(&self) -> LogLevel {
        self.max_level
    }
}

impl Default for TracingLogger {
    fn default() -> Self {
        Self::new(LogLevel::Info)
    }
}

impl Logger for TracingLogger {
    fn enabled(&self, level: LogLevel) -> bool {
        level <= self.max_level
    }

    fn log(&self, level: LogLevel, args: fmt::Arguments<'_>) {
        if !self.enabled(level) {
            return;
        }
        match level {
            LogLevel::Fatal => tracing::error!(target: "docstore", fatal = true, "{}", args),
            LogLevel::Error => tracing::error!(target: "docstore", "{}", args),
            LogLevel::Warn => tracing::warn!(target: "docstore", "{}", args),
            LogLevel::Info => tracing::info!(target: "docstore", "{}", args),
            LogLevel::Debug => tracing::debug!(target: "docstore", "{}", args),
            LogLevel::Trace => tracing::trace!(target: "docstore", "{}", args),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recording(Mutex<Vec<(LogLevel, String)>>);

    impl Logger for Recording {
        fn log(&self, level: LogLevel, args: fmt::Arguments<'_>) {
            self.0.lock().unwrap().push((level, args.to_string()));
        }
    }

    #[test]
    fn levels_are_ordered_by_severity() {
        assert!(LogLevel::Fatal < LogLevel::Error);
        assert!(LogLevel::Info < LogLevel::Debug);
        assert!(LogLevel::Debug < LogLevel::Trace);
    }

    #[test]
    fn default_tracing_logger_is_info() {
        let logger = TracingLogger::default();
        assert_eq!(logger.max_level(), LogLevel::Info);
        assert!(logger.enabled(LogLevel::Fatal));
        assert!(logger.enabled(LogLevel::Info));
        assert!(!logger.enabled(LogLevel::Debug));
    }

    #[test]
    fn provided_methods_route_to_log() {
        let logger = Recording::default();
        logger.fatal(format_args!("f"));
        logger.error(format_args!("e"));
        logger.warn(format_args!("w"));
        logger.info(format_args!("i {}", 1));
        logger.debug(format_args!("d"));
        logger.trace(format_args!("t"));

        let records = logger.0.lock().unwrap();
        let levels: Vec<_> = records.iter().map(|(l, _)| *l).collect();
        assert_eq!(
            levels,
            vec![
                LogLevel::Fatal,
                LogLevel::Error,
                LogLevel::Warn,
                LogLevel::Info,
                LogLevel::Debug,
                LogLevel::Trace,
            ]
        );
        assert_eq!(records[3].1, "i 1");
    }

    #[test]
    fn tracing_logger_without_subscriber_is_silent() {
        let logger = TracingLogger::new(LogLevel::Trace);
        logger.trace(format_args!("nobody is listening"));
        logger.fatal(format_args!("still fine"));
    }

    #[test]
    fn level_display() {
        assert_eq!(LogLevel::Warn.to_string(), "WARN");
    }
}
